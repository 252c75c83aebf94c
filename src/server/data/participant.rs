//! Participant repository. Every query is scoped to the owning user.

use chrono::Utc;
use entity::sea_orm_active_enums::ParticipantRelation;
use sea_orm::{
    ActiveModelTrait, ActiveValue, ColumnTrait, DatabaseConnection, DbErr, EntityTrait,
    PaginatorTrait, QueryFilter, QueryOrder,
};

use crate::server::model::participant::{Participant, ParticipantParams};

pub struct ParticipantRepository<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> ParticipantRepository<'a> {
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    pub async fn create(
        &self,
        user_id: i32,
        params: ParticipantParams,
    ) -> Result<Participant, DbErr> {
        let now = Utc::now();
        let entity = entity::participant::ActiveModel {
            user_id: ActiveValue::Set(user_id),
            first_name: ActiveValue::Set(params.first_name),
            last_name: ActiveValue::Set(params.last_name),
            date_of_birth: ActiveValue::Set(params.date_of_birth),
            gender: ActiveValue::Set(params.gender),
            relation: ActiveValue::Set(params.relation),
            created_at: ActiveValue::Set(now),
            updated_at: ActiveValue::Set(now),
            ..Default::default()
        }
        .insert(self.db)
        .await?;

        Ok(Participant::from_entity(entity))
    }

    /// Updates a participant owned by `user_id`.
    ///
    /// # Returns
    /// - `Ok(Some(Participant))` - Updated participant
    /// - `Ok(None)` - No participant with that id belongs to the user
    pub async fn update(
        &self,
        user_id: i32,
        id: i32,
        params: ParticipantParams,
    ) -> Result<Option<Participant>, DbErr> {
        let Some(existing) = entity::prelude::Participant::find_by_id(id)
            .filter(entity::participant::Column::UserId.eq(user_id))
            .one(self.db)
            .await?
        else {
            return Ok(None);
        };

        let mut active: entity::participant::ActiveModel = existing.into();
        active.first_name = ActiveValue::Set(params.first_name);
        active.last_name = ActiveValue::Set(params.last_name);
        active.date_of_birth = ActiveValue::Set(params.date_of_birth);
        active.gender = ActiveValue::Set(params.gender);
        active.relation = ActiveValue::Set(params.relation);
        active.updated_at = ActiveValue::Set(Utc::now());

        Ok(Some(Participant::from_entity(active.update(self.db).await?)))
    }

    pub async fn delete(&self, user_id: i32, id: i32) -> Result<bool, DbErr> {
        let result = entity::prelude::Participant::delete_many()
            .filter(entity::participant::Column::Id.eq(id))
            .filter(entity::participant::Column::UserId.eq(user_id))
            .exec(self.db)
            .await?;
        Ok(result.rows_affected > 0)
    }

    pub async fn find_for_user(&self, user_id: i32, id: i32) -> Result<Option<Participant>, DbErr> {
        let entity = entity::prelude::Participant::find_by_id(id)
            .filter(entity::participant::Column::UserId.eq(user_id))
            .one(self.db)
            .await?;
        Ok(entity.map(Participant::from_entity))
    }

    pub async fn get_for_user(&self, user_id: i32) -> Result<Vec<Participant>, DbErr> {
        let entities = entity::prelude::Participant::find()
            .filter(entity::participant::Column::UserId.eq(user_id))
            .order_by_asc(entity::participant::Column::Id)
            .all(self.db)
            .await?;
        Ok(entities.into_iter().map(Participant::from_entity).collect())
    }

    /// Participants from `ids` owned by `user_id`, in the order of `ids`.
    ///
    /// Ids that are missing or belong to someone else are left out.
    pub async fn find_many_for_user(
        &self,
        user_id: i32,
        ids: &[i32],
    ) -> Result<Vec<Participant>, DbErr> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }
        let entities = entity::prelude::Participant::find()
            .filter(entity::participant::Column::UserId.eq(user_id))
            .filter(entity::participant::Column::Id.is_in(ids.iter().copied()))
            .all(self.db)
            .await?;

        let mut participants: Vec<Participant> =
            entities.into_iter().map(Participant::from_entity).collect();
        participants.sort_by_key(|p| ids.iter().position(|id| *id == p.id));
        Ok(participants)
    }

    /// Number of `self` participants the user holds, excluding `except_id`.
    pub async fn count_self(&self, user_id: i32, except_id: Option<i32>) -> Result<u64, DbErr> {
        let mut query = entity::prelude::Participant::find()
            .filter(entity::participant::Column::UserId.eq(user_id))
            .filter(entity::participant::Column::Relation.eq(ParticipantRelation::Myself));
        if let Some(id) = except_id {
            query = query.filter(entity::participant::Column::Id.ne(id));
        }
        query.count(self.db).await
    }
}
