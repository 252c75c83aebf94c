//! Facility catalog repository.

use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ActiveValue, ColumnTrait, DatabaseConnection, DbErr, EntityTrait,
    QueryFilter, QueryOrder,
};

use crate::server::model::catalog::{CatalogItemParams, Facility};

pub struct FacilityRepository<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> FacilityRepository<'a> {
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    pub async fn create(&self, params: CatalogItemParams) -> Result<Facility, DbErr> {
        let entity = entity::facility::ActiveModel {
            name: ActiveValue::Set(params.name),
            icon_url: ActiveValue::Set(params.icon_url),
            is_active: ActiveValue::Set(params.is_active),
            created_at: ActiveValue::Set(Utc::now()),
            ..Default::default()
        }
        .insert(self.db)
        .await?;

        Ok(Facility::from_entity(entity))
    }

    pub async fn update(
        &self,
        id: i32,
        params: CatalogItemParams,
    ) -> Result<Option<Facility>, DbErr> {
        let Some(existing) = entity::prelude::Facility::find_by_id(id).one(self.db).await?
        else {
            return Ok(None);
        };

        let mut active: entity::facility::ActiveModel = existing.into();
        active.name = ActiveValue::Set(params.name);
        active.icon_url = ActiveValue::Set(params.icon_url);
        active.is_active = ActiveValue::Set(params.is_active);

        Ok(Some(Facility::from_entity(active.update(self.db).await?)))
    }

    pub async fn delete(&self, id: i32) -> Result<bool, DbErr> {
        let result = entity::prelude::Facility::delete_by_id(id)
            .exec(self.db)
            .await?;
        Ok(result.rows_affected > 0)
    }

    pub async fn get_all(&self, active_only: bool) -> Result<Vec<Facility>, DbErr> {
        let mut query = entity::prelude::Facility::find();
        if active_only {
            query = query.filter(entity::facility::Column::IsActive.eq(true));
        }
        let entities = query
            .order_by_asc(entity::facility::Column::Name)
            .all(self.db)
            .await?;
        Ok(entities.into_iter().map(Facility::from_entity).collect())
    }

    /// Ids from `ids` that exist.
    pub async fn find_existing_ids(&self, ids: &[i32]) -> Result<Vec<i32>, DbErr> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }
        let entities = entity::prelude::Facility::find()
            .filter(entity::facility::Column::Id.is_in(ids.iter().copied()))
            .all(self.db)
            .await?;
        Ok(entities.into_iter().map(|f| f.id).collect())
    }
}
