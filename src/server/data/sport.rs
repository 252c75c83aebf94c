//! Sport catalog repository.

use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ActiveValue, ColumnTrait, DatabaseConnection, DbErr, EntityTrait,
    PaginatorTrait, QueryFilter, QueryOrder,
};

use crate::server::model::catalog::{slugify, CatalogItemParams, Sport};

pub struct SportRepository<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> SportRepository<'a> {
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    /// Creates a sport with a slug derived from its name.
    ///
    /// # Returns
    /// - `Ok(Sport)` - Created sport
    /// - `Err(DbErr)` - Database error, including unique violations on name or slug
    pub async fn create(&self, params: CatalogItemParams) -> Result<Sport, DbErr> {
        let entity = entity::sport::ActiveModel {
            slug: ActiveValue::Set(slugify(&params.name)),
            name: ActiveValue::Set(params.name),
            icon_url: ActiveValue::Set(params.icon_url),
            is_active: ActiveValue::Set(params.is_active),
            created_at: ActiveValue::Set(Utc::now()),
            ..Default::default()
        }
        .insert(self.db)
        .await?;

        Ok(Sport::from_entity(entity))
    }

    pub async fn update(
        &self,
        id: i32,
        params: CatalogItemParams,
    ) -> Result<Option<Sport>, DbErr> {
        let Some(existing) = entity::prelude::Sport::find_by_id(id).one(self.db).await? else {
            return Ok(None);
        };

        let mut active: entity::sport::ActiveModel = existing.into();
        active.slug = ActiveValue::Set(slugify(&params.name));
        active.name = ActiveValue::Set(params.name);
        active.icon_url = ActiveValue::Set(params.icon_url);
        active.is_active = ActiveValue::Set(params.is_active);

        Ok(Some(Sport::from_entity(active.update(self.db).await?)))
    }

    pub async fn delete(&self, id: i32) -> Result<bool, DbErr> {
        let result = entity::prelude::Sport::delete_by_id(id).exec(self.db).await?;
        Ok(result.rows_affected > 0)
    }

    pub async fn get_by_id(&self, id: i32) -> Result<Option<Sport>, DbErr> {
        let entity = entity::prelude::Sport::find_by_id(id).one(self.db).await?;
        Ok(entity.map(Sport::from_entity))
    }

    /// Lists sports alphabetically, optionally only active ones.
    pub async fn get_all(&self, active_only: bool) -> Result<Vec<Sport>, DbErr> {
        let mut query = entity::prelude::Sport::find();
        if active_only {
            query = query.filter(entity::sport::Column::IsActive.eq(true));
        }
        let entities = query
            .order_by_asc(entity::sport::Column::Name)
            .all(self.db)
            .await?;
        Ok(entities.into_iter().map(Sport::from_entity).collect())
    }

    /// Ids from `ids` that name an active sport.
    pub async fn find_active_ids(&self, ids: &[i32]) -> Result<Vec<i32>, DbErr> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }
        let entities = entity::prelude::Sport::find()
            .filter(entity::sport::Column::Id.is_in(ids.iter().copied()))
            .filter(entity::sport::Column::IsActive.eq(true))
            .all(self.db)
            .await?;
        Ok(entities.into_iter().map(|s| s.id).collect())
    }

    /// Whether any coaching center offers the sport.
    pub async fn is_offered(&self, id: i32) -> Result<bool, DbErr> {
        let count = entity::prelude::CenterSport::find()
            .filter(entity::center_sport::Column::SportId.eq(id))
            .count(self.db)
            .await?;
        Ok(count > 0)
    }
}
