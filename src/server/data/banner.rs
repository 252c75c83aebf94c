//! Banner repository.

use chrono::{DateTime, Utc};
use sea_orm::{
    ActiveModelTrait, ActiveValue, ColumnTrait, Condition, DatabaseConnection, DbErr,
    EntityTrait, QueryFilter, QueryOrder,
};

use crate::server::model::content::{Banner, BannerParams};

pub struct BannerRepository<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> BannerRepository<'a> {
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    pub async fn create(&self, params: BannerParams) -> Result<Banner, DbErr> {
        let entity = entity::banner::ActiveModel {
            title: ActiveValue::Set(params.title),
            image_url: ActiveValue::Set(params.image_url),
            link_url: ActiveValue::Set(params.link_url),
            sort_order: ActiveValue::Set(params.sort_order),
            is_active: ActiveValue::Set(params.is_active),
            starts_at: ActiveValue::Set(params.starts_at),
            ends_at: ActiveValue::Set(params.ends_at),
            created_at: ActiveValue::Set(Utc::now()),
            ..Default::default()
        }
        .insert(self.db)
        .await?;

        Ok(Banner::from_entity(entity))
    }

    pub async fn update(&self, id: i32, params: BannerParams) -> Result<Option<Banner>, DbErr> {
        let Some(existing) = entity::prelude::Banner::find_by_id(id).one(self.db).await? else {
            return Ok(None);
        };

        let mut active: entity::banner::ActiveModel = existing.into();
        active.title = ActiveValue::Set(params.title);
        active.image_url = ActiveValue::Set(params.image_url);
        active.link_url = ActiveValue::Set(params.link_url);
        active.sort_order = ActiveValue::Set(params.sort_order);
        active.is_active = ActiveValue::Set(params.is_active);
        active.starts_at = ActiveValue::Set(params.starts_at);
        active.ends_at = ActiveValue::Set(params.ends_at);

        Ok(Some(Banner::from_entity(active.update(self.db).await?)))
    }

    pub async fn delete(&self, id: i32) -> Result<bool, DbErr> {
        let result = entity::prelude::Banner::delete_by_id(id).exec(self.db).await?;
        Ok(result.rows_affected > 0)
    }

    pub async fn get_all(&self) -> Result<Vec<Banner>, DbErr> {
        let entities = entity::prelude::Banner::find()
            .order_by_asc(entity::banner::Column::SortOrder)
            .order_by_asc(entity::banner::Column::Id)
            .all(self.db)
            .await?;
        Ok(entities.into_iter().map(Banner::from_entity).collect())
    }

    /// Active banners whose display window contains `now`, by sort order.
    pub async fn get_visible(&self, now: DateTime<Utc>) -> Result<Vec<Banner>, DbErr> {
        let entities = entity::prelude::Banner::find()
            .filter(entity::banner::Column::IsActive.eq(true))
            .filter(
                Condition::any()
                    .add(entity::banner::Column::StartsAt.is_null())
                    .add(entity::banner::Column::StartsAt.lte(now)),
            )
            .filter(
                Condition::any()
                    .add(entity::banner::Column::EndsAt.is_null())
                    .add(entity::banner::Column::EndsAt.gt(now)),
            )
            .order_by_asc(entity::banner::Column::SortOrder)
            .order_by_asc(entity::banner::Column::Id)
            .all(self.db)
            .await?;
        Ok(entities.into_iter().map(Banner::from_entity).collect())
    }
}
