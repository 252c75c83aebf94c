//! CMS page repository.

use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ActiveValue, ColumnTrait, DatabaseConnection, DbErr, EntityTrait,
    QueryFilter, QueryOrder,
};

use crate::server::model::content::{CmsPage, CmsPageParams};

pub struct CmsPageRepository<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> CmsPageRepository<'a> {
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    pub async fn create(&self, params: CmsPageParams) -> Result<CmsPage, DbErr> {
        let now = Utc::now();
        let entity = entity::cms_page::ActiveModel {
            slug: ActiveValue::Set(params.slug),
            title: ActiveValue::Set(params.title),
            content: ActiveValue::Set(params.content),
            is_published: ActiveValue::Set(params.is_published),
            created_at: ActiveValue::Set(now),
            updated_at: ActiveValue::Set(now),
            ..Default::default()
        }
        .insert(self.db)
        .await?;

        Ok(CmsPage::from_entity(entity))
    }

    pub async fn update(&self, id: i32, params: CmsPageParams) -> Result<Option<CmsPage>, DbErr> {
        let Some(existing) = entity::prelude::CmsPage::find_by_id(id).one(self.db).await? else {
            return Ok(None);
        };

        let mut active: entity::cms_page::ActiveModel = existing.into();
        active.slug = ActiveValue::Set(params.slug);
        active.title = ActiveValue::Set(params.title);
        active.content = ActiveValue::Set(params.content);
        active.is_published = ActiveValue::Set(params.is_published);
        active.updated_at = ActiveValue::Set(Utc::now());

        Ok(Some(CmsPage::from_entity(active.update(self.db).await?)))
    }

    pub async fn delete(&self, id: i32) -> Result<bool, DbErr> {
        let result = entity::prelude::CmsPage::delete_by_id(id).exec(self.db).await?;
        Ok(result.rows_affected > 0)
    }

    pub async fn get_all(&self) -> Result<Vec<CmsPage>, DbErr> {
        let entities = entity::prelude::CmsPage::find()
            .order_by_asc(entity::cms_page::Column::Slug)
            .all(self.db)
            .await?;
        Ok(entities.into_iter().map(CmsPage::from_entity).collect())
    }

    pub async fn find_published_by_slug(&self, slug: &str) -> Result<Option<CmsPage>, DbErr> {
        let entity = entity::prelude::CmsPage::find()
            .filter(entity::cms_page::Column::Slug.eq(slug))
            .filter(entity::cms_page::Column::IsPublished.eq(true))
            .one(self.db)
            .await?;
        Ok(entity.map(CmsPage::from_entity))
    }
}
