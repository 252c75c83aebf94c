//! CMS pages, home banners and in-app notifications.

use chrono::Utc;
use sea_orm::DatabaseConnection;

use crate::server::{
    data::{
        banner::BannerRepository, cms_page::CmsPageRepository,
        notification::NotificationRepository, user::UserRepository,
    },
    error::{validation::ValidationError, AppError},
    model::{
        content::{Banner, BannerParams, CmsPage, CmsPageParams, Notification, NotificationParams},
        pagination::{PageRequest, Paginated},
        user::User,
    },
};

pub struct ContentService<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> ContentService<'a> {
    /// Creates a new ContentService instance.
    ///
    /// # Arguments
    /// - `db` - Reference to the database connection
    ///
    /// # Returns
    /// - `ContentService` - New service instance
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    pub async fn list_pages(&self) -> Result<Vec<CmsPage>, AppError> {
        Ok(CmsPageRepository::new(self.db).get_all().await?)
    }

    /// # Returns
    /// - `Ok(CmsPage)` - Created page
    /// - `Err(AppError::Conflict)` - Slug already used
    pub async fn create_page(&self, params: CmsPageParams) -> Result<CmsPage, AppError> {
        let slug = params.slug.clone();
        CmsPageRepository::new(self.db)
            .create(params)
            .await
            .map_err(|e| AppError::on_constraint(e, format!("Page {} already exists", slug)))
    }

    pub async fn update_page(&self, id: i32, params: CmsPageParams) -> Result<CmsPage, AppError> {
        let slug = params.slug.clone();
        CmsPageRepository::new(self.db)
            .update(id, params)
            .await
            .map_err(|e| AppError::on_constraint(e, format!("Page {} already exists", slug)))?
            .ok_or_else(|| AppError::NotFound(format!("Page {} not found", id)))
    }

    pub async fn delete_page(&self, id: i32) -> Result<(), AppError> {
        if !CmsPageRepository::new(self.db).delete(id).await? {
            return Err(AppError::NotFound(format!("Page {} not found", id)));
        }
        Ok(())
    }

    /// Published page by slug. Drafts are reported missing.
    pub async fn published_page(&self, slug: &str) -> Result<CmsPage, AppError> {
        CmsPageRepository::new(self.db)
            .find_published_by_slug(slug)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Page {} not found", slug)))
    }

    pub async fn list_banners(&self) -> Result<Vec<Banner>, AppError> {
        Ok(BannerRepository::new(self.db).get_all().await?)
    }

    /// Active banners inside their display window, in display order.
    pub async fn visible_banners(&self) -> Result<Vec<Banner>, AppError> {
        Ok(BannerRepository::new(self.db)
            .get_visible(Utc::now())
            .await?)
    }

    pub async fn create_banner(&self, params: BannerParams) -> Result<Banner, AppError> {
        Ok(BannerRepository::new(self.db).create(params).await?)
    }

    pub async fn update_banner(&self, id: i32, params: BannerParams) -> Result<Banner, AppError> {
        BannerRepository::new(self.db)
            .update(id, params)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Banner {} not found", id)))
    }

    pub async fn delete_banner(&self, id: i32) -> Result<(), AppError> {
        if !BannerRepository::new(self.db).delete(id).await? {
            return Err(AppError::NotFound(format!("Banner {} not found", id)));
        }
        Ok(())
    }

    /// Sends a notification to one user, or to everybody when `user_id` is empty.
    ///
    /// # Returns
    /// - `Ok(Notification)` - Stored notification
    /// - `Err(AppError::ValidationErr)` - Unknown recipient
    pub async fn send_notification(
        &self,
        params: NotificationParams,
    ) -> Result<Notification, AppError> {
        if let Some(user_id) = params.user_id {
            if UserRepository::new(self.db).find_by_id(user_id).await?.is_none() {
                return Err(ValidationError::field("user_id", "unknown user").into());
            }
        }

        let notification = NotificationRepository::new(self.db).create(params).await?;
        match notification.user_id {
            Some(user_id) => tracing::info!("Notified user {}", user_id),
            None => tracing::info!("Broadcast notification {}", notification.id),
        }

        Ok(notification)
    }

    pub async fn notifications(
        &self,
        user: &User,
        page: PageRequest,
    ) -> Result<Paginated<Notification>, AppError> {
        Ok(NotificationRepository::new(self.db)
            .get_for_user(user.id, page)
            .await?)
    }

    /// Marks one of the caller's own notifications read. Broadcasts cannot be marked.
    pub async fn mark_read(&self, user: &User, id: i32) -> Result<Notification, AppError> {
        NotificationRepository::new(self.db)
            .mark_read(user.id, id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Notification {} not found", id)))
    }
}
