use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct CmsPageDto {
    pub id: i32,
    pub slug: String,
    pub title: String,
    pub content: String,
    pub is_published: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Public rendering of a published page.
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct PublicCmsPageDto {
    pub slug: String,
    pub title: String,
    pub content_html: String,
    pub updated_at: DateTime<Utc>,
}

#[derive(Deserialize, Debug, Clone, Default)]
pub struct UpsertCmsPageDto {
    pub slug: Option<String>,
    pub title: Option<String>,
    pub content: Option<String>,
    pub is_published: Option<bool>,
}

#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct BannerDto {
    pub id: i32,
    pub title: String,
    pub image_url: String,
    pub link_url: Option<String>,
    pub sort_order: i32,
    pub is_active: bool,
    pub starts_at: Option<DateTime<Utc>>,
    pub ends_at: Option<DateTime<Utc>>,
}

#[derive(Deserialize, Debug, Clone, Default)]
pub struct UpsertBannerDto {
    pub title: Option<String>,
    pub image_url: Option<String>,
    pub link_url: Option<String>,
    pub sort_order: Option<i32>,
    pub is_active: Option<bool>,
    pub starts_at: Option<DateTime<Utc>>,
    pub ends_at: Option<DateTime<Utc>>,
}

#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct NotificationDto {
    pub id: i32,
    pub user_id: Option<i32>,
    pub title: String,
    pub body: String,
    pub read_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
}

#[derive(Deserialize, Debug, Clone, Default)]
pub struct CreateNotificationDto {
    pub user_id: Option<i32>,
    pub title: Option<String>,
    pub body: Option<String>,
}
