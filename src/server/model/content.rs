//! CMS pages, banners and notifications.

use chrono::{DateTime, Utc};
use pulldown_cmark::{html, Event, Options, Parser};

use crate::{
    model::content::{
        BannerDto, CmsPageDto, CreateNotificationDto, NotificationDto, PublicCmsPageDto,
        UpsertBannerDto, UpsertCmsPageDto,
    },
    server::{
        error::validation::ValidationError,
        model::catalog::slugify,
        util::validation::{is_valid_url, non_blank},
    },
};

/// Renders markdown to HTML, dropping any raw HTML in the source.
pub fn render_markdown(markdown: &str) -> String {
    let parser = Parser::new_ext(markdown, Options::all())
        .filter(|event| !matches!(event, Event::Html(_)));
    let mut output = String::new();
    html::push_html(&mut output, parser);
    output
}

#[derive(Debug, Clone, PartialEq)]
pub struct CmsPage {
    pub id: i32,
    pub slug: String,
    pub title: String,
    pub content: String,
    pub is_published: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl CmsPage {
    pub fn from_entity(entity: entity::cms_page::Model) -> Self {
        Self {
            id: entity.id,
            slug: entity.slug,
            title: entity.title,
            content: entity.content,
            is_published: entity.is_published,
            created_at: entity.created_at,
            updated_at: entity.updated_at,
        }
    }

    pub fn into_dto(self) -> CmsPageDto {
        CmsPageDto {
            id: self.id,
            slug: self.slug,
            title: self.title,
            content: self.content,
            is_published: self.is_published,
            created_at: self.created_at,
            updated_at: self.updated_at,
        }
    }

    pub fn into_public_dto(self) -> PublicCmsPageDto {
        PublicCmsPageDto {
            content_html: render_markdown(&self.content),
            slug: self.slug,
            title: self.title,
            updated_at: self.updated_at,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct CmsPageParams {
    pub slug: String,
    pub title: String,
    pub content: String,
    pub is_published: bool,
}

impl CmsPageParams {
    /// The slug defaults to the slugified title; a supplied slug is normalized the same way.
    pub fn from_dto(dto: UpsertCmsPageDto) -> Result<Self, ValidationError> {
        let mut errors = ValidationError::new();

        let title = non_blank(dto.title);
        errors.require_str("title", title.as_deref());
        let content = dto.content.unwrap_or_default();

        let slug = non_blank(dto.slug)
            .or_else(|| title.clone())
            .map(|s| slugify(&s))
            .unwrap_or_default();
        if slug.is_empty() && title.is_some() {
            errors.add("slug", "slug must contain letters or digits");
        }

        errors.into_result()?;

        Ok(Self {
            slug,
            title: title.unwrap_or_default(),
            content,
            is_published: dto.is_published.unwrap_or(false),
        })
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Banner {
    pub id: i32,
    pub title: String,
    pub image_url: String,
    pub link_url: Option<String>,
    pub sort_order: i32,
    pub is_active: bool,
    pub starts_at: Option<DateTime<Utc>>,
    pub ends_at: Option<DateTime<Utc>>,
}

impl Banner {
    pub fn from_entity(entity: entity::banner::Model) -> Self {
        Self {
            id: entity.id,
            title: entity.title,
            image_url: entity.image_url,
            link_url: entity.link_url,
            sort_order: entity.sort_order,
            is_active: entity.is_active,
            starts_at: entity.starts_at,
            ends_at: entity.ends_at,
        }
    }

    pub fn into_dto(self) -> BannerDto {
        BannerDto {
            id: self.id,
            title: self.title,
            image_url: self.image_url,
            link_url: self.link_url,
            sort_order: self.sort_order,
            is_active: self.is_active,
            starts_at: self.starts_at,
            ends_at: self.ends_at,
        }
    }

    /// Active and inside its display window at `now`.
    pub fn is_visible_at(&self, now: DateTime<Utc>) -> bool {
        self.is_active
            && self.starts_at.is_none_or(|start| start <= now)
            && self.ends_at.is_none_or(|end| end > now)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct BannerParams {
    pub title: String,
    pub image_url: String,
    pub link_url: Option<String>,
    pub sort_order: i32,
    pub is_active: bool,
    pub starts_at: Option<DateTime<Utc>>,
    pub ends_at: Option<DateTime<Utc>>,
}

impl BannerParams {
    pub fn from_dto(dto: UpsertBannerDto) -> Result<Self, ValidationError> {
        let mut errors = ValidationError::new();

        let title = non_blank(dto.title);
        errors.require_str("title", title.as_deref());
        let image_url = non_blank(dto.image_url);
        match image_url.as_deref() {
            None => errors.add("image_url", "image_url is required"),
            Some(url) if !is_valid_url(url) => errors.add("image_url", "must be an http(s) URL"),
            Some(_) => {}
        }
        let link_url = non_blank(dto.link_url);
        if link_url.as_deref().is_some_and(|url| !is_valid_url(url)) {
            errors.add("link_url", "must be an http(s) URL");
        }
        if let (Some(start), Some(end)) = (dto.starts_at, dto.ends_at) {
            if end <= start {
                errors.add("ends_at", "must be after starts_at");
            }
        }

        errors.into_result()?;

        Ok(Self {
            title: title.unwrap_or_default(),
            image_url: image_url.unwrap_or_default(),
            link_url,
            sort_order: dto.sort_order.unwrap_or(0),
            is_active: dto.is_active.unwrap_or(true),
            starts_at: dto.starts_at,
            ends_at: dto.ends_at,
        })
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Notification {
    pub id: i32,
    /// `None` for broadcasts.
    pub user_id: Option<i32>,
    pub title: String,
    pub body: String,
    pub read_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
}

impl Notification {
    pub fn from_entity(entity: entity::notification::Model) -> Self {
        Self {
            id: entity.id,
            user_id: entity.user_id,
            title: entity.title,
            body: entity.body,
            read_at: entity.read_at,
            created_at: entity.created_at,
        }
    }

    pub fn into_dto(self) -> NotificationDto {
        NotificationDto {
            id: self.id,
            user_id: self.user_id,
            title: self.title,
            body: self.body,
            read_at: self.read_at,
            created_at: self.created_at,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct NotificationParams {
    pub user_id: Option<i32>,
    pub title: String,
    pub body: String,
}

impl NotificationParams {
    pub fn from_dto(dto: CreateNotificationDto) -> Result<Self, ValidationError> {
        let mut errors = ValidationError::new();
        let title = non_blank(dto.title);
        let body = non_blank(dto.body);
        errors.require_str("title", title.as_deref());
        errors.require_str("body", body.as_deref());
        errors.into_result()?;

        Ok(Self {
            user_id: dto.user_id,
            title: title.unwrap_or_default(),
            body: body.unwrap_or_default(),
        })
    }
}
