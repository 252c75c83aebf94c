use axum::{extract::State, http::HeaderMap, http::StatusCode, response::IntoResponse, Json};

use crate::{
    model::{
        api::{ApiResponse, PaginationQuery},
        content::{CreateNotificationDto, UpsertBannerDto, UpsertCmsPageDto},
    },
    server::{
        error::AppError,
        middleware::auth::{AuthGuard, Permission},
        model::{
            content::{BannerParams, CmsPageParams, NotificationParams},
            pagination::PageRequest,
            permission::{Action, Section},
        },
        service::content::ContentService,
        state::AppState,
        util::extract::{AppJson, AppPath, AppQuery},
    },
};

/// GET /api/v1/cms/{slug} - Published page rendered to HTML
///
/// # Returns
/// - `200 OK` - Page with `content_html`
/// - `404 Not Found` - Unknown or unpublished slug
pub async fn get_page(
    State(state): State<AppState>,
    AppPath(slug): AppPath<String>,
) -> Result<impl IntoResponse, AppError> {
    let page = ContentService::new(&state.db).published_page(&slug).await?;

    Ok(Json(ApiResponse::ok(page.into_public_dto())))
}

/// GET /api/v1/banners - Banners currently inside their display window
pub async fn list_banners(State(state): State<AppState>) -> Result<impl IntoResponse, AppError> {
    let banners = ContentService::new(&state.db).visible_banners().await?;

    Ok(Json(ApiResponse::ok(
        banners.into_iter().map(|b| b.into_dto()).collect::<Vec<_>>(),
    )))
}

/// GET /api/v1/notifications - Own notifications and broadcasts, newest first
pub async fn list_notifications(
    State(state): State<AppState>,
    headers: HeaderMap,
    AppQuery(query): AppQuery<PaginationQuery>,
) -> Result<impl IntoResponse, AppError> {
    let user = AuthGuard::new(&state.db, &state.config.jwt, &headers)
        .require(&[])
        .await?;

    let notifications = ContentService::new(&state.db)
        .notifications(&user, PageRequest::new(query.page, Some(query.per_page)))
        .await?;

    Ok(Json(ApiResponse::ok(notifications.into_dto(|n| n.into_dto()))))
}

/// POST /api/v1/notifications/{id}/read
///
/// # Returns
/// - `200 OK` - Notification with `read_at` set
/// - `404 Not Found` - Not addressed to the caller
pub async fn mark_notification_read(
    State(state): State<AppState>,
    headers: HeaderMap,
    AppPath(id): AppPath<i32>,
) -> Result<impl IntoResponse, AppError> {
    let user = AuthGuard::new(&state.db, &state.config.jwt, &headers)
        .require(&[])
        .await?;

    let notification = ContentService::new(&state.db).mark_read(&user, id).await?;

    Ok(Json(ApiResponse::ok(notification.into_dto())))
}

/// GET /api/v1/admin/cms - Every page, drafts included
pub async fn admin_list_pages(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<impl IntoResponse, AppError> {
    AuthGuard::new(&state.db, &state.config.jwt, &headers)
        .require(&[Permission::Admin(Section::Cms, Action::View)])
        .await?;

    let pages = ContentService::new(&state.db).list_pages().await?;

    Ok(Json(ApiResponse::ok(
        pages.into_iter().map(|p| p.into_dto()).collect::<Vec<_>>(),
    )))
}

/// POST /api/v1/admin/cms
///
/// # Returns
/// - `201 Created` - New page
/// - `409 Conflict` - Slug already used
pub async fn create_page(
    State(state): State<AppState>,
    headers: HeaderMap,
    AppJson(payload): AppJson<UpsertCmsPageDto>,
) -> Result<impl IntoResponse, AppError> {
    AuthGuard::new(&state.db, &state.config.jwt, &headers)
        .require(&[Permission::Admin(Section::Cms, Action::Create)])
        .await?;
    let params = CmsPageParams::from_dto(payload)?;

    let page = ContentService::new(&state.db).create_page(params).await?;

    Ok((StatusCode::CREATED, Json(ApiResponse::ok(page.into_dto()))))
}

/// PUT /api/v1/admin/cms/{id}
pub async fn update_page(
    State(state): State<AppState>,
    headers: HeaderMap,
    AppPath(id): AppPath<i32>,
    AppJson(payload): AppJson<UpsertCmsPageDto>,
) -> Result<impl IntoResponse, AppError> {
    AuthGuard::new(&state.db, &state.config.jwt, &headers)
        .require(&[Permission::Admin(Section::Cms, Action::Update)])
        .await?;
    let params = CmsPageParams::from_dto(payload)?;

    let page = ContentService::new(&state.db).update_page(id, params).await?;

    Ok(Json(ApiResponse::ok(page.into_dto())))
}

/// DELETE /api/v1/admin/cms/{id}
pub async fn delete_page(
    State(state): State<AppState>,
    headers: HeaderMap,
    AppPath(id): AppPath<i32>,
) -> Result<impl IntoResponse, AppError> {
    AuthGuard::new(&state.db, &state.config.jwt, &headers)
        .require(&[Permission::Admin(Section::Cms, Action::Delete)])
        .await?;

    ContentService::new(&state.db).delete_page(id).await?;

    Ok(StatusCode::NO_CONTENT)
}

/// GET /api/v1/admin/banners
pub async fn admin_list_banners(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<impl IntoResponse, AppError> {
    AuthGuard::new(&state.db, &state.config.jwt, &headers)
        .require(&[Permission::Admin(Section::Banners, Action::View)])
        .await?;

    let banners = ContentService::new(&state.db).list_banners().await?;

    Ok(Json(ApiResponse::ok(
        banners.into_iter().map(|b| b.into_dto()).collect::<Vec<_>>(),
    )))
}

/// POST /api/v1/admin/banners
pub async fn create_banner(
    State(state): State<AppState>,
    headers: HeaderMap,
    AppJson(payload): AppJson<UpsertBannerDto>,
) -> Result<impl IntoResponse, AppError> {
    AuthGuard::new(&state.db, &state.config.jwt, &headers)
        .require(&[Permission::Admin(Section::Banners, Action::Create)])
        .await?;
    let params = BannerParams::from_dto(payload)?;

    let banner = ContentService::new(&state.db).create_banner(params).await?;

    Ok((StatusCode::CREATED, Json(ApiResponse::ok(banner.into_dto()))))
}

/// PUT /api/v1/admin/banners/{id}
pub async fn update_banner(
    State(state): State<AppState>,
    headers: HeaderMap,
    AppPath(id): AppPath<i32>,
    AppJson(payload): AppJson<UpsertBannerDto>,
) -> Result<impl IntoResponse, AppError> {
    AuthGuard::new(&state.db, &state.config.jwt, &headers)
        .require(&[Permission::Admin(Section::Banners, Action::Update)])
        .await?;
    let params = BannerParams::from_dto(payload)?;

    let banner = ContentService::new(&state.db)
        .update_banner(id, params)
        .await?;

    Ok(Json(ApiResponse::ok(banner.into_dto())))
}

/// DELETE /api/v1/admin/banners/{id}
pub async fn delete_banner(
    State(state): State<AppState>,
    headers: HeaderMap,
    AppPath(id): AppPath<i32>,
) -> Result<impl IntoResponse, AppError> {
    AuthGuard::new(&state.db, &state.config.jwt, &headers)
        .require(&[Permission::Admin(Section::Banners, Action::Delete)])
        .await?;

    ContentService::new(&state.db).delete_banner(id).await?;

    Ok(StatusCode::NO_CONTENT)
}

/// POST /api/v1/admin/notifications - Notify one user, or everyone when `user_id` is omitted
///
/// # Returns
/// - `201 Created` - Stored notification
/// - `422 Unprocessable Entity` - Missing title or body, or unknown recipient
pub async fn send_notification(
    State(state): State<AppState>,
    headers: HeaderMap,
    AppJson(payload): AppJson<CreateNotificationDto>,
) -> Result<impl IntoResponse, AppError> {
    AuthGuard::new(&state.db, &state.config.jwt, &headers)
        .require(&[Permission::Admin(Section::Notifications, Action::Create)])
        .await?;
    let params = NotificationParams::from_dto(payload)?;

    let notification = ContentService::new(&state.db)
        .send_notification(params)
        .await?;

    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::ok(notification.into_dto())),
    ))
}
