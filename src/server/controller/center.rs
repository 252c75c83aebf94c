use axum::{extract::State, http::HeaderMap, http::StatusCode, response::IntoResponse, Json};
use entity::sea_orm_active_enums::UserRole;

use crate::{
    model::{
        api::ApiResponse,
        center::{CenterQueryDto, UpsertCenterDto},
    },
    server::{
        error::AppError,
        middleware::auth::{AuthGuard, Permission},
        model::center::{CenterFilter, CenterProfile},
        service::center::CenterService,
        state::AppState,
        util::extract::{AppJson, AppPath, AppQuery},
    },
};

/// POST /api/v1/centers - Create a draft coaching center
///
/// # Access Control
/// - `Role(Academy)`
///
/// # Returns
/// - `201 Created` - Draft center owned by the caller
/// - `422 Unprocessable Entity` - Malformed fields or unknown city/sport/facility ids
pub async fn create_center(
    State(state): State<AppState>,
    headers: HeaderMap,
    AppJson(payload): AppJson<UpsertCenterDto>,
) -> Result<impl IntoResponse, AppError> {
    let user = AuthGuard::new(&state.db, &state.config.jwt, &headers)
        .require(&[Permission::Role(UserRole::Academy)])
        .await?;
    let profile = CenterProfile::from_dto(payload)?;

    let center = CenterService::new(&state.db).create(&user, profile).await?;

    Ok((StatusCode::CREATED, Json(ApiResponse::ok(center.into_dto(true)))))
}

/// GET /api/v1/centers/mine - Centers owned by the caller, drafts included
pub async fn my_centers(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<impl IntoResponse, AppError> {
    let user = AuthGuard::new(&state.db, &state.config.jwt, &headers)
        .require(&[Permission::Role(UserRole::Academy)])
        .await?;

    let centers = CenterService::new(&state.db).list_mine(&user).await?;

    Ok(Json(ApiResponse::ok(
        centers
            .into_iter()
            .map(|c| c.into_dto(true))
            .collect::<Vec<_>>(),
    )))
}

/// PUT /api/v1/centers/{id} - Replace a center profile
///
/// Published centers are re-validated and stay published only if still complete.
///
/// # Returns
/// - `200 OK` - Updated center
/// - `403 Forbidden` - Caller does not own the center
/// - `422 Unprocessable Entity` - Invalid fields, or update would break a published center
pub async fn update_center(
    State(state): State<AppState>,
    headers: HeaderMap,
    AppPath(id): AppPath<i32>,
    AppJson(payload): AppJson<UpsertCenterDto>,
) -> Result<impl IntoResponse, AppError> {
    let user = AuthGuard::new(&state.db, &state.config.jwt, &headers)
        .require(&[])
        .await?;
    let profile = CenterProfile::from_dto(payload)?;

    let center = CenterService::new(&state.db)
        .update(&user, id, profile)
        .await?;

    Ok(Json(ApiResponse::ok(center.into_dto(true))))
}

/// POST /api/v1/centers/{id}/publish
///
/// # Returns
/// - `200 OK` - Published center
/// - `422 Unprocessable Entity` - Every field still missing for publication
pub async fn publish_center(
    State(state): State<AppState>,
    headers: HeaderMap,
    AppPath(id): AppPath<i32>,
) -> Result<impl IntoResponse, AppError> {
    let user = AuthGuard::new(&state.db, &state.config.jwt, &headers)
        .require(&[])
        .await?;

    let center = CenterService::new(&state.db).publish(&user, id).await?;

    Ok(Json(ApiResponse::with_message(
        "Center published",
        center.into_dto(true),
    )))
}

/// POST /api/v1/centers/{id}/unpublish
pub async fn unpublish_center(
    State(state): State<AppState>,
    headers: HeaderMap,
    AppPath(id): AppPath<i32>,
) -> Result<impl IntoResponse, AppError> {
    let user = AuthGuard::new(&state.db, &state.config.jwt, &headers)
        .require(&[])
        .await?;

    let center = CenterService::new(&state.db).unpublish(&user, id).await?;

    Ok(Json(ApiResponse::ok(center.into_dto(true))))
}

/// DELETE /api/v1/centers/{id}
///
/// # Returns
/// - `204 No Content` - Deleted
/// - `409 Conflict` - Center has bookings
pub async fn delete_center(
    State(state): State<AppState>,
    headers: HeaderMap,
    AppPath(id): AppPath<i32>,
) -> Result<impl IntoResponse, AppError> {
    let user = AuthGuard::new(&state.db, &state.config.jwt, &headers)
        .require(&[])
        .await?;

    CenterService::new(&state.db).delete(&user, id).await?;

    Ok(StatusCode::NO_CONTENT)
}

/// GET /api/v1/centers - Published centers, filterable by sport and city
pub async fn list_centers(
    State(state): State<AppState>,
    AppQuery(query): AppQuery<CenterQueryDto>,
) -> Result<impl IntoResponse, AppError> {
    let (filter, page) = CenterFilter::from_query(query)?;

    let centers = CenterService::new(&state.db)
        .list_public(filter, page)
        .await?;

    Ok(Json(ApiResponse::ok(centers.into_dto(|c| c.into_dto(false)))))
}

/// GET /api/v1/centers/{id}
///
/// Drafts and bank details are only shown to the owner and administrators.
pub async fn get_center(
    State(state): State<AppState>,
    headers: HeaderMap,
    AppPath(id): AppPath<i32>,
) -> Result<impl IntoResponse, AppError> {
    let viewer = AuthGuard::new(&state.db, &state.config.jwt, &headers)
        .optional()
        .await?;

    let (center, privileged) = CenterService::new(&state.db)
        .get_visible(viewer.as_ref(), id)
        .await?;

    Ok(Json(ApiResponse::ok(center.into_dto(privileged))))
}
