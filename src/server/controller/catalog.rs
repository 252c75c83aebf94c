use axum::{extract::State, http::HeaderMap, http::StatusCode, response::IntoResponse, Json};

use crate::{
    model::{
        api::ApiResponse,
        catalog::{UpsertFacilityDto, UpsertSportDto},
    },
    server::{
        error::AppError,
        middleware::auth::{AuthGuard, Permission},
        model::{
            catalog::CatalogItemParams,
            permission::{Action, Section},
        },
        service::catalog::CatalogService,
        state::AppState,
        util::extract::{AppJson, AppPath},
    },
};

/// GET /api/v1/sports - Active sports
pub async fn list_sports(State(state): State<AppState>) -> Result<impl IntoResponse, AppError> {
    let sports = CatalogService::new(&state.db).list_sports(true).await?;

    Ok(Json(ApiResponse::ok(
        sports.into_iter().map(|s| s.into_dto()).collect::<Vec<_>>(),
    )))
}

/// GET /api/v1/facilities - Active facilities
pub async fn list_facilities(
    State(state): State<AppState>,
) -> Result<impl IntoResponse, AppError> {
    let facilities = CatalogService::new(&state.db).list_facilities(true).await?;

    Ok(Json(ApiResponse::ok(
        facilities
            .into_iter()
            .map(|f| f.into_dto())
            .collect::<Vec<_>>(),
    )))
}

/// GET /api/v1/admin/sports - Every sport including inactive ones
///
/// # Access Control
/// - `catalog.view`
pub async fn admin_list_sports(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<impl IntoResponse, AppError> {
    AuthGuard::new(&state.db, &state.config.jwt, &headers)
        .require(&[Permission::Admin(Section::Catalog, Action::View)])
        .await?;

    let sports = CatalogService::new(&state.db).list_sports(false).await?;

    Ok(Json(ApiResponse::ok(
        sports.into_iter().map(|s| s.into_dto()).collect::<Vec<_>>(),
    )))
}

/// POST /api/v1/admin/sports - Create a sport
///
/// # Access Control
/// - `catalog.create`
///
/// # Returns
/// - `201 Created` - New sport with its derived slug
/// - `409 Conflict` - Name or slug already used
pub async fn create_sport(
    State(state): State<AppState>,
    headers: HeaderMap,
    AppJson(payload): AppJson<UpsertSportDto>,
) -> Result<impl IntoResponse, AppError> {
    AuthGuard::new(&state.db, &state.config.jwt, &headers)
        .require(&[Permission::Admin(Section::Catalog, Action::Create)])
        .await?;
    let params = CatalogItemParams::from_sport_dto(payload)?;

    let sport = CatalogService::new(&state.db).create_sport(params).await?;

    Ok((StatusCode::CREATED, Json(ApiResponse::ok(sport.into_dto()))))
}

/// PUT /api/v1/admin/sports/{id} - Update a sport
pub async fn update_sport(
    State(state): State<AppState>,
    headers: HeaderMap,
    AppPath(id): AppPath<i32>,
    AppJson(payload): AppJson<UpsertSportDto>,
) -> Result<impl IntoResponse, AppError> {
    AuthGuard::new(&state.db, &state.config.jwt, &headers)
        .require(&[Permission::Admin(Section::Catalog, Action::Update)])
        .await?;
    let params = CatalogItemParams::from_sport_dto(payload)?;

    let sport = CatalogService::new(&state.db)
        .update_sport(id, params)
        .await?;

    Ok(Json(ApiResponse::ok(sport.into_dto())))
}

/// DELETE /api/v1/admin/sports/{id} - Delete a sport no center offers
///
/// # Returns
/// - `204 No Content` - Deleted
/// - `409 Conflict` - Sport still offered by a coaching center
pub async fn delete_sport(
    State(state): State<AppState>,
    headers: HeaderMap,
    AppPath(id): AppPath<i32>,
) -> Result<impl IntoResponse, AppError> {
    AuthGuard::new(&state.db, &state.config.jwt, &headers)
        .require(&[Permission::Admin(Section::Catalog, Action::Delete)])
        .await?;

    CatalogService::new(&state.db).delete_sport(id).await?;

    Ok(StatusCode::NO_CONTENT)
}

/// GET /api/v1/admin/facilities - Every facility including inactive ones
pub async fn admin_list_facilities(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<impl IntoResponse, AppError> {
    AuthGuard::new(&state.db, &state.config.jwt, &headers)
        .require(&[Permission::Admin(Section::Catalog, Action::View)])
        .await?;

    let facilities = CatalogService::new(&state.db).list_facilities(false).await?;

    Ok(Json(ApiResponse::ok(
        facilities
            .into_iter()
            .map(|f| f.into_dto())
            .collect::<Vec<_>>(),
    )))
}

/// POST /api/v1/admin/facilities - Create a facility
pub async fn create_facility(
    State(state): State<AppState>,
    headers: HeaderMap,
    AppJson(payload): AppJson<UpsertFacilityDto>,
) -> Result<impl IntoResponse, AppError> {
    AuthGuard::new(&state.db, &state.config.jwt, &headers)
        .require(&[Permission::Admin(Section::Catalog, Action::Create)])
        .await?;
    let params = CatalogItemParams::from_facility_dto(payload)?;

    let facility = CatalogService::new(&state.db)
        .create_facility(params)
        .await?;

    Ok((StatusCode::CREATED, Json(ApiResponse::ok(facility.into_dto()))))
}

/// PUT /api/v1/admin/facilities/{id} - Update a facility
pub async fn update_facility(
    State(state): State<AppState>,
    headers: HeaderMap,
    AppPath(id): AppPath<i32>,
    AppJson(payload): AppJson<UpsertFacilityDto>,
) -> Result<impl IntoResponse, AppError> {
    AuthGuard::new(&state.db, &state.config.jwt, &headers)
        .require(&[Permission::Admin(Section::Catalog, Action::Update)])
        .await?;
    let params = CatalogItemParams::from_facility_dto(payload)?;

    let facility = CatalogService::new(&state.db)
        .update_facility(id, params)
        .await?;

    Ok(Json(ApiResponse::ok(facility.into_dto())))
}

/// DELETE /api/v1/admin/facilities/{id} - Delete a facility
pub async fn delete_facility(
    State(state): State<AppState>,
    headers: HeaderMap,
    AppPath(id): AppPath<i32>,
) -> Result<impl IntoResponse, AppError> {
    AuthGuard::new(&state.db, &state.config.jwt, &headers)
        .require(&[Permission::Admin(Section::Catalog, Action::Delete)])
        .await?;

    CatalogService::new(&state.db).delete_facility(id).await?;

    Ok(StatusCode::NO_CONTENT)
}
