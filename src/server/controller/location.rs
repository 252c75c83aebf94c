use axum::{extract::State, http::HeaderMap, http::StatusCode, response::IntoResponse, Json};

use crate::{
    model::{
        api::ApiResponse,
        catalog::{CreateCountryDto, CreateRegionDto},
    },
    server::{
        error::AppError,
        middleware::auth::{AuthGuard, Permission},
        model::{
            catalog::{region_name, CreateCountryParams},
            permission::{Action, Section},
        },
        service::location::LocationService,
        state::AppState,
        util::extract::{AppJson, AppPath},
    },
};

/// GET /api/v1/locations/countries
pub async fn list_countries(State(state): State<AppState>) -> Result<impl IntoResponse, AppError> {
    let countries = LocationService::new(&state.db).countries().await?;

    Ok(Json(ApiResponse::ok(
        countries
            .into_iter()
            .map(|c| c.into_dto())
            .collect::<Vec<_>>(),
    )))
}

/// GET /api/v1/locations/countries/{id}/states
///
/// # Returns
/// - `200 OK` - States of the country, by name
/// - `404 Not Found` - Unknown country
pub async fn list_states(
    State(state): State<AppState>,
    AppPath(country_id): AppPath<i32>,
) -> Result<impl IntoResponse, AppError> {
    let states = LocationService::new(&state.db).states(country_id).await?;

    Ok(Json(ApiResponse::ok(
        states.into_iter().map(|s| s.into_dto()).collect::<Vec<_>>(),
    )))
}

/// GET /api/v1/locations/states/{id}/cities
pub async fn list_cities(
    State(state): State<AppState>,
    AppPath(state_id): AppPath<i32>,
) -> Result<impl IntoResponse, AppError> {
    let cities = LocationService::new(&state.db).cities(state_id).await?;

    Ok(Json(ApiResponse::ok(
        cities.into_iter().map(|c| c.into_dto()).collect::<Vec<_>>(),
    )))
}

/// POST /api/v1/admin/locations/countries
///
/// # Access Control
/// - `catalog.create`
pub async fn create_country(
    State(state): State<AppState>,
    headers: HeaderMap,
    AppJson(payload): AppJson<CreateCountryDto>,
) -> Result<impl IntoResponse, AppError> {
    AuthGuard::new(&state.db, &state.config.jwt, &headers)
        .require(&[Permission::Admin(Section::Catalog, Action::Create)])
        .await?;
    let params = CreateCountryParams::from_dto(payload)?;

    let country = LocationService::new(&state.db)
        .create_country(params)
        .await?;

    Ok((StatusCode::CREATED, Json(ApiResponse::ok(country.into_dto()))))
}

/// POST /api/v1/admin/locations/countries/{id}/states
pub async fn create_state(
    State(state): State<AppState>,
    headers: HeaderMap,
    AppPath(country_id): AppPath<i32>,
    AppJson(payload): AppJson<CreateRegionDto>,
) -> Result<impl IntoResponse, AppError> {
    AuthGuard::new(&state.db, &state.config.jwt, &headers)
        .require(&[Permission::Admin(Section::Catalog, Action::Create)])
        .await?;
    let name = region_name(payload)?;

    let created = LocationService::new(&state.db)
        .create_state(country_id, name)
        .await?;

    Ok((StatusCode::CREATED, Json(ApiResponse::ok(created.into_dto()))))
}

/// POST /api/v1/admin/locations/states/{id}/cities
pub async fn create_city(
    State(state): State<AppState>,
    headers: HeaderMap,
    AppPath(state_id): AppPath<i32>,
    AppJson(payload): AppJson<CreateRegionDto>,
) -> Result<impl IntoResponse, AppError> {
    AuthGuard::new(&state.db, &state.config.jwt, &headers)
        .require(&[Permission::Admin(Section::Catalog, Action::Create)])
        .await?;
    let name = region_name(payload)?;

    let city = LocationService::new(&state.db)
        .create_city(state_id, name)
        .await?;

    Ok((StatusCode::CREATED, Json(ApiResponse::ok(city.into_dto()))))
}
