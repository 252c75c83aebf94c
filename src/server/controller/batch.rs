use axum::{extract::State, http::HeaderMap, http::StatusCode, response::IntoResponse, Json};

use crate::{
    model::{
        api::ApiResponse,
        batch::{QuoteRequestDto, UpsertBatchDto},
    },
    server::{
        error::AppError,
        middleware::auth::AuthGuard,
        model::batch::{BatchParams, QuoteParams},
        service::batch::BatchService,
        state::AppState,
        util::extract::{AppJson, AppPath},
    },
};

/// POST /api/v1/centers/{id}/batches - Add a batch to an owned center
///
/// # Returns
/// - `201 Created` - New batch
/// - `403 Forbidden` - Caller does not own the center
/// - `422 Unprocessable Entity` - Invalid schedule, ages or fee configuration, or a sport
///   the center does not offer
pub async fn create_batch(
    State(state): State<AppState>,
    headers: HeaderMap,
    AppPath(center_id): AppPath<i32>,
    AppJson(payload): AppJson<UpsertBatchDto>,
) -> Result<impl IntoResponse, AppError> {
    let user = AuthGuard::new(&state.db, &state.config.jwt, &headers)
        .require(&[])
        .await?;
    let params = BatchParams::from_dto(payload)?;

    let batch = BatchService::new(&state.db)
        .create(&user, center_id, params)
        .await?;

    Ok((StatusCode::CREATED, Json(ApiResponse::ok(batch.into_dto()))))
}

/// PUT /api/v1/batches/{id}
pub async fn update_batch(
    State(state): State<AppState>,
    headers: HeaderMap,
    AppPath(id): AppPath<i32>,
    AppJson(payload): AppJson<UpsertBatchDto>,
) -> Result<impl IntoResponse, AppError> {
    let user = AuthGuard::new(&state.db, &state.config.jwt, &headers)
        .require(&[])
        .await?;
    let params = BatchParams::from_dto(payload)?;

    let batch = BatchService::new(&state.db)
        .update(&user, id, params)
        .await?;

    Ok(Json(ApiResponse::ok(batch.into_dto())))
}

/// DELETE /api/v1/batches/{id} - Deactivate a batch
pub async fn deactivate_batch(
    State(state): State<AppState>,
    headers: HeaderMap,
    AppPath(id): AppPath<i32>,
) -> Result<impl IntoResponse, AppError> {
    let user = AuthGuard::new(&state.db, &state.config.jwt, &headers)
        .require(&[])
        .await?;

    BatchService::new(&state.db).deactivate(&user, id).await?;

    Ok(StatusCode::NO_CONTENT)
}

/// GET /api/v1/centers/{id}/batches
pub async fn list_center_batches(
    State(state): State<AppState>,
    headers: HeaderMap,
    AppPath(center_id): AppPath<i32>,
) -> Result<impl IntoResponse, AppError> {
    let viewer = AuthGuard::new(&state.db, &state.config.jwt, &headers)
        .optional()
        .await?;

    let batches = BatchService::new(&state.db)
        .list_for_center(viewer.as_ref(), center_id)
        .await?;

    Ok(Json(ApiResponse::ok(
        batches
            .into_iter()
            .map(|b| b.into_dto())
            .collect::<Vec<_>>(),
    )))
}

/// GET /api/v1/batches/{id}
pub async fn get_batch(
    State(state): State<AppState>,
    headers: HeaderMap,
    AppPath(id): AppPath<i32>,
) -> Result<impl IntoResponse, AppError> {
    let viewer = AuthGuard::new(&state.db, &state.config.jwt, &headers)
        .optional()
        .await?;

    let batch = BatchService::new(&state.db)
        .get_visible(viewer.as_ref(), id)
        .await?;

    Ok(Json(ApiResponse::ok(batch.into_dto())))
}

/// POST /api/v1/batches/{id}/quote - Price a batch for the caller's participants
///
/// # Returns
/// - `200 OK` - Per-participant lines and total in minor units
/// - `422 Unprocessable Entity` - Unknown participants or ages outside the batch range
pub async fn quote_batch(
    State(state): State<AppState>,
    headers: HeaderMap,
    AppPath(id): AppPath<i32>,
    AppJson(payload): AppJson<QuoteRequestDto>,
) -> Result<impl IntoResponse, AppError> {
    let user = AuthGuard::new(&state.db, &state.config.jwt, &headers)
        .require(&[])
        .await?;
    let params = QuoteParams::from_dto(payload)?;

    let (batch, quote) = BatchService::new(&state.db)
        .quote(&user, id, &params)
        .await?;

    Ok(Json(ApiResponse::ok(
        quote.into_dto(batch.id, state.config.currency.clone()),
    )))
}
