use axum::{extract::State, http::HeaderMap, http::StatusCode, response::IntoResponse, Json};
use chrono::Utc;

use crate::{
    model::{api::ApiResponse, participant::UpsertParticipantDto},
    server::{
        error::AppError,
        middleware::auth::AuthGuard,
        model::participant::ParticipantParams,
        service::participant::ParticipantService,
        state::AppState,
        util::extract::{AppJson, AppPath},
    },
};

/// GET /api/v1/participants - The caller's participants
pub async fn list_participants(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<impl IntoResponse, AppError> {
    let user = AuthGuard::new(&state.db, &state.config.jwt, &headers)
        .require(&[])
        .await?;

    let participants = ParticipantService::new(&state.db).list(&user).await?;

    Ok(Json(ApiResponse::ok(
        participants
            .into_iter()
            .map(|p| p.into_dto())
            .collect::<Vec<_>>(),
    )))
}

/// POST /api/v1/participants
///
/// # Returns
/// - `201 Created` - New participant
/// - `409 Conflict` - Student already has a `self` participant
/// - `422 Unprocessable Entity` - Missing fields or date of birth in the future
pub async fn create_participant(
    State(state): State<AppState>,
    headers: HeaderMap,
    AppJson(payload): AppJson<UpsertParticipantDto>,
) -> Result<impl IntoResponse, AppError> {
    let user = AuthGuard::new(&state.db, &state.config.jwt, &headers)
        .require(&[])
        .await?;
    let params = ParticipantParams::from_dto(payload, Utc::now().date_naive())?;

    let participant = ParticipantService::new(&state.db)
        .create(&user, params)
        .await?;

    Ok((StatusCode::CREATED, Json(ApiResponse::ok(participant.into_dto()))))
}

/// PUT /api/v1/participants/{id}
pub async fn update_participant(
    State(state): State<AppState>,
    headers: HeaderMap,
    AppPath(id): AppPath<i32>,
    AppJson(payload): AppJson<UpsertParticipantDto>,
) -> Result<impl IntoResponse, AppError> {
    let user = AuthGuard::new(&state.db, &state.config.jwt, &headers)
        .require(&[])
        .await?;
    let params = ParticipantParams::from_dto(payload, Utc::now().date_naive())?;

    let participant = ParticipantService::new(&state.db)
        .update(&user, id, params)
        .await?;

    Ok(Json(ApiResponse::ok(participant.into_dto())))
}

/// DELETE /api/v1/participants/{id}
///
/// # Returns
/// - `204 No Content` - Deleted
/// - `409 Conflict` - Participant appears on a booking
pub async fn delete_participant(
    State(state): State<AppState>,
    headers: HeaderMap,
    AppPath(id): AppPath<i32>,
) -> Result<impl IntoResponse, AppError> {
    let user = AuthGuard::new(&state.db, &state.config.jwt, &headers)
        .require(&[])
        .await?;

    ParticipantService::new(&state.db).delete(&user, id).await?;

    Ok(StatusCode::NO_CONTENT)
}
