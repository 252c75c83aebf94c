use axum::{extract::State, http::HeaderMap, response::IntoResponse, Json};

use crate::{
    model::{
        api::ApiResponse,
        user::{ChangePasswordDto, UpdateProfileDto},
    },
    server::{
        error::AppError,
        middleware::auth::AuthGuard,
        model::user::{ChangePasswordParams, UpdateProfileParams},
        service::user::UserService,
        state::AppState,
        util::extract::AppJson,
    },
};

/// GET /api/v1/users/me - Profile of the signed-in user
///
/// # Returns
/// - `200 OK` - Current user
/// - `401 Unauthorized` - Missing or invalid access token
pub async fn get_me(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<impl IntoResponse, AppError> {
    let user = AuthGuard::new(&state.db, &state.config.jwt, &headers)
        .require(&[])
        .await?;

    Ok(Json(ApiResponse::ok(user.into_dto())))
}

/// PATCH /api/v1/users/me - Update name and learner type
///
/// Contacts are changed through the `profile_update` OTP flow instead.
pub async fn update_me(
    State(state): State<AppState>,
    headers: HeaderMap,
    AppJson(payload): AppJson<UpdateProfileDto>,
) -> Result<impl IntoResponse, AppError> {
    let user = AuthGuard::new(&state.db, &state.config.jwt, &headers)
        .require(&[])
        .await?;
    let params = UpdateProfileParams::from_dto(payload)?;

    let updated = UserService::new(&state.db)
        .update_profile(&user, params)
        .await?;

    Ok(Json(ApiResponse::ok(updated.into_dto())))
}

/// POST /api/v1/users/me/password - Change the password
///
/// # Returns
/// - `200 OK` - Password replaced
/// - `401 Unauthorized` - Current password wrong
/// - `422 Unprocessable Entity` - New password too short
pub async fn change_password(
    State(state): State<AppState>,
    headers: HeaderMap,
    AppJson(payload): AppJson<ChangePasswordDto>,
) -> Result<impl IntoResponse, AppError> {
    let user = AuthGuard::new(&state.db, &state.config.jwt, &headers)
        .require(&[])
        .await?;
    let params = ChangePasswordParams::from_dto(payload)?;

    UserService::new(&state.db)
        .change_password(&user, params)
        .await?;

    Ok(Json(ApiResponse::with_message(
        "Password changed",
        serde_json::Value::Null,
    )))
}
