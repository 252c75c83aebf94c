use axum::{extract::State, http::HeaderMap, http::StatusCode, response::IntoResponse, Json};

use crate::{
    model::{
        admin::AdminLoginDto,
        api::ApiResponse,
        auth::{
            AuthResponseDto, LoginDto, LogoutDto, OtpSentDto, RefreshDto, SendOtpDto,
            SocialLoginDto, VerifyOtpDto,
        },
    },
    server::{
        error::{validation::ValidationError, AppError},
        middleware::auth::AuthGuard,
        model::{
            auth::{
                OtpMode, PasswordLoginParams, RefreshParams, SendOtpParams, SocialLoginParams,
                TokenPair, VerifyOtpParams,
            },
            user::User,
        },
        service::auth::{AuthService, OtpOutcome},
        state::AppState,
        util::{extract::AppJson, validation::non_blank},
    },
};

fn auth_response(user: User, tokens: TokenPair) -> ApiResponse<AuthResponseDto> {
    ApiResponse::ok(AuthResponseDto {
        user: user.into_dto(),
        tokens: tokens.into_dto(),
    })
}

/// POST /api/v1/auth/otp/send - Issue a one-time code
///
/// `profile_update` codes require a bearer token; the other modes are anonymous.
///
/// # Returns
/// - `200 OK` - Code sent, with its lifetime in seconds
/// - `401 Unauthorized` - `profile_update` without a valid token
/// - `404 Not Found` / `409 Conflict` - Contact does not fit the mode
/// - `422 Unprocessable Entity` - Malformed mode or contact
/// - `429 Too Many Requests` - Resend cooldown still running
pub async fn send_otp(
    State(state): State<AppState>,
    headers: HeaderMap,
    AppJson(payload): AppJson<SendOtpDto>,
) -> Result<impl IntoResponse, AppError> {
    let current_user = AuthGuard::new(&state.db, &state.config.jwt, &headers)
        .optional()
        .await?;
    let params = SendOtpParams::from_dto(payload)?;
    let (mode, contact) = (params.mode, params.contact.clone());

    let expires_in = AuthService::new(&state.db, &state.config.jwt, &state.otp)
        .send_otp(params, current_user.as_ref())
        .await?;

    Ok(Json(ApiResponse::with_message(
        "OTP sent",
        OtpSentDto {
            mode: mode.as_str().to_string(),
            contact: contact.value().to_string(),
            expires_in,
        },
    )))
}

/// POST /api/v1/auth/otp/verify - Verify a one-time code and apply its mode
///
/// # Returns
/// - `201 Created` - `register`: account created, token pair issued
/// - `200 OK` - `login` token pair, `forgot_password` reset or `profile_update` user
/// - `400 Bad Request` - Wrong, expired or exhausted code
pub async fn verify_otp(
    State(state): State<AppState>,
    headers: HeaderMap,
    AppJson(payload): AppJson<VerifyOtpDto>,
) -> Result<impl IntoResponse, AppError> {
    let current_user = AuthGuard::new(&state.db, &state.config.jwt, &headers)
        .optional()
        .await?;
    let params = VerifyOtpParams::from_dto(payload)?;
    let registering = params.mode == OtpMode::Register;

    let outcome = AuthService::new(&state.db, &state.config.jwt, &state.otp)
        .verify_otp(params, current_user.as_ref())
        .await?;

    let response = match outcome {
        OtpOutcome::Authenticated(user, tokens) => {
            let status = if registering {
                StatusCode::CREATED
            } else {
                StatusCode::OK
            };
            (status, Json(auth_response(user, tokens))).into_response()
        }
        OtpOutcome::PasswordReset => Json(ApiResponse::with_message(
            "Password has been reset",
            serde_json::Value::Null,
        ))
        .into_response(),
        OtpOutcome::ContactVerified(user) => Json(ApiResponse::with_message(
            "Contact verified",
            user.into_dto(),
        ))
        .into_response(),
    };

    Ok(response)
}

/// POST /api/v1/auth/login - Password login with email or mobile
///
/// # Returns
/// - `200 OK` - User and token pair
/// - `401 Unauthorized` - Unknown account or wrong password
/// - `403 Forbidden` - Account deactivated
pub async fn login(
    State(state): State<AppState>,
    AppJson(payload): AppJson<LoginDto>,
) -> Result<impl IntoResponse, AppError> {
    let params = PasswordLoginParams::from_dto(payload)?;

    let (user, tokens) = AuthService::new(&state.db, &state.config.jwt, &state.otp)
        .password_login(params)
        .await?;

    Ok(Json(auth_response(user, tokens)))
}

/// POST /api/v1/admin/login - Admin panel login, restricted to administrators
pub async fn admin_login(
    State(state): State<AppState>,
    AppJson(payload): AppJson<AdminLoginDto>,
) -> Result<impl IntoResponse, AppError> {
    let params = PasswordLoginParams::from_admin_dto(payload)?;

    let (user, tokens) = AuthService::new(&state.db, &state.config.jwt, &state.otp)
        .admin_login(params)
        .await?;

    Ok(Json(auth_response(user, tokens)))
}

/// POST /api/v1/auth/social - Sign in with a Firebase ID token
///
/// Unknown identities get a new account with the requested role.
///
/// # Returns
/// - `200 OK` - User and token pair
/// - `401 Unauthorized` - Token rejected by the verifier
/// - `400 Bad Request` - Social login not configured
pub async fn social_login(
    State(state): State<AppState>,
    AppJson(payload): AppJson<SocialLoginDto>,
) -> Result<impl IntoResponse, AppError> {
    let params = SocialLoginParams::from_dto(payload)?;

    let (user, tokens) = AuthService::new(&state.db, &state.config.jwt, &state.otp)
        .social_login(params, state.verifier())
        .await?;

    Ok(Json(auth_response(user, tokens)))
}

/// POST /api/v1/auth/refresh - Rotate a refresh token
pub async fn refresh(
    State(state): State<AppState>,
    AppJson(payload): AppJson<RefreshDto>,
) -> Result<impl IntoResponse, AppError> {
    let params = RefreshParams::from_dto(payload)?;

    let (user, tokens) = AuthService::new(&state.db, &state.config.jwt, &state.otp)
        .refresh(params)
        .await?;

    Ok(Json(auth_response(user, tokens)))
}

/// POST /api/v1/auth/logout - Revoke the refresh tokens of one device
pub async fn logout(
    State(state): State<AppState>,
    headers: HeaderMap,
    AppJson(payload): AppJson<LogoutDto>,
) -> Result<impl IntoResponse, AppError> {
    let user = AuthGuard::new(&state.db, &state.config.jwt, &headers)
        .require(&[])
        .await?;
    let Some(device_id) = non_blank(payload.device_id) else {
        return Err(ValidationError::field("device_id", "device_id is required").into());
    };

    AuthService::new(&state.db, &state.config.jwt, &state.otp)
        .logout(&user, &device_id)
        .await?;

    Ok(Json(ApiResponse::with_message(
        "Logged out",
        serde_json::Value::Null,
    )))
}
