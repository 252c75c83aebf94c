use axum::{
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use thiserror::Error;

use crate::model::api::ErrorDto;

#[derive(Error, Debug)]
pub enum AuthError {
    /// No `Authorization: Bearer` header was sent.
    #[error("Missing bearer token")]
    MissingToken,

    /// Token failed signature, expiry or type checks.
    #[error("Invalid access token: {0}")]
    InvalidToken(String),

    /// Token subject does not exist anymore.
    #[error("User {0} from token not found in database")]
    UserNotInDatabase(i32),

    /// Account has been deactivated.
    #[error("User {0} is inactive")]
    AccountInactive(i32),

    /// User lacks the role or permission required by the endpoint.
    ///
    /// Holds the user ID and a description used for server-side logging.
    #[error("User {0} denied access: {1}")]
    AccessDenied(i32, String),

    /// Wrong password or unknown account.
    #[error("Invalid credentials")]
    InvalidCredentials,

    /// Refresh token is unknown, revoked, expired or bound to another device.
    #[error("Invalid refresh token: {0}")]
    InvalidRefreshToken(String),

    /// OTP does not match or has expired.
    #[error("Invalid or expired OTP")]
    InvalidOtp,

    /// Too many wrong OTP guesses; the code has been discarded.
    #[error("OTP attempts exceeded")]
    OtpAttemptsExceeded,

    /// A new OTP was requested before the resend cooldown elapsed.
    #[error("OTP resend requested too early, retry in {0}s")]
    OtpCooldown(u64),

    /// Social login was requested but no identity provider is configured.
    #[error("Social login is not configured")]
    SocialLoginUnavailable,
}

/// Converts authentication errors into HTTP responses.
///
/// - 401 Unauthorized - missing/invalid tokens, unknown users, bad credentials
/// - 403 Forbidden - inactive accounts and permission failures
/// - 400 Bad Request - invalid OTP, social login unavailable
/// - 429 Too Many Requests - OTP throttling, with `Retry-After` on cooldowns
///
/// Details are logged at debug level while client-facing messages stay generic.
impl IntoResponse for AuthError {
    fn into_response(self) -> Response {
        tracing::debug!("{}", self);

        let (status, message) = match &self {
            Self::MissingToken => (StatusCode::UNAUTHORIZED, "Authentication required"),
            Self::InvalidToken(_) | Self::UserNotInDatabase(_) => {
                (StatusCode::UNAUTHORIZED, "Invalid or expired token")
            }
            Self::InvalidRefreshToken(_) => {
                (StatusCode::UNAUTHORIZED, "Invalid or expired refresh token")
            }
            Self::InvalidCredentials => (StatusCode::UNAUTHORIZED, "Invalid credentials"),
            Self::AccountInactive(_) => (StatusCode::FORBIDDEN, "Account is inactive"),
            Self::AccessDenied(_, _) => (StatusCode::FORBIDDEN, "Insufficient permissions"),
            Self::InvalidOtp => (StatusCode::BAD_REQUEST, "Invalid or expired OTP"),
            Self::SocialLoginUnavailable => {
                (StatusCode::BAD_REQUEST, "Social login is not available")
            }
            Self::OtpAttemptsExceeded => (
                StatusCode::TOO_MANY_REQUESTS,
                "Too many incorrect attempts, request a new OTP",
            ),
            Self::OtpCooldown(retry_after) => {
                return (
                    StatusCode::TOO_MANY_REQUESTS,
                    [(header::RETRY_AFTER, retry_after.to_string())],
                    Json(ErrorDto::new(format!(
                        "Please wait {} seconds before requesting a new OTP",
                        retry_after
                    ))),
                )
                    .into_response();
            }
        };

        (status, Json(ErrorDto::new(message))).into_response()
    }
}
