//! Error types and HTTP response handling.
//!
//! `AppError` is the top-level error returned by every controller. It wraps the
//! domain-specific errors and renders the uniform `{ success: false, message, errors? }`
//! envelope. Internal failures are logged server-side and reported to clients with a
//! generic message.

pub mod auth;
pub mod config;
pub mod internal;
pub mod payment;
pub mod validation;

use axum::{
    extract::rejection::{JsonRejection, PathRejection, QueryRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use thiserror::Error;

use crate::{
    model::api::ErrorDto,
    server::error::{
        auth::AuthError, config::ConfigError, internal::InternalError, payment::PaymentError,
        validation::ValidationError,
    },
};

/// Top-level application error type.
///
/// Domain errors (`AuthError`, `PaymentError`, `ValidationError`) decide their own status
/// codes. Infrastructure errors (database, HTTP client, scheduler, hashing) always map to
/// 500 Internal Server Error.
#[derive(Error, Debug)]
pub enum AppError {
    /// Configuration error during startup or environment variable loading.
    #[error(transparent)]
    ConfigErr(#[from] ConfigError),

    /// Authentication or authorization error (401, 403, 429).
    #[error(transparent)]
    AuthErr(#[from] AuthError),

    /// Payment gateway or payment state error (400, 409, 502).
    #[error(transparent)]
    PaymentErr(#[from] PaymentError),

    /// Field-level request validation failure (422).
    #[error(transparent)]
    ValidationErr(#[from] ValidationError),

    /// Unexpected inconsistency inside the application.
    #[error(transparent)]
    InternalErr(#[from] InternalError),

    /// Database operation error from SeaORM.
    #[error(transparent)]
    DbErr(#[from] sea_orm::DbErr),

    /// HTTP client request error from reqwest.
    #[error(transparent)]
    ReqwestErr(#[from] reqwest::Error),

    /// Socket or filesystem error, raised while binding the listener.
    #[error(transparent)]
    IoErr(#[from] std::io::Error),

    /// Cron scheduler error.
    #[error(transparent)]
    SchedulerErr(#[from] tokio_cron_scheduler::JobSchedulerError),

    /// Password hashing error.
    #[error(transparent)]
    BcryptErr(#[from] bcrypt::BcryptError),

    /// Resource not found (404).
    #[error("{0}")]
    NotFound(String),

    /// Invalid request (400).
    #[error("{0}")]
    BadRequest(String),

    /// Request conflicts with the current state of a resource (409).
    #[error("{0}")]
    Conflict(String),

    /// Internal server error with a message that is logged but never returned.
    #[error("{0}")]
    InternalError(String),
}

impl AppError {
    /// Maps unique and foreign key violations to `Conflict(message)`; other database
    /// errors pass through unchanged.
    pub fn on_constraint(err: sea_orm::DbErr, message: impl Into<String>) -> Self {
        use sea_orm::SqlErr;

        match err.sql_err() {
            Some(SqlErr::UniqueConstraintViolation(detail))
            | Some(SqlErr::ForeignKeyConstraintViolation(detail)) => {
                tracing::debug!("Constraint violation: {}", detail);
                AppError::Conflict(message.into())
            }
            _ => AppError::DbErr(err),
        }
    }
}

impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        match rejection {
            JsonRejection::JsonDataError(err) => {
                ValidationError::field("body", err.body_text()).into()
            }
            other => AppError::BadRequest(other.body_text()),
        }
    }
}

impl From<QueryRejection> for AppError {
    fn from(rejection: QueryRejection) -> Self {
        AppError::BadRequest(rejection.body_text())
    }
}

impl From<PathRejection> for AppError {
    fn from(rejection: PathRejection) -> Self {
        AppError::BadRequest(rejection.body_text())
    }
}

/// Converts application errors into HTTP responses.
///
/// # Returns
/// - 400 Bad Request - For `BadRequest`
/// - 404 Not Found - For `NotFound`
/// - 409 Conflict - For `Conflict`
/// - Variable - For `AuthErr`, `PaymentErr` and `ValidationErr`, delegated to the wrapped error
/// - 500 Internal Server Error - For every other variant
impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        match self {
            Self::AuthErr(err) => err.into_response(),
            Self::PaymentErr(err) => err.into_response(),
            Self::ValidationErr(err) => err.into_response(),
            Self::NotFound(msg) => (StatusCode::NOT_FOUND, Json(ErrorDto::new(msg))).into_response(),
            Self::BadRequest(msg) => {
                (StatusCode::BAD_REQUEST, Json(ErrorDto::new(msg))).into_response()
            }
            Self::Conflict(msg) => (StatusCode::CONFLICT, Json(ErrorDto::new(msg))).into_response(),
            Self::InternalError(msg) => InternalServerError(msg).into_response(),
            err => InternalServerError(err).into_response(),
        }
    }
}

/// Wrapper converting any displayable error into a 500 Internal Server Error response.
///
/// Logs the full error and returns a generic message so internal details never reach
/// the client.
pub struct InternalServerError<E>(pub E);

impl<E: std::fmt::Display> IntoResponse for InternalServerError<E> {
    fn into_response(self) -> Response {
        tracing::error!("{}", self.0);

        (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(ErrorDto::new("Internal server error")),
        )
            .into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn maps_generic_variants_to_status_codes() {
        let cases = [
            (AppError::NotFound("x".into()), StatusCode::NOT_FOUND),
            (AppError::BadRequest("x".into()), StatusCode::BAD_REQUEST),
            (AppError::Conflict("x".into()), StatusCode::CONFLICT),
            (
                AppError::InternalError("x".into()),
                StatusCode::INTERNAL_SERVER_ERROR,
            ),
            (
                AppError::DbErr(sea_orm::DbErr::Custom("boom".into())),
                StatusCode::INTERNAL_SERVER_ERROR,
            ),
        ];

        for (err, status) in cases {
            assert_eq!(err.into_response().status(), status);
        }
    }

    #[test]
    fn validation_error_maps_to_unprocessable() {
        let err: AppError = ValidationError::field("name", "is required").into();
        assert_eq!(err.into_response().status(), StatusCode::UNPROCESSABLE_ENTITY);
    }
}
