use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use entity::sea_orm_active_enums::PaymentStatus;
use thiserror::Error;

use crate::{model::api::ErrorDto, server::error::InternalServerError};

#[derive(Error, Debug)]
pub enum PaymentError {
    /// Razorpay credentials are not configured.
    #[error("Payment gateway is not configured")]
    NotConfigured,

    /// The gateway rejected a request or could not be reached.
    #[error("Payment gateway error: {0}")]
    Gateway(String),

    /// HMAC signature from the client or webhook did not verify.
    #[error("Invalid payment signature")]
    InvalidSignature,

    /// Order id in the verification payload belongs to another booking.
    #[error("Order {0} does not match booking")]
    OrderMismatch(String),

    /// Requested payment status change is not one of the allowed transitions.
    #[error("Payment cannot move from {from:?} to {to:?}")]
    InvalidTransition { from: PaymentStatus, to: PaymentStatus },
}

impl IntoResponse for PaymentError {
    fn into_response(self) -> Response {
        match self {
            Self::NotConfigured => InternalServerError(self).into_response(),
            Self::Gateway(ref reason) => {
                tracing::warn!("Payment gateway failure: {}", reason);
                (
                    StatusCode::BAD_GATEWAY,
                    Json(ErrorDto::new("Payment gateway error, please retry")),
                )
                    .into_response()
            }
            Self::InvalidSignature => (
                StatusCode::BAD_REQUEST,
                Json(ErrorDto::new("Payment verification failed")),
            )
                .into_response(),
            Self::OrderMismatch(_) => (
                StatusCode::BAD_REQUEST,
                Json(ErrorDto::new("Order does not belong to this booking")),
            )
                .into_response(),
            Self::InvalidTransition { .. } => {
                (StatusCode::CONFLICT, Json(ErrorDto::new(self.to_string()))).into_response()
            }
        }
    }
}
