use axum::{body::Bytes, extract::State, http::HeaderMap, response::IntoResponse, Json};

use crate::{
    model::{
        api::ApiResponse,
        booking::{VerifyPaymentDto, WebhookAckDto},
    },
    server::{
        error::{payment::PaymentError, AppError},
        middleware::auth::AuthGuard,
        model::booking::PaymentVerification,
        service::payment::PaymentService,
        state::AppState,
        util::extract::{AppJson, AppPath},
    },
};

/// Header carrying the HMAC of a webhook body.
pub static WEBHOOK_SIGNATURE_HEADER: &str = "x-razorpay-signature";

/// POST /api/v1/bookings/{id}/payment/order - Start checkout for a booking
///
/// # Returns
/// - `200 OK` - Order details for the checkout widget
/// - `409 Conflict` - Payment is not pending or failed
/// - `502 Bad Gateway` - Gateway rejected the order; the booking stays payable
pub async fn create_order(
    State(state): State<AppState>,
    headers: HeaderMap,
    AppPath(id): AppPath<i32>,
) -> Result<impl IntoResponse, AppError> {
    let user = AuthGuard::new(&state.db, &state.config.jwt, &headers)
        .require(&[])
        .await?;

    let order = PaymentService::new(&state.db, state.gateway()?)
        .create_order(&user, id)
        .await?;

    Ok(Json(ApiResponse::ok(order.into_dto())))
}

/// POST /api/v1/bookings/{id}/payment/verify - Confirm a completed checkout
///
/// # Returns
/// - `200 OK` - Confirmed booking, also for a replay of the same payment
/// - `400 Bad Request` - Signature mismatch (payment marked failed) or foreign order id
pub async fn verify_payment(
    State(state): State<AppState>,
    headers: HeaderMap,
    AppPath(id): AppPath<i32>,
    AppJson(payload): AppJson<VerifyPaymentDto>,
) -> Result<impl IntoResponse, AppError> {
    let user = AuthGuard::new(&state.db, &state.config.jwt, &headers)
        .require(&[])
        .await?;
    let verification = PaymentVerification::from_dto(payload)?;

    let booking = PaymentService::new(&state.db, state.gateway()?)
        .verify(&user, id, verification)
        .await?;

    Ok(Json(ApiResponse::with_message(
        "Payment verified",
        booking.into_dto(),
    )))
}

/// POST /api/v1/payments/webhook - Gateway event callback
///
/// The body is read raw so the signature covers exactly the bytes received.
///
/// # Returns
/// - `200 OK` - Event applied, or acknowledged and ignored
/// - `400 Bad Request` - Missing or invalid signature, or unreadable payload
pub async fn webhook(
    State(state): State<AppState>,
    headers: HeaderMap,
    body: Bytes,
) -> Result<impl IntoResponse, AppError> {
    let signature = headers
        .get(WEBHOOK_SIGNATURE_HEADER)
        .and_then(|v| v.to_str().ok())
        .ok_or(PaymentError::InvalidSignature)?;

    PaymentService::new(&state.db, state.gateway()?)
        .handle_webhook(&body, signature)
        .await?;

    Ok(Json(WebhookAckDto {
        success: true,
        status: "ok".to_string(),
    }))
}
