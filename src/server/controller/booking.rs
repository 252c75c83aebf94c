use axum::{extract::State, http::HeaderMap, http::StatusCode, response::IntoResponse, Json};

use crate::{
    model::{
        api::{ApiResponse, PaginationQuery},
        booking::CreateBookingDto,
    },
    server::{
        error::AppError,
        middleware::auth::AuthGuard,
        model::{booking::CreateBookingParams, pagination::PageRequest},
        service::booking::BookingService,
        state::AppState,
        util::extract::{AppJson, AppPath, AppQuery},
    },
};

/// POST /api/v1/bookings - Book a batch for some of the caller's participants
///
/// # Returns
/// - `201 Created` - Pending booking priced from the batch fee
/// - `409 Conflict` - Batch full or a participant already booked
/// - `422 Unprocessable Entity` - Batch not open, unknown participants or ages out of range
pub async fn create_booking(
    State(state): State<AppState>,
    headers: HeaderMap,
    AppJson(payload): AppJson<CreateBookingDto>,
) -> Result<impl IntoResponse, AppError> {
    let user = AuthGuard::new(&state.db, &state.config.jwt, &headers)
        .require(&[])
        .await?;
    let params = CreateBookingParams::from_dto(payload)?;

    let booking = BookingService::new(&state.db)
        .create(&user, params, &state.config.currency)
        .await?;

    Ok((StatusCode::CREATED, Json(ApiResponse::ok(booking.into_dto()))))
}

/// GET /api/v1/bookings - The caller's bookings, newest first
pub async fn list_bookings(
    State(state): State<AppState>,
    headers: HeaderMap,
    AppQuery(query): AppQuery<PaginationQuery>,
) -> Result<impl IntoResponse, AppError> {
    let user = AuthGuard::new(&state.db, &state.config.jwt, &headers)
        .require(&[])
        .await?;

    let bookings = BookingService::new(&state.db)
        .list_for_user(&user, PageRequest::new(query.page, Some(query.per_page)))
        .await?;

    Ok(Json(ApiResponse::ok(bookings.into_dto(|b| b.into_dto()))))
}

/// GET /api/v1/bookings/{id}
pub async fn get_booking(
    State(state): State<AppState>,
    headers: HeaderMap,
    AppPath(id): AppPath<i32>,
) -> Result<impl IntoResponse, AppError> {
    let user = AuthGuard::new(&state.db, &state.config.jwt, &headers)
        .require(&[])
        .await?;

    let booking = BookingService::new(&state.db)
        .get_for_user(&user, id)
        .await?;

    Ok(Json(ApiResponse::ok(booking.into_dto())))
}

/// POST /api/v1/bookings/{id}/cancel
///
/// # Returns
/// - `200 OK` - Cancelled booking
/// - `409 Conflict` - Payment already succeeded, refunded or cancelled
pub async fn cancel_booking(
    State(state): State<AppState>,
    headers: HeaderMap,
    AppPath(id): AppPath<i32>,
) -> Result<impl IntoResponse, AppError> {
    let user = AuthGuard::new(&state.db, &state.config.jwt, &headers)
        .require(&[])
        .await?;

    let booking = BookingService::new(&state.db).cancel(&user, id).await?;

    Ok(Json(ApiResponse::with_message(
        "Booking cancelled",
        booking.into_dto(),
    )))
}

/// GET /api/v1/centers/{id}/bookings - Bookings on a center the caller owns
pub async fn list_center_bookings(
    State(state): State<AppState>,
    headers: HeaderMap,
    AppPath(center_id): AppPath<i32>,
    AppQuery(query): AppQuery<PaginationQuery>,
) -> Result<impl IntoResponse, AppError> {
    let user = AuthGuard::new(&state.db, &state.config.jwt, &headers)
        .require(&[])
        .await?;

    let bookings = BookingService::new(&state.db)
        .list_for_center(
            &user,
            center_id,
            PageRequest::new(query.page, Some(query.per_page)),
        )
        .await?;

    Ok(Json(ApiResponse::ok(bookings.into_dto(|b| b.into_dto()))))
}

/// GET /api/v1/transactions - The caller's payment ledger
pub async fn list_transactions(
    State(state): State<AppState>,
    headers: HeaderMap,
    AppQuery(query): AppQuery<PaginationQuery>,
) -> Result<impl IntoResponse, AppError> {
    let user = AuthGuard::new(&state.db, &state.config.jwt, &headers)
        .require(&[])
        .await?;

    let transactions = BookingService::new(&state.db)
        .transactions(&user, PageRequest::new(query.page, Some(query.per_page)))
        .await?;

    Ok(Json(ApiResponse::ok(transactions.into_dto(|t| t.into_dto()))))
}
