use axum::{extract::State, http::HeaderMap, http::StatusCode, response::IntoResponse, Json};
use entity::sea_orm_active_enums::{CenterStatus, UserRole};

use crate::{
    model::{
        admin::{AdminUserQueryDto, AssignRoleDto, CreateAdminDto, UpsertRoleDto, UserStatusDto},
        api::{ApiResponse, PaginationQuery},
        booking::{BookingQueryDto, RefundDto},
        center::{CenterQueryDto, CenterStatusDto},
    },
    server::{
        error::{validation::ValidationError, AppError},
        middleware::auth::{AuthGuard, Permission},
        model::{
            admin::{CreateAdminParams, RoleParams},
            booking::BookingFilter,
            center::CenterFilter,
            pagination::PageRequest,
            permission::{Action, Section},
        },
        service::{
            admin::AdminService, booking::BookingService, center::CenterService,
            payment::PaymentService,
        },
        state::AppState,
        util::{
            extract::{AppJson, AppPath, AppQuery},
            parse::parse_enum,
            validation::non_blank,
        },
    },
};

/// GET /api/v1/admin/roles
///
/// # Access Control
/// - `roles.view`
pub async fn list_roles(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<impl IntoResponse, AppError> {
    AuthGuard::new(&state.db, &state.config.jwt, &headers)
        .require(&[Permission::Admin(Section::Roles, Action::View)])
        .await?;

    let roles = AdminService::new(&state.db).list_roles().await?;

    Ok(Json(ApiResponse::ok(
        roles.into_iter().map(|r| r.into_dto()).collect::<Vec<_>>(),
    )))
}

/// POST /api/v1/admin/roles
///
/// # Returns
/// - `201 Created` - New role
/// - `409 Conflict` - Name already used
/// - `422 Unprocessable Entity` - Unknown sections or actions in the matrix
pub async fn create_role(
    State(state): State<AppState>,
    headers: HeaderMap,
    AppJson(payload): AppJson<UpsertRoleDto>,
) -> Result<impl IntoResponse, AppError> {
    AuthGuard::new(&state.db, &state.config.jwt, &headers)
        .require(&[Permission::Admin(Section::Roles, Action::Create)])
        .await?;
    let params = RoleParams::from_dto(payload)?;

    let role = AdminService::new(&state.db).create_role(params).await?;

    Ok((StatusCode::CREATED, Json(ApiResponse::ok(role.into_dto()))))
}

/// PUT /api/v1/admin/roles/{id}
pub async fn update_role(
    State(state): State<AppState>,
    headers: HeaderMap,
    AppPath(id): AppPath<i32>,
    AppJson(payload): AppJson<UpsertRoleDto>,
) -> Result<impl IntoResponse, AppError> {
    AuthGuard::new(&state.db, &state.config.jwt, &headers)
        .require(&[Permission::Admin(Section::Roles, Action::Update)])
        .await?;
    let params = RoleParams::from_dto(payload)?;

    let role = AdminService::new(&state.db).update_role(id, params).await?;

    Ok(Json(ApiResponse::ok(role.into_dto())))
}

/// DELETE /api/v1/admin/roles/{id}
///
/// # Returns
/// - `204 No Content` - Deleted
/// - `409 Conflict` - Role still assigned to an admin
pub async fn delete_role(
    State(state): State<AppState>,
    headers: HeaderMap,
    AppPath(id): AppPath<i32>,
) -> Result<impl IntoResponse, AppError> {
    AuthGuard::new(&state.db, &state.config.jwt, &headers)
        .require(&[Permission::Admin(Section::Roles, Action::Delete)])
        .await?;

    AdminService::new(&state.db).delete_role(id).await?;

    Ok(StatusCode::NO_CONTENT)
}

/// POST /api/v1/admin/admins - Create an admin account bound to a role
///
/// # Access Control
/// - `users.create`
pub async fn create_admin(
    State(state): State<AppState>,
    headers: HeaderMap,
    AppJson(payload): AppJson<CreateAdminDto>,
) -> Result<impl IntoResponse, AppError> {
    AuthGuard::new(&state.db, &state.config.jwt, &headers)
        .require(&[Permission::Admin(Section::Users, Action::Create)])
        .await?;
    let params = CreateAdminParams::from_dto(payload)?;

    let admin = AdminService::new(&state.db).create_admin(params).await?;

    Ok((StatusCode::CREATED, Json(ApiResponse::ok(admin.into_dto()))))
}

/// PUT /api/v1/admin/admins/{id}/role
pub async fn assign_role(
    State(state): State<AppState>,
    headers: HeaderMap,
    AppPath(id): AppPath<i32>,
    AppJson(payload): AppJson<AssignRoleDto>,
) -> Result<impl IntoResponse, AppError> {
    AuthGuard::new(&state.db, &state.config.jwt, &headers)
        .require(&[Permission::Admin(Section::Roles, Action::Update)])
        .await?;
    let Some(role_id) = payload.role_id else {
        return Err(ValidationError::field("role_id", "role_id is required").into());
    };

    let admin = AdminService::new(&state.db).assign_role(id, role_id).await?;

    Ok(Json(ApiResponse::ok(admin.into_dto())))
}

/// GET /api/v1/admin/users?role=&page=&per_page=
pub async fn list_users(
    State(state): State<AppState>,
    headers: HeaderMap,
    AppQuery(query): AppQuery<AdminUserQueryDto>,
) -> Result<impl IntoResponse, AppError> {
    AuthGuard::new(&state.db, &state.config.jwt, &headers)
        .require(&[Permission::Admin(Section::Users, Action::View)])
        .await?;
    let role = non_blank(query.role)
        .map(|raw| parse_enum::<UserRole>("role", &raw))
        .transpose()?;

    let users = AdminService::new(&state.db)
        .list_users(role, PageRequest::new(query.page, query.per_page))
        .await?;

    Ok(Json(ApiResponse::ok(users.into_dto(|u| u.into_dto()))))
}

/// PUT /api/v1/admin/users/{id}/status
///
/// Deactivation signs the user out of every device.
///
/// # Returns
/// - `200 OK` - Updated user
/// - `400 Bad Request` - Target is a super admin
pub async fn set_user_status(
    State(state): State<AppState>,
    headers: HeaderMap,
    AppPath(id): AppPath<i32>,
    AppJson(payload): AppJson<UserStatusDto>,
) -> Result<impl IntoResponse, AppError> {
    let actor = AuthGuard::new(&state.db, &state.config.jwt, &headers)
        .require(&[Permission::Admin(Section::Users, Action::Update)])
        .await?;
    let Some(is_active) = payload.is_active else {
        return Err(ValidationError::field("is_active", "is_active is required").into());
    };

    let user = AdminService::new(&state.db)
        .set_user_status(&actor, id, is_active)
        .await?;

    Ok(Json(ApiResponse::ok(user.into_dto())))
}

/// GET /api/v1/admin/centers?status=&sport_id=&city_id=
pub async fn list_centers(
    State(state): State<AppState>,
    headers: HeaderMap,
    AppQuery(query): AppQuery<CenterQueryDto>,
) -> Result<impl IntoResponse, AppError> {
    AuthGuard::new(&state.db, &state.config.jwt, &headers)
        .require(&[Permission::Admin(Section::Centers, Action::View)])
        .await?;
    let (filter, page) = CenterFilter::from_query(query)?;

    let centers = CenterService::new(&state.db)
        .admin_list(filter, page)
        .await?;

    Ok(Json(ApiResponse::ok(centers.into_dto(|c| c.into_dto(true)))))
}

/// PUT /api/v1/admin/centers/{id}/status
///
/// # Returns
/// - `200 OK` - Updated center
/// - `422 Unprocessable Entity` - Publishing an incomplete center
pub async fn set_center_status(
    State(state): State<AppState>,
    headers: HeaderMap,
    AppPath(id): AppPath<i32>,
    AppJson(payload): AppJson<CenterStatusDto>,
) -> Result<impl IntoResponse, AppError> {
    AuthGuard::new(&state.db, &state.config.jwt, &headers)
        .require(&[Permission::Admin(Section::Centers, Action::Update)])
        .await?;
    let Some(raw) = non_blank(payload.status) else {
        return Err(ValidationError::field("status", "status is required").into());
    };
    let status = parse_enum::<CenterStatus>("status", &raw)?;

    let center = CenterService::new(&state.db)
        .admin_set_status(id, status)
        .await?;

    Ok(Json(ApiResponse::ok(center.into_dto(true))))
}

/// GET /api/v1/admin/bookings?status=
pub async fn list_bookings(
    State(state): State<AppState>,
    headers: HeaderMap,
    AppQuery(query): AppQuery<BookingQueryDto>,
) -> Result<impl IntoResponse, AppError> {
    AuthGuard::new(&state.db, &state.config.jwt, &headers)
        .require(&[Permission::Admin(Section::Bookings, Action::View)])
        .await?;
    let (filter, page) = BookingFilter::from_query(query)?;

    let bookings = BookingService::new(&state.db)
        .admin_list(filter, page)
        .await?;

    Ok(Json(ApiResponse::ok(bookings.into_dto(|b| b.into_dto()))))
}

/// POST /api/v1/admin/bookings/{id}/refund
///
/// # Access Control
/// - `bookings.update`
///
/// # Returns
/// - `200 OK` - Refunded booking, now cancelled
/// - `409 Conflict` - Payment has not succeeded
/// - `502 Bad Gateway` - Gateway refused the refund; nothing changed
pub async fn refund_booking(
    State(state): State<AppState>,
    headers: HeaderMap,
    AppPath(id): AppPath<i32>,
    AppJson(payload): AppJson<RefundDto>,
) -> Result<impl IntoResponse, AppError> {
    let admin = AuthGuard::new(&state.db, &state.config.jwt, &headers)
        .require(&[Permission::Admin(Section::Bookings, Action::Update)])
        .await?;

    let booking = PaymentService::new(&state.db, state.gateway()?)
        .refund(&admin, id, non_blank(payload.reason))
        .await?;

    Ok(Json(ApiResponse::with_message(
        "Booking refunded",
        booking.into_dto(),
    )))
}

/// GET /api/v1/admin/transactions
pub async fn list_transactions(
    State(state): State<AppState>,
    headers: HeaderMap,
    AppQuery(query): AppQuery<PaginationQuery>,
) -> Result<impl IntoResponse, AppError> {
    AuthGuard::new(&state.db, &state.config.jwt, &headers)
        .require(&[Permission::Admin(Section::Transactions, Action::View)])
        .await?;

    let transactions = BookingService::new(&state.db)
        .admin_transactions(PageRequest::new(query.page, Some(query.per_page)))
        .await?;

    Ok(Json(ApiResponse::ok(transactions.into_dto(|t| t.into_dto()))))
}

/// GET /api/v1/admin/dashboard
pub async fn dashboard(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<impl IntoResponse, AppError> {
    AuthGuard::new(&state.db, &state.config.jwt, &headers)
        .require(&[Permission::Admin(Section::Dashboard, Action::View)])
        .await?;

    let dashboard = AdminService::new(&state.db).dashboard().await?;

    Ok(Json(ApiResponse::ok(dashboard.into_dto())))
}
