use axum::{
    http::{HeaderValue, Method},
    routing::{get, post, put},
    Json, Router,
};
use tower_http::{
    cors::{AllowOrigin, Any, CorsLayer},
    trace::TraceLayer,
};

use crate::{
    model::api::HealthDto,
    server::{
        controller::{
            admin, auth, batch, booking, catalog, center, content, location, participant,
            payment, user,
        },
        state::AppState,
    },
};

/// Builds the complete application: every route under `/api/v1`, shared state, CORS
/// and request tracing.
pub fn app(state: AppState) -> Router {
    let cors = cors_layer(&state.config.cors_origins);

    Router::new()
        .nest("/api/v1", router())
        .with_state(state)
        .layer(cors)
        .layer(TraceLayer::new_for_http())
}

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/health", get(health))
        // Authentication
        .route("/auth/otp/send", post(auth::send_otp))
        .route("/auth/otp/verify", post(auth::verify_otp))
        .route("/auth/login", post(auth::login))
        .route("/auth/social", post(auth::social_login))
        .route("/auth/refresh", post(auth::refresh))
        .route("/auth/logout", post(auth::logout))
        .route("/users/me", get(user::get_me).patch(user::update_me))
        .route("/users/me/password", post(user::change_password))
        // Catalog and locations
        .route("/sports", get(catalog::list_sports))
        .route("/facilities", get(catalog::list_facilities))
        .route("/locations/countries", get(location::list_countries))
        .route(
            "/locations/countries/{id}/states",
            get(location::list_states),
        )
        .route("/locations/states/{id}/cities", get(location::list_cities))
        // Centers and batches
        .route(
            "/centers",
            get(center::list_centers).post(center::create_center),
        )
        .route("/centers/mine", get(center::my_centers))
        .route(
            "/centers/{id}",
            get(center::get_center)
                .put(center::update_center)
                .delete(center::delete_center),
        )
        .route("/centers/{id}/publish", post(center::publish_center))
        .route("/centers/{id}/unpublish", post(center::unpublish_center))
        .route(
            "/centers/{id}/batches",
            get(batch::list_center_batches).post(batch::create_batch),
        )
        .route("/centers/{id}/bookings", get(booking::list_center_bookings))
        .route(
            "/batches/{id}",
            get(batch::get_batch)
                .put(batch::update_batch)
                .delete(batch::deactivate_batch),
        )
        .route("/batches/{id}/quote", post(batch::quote_batch))
        // Participants
        .route(
            "/participants",
            get(participant::list_participants).post(participant::create_participant),
        )
        .route(
            "/participants/{id}",
            put(participant::update_participant).delete(participant::delete_participant),
        )
        // Bookings and payments
        .route(
            "/bookings",
            get(booking::list_bookings).post(booking::create_booking),
        )
        .route("/bookings/{id}", get(booking::get_booking))
        .route("/bookings/{id}/cancel", post(booking::cancel_booking))
        .route("/bookings/{id}/payment/order", post(payment::create_order))
        .route("/bookings/{id}/payment/verify", post(payment::verify_payment))
        .route("/payments/webhook", post(payment::webhook))
        .route("/transactions", get(booking::list_transactions))
        // Content
        .route("/cms/{slug}", get(content::get_page))
        .route("/banners", get(content::list_banners))
        .route("/notifications", get(content::list_notifications))
        .route(
            "/notifications/{id}/read",
            post(content::mark_notification_read),
        )
        .nest("/admin", admin_router())
}

fn admin_router() -> Router<AppState> {
    Router::new()
        .route("/login", post(auth::admin_login))
        .route("/dashboard", get(admin::dashboard))
        .route("/roles", get(admin::list_roles).post(admin::create_role))
        .route(
            "/roles/{id}",
            put(admin::update_role).delete(admin::delete_role),
        )
        .route("/admins", post(admin::create_admin))
        .route("/admins/{id}/role", put(admin::assign_role))
        .route("/users", get(admin::list_users))
        .route("/users/{id}/status", put(admin::set_user_status))
        .route("/centers", get(admin::list_centers))
        .route("/centers/{id}/status", put(admin::set_center_status))
        .route("/bookings", get(admin::list_bookings))
        .route("/bookings/{id}/refund", post(admin::refund_booking))
        .route("/transactions", get(admin::list_transactions))
        .route(
            "/sports",
            get(catalog::admin_list_sports).post(catalog::create_sport),
        )
        .route(
            "/sports/{id}",
            put(catalog::update_sport).delete(catalog::delete_sport),
        )
        .route(
            "/facilities",
            get(catalog::admin_list_facilities).post(catalog::create_facility),
        )
        .route(
            "/facilities/{id}",
            put(catalog::update_facility).delete(catalog::delete_facility),
        )
        .route("/locations/countries", post(location::create_country))
        .route("/locations/states", post(location::create_state))
        .route("/locations/cities", post(location::create_city))
        .route(
            "/cms",
            get(content::admin_list_pages).post(content::create_page),
        )
        .route(
            "/cms/{id}",
            put(content::update_page).delete(content::delete_page),
        )
        .route(
            "/banners",
            get(content::admin_list_banners).post(content::create_banner),
        )
        .route(
            "/banners/{id}",
            put(content::update_banner).delete(content::delete_banner),
        )
        .route("/notifications", post(content::send_notification))
}

/// GET /api/v1/health
async fn health() -> Json<HealthDto> {
    Json(HealthDto {
        success: true,
        status: "ok".to_string(),
    })
}

/// Allows any origin when `origins` is empty. Unparseable origins are skipped with a warning.
fn cors_layer(origins: &[String]) -> CorsLayer {
    let layer = CorsLayer::new()
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::PATCH,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .allow_headers(Any);

    if origins.is_empty() {
        return layer.allow_origin(Any);
    }

    let allowed: Vec<HeaderValue> = origins
        .iter()
        .filter_map(|origin| match HeaderValue::from_str(origin) {
            Ok(value) => Some(value),
            Err(_) => {
                tracing::warn!("Ignoring invalid CORS origin {}", origin);
                None
            }
        })
        .collect();

    layer.allow_origin(AllowOrigin::list(allowed))
}
