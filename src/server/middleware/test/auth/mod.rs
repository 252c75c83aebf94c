use axum::http::{header::AUTHORIZATION, HeaderMap, HeaderValue};
use entity::sea_orm_active_enums::UserRole;
use sea_orm::DatabaseConnection;

use crate::server::{
    error::{auth::AuthError, AppError},
    middleware::auth::{AuthGuard, Permission},
    model::{
        permission::{Action, Section},
        user::User,
    },
    service::{test::jwt_config, token::TokenService},
};
use test_utils::{builder::TestBuilder, factory};

mod admin;
mod role;
mod token;

/// Headers carrying a freshly issued access token for `user`.
async fn bearer_for(db: &DatabaseConnection, user: entity::user::Model) -> HeaderMap {
    let jwt = jwt_config();
    let pair = TokenService::new(db, &jwt)
        .issue_pair(&User::from_entity(user), "test-device")
        .await
        .unwrap();

    let mut headers = HeaderMap::new();
    headers.insert(
        AUTHORIZATION,
        HeaderValue::from_str(&format!("Bearer {}", pair.access_token)).unwrap(),
    );
    headers
}
