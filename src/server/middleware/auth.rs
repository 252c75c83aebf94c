use axum::http::{header::AUTHORIZATION, HeaderMap};
use entity::sea_orm_active_enums::UserRole;
use sea_orm::DatabaseConnection;

use crate::server::{
    config::JwtConfig,
    data::{admin_role::AdminRoleRepository, user::UserRepository},
    error::{auth::AuthError, AppError},
    model::{
        permission::{Action, Section},
        user::User,
    },
    service::token::decode_access,
};

pub enum Permission {
    /// Account must have this role. Super admins pass every role check.
    Role(UserRole),
    /// Admin panel access to a section. Super admins bypass the role matrix.
    Admin(Section, Action),
}

/// Resolves the bearer access token of a request into an active user and checks
/// permissions against it.
pub struct AuthGuard<'a> {
    db: &'a DatabaseConnection,
    jwt: &'a JwtConfig,
    headers: &'a HeaderMap,
}

impl<'a> AuthGuard<'a> {
    pub fn new(db: &'a DatabaseConnection, jwt: &'a JwtConfig, headers: &'a HeaderMap) -> Self {
        Self { db, jwt, headers }
    }

    /// Requires a signed-in, active user holding every permission listed.
    ///
    /// # Returns
    /// - `Ok(User)` - Authenticated user
    /// - `Err(AuthError::MissingToken)` - No bearer token
    /// - `Err(AuthError::InvalidToken)` - Token malformed, expired or not an access token
    /// - `Err(AuthError::AccountInactive)` - Account deactivated
    /// - `Err(AuthError::AccessDenied)` - A permission is missing
    pub async fn require(&self, permissions: &[Permission]) -> Result<User, AppError> {
        let Some(token) = self.bearer_token()? else {
            return Err(AuthError::MissingToken.into());
        };
        let user = self.load_user(token).await?;

        for permission in permissions {
            self.check(&user, permission).await?;
        }

        Ok(user)
    }

    /// Resolves the user when a token is present. Public endpoints use this to show
    /// owners and administrators more detail.
    ///
    /// # Returns
    /// - `Ok(None)` - No `Authorization` header
    /// - `Ok(Some(User))` - Valid token for an active user
    /// - `Err(AppError)` - A token was sent but is not valid
    pub async fn optional(&self) -> Result<Option<User>, AppError> {
        match self.bearer_token()? {
            Some(token) => Ok(Some(self.load_user(token).await?)),
            None => Ok(None),
        }
    }

    fn bearer_token(&self) -> Result<Option<&'a str>, AuthError> {
        let Some(value) = self.headers.get(AUTHORIZATION) else {
            return Ok(None);
        };
        let value = value
            .to_str()
            .map_err(|_| AuthError::InvalidToken("authorization header is not ASCII".into()))?;

        match value.split_once(' ') {
            Some((scheme, token)) if scheme.eq_ignore_ascii_case("bearer") => {
                let token = token.trim();
                if token.is_empty() {
                    Err(AuthError::MissingToken)
                } else {
                    Ok(Some(token))
                }
            }
            _ => Err(AuthError::InvalidToken(
                "expected a bearer token".to_string(),
            )),
        }
    }

    async fn load_user(&self, token: &str) -> Result<User, AppError> {
        let claims = decode_access(self.jwt, token)?;

        let Some(user) = UserRepository::new(self.db).find_by_id(claims.sub).await? else {
            return Err(AuthError::UserNotInDatabase(claims.sub).into());
        };
        if !user.is_active {
            return Err(AuthError::AccountInactive(user.id).into());
        }

        Ok(user)
    }

    async fn check(&self, user: &User, permission: &Permission) -> Result<(), AppError> {
        if user.is_super_admin() {
            return Ok(());
        }

        match permission {
            Permission::Role(role) => {
                if user.role != *role {
                    return Err(AuthError::AccessDenied(
                        user.id,
                        format!("requires role {:?}, user is {:?}", role, user.role),
                    )
                    .into());
                }
            }
            Permission::Admin(section, action) => {
                if user.role != UserRole::Admin {
                    return Err(AuthError::AccessDenied(
                        user.id,
                        "admin panel requires an admin account".to_string(),
                    )
                    .into());
                }

                let role = match user.admin_role_id {
                    Some(id) => AdminRoleRepository::new(self.db).get_by_id(id).await?,
                    None => None,
                };
                let allowed = role.is_some_and(|r| r.permissions.allows(*section, *action));
                if !allowed {
                    return Err(AuthError::AccessDenied(
                        user.id,
                        format!(
                            "role lacks {} on {}",
                            action.as_str(),
                            section.as_str()
                        ),
                    )
                    .into());
                }
            }
        }

        Ok(())
    }
}
