//! JWT access and refresh tokens.
//!
//! Access tokens are stateless. Refresh tokens are persisted by hash, bound to the
//! device they were issued to and rotated on every use; a user holds at most one live
//! refresh token per device.

use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use sea_orm::DatabaseConnection;
use serde::{de::DeserializeOwned, Serialize};
use sha2::{Digest, Sha256};

use crate::server::{
    config::JwtConfig,
    data::{refresh_token::RefreshTokenRepository, user::UserRepository},
    error::{auth::AuthError, internal::InternalError, AppError},
    model::{
        auth::{
            AccessClaims, RefreshClaims, RefreshParams, TokenPair, ACCESS_TOKEN_TYPE,
            REFRESH_TOKEN_TYPE,
        },
        user::User,
    },
};

/// SHA-256 hex digest under which a refresh token is stored.
pub fn hash_token(token: &str) -> String {
    hex::encode(Sha256::digest(token.as_bytes()))
}

fn sign<C: Serialize>(claims: &C, secret: &str) -> Result<String, InternalError> {
    encode(
        &Header::new(Algorithm::HS256),
        claims,
        &EncodingKey::from_secret(secret.as_bytes()),
    )
    .map_err(InternalError::TokenEncoding)
}

fn verify<C: DeserializeOwned>(token: &str, secret: &str) -> Result<C, jsonwebtoken::errors::Error> {
    decode::<C>(
        token,
        &DecodingKey::from_secret(secret.as_bytes()),
        &Validation::new(Algorithm::HS256),
    )
    .map(|data| data.claims)
}

/// Decodes and checks an access token.
///
/// # Returns
/// - `Ok(AccessClaims)` - Signature, expiry and token type are valid
/// - `Err(AuthError::InvalidToken)` - Anything else, including refresh tokens
pub fn decode_access(jwt: &JwtConfig, token: &str) -> Result<AccessClaims, AuthError> {
    let claims: AccessClaims =
        verify(token, &jwt.access_secret).map_err(|e| AuthError::InvalidToken(e.to_string()))?;

    if claims.typ != ACCESS_TOKEN_TYPE {
        return Err(AuthError::InvalidToken(format!(
            "expected access token, got {}",
            claims.typ
        )));
    }

    Ok(claims)
}

pub struct TokenService<'a> {
    db: &'a DatabaseConnection,
    jwt: &'a JwtConfig,
}

impl<'a> TokenService<'a> {
    pub fn new(db: &'a DatabaseConnection, jwt: &'a JwtConfig) -> Self {
        Self { db, jwt }
    }

    /// Issues a fresh access/refresh pair for `user` on `device_id`.
    ///
    /// Any refresh token previously issued to the same device is revoked first.
    ///
    /// # Arguments
    /// - `user` - Authenticated user
    /// - `device_id` - Client-chosen identifier of the device signing in
    ///
    /// # Returns
    /// - `Ok(TokenPair)` - Signed tokens; the refresh token hash has been stored
    /// - `Err(AppError::InternalErr)` - Token signing failed
    /// - `Err(AppError::DbErr)` - Database error
    pub async fn issue_pair(&self, user: &User, device_id: &str) -> Result<TokenPair, AppError> {
        let repo = RefreshTokenRepository::new(self.db);
        let now = Utc::now();

        let access_claims = AccessClaims {
            sub: user.id,
            role: user.role,
            typ: ACCESS_TOKEN_TYPE.to_string(),
            iat: now.timestamp(),
            exp: (now + Duration::seconds(self.jwt.access_ttl_secs)).timestamp(),
        };
        let refresh_expires_at = now + Duration::seconds(self.jwt.refresh_ttl_secs);
        let refresh_claims = RefreshClaims {
            sub: user.id,
            device_id: device_id.to_string(),
            typ: REFRESH_TOKEN_TYPE.to_string(),
            jti: uuid::Uuid::new_v4().to_string(),
            iat: now.timestamp(),
            exp: refresh_expires_at.timestamp(),
        };

        let access_token = sign(&access_claims, &self.jwt.access_secret)?;
        let refresh_token = sign(&refresh_claims, &self.jwt.refresh_secret)?;

        repo.revoke_for_device(user.id, device_id).await?;
        repo.create(
            user.id,
            device_id,
            hash_token(&refresh_token),
            refresh_expires_at,
        )
        .await?;

        Ok(TokenPair {
            access_token,
            refresh_token,
            expires_in: self.jwt.access_ttl_secs,
        })
    }

    /// Exchanges a refresh token for a new pair, revoking the presented one.
    ///
    /// # Returns
    /// - `Ok((User, TokenPair))` - Owner of the token and the rotated pair
    /// - `Err(AuthError::InvalidRefreshToken)` - Token is forged, expired, revoked, unknown
    ///   or presented from another device
    /// - `Err(AuthError::AccountInactive)` - Owner has been deactivated
    pub async fn rotate(&self, params: RefreshParams) -> Result<(User, TokenPair), AppError> {
        let claims: RefreshClaims = verify(&params.refresh_token, &self.jwt.refresh_secret)
            .map_err(|e| AuthError::InvalidRefreshToken(e.to_string()))?;

        if claims.typ != REFRESH_TOKEN_TYPE {
            return Err(AuthError::InvalidRefreshToken("not a refresh token".to_string()).into());
        }
        if claims.device_id != params.device_id {
            return Err(AuthError::InvalidRefreshToken(format!(
                "token of device {} presented by device {}",
                claims.device_id, params.device_id
            ))
            .into());
        }

        let repo = RefreshTokenRepository::new(self.db);
        let Some(stored) = repo.find_by_hash(&hash_token(&params.refresh_token)).await? else {
            return Err(AuthError::InvalidRefreshToken("token not stored".to_string()).into());
        };
        if stored.revoked_at.is_some() {
            return Err(AuthError::InvalidRefreshToken(format!(
                "token {} was revoked",
                stored.id
            ))
            .into());
        }
        if stored.expires_at <= Utc::now() || stored.user_id != claims.sub {
            return Err(AuthError::InvalidRefreshToken(format!(
                "token {} expired or mismatched",
                stored.id
            ))
            .into());
        }

        let Some(user) = UserRepository::new(self.db).find_by_id(claims.sub).await? else {
            return Err(AuthError::UserNotInDatabase(claims.sub).into());
        };
        if !user.is_active {
            return Err(AuthError::AccountInactive(user.id).into());
        }

        repo.revoke(stored.id).await?;
        let pair = self.issue_pair(&user, &params.device_id).await?;

        Ok((user, pair))
    }

    /// Revokes the refresh tokens `user_id` holds on `device_id`.
    pub async fn revoke_device(&self, user_id: i32, device_id: &str) -> Result<u64, AppError> {
        Ok(RefreshTokenRepository::new(self.db)
            .revoke_for_device(user_id, device_id)
            .await?)
    }

    /// Revokes every refresh token of `user_id`, signing the user out everywhere.
    pub async fn revoke_all(&self, user_id: i32) -> Result<u64, AppError> {
        Ok(RefreshTokenRepository::new(self.db)
            .revoke_all_for_user(user_id)
            .await?)
    }
}
