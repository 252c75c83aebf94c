//! Persisted refresh tokens. Only the SHA-256 hash of a token is stored.

use chrono::{DateTime, Utc};
use sea_orm::{
    sea_query::Expr, ActiveModelTrait, ActiveValue, ColumnTrait, Condition, DatabaseConnection,
    DbErr, EntityTrait, QueryFilter,
};

pub struct RefreshTokenRepository<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> RefreshTokenRepository<'a> {
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    pub async fn create(
        &self,
        user_id: i32,
        device_id: &str,
        token_hash: String,
        expires_at: DateTime<Utc>,
    ) -> Result<entity::refresh_token::Model, DbErr> {
        entity::refresh_token::ActiveModel {
            user_id: ActiveValue::Set(user_id),
            device_id: ActiveValue::Set(device_id.to_string()),
            token_hash: ActiveValue::Set(token_hash),
            expires_at: ActiveValue::Set(expires_at),
            revoked_at: ActiveValue::Set(None),
            created_at: ActiveValue::Set(Utc::now()),
            ..Default::default()
        }
        .insert(self.db)
        .await
    }

    pub async fn find_by_hash(
        &self,
        token_hash: &str,
    ) -> Result<Option<entity::refresh_token::Model>, DbErr> {
        entity::prelude::RefreshToken::find()
            .filter(entity::refresh_token::Column::TokenHash.eq(token_hash))
            .one(self.db)
            .await
    }

    pub async fn revoke(&self, id: i32) -> Result<(), DbErr> {
        entity::prelude::RefreshToken::update_many()
            .filter(entity::refresh_token::Column::Id.eq(id))
            .filter(entity::refresh_token::Column::RevokedAt.is_null())
            .col_expr(entity::refresh_token::Column::RevokedAt, Expr::value(Utc::now()))
            .exec(self.db)
            .await?;
        Ok(())
    }

    /// Revokes every live token of a user on one device.
    ///
    /// # Returns
    /// - `Ok(u64)` - Number of tokens revoked
    pub async fn revoke_for_device(&self, user_id: i32, device_id: &str) -> Result<u64, DbErr> {
        let result = entity::prelude::RefreshToken::update_many()
            .filter(entity::refresh_token::Column::UserId.eq(user_id))
            .filter(entity::refresh_token::Column::DeviceId.eq(device_id))
            .filter(entity::refresh_token::Column::RevokedAt.is_null())
            .col_expr(entity::refresh_token::Column::RevokedAt, Expr::value(Utc::now()))
            .exec(self.db)
            .await?;
        Ok(result.rows_affected)
    }

    pub async fn revoke_all_for_user(&self, user_id: i32) -> Result<u64, DbErr> {
        let result = entity::prelude::RefreshToken::update_many()
            .filter(entity::refresh_token::Column::UserId.eq(user_id))
            .filter(entity::refresh_token::Column::RevokedAt.is_null())
            .col_expr(entity::refresh_token::Column::RevokedAt, Expr::value(Utc::now()))
            .exec(self.db)
            .await?;
        Ok(result.rows_affected)
    }

    /// Deletes tokens that expired or were revoked before `cutoff`.
    pub async fn purge_before(&self, cutoff: DateTime<Utc>) -> Result<u64, DbErr> {
        let result = entity::prelude::RefreshToken::delete_many()
            .filter(
                Condition::any()
                    .add(entity::refresh_token::Column::ExpiresAt.lt(cutoff))
                    .add(entity::refresh_token::Column::RevokedAt.lt(cutoff)),
            )
            .exec(self.db)
            .await?;
        Ok(result.rows_affected)
    }
}
