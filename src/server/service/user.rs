//! User service for business logic.
//!
//! This module provides the `UserService` for the signed-in user's own profile: reading
//! it, editing names and learner type, and changing the password.

use entity::sea_orm_active_enums::UserRole;
use sea_orm::DatabaseConnection;

use crate::server::{
    data::user::UserRepository,
    error::{auth::AuthError, validation::ValidationError, AppError},
    model::user::{ChangePasswordParams, UpdateProfileParams, User},
    util::password::{hash_password, verify_password},
};

/// Service providing business logic for profile management.
pub struct UserService<'a> {
    pub db: &'a DatabaseConnection,
}

impl<'a> UserService<'a> {
    /// Creates a new UserService instance.
    ///
    /// # Arguments
    /// - `db` - Reference to the database connection
    ///
    /// # Returns
    /// - `UserService` - New service instance
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    /// Retrieves a user by id.
    ///
    /// # Returns
    /// - `Ok(User)` - The user
    /// - `Err(AppError::NotFound)` - No user with that id
    pub async fn get(&self, id: i32) -> Result<User, AppError> {
        UserRepository::new(self.db)
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("User {} not found", id)))
    }

    /// Updates the caller's names and, for learners, the student/guardian type.
    ///
    /// # Arguments
    /// - `user` - Authenticated user
    /// - `params` - Fields to change
    ///
    /// # Returns
    /// - `Ok(User)` - Updated user
    /// - `Err(AppError::ValidationErr)` - `user_type` sent by an academy or administrator
    pub async fn update_profile(
        &self,
        user: &User,
        params: UpdateProfileParams,
    ) -> Result<User, AppError> {
        if params.user_type.is_some() && user.role != UserRole::User {
            return Err(
                ValidationError::field("user_type", "only learners have a user type").into(),
            );
        }

        UserRepository::new(self.db)
            .update_profile(user.id, params)
            .await?
            .ok_or_else(|| AuthError::UserNotInDatabase(user.id).into())
    }

    /// Replaces the caller's password after checking the current one.
    ///
    /// # Returns
    /// - `Ok(())` - Password changed
    /// - `Err(AppError::BadRequest)` - Account has no password (OTP or social sign-in only)
    /// - `Err(AppError::ValidationErr)` - `current_password` is wrong
    pub async fn change_password(
        &self,
        user: &User,
        params: ChangePasswordParams,
    ) -> Result<(), AppError> {
        let Some(hash) = user.password_hash.clone() else {
            return Err(AppError::BadRequest(
                "Account has no password; use forgot password to set one".to_string(),
            ));
        };

        if !verify_password(params.current_password, hash).await? {
            return Err(ValidationError::field("current_password", "is incorrect").into());
        }

        let new_hash = hash_password(params.new_password).await?;
        UserRepository::new(self.db)
            .set_password_hash(user.id, &new_hash)
            .await?;

        Ok(())
    }
}
