//! User factory for creating test user entities.

use crate::factory::helpers::next_id;
use chrono::Utc;
use entity::sea_orm_active_enums::{UserRole, UserType};
use sea_orm::{ActiveModelTrait, ActiveValue, DatabaseConnection, DbErr};

/// Factory for creating test users with customizable fields.
///
/// Defaults to an active student with a unique verified mobile and email and no password.
///
/// # Example
///
/// ```rust,ignore
/// let admin = UserFactory::new(&db)
///     .role(UserRole::Admin)
///     .admin_role(role.id)
///     .build()
///     .await?;
/// ```
pub struct UserFactory<'a> {
    db: &'a DatabaseConnection,
    role: UserRole,
    user_type: Option<UserType>,
    first_name: String,
    last_name: String,
    email: Option<String>,
    mobile: Option<String>,
    password_hash: Option<String>,
    firebase_uid: Option<String>,
    admin_role_id: Option<i32>,
    is_active: bool,
}

impl<'a> UserFactory<'a> {
    /// Creates a new UserFactory with default values.
    ///
    /// Defaults:
    /// - role: `user`, user_type: `student`
    /// - email: `user{id}@example.com`
    /// - mobile: `+9190000{id:05}`
    /// - is_active: `true`
    pub fn new(db: &'a DatabaseConnection) -> Self {
        let id = next_id();
        Self {
            db,
            role: UserRole::User,
            user_type: Some(UserType::Student),
            first_name: format!("First{}", id),
            last_name: format!("Last{}", id),
            email: Some(format!("user{}@example.com", id)),
            mobile: Some(format!("+9190000{:05}", id % 100_000)),
            password_hash: None,
            firebase_uid: None,
            admin_role_id: None,
            is_active: true,
        }
    }

    /// Sets the role. Non-`user` roles clear the student/guardian type.
    pub fn role(mut self, role: UserRole) -> Self {
        if role != UserRole::User {
            self.user_type = None;
        }
        self.role = role;
        self
    }

    pub fn user_type(mut self, user_type: Option<UserType>) -> Self {
        self.user_type = user_type;
        self
    }

    pub fn name(mut self, first_name: impl Into<String>, last_name: impl Into<String>) -> Self {
        self.first_name = first_name.into();
        self.last_name = last_name.into();
        self
    }

    pub fn email(mut self, email: impl Into<String>) -> Self {
        self.email = Some(email.into());
        self
    }

    pub fn no_email(mut self) -> Self {
        self.email = None;
        self
    }

    pub fn mobile(mut self, mobile: impl Into<String>) -> Self {
        self.mobile = Some(mobile.into());
        self
    }

    /// Sets an already hashed password.
    pub fn password_hash(mut self, hash: impl Into<String>) -> Self {
        self.password_hash = Some(hash.into());
        self
    }

    pub fn firebase_uid(mut self, uid: impl Into<String>) -> Self {
        self.firebase_uid = Some(uid.into());
        self
    }

    pub fn admin_role(mut self, admin_role_id: i32) -> Self {
        self.admin_role_id = Some(admin_role_id);
        self
    }

    pub fn active(mut self, is_active: bool) -> Self {
        self.is_active = is_active;
        self
    }

    /// Builds and inserts the user entity into the database.
    ///
    /// # Returns
    /// - `Ok(entity::user::Model)` - Created user entity
    /// - `Err(DbErr)` - Database error during insert
    pub async fn build(self) -> Result<entity::user::Model, DbErr> {
        let now = Utc::now();
        entity::user::ActiveModel {
            role: ActiveValue::Set(self.role),
            user_type: ActiveValue::Set(self.user_type),
            first_name: ActiveValue::Set(self.first_name),
            last_name: ActiveValue::Set(self.last_name),
            is_email_verified: ActiveValue::Set(self.email.is_some()),
            is_mobile_verified: ActiveValue::Set(self.mobile.is_some()),
            email: ActiveValue::Set(self.email),
            mobile: ActiveValue::Set(self.mobile),
            password_hash: ActiveValue::Set(self.password_hash),
            firebase_uid: ActiveValue::Set(self.firebase_uid),
            admin_role_id: ActiveValue::Set(self.admin_role_id),
            is_active: ActiveValue::Set(self.is_active),
            created_at: ActiveValue::Set(now),
            updated_at: ActiveValue::Set(now),
            ..Default::default()
        }
        .insert(self.db)
        .await
    }
}

/// Creates a student user with default values.
///
/// Shorthand for `UserFactory::new(db).build().await`.
pub async fn create_user(db: &DatabaseConnection) -> Result<entity::user::Model, DbErr> {
    UserFactory::new(db).build().await
}

/// Creates a user with the given role.
pub async fn create_user_with_role(
    db: &DatabaseConnection,
    role: UserRole,
) -> Result<entity::user::Model, DbErr> {
    UserFactory::new(db).role(role).build().await
}
