//! User domain model and parameters.

use chrono::{DateTime, Utc};
use entity::sea_orm_active_enums::{UserRole, UserType};

use crate::{
    model::user::{ChangePasswordDto, UpdateProfileDto, UserDto},
    server::{
        error::validation::ValidationError,
        util::{
            parse::{enum_str, parse_enum},
            validation::{is_valid_password, non_blank, MIN_PASSWORD_LEN},
        },
    },
};

/// Account of any role: learners (students/guardians), academies and administrators.
#[derive(Debug, Clone, PartialEq)]
pub struct User {
    pub id: i32,
    pub role: UserRole,
    /// Only set for role `user`.
    pub user_type: Option<UserType>,
    pub first_name: String,
    pub last_name: String,
    pub email: Option<String>,
    pub mobile: Option<String>,
    pub password_hash: Option<String>,
    pub is_email_verified: bool,
    pub is_mobile_verified: bool,
    pub firebase_uid: Option<String>,
    pub admin_role_id: Option<i32>,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl User {
    /// Converts an entity model to a user domain model at the repository boundary.
    pub fn from_entity(entity: entity::user::Model) -> Self {
        Self {
            id: entity.id,
            role: entity.role,
            user_type: entity.user_type,
            first_name: entity.first_name,
            last_name: entity.last_name,
            email: entity.email,
            mobile: entity.mobile,
            password_hash: entity.password_hash,
            is_email_verified: entity.is_email_verified,
            is_mobile_verified: entity.is_mobile_verified,
            firebase_uid: entity.firebase_uid,
            admin_role_id: entity.admin_role_id,
            is_active: entity.is_active,
            created_at: entity.created_at,
            updated_at: entity.updated_at,
        }
    }

    /// Converts the user to its API representation. The password hash never leaves the server.
    pub fn into_dto(self) -> UserDto {
        UserDto {
            id: self.id,
            role: enum_str(&self.role),
            user_type: self.user_type.as_ref().map(enum_str),
            first_name: self.first_name,
            last_name: self.last_name,
            email: self.email,
            mobile: self.mobile,
            is_email_verified: self.is_email_verified,
            is_mobile_verified: self.is_mobile_verified,
            admin_role_id: self.admin_role_id,
            is_active: self.is_active,
            created_at: self.created_at,
        }
    }

    pub fn is_admin(&self) -> bool {
        matches!(self.role, UserRole::Admin | UserRole::SuperAdmin)
    }

    pub fn is_super_admin(&self) -> bool {
        self.role == UserRole::SuperAdmin
    }
}

/// Parameters for inserting a user.
#[derive(Debug, Clone)]
pub struct CreateUserParams {
    pub role: UserRole,
    pub user_type: Option<UserType>,
    pub first_name: String,
    pub last_name: String,
    pub email: Option<String>,
    pub mobile: Option<String>,
    pub password_hash: Option<String>,
    pub is_email_verified: bool,
    pub is_mobile_verified: bool,
    pub firebase_uid: Option<String>,
    pub admin_role_id: Option<i32>,
}

/// Partial profile update. `None` leaves a field unchanged.
#[derive(Debug, Clone, Default)]
pub struct UpdateProfileParams {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub user_type: Option<UserType>,
}

impl UpdateProfileParams {
    pub fn from_dto(dto: UpdateProfileDto) -> Result<Self, ValidationError> {
        let mut errors = ValidationError::new();
        for (field, value) in [("first_name", &dto.first_name), ("last_name", &dto.last_name)] {
            if value.as_deref().is_some_and(|v| v.trim().is_empty()) {
                errors.add(field, "must not be blank");
            }
        }
        let user_type = match non_blank(dto.user_type) {
            None => None,
            Some(raw) => parse_enum::<UserType>("user_type", &raw)
                .map_err(|e| errors.merge(e))
                .ok(),
        };
        errors.into_result()?;

        Ok(Self {
            first_name: non_blank(dto.first_name),
            last_name: non_blank(dto.last_name),
            user_type,
        })
    }
}

#[derive(Debug, Clone)]
pub struct ChangePasswordParams {
    pub current_password: String,
    pub new_password: String,
}

impl ChangePasswordParams {
    pub fn from_dto(dto: ChangePasswordDto) -> Result<Self, ValidationError> {
        let mut errors = ValidationError::new();
        errors.require_str("current_password", dto.current_password.as_deref());
        match dto.new_password.as_deref() {
            None => errors.add("new_password", "new_password is required"),
            Some(p) if !is_valid_password(p) => errors.add(
                "new_password",
                format!("must be at least {MIN_PASSWORD_LEN} characters"),
            ),
            Some(_) => {}
        }
        errors.into_result()?;

        Ok(Self {
            current_password: dto.current_password.unwrap_or_default(),
            new_password: dto.new_password.unwrap_or_default(),
        })
    }
}
