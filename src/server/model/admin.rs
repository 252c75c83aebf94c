//! Admin panel models: roles, admin accounts and dashboard figures.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};

use crate::{
    model::admin::{CreateAdminDto, DashboardDto, RoleDto, UpsertRoleDto},
    server::{
        error::validation::ValidationError,
        model::permission::PermissionMatrix,
        util::validation::{is_valid_password, non_blank, normalize_email, MIN_PASSWORD_LEN},
    },
};

#[derive(Debug, Clone, PartialEq)]
pub struct Role {
    pub id: i32,
    pub name: String,
    pub description: Option<String>,
    pub permissions: PermissionMatrix,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Role {
    /// Unknown sections or actions stored in the permissions column are ignored.
    pub fn from_entity(entity: entity::admin_role::Model) -> Self {
        Self {
            id: entity.id,
            name: entity.name,
            description: entity.description,
            permissions: PermissionMatrix::from_json(&entity.permissions),
            created_at: entity.created_at,
            updated_at: entity.updated_at,
        }
    }

    pub fn into_dto(self) -> RoleDto {
        RoleDto {
            id: self.id,
            name: self.name,
            description: self.description,
            permissions: self.permissions.to_dto(),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct RoleParams {
    pub name: String,
    pub description: Option<String>,
    pub permissions: PermissionMatrix,
}

impl RoleParams {
    pub fn from_dto(dto: UpsertRoleDto) -> Result<Self, ValidationError> {
        let mut errors = ValidationError::new();

        let name = non_blank(dto.name);
        errors.require_str("name", name.as_deref());
        let permissions = match PermissionMatrix::from_dto(&dto.permissions) {
            Ok(matrix) => matrix,
            Err(e) => {
                errors.merge(e);
                PermissionMatrix::default()
            }
        };

        errors.into_result()?;

        Ok(Self {
            name: name.unwrap_or_default(),
            description: non_blank(dto.description),
            permissions,
        })
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct CreateAdminParams {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub password: String,
    pub role_id: i32,
}

impl CreateAdminParams {
    pub fn from_dto(dto: CreateAdminDto) -> Result<Self, ValidationError> {
        let mut errors = ValidationError::new();

        let first_name = non_blank(dto.first_name);
        let last_name = non_blank(dto.last_name);
        errors.require_str("first_name", first_name.as_deref());
        errors.require_str("last_name", last_name.as_deref());

        let email = match non_blank(dto.email) {
            None => {
                errors.add("email", "email is required");
                None
            }
            Some(raw) => {
                let email = normalize_email(&raw);
                if email.is_none() {
                    errors.add("email", "invalid email address");
                }
                email
            }
        };

        match dto.password.as_deref() {
            None => errors.add("password", "password is required"),
            Some(p) if !is_valid_password(p) => errors.add(
                "password",
                format!("must be at least {MIN_PASSWORD_LEN} characters"),
            ),
            Some(_) => {}
        }
        errors.require("role_id", &dto.role_id);

        errors.into_result()?;

        Ok(Self {
            first_name: first_name.unwrap_or_default(),
            last_name: last_name.unwrap_or_default(),
            email: email.unwrap_or_default(),
            password: dto.password.unwrap_or_default(),
            role_id: dto.role_id.unwrap_or_default(),
        })
    }
}

/// Aggregate figures for the admin dashboard. Map keys are stored enum values.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Dashboard {
    pub users_by_role: BTreeMap<String, u64>,
    pub students: u64,
    pub guardians: u64,
    pub centers_by_status: BTreeMap<String, u64>,
    pub bookings_by_status: BTreeMap<String, u64>,
    pub payments_by_status: BTreeMap<String, u64>,
    /// Successful payments minus refunds, in minor units.
    pub revenue: i64,
    pub bookings_last_30_days: u64,
}

impl Dashboard {
    pub fn into_dto(self) -> DashboardDto {
        DashboardDto {
            users_by_role: self.users_by_role,
            students: self.students,
            guardians: self.guardians,
            centers_by_status: self.centers_by_status,
            bookings_by_status: self.bookings_by_status,
            payments_by_status: self.payments_by_status,
            revenue: self.revenue,
            bookings_last_30_days: self.bookings_last_30_days,
        }
    }
}
