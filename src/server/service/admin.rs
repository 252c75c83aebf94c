//! Admin panel: roles, admin accounts, user moderation and the dashboard.

use std::collections::BTreeMap;

use chrono::{Duration, Utc};
use entity::sea_orm_active_enums::{UserRole, UserType};
use sea_orm::DatabaseConnection;

use crate::server::{
    config::SuperAdminConfig,
    data::{
        admin_role::AdminRoleRepository, booking::BookingRepository, center::CenterRepository,
        refresh_token::RefreshTokenRepository, transaction::TransactionRepository,
        user::UserRepository,
    },
    error::{validation::ValidationError, AppError},
    model::{
        admin::{CreateAdminParams, Dashboard, Role, RoleParams},
        pagination::{PageRequest, Paginated},
        user::{CreateUserParams, User},
    },
    util::{parse::enum_str, password::hash_password},
};

/// Window for the "recent bookings" dashboard figure.
const RECENT_BOOKINGS_DAYS: i64 = 30;

/// Service for the admin panel.
pub struct AdminService<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> AdminService<'a> {
    /// Creates a new AdminService instance.
    ///
    /// # Arguments
    /// - `db` - Reference to the database connection
    ///
    /// # Returns
    /// - `AdminService` - New service instance
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    pub async fn list_roles(&self) -> Result<Vec<Role>, AppError> {
        Ok(AdminRoleRepository::new(self.db).get_all().await?)
    }

    /// # Returns
    /// - `Ok(Role)` - Created role
    /// - `Err(AppError::Conflict)` - Role name already taken
    pub async fn create_role(&self, params: RoleParams) -> Result<Role, AppError> {
        let name = params.name.clone();
        let role = AdminRoleRepository::new(self.db)
            .create(params)
            .await
            .map_err(|e| AppError::on_constraint(e, format!("Role {} already exists", name)))?;
        tracing::info!("Created admin role {} ({})", role.name, role.id);

        Ok(role)
    }

    pub async fn update_role(&self, id: i32, params: RoleParams) -> Result<Role, AppError> {
        let name = params.name.clone();
        AdminRoleRepository::new(self.db)
            .update(id, params)
            .await
            .map_err(|e| AppError::on_constraint(e, format!("Role {} already exists", name)))?
            .ok_or_else(|| AppError::NotFound(format!("Role {} not found", id)))
    }

    /// Deletes a role nobody holds.
    ///
    /// # Returns
    /// - `Ok(())` - Deleted
    /// - `Err(AppError::Conflict)` - Role is still assigned to an admin
    /// - `Err(AppError::NotFound)` - Unknown role
    pub async fn delete_role(&self, id: i32) -> Result<(), AppError> {
        let holders = UserRepository::new(self.db).count_with_admin_role(id).await?;
        if holders > 0 {
            return Err(AppError::Conflict(format!(
                "Role is assigned to {} admin(s)",
                holders
            )));
        }

        let deleted = AdminRoleRepository::new(self.db)
            .delete(id)
            .await
            .map_err(|e| AppError::on_constraint(e, "Role is still assigned"))?;
        if !deleted {
            return Err(AppError::NotFound(format!("Role {} not found", id)));
        }

        Ok(())
    }

    /// Creates an `admin` account limited to the given role.
    ///
    /// # Returns
    /// - `Ok(User)` - New admin
    /// - `Err(AppError::ValidationErr)` - Unknown `role_id`
    /// - `Err(AppError::Conflict)` - Email already registered
    pub async fn create_admin(&self, params: CreateAdminParams) -> Result<User, AppError> {
        self.require_role(params.role_id).await?;

        let password_hash = hash_password(params.password).await?;
        let admin = UserRepository::new(self.db)
            .create(CreateUserParams {
                role: UserRole::Admin,
                user_type: None,
                first_name: params.first_name,
                last_name: params.last_name,
                email: Some(params.email),
                mobile: None,
                password_hash: Some(password_hash),
                is_email_verified: true,
                is_mobile_verified: false,
                firebase_uid: None,
                admin_role_id: Some(params.role_id),
            })
            .await
            .map_err(|e| AppError::on_constraint(e, "Email is already registered"))?;
        tracing::info!("Created admin {} with role {}", admin.id, params.role_id);

        Ok(admin)
    }

    /// Moves an `admin` account to another role.
    ///
    /// # Returns
    /// - `Ok(User)` - Updated admin
    /// - `Err(AppError::BadRequest)` - Target is not an `admin` account
    pub async fn assign_role(&self, user_id: i32, role_id: i32) -> Result<User, AppError> {
        let repo = UserRepository::new(self.db);
        let target = self.get_user(user_id).await?;
        if target.role != UserRole::Admin {
            return Err(AppError::BadRequest(
                "Roles can only be assigned to admin accounts".to_string(),
            ));
        }
        self.require_role(role_id).await?;

        repo.set_admin_role(target.id, role_id).await?;
        self.get_user(target.id).await
    }

    pub async fn list_users(
        &self,
        role: Option<UserRole>,
        page: PageRequest,
    ) -> Result<Paginated<User>, AppError> {
        Ok(UserRepository::new(self.db)
            .get_paginated(role, page)
            .await?)
    }

    /// Activates or deactivates an account. Deactivation signs the user out everywhere.
    ///
    /// # Returns
    /// - `Ok(User)` - Updated user
    /// - `Err(AppError::BadRequest)` - Attempt to deactivate a super admin
    pub async fn set_user_status(
        &self,
        actor: &User,
        user_id: i32,
        is_active: bool,
    ) -> Result<User, AppError> {
        let target = self.get_user(user_id).await?;
        if !is_active && target.is_super_admin() {
            return Err(AppError::BadRequest(
                "Super admins cannot be deactivated".to_string(),
            ));
        }

        UserRepository::new(self.db)
            .set_active(target.id, is_active)
            .await?;
        if !is_active {
            let revoked = RefreshTokenRepository::new(self.db)
                .revoke_all_for_user(target.id)
                .await?;
            tracing::info!(
                "Admin {} deactivated user {} and revoked {} session(s)",
                actor.id,
                target.id,
                revoked
            );
        } else {
            tracing::info!("Admin {} activated user {}", actor.id, target.id);
        }

        self.get_user(target.id).await
    }

    /// Aggregates the dashboard figures.
    pub async fn dashboard(&self) -> Result<Dashboard, AppError> {
        let users = UserRepository::new(self.db);
        let bookings = BookingRepository::new(self.db);

        let users_by_role = keyed(users.count_by_role().await?);
        let students = users.count_by_user_type(UserType::Student).await?;
        let guardians = users.count_by_user_type(UserType::Guardian).await?;
        let centers_by_status = keyed(CenterRepository::new(self.db).count_by_status().await?);
        let bookings_by_status = keyed(bookings.count_by_status().await?);
        let payments_by_status = keyed(bookings.count_by_payment_status().await?);
        let revenue = TransactionRepository::new(self.db).net_revenue().await?;
        let bookings_last_30_days = bookings
            .count_created_since(Utc::now() - Duration::days(RECENT_BOOKINGS_DAYS))
            .await?;

        Ok(Dashboard {
            users_by_role,
            students,
            guardians,
            centers_by_status,
            bookings_by_status,
            payments_by_status,
            revenue,
            bookings_last_30_days,
        })
    }

    /// Creates the configured super admin unless one already exists.
    ///
    /// # Returns
    /// - `Ok(true)` - Account created
    /// - `Ok(false)` - A super admin already exists
    pub async fn bootstrap_super_admin(&self, config: &SuperAdminConfig) -> Result<bool, AppError> {
        let repo = UserRepository::new(self.db);
        if repo.super_admin_exists().await? {
            return Ok(false);
        }

        let password_hash = hash_password(config.password.clone()).await?;
        let admin = repo
            .create(CreateUserParams {
                role: UserRole::SuperAdmin,
                user_type: None,
                first_name: "Super".to_string(),
                last_name: "Admin".to_string(),
                email: Some(config.email.clone()),
                mobile: None,
                password_hash: Some(password_hash),
                is_email_verified: true,
                is_mobile_verified: false,
                firebase_uid: None,
                admin_role_id: None,
            })
            .await
            .map_err(|e| {
                AppError::on_constraint(e, format!("{} is already registered", config.email))
            })?;
        tracing::info!("Created super admin {} ({})", config.email, admin.id);

        Ok(true)
    }

    async fn get_user(&self, id: i32) -> Result<User, AppError> {
        UserRepository::new(self.db)
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("User {} not found", id)))
    }

    async fn require_role(&self, role_id: i32) -> Result<Role, AppError> {
        AdminRoleRepository::new(self.db)
            .get_by_id(role_id)
            .await?
            .ok_or_else(|| ValidationError::field("role_id", "unknown role").into())
    }
}

fn keyed<E>(counts: Vec<(E, u64)>) -> BTreeMap<String, u64>
where
    E: sea_orm::ActiveEnum<Value = String>,
{
    counts
        .into_iter()
        .map(|(value, count)| (enum_str(&value), count))
        .collect()
}
