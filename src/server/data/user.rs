//! User data repository for database operations.
//!
//! Handles account creation, lookups by every unique identifier (email, mobile,
//! firebase uid), profile and credential updates, and the counts shown on the admin
//! dashboard.

use chrono::Utc;
use entity::sea_orm_active_enums::{UserRole, UserType};
use sea_orm::{
    sea_query::Expr, ActiveModelTrait, ActiveValue, ColumnTrait, DatabaseConnection, DbErr,
    EntityTrait, Iterable, PaginatorTrait, QueryFilter, QueryOrder,
};

use crate::server::model::{
    auth::Contact,
    pagination::{PageRequest, Paginated},
    user::{CreateUserParams, UpdateProfileParams, User},
};

pub struct UserRepository<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> UserRepository<'a> {
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    /// Inserts a new user.
    ///
    /// # Returns
    /// - `Ok(User)` - The created user
    /// - `Err(DbErr)` - Database error, including unique violations on email, mobile or
    ///   firebase uid
    pub async fn create(&self, params: CreateUserParams) -> Result<User, DbErr> {
        let now = Utc::now();
        let entity = entity::user::ActiveModel {
            role: ActiveValue::Set(params.role),
            user_type: ActiveValue::Set(params.user_type),
            first_name: ActiveValue::Set(params.first_name),
            last_name: ActiveValue::Set(params.last_name),
            email: ActiveValue::Set(params.email),
            mobile: ActiveValue::Set(params.mobile),
            password_hash: ActiveValue::Set(params.password_hash),
            is_email_verified: ActiveValue::Set(params.is_email_verified),
            is_mobile_verified: ActiveValue::Set(params.is_mobile_verified),
            firebase_uid: ActiveValue::Set(params.firebase_uid),
            admin_role_id: ActiveValue::Set(params.admin_role_id),
            is_active: ActiveValue::Set(true),
            created_at: ActiveValue::Set(now),
            updated_at: ActiveValue::Set(now),
            ..Default::default()
        }
        .insert(self.db)
        .await?;

        Ok(User::from_entity(entity))
    }

    pub async fn find_by_id(&self, id: i32) -> Result<Option<User>, DbErr> {
        let entity = entity::prelude::User::find_by_id(id).one(self.db).await?;
        Ok(entity.map(User::from_entity))
    }

    pub async fn find_by_email(&self, email: &str) -> Result<Option<User>, DbErr> {
        let entity = entity::prelude::User::find()
            .filter(entity::user::Column::Email.eq(email))
            .one(self.db)
            .await?;
        Ok(entity.map(User::from_entity))
    }

    pub async fn find_by_mobile(&self, mobile: &str) -> Result<Option<User>, DbErr> {
        let entity = entity::prelude::User::find()
            .filter(entity::user::Column::Mobile.eq(mobile))
            .one(self.db)
            .await?;
        Ok(entity.map(User::from_entity))
    }

    /// Finds the user owning a normalized contact.
    pub async fn find_by_contact(&self, contact: &Contact) -> Result<Option<User>, DbErr> {
        match contact {
            Contact::Mobile(mobile) => self.find_by_mobile(mobile).await,
            Contact::Email(email) => self.find_by_email(email).await,
        }
    }

    pub async fn find_by_firebase_uid(&self, uid: &str) -> Result<Option<User>, DbErr> {
        let entity = entity::prelude::User::find()
            .filter(entity::user::Column::FirebaseUid.eq(uid))
            .one(self.db)
            .await?;
        Ok(entity.map(User::from_entity))
    }

    /// Applies the fields present in `params`.
    ///
    /// # Returns
    /// - `Ok(Some(User))` - Updated user
    /// - `Ok(None)` - No user with that id
    /// - `Err(DbErr)` - Database error during update
    pub async fn update_profile(
        &self,
        id: i32,
        params: UpdateProfileParams,
    ) -> Result<Option<User>, DbErr> {
        let Some(existing) = entity::prelude::User::find_by_id(id).one(self.db).await? else {
            return Ok(None);
        };

        let mut active: entity::user::ActiveModel = existing.into();
        if let Some(first_name) = params.first_name {
            active.first_name = ActiveValue::Set(first_name);
        }
        if let Some(last_name) = params.last_name {
            active.last_name = ActiveValue::Set(last_name);
        }
        if let Some(user_type) = params.user_type {
            active.user_type = ActiveValue::Set(Some(user_type));
        }
        active.updated_at = ActiveValue::Set(Utc::now());

        let entity = active.update(self.db).await?;
        Ok(Some(User::from_entity(entity)))
    }

    pub async fn set_password_hash(&self, id: i32, password_hash: &str) -> Result<(), DbErr> {
        entity::prelude::User::update_many()
            .filter(entity::user::Column::Id.eq(id))
            .col_expr(
                entity::user::Column::PasswordHash,
                Expr::value(password_hash.to_string()),
            )
            .col_expr(entity::user::Column::UpdatedAt, Expr::value(Utc::now()))
            .exec(self.db)
            .await?;
        Ok(())
    }

    /// Replaces the user's mobile or email with a verified contact.
    pub async fn set_verified_contact(&self, id: i32, contact: &Contact) -> Result<(), DbErr> {
        let update = entity::prelude::User::update_many()
            .filter(entity::user::Column::Id.eq(id))
            .col_expr(entity::user::Column::UpdatedAt, Expr::value(Utc::now()));

        let update = match contact {
            Contact::Mobile(mobile) => update
                .col_expr(entity::user::Column::Mobile, Expr::value(mobile.clone()))
                .col_expr(entity::user::Column::IsMobileVerified, Expr::value(true)),
            Contact::Email(email) => update
                .col_expr(entity::user::Column::Email, Expr::value(email.clone()))
                .col_expr(entity::user::Column::IsEmailVerified, Expr::value(true)),
        };

        update.exec(self.db).await?;
        Ok(())
    }

    /// Links a social identity to an existing account, marking its email verified.
    pub async fn link_firebase_uid(&self, id: i32, uid: &str) -> Result<(), DbErr> {
        entity::prelude::User::update_many()
            .filter(entity::user::Column::Id.eq(id))
            .col_expr(entity::user::Column::FirebaseUid, Expr::value(uid.to_string()))
            .col_expr(entity::user::Column::IsEmailVerified, Expr::value(true))
            .col_expr(entity::user::Column::UpdatedAt, Expr::value(Utc::now()))
            .exec(self.db)
            .await?;
        Ok(())
    }

    pub async fn set_active(&self, id: i32, is_active: bool) -> Result<(), DbErr> {
        entity::prelude::User::update_many()
            .filter(entity::user::Column::Id.eq(id))
            .col_expr(entity::user::Column::IsActive, Expr::value(is_active))
            .col_expr(entity::user::Column::UpdatedAt, Expr::value(Utc::now()))
            .exec(self.db)
            .await?;
        Ok(())
    }

    pub async fn set_admin_role(&self, id: i32, role_id: i32) -> Result<(), DbErr> {
        entity::prelude::User::update_many()
            .filter(entity::user::Column::Id.eq(id))
            .col_expr(entity::user::Column::AdminRoleId, Expr::value(role_id))
            .col_expr(entity::user::Column::UpdatedAt, Expr::value(Utc::now()))
            .exec(self.db)
            .await?;
        Ok(())
    }

    /// Lists users newest first, optionally limited to one role.
    pub async fn get_paginated(
        &self,
        role: Option<UserRole>,
        page: PageRequest,
    ) -> Result<Paginated<User>, DbErr> {
        let mut query = entity::prelude::User::find();
        if let Some(role) = role {
            query = query.filter(entity::user::Column::Role.eq(role));
        }

        let paginator = query
            .order_by_desc(entity::user::Column::CreatedAt)
            .order_by_desc(entity::user::Column::Id)
            .paginate(self.db, page.per_page);

        let total = paginator.num_items().await?;
        let entities = paginator.fetch_page(page.page).await?;

        Ok(Paginated::new(
            entities.into_iter().map(User::from_entity).collect(),
            total,
            page,
        ))
    }

    pub async fn super_admin_exists(&self) -> Result<bool, DbErr> {
        let count = entity::prelude::User::find()
            .filter(entity::user::Column::Role.eq(UserRole::SuperAdmin))
            .count(self.db)
            .await?;
        Ok(count > 0)
    }

    /// Number of accounts currently assigned to an admin role.
    pub async fn count_with_admin_role(&self, role_id: i32) -> Result<u64, DbErr> {
        entity::prelude::User::find()
            .filter(entity::user::Column::AdminRoleId.eq(role_id))
            .count(self.db)
            .await
    }

    pub async fn count_by_role(&self) -> Result<Vec<(UserRole, u64)>, DbErr> {
        let mut counts = Vec::new();
        for role in UserRole::iter() {
            let count = entity::prelude::User::find()
                .filter(entity::user::Column::Role.eq(role))
                .count(self.db)
                .await?;
            counts.push((role, count));
        }
        Ok(counts)
    }

    pub async fn count_by_user_type(&self, user_type: UserType) -> Result<u64, DbErr> {
        entity::prelude::User::find()
            .filter(entity::user::Column::Role.eq(UserRole::User))
            .filter(entity::user::Column::UserType.eq(user_type))
            .count(self.db)
            .await
    }
}
