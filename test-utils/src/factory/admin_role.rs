//! Admin role factory.

use crate::factory::helpers::next_id;
use chrono::Utc;
use sea_orm::{ActiveModelTrait, ActiveValue, DatabaseConnection, DbErr};
use serde_json::json;

/// Factory for admin roles. Defaults to an empty permission matrix.
pub struct AdminRoleFactory<'a> {
    db: &'a DatabaseConnection,
    name: String,
    permissions: serde_json::Value,
}

impl<'a> AdminRoleFactory<'a> {
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self {
            db,
            name: format!("Role {}", next_id()),
            permissions: json!([]),
        }
    }

    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    /// Grants `actions` on `section`, e.g. `.grant("bookings", &["view", "update"])`.
    pub fn grant(mut self, section: &str, actions: &[&str]) -> Self {
        if let Some(entries) = self.permissions.as_array_mut() {
            entries.push(json!({ "section": section, "actions": actions }));
        }
        self
    }

    pub async fn build(self) -> Result<entity::admin_role::Model, DbErr> {
        let now = Utc::now();
        entity::admin_role::ActiveModel {
            name: ActiveValue::Set(self.name),
            description: ActiveValue::Set(None),
            permissions: ActiveValue::Set(self.permissions),
            created_at: ActiveValue::Set(now),
            updated_at: ActiveValue::Set(now),
            ..Default::default()
        }
        .insert(self.db)
        .await
    }
}

/// Creates a role without any permissions.
pub async fn create_admin_role(db: &DatabaseConnection) -> Result<entity::admin_role::Model, DbErr> {
    AdminRoleFactory::new(db).build().await
}
