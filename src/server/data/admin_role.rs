//! Admin role repository.

use chrono::Utc;
use sea_orm::{ActiveModelTrait, ActiveValue, DatabaseConnection, DbErr, EntityTrait, QueryOrder};

use crate::server::model::admin::{Role, RoleParams};

pub struct AdminRoleRepository<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> AdminRoleRepository<'a> {
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    pub async fn create(&self, params: RoleParams) -> Result<Role, DbErr> {
        let now = Utc::now();
        let entity = entity::admin_role::ActiveModel {
            name: ActiveValue::Set(params.name),
            description: ActiveValue::Set(params.description),
            permissions: ActiveValue::Set(params.permissions.to_json()),
            created_at: ActiveValue::Set(now),
            updated_at: ActiveValue::Set(now),
            ..Default::default()
        }
        .insert(self.db)
        .await?;

        Ok(Role::from_entity(entity))
    }

    /// Replaces name, description and permissions of a role.
    ///
    /// # Returns
    /// - `Ok(Some(Role))` - Updated role
    /// - `Ok(None)` - No role with that id
    pub async fn update(&self, id: i32, params: RoleParams) -> Result<Option<Role>, DbErr> {
        let Some(existing) = entity::prelude::AdminRole::find_by_id(id).one(self.db).await?
        else {
            return Ok(None);
        };

        let mut active: entity::admin_role::ActiveModel = existing.into();
        active.name = ActiveValue::Set(params.name);
        active.description = ActiveValue::Set(params.description);
        active.permissions = ActiveValue::Set(params.permissions.to_json());
        active.updated_at = ActiveValue::Set(Utc::now());

        Ok(Some(Role::from_entity(active.update(self.db).await?)))
    }

    pub async fn delete(&self, id: i32) -> Result<bool, DbErr> {
        let result = entity::prelude::AdminRole::delete_by_id(id)
            .exec(self.db)
            .await?;
        Ok(result.rows_affected > 0)
    }

    pub async fn get_by_id(&self, id: i32) -> Result<Option<Role>, DbErr> {
        let entity = entity::prelude::AdminRole::find_by_id(id).one(self.db).await?;
        Ok(entity.map(Role::from_entity))
    }

    pub async fn get_all(&self) -> Result<Vec<Role>, DbErr> {
        let entities = entity::prelude::AdminRole::find()
            .order_by_asc(entity::admin_role::Column::Name)
            .all(self.db)
            .await?;
        Ok(entities.into_iter().map(Role::from_entity).collect())
    }
}
