//! Sport and facility factories.

use crate::factory::helpers::next_id;
use chrono::Utc;
use sea_orm::{ActiveModelTrait, ActiveValue, DatabaseConnection, DbErr};

/// Creates an active sport with a unique name and slug.
pub async fn create_sport(db: &DatabaseConnection) -> Result<entity::sport::Model, DbErr> {
    let id = next_id();
    create_sport_named(db, &format!("Sport {}", id), &format!("sport-{}", id)).await
}

/// Creates an active sport with the given name and slug.
pub async fn create_sport_named(
    db: &DatabaseConnection,
    name: &str,
    slug: &str,
) -> Result<entity::sport::Model, DbErr> {
    entity::sport::ActiveModel {
        name: ActiveValue::Set(name.to_string()),
        slug: ActiveValue::Set(slug.to_string()),
        icon_url: ActiveValue::Set(None),
        is_active: ActiveValue::Set(true),
        created_at: ActiveValue::Set(Utc::now()),
        ..Default::default()
    }
    .insert(db)
    .await
}

/// Creates an active facility with a unique name.
pub async fn create_facility(db: &DatabaseConnection) -> Result<entity::facility::Model, DbErr> {
    entity::facility::ActiveModel {
        name: ActiveValue::Set(format!("Facility {}", next_id())),
        icon_url: ActiveValue::Set(None),
        is_active: ActiveValue::Set(true),
        created_at: ActiveValue::Set(Utc::now()),
        ..Default::default()
    }
    .insert(db)
    .await
}
