//! Country, state and city factories.

use crate::factory::helpers::next_id;
use sea_orm::{ActiveModelTrait, ActiveValue, DatabaseConnection, DbErr};

pub async fn create_country(db: &DatabaseConnection) -> Result<entity::country::Model, DbErr> {
    let id = next_id();
    entity::country::ActiveModel {
        name: ActiveValue::Set(format!("Country {}", id)),
        code: ActiveValue::Set(format!("C{}", id)),
        ..Default::default()
    }
    .insert(db)
    .await
}

pub async fn create_state(
    db: &DatabaseConnection,
    country_id: i32,
) -> Result<entity::state::Model, DbErr> {
    entity::state::ActiveModel {
        country_id: ActiveValue::Set(country_id),
        name: ActiveValue::Set(format!("State {}", next_id())),
        ..Default::default()
    }
    .insert(db)
    .await
}

/// Creates a city together with a fresh country and state.
pub async fn create_city(db: &DatabaseConnection) -> Result<entity::city::Model, DbErr> {
    let country = create_country(db).await?;
    let state = create_state(db, country.id).await?;

    entity::city::ActiveModel {
        state_id: ActiveValue::Set(state.id),
        name: ActiveValue::Set(format!("City {}", next_id())),
        ..Default::default()
    }
    .insert(db)
    .await
}
