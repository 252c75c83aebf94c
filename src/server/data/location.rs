//! Country, state and city lookups.

use sea_orm::{
    ActiveModelTrait, ActiveValue, ColumnTrait, DatabaseConnection, DbErr, EntityTrait,
    QueryFilter, QueryOrder,
};

use crate::server::model::catalog::{City, Country, CreateCountryParams, State};

pub struct LocationRepository<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> LocationRepository<'a> {
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    pub async fn create_country(&self, params: CreateCountryParams) -> Result<Country, DbErr> {
        let entity = entity::country::ActiveModel {
            name: ActiveValue::Set(params.name),
            code: ActiveValue::Set(params.code),
            ..Default::default()
        }
        .insert(self.db)
        .await?;

        Ok(Country::from_entity(entity))
    }

    pub async fn create_state(&self, country_id: i32, name: String) -> Result<State, DbErr> {
        let entity = entity::state::ActiveModel {
            country_id: ActiveValue::Set(country_id),
            name: ActiveValue::Set(name),
            ..Default::default()
        }
        .insert(self.db)
        .await?;

        Ok(State::from_entity(entity))
    }

    pub async fn create_city(&self, state_id: i32, name: String) -> Result<City, DbErr> {
        let entity = entity::city::ActiveModel {
            state_id: ActiveValue::Set(state_id),
            name: ActiveValue::Set(name),
            ..Default::default()
        }
        .insert(self.db)
        .await?;

        Ok(City::from_entity(entity))
    }

    pub async fn get_countries(&self) -> Result<Vec<Country>, DbErr> {
        let entities = entity::prelude::Country::find()
            .order_by_asc(entity::country::Column::Name)
            .all(self.db)
            .await?;
        Ok(entities.into_iter().map(Country::from_entity).collect())
    }

    pub async fn country_exists(&self, id: i32) -> Result<bool, DbErr> {
        Ok(entity::prelude::Country::find_by_id(id)
            .one(self.db)
            .await?
            .is_some())
    }

    pub async fn state_exists(&self, id: i32) -> Result<bool, DbErr> {
        Ok(entity::prelude::State::find_by_id(id)
            .one(self.db)
            .await?
            .is_some())
    }

    pub async fn city_exists(&self, id: i32) -> Result<bool, DbErr> {
        Ok(entity::prelude::City::find_by_id(id)
            .one(self.db)
            .await?
            .is_some())
    }

    pub async fn get_states(&self, country_id: i32) -> Result<Vec<State>, DbErr> {
        let entities = entity::prelude::State::find()
            .filter(entity::state::Column::CountryId.eq(country_id))
            .order_by_asc(entity::state::Column::Name)
            .all(self.db)
            .await?;
        Ok(entities.into_iter().map(State::from_entity).collect())
    }

    pub async fn get_cities(&self, state_id: i32) -> Result<Vec<City>, DbErr> {
        let entities = entity::prelude::City::find()
            .filter(entity::city::Column::StateId.eq(state_id))
            .order_by_asc(entity::city::Column::Name)
            .all(self.db)
            .await?;
        Ok(entities.into_iter().map(City::from_entity).collect())
    }
}
