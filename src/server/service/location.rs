//! Countries, states and cities used by center addresses.

use sea_orm::DatabaseConnection;

use crate::server::{
    data::location::LocationRepository,
    error::AppError,
    model::catalog::{City, Country, CreateCountryParams, State},
};

pub struct LocationService<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> LocationService<'a> {
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    pub async fn countries(&self) -> Result<Vec<Country>, AppError> {
        Ok(LocationRepository::new(self.db).get_countries().await?)
    }

    /// States of a country.
    ///
    /// # Returns
    /// - `Ok(Vec<State>)` - States ordered by name
    /// - `Err(AppError::NotFound)` - Unknown country
    pub async fn states(&self, country_id: i32) -> Result<Vec<State>, AppError> {
        let repo = LocationRepository::new(self.db);
        if !repo.country_exists(country_id).await? {
            return Err(AppError::NotFound(format!("Country {} not found", country_id)));
        }
        Ok(repo.get_states(country_id).await?)
    }

    pub async fn cities(&self, state_id: i32) -> Result<Vec<City>, AppError> {
        let repo = LocationRepository::new(self.db);
        if !repo.state_exists(state_id).await? {
            return Err(AppError::NotFound(format!("State {} not found", state_id)));
        }
        Ok(repo.get_cities(state_id).await?)
    }

    pub async fn create_country(&self, params: CreateCountryParams) -> Result<Country, AppError> {
        let code = params.code.clone();
        LocationRepository::new(self.db)
            .create_country(params)
            .await
            .map_err(|e| AppError::on_constraint(e, format!("Country {} already exists", code)))
    }

    pub async fn create_state(&self, country_id: i32, name: String) -> Result<State, AppError> {
        let repo = LocationRepository::new(self.db);
        if !repo.country_exists(country_id).await? {
            return Err(AppError::NotFound(format!("Country {} not found", country_id)));
        }
        repo.create_state(country_id, name.clone())
            .await
            .map_err(|e| AppError::on_constraint(e, format!("State '{}' already exists", name)))
    }

    pub async fn create_city(&self, state_id: i32, name: String) -> Result<City, AppError> {
        let repo = LocationRepository::new(self.db);
        if !repo.state_exists(state_id).await? {
            return Err(AppError::NotFound(format!("State {} not found", state_id)));
        }
        repo.create_city(state_id, name.clone())
            .await
            .map_err(|e| AppError::on_constraint(e, format!("City '{}' already exists", name)))
    }
}
