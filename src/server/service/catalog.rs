//! Sports and facilities offered across the marketplace.

use sea_orm::DatabaseConnection;

use crate::server::{
    data::{facility::FacilityRepository, sport::SportRepository},
    error::AppError,
    model::catalog::{CatalogItemParams, Facility, Sport},
};

pub struct CatalogService<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> CatalogService<'a> {
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    /// Lists sports by name. The public listing only includes active ones.
    pub async fn list_sports(&self, active_only: bool) -> Result<Vec<Sport>, AppError> {
        Ok(SportRepository::new(self.db).get_all(active_only).await?)
    }

    /// Creates a sport.
    ///
    /// # Returns
    /// - `Ok(Sport)` - Created sport with its derived slug
    /// - `Err(AppError::Conflict)` - Name or slug already taken
    pub async fn create_sport(&self, params: CatalogItemParams) -> Result<Sport, AppError> {
        let name = params.name.clone();
        SportRepository::new(self.db)
            .create(params)
            .await
            .map_err(|e| AppError::on_constraint(e, format!("Sport '{}' already exists", name)))
    }

    pub async fn update_sport(
        &self,
        id: i32,
        params: CatalogItemParams,
    ) -> Result<Sport, AppError> {
        let name = params.name.clone();
        SportRepository::new(self.db)
            .update(id, params)
            .await
            .map_err(|e| AppError::on_constraint(e, format!("Sport '{}' already exists", name)))?
            .ok_or_else(|| AppError::NotFound(format!("Sport {} not found", id)))
    }

    /// Deletes a sport no center offers and no batch teaches.
    ///
    /// # Returns
    /// - `Ok(())` - Deleted
    /// - `Err(AppError::Conflict)` - Sport is still in use; deactivate it instead
    /// - `Err(AppError::NotFound)` - Unknown sport
    pub async fn delete_sport(&self, id: i32) -> Result<(), AppError> {
        let repo = SportRepository::new(self.db);
        if repo.is_offered(id).await? {
            return Err(AppError::Conflict(format!(
                "Sport {} is offered by coaching centers",
                id
            )));
        }

        let deleted = repo
            .delete(id)
            .await
            .map_err(|e| AppError::on_constraint(e, format!("Sport {} is in use", id)))?;
        if !deleted {
            return Err(AppError::NotFound(format!("Sport {} not found", id)));
        }

        Ok(())
    }

    pub async fn list_facilities(&self, active_only: bool) -> Result<Vec<Facility>, AppError> {
        Ok(FacilityRepository::new(self.db).get_all(active_only).await?)
    }

    pub async fn create_facility(&self, params: CatalogItemParams) -> Result<Facility, AppError> {
        let name = params.name.clone();
        FacilityRepository::new(self.db)
            .create(params)
            .await
            .map_err(|e| AppError::on_constraint(e, format!("Facility '{}' already exists", name)))
    }

    pub async fn update_facility(
        &self,
        id: i32,
        params: CatalogItemParams,
    ) -> Result<Facility, AppError> {
        let name = params.name.clone();
        FacilityRepository::new(self.db)
            .update(id, params)
            .await
            .map_err(|e| AppError::on_constraint(e, format!("Facility '{}' already exists", name)))?
            .ok_or_else(|| AppError::NotFound(format!("Facility {} not found", id)))
    }

    pub async fn delete_facility(&self, id: i32) -> Result<(), AppError> {
        if !FacilityRepository::new(self.db).delete(id).await? {
            return Err(AppError::NotFound(format!("Facility {} not found", id)));
        }
        Ok(())
    }
}
