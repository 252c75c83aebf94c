//! Coaching center onboarding, publishing and discovery.

use entity::sea_orm_active_enums::{BookingStatus, CenterStatus};
use sea_orm::{DatabaseConnection, Iterable};

use crate::server::{
    data::{
        batch::BatchRepository, booking::BookingRepository, center::CenterRepository,
        facility::FacilityRepository, location::LocationRepository, sport::SportRepository,
    },
    error::{auth::AuthError, validation::ValidationError, AppError},
    model::{
        center::{Center, CenterFilter, CenterProfile},
        pagination::{PageRequest, Paginated},
        user::User,
    },
};

/// Service for coaching centers.
///
/// Academies create and edit their own centers as drafts and publish them once the profile
/// is complete. The public only ever sees published centers.
pub struct CenterService<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> CenterService<'a> {
    /// Creates a new CenterService instance.
    ///
    /// # Arguments
    /// - `db` - Reference to the database connection
    ///
    /// # Returns
    /// - `CenterService` - New service instance
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    /// Creates a draft center for an academy.
    ///
    /// # Arguments
    /// - `owner` - Academy user creating the center
    /// - `profile` - Format-validated profile
    ///
    /// # Returns
    /// - `Ok(Center)` - New draft center
    /// - `Err(AppError::ValidationErr)` - Unknown facilities, sports or city
    pub async fn create(&self, owner: &User, profile: CenterProfile) -> Result<Center, AppError> {
        self.check_references(&profile).await?;

        let center = CenterRepository::new(self.db)
            .create(owner.id, profile)
            .await?;
        tracing::info!("Academy {} created center {}", owner.id, center.id);

        Ok(center)
    }

    /// Replaces the profile of a center the caller owns.
    ///
    /// A published center must stay publishable, and a sport cannot be removed while an
    /// active batch still teaches it.
    ///
    /// # Returns
    /// - `Ok(Center)` - Updated center
    /// - `Err(AppError::NotFound)` - Unknown center
    /// - `Err(AuthError::AccessDenied)` - Caller does not own the center
    /// - `Err(AppError::ValidationErr)` - Bad references, incomplete published profile or a
    ///   removed sport still in use
    pub async fn update(
        &self,
        user: &User,
        center_id: i32,
        profile: CenterProfile,
    ) -> Result<Center, AppError> {
        let center = self.get_owned(user, center_id).await?;

        self.check_references(&profile).await?;
        if center.is_published() {
            profile.validate_publishable()?;
        }

        let batch_repo = BatchRepository::new(self.db);
        let kept = profile.sport_ids();
        for removed in center
            .profile
            .sport_ids()
            .into_iter()
            .filter(|id| !kept.contains(id))
        {
            if batch_repo.center_uses_sport(center.id, removed).await? {
                return Err(ValidationError::field(
                    "sports",
                    format!("sport {} is taught by an active batch", removed),
                )
                .into());
            }
        }

        CenterRepository::new(self.db)
            .update(center.id, profile)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Center {} not found", center_id)))
    }

    /// Publishes a center the caller owns.
    ///
    /// # Returns
    /// - `Ok(Center)` - Published center
    /// - `Err(AppError::ValidationErr)` - Every field missing for publication
    pub async fn publish(&self, user: &User, center_id: i32) -> Result<Center, AppError> {
        let center = self.get_owned(user, center_id).await?;
        self.change_status(center, CenterStatus::Published).await
    }

    /// Moves a center the caller owns back to draft.
    pub async fn unpublish(&self, user: &User, center_id: i32) -> Result<Center, AppError> {
        let center = self.get_owned(user, center_id).await?;
        self.change_status(center, CenterStatus::Draft).await
    }

    /// Deletes a center the caller owns together with its batches.
    ///
    /// # Returns
    /// - `Ok(())` - Deleted
    /// - `Err(AppError::Conflict)` - The center has bookings
    pub async fn delete(&self, user: &User, center_id: i32) -> Result<(), AppError> {
        let center = self.get_owned(user, center_id).await?;
        let booking_repo = BookingRepository::new(self.db);

        if booking_repo.center_has_active_booking(center.id).await? {
            return Err(AppError::Conflict(
                "Center has active bookings and cannot be deleted".to_string(),
            ));
        }
        let all: Vec<BookingStatus> = BookingStatus::iter().collect();
        if booking_repo.center_has_booking(center.id, &all).await? {
            return Err(AppError::Conflict(
                "Center has booking history; unpublish it instead".to_string(),
            ));
        }

        CenterRepository::new(self.db).delete(center.id).await?;
        tracing::info!("User {} deleted center {}", user.id, center.id);

        Ok(())
    }

    pub async fn list_mine(&self, owner: &User) -> Result<Vec<Center>, AppError> {
        CenterRepository::new(self.db).get_by_owner(owner.id).await
    }

    /// Public listing; always restricted to published centers.
    pub async fn list_public(
        &self,
        filter: CenterFilter,
        page: PageRequest,
    ) -> Result<Paginated<Center>, AppError> {
        CenterRepository::new(self.db)
            .get_paginated(
                CenterFilter {
                    status: Some(CenterStatus::Published),
                    ..filter
                },
                page,
            )
            .await
    }

    /// Fetches a center as seen by `viewer`.
    ///
    /// Drafts are only visible to their owner and administrators and are reported as
    /// missing to everybody else.
    ///
    /// # Returns
    /// - `Ok((Center, bool))` - The center and whether the viewer may see private details
    /// - `Err(AppError::NotFound)` - Unknown or hidden center
    pub async fn get_visible(
        &self,
        viewer: Option<&User>,
        center_id: i32,
    ) -> Result<(Center, bool), AppError> {
        let center = self.get(center_id).await?;
        let privileged = viewer.is_some_and(|u| u.id == center.owner_id || u.is_admin());

        if !center.is_published() && !privileged {
            return Err(AppError::NotFound(format!("Center {} not found", center_id)));
        }

        Ok((center, privileged))
    }

    pub async fn admin_list(
        &self,
        filter: CenterFilter,
        page: PageRequest,
    ) -> Result<Paginated<Center>, AppError> {
        CenterRepository::new(self.db)
            .get_paginated(filter, page)
            .await
    }

    /// Sets any center's status from the admin panel. Publishing still validates.
    pub async fn admin_set_status(
        &self,
        center_id: i32,
        status: CenterStatus,
    ) -> Result<Center, AppError> {
        let center = self.get(center_id).await?;
        self.change_status(center, status).await
    }

    pub async fn get(&self, center_id: i32) -> Result<Center, AppError> {
        CenterRepository::new(self.db)
            .get_by_id(center_id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Center {} not found", center_id)))
    }

    /// Loads a center the user owns. Administrators may act on any center.
    pub async fn get_owned(&self, user: &User, center_id: i32) -> Result<Center, AppError> {
        let center = self.get(center_id).await?;

        if center.owner_id != user.id && !user.is_admin() {
            return Err(AuthError::AccessDenied(
                user.id,
                format!("center {} is owned by user {}", center.id, center.owner_id),
            )
            .into());
        }

        Ok(center)
    }

    async fn change_status(&self, center: Center, status: CenterStatus) -> Result<Center, AppError> {
        if status == CenterStatus::Published {
            center.profile.validate_publishable()?;
        }
        if center.status == status {
            return Ok(center);
        }

        let repo = CenterRepository::new(self.db);
        repo.set_status(center.id, status).await?;
        tracing::info!("Center {} is now {:?}", center.id, status);

        repo.get_by_id(center.id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Center {} not found", center.id)))
    }

    /// Verifies that facility, sport and city ids exist, collecting every unknown id.
    async fn check_references(&self, profile: &CenterProfile) -> Result<(), AppError> {
        let mut errors = ValidationError::new();

        let known_facilities = FacilityRepository::new(self.db)
            .find_existing_ids(&profile.facility_ids)
            .await?;
        for id in profile
            .facility_ids
            .iter()
            .filter(|id| !known_facilities.contains(id))
        {
            errors.add("facility_ids", format!("unknown facility {}", id));
        }

        let active_sports = SportRepository::new(self.db)
            .find_active_ids(&profile.sport_ids())
            .await?;
        for (i, sport) in profile.sports.iter().enumerate() {
            if !active_sports.contains(&sport.sport_id) {
                errors.add(
                    format!("sports[{i}].sport_id"),
                    format!("unknown or inactive sport {}", sport.sport_id),
                );
            }
        }

        if let Some(city_id) = profile.address.city_id {
            if !LocationRepository::new(self.db).city_exists(city_id).await? {
                errors.add("address.city_id", format!("unknown city {}", city_id));
            }
        }

        Ok(errors.into_result()?)
    }
}
