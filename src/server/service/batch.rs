//! Batches offered by coaching centers and their fee quotes.

use chrono::{NaiveDate, Utc};
use sea_orm::DatabaseConnection;

use crate::server::{
    data::{
        batch::BatchRepository, booking::BookingRepository, participant::ParticipantRepository,
    },
    error::{validation::ValidationError, AppError},
    model::{
        batch::{Batch, BatchParams, QuoteParams},
        fee::Quote,
        user::User,
    },
    service::center::CenterService,
};

/// Service for batch management and pricing.
pub struct BatchService<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> BatchService<'a> {
    /// Creates a new BatchService instance.
    ///
    /// # Arguments
    /// - `db` - Reference to the database connection
    ///
    /// # Returns
    /// - `BatchService` - New service instance
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    /// Adds a batch to a center the caller owns.
    ///
    /// # Returns
    /// - `Ok(Batch)` - Created batch, active
    /// - `Err(AppError::ValidationErr)` - The center does not offer `sport_id`
    /// - `Err(AuthError::AccessDenied)` - Caller does not own the center
    pub async fn create(
        &self,
        user: &User,
        center_id: i32,
        params: BatchParams,
    ) -> Result<Batch, AppError> {
        let center = CenterService::new(self.db).get_owned(user, center_id).await?;
        if !center.offers_sport(params.sport_id) {
            return Err(ValidationError::field(
                "sport_id",
                format!("center {} does not offer sport {}", center.id, params.sport_id),
            )
            .into());
        }

        let batch = BatchRepository::new(self.db)
            .create(center.id, params)
            .await?;
        tracing::info!("Created batch {} for center {}", batch.id, center.id);

        Ok(batch)
    }

    /// Replaces a batch's settings.
    ///
    /// # Returns
    /// - `Ok(Batch)` - Updated batch
    /// - `Err(AppError::ValidationErr)` - Sport not offered, or capacity below the seats
    ///   already booked
    pub async fn update(
        &self,
        user: &User,
        batch_id: i32,
        params: BatchParams,
    ) -> Result<Batch, AppError> {
        let batch = self.get(batch_id).await?;
        let center = CenterService::new(self.db)
            .get_owned(user, batch.center_id)
            .await?;

        let mut errors = ValidationError::new();
        if !center.offers_sport(params.sport_id) {
            errors.add(
                "sport_id",
                format!("center {} does not offer sport {}", center.id, params.sport_id),
            );
        }
        let taken = BookingRepository::new(self.db).seats_taken(batch.id).await?;
        if u64::try_from(params.capacity).unwrap_or(0) < taken {
            errors.add(
                "capacity",
                format!("{} seats are already booked", taken),
            );
        }
        errors.into_result()?;

        BatchRepository::new(self.db)
            .update(batch.id, params)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Batch {} not found", batch_id)))
    }

    /// Deactivates a batch. Existing bookings are kept; no new ones can be made.
    pub async fn deactivate(&self, user: &User, batch_id: i32) -> Result<(), AppError> {
        let batch = self.get(batch_id).await?;
        CenterService::new(self.db)
            .get_owned(user, batch.center_id)
            .await?;

        BatchRepository::new(self.db)
            .set_active(batch.id, false)
            .await?;
        tracing::info!("User {} deactivated batch {}", user.id, batch.id);

        Ok(())
    }

    /// Batches of a visible center. Inactive batches are only listed for the owner and
    /// administrators.
    pub async fn list_for_center(
        &self,
        viewer: Option<&User>,
        center_id: i32,
    ) -> Result<Vec<Batch>, AppError> {
        let (_, privileged) = CenterService::new(self.db)
            .get_visible(viewer, center_id)
            .await?;

        BatchRepository::new(self.db)
            .get_by_center(center_id, !privileged)
            .await
    }

    /// Fetches a batch with the same visibility rules as [`Self::list_for_center`].
    pub async fn get_visible(&self, viewer: Option<&User>, batch_id: i32) -> Result<Batch, AppError> {
        let batch = self.get(batch_id).await?;
        let hidden = || AppError::NotFound(format!("Batch {} not found", batch_id));

        let (_, privileged) = match CenterService::new(self.db)
            .get_visible(viewer, batch.center_id)
            .await
        {
            Ok(visible) => visible,
            Err(AppError::NotFound(_)) => return Err(hidden()),
            Err(e) => return Err(e),
        };
        if !batch.is_active && !privileged {
            return Err(hidden());
        }

        Ok(batch)
    }

    pub async fn get(&self, batch_id: i32) -> Result<Batch, AppError> {
        BatchRepository::new(self.db)
            .get_by_id(batch_id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Batch {} not found", batch_id)))
    }

    /// Prices a batch for some of the caller's participants.
    ///
    /// # Returns
    /// - `Ok((Batch, Quote))` - The batch and its quote
    /// - `Err(AppError::ValidationErr)` - Unknown participants, ages outside the batch range
    ///   or no matching fee tier
    pub async fn quote(
        &self,
        user: &User,
        batch_id: i32,
        params: &QuoteParams,
    ) -> Result<(Batch, Quote), AppError> {
        let batch = self.get(batch_id).await?;
        let quote = self
            .price(user, &batch, params, Utc::now().date_naive())
            .await?;

        Ok((batch, quote))
    }

    /// Quotes `batch` for `params`, measuring ages on the batch's reference date.
    pub(crate) async fn price(
        &self,
        user: &User,
        batch: &Batch,
        params: &QuoteParams,
        today: NaiveDate,
    ) -> Result<Quote, AppError> {
        let participants = ParticipantRepository::new(self.db)
            .find_many_for_user(user.id, &params.participant_ids)
            .await?;

        let mut errors = ValidationError::new();
        for id in &params.participant_ids {
            if !participants.iter().any(|p| p.id == *id) {
                errors.add("participant_ids", format!("unknown participant {}", id));
            }
        }

        let reference = batch.age_reference_date(today);
        let mut ages = Vec::with_capacity(participants.len());
        for participant in &participants {
            let age = participant.age_on(reference);
            if !batch.accepts_age(age) {
                errors.add(
                    "participant_ids",
                    format!(
                        "participant {} is {} but the batch takes ages {} to {}",
                        participant.id, age, batch.age_min, batch.age_max
                    ),
                );
            }
            ages.push((participant.id, age));
        }
        errors.into_result()?;

        Ok(batch
            .fee
            .quote(&ages, params.quantity, batch.schedule.session_minutes())?)
    }
}
