//! Participants: the people a learner books sessions for.

use entity::sea_orm_active_enums::{BookingStatus, ParticipantRelation};
use sea_orm::{DatabaseConnection, Iterable};

use crate::server::{
    data::{booking::BookingRepository, participant::ParticipantRepository},
    error::AppError,
    model::{
        participant::{Participant, ParticipantParams},
        user::User,
    },
};

pub struct ParticipantService<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> ParticipantService<'a> {
    /// Creates a new ParticipantService instance.
    ///
    /// # Arguments
    /// - `db` - Reference to the database connection
    ///
    /// # Returns
    /// - `ParticipantService` - New service instance
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    pub async fn list(&self, user: &User) -> Result<Vec<Participant>, AppError> {
        Ok(ParticipantRepository::new(self.db)
            .get_for_user(user.id)
            .await?)
    }

    /// Adds a participant for the caller.
    ///
    /// # Returns
    /// - `Ok(Participant)` - Created participant
    /// - `Err(AppError::Conflict)` - A `self` participant already exists
    pub async fn create(
        &self,
        user: &User,
        params: ParticipantParams,
    ) -> Result<Participant, AppError> {
        self.check_single_self(user, &params, None).await?;

        let participant = ParticipantRepository::new(self.db)
            .create(user.id, params)
            .await?;
        tracing::debug!("User {} added participant {}", user.id, participant.id);

        Ok(participant)
    }

    /// Replaces one of the caller's participants.
    ///
    /// # Returns
    /// - `Ok(Participant)` - Updated participant
    /// - `Err(AppError::NotFound)` - Unknown or foreign participant
    /// - `Err(AppError::Conflict)` - Would create a second `self` participant
    pub async fn update(
        &self,
        user: &User,
        id: i32,
        params: ParticipantParams,
    ) -> Result<Participant, AppError> {
        self.check_single_self(user, &params, Some(id)).await?;

        ParticipantRepository::new(self.db)
            .update(user.id, id, params)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Participant {} not found", id)))
    }

    /// Deletes one of the caller's participants.
    ///
    /// Participants that appear on any booking are kept so booking history stays intact.
    ///
    /// # Returns
    /// - `Ok(())` - Deleted
    /// - `Err(AppError::NotFound)` - Unknown or foreign participant
    /// - `Err(AppError::Conflict)` - Participant is on a booking
    pub async fn delete(&self, user: &User, id: i32) -> Result<(), AppError> {
        let repo = ParticipantRepository::new(self.db);
        if repo.find_for_user(user.id, id).await?.is_none() {
            return Err(AppError::NotFound(format!("Participant {} not found", id)));
        }

        let booking_repo = BookingRepository::new(self.db);
        if booking_repo.participant_has_active_booking(id).await? {
            return Err(AppError::Conflict(
                "Participant has an active booking".to_string(),
            ));
        }
        let all: Vec<BookingStatus> = BookingStatus::iter().collect();
        if booking_repo.participant_has_booking(id, &all).await? {
            return Err(AppError::Conflict(
                "Participant appears in booking history and cannot be deleted".to_string(),
            ));
        }

        repo.delete(user.id, id)
            .await
            .map_err(|e| AppError::on_constraint(e, "Participant is referenced by a booking"))?;

        Ok(())
    }

    async fn check_single_self(
        &self,
        user: &User,
        params: &ParticipantParams,
        except: Option<i32>,
    ) -> Result<(), AppError> {
        if params.relation != ParticipantRelation::Myself {
            return Ok(());
        }

        let existing = ParticipantRepository::new(self.db)
            .count_self(user.id, except)
            .await?;
        if existing > 0 {
            return Err(AppError::Conflict(
                "A participant for yourself already exists".to_string(),
            ));
        }

        Ok(())
    }
}
