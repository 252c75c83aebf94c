//! Booking creation, listing, cancellation and expiry of unpaid bookings.

use chrono::{DateTime, Utc};
use entity::sea_orm_active_enums::{BookingStatus, PaymentStatus};
use sea_orm::{DatabaseConnection, DbErr, SqlErr, TransactionTrait};

use crate::server::{
    data::{
        booking::{BookingRepository, NewBooking},
        center::CenterRepository,
        transaction::TransactionRepository,
    },
    error::{validation::ValidationError, AppError},
    model::{
        batch::QuoteParams,
        booking::{generate_booking_ref, Booking, BookingFilter, BookingLine, CreateBookingParams},
        pagination::{PageRequest, Paginated},
        payment::Transaction,
        user::User,
    },
    service::{batch::BatchService, center::CenterService},
};

/// Attempts at drawing an unused booking reference before giving up.
const BOOKING_REF_ATTEMPTS: usize = 3;

pub const PAYMENT_TIMEOUT_REASON: &str = "Payment timed out";

pub struct BookingService<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> BookingService<'a> {
    /// Creates a new BookingService instance.
    ///
    /// # Arguments
    /// - `db` - Reference to the database connection
    ///
    /// # Returns
    /// - `BookingService` - New service instance
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    /// Books a batch for some of the caller's participants.
    ///
    /// The amount comes from the batch fee quote. Seats are counted over every booking on
    /// the batch that is not cancelled. The duplicate check, seat count and insert run in
    /// one transaction holding the batch row lock.
    ///
    /// # Arguments
    /// - `user` - Booking learner
    /// - `params` - Batch, participants and quantity
    /// - `currency` - ISO currency code charged
    ///
    /// # Returns
    /// - `Ok(Booking)` - Pending booking awaiting payment
    /// - `Err(AppError::ValidationErr)` - Batch not bookable, unknown participants or ages
    ///   outside the batch range
    /// - `Err(AppError::Conflict)` - A participant already holds a live booking on the batch,
    ///   or the batch is full
    pub async fn create(
        &self,
        user: &User,
        params: CreateBookingParams,
        currency: &str,
    ) -> Result<Booking, AppError> {
        let today = Utc::now().date_naive();
        let batch = match BatchService::new(self.db).get(params.batch_id).await {
            Ok(batch) => batch,
            Err(AppError::NotFound(_)) => {
                return Err(ValidationError::field("batch_id", "unknown batch").into())
            }
            Err(e) => return Err(e),
        };

        let center_published = CenterRepository::new(self.db)
            .get_by_id(batch.center_id)
            .await?
            .is_some_and(|c| c.is_published());
        if !batch.is_bookable(today) || !center_published {
            return Err(
                ValidationError::field("batch_id", "batch is not open for booking").into(),
            );
        }

        let quote = BatchService::new(self.db)
            .price(
                user,
                &batch,
                &QuoteParams {
                    participant_ids: params.participant_ids.clone(),
                    quantity: params.quantity,
                },
                today,
            )
            .await?;

        let txn = self.db.begin().await?;
        let booking_repo = BookingRepository::new(&txn);
        booking_repo.lock_batch(batch.id).await?;

        let already = booking_repo
            .participants_with_live_booking(batch.id, &params.participant_ids)
            .await?;
        if !already.is_empty() {
            return Err(AppError::Conflict(format!(
                "Participants {:?} already hold a booking for this batch",
                already
            )));
        }

        let taken = booking_repo.seats_taken(batch.id).await?;
        let requested = params.participant_ids.len() as u64;
        let capacity = u64::try_from(batch.capacity).unwrap_or(0);
        if taken + requested > capacity {
            return Err(AppError::Conflict(format!(
                "Only {} seats left in this batch",
                capacity.saturating_sub(taken)
            )));
        }

        let lines: Vec<BookingLine> = quote
            .lines
            .iter()
            .map(|l| BookingLine {
                participant_id: l.participant_id,
                amount: l.amount,
            })
            .collect();

        let mut attempt = 0;
        let booking = loop {
            attempt += 1;
            // Savepoint, so a reference collision does not abort the outer transaction.
            let savepoint = txn.begin().await?;
            let result = BookingRepository::new(&savepoint)
                .create(NewBooking {
                    booking_ref: generate_booking_ref(),
                    user_id: user.id,
                    batch_id: batch.id,
                    center_id: batch.center_id,
                    quantity: quote.quantity,
                    amount: quote.total,
                    currency: currency.to_string(),
                    lines: lines.clone(),
                })
                .await;

            match result {
                Ok(booking) => {
                    savepoint.commit().await?;
                    break booking;
                }
                Err(err) if is_unique_violation(&err) && attempt < BOOKING_REF_ATTEMPTS => {
                    tracing::warn!("Booking reference collision, retrying");
                }
                Err(err) => return Err(err.into()),
            }
        };
        txn.commit().await?;

        tracing::info!(
            "User {} booked batch {} as {} for {} {}",
            user.id,
            batch.id,
            booking.booking_ref,
            booking.amount,
            booking.currency
        );

        Ok(booking)
    }

    pub async fn list_for_user(
        &self,
        user: &User,
        page: PageRequest,
    ) -> Result<Paginated<Booking>, AppError> {
        Ok(BookingRepository::new(self.db)
            .get_paginated(
                BookingFilter {
                    user_id: Some(user.id),
                    ..Default::default()
                },
                page,
            )
            .await?)
    }

    /// Fetches one of the caller's bookings. Other users' bookings are reported missing.
    pub async fn get_for_user(&self, user: &User, booking_id: i32) -> Result<Booking, AppError> {
        let booking = self.get(booking_id).await?;
        if booking.user_id != user.id {
            return Err(AppError::NotFound(format!("Booking {} not found", booking_id)));
        }
        Ok(booking)
    }

    /// Bookings on a center the caller owns.
    pub async fn list_for_center(
        &self,
        user: &User,
        center_id: i32,
        page: PageRequest,
    ) -> Result<Paginated<Booking>, AppError> {
        let center = CenterService::new(self.db).get_owned(user, center_id).await?;

        Ok(BookingRepository::new(self.db)
            .get_paginated(
                BookingFilter {
                    center_id: Some(center.id),
                    ..Default::default()
                },
                page,
            )
            .await?)
    }

    pub async fn admin_list(
        &self,
        filter: BookingFilter,
        page: PageRequest,
    ) -> Result<Paginated<Booking>, AppError> {
        Ok(BookingRepository::new(self.db)
            .get_paginated(filter, page)
            .await?)
    }

    /// Cancels one of the caller's unpaid bookings.
    ///
    /// # Returns
    /// - `Ok(Booking)` - Cancelled booking
    /// - `Err(PaymentError::InvalidTransition)` - Payment already succeeded or closed
    /// - `Err(AppError::Conflict)` - Payment moved while the cancellation was applied
    pub async fn cancel(&self, user: &User, booking_id: i32) -> Result<Booking, AppError> {
        let mut booking = self.get_for_user(user, booking_id).await?;
        let from = booking.payment.status;

        booking.move_payment(PaymentStatus::Cancelled)?;
        booking.status = BookingStatus::Cancelled;
        if !BookingRepository::new(self.db).save_state(&booking, from).await? {
            return Err(changed_concurrently(&booking));
        }
        tracing::info!("User {} cancelled booking {}", user.id, booking.booking_ref);

        Ok(booking)
    }

    /// Cancels pending bookings whose payment has not completed since `cutoff`.
    ///
    /// # Returns
    /// - `Ok(u64)` - Number of bookings cancelled
    pub async fn expire_stale(&self, cutoff: DateTime<Utc>) -> Result<u64, AppError> {
        let repo = BookingRepository::new(self.db);
        let mut expired = 0;

        for mut booking in repo.find_stale(cutoff).await? {
            let from = booking.payment.status;
            if let Err(e) = booking.move_payment(PaymentStatus::Cancelled) {
                tracing::warn!("Skipping expiry of {}: {}", booking.booking_ref, e);
                continue;
            }
            booking.status = BookingStatus::Cancelled;
            booking.payment.failure_reason = Some(PAYMENT_TIMEOUT_REASON.to_string());
            if !repo.save_state(&booking, from).await? {
                tracing::debug!("Booking {} settled before expiry", booking.booking_ref);
                continue;
            }
            expired += 1;
        }

        Ok(expired)
    }

    /// Payment ledger entries of the caller, newest first.
    pub async fn transactions(
        &self,
        user: &User,
        page: PageRequest,
    ) -> Result<Paginated<Transaction>, AppError> {
        Ok(TransactionRepository::new(self.db)
            .get_paginated(Some(user.id), page)
            .await?)
    }

    pub async fn admin_transactions(
        &self,
        page: PageRequest,
    ) -> Result<Paginated<Transaction>, AppError> {
        Ok(TransactionRepository::new(self.db)
            .get_paginated(None, page)
            .await?)
    }

    pub async fn get(&self, booking_id: i32) -> Result<Booking, AppError> {
        BookingRepository::new(self.db)
            .get_by_id(booking_id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Booking {} not found", booking_id)))
    }
}

/// Reported when a conditional state write finds the payment already moved.
pub(crate) fn changed_concurrently(booking: &Booking) -> AppError {
    AppError::Conflict(format!(
        "Booking {} was updated concurrently, reload and retry",
        booking.booking_ref
    ))
}

fn is_unique_violation(err: &DbErr) -> bool {
    matches!(err.sql_err(), Some(SqlErr::UniqueConstraintViolation(_)))
}
