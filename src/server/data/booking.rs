//! Booking repository.
//!
//! Bookings are stored as a `booking` row carrying the payment sub-document in columns,
//! plus one `booking_participant` row per participant with its quoted amount.

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use entity::sea_orm_active_enums::{BookingStatus, PaymentStatus};
use sea_orm::{
    sea_query::Expr, ActiveModelTrait, ActiveValue, ColumnTrait, ConnectionTrait,
    DatabaseConnection, DbErr, EntityTrait, Iterable, PaginatorTrait, QueryFilter, QueryOrder,
    QuerySelect,
};

use crate::server::model::{
    booking::{Booking, BookingFilter, BookingLine},
    pagination::{PageRequest, Paginated},
};

/// Booking statuses that still hold seats and block participant or center deletion.
const ACTIVE_STATUSES: [BookingStatus; 2] = [BookingStatus::Pending, BookingStatus::Confirmed];

/// Payment statuses of a booking that still counts as live.
const LIVE_PAYMENT_STATUSES: [PaymentStatus; 3] = [
    PaymentStatus::Pending,
    PaymentStatus::Processing,
    PaymentStatus::Success,
];

/// Booking to insert.
#[derive(Debug, Clone)]
pub struct NewBooking {
    pub booking_ref: String,
    pub user_id: i32,
    pub batch_id: i32,
    pub center_id: i32,
    pub quantity: i32,
    pub amount: i64,
    pub currency: String,
    pub lines: Vec<BookingLine>,
}

/// Works on a plain connection or inside a `DatabaseTransaction`.
pub struct BookingRepository<'a, C: ConnectionTrait = DatabaseConnection> {
    db: &'a C,
}

impl<'a, C: ConnectionTrait> BookingRepository<'a, C> {
    pub fn new(db: &'a C) -> Self {
        Self { db }
    }

    /// Takes the write lock on the batch row with a no-op update.
    ///
    /// Run first inside a transaction so seat counting and the insert that follows are
    /// serialized against other bookings of the same batch.
    pub async fn lock_batch(&self, batch_id: i32) -> Result<(), DbErr> {
        entity::prelude::Batch::update_many()
            .col_expr(
                entity::batch::Column::Capacity,
                Expr::col(entity::batch::Column::Capacity).into(),
            )
            .filter(entity::batch::Column::Id.eq(batch_id))
            .exec(self.db)
            .await?;
        Ok(())
    }

    /// Inserts a pending booking and its participant lines.
    ///
    /// # Returns
    /// - `Ok(Booking)` - Created booking with payment status `pending`
    /// - `Err(DbErr)` - Database error, including a booking reference collision
    pub async fn create(&self, booking: NewBooking) -> Result<Booking, DbErr> {
        let now = Utc::now();
        let entity = entity::booking::ActiveModel {
            booking_ref: ActiveValue::Set(booking.booking_ref),
            user_id: ActiveValue::Set(booking.user_id),
            batch_id: ActiveValue::Set(booking.batch_id),
            center_id: ActiveValue::Set(booking.center_id),
            quantity: ActiveValue::Set(booking.quantity),
            amount: ActiveValue::Set(booking.amount),
            currency: ActiveValue::Set(booking.currency),
            status: ActiveValue::Set(BookingStatus::Pending),
            payment_status: ActiveValue::Set(PaymentStatus::Pending),
            gateway_order_id: ActiveValue::Set(None),
            gateway_payment_id: ActiveValue::Set(None),
            gateway_signature: ActiveValue::Set(None),
            failure_reason: ActiveValue::Set(None),
            paid_at: ActiveValue::Set(None),
            created_at: ActiveValue::Set(now),
            updated_at: ActiveValue::Set(now),
            ..Default::default()
        }
        .insert(self.db)
        .await?;

        let mut lines = Vec::with_capacity(booking.lines.len());
        for line in booking.lines {
            let row = entity::booking_participant::ActiveModel {
                booking_id: ActiveValue::Set(entity.id),
                participant_id: ActiveValue::Set(line.participant_id),
                amount: ActiveValue::Set(line.amount),
                ..Default::default()
            }
            .insert(self.db)
            .await?;
            lines.push(row);
        }

        Ok(Booking::from_entity(entity, lines))
    }

    pub async fn get_by_id(&self, id: i32) -> Result<Option<Booking>, DbErr> {
        let Some(entity) = entity::prelude::Booking::find_by_id(id).one(self.db).await? else {
            return Ok(None);
        };
        Ok(Some(self.with_lines(entity).await?))
    }

    pub async fn find_by_order_id(&self, order_id: &str) -> Result<Option<Booking>, DbErr> {
        let Some(entity) = entity::prelude::Booking::find()
            .filter(entity::booking::Column::GatewayOrderId.eq(order_id))
            .one(self.db)
            .await?
        else {
            return Ok(None);
        };
        Ok(Some(self.with_lines(entity).await?))
    }

    pub async fn find_by_payment_id(&self, payment_id: &str) -> Result<Option<Booking>, DbErr> {
        let Some(entity) = entity::prelude::Booking::find()
            .filter(entity::booking::Column::GatewayPaymentId.eq(payment_id))
            .one(self.db)
            .await?
        else {
            return Ok(None);
        };
        Ok(Some(self.with_lines(entity).await?))
    }

    async fn with_lines(&self, entity: entity::booking::Model) -> Result<Booking, DbErr> {
        let lines = entity::prelude::BookingParticipant::find()
            .filter(entity::booking_participant::Column::BookingId.eq(entity.id))
            .order_by_asc(entity::booking_participant::Column::Id)
            .all(self.db)
            .await?;
        Ok(Booking::from_entity(entity, lines))
    }

    /// Lists bookings newest first matching `filter`.
    pub async fn get_paginated(
        &self,
        filter: BookingFilter,
        page: PageRequest,
    ) -> Result<Paginated<Booking>, DbErr> {
        let mut query = entity::prelude::Booking::find();
        if let Some(user_id) = filter.user_id {
            query = query.filter(entity::booking::Column::UserId.eq(user_id));
        }
        if let Some(center_id) = filter.center_id {
            query = query.filter(entity::booking::Column::CenterId.eq(center_id));
        }
        if let Some(status) = filter.status {
            query = query.filter(entity::booking::Column::Status.eq(status));
        }

        let paginator = query
            .order_by_desc(entity::booking::Column::CreatedAt)
            .order_by_desc(entity::booking::Column::Id)
            .paginate(self.db, page.per_page);

        let total = paginator.num_items().await?;
        let entities = paginator.fetch_page(page.page).await?;

        let ids: Vec<i32> = entities.iter().map(|e| e.id).collect();
        let mut lines_by_booking: HashMap<i32, Vec<entity::booking_participant::Model>> =
            HashMap::new();
        if !ids.is_empty() {
            let rows = entity::prelude::BookingParticipant::find()
                .filter(entity::booking_participant::Column::BookingId.is_in(ids))
                .order_by_asc(entity::booking_participant::Column::Id)
                .all(self.db)
                .await?;
            for row in rows {
                lines_by_booking.entry(row.booking_id).or_default().push(row);
            }
        }

        let bookings = entities
            .into_iter()
            .map(|entity| {
                let lines = lines_by_booking.remove(&entity.id).unwrap_or_default();
                Booking::from_entity(entity, lines)
            })
            .collect();

        Ok(Paginated::new(bookings, total, page))
    }

    /// Persists booking status and the payment sub-document of `booking`, provided the
    /// stored payment status is still `from`.
    ///
    /// # Returns
    /// - `Ok(true)` - Row updated
    /// - `Ok(false)` - Another writer moved the payment first; nothing was written
    pub async fn save_state(&self, booking: &Booking, from: PaymentStatus) -> Result<bool, DbErr> {
        let payment = &booking.payment;
        let result = entity::prelude::Booking::update_many()
            .set(entity::booking::ActiveModel {
                status: ActiveValue::Set(booking.status),
                payment_status: ActiveValue::Set(payment.status),
                gateway_order_id: ActiveValue::Set(payment.gateway_order_id.clone()),
                gateway_payment_id: ActiveValue::Set(payment.gateway_payment_id.clone()),
                gateway_signature: ActiveValue::Set(payment.gateway_signature.clone()),
                failure_reason: ActiveValue::Set(payment.failure_reason.clone()),
                paid_at: ActiveValue::Set(payment.paid_at),
                updated_at: ActiveValue::Set(Utc::now()),
                ..Default::default()
            })
            .filter(entity::booking::Column::Id.eq(booking.id))
            .filter(entity::booking::Column::PaymentStatus.eq(from))
            .exec(self.db)
            .await?;
        Ok(result.rows_affected == 1)
    }

    async fn booking_ids(
        &self,
        column: entity::booking::Column,
        value: i32,
        statuses: &[BookingStatus],
    ) -> Result<Vec<i32>, DbErr> {
        let mut query = entity::prelude::Booking::find()
            .select_only()
            .column(entity::booking::Column::Id)
            .filter(column.eq(value));
        if !statuses.is_empty() {
            query = query.filter(entity::booking::Column::Status.is_in(statuses.iter().copied()));
        }
        query.into_tuple().all(self.db).await
    }

    /// Participants holding a seat in the batch: every line of a booking that is not
    /// cancelled.
    pub async fn seats_taken(&self, batch_id: i32) -> Result<u64, DbErr> {
        let statuses: Vec<BookingStatus> = BookingStatus::iter()
            .filter(|s| *s != BookingStatus::Cancelled)
            .collect();
        let ids = self
            .booking_ids(entity::booking::Column::BatchId, batch_id, &statuses)
            .await?;
        if ids.is_empty() {
            return Ok(0);
        }

        entity::prelude::BookingParticipant::find()
            .filter(entity::booking_participant::Column::BookingId.is_in(ids))
            .count(self.db)
            .await
    }

    /// Ids from `participant_ids` already on a live booking for the batch.
    pub async fn participants_with_live_booking(
        &self,
        batch_id: i32,
        participant_ids: &[i32],
    ) -> Result<Vec<i32>, DbErr> {
        let booking_ids: Vec<i32> = entity::prelude::Booking::find()
            .select_only()
            .column(entity::booking::Column::Id)
            .filter(entity::booking::Column::BatchId.eq(batch_id))
            .filter(entity::booking::Column::Status.ne(BookingStatus::Cancelled))
            .filter(entity::booking::Column::PaymentStatus.is_in(LIVE_PAYMENT_STATUSES))
            .into_tuple()
            .all(self.db)
            .await?;
        if booking_ids.is_empty() || participant_ids.is_empty() {
            return Ok(Vec::new());
        }

        let mut ids: Vec<i32> = entity::prelude::BookingParticipant::find()
            .select_only()
            .column(entity::booking_participant::Column::ParticipantId)
            .filter(entity::booking_participant::Column::BookingId.is_in(booking_ids))
            .filter(
                entity::booking_participant::Column::ParticipantId
                    .is_in(participant_ids.iter().copied()),
            )
            .into_tuple()
            .all(self.db)
            .await?;
        ids.sort_unstable();
        ids.dedup();
        Ok(ids)
    }

    /// Whether the participant appears on any booking, restricted to `statuses` when
    /// non-empty.
    pub async fn participant_has_booking(
        &self,
        participant_id: i32,
        statuses: &[BookingStatus],
    ) -> Result<bool, DbErr> {
        let booking_ids: Vec<i32> = entity::prelude::BookingParticipant::find()
            .select_only()
            .column(entity::booking_participant::Column::BookingId)
            .filter(entity::booking_participant::Column::ParticipantId.eq(participant_id))
            .into_tuple()
            .all(self.db)
            .await?;
        if booking_ids.is_empty() {
            return Ok(false);
        }

        let mut query = entity::prelude::Booking::find()
            .filter(entity::booking::Column::Id.is_in(booking_ids));
        if !statuses.is_empty() {
            query = query.filter(entity::booking::Column::Status.is_in(statuses.iter().copied()));
        }
        Ok(query.count(self.db).await? > 0)
    }

    pub async fn participant_has_active_booking(&self, participant_id: i32) -> Result<bool, DbErr> {
        self.participant_has_booking(participant_id, &ACTIVE_STATUSES)
            .await
    }

    /// Whether the center has bookings, restricted to `statuses` when non-empty.
    pub async fn center_has_booking(
        &self,
        center_id: i32,
        statuses: &[BookingStatus],
    ) -> Result<bool, DbErr> {
        let ids = self
            .booking_ids(entity::booking::Column::CenterId, center_id, statuses)
            .await?;
        Ok(!ids.is_empty())
    }

    pub async fn center_has_active_booking(&self, center_id: i32) -> Result<bool, DbErr> {
        self.center_has_booking(center_id, &ACTIVE_STATUSES).await
    }

    /// Pending bookings whose payment has been pending or processing since before `cutoff`.
    pub async fn find_stale(&self, cutoff: DateTime<Utc>) -> Result<Vec<Booking>, DbErr> {
        let entities = entity::prelude::Booking::find()
            .filter(entity::booking::Column::Status.eq(BookingStatus::Pending))
            .filter(
                entity::booking::Column::PaymentStatus
                    .is_in([PaymentStatus::Pending, PaymentStatus::Processing]),
            )
            .filter(entity::booking::Column::UpdatedAt.lt(cutoff))
            .order_by_asc(entity::booking::Column::Id)
            .all(self.db)
            .await?;

        let mut bookings = Vec::with_capacity(entities.len());
        for entity in entities {
            bookings.push(self.with_lines(entity).await?);
        }
        Ok(bookings)
    }

    pub async fn count_by_status(&self) -> Result<Vec<(BookingStatus, u64)>, DbErr> {
        let mut counts = Vec::new();
        for status in BookingStatus::iter() {
            let count = entity::prelude::Booking::find()
                .filter(entity::booking::Column::Status.eq(status))
                .count(self.db)
                .await?;
            counts.push((status, count));
        }
        Ok(counts)
    }

    pub async fn count_by_payment_status(&self) -> Result<Vec<(PaymentStatus, u64)>, DbErr> {
        let mut counts = Vec::new();
        for status in PaymentStatus::iter() {
            let count = entity::prelude::Booking::find()
                .filter(entity::booking::Column::PaymentStatus.eq(status))
                .count(self.db)
                .await?;
            counts.push((status, count));
        }
        Ok(counts)
    }

    pub async fn count_created_since(&self, since: DateTime<Utc>) -> Result<u64, DbErr> {
        entity::prelude::Booking::find()
            .filter(entity::booking::Column::CreatedAt.gte(since))
            .count(self.db)
            .await
    }
}
