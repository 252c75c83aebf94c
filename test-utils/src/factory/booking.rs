//! Booking factory.

use crate::factory::helpers::next_id;
use chrono::Utc;
use entity::sea_orm_active_enums::{BookingStatus, PaymentStatus};
use sea_orm::{ActiveModelTrait, ActiveValue, DatabaseConnection, DbErr};

/// Factory for bookings. Each participant line is charged `line_amount`.
pub struct BookingFactory<'a> {
    db: &'a DatabaseConnection,
    user_id: i32,
    batch: &'a entity::batch::Model,
    participant_ids: Vec<i32>,
    line_amount: i64,
    status: BookingStatus,
    payment_status: PaymentStatus,
    gateway_order_id: Option<String>,
    created_at: chrono::DateTime<Utc>,
}

impl<'a> BookingFactory<'a> {
    pub fn new(db: &'a DatabaseConnection, user_id: i32, batch: &'a entity::batch::Model) -> Self {
        Self {
            db,
            user_id,
            batch,
            participant_ids: Vec::new(),
            line_amount: 150000,
            status: BookingStatus::Pending,
            payment_status: PaymentStatus::Pending,
            gateway_order_id: None,
            created_at: Utc::now(),
        }
    }

    pub fn participant(mut self, participant_id: i32) -> Self {
        self.participant_ids.push(participant_id);
        self
    }

    pub fn status(mut self, status: BookingStatus, payment_status: PaymentStatus) -> Self {
        self.status = status;
        self.payment_status = payment_status;
        self
    }

    pub fn gateway_order_id(mut self, order_id: impl Into<String>) -> Self {
        self.gateway_order_id = Some(order_id.into());
        self
    }

    pub fn created_at(mut self, created_at: chrono::DateTime<Utc>) -> Self {
        self.created_at = created_at;
        self
    }

    pub async fn build(self) -> Result<entity::booking::Model, DbErr> {
        let quantity = self.participant_ids.len().max(1) as i64;
        let booking = entity::booking::ActiveModel {
            booking_ref: ActiveValue::Set(format!("BK{:010}", next_id())),
            user_id: ActiveValue::Set(self.user_id),
            batch_id: ActiveValue::Set(self.batch.id),
            center_id: ActiveValue::Set(self.batch.center_id),
            quantity: ActiveValue::Set(1),
            amount: ActiveValue::Set(self.line_amount * quantity),
            currency: ActiveValue::Set("INR".to_string()),
            status: ActiveValue::Set(self.status),
            payment_status: ActiveValue::Set(self.payment_status),
            gateway_order_id: ActiveValue::Set(self.gateway_order_id),
            gateway_payment_id: ActiveValue::Set(None),
            gateway_signature: ActiveValue::Set(None),
            failure_reason: ActiveValue::Set(None),
            paid_at: ActiveValue::Set(None),
            created_at: ActiveValue::Set(self.created_at),
            updated_at: ActiveValue::Set(self.created_at),
            ..Default::default()
        }
        .insert(self.db)
        .await?;

        for participant_id in self.participant_ids {
            entity::booking_participant::ActiveModel {
                booking_id: ActiveValue::Set(booking.id),
                participant_id: ActiveValue::Set(participant_id),
                amount: ActiveValue::Set(self.line_amount),
                ..Default::default()
            }
            .insert(self.db)
            .await?;
        }

        Ok(booking)
    }
}

/// Creates a pending booking of one participant on `batch`.
pub async fn create_booking(
    db: &DatabaseConnection,
    user_id: i32,
    batch: &entity::batch::Model,
    participant_id: i32,
) -> Result<entity::booking::Model, DbErr> {
    BookingFactory::new(db, user_id, batch)
        .participant(participant_id)
        .build()
        .await
}
