//! Booking domain model and parameters.

use std::collections::HashSet;

use chrono::{DateTime, Utc};
use entity::sea_orm_active_enums::{BookingStatus, PaymentStatus};
use rand::Rng;

use crate::{
    model::booking::{
        BookingDto, BookingParticipantDto, BookingQueryDto, CreateBookingDto, PaymentDto,
        VerifyPaymentDto,
    },
    server::{
        error::{payment::PaymentError, validation::ValidationError},
        model::{fee::MAX_QUOTE_QUANTITY, pagination::PageRequest, payment::ensure_transition},
        util::{
            parse::{enum_str, parse_enum},
            validation::non_blank,
        },
    },
};

const BOOKING_REF_PREFIX: &str = "BK";
const BOOKING_REF_LENGTH: usize = 10;

/// Payment sub-document of a booking.
#[derive(Debug, Clone, PartialEq)]
pub struct Payment {
    pub status: PaymentStatus,
    pub gateway_order_id: Option<String>,
    pub gateway_payment_id: Option<String>,
    pub gateway_signature: Option<String>,
    pub failure_reason: Option<String>,
    pub paid_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BookingLine {
    pub participant_id: i32,
    pub amount: i64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Booking {
    pub id: i32,
    pub booking_ref: String,
    pub user_id: i32,
    pub batch_id: i32,
    pub center_id: i32,
    pub quantity: i32,
    pub amount: i64,
    pub currency: String,
    pub status: BookingStatus,
    pub payment: Payment,
    pub participants: Vec<BookingLine>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Booking {
    pub fn from_entity(
        entity: entity::booking::Model,
        lines: Vec<entity::booking_participant::Model>,
    ) -> Self {
        Self {
            id: entity.id,
            booking_ref: entity.booking_ref,
            user_id: entity.user_id,
            batch_id: entity.batch_id,
            center_id: entity.center_id,
            quantity: entity.quantity,
            amount: entity.amount,
            currency: entity.currency,
            status: entity.status,
            payment: Payment {
                status: entity.payment_status,
                gateway_order_id: entity.gateway_order_id,
                gateway_payment_id: entity.gateway_payment_id,
                gateway_signature: entity.gateway_signature,
                failure_reason: entity.failure_reason,
                paid_at: entity.paid_at,
            },
            participants: lines
                .into_iter()
                .map(|l| BookingLine {
                    participant_id: l.participant_id,
                    amount: l.amount,
                })
                .collect(),
            created_at: entity.created_at,
            updated_at: entity.updated_at,
        }
    }

    /// Moves the payment to `to` if the status machine allows it.
    pub fn move_payment(&mut self, to: PaymentStatus) -> Result<(), PaymentError> {
        ensure_transition(self.payment.status, to)?;
        self.payment.status = to;
        Ok(())
    }

    pub fn into_dto(self) -> BookingDto {
        BookingDto {
            id: self.id,
            booking_ref: self.booking_ref,
            user_id: self.user_id,
            batch_id: self.batch_id,
            center_id: self.center_id,
            quantity: self.quantity,
            amount: self.amount,
            currency: self.currency,
            status: enum_str(&self.status),
            payment: PaymentDto {
                status: enum_str(&self.payment.status),
                gateway_order_id: self.payment.gateway_order_id,
                gateway_payment_id: self.payment.gateway_payment_id,
                failure_reason: self.payment.failure_reason,
                paid_at: self.payment.paid_at,
            },
            participants: self
                .participants
                .into_iter()
                .map(|l| BookingParticipantDto {
                    participant_id: l.participant_id,
                    amount: l.amount,
                })
                .collect(),
            created_at: self.created_at,
            updated_at: self.updated_at,
        }
    }
}

/// Generates a booking reference: `BK` followed by 10 uppercase alphanumerics.
pub fn generate_booking_ref() -> String {
    const CHARSET: &[u8] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZ0123456789";

    let mut rng = rand::rng();
    let suffix: String = (0..BOOKING_REF_LENGTH)
        .map(|_| CHARSET[rng.random_range(0..CHARSET.len())] as char)
        .collect();

    format!("{BOOKING_REF_PREFIX}{suffix}")
}

/// Validated booking request.
#[derive(Debug, Clone, PartialEq)]
pub struct CreateBookingParams {
    pub batch_id: i32,
    pub participant_ids: Vec<i32>,
    pub quantity: i32,
}

impl CreateBookingParams {
    pub fn from_dto(dto: CreateBookingDto) -> Result<Self, ValidationError> {
        let mut errors = ValidationError::new();

        errors.require("batch_id", &dto.batch_id);
        if dto.participant_ids.is_empty() {
            errors.add("participant_ids", "at least one participant is required");
        }
        let mut seen = HashSet::new();
        if !dto.participant_ids.iter().all(|id| seen.insert(*id)) {
            errors.add("participant_ids", "participants must be unique");
        }
        let quantity = dto.quantity.unwrap_or(1);
        if !(1..=MAX_QUOTE_QUANTITY).contains(&quantity) {
            errors.add(
                "quantity",
                format!("must be between 1 and {MAX_QUOTE_QUANTITY}"),
            );
        }

        errors.into_result()?;

        Ok(Self {
            batch_id: dto.batch_id.unwrap_or_default(),
            participant_ids: dto.participant_ids,
            quantity,
        })
    }
}

#[derive(Debug, Clone, Default)]
pub struct BookingFilter {
    pub user_id: Option<i32>,
    pub center_id: Option<i32>,
    pub status: Option<BookingStatus>,
}

impl BookingFilter {
    /// Admin listing filter from `?status=&page=&per_page=`.
    pub fn from_query(dto: BookingQueryDto) -> Result<(Self, PageRequest), ValidationError> {
        let status = non_blank(dto.status)
            .map(|raw| parse_enum::<BookingStatus>("status", &raw))
            .transpose()?;

        Ok((
            Self {
                status,
                ..Default::default()
            },
            PageRequest::new(dto.page, dto.per_page),
        ))
    }
}

/// Gateway identifiers returned to the client after checkout.
#[derive(Debug, Clone, PartialEq)]
pub struct PaymentVerification {
    pub order_id: String,
    pub payment_id: String,
    pub signature: String,
}

impl PaymentVerification {
    pub fn from_dto(dto: VerifyPaymentDto) -> Result<Self, ValidationError> {
        let mut errors = ValidationError::new();
        errors.require_str("razorpay_order_id", dto.razorpay_order_id.as_deref());
        errors.require_str("razorpay_payment_id", dto.razorpay_payment_id.as_deref());
        errors.require_str("razorpay_signature", dto.razorpay_signature.as_deref());
        errors.into_result()?;

        Ok(Self {
            order_id: dto.razorpay_order_id.unwrap_or_default().trim().to_string(),
            payment_id: dto.razorpay_payment_id.unwrap_or_default().trim().to_string(),
            signature: dto.razorpay_signature.unwrap_or_default().trim().to_string(),
        })
    }
}
