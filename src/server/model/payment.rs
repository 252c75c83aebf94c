//! Payment status machine and transaction ledger model.

use chrono::{DateTime, Utc};
use entity::sea_orm_active_enums::{PaymentStatus, TransactionKind, TransactionStatus};

use crate::{
    model::booking::{PaymentOrderDto, TransactionDto},
    server::{error::payment::PaymentError, util::parse::enum_str},
};

/// Whether a booking payment may move from `from` to `to`.
///
/// pending → processing | cancelled | failed
/// processing → success | failed | cancelled
/// failed → processing | cancelled
/// success → refunded
pub fn can_transition(from: PaymentStatus, to: PaymentStatus) -> bool {
    use PaymentStatus::*;

    matches!(
        (from, to),
        (Pending, Processing)
            | (Pending, Cancelled)
            | (Pending, Failed)
            | (Processing, Success)
            | (Processing, Failed)
            | (Processing, Cancelled)
            | (Failed, Processing)
            | (Failed, Cancelled)
            | (Success, Refunded)
    )
}

pub fn ensure_transition(from: PaymentStatus, to: PaymentStatus) -> Result<(), PaymentError> {
    if can_transition(from, to) {
        Ok(())
    } else {
        Err(PaymentError::InvalidTransition { from, to })
    }
}

/// Checkout details handed to the client after a gateway order is created.
#[derive(Debug, Clone, PartialEq)]
pub struct PaymentOrder {
    pub key_id: String,
    pub order_id: String,
    pub amount: i64,
    pub currency: String,
    pub booking_ref: String,
}

impl PaymentOrder {
    pub fn into_dto(self) -> PaymentOrderDto {
        PaymentOrderDto {
            key_id: self.key_id,
            order_id: self.order_id,
            amount: self.amount,
            currency: self.currency,
            booking_ref: self.booking_ref,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Transaction {
    pub id: i32,
    pub booking_id: i32,
    pub user_id: i32,
    pub kind: TransactionKind,
    pub status: TransactionStatus,
    pub amount: i64,
    pub currency: String,
    pub gateway_order_id: Option<String>,
    pub gateway_payment_id: Option<String>,
    pub gateway_refund_id: Option<String>,
    pub note: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl Transaction {
    pub fn from_entity(entity: entity::payment_transaction::Model) -> Self {
        Self {
            id: entity.id,
            booking_id: entity.booking_id,
            user_id: entity.user_id,
            kind: entity.kind,
            status: entity.status,
            amount: entity.amount,
            currency: entity.currency,
            gateway_order_id: entity.gateway_order_id,
            gateway_payment_id: entity.gateway_payment_id,
            gateway_refund_id: entity.gateway_refund_id,
            note: entity.note,
            created_at: entity.created_at,
        }
    }

    pub fn into_dto(self) -> TransactionDto {
        TransactionDto {
            id: self.id,
            booking_id: self.booking_id,
            user_id: self.user_id,
            kind: enum_str(&self.kind),
            status: enum_str(&self.status),
            amount: self.amount,
            currency: self.currency,
            gateway_order_id: self.gateway_order_id,
            gateway_payment_id: self.gateway_payment_id,
            gateway_refund_id: self.gateway_refund_id,
            note: self.note,
            created_at: self.created_at,
        }
    }
}

/// Ledger entry to append.
#[derive(Debug, Clone)]
pub struct NewTransaction {
    pub booking_id: i32,
    pub user_id: i32,
    pub kind: TransactionKind,
    pub status: TransactionStatus,
    pub amount: i64,
    pub currency: String,
    pub gateway_order_id: Option<String>,
    pub gateway_payment_id: Option<String>,
    pub gateway_refund_id: Option<String>,
    pub note: Option<String>,
}
