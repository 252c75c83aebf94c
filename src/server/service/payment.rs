//! Razorpay checkout, verification, webhooks, refunds and the payment ledger.
//!
//! Every change to a booking's payment goes through the payment status machine. Client
//! calls that break it fail with 409; webhook events that break it are acknowledged and
//! logged so the gateway stops retrying.

use chrono::Utc;
use entity::sea_orm_active_enums::{
    BookingStatus, PaymentStatus, TransactionKind, TransactionStatus,
};
use sea_orm::{DatabaseConnection, TransactionTrait};

use crate::server::{
    data::{booking::BookingRepository, transaction::TransactionRepository},
    error::{payment::PaymentError, AppError},
    integration::razorpay::{PaymentGateway, WebhookEvent},
    model::{
        booking::{Booking, PaymentVerification},
        payment::{can_transition, NewTransaction, PaymentOrder},
        user::User,
    },
    service::booking::{changed_concurrently, BookingService},
};

const SIGNATURE_FAILURE_REASON: &str = "Payment signature verification failed";

pub struct PaymentService<'a> {
    db: &'a DatabaseConnection,
    gateway: &'a dyn PaymentGateway,
}

impl<'a> PaymentService<'a> {
    /// Creates a new PaymentService instance.
    ///
    /// # Arguments
    /// - `db` - Reference to the database connection
    /// - `gateway` - Payment gateway used for orders and refunds
    ///
    /// # Returns
    /// - `PaymentService` - New service instance
    pub fn new(db: &'a DatabaseConnection, gateway: &'a dyn PaymentGateway) -> Self {
        Self { db, gateway }
    }

    /// Opens a gateway order for one of the caller's bookings.
    ///
    /// Allowed while the payment is pending or failed; a failed payment can be retried
    /// with a fresh order.
    ///
    /// # Returns
    /// - `Ok(PaymentOrder)` - Checkout details for the client
    /// - `Err(PaymentError::InvalidTransition)` - Payment already in progress or closed
    /// - `Err(PaymentError::Gateway)` - The gateway rejected the order
    pub async fn create_order(
        &self,
        user: &User,
        booking_id: i32,
    ) -> Result<PaymentOrder, AppError> {
        let mut booking = BookingService::new(self.db)
            .get_for_user(user, booking_id)
            .await?;
        if booking.status != BookingStatus::Pending {
            return Err(PaymentError::InvalidTransition {
                from: booking.payment.status,
                to: PaymentStatus::Processing,
            }
            .into());
        }
        let from = booking.payment.status;
        booking.move_payment(PaymentStatus::Processing)?;

        let order = self
            .gateway
            .create_order(booking.amount, &booking.currency, &booking.booking_ref)
            .await?;

        booking.payment.gateway_order_id = Some(order.id.clone());
        booking.payment.gateway_payment_id = None;
        booking.payment.gateway_signature = None;
        booking.payment.failure_reason = None;
        if !BookingRepository::new(self.db).save_state(&booking, from).await? {
            return Err(changed_concurrently(&booking));
        }
        tracing::info!("Opened order {} for booking {}", order.id, booking.booking_ref);

        Ok(PaymentOrder {
            key_id: self.gateway.key_id().to_string(),
            order_id: order.id,
            amount: order.amount,
            currency: order.currency,
            booking_ref: booking.booking_ref,
        })
    }

    /// Verifies the checkout signature returned to the client and confirms the booking.
    ///
    /// Replaying a verification that already succeeded returns the booking unchanged.
    ///
    /// # Returns
    /// - `Ok(Booking)` - Confirmed booking
    /// - `Err(PaymentError::OrderMismatch)` - Order id belongs to another booking
    /// - `Err(PaymentError::InvalidSignature)` - Signature did not verify; the payment is
    ///   marked failed
    pub async fn verify(
        &self,
        user: &User,
        booking_id: i32,
        verification: PaymentVerification,
    ) -> Result<Booking, AppError> {
        let mut booking = BookingService::new(self.db)
            .get_for_user(user, booking_id)
            .await?;

        if booking.payment.gateway_order_id.as_deref() != Some(verification.order_id.as_str()) {
            return Err(PaymentError::OrderMismatch(verification.order_id).into());
        }
        if booking.payment.status == PaymentStatus::Success
            && booking.payment.gateway_payment_id.as_deref()
                == Some(verification.payment_id.as_str())
        {
            return Ok(booking);
        }

        let valid = self.gateway.verify_payment_signature(
            &verification.order_id,
            &verification.payment_id,
            &verification.signature,
        );
        if !valid {
            tracing::warn!(
                "Invalid checkout signature for booking {}",
                booking.booking_ref
            );
            if can_transition(booking.payment.status, PaymentStatus::Failed) {
                self.mark_failed(
                    &mut booking,
                    Some(verification.payment_id),
                    SIGNATURE_FAILURE_REASON.to_string(),
                )
                .await?;
            }
            return Err(PaymentError::InvalidSignature.into());
        }

        let applied = self
            .mark_paid(
                &mut booking,
                verification.payment_id,
                Some(verification.signature),
            )
            .await?;
        if !applied {
            return Err(changed_concurrently(&booking));
        }

        Ok(booking)
    }

    /// Applies a signed webhook delivery.
    ///
    /// # Arguments
    /// - `body` - Raw request body, as signed by the gateway
    /// - `signature` - `X-Razorpay-Signature` header value
    ///
    /// # Returns
    /// - `Ok(())` - Event applied, or acknowledged and ignored
    /// - `Err(PaymentError::InvalidSignature)` - Signature missing or wrong
    /// - `Err(AppError::BadRequest)` - Signed body is not a webhook payload
    pub async fn handle_webhook(&self, body: &[u8], signature: &str) -> Result<(), AppError> {
        if !self.gateway.verify_webhook_signature(body, signature)? {
            tracing::warn!("Rejected webhook with invalid signature");
            return Err(PaymentError::InvalidSignature.into());
        }

        let event = WebhookEvent::parse(body)
            .map_err(|e| AppError::BadRequest(format!("Malformed webhook payload: {}", e)))?;
        let repo = BookingRepository::new(self.db);

        match event {
            WebhookEvent::Paid {
                order_id,
                payment_id,
            } => {
                let Some(mut booking) = repo.find_by_order_id(&order_id).await? else {
                    tracing::warn!("Webhook for unknown order {}", order_id);
                    return Ok(());
                };
                if booking.payment.status == PaymentStatus::Success {
                    tracing::debug!("Order {} already paid", order_id);
                    return Ok(());
                }
                if !can_transition(booking.payment.status, PaymentStatus::Success) {
                    log_ignored(&booking, PaymentStatus::Success);
                    return Ok(());
                }
                if !self.mark_paid(&mut booking, payment_id, None).await? {
                    log_lost_race(&booking, PaymentStatus::Success);
                }
            }
            WebhookEvent::Failed {
                order_id,
                payment_id,
                reason,
            } => {
                let Some(mut booking) = repo.find_by_order_id(&order_id).await? else {
                    tracing::warn!("Webhook for unknown order {}", order_id);
                    return Ok(());
                };
                if !can_transition(booking.payment.status, PaymentStatus::Failed) {
                    log_ignored(&booking, PaymentStatus::Failed);
                    return Ok(());
                }
                let reason = reason.unwrap_or_else(|| "Payment failed".to_string());
                if !self.mark_failed(&mut booking, payment_id, reason).await? {
                    log_lost_race(&booking, PaymentStatus::Failed);
                }
            }
            WebhookEvent::Refunded {
                payment_id,
                refund_id,
            } => {
                let Some(mut booking) = repo.find_by_payment_id(&payment_id).await? else {
                    tracing::warn!("Refund webhook for unknown payment {}", payment_id);
                    return Ok(());
                };
                if booking.payment.status == PaymentStatus::Refunded {
                    tracing::debug!("Payment {} already refunded", payment_id);
                    return Ok(());
                }
                if !can_transition(booking.payment.status, PaymentStatus::Refunded) {
                    log_ignored(&booking, PaymentStatus::Refunded);
                    return Ok(());
                }
                if !self.mark_refunded(&mut booking, refund_id, None).await? {
                    log_lost_race(&booking, PaymentStatus::Refunded);
                }
            }
            WebhookEvent::Ignored(name) => {
                tracing::debug!("Ignoring webhook event {}", name);
            }
        }

        Ok(())
    }

    /// Refunds a paid booking in full from the admin panel.
    ///
    /// # Returns
    /// - `Ok(Booking)` - Refunded and cancelled booking
    /// - `Err(PaymentError::InvalidTransition)` - Payment has not succeeded
    /// - `Err(PaymentError::Gateway)` - The gateway rejected the refund
    pub async fn refund(
        &self,
        admin: &User,
        booking_id: i32,
        reason: Option<String>,
    ) -> Result<Booking, AppError> {
        let mut booking = BookingService::new(self.db).get(booking_id).await?;
        if !can_transition(booking.payment.status, PaymentStatus::Refunded) {
            return Err(PaymentError::InvalidTransition {
                from: booking.payment.status,
                to: PaymentStatus::Refunded,
            }
            .into());
        }
        let Some(payment_id) = booking.payment.gateway_payment_id.clone() else {
            return Err(AppError::InternalError(format!(
                "Booking {} is paid without a gateway payment id",
                booking.id
            )));
        };

        let refund = self.gateway.refund(&payment_id, booking.amount).await?;
        if !self.mark_refunded(&mut booking, refund.id, reason).await? {
            return Err(changed_concurrently(&booking));
        }
        tracing::info!(
            "Admin {} refunded booking {}",
            admin.id,
            booking.booking_ref
        );

        Ok(booking)
    }

    /// Confirms the booking and records the payment in the ledger, atomically.
    ///
    /// Returns `false` when another writer moved the payment first; nothing is written.
    async fn mark_paid(
        &self,
        booking: &mut Booking,
        payment_id: String,
        signature: Option<String>,
    ) -> Result<bool, AppError> {
        let from = booking.payment.status;
        booking.move_payment(PaymentStatus::Success)?;
        booking.status = BookingStatus::Confirmed;
        booking.payment.gateway_payment_id = Some(payment_id.clone());
        if signature.is_some() {
            booking.payment.gateway_signature = signature;
        }
        booking.payment.failure_reason = None;
        booking.payment.paid_at = Some(Utc::now());

        let txn = self.db.begin().await?;
        if !BookingRepository::new(&txn).save_state(booking, from).await? {
            return Ok(false);
        }
        let ledger = TransactionRepository::new(&txn);
        if !ledger.has_successful_payment(&payment_id).await? {
            ledger
                .create(self.entry(booking, TransactionKind::Payment, TransactionStatus::Success))
                .await?;
        }
        txn.commit().await?;
        tracing::info!("Booking {} confirmed by payment {}", booking.booking_ref, payment_id);

        Ok(true)
    }

    async fn mark_failed(
        &self,
        booking: &mut Booking,
        payment_id: Option<String>,
        reason: String,
    ) -> Result<bool, AppError> {
        let from = booking.payment.status;
        booking.move_payment(PaymentStatus::Failed)?;
        if payment_id.is_some() {
            booking.payment.gateway_payment_id = payment_id;
        }
        booking.payment.failure_reason = Some(reason.clone());

        let txn = self.db.begin().await?;
        if !BookingRepository::new(&txn).save_state(booking, from).await? {
            return Ok(false);
        }
        let mut entry = self.entry(booking, TransactionKind::Payment, TransactionStatus::Failed);
        entry.note = Some(reason);
        TransactionRepository::new(&txn).create(entry).await?;
        txn.commit().await?;
        tracing::info!("Payment for booking {} failed", booking.booking_ref);

        Ok(true)
    }

    async fn mark_refunded(
        &self,
        booking: &mut Booking,
        refund_id: String,
        note: Option<String>,
    ) -> Result<bool, AppError> {
        let from = booking.payment.status;
        booking.move_payment(PaymentStatus::Refunded)?;
        booking.status = BookingStatus::Cancelled;

        let txn = self.db.begin().await?;
        if !BookingRepository::new(&txn).save_state(booking, from).await? {
            return Ok(false);
        }
        let mut entry = self.entry(booking, TransactionKind::Refund, TransactionStatus::Success);
        entry.gateway_refund_id = Some(refund_id);
        entry.note = note;
        TransactionRepository::new(&txn).create(entry).await?;
        txn.commit().await?;

        Ok(true)
    }

    fn entry(
        &self,
        booking: &Booking,
        kind: TransactionKind,
        status: TransactionStatus,
    ) -> NewTransaction {
        NewTransaction {
            booking_id: booking.id,
            user_id: booking.user_id,
            kind,
            status,
            amount: booking.amount,
            currency: booking.currency.clone(),
            gateway_order_id: booking.payment.gateway_order_id.clone(),
            gateway_payment_id: booking.payment.gateway_payment_id.clone(),
            gateway_refund_id: None,
            note: None,
        }
    }
}

fn log_ignored(booking: &Booking, to: PaymentStatus) {
    tracing::warn!(
        "Ignoring webhook moving booking {} from {:?} to {:?}",
        booking.booking_ref,
        booking.payment.status,
        to
    );
}

fn log_lost_race(booking: &Booking, to: PaymentStatus) {
    tracing::info!(
        "Webhook moving booking {} to {:?} lost to a concurrent update",
        booking.booking_ref,
        to
    );
}
