use entity::sea_orm_active_enums::{
    BookingStatus, PaymentStatus, TransactionKind, TransactionStatus, UserRole,
};
use sea_orm::DatabaseConnection;
use serde_json::json;
use test_utils::{builder::TestBuilder, factory};

use crate::server::{
    data::transaction::TransactionRepository,
    error::{payment::PaymentError, AppError},
    model::{booking::PaymentVerification, pagination::PageRequest, user::User},
    service::{
        booking::BookingService,
        payment::PaymentService,
        test::FakeGateway,
    },
};

mod checkout;
mod refund;
mod webhook;

/// Learner with one pending booking on a fresh batch.
async fn pending_booking(
    db: &DatabaseConnection,
) -> Result<(User, entity::booking::Model), AppError> {
    let (_, _, _, batch) = factory::helpers::create_batch_with_dependencies(db).await?;
    let user = factory::create_user(db).await?;
    let participant = factory::create_participant(db, user.id).await?;
    let booking = factory::create_booking(db, user.id, &batch, participant.id).await?;
    Ok((User::from_entity(user), booking))
}

fn verification(order_id: &str, payment_id: &str) -> PaymentVerification {
    PaymentVerification {
        order_id: order_id.to_string(),
        payment_id: payment_id.to_string(),
        signature: FakeGateway::checkout_signature(order_id, payment_id),
    }
}
