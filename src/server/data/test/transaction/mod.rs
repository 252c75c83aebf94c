use crate::server::{
    data::transaction::TransactionRepository,
    model::{pagination::PageRequest, payment::NewTransaction},
};
use entity::sea_orm_active_enums::{TransactionKind, TransactionStatus};
use sea_orm::DbErr;
use test_utils::{builder::TestBuilder, factory};

mod net_revenue;

fn entry(
    booking: &entity::booking::Model,
    kind: TransactionKind,
    status: TransactionStatus,
    amount: i64,
) -> NewTransaction {
    NewTransaction {
        booking_id: booking.id,
        user_id: booking.user_id,
        kind,
        status,
        amount,
        currency: "INR".to_string(),
        gateway_order_id: Some("order_1".to_string()),
        gateway_payment_id: Some("pay_1".to_string()),
        gateway_refund_id: None,
        note: None,
    }
}
