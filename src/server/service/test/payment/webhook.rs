use super::*;
use chrono::{Duration, Utc};

fn signed(body: &serde_json::Value) -> (Vec<u8>, String) {
    let bytes = body.to_string().into_bytes();
    let signature = FakeGateway::webhook_signature(&bytes);
    (bytes, signature)
}

/// Tests that a captured payment webhook confirms the booking.
///
/// Expected: booking confirmed with the webhook's payment id and a ledger entry
#[tokio::test]
async fn captured_event_confirms_booking() -> Result<(), AppError> {
    let test = TestBuilder::new().with_booking_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();
    let (user, booking) = pending_booking(db).await?;
    let gateway = FakeGateway::default();
    let service = PaymentService::new(db, &gateway);
    let order = service.create_order(&user, booking.id).await?;

    let (body, signature) = signed(&json!({
        "event": "payment.captured",
        "payload": {"payment": {"entity": {"id": "pay_hook", "order_id": order.order_id}}}
    }));
    service.handle_webhook(&body, &signature).await?;
    service.handle_webhook(&body, &signature).await?;

    let stored = BookingService::new(db).get(booking.id).await?;
    assert_eq!(stored.status, BookingStatus::Confirmed);
    assert_eq!(stored.payment.gateway_payment_id.as_deref(), Some("pay_hook"));
    let ledger = TransactionRepository::new(db)
        .get_for_booking(booking.id)
        .await?;
    assert_eq!(ledger.len(), 1);
    Ok(())
}

/// Tests that failure events record the gateway's reason.
///
/// Expected: payment failed with the error description
#[tokio::test]
async fn failed_event_records_reason() -> Result<(), AppError> {
    let test = TestBuilder::new().with_booking_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();
    let (user, booking) = pending_booking(db).await?;
    let gateway = FakeGateway::default();
    let service = PaymentService::new(db, &gateway);
    let order = service.create_order(&user, booking.id).await?;

    let (body, signature) = signed(&json!({
        "event": "payment.failed",
        "payload": {"payment": {"entity": {
            "id": "pay_x", "order_id": order.order_id, "error_description": "Card declined"
        }}}
    }));
    service.handle_webhook(&body, &signature).await?;

    let stored = BookingService::new(db).get(booking.id).await?;
    assert_eq!(stored.payment.status, PaymentStatus::Failed);
    assert_eq!(stored.payment.failure_reason.as_deref(), Some("Card declined"));
    Ok(())
}

/// Tests that webhooks breaking the status machine are acknowledged without effect.
///
/// Expected: Ok, paid booking stays confirmed
#[tokio::test]
async fn invalid_transition_is_ignored() -> Result<(), AppError> {
    let test = TestBuilder::new().with_booking_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();
    let (_, _, _, batch) = factory::helpers::create_batch_with_dependencies(db).await?;
    let user = factory::create_user(db).await?;
    let participant = factory::create_participant(db, user.id).await?;
    let booking = factory::booking::BookingFactory::new(db, user.id, &batch)
        .participant(participant.id)
        .status(BookingStatus::Confirmed, PaymentStatus::Success)
        .gateway_order_id("order_paid")
        .build()
        .await?;
    let gateway = FakeGateway::default();

    let (body, signature) = signed(&json!({
        "event": "payment.failed",
        "payload": {"payment": {"entity": {"id": "pay_late", "order_id": "order_paid"}}}
    }));
    PaymentService::new(db, &gateway)
        .handle_webhook(&body, &signature)
        .await?;

    let stored = BookingService::new(db).get(booking.id).await?;
    assert_eq!(stored.status, BookingStatus::Confirmed);
    assert_eq!(stored.payment.status, PaymentStatus::Success);
    Ok(())
}

/// Tests that unsigned deliveries are rejected and unknown events acknowledged.
///
/// Expected: InvalidSignature for a bad signature, Ok for an unhandled event
#[tokio::test]
async fn checks_signature_and_ignores_unknown_events() -> Result<(), AppError> {
    let test = TestBuilder::new().with_booking_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();
    let gateway = FakeGateway::default();
    let service = PaymentService::new(db, &gateway);

    let (body, signature) = signed(&json!({"event": "payment.authorized", "payload": {}}));
    assert!(matches!(
        service.handle_webhook(&body, "bad").await,
        Err(AppError::PaymentErr(PaymentError::InvalidSignature))
    ));
    service.handle_webhook(&body, &signature).await?;
    Ok(())
}

/// Tests a captured-payment webhook racing the expiry sweep on a stale checkout.
///
/// Expected: exactly one side wins; a confirmed booking has one ledger entry and was not
/// expired, a cancelled one has none
#[tokio::test]
async fn webhook_and_expiry_settle_once() -> Result<(), AppError> {
    let test = TestBuilder::new().with_booking_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();
    let (_, _, _, batch) = factory::helpers::create_batch_with_dependencies(db).await?;
    let user = factory::create_user(db).await?;
    let participant = factory::create_participant(db, user.id).await?;
    let booking = factory::booking::BookingFactory::new(db, user.id, &batch)
        .participant(participant.id)
        .created_at(Utc::now() - Duration::minutes(45))
        .build()
        .await?;
    let gateway = FakeGateway::default();
    let service = PaymentService::new(db, &gateway);
    let order = service
        .create_order(&User::from_entity(user), booking.id)
        .await?;

    let (body, signature) = signed(&json!({
        "event": "payment.captured",
        "payload": {"payment": {"entity": {"id": "pay_race", "order_id": order.order_id}}}
    }));
    let bookings = BookingService::new(db);
    let (hook, expired) = tokio::join!(
        service.handle_webhook(&body, &signature),
        bookings.expire_stale(Utc::now() - Duration::minutes(30)),
    );
    hook?;
    let expired = expired?;

    let stored = bookings.get(booking.id).await?;
    let ledger = TransactionRepository::new(db)
        .get_for_booking(booking.id)
        .await?;
    match stored.payment.status {
        PaymentStatus::Success => {
            assert_eq!(stored.status, BookingStatus::Confirmed);
            assert_eq!(expired, 0);
            assert_eq!(ledger.len(), 1);
        }
        PaymentStatus::Cancelled => {
            assert_eq!(stored.status, BookingStatus::Cancelled);
            assert_eq!(expired, 1);
            assert!(ledger.is_empty());
        }
        other => panic!("unexpected payment status {:?}", other),
    }
    Ok(())
}
