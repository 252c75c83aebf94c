use super::*;

/// Tests the checkout flow from order to verified payment.
///
/// Expected: order moves payment to processing; verification confirms the booking and
/// writes one ledger entry even when replayed
#[tokio::test]
async fn order_and_verify_confirm_booking() -> Result<(), AppError> {
    let test = TestBuilder::new().with_booking_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();
    let (user, booking) = pending_booking(db).await?;
    let gateway = FakeGateway::default();
    let service = PaymentService::new(db, &gateway);

    let order = service.create_order(&user, booking.id).await?;
    assert_eq!(order.key_id, "rzp_test_key");
    assert_eq!(order.amount, booking.amount);
    assert_eq!(order.booking_ref, booking.booking_ref);
    let processing = BookingService::new(db).get(booking.id).await?;
    assert_eq!(processing.payment.status, PaymentStatus::Processing);

    let confirmed = service
        .verify(&user, booking.id, verification(&order.order_id, "pay_1"))
        .await?;
    assert_eq!(confirmed.status, BookingStatus::Confirmed);
    assert_eq!(confirmed.payment.status, PaymentStatus::Success);
    assert!(confirmed.payment.paid_at.is_some());

    service
        .verify(&user, booking.id, verification(&order.order_id, "pay_1"))
        .await?;
    let ledger = TransactionRepository::new(db)
        .get_for_booking(booking.id)
        .await?;
    assert_eq!(ledger.len(), 1);
    assert_eq!(ledger[0].kind, TransactionKind::Payment);
    assert_eq!(ledger[0].status, TransactionStatus::Success);
    assert_eq!(ledger[0].gateway_payment_id.as_deref(), Some("pay_1"));
    Ok(())
}

/// Tests that a forged signature fails the payment and can be retried with a new order.
///
/// Expected: InvalidSignature, payment failed with a failed ledger entry, new order allowed
#[tokio::test]
async fn bad_signature_fails_payment() -> Result<(), AppError> {
    let test = TestBuilder::new().with_booking_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();
    let (user, booking) = pending_booking(db).await?;
    let gateway = FakeGateway::default();
    let service = PaymentService::new(db, &gateway);
    let order = service.create_order(&user, booking.id).await?;

    let result = service
        .verify(
            &user,
            booking.id,
            PaymentVerification {
                signature: "forged".to_string(),
                ..verification(&order.order_id, "pay_1")
            },
        )
        .await;
    assert!(matches!(
        result,
        Err(AppError::PaymentErr(PaymentError::InvalidSignature))
    ));

    let failed = BookingService::new(db).get(booking.id).await?;
    assert_eq!(failed.payment.status, PaymentStatus::Failed);
    let ledger = TransactionRepository::new(db)
        .get_for_booking(booking.id)
        .await?;
    assert_eq!(ledger.len(), 1);
    assert_eq!(ledger[0].status, TransactionStatus::Failed);

    let retry = service.create_order(&user, booking.id).await?;
    assert_ne!(retry.order_id, order.order_id);
    Ok(())
}

/// Tests that verification must name the booking's own order.
///
/// Expected: Err(OrderMismatch), payment untouched
#[tokio::test]
async fn verify_rejects_foreign_order() -> Result<(), AppError> {
    let test = TestBuilder::new().with_booking_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();
    let (user, booking) = pending_booking(db).await?;
    let gateway = FakeGateway::default();
    let service = PaymentService::new(db, &gateway);
    service.create_order(&user, booking.id).await?;

    let result = service
        .verify(&user, booking.id, verification("order_other", "pay_1"))
        .await;

    assert!(matches!(
        result,
        Err(AppError::PaymentErr(PaymentError::OrderMismatch(_)))
    ));
    let stored = BookingService::new(db).get(booking.id).await?;
    assert_eq!(stored.payment.status, PaymentStatus::Processing);
    Ok(())
}

/// Tests that a gateway outage leaves the booking pending.
///
/// Expected: Err(Gateway), payment still pending without an order id
#[tokio::test]
async fn gateway_failure_keeps_booking_pending() -> Result<(), AppError> {
    let test = TestBuilder::new().with_booking_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();
    let (user, booking) = pending_booking(db).await?;
    let gateway = FakeGateway {
        fail_orders: true,
        ..Default::default()
    };

    let result = PaymentService::new(db, &gateway)
        .create_order(&user, booking.id)
        .await;

    assert!(matches!(
        result,
        Err(AppError::PaymentErr(PaymentError::Gateway(_)))
    ));
    let stored = BookingService::new(db).get(booking.id).await?;
    assert_eq!(stored.payment.status, PaymentStatus::Pending);
    assert!(stored.payment.gateway_order_id.is_none());
    Ok(())
}

/// Tests that only the booking owner can pay.
///
/// Expected: Err(NotFound) for another user
#[tokio::test]
async fn order_requires_booking_owner() -> Result<(), AppError> {
    let test = TestBuilder::new().with_booking_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();
    let (_, booking) = pending_booking(db).await?;
    let stranger = User::from_entity(factory::create_user(db).await?);
    let gateway = FakeGateway::default();

    let result = PaymentService::new(db, &gateway)
        .create_order(&stranger, booking.id)
        .await;

    assert!(matches!(result, Err(AppError::NotFound(_))));
    Ok(())
}
