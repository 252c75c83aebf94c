use super::*;

/// Tests refunding a paid booking from the admin panel.
///
/// Expected: gateway refund issued, booking cancelled and refunded, refund ledger entry;
/// the later refund webhook changes nothing
#[tokio::test]
async fn refunds_paid_booking() -> Result<(), AppError> {
    let test = TestBuilder::new().with_booking_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();
    let (user, booking) = pending_booking(db).await?;
    let admin = User::from_entity(
        factory::user::create_user_with_role(db, UserRole::SuperAdmin).await?,
    );
    let gateway = FakeGateway::default();
    let service = PaymentService::new(db, &gateway);
    let order = service.create_order(&user, booking.id).await?;
    service
        .verify(&user, booking.id, verification(&order.order_id, "pay_r"))
        .await?;

    let refunded = service
        .refund(&admin, booking.id, Some("Batch cancelled".to_string()))
        .await?;
    assert_eq!(refunded.status, BookingStatus::Cancelled);
    assert_eq!(refunded.payment.status, PaymentStatus::Refunded);
    assert_eq!(
        gateway.refunds.lock().unwrap().as_slice(),
        &[("pay_r".to_string(), booking.amount)]
    );

    let body = json!({
        "event": "refund.processed",
        "payload": {"refund": {"entity": {"id": "rfnd_pay_r", "payment_id": "pay_r"}}}
    })
    .to_string()
    .into_bytes();
    service
        .handle_webhook(&body, &FakeGateway::webhook_signature(&body))
        .await?;

    let page = BookingService::new(db)
        .transactions(&user, PageRequest::default())
        .await?;
    assert_eq!(page.total, 2);
    let refund = &page.items[0];
    assert_eq!(refund.kind, TransactionKind::Refund);
    assert_eq!(refund.gateway_refund_id.as_deref(), Some("rfnd_pay_r"));
    assert_eq!(refund.note.as_deref(), Some("Batch cancelled"));
    Ok(())
}

/// Tests that only successful payments can be refunded.
///
/// Expected: Err(InvalidTransition) and no gateway call
#[tokio::test]
async fn refund_requires_successful_payment() -> Result<(), AppError> {
    let test = TestBuilder::new().with_booking_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();
    let (_, booking) = pending_booking(db).await?;
    let admin = User::from_entity(
        factory::user::create_user_with_role(db, UserRole::SuperAdmin).await?,
    );
    let gateway = FakeGateway::default();

    let result = PaymentService::new(db, &gateway)
        .refund(&admin, booking.id, None)
        .await;

    assert!(matches!(
        result,
        Err(AppError::PaymentErr(PaymentError::InvalidTransition { .. }))
    ));
    assert!(gateway.refunds.lock().unwrap().is_empty());
    Ok(())
}
