use super::*;

/// Tests persisting status and payment changes made on the domain model.
///
/// Expected: reloaded booking equals the saved state
#[tokio::test]
async fn persists_payment_document() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_booking_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let (_, _, _, batch) = factory::helpers::create_batch_with_dependencies(db).await?;
    let user = factory::create_user(db).await?;
    let participant = factory::create_participant(db, user.id).await?;
    let entity = factory::create_booking(db, user.id, &batch, participant.id).await?;

    let repo = BookingRepository::new(db);
    let mut booking = repo.get_by_id(entity.id).await?.unwrap();
    booking.status = BookingStatus::Confirmed;
    booking.payment.status = PaymentStatus::Success;
    booking.payment.gateway_order_id = Some("order_1".to_string());
    booking.payment.gateway_payment_id = Some("pay_1".to_string());
    booking.payment.paid_at = Some(Utc::now());
    assert!(repo.save_state(&booking, PaymentStatus::Pending).await?);

    let reloaded = repo.get_by_id(entity.id).await?.unwrap();
    assert_eq!(reloaded.status, BookingStatus::Confirmed);
    assert_eq!(reloaded.payment.status, PaymentStatus::Success);
    assert_eq!(reloaded.payment.gateway_payment_id.as_deref(), Some("pay_1"));
    assert!(reloaded.payment.paid_at.is_some());

    let by_order = repo.find_by_order_id("order_1").await?.unwrap();
    assert_eq!(by_order.id, entity.id);

    Ok(())
}

/// Tests that a write expecting a stale payment status leaves the row untouched.
///
/// Expected: false for the stale write, stored booking keeps the first writer's state
#[tokio::test]
async fn skips_write_when_payment_moved() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_booking_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let (_, _, _, batch) = factory::helpers::create_batch_with_dependencies(db).await?;
    let user = factory::create_user(db).await?;
    let participant = factory::create_participant(db, user.id).await?;
    let entity = factory::create_booking(db, user.id, &batch, participant.id).await?;

    let repo = BookingRepository::new(db);
    let loaded = repo.get_by_id(entity.id).await?.unwrap();

    let mut paid = loaded.clone();
    paid.status = BookingStatus::Confirmed;
    paid.payment.status = PaymentStatus::Success;
    assert!(repo.save_state(&paid, PaymentStatus::Pending).await?);

    let mut expired = loaded;
    expired.status = BookingStatus::Cancelled;
    expired.payment.status = PaymentStatus::Cancelled;
    assert!(!repo.save_state(&expired, PaymentStatus::Pending).await?);

    let stored = repo.get_by_id(entity.id).await?.unwrap();
    assert_eq!(stored.status, BookingStatus::Confirmed);
    assert_eq!(stored.payment.status, PaymentStatus::Success);

    Ok(())
}
