use super::*;
use crate::server::data::booking::BookingRepository;

/// Tests that unpaid bookings past the timeout are cancelled.
///
/// Expected: only the stale pending booking is cancelled, with the timeout reason
#[tokio::test]
async fn expires_stale_unpaid_bookings() -> Result<(), AppError> {
    let test = TestBuilder::new().with_booking_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();
    let (_, _, _, batch) = factory::helpers::create_batch_with_dependencies(db).await?;
    let user = factory::create_user(db).await?;
    let old = Utc::now() - Duration::minutes(45);

    let p1 = factory::create_participant(db, user.id).await?;
    let stale = factory::booking::BookingFactory::new(db, user.id, &batch)
        .participant(p1.id)
        .status(BookingStatus::Pending, PaymentStatus::Processing)
        .created_at(old)
        .build()
        .await?;
    let p2 = factory::create_participant(db, user.id).await?;
    let fresh = factory::create_booking(db, user.id, &batch, p2.id).await?;
    let p3 = factory::create_participant(db, user.id).await?;
    let paid = factory::booking::BookingFactory::new(db, user.id, &batch)
        .participant(p3.id)
        .status(BookingStatus::Confirmed, PaymentStatus::Success)
        .created_at(old)
        .build()
        .await?;
    let service = BookingService::new(db);

    let expired = service
        .expire_stale(Utc::now() - Duration::minutes(30))
        .await?;
    assert_eq!(expired, 1);

    let stale = service.get(stale.id).await?;
    assert_eq!(stale.status, BookingStatus::Cancelled);
    assert_eq!(stale.payment.status, PaymentStatus::Cancelled);
    assert_eq!(
        stale.payment.failure_reason.as_deref(),
        Some(PAYMENT_TIMEOUT_REASON)
    );
    assert_eq!(service.get(fresh.id).await?.status, BookingStatus::Pending);
    assert_eq!(service.get(paid.id).await?.status, BookingStatus::Confirmed);
    Ok(())
}

/// Tests expiry running against a booking that a payment confirmed after it was loaded.
///
/// Expected: the paid booking stays confirmed and is not counted as expired
#[tokio::test]
async fn expiry_loses_to_concurrent_payment() -> Result<(), AppError> {
    let test = TestBuilder::new().with_booking_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();
    let (_, _, _, batch) = factory::helpers::create_batch_with_dependencies(db).await?;
    let user = factory::create_user(db).await?;
    let participant = factory::create_participant(db, user.id).await?;
    let booking = factory::booking::BookingFactory::new(db, user.id, &batch)
        .participant(participant.id)
        .status(BookingStatus::Pending, PaymentStatus::Processing)
        .created_at(Utc::now() - Duration::minutes(45))
        .build()
        .await?;
    let repo = BookingRepository::new(db);

    // Payment lands between the stale scan and the expiry write.
    let loaded = repo.get_by_id(booking.id).await?.unwrap();
    let mut paid = loaded.clone();
    paid.move_payment(PaymentStatus::Success)?;
    paid.status = BookingStatus::Confirmed;
    assert!(repo.save_state(&paid, PaymentStatus::Processing).await?);

    let mut expired = loaded;
    expired.move_payment(PaymentStatus::Cancelled)?;
    expired.status = BookingStatus::Cancelled;
    assert!(!repo.save_state(&expired, PaymentStatus::Processing).await?);

    let service = BookingService::new(db);
    assert_eq!(
        service
            .expire_stale(Utc::now() - Duration::minutes(30))
            .await?,
        0
    );
    let stored = service.get(booking.id).await?;
    assert_eq!(stored.status, BookingStatus::Confirmed);
    assert_eq!(stored.payment.status, PaymentStatus::Success);
    Ok(())
}
