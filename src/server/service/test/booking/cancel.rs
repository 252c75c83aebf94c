use super::*;

/// Tests cancelling an unpaid booking.
///
/// Expected: booking and payment both cancelled
#[tokio::test]
async fn cancels_unpaid_booking() -> Result<(), AppError> {
    let test = TestBuilder::new().with_booking_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();
    let (_, _, _, batch) = factory::helpers::create_batch_with_dependencies(db).await?;
    let user = User::from_entity(factory::create_user(db).await?);
    let participant = factory::create_participant(db, user.id).await?;
    let booking = factory::create_booking(db, user.id, &batch, participant.id).await?;
    let service = BookingService::new(db);

    service.cancel(&user, booking.id).await?;

    let stored = service.get(booking.id).await?;
    assert_eq!(stored.status, BookingStatus::Cancelled);
    assert_eq!(stored.payment.status, PaymentStatus::Cancelled);
    Ok(())
}

/// Tests that paid bookings cannot be cancelled by the learner.
///
/// Expected: Err(PaymentErr(InvalidTransition))
#[tokio::test]
async fn paid_booking_cannot_be_cancelled() -> Result<(), AppError> {
    let test = TestBuilder::new().with_booking_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();
    let (_, _, _, batch) = factory::helpers::create_batch_with_dependencies(db).await?;
    let user = User::from_entity(factory::create_user(db).await?);
    let participant = factory::create_participant(db, user.id).await?;
    let booking = factory::booking::BookingFactory::new(db, user.id, &batch)
        .participant(participant.id)
        .status(BookingStatus::Confirmed, PaymentStatus::Success)
        .build()
        .await?;

    let result = BookingService::new(db).cancel(&user, booking.id).await;

    assert!(matches!(
        result,
        Err(AppError::PaymentErr(PaymentError::InvalidTransition { .. }))
    ));
    Ok(())
}
