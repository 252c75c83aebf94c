use super::*;

/// Tests counting occupied seats.
///
/// Verifies that every participant line of a non-cancelled booking counts and that
/// cancelled bookings free their seats.
///
/// Expected: Ok(2)
#[tokio::test]
async fn counts_lines_of_non_cancelled_bookings() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_booking_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let (_, _, _, batch) = factory::helpers::create_batch_with_dependencies(db).await?;
    let user = factory::create_user(db).await?;
    let a = factory::create_participant(db, user.id).await?;
    let b = factory::create_participant(db, user.id).await?;
    let c = factory::create_participant(db, user.id).await?;

    factory::booking::BookingFactory::new(db, user.id, &batch)
        .participant(a.id)
        .status(BookingStatus::Confirmed, PaymentStatus::Success)
        .build()
        .await?;
    factory::create_booking(db, user.id, &batch, b.id).await?;
    factory::booking::BookingFactory::new(db, user.id, &batch)
        .participant(c.id)
        .status(BookingStatus::Cancelled, PaymentStatus::Cancelled)
        .build()
        .await?;

    let repo = BookingRepository::new(db);

    assert_eq!(repo.seats_taken(batch.id).await?, 2);

    Ok(())
}

/// Tests an empty batch.
///
/// Expected: Ok(0)
#[tokio::test]
async fn returns_zero_without_bookings() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_booking_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let (_, _, _, batch) = factory::helpers::create_batch_with_dependencies(db).await?;

    let repo = BookingRepository::new(db);

    assert_eq!(repo.seats_taken(batch.id).await?, 0);

    Ok(())
}
