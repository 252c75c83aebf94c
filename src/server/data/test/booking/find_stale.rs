use super::*;

/// Tests finding bookings whose payment has been pending past the cutoff.
///
/// Expected: Ok(vec![old pending booking])
#[tokio::test]
async fn finds_old_unpaid_bookings() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_booking_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let (_, _, _, batch) = factory::helpers::create_batch_with_dependencies(db).await?;
    let user = factory::create_user(db).await?;
    let p1 = factory::create_participant(db, user.id).await?;
    let p2 = factory::create_participant(db, user.id).await?;
    let p3 = factory::create_participant(db, user.id).await?;

    let now = Utc::now();
    let stale = factory::booking::BookingFactory::new(db, user.id, &batch)
        .participant(p1.id)
        .created_at(now - Duration::hours(2))
        .build()
        .await?;
    factory::booking::BookingFactory::new(db, user.id, &batch)
        .participant(p2.id)
        .build()
        .await?;
    factory::booking::BookingFactory::new(db, user.id, &batch)
        .participant(p3.id)
        .status(BookingStatus::Confirmed, PaymentStatus::Success)
        .created_at(now - Duration::hours(2))
        .build()
        .await?;

    let repo = BookingRepository::new(db);
    let found = repo.find_stale(now - Duration::minutes(30)).await?;

    assert_eq!(found.len(), 1);
    assert_eq!(found[0].id, stale.id);
    assert_eq!(found[0].participants.len(), 1);

    Ok(())
}
