use super::*;

/// Tests detecting participants that already hold a live booking on the batch.
///
/// A failed payment does not count as live, so that participant may book again.
///
/// Expected: Ok(vec![live participant])
#[tokio::test]
async fn returns_only_live_holders() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_booking_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let (_, _, _, batch) = factory::helpers::create_batch_with_dependencies(db).await?;
    let user = factory::create_user(db).await?;
    let live = factory::create_participant(db, user.id).await?;
    let failed = factory::create_participant(db, user.id).await?;
    let fresh = factory::create_participant(db, user.id).await?;

    factory::create_booking(db, user.id, &batch, live.id).await?;
    factory::booking::BookingFactory::new(db, user.id, &batch)
        .participant(failed.id)
        .status(BookingStatus::Pending, PaymentStatus::Failed)
        .build()
        .await?;

    let repo = BookingRepository::new(db);
    let holders = repo
        .participants_with_live_booking(batch.id, &[live.id, failed.id, fresh.id])
        .await?;

    assert_eq!(holders, vec![live.id]);

    Ok(())
}
