use super::*;

/// Tests revenue as successful payments minus successful refunds.
///
/// Failed entries are ignored.
///
/// Expected: Ok(250000 - 50000)
#[tokio::test]
async fn subtracts_refunds_and_ignores_failures() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_booking_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let (_, _, _, batch) = factory::helpers::create_batch_with_dependencies(db).await?;
    let user = factory::create_user(db).await?;
    let participant = factory::create_participant(db, user.id).await?;
    let booking = factory::create_booking(db, user.id, &batch, participant.id).await?;

    let repo = TransactionRepository::new(db);
    repo.create(entry(&booking, TransactionKind::Payment, TransactionStatus::Success, 150000))
        .await?;
    repo.create(entry(&booking, TransactionKind::Payment, TransactionStatus::Success, 100000))
        .await?;
    repo.create(entry(&booking, TransactionKind::Payment, TransactionStatus::Failed, 999999))
        .await?;
    repo.create(entry(&booking, TransactionKind::Refund, TransactionStatus::Success, 50000))
        .await?;

    assert_eq!(repo.net_revenue().await?, 200000);
    assert!(repo.has_successful_payment("pay_1").await?);
    assert!(!repo.has_successful_payment("pay_2").await?);

    let own = repo
        .get_paginated(Some(user.id), PageRequest::default())
        .await?;
    assert_eq!(own.total, 4);

    Ok(())
}

/// Tests revenue on an empty ledger.
///
/// Expected: Ok(0)
#[tokio::test]
async fn is_zero_without_entries() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_booking_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let repo = TransactionRepository::new(db);

    assert_eq!(repo.net_revenue().await?, 0);

    Ok(())
}
