use super::*;

/// Tests that participants of other users are never returned.
///
/// Expected: Ok(vec![own participant])
#[tokio::test]
async fn skips_foreign_participants() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_booking_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let user = factory::create_user(db).await?;
    let stranger = factory::create_user(db).await?;
    let own = factory::create_participant(db, user.id).await?;
    let foreign = factory::create_participant(db, stranger.id).await?;

    let repo = ParticipantRepository::new(db);
    let found = repo.find_many_for_user(user.id, &[foreign.id, own.id]).await?;

    assert_eq!(found.len(), 1);
    assert_eq!(found[0].id, own.id);

    Ok(())
}

/// Tests that results follow the order of the requested ids.
///
/// Expected: Ok(vec![second, first])
#[tokio::test]
async fn keeps_requested_order() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_booking_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let user = factory::create_user(db).await?;
    let first = factory::create_participant(db, user.id).await?;
    let second = factory::create_participant(db, user.id).await?;

    let repo = ParticipantRepository::new(db);
    let found = repo.find_many_for_user(user.id, &[second.id, first.id]).await?;

    assert_eq!(
        found.iter().map(|p| p.id).collect::<Vec<_>>(),
        vec![second.id, first.id]
    );

    Ok(())
}
