use super::*;

/// Tests counting `self` participants, optionally excluding one.
///
/// Expected: 1 overall, 0 when the self participant is excluded
#[tokio::test]
async fn counts_self_participants() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_booking_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let user = factory::create_user(db).await?;
    let me = factory::participant::ParticipantFactory::new(db, user.id)
        .relation(ParticipantRelation::Myself)
        .build()
        .await?;
    factory::create_participant(db, user.id).await?;

    let repo = ParticipantRepository::new(db);

    assert_eq!(repo.count_self(user.id, None).await?, 1);
    assert_eq!(repo.count_self(user.id, Some(me.id)).await?, 0);

    Ok(())
}
