use super::*;

/// Tests that a learner can hold only one `self` participant.
///
/// Expected: second `self` participant rejected with Conflict, children still allowed
#[tokio::test]
async fn allows_single_self_participant() -> Result<(), AppError> {
    let test = TestBuilder::new().with_booking_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();
    let user = User::from_entity(factory::create_user(db).await?);
    let service = ParticipantService::new(db);

    service.create(&user, params(ParticipantRelation::Myself)).await?;
    let second = service.create(&user, params(ParticipantRelation::Myself)).await;
    assert!(matches!(second, Err(AppError::Conflict(_))));

    service.create(&user, params(ParticipantRelation::Child)).await?;
    assert_eq!(service.list(&user).await?.len(), 2);
    Ok(())
}

/// Tests that the existing `self` participant can be edited without tripping the limit.
///
/// Expected: Ok when updating the same participant, Conflict when relabelling another
#[tokio::test]
async fn update_keeps_single_self_participant() -> Result<(), AppError> {
    let test = TestBuilder::new().with_booking_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();
    let user = User::from_entity(factory::create_user(db).await?);
    let service = ParticipantService::new(db);

    let me = service.create(&user, params(ParticipantRelation::Myself)).await?;
    let child = service.create(&user, params(ParticipantRelation::Child)).await?;

    let renamed = service
        .update(
            &user,
            me.id,
            ParticipantParams {
                first_name: "Ani".to_string(),
                ..params(ParticipantRelation::Myself)
            },
        )
        .await?;
    assert_eq!(renamed.first_name, "Ani");

    let result = service
        .update(&user, child.id, params(ParticipantRelation::Myself))
        .await;
    assert!(matches!(result, Err(AppError::Conflict(_))));
    Ok(())
}

/// Tests that participants of other users are invisible.
///
/// Expected: Err(NotFound)
#[tokio::test]
async fn cannot_update_foreign_participant() -> Result<(), AppError> {
    let test = TestBuilder::new().with_booking_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();
    let owner = factory::create_user(db).await?;
    let participant = factory::create_participant(db, owner.id).await?;
    let stranger = User::from_entity(factory::create_user(db).await?);

    let result = ParticipantService::new(db)
        .update(&stranger, participant.id, params(ParticipantRelation::Child))
        .await;

    assert!(matches!(result, Err(AppError::NotFound(_))));
    Ok(())
}
