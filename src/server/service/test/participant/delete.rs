use super::*;

/// Tests that participants on an active booking cannot be deleted.
///
/// Expected: Err(Conflict)
#[tokio::test]
async fn active_booking_blocks_delete() -> Result<(), AppError> {
    let test = TestBuilder::new().with_booking_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();
    let (_, _, _, batch) = factory::helpers::create_batch_with_dependencies(db).await?;
    let user = factory::create_user(db).await?;
    let participant = factory::create_participant(db, user.id).await?;
    factory::create_booking(db, user.id, &batch, participant.id).await?;

    let result = ParticipantService::new(db)
        .delete(&User::from_entity(user), participant.id)
        .await;

    assert!(matches!(result, Err(AppError::Conflict(_))));
    Ok(())
}

/// Tests that booking history also keeps participants alive.
///
/// Expected: Err(Conflict) for a participant on a cancelled booking
#[tokio::test]
async fn cancelled_booking_still_blocks_delete() -> Result<(), AppError> {
    let test = TestBuilder::new().with_booking_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();
    let (_, _, _, batch) = factory::helpers::create_batch_with_dependencies(db).await?;
    let user = factory::create_user(db).await?;
    let participant = factory::create_participant(db, user.id).await?;
    factory::booking::BookingFactory::new(db, user.id, &batch)
        .participant(participant.id)
        .status(BookingStatus::Cancelled, PaymentStatus::Cancelled)
        .build()
        .await?;

    let result = ParticipantService::new(db)
        .delete(&User::from_entity(user), participant.id)
        .await;

    assert!(matches!(result, Err(AppError::Conflict(_))));
    Ok(())
}

/// Tests deleting an unbooked participant.
///
/// Expected: Ok, then NotFound on a second delete
#[tokio::test]
async fn deletes_unbooked_participant() -> Result<(), AppError> {
    let test = TestBuilder::new().with_booking_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();
    let user = User::from_entity(factory::create_user(db).await?);
    let participant = factory::create_participant(db, user.id).await?;
    let service = ParticipantService::new(db);

    service.delete(&user, participant.id).await?;

    assert!(service.list(&user).await?.is_empty());
    assert!(matches!(
        service.delete(&user, participant.id).await,
        Err(AppError::NotFound(_))
    ));
    Ok(())
}
