use super::*;

/// Tests that centers with bookings cannot be deleted.
///
/// Expected: Err(Conflict)
#[tokio::test]
async fn center_with_booking_is_kept() -> Result<(), AppError> {
    let test = TestBuilder::new().with_booking_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();
    let (academy_row, center, _, batch) =
        factory::helpers::create_batch_with_dependencies(db).await?;
    let learner = factory::create_user(db).await?;
    let participant = factory::create_participant(db, learner.id).await?;
    factory::create_booking(db, learner.id, &batch, participant.id).await?;

    let result = CenterService::new(db)
        .delete(&User::from_entity(academy_row), center.id)
        .await;

    assert!(matches!(result, Err(AppError::Conflict(_))));
    Ok(())
}

/// Tests deleting a center without bookings.
///
/// Expected: Ok, then NotFound when fetched
#[tokio::test]
async fn deletes_center_without_bookings() -> Result<(), AppError> {
    let test = TestBuilder::new().with_booking_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();
    let (academy_row, center, _, _) = factory::helpers::create_batch_with_dependencies(db).await?;
    let service = CenterService::new(db);

    service
        .delete(&User::from_entity(academy_row), center.id)
        .await?;

    assert!(matches!(
        service.get(center.id).await,
        Err(AppError::NotFound(_))
    ));
    Ok(())
}
