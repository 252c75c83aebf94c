use super::*;

/// Tests that only the owner may edit a center.
///
/// Expected: Err(AccessDenied) for another academy
#[tokio::test]
async fn other_academy_cannot_update() -> Result<(), AppError> {
    let test = TestBuilder::new().with_center_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();
    let owner = academy(db).await?;
    let intruder = academy(db).await?;
    let city = factory::create_city(db).await?;
    let sport = factory::create_sport(db).await?;
    let service = CenterService::new(db);
    let center = service.create(&owner, profile(city.id, sport.id)).await?;

    let result = service
        .update(&intruder, center.id, profile(city.id, sport.id))
        .await;

    assert!(matches!(
        result,
        Err(AppError::AuthErr(AuthError::AccessDenied(_, _)))
    ));
    Ok(())
}

/// Tests that a published center cannot be edited into an unpublishable state.
///
/// Expected: Err(ValidationErr) on bank_info
#[tokio::test]
async fn published_center_stays_publishable() -> Result<(), AppError> {
    let test = TestBuilder::new().with_center_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();
    let owner = academy(db).await?;
    let city = factory::create_city(db).await?;
    let sport = factory::create_sport(db).await?;
    let service = CenterService::new(db);
    let center = service.create(&owner, profile(city.id, sport.id)).await?;
    service.publish(&owner, center.id).await?;

    let result = service
        .update(
            &owner,
            center.id,
            CenterProfile {
                bank_info: None,
                ..profile(city.id, sport.id)
            },
        )
        .await;

    match result {
        Err(AppError::ValidationErr(err)) => assert!(err.has_field("bank_info")),
        other => panic!("expected validation error, got {:?}", other.map(|c| c.id)),
    }
    Ok(())
}

/// Tests that a sport taught by an active batch cannot be dropped from the center.
///
/// Expected: Err(ValidationErr) on sports
#[tokio::test]
async fn cannot_drop_sport_with_active_batch() -> Result<(), AppError> {
    let test = TestBuilder::new().with_center_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();
    let (academy_row, center, _, _) = factory::helpers::create_batch_with_dependencies(db).await?;
    let owner = User::from_entity(academy_row);
    let other_sport = factory::create_sport(db).await?;

    let result = CenterService::new(db)
        .update(
            &owner,
            center.id,
            profile(center.city_id.unwrap(), other_sport.id),
        )
        .await;

    match result {
        Err(AppError::ValidationErr(err)) => assert!(err.has_field("sports")),
        other => panic!("expected validation error, got {:?}", other.map(|c| c.id)),
    }
    Ok(())
}
