use super::*;

/// Tests that a new center starts as a draft and rejects unknown references.
///
/// Expected: draft on success; ValidationErr naming the sport and city otherwise
#[tokio::test]
async fn create_checks_references() -> Result<(), AppError> {
    let test = TestBuilder::new().with_center_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();
    let owner = academy(db).await?;
    let city = factory::create_city(db).await?;
    let sport = factory::create_sport(db).await?;
    let service = CenterService::new(db);

    let center = service.create(&owner, profile(city.id, sport.id)).await?;
    assert_eq!(center.status, CenterStatus::Draft);
    assert_eq!(center.owner_id, owner.id);

    let result = service.create(&owner, profile(9999, 9999)).await;
    match result {
        Err(AppError::ValidationErr(err)) => {
            assert!(err.has_field("sports[0].sport_id"));
            assert!(err.has_field("address.city_id"));
        }
        other => panic!("expected validation error, got {:?}", other.map(|c| c.id)),
    }
    Ok(())
}

/// Tests that publishing lists every missing field.
///
/// Expected: ValidationErr with bank_info and description, then Published once complete
#[tokio::test]
async fn publish_requires_complete_profile() -> Result<(), AppError> {
    let test = TestBuilder::new().with_center_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();
    let owner = academy(db).await?;
    let city = factory::create_city(db).await?;
    let sport = factory::create_sport(db).await?;
    let service = CenterService::new(db);

    let incomplete = CenterProfile {
        description: None,
        bank_info: None,
        ..profile(city.id, sport.id)
    };
    let center = service.create(&owner, incomplete).await?;

    match service.publish(&owner, center.id).await {
        Err(AppError::ValidationErr(err)) => {
            assert!(err.has_field("bank_info"));
            assert!(err.has_field("description"));
        }
        other => panic!("expected validation error, got {:?}", other.map(|c| c.status)),
    }

    service
        .update(&owner, center.id, profile(city.id, sport.id))
        .await?;
    let published = service.publish(&owner, center.id).await?;
    assert_eq!(published.status, CenterStatus::Published);

    let draft = service.unpublish(&owner, center.id).await?;
    assert_eq!(draft.status, CenterStatus::Draft);
    Ok(())
}

/// Tests that the admin status change validates publication too.
///
/// Expected: ValidationErr for a center without bank info
#[tokio::test]
async fn admin_publish_validates() -> Result<(), AppError> {
    let test = TestBuilder::new().with_center_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();
    let owner = academy(db).await?;
    let sport = factory::create_sport(db).await?;
    let center = factory::center::CoachingCenterFactory::new(db, owner.id)
        .sport(sport.id)
        .without_bank_info()
        .build()
        .await?;

    let result = CenterService::new(db)
        .admin_set_status(center.id, CenterStatus::Published)
        .await;

    assert!(matches!(result, Err(AppError::ValidationErr(_))));
    Ok(())
}
