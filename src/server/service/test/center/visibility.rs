use super::*;

/// Tests that drafts are hidden from everybody but the owner and administrators.
///
/// Expected: NotFound for anonymous and other users, visible with details for owner/admin
#[tokio::test]
async fn drafts_are_private() -> Result<(), AppError> {
    let test = TestBuilder::new().with_center_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();
    let owner = academy(db).await?;
    let stranger = User::from_entity(factory::create_user(db).await?);
    let admin = User::from_entity(
        factory::user::create_user_with_role(db, UserRole::SuperAdmin).await?,
    );
    let center = factory::center::create_center(db, owner.id).await?;
    let service = CenterService::new(db);

    assert!(matches!(
        service.get_visible(None, center.id).await,
        Err(AppError::NotFound(_))
    ));
    assert!(matches!(
        service.get_visible(Some(&stranger), center.id).await,
        Err(AppError::NotFound(_))
    ));

    let (_, owner_details) = service.get_visible(Some(&owner), center.id).await?;
    assert!(owner_details);
    let (_, admin_details) = service.get_visible(Some(&admin), center.id).await?;
    assert!(admin_details);
    Ok(())
}

/// Tests that the public listing only contains published centers.
///
/// Expected: only the published center listed, even when a draft status is requested
#[tokio::test]
async fn public_listing_shows_published_only() -> Result<(), AppError> {
    let test = TestBuilder::new().with_center_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();
    let (_, published, _, _) = factory::helpers::create_batch_with_dependencies(db).await?;
    let owner = academy(db).await?;
    factory::center::create_center(db, owner.id).await?;
    let service = CenterService::new(db);

    let page = service
        .list_public(
            CenterFilter {
                status: Some(CenterStatus::Draft),
                ..Default::default()
            },
            PageRequest::default(),
        )
        .await?;

    assert_eq!(page.total, 1);
    assert_eq!(page.items[0].id, published.id);

    let all = service
        .admin_list(CenterFilter::default(), PageRequest::default())
        .await?;
    assert_eq!(all.total, 2);
    Ok(())
}
