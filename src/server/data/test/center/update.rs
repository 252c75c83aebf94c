use super::*;

/// Tests that an update replaces the sport list.
///
/// Expected: Ok(Some(Center)) offering only the new sport
#[tokio::test]
async fn replaces_sports() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_center_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let academy = factory::user::create_user_with_role(db, UserRole::Academy).await?;
    let cricket = factory::create_sport(db).await?;
    let tennis = factory::create_sport(db).await?;

    let repo = CenterRepository::new(db);
    let center = repo
        .create(academy.id, profile_with_sport(cricket.id))
        .await?;
    let updated = repo
        .update(center.id, profile_with_sport(tennis.id))
        .await?
        .unwrap();

    assert!(updated.offers_sport(tennis.id));
    assert!(!updated.offers_sport(cricket.id));
    assert_eq!(updated.profile.sports.len(), 1);

    Ok(())
}

/// Tests updating a center that does not exist.
///
/// Expected: Ok(None)
#[tokio::test]
async fn returns_none_for_missing_center() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_center_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let repo = CenterRepository::new(db);
    let result = repo.update(42, CenterProfile::default()).await?;

    assert!(result.is_none());

    Ok(())
}
