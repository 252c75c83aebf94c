use super::*;

/// Tests a partial profile update.
///
/// Verifies that only the supplied fields change.
///
/// Expected: Ok(Some(User)) with the new first name and the old last name
#[tokio::test]
async fn updates_only_supplied_fields() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_identity_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let user = factory::user::UserFactory::new(db)
        .name("Old", "Name")
        .build()
        .await?;

    let repo = UserRepository::new(db);
    let updated = repo
        .update_profile(
            user.id,
            UpdateProfileParams {
                first_name: Some("New".to_string()),
                last_name: None,
                user_type: Some(UserType::Guardian),
            },
        )
        .await?
        .unwrap();

    assert_eq!(updated.first_name, "New");
    assert_eq!(updated.last_name, "Name");
    assert_eq!(updated.user_type, Some(UserType::Guardian));

    Ok(())
}

/// Tests updating a user that does not exist.
///
/// Expected: Ok(None)
#[tokio::test]
async fn returns_none_for_missing_user() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_identity_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let repo = UserRepository::new(db);
    let result = repo
        .update_profile(
            999,
            UpdateProfileParams {
                first_name: Some("Ghost".to_string()),
                last_name: None,
                user_type: None,
            },
        )
        .await?;

    assert!(result.is_none());

    Ok(())
}
