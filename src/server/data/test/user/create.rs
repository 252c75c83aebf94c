use super::*;

fn student_params(mobile: &str) -> CreateUserParams {
    CreateUserParams {
        role: UserRole::User,
        user_type: Some(UserType::Student),
        first_name: "Asha".to_string(),
        last_name: "Rao".to_string(),
        email: None,
        mobile: Some(mobile.to_string()),
        password_hash: None,
        is_email_verified: false,
        is_mobile_verified: true,
        firebase_uid: None,
        admin_role_id: None,
    }
}

/// Tests creating a user from registration parameters.
///
/// Verifies that the repository stores every field and marks the account active.
///
/// Expected: Ok(User) with the supplied fields
#[tokio::test]
async fn creates_active_user() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_identity_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let repo = UserRepository::new(db);
    let user = repo.create(student_params("+919812345678")).await?;

    assert_eq!(user.role, UserRole::User);
    assert_eq!(user.user_type, Some(UserType::Student));
    assert_eq!(user.mobile.as_deref(), Some("+919812345678"));
    assert!(user.is_mobile_verified);
    assert!(user.is_active);

    Ok(())
}

/// Tests that a mobile number can only be registered once.
///
/// Expected: Err(DbErr) on the second insert
#[tokio::test]
async fn rejects_duplicate_mobile() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_identity_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let repo = UserRepository::new(db);
    repo.create(student_params("+919812345678")).await?;
    let result = repo.create(student_params("+919812345678")).await;

    assert!(result.is_err());

    Ok(())
}
