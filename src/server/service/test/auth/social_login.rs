use super::*;

fn verifier(uid: &str, email: Option<&str>, email_verified: bool) -> FakeVerifier {
    FakeVerifier {
        token: "id-token".to_string(),
        identity: SocialIdentity {
            uid: uid.to_string(),
            email: email.map(str::to_string),
            email_verified,
            name: Some("Ravi Kumar".to_string()),
            phone_number: None,
        },
    }
}

fn params() -> SocialLoginParams {
    SocialLoginParams {
        id_token: "id-token".to_string(),
        device_id: "web".to_string(),
        role: UserRole::User,
        user_type: Some(UserType::Student),
    }
}

/// Tests that social login is refused when no verifier is configured.
///
/// Expected: Err(SocialLoginUnavailable)
#[tokio::test]
async fn requires_configured_verifier() -> Result<(), AppError> {
    let test = TestBuilder::new().with_identity_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();
    let jwt = jwt_config();
    let otp = otp_service();

    let result = AuthService::new(db, &jwt, &otp)
        .social_login(params(), None)
        .await;

    assert!(matches!(
        result,
        Err(AppError::AuthErr(AuthError::SocialLoginUnavailable))
    ));
    Ok(())
}

/// Tests that the first social login creates an account and later ones reuse it.
///
/// Expected: same user id on both logins, names split from the display name
#[tokio::test]
async fn creates_then_reuses_account() -> Result<(), AppError> {
    let test = TestBuilder::new().with_identity_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();
    let jwt = jwt_config();
    let otp = otp_service();
    let service = AuthService::new(db, &jwt, &otp);
    let verifier = verifier("uid-1", Some("Ravi@Example.com"), true);

    let (created, _) = service.social_login(params(), Some(&verifier)).await?;
    assert_eq!(created.first_name, "Ravi");
    assert_eq!(created.last_name, "Kumar");
    assert_eq!(created.email.as_deref(), Some("ravi@example.com"));
    assert!(created.is_email_verified);
    assert_eq!(created.firebase_uid.as_deref(), Some("uid-1"));

    let (again, _) = service.social_login(params(), Some(&verifier)).await?;
    assert_eq!(again.id, created.id);
    Ok(())
}

/// Tests that a verified provider email links to an existing account.
///
/// Expected: existing user returned and the uid linked
#[tokio::test]
async fn links_by_verified_email() -> Result<(), AppError> {
    let test = TestBuilder::new().with_identity_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();
    let jwt = jwt_config();
    let otp = otp_service();
    let existing = factory::user::UserFactory::new(db)
        .email("linked@example.com")
        .build()
        .await?;

    let (user, _) = AuthService::new(db, &jwt, &otp)
        .social_login(
            params(),
            Some(&verifier("uid-2", Some("linked@example.com"), true)),
        )
        .await?;

    assert_eq!(user.id, existing.id);
    let stored = UserRepository::new(db).find_by_id(existing.id).await?.unwrap();
    assert_eq!(stored.firebase_uid.as_deref(), Some("uid-2"));
    Ok(())
}

/// Tests that an unverified provider email is neither linked nor stored.
///
/// Expected: a new account without an email
#[tokio::test]
async fn ignores_unverified_email() -> Result<(), AppError> {
    let test = TestBuilder::new().with_identity_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();
    let jwt = jwt_config();
    let otp = otp_service();
    let existing = factory::user::UserFactory::new(db)
        .email("victim@example.com")
        .build()
        .await?;

    let (user, _) = AuthService::new(db, &jwt, &otp)
        .social_login(
            params(),
            Some(&verifier("uid-3", Some("victim@example.com"), false)),
        )
        .await?;

    assert_ne!(user.id, existing.id);
    assert!(user.email.is_none());
    Ok(())
}
