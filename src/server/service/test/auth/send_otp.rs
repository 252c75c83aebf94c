use super::*;

/// Tests that registration OTPs are refused for numbers that already have an account.
///
/// Expected: Err(Conflict)
#[tokio::test]
async fn register_rejects_known_mobile() -> Result<(), AppError> {
    let test = TestBuilder::new().with_identity_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();
    let jwt = jwt_config();
    let otp = otp_service();
    let user = factory::create_user(db).await?;

    let result = AuthService::new(db, &jwt, &otp)
        .send_otp(
            SendOtpParams {
                mode: OtpMode::Register,
                contact: Contact::Mobile(user.mobile.unwrap()),
            },
            None,
        )
        .await;

    assert!(matches!(result, Err(AppError::Conflict(_))));
    Ok(())
}

/// Tests that login OTPs require an existing active account.
///
/// Expected: NotFound for an unknown number, AccountInactive for a deactivated user
#[tokio::test]
async fn login_requires_active_account() -> Result<(), AppError> {
    let test = TestBuilder::new().with_identity_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();
    let jwt = jwt_config();
    let otp = otp_service();
    let service = AuthService::new(db, &jwt, &otp);
    let inactive = factory::user::UserFactory::new(db).active(false).build().await?;

    let unknown = service
        .send_otp(
            SendOtpParams {
                mode: OtpMode::Login,
                contact: Contact::Mobile("+919999999999".to_string()),
            },
            None,
        )
        .await;
    assert!(matches!(unknown, Err(AppError::NotFound(_))));

    let deactivated = service
        .send_otp(
            SendOtpParams {
                mode: OtpMode::Login,
                contact: Contact::Mobile(inactive.mobile.unwrap()),
            },
            None,
        )
        .await;
    assert!(matches!(
        deactivated,
        Err(AppError::AuthErr(AuthError::AccountInactive(_)))
    ));
    Ok(())
}

/// Tests that password reset codes are only sent to accounts with a password.
///
/// Expected: NotFound for a passwordless account, Ok for one with a password
#[tokio::test]
async fn forgot_password_requires_password_account() -> Result<(), AppError> {
    let test = TestBuilder::new().with_identity_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();
    let jwt = jwt_config();
    let otp = otp_service();
    let service = AuthService::new(db, &jwt, &otp);

    let passwordless = factory::create_user(db).await?;
    let with_password = factory::user::UserFactory::new(db)
        .password_hash(hash_password("password123".to_string()).await?)
        .build()
        .await?;

    let result = service
        .send_otp(
            SendOtpParams {
                mode: OtpMode::ForgotPassword,
                contact: Contact::Email(passwordless.email.unwrap()),
            },
            None,
        )
        .await;
    assert!(matches!(result, Err(AppError::NotFound(_))));

    let expires_in = service
        .send_otp(
            SendOtpParams {
                mode: OtpMode::ForgotPassword,
                contact: Contact::Email(with_password.email.unwrap()),
            },
            None,
        )
        .await?;
    assert_eq!(expires_in, 300);
    Ok(())
}

/// Tests the profile update rules.
///
/// Expected: MissingToken without a user, Conflict for another account's email
#[tokio::test]
async fn profile_update_requires_user_and_free_contact() -> Result<(), AppError> {
    let test = TestBuilder::new().with_identity_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();
    let jwt = jwt_config();
    let otp = otp_service();
    let service = AuthService::new(db, &jwt, &otp);

    let user = UserRepository::new(db)
        .find_by_id(factory::create_user(db).await?.id)
        .await?
        .unwrap();
    let other = factory::create_user(db).await?;

    let anonymous = service
        .send_otp(
            SendOtpParams {
                mode: OtpMode::ProfileUpdate,
                contact: Contact::Email("new@example.com".to_string()),
            },
            None,
        )
        .await;
    assert!(matches!(
        anonymous,
        Err(AppError::AuthErr(AuthError::MissingToken))
    ));

    let taken = service
        .send_otp(
            SendOtpParams {
                mode: OtpMode::ProfileUpdate,
                contact: Contact::Email(other.email.unwrap()),
            },
            Some(&user),
        )
        .await;
    assert!(matches!(taken, Err(AppError::Conflict(_))));
    Ok(())
}
