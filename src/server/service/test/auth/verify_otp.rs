use super::*;

fn registration(device_id: &str) -> RegistrationDetails {
    RegistrationDetails {
        first_name: "Asha".to_string(),
        last_name: "Rao".to_string(),
        role: UserRole::User,
        user_type: Some(UserType::Guardian),
        email: Some("asha@example.com".to_string()),
        password: Some("password123".to_string()),
        device_id: device_id.to_string(),
    }
}

/// Tests registration through a verified OTP.
///
/// Expected: user created with a verified mobile, tokens issued, code consumed
#[tokio::test]
async fn register_creates_user_and_signs_in() -> Result<(), AppError> {
    let test = TestBuilder::new().with_identity_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();
    let jwt = jwt_config();
    let otp = otp_service();
    let service = AuthService::new(db, &jwt, &otp);
    let mobile = Contact::Mobile("+919876543210".to_string());

    let code = otp.issue(OtpMode::Register, &mobile).await?;
    let params = VerifyOtpParams {
        mode: OtpMode::Register,
        contact: mobile.clone(),
        otp: code,
        action: OtpAction::Register(registration("phone")),
    };

    let outcome = service.verify_otp(params.clone(), None).await?;
    let OtpOutcome::Authenticated(user, tokens) = outcome else {
        panic!("expected a signed-in user");
    };
    assert_eq!(user.mobile.as_deref(), Some("+919876543210"));
    assert!(user.is_mobile_verified);
    assert!(!user.is_email_verified);
    assert_eq!(user.user_type, Some(UserType::Guardian));
    assert!(user.password_hash.is_some());
    assert!(!tokens.access_token.is_empty());

    // the mobile is now taken, so replaying is refused before the code is checked
    let replay = service.verify_otp(params, None).await;
    assert!(matches!(replay, Err(AppError::Conflict(_))));
    Ok(())
}

/// Tests that a wrong code does not create an account.
///
/// Expected: Err(InvalidOtp) and no user row
#[tokio::test]
async fn register_with_wrong_code_fails() -> Result<(), AppError> {
    let test = TestBuilder::new().with_identity_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();
    let jwt = jwt_config();
    let otp = otp_service();
    let mobile = Contact::Mobile("+919876543210".to_string());

    let code = otp.issue(OtpMode::Register, &mobile).await?;
    let wrong = if code == "000000" { "111111" } else { "000000" };

    let result = AuthService::new(db, &jwt, &otp)
        .verify_otp(
            VerifyOtpParams {
                mode: OtpMode::Register,
                contact: mobile.clone(),
                otp: wrong.to_string(),
                action: OtpAction::Register(registration("phone")),
            },
            None,
        )
        .await;

    assert!(matches!(
        result,
        Err(AppError::AuthErr(AuthError::InvalidOtp))
    ));
    assert!(UserRepository::new(db)
        .find_by_contact(&mobile)
        .await?
        .is_none());
    Ok(())
}

/// Tests that resetting a password through OTP replaces the hash and signs out every device.
///
/// Expected: PasswordReset; old password rejected, new password accepted
#[tokio::test]
async fn forgot_password_resets_and_revokes() -> Result<(), AppError> {
    let test = TestBuilder::new().with_identity_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();
    let jwt = jwt_config();
    let otp = otp_service();
    let service = AuthService::new(db, &jwt, &otp);

    let user = factory::user::UserFactory::new(db)
        .password_hash(hash_password("old-password".to_string()).await?)
        .build()
        .await?;
    let email = Contact::Email(user.email.clone().unwrap());
    let (_, session) = service
        .password_login(PasswordLoginParams {
            identifier: email.clone(),
            password: "old-password".to_string(),
            device_id: "laptop".to_string(),
        })
        .await?;

    let code = otp.issue(OtpMode::ForgotPassword, &email).await?;
    let outcome = service
        .verify_otp(
            VerifyOtpParams {
                mode: OtpMode::ForgotPassword,
                contact: email.clone(),
                otp: code,
                action: OtpAction::ForgotPassword {
                    new_password: "new-password".to_string(),
                },
            },
            None,
        )
        .await?;
    assert!(matches!(outcome, OtpOutcome::PasswordReset));

    let old = service
        .password_login(PasswordLoginParams {
            identifier: email.clone(),
            password: "old-password".to_string(),
            device_id: "laptop".to_string(),
        })
        .await;
    assert!(matches!(
        old,
        Err(AppError::AuthErr(AuthError::InvalidCredentials))
    ));

    let refresh = service
        .refresh(crate::server::model::auth::RefreshParams {
            refresh_token: session.refresh_token,
            device_id: "laptop".to_string(),
        })
        .await;
    assert!(refresh.is_err());

    assert!(service
        .password_login(PasswordLoginParams {
            identifier: email,
            password: "new-password".to_string(),
            device_id: "laptop".to_string(),
        })
        .await
        .is_ok());
    Ok(())
}

/// Tests that a profile update OTP moves the verified contact to the user.
///
/// Expected: ContactVerified with the new email marked verified
#[tokio::test]
async fn profile_update_replaces_contact() -> Result<(), AppError> {
    let test = TestBuilder::new().with_identity_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();
    let jwt = jwt_config();
    let otp = otp_service();

    let created = factory::user::UserFactory::new(db).no_email().build().await?;
    let user = UserRepository::new(db).find_by_id(created.id).await?.unwrap();
    let email = Contact::Email("fresh@example.com".to_string());

    let code = otp.issue(OtpMode::ProfileUpdate, &email).await?;
    let outcome = AuthService::new(db, &jwt, &otp)
        .verify_otp(
            VerifyOtpParams {
                mode: OtpMode::ProfileUpdate,
                contact: email,
                otp: code,
                action: OtpAction::ProfileUpdate,
            },
            Some(&user),
        )
        .await?;

    let OtpOutcome::ContactVerified(updated) = outcome else {
        panic!("expected a verified contact");
    };
    assert_eq!(updated.email.as_deref(), Some("fresh@example.com"));
    assert!(updated.is_email_verified);
    Ok(())
}
