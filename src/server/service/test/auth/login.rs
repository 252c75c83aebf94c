use super::*;

async fn user_with_password(
    db: &sea_orm::DatabaseConnection,
    role: UserRole,
    active: bool,
) -> Result<entity::user::Model, AppError> {
    Ok(factory::user::UserFactory::new(db)
        .role(role)
        .password_hash(hash_password("password123".to_string()).await?)
        .active(active)
        .build()
        .await?)
}

fn login(email: &str, password: &str) -> PasswordLoginParams {
    PasswordLoginParams {
        identifier: Contact::Email(email.to_string()),
        password: password.to_string(),
        device_id: "web".to_string(),
    }
}

/// Tests password login with correct and incorrect credentials.
///
/// Expected: Ok for the right password, InvalidCredentials otherwise
#[tokio::test]
async fn password_login_checks_credentials() -> Result<(), AppError> {
    let test = TestBuilder::new().with_identity_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();
    let jwt = jwt_config();
    let otp = otp_service();
    let service = AuthService::new(db, &jwt, &otp);
    let user = user_with_password(db, UserRole::User, true).await?;
    let email = user.email.unwrap();

    let (signed_in, _) = service.password_login(login(&email, "password123")).await?;
    assert_eq!(signed_in.id, user.id);

    for params in [
        login(&email, "wrong-password"),
        login("nobody@example.com", "password123"),
    ] {
        assert!(matches!(
            service.password_login(params).await,
            Err(AppError::AuthErr(AuthError::InvalidCredentials))
        ));
    }
    Ok(())
}

/// Tests that deactivated accounts cannot sign in.
///
/// Expected: Err(AccountInactive)
#[tokio::test]
async fn password_login_rejects_inactive() -> Result<(), AppError> {
    let test = TestBuilder::new().with_identity_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();
    let jwt = jwt_config();
    let otp = otp_service();
    let user = user_with_password(db, UserRole::Academy, false).await?;

    let result = AuthService::new(db, &jwt, &otp)
        .password_login(login(&user.email.unwrap(), "password123"))
        .await;

    assert!(matches!(
        result,
        Err(AppError::AuthErr(AuthError::AccountInactive(_)))
    ));
    Ok(())
}

/// Tests that only administrators may use the admin login.
///
/// Expected: AccessDenied for an academy, Ok for admin and super admin
#[tokio::test]
async fn admin_login_requires_admin_role() -> Result<(), AppError> {
    let test = TestBuilder::new().with_identity_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();
    let jwt = jwt_config();
    let otp = otp_service();
    let service = AuthService::new(db, &jwt, &otp);

    let academy = user_with_password(db, UserRole::Academy, true).await?;
    let result = service
        .admin_login(login(&academy.email.unwrap(), "password123"))
        .await;
    assert!(matches!(
        result,
        Err(AppError::AuthErr(AuthError::AccessDenied(_, _)))
    ));

    for role in [UserRole::Admin, UserRole::SuperAdmin] {
        let admin = user_with_password(db, role, true).await?;
        let (user, _) = service
            .admin_login(login(&admin.email.unwrap(), "password123"))
            .await?;
        assert_eq!(user.role, role);
    }
    Ok(())
}
