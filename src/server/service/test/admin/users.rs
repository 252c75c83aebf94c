use super::*;

/// Tests that deactivation signs the user out.
///
/// Expected: user inactive and every refresh token revoked
#[tokio::test]
async fn deactivation_revokes_sessions() -> Result<(), AppError> {
    let test = TestBuilder::new().with_identity_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();
    let actor = User::from_entity(
        factory::user::create_user_with_role(db, UserRole::SuperAdmin).await?,
    );
    let learner = factory::create_user(db).await?;
    let tokens = RefreshTokenRepository::new(db);
    let expires = chrono::Utc::now() + chrono::Duration::days(1);
    tokens
        .create(learner.id, "phone", hash_token("phone-token"), expires)
        .await?;

    let updated = AdminService::new(db)
        .set_user_status(&actor, learner.id, false)
        .await?;

    assert!(!updated.is_active);
    let stored = tokens
        .find_by_hash(&hash_token("phone-token"))
        .await?
        .unwrap();
    assert!(stored.revoked_at.is_some());
    Ok(())
}

/// Tests that super admins stay active.
///
/// Expected: Err(BadRequest)
#[tokio::test]
async fn super_admin_cannot_be_deactivated() -> Result<(), AppError> {
    let test = TestBuilder::new().with_identity_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();
    let actor = User::from_entity(
        factory::user::create_user_with_role(db, UserRole::SuperAdmin).await?,
    );
    let other = factory::user::create_user_with_role(db, UserRole::SuperAdmin).await?;

    let result = AdminService::new(db)
        .set_user_status(&actor, other.id, false)
        .await;

    assert!(matches!(result, Err(AppError::BadRequest(_))));
    Ok(())
}

/// Tests filtering the user list by role.
///
/// Expected: only the two academies
#[tokio::test]
async fn lists_users_by_role() -> Result<(), AppError> {
    let test = TestBuilder::new().with_identity_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();
    factory::create_user(db).await?;
    factory::user::create_user_with_role(db, UserRole::Academy).await?;
    factory::user::create_user_with_role(db, UserRole::Academy).await?;

    let page = AdminService::new(db)
        .list_users(Some(UserRole::Academy), PageRequest::default())
        .await?;

    assert_eq!(page.total, 2);
    assert!(page.items.iter().all(|u| u.role == UserRole::Academy));
    Ok(())
}

/// Tests the super admin bootstrap runs once.
///
/// Expected: true on the first call, false afterwards
#[tokio::test]
async fn bootstraps_super_admin_once() -> Result<(), AppError> {
    let test = TestBuilder::new().with_identity_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();
    let config = SuperAdminConfig {
        email: "root@coachbase.example".to_string(),
        password: "password123".to_string(),
    };
    let service = AdminService::new(db);

    assert!(service.bootstrap_super_admin(&config).await?);
    assert!(!service.bootstrap_super_admin(&config).await?);

    let page = service
        .list_users(Some(UserRole::SuperAdmin), PageRequest::default())
        .await?;
    assert_eq!(page.total, 1);
    assert_eq!(page.items[0].email.as_deref(), Some("root@coachbase.example"));
    Ok(())
}
