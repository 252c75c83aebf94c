use super::*;

/// Tests that role checks require an exact match.
///
/// Expected: academy passes Role(Academy), learner is denied
#[tokio::test]
async fn requires_matching_role() -> Result<(), AppError> {
    let test = TestBuilder::new().with_identity_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();
    let jwt = jwt_config();

    let academy = factory::user::create_user_with_role(db, UserRole::Academy).await?;
    let headers = bearer_for(db, academy).await;
    let result = AuthGuard::new(db, &jwt, &headers)
        .require(&[Permission::Role(UserRole::Academy)])
        .await;
    assert!(result.is_ok());

    let learner = factory::create_user(db).await?;
    let learner_id = learner.id;
    let headers = bearer_for(db, learner).await;
    let result = AuthGuard::new(db, &jwt, &headers)
        .require(&[Permission::Role(UserRole::Academy)])
        .await;
    match result {
        Err(AppError::AuthErr(AuthError::AccessDenied(id, _))) => assert_eq!(id, learner_id),
        other => panic!("Expected AccessDenied, got: {:?}", other.map(|u| u.id)),
    }

    Ok(())
}

/// Tests that a super admin passes every role check.
///
/// Expected: Ok(User)
#[tokio::test]
async fn super_admin_passes_role_checks() -> Result<(), AppError> {
    let test = TestBuilder::new().with_identity_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();
    let jwt = jwt_config();
    let root = factory::user::create_user_with_role(db, UserRole::SuperAdmin).await?;
    let headers = bearer_for(db, root).await;

    let user = AuthGuard::new(db, &jwt, &headers)
        .require(&[
            Permission::Role(UserRole::Academy),
            Permission::Role(UserRole::User),
        ])
        .await?;
    assert!(user.is_super_admin());

    Ok(())
}
