use super::*;

/// Tests that an admin is limited to the actions granted by their role.
///
/// Expected: bookings view allowed, bookings update and users view denied
#[tokio::test]
async fn admin_checks_role_matrix() -> Result<(), AppError> {
    let test = TestBuilder::new().with_identity_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();
    let jwt = jwt_config();
    let role = factory::admin_role::AdminRoleFactory::new(db)
        .name("Support")
        .grant("bookings", &["view"])
        .build()
        .await?;
    let admin = factory::user::UserFactory::new(db)
        .role(UserRole::Admin)
        .admin_role(role.id)
        .build()
        .await?;
    let headers = bearer_for(db, admin).await;
    let guard = AuthGuard::new(db, &jwt, &headers);

    assert!(guard
        .require(&[Permission::Admin(Section::Bookings, Action::View)])
        .await
        .is_ok());

    match guard
        .require(&[Permission::Admin(Section::Bookings, Action::Update)])
        .await
    {
        Err(AppError::AuthErr(AuthError::AccessDenied(_, msg))) => {
            assert!(msg.contains("update"));
            assert!(msg.contains("bookings"));
        }
        other => panic!("Expected AccessDenied, got: {:?}", other.map(|u| u.id)),
    }

    assert!(matches!(
        guard
            .require(&[
                Permission::Admin(Section::Bookings, Action::View),
                Permission::Admin(Section::Users, Action::View),
            ])
            .await,
        Err(AppError::AuthErr(AuthError::AccessDenied(_, _)))
    ));

    Ok(())
}

/// Tests that admins without a role and non-admin accounts are denied.
///
/// Expected: Err(AuthError::AccessDenied) for both
#[tokio::test]
async fn denies_admin_without_role_and_non_admins() -> Result<(), AppError> {
    let test = TestBuilder::new().with_identity_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();
    let jwt = jwt_config();
    let permission = [Permission::Admin(Section::Dashboard, Action::View)];

    let roleless = factory::user::create_user_with_role(db, UserRole::Admin).await?;
    let headers = bearer_for(db, roleless).await;
    assert!(matches!(
        AuthGuard::new(db, &jwt, &headers).require(&permission).await,
        Err(AppError::AuthErr(AuthError::AccessDenied(_, _)))
    ));

    let academy = factory::user::create_user_with_role(db, UserRole::Academy).await?;
    let headers = bearer_for(db, academy).await;
    assert!(matches!(
        AuthGuard::new(db, &jwt, &headers).require(&permission).await,
        Err(AppError::AuthErr(AuthError::AccessDenied(_, _)))
    ));

    Ok(())
}

/// Tests that a super admin bypasses the role matrix.
///
/// Expected: Ok(User) for every section
#[tokio::test]
async fn super_admin_bypasses_matrix() -> Result<(), AppError> {
    let test = TestBuilder::new().with_identity_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();
    let jwt = jwt_config();
    let root = factory::user::create_user_with_role(db, UserRole::SuperAdmin).await?;
    let headers = bearer_for(db, root).await;

    let permissions: Vec<Permission> = Section::ALL
        .into_iter()
        .map(|section| Permission::Admin(section, Action::Delete))
        .collect();
    let user = AuthGuard::new(db, &jwt, &headers)
        .require(&permissions)
        .await?;
    assert_eq!(user.role, UserRole::SuperAdmin);

    Ok(())
}
