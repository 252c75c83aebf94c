use super::*;

/// Tests role names are unique.
///
/// Expected: Err(Conflict) for the second "Support" role
#[tokio::test]
async fn role_names_are_unique() -> Result<(), AppError> {
    let test = TestBuilder::new().with_identity_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();
    let service = AdminService::new(db);

    let created = service.create_role(role("Support")).await?;
    assert!(created.permissions.allows(Section::Bookings, Action::View));
    assert!(!created.permissions.allows(Section::Bookings, Action::Update));

    let result = service.create_role(role("Support")).await;
    assert!(matches!(result, Err(AppError::Conflict(_))));
    Ok(())
}

/// Tests that assigned roles cannot be deleted.
///
/// Expected: Conflict while an admin holds the role, Ok once moved to another role
#[tokio::test]
async fn assigned_role_cannot_be_deleted() -> Result<(), AppError> {
    let test = TestBuilder::new().with_identity_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();
    let service = AdminService::new(db);
    let support = service.create_role(role("Support")).await?;
    let finance = service.create_role(role("Finance")).await?;

    let admin = service
        .create_admin(CreateAdminParams {
            first_name: "Ravi".to_string(),
            last_name: "Iyer".to_string(),
            email: "ravi@coachbase.example".to_string(),
            password: "password123".to_string(),
            role_id: support.id,
        })
        .await?;
    assert_eq!(admin.role, UserRole::Admin);
    assert_eq!(admin.admin_role_id, Some(support.id));

    assert!(matches!(
        service.delete_role(support.id).await,
        Err(AppError::Conflict(_))
    ));

    let moved = service.assign_role(admin.id, finance.id).await?;
    assert_eq!(moved.admin_role_id, Some(finance.id));
    service.delete_role(support.id).await?;
    assert!(matches!(
        service.delete_role(support.id).await,
        Err(AppError::NotFound(_))
    ));
    Ok(())
}

/// Tests that admin accounts need an existing role.
///
/// Expected: ValidationErr on role_id
#[tokio::test]
async fn create_admin_requires_known_role() -> Result<(), AppError> {
    let test = TestBuilder::new().with_identity_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let result = AdminService::new(db)
        .create_admin(CreateAdminParams {
            first_name: "Ravi".to_string(),
            last_name: "Iyer".to_string(),
            email: "ravi@coachbase.example".to_string(),
            password: "password123".to_string(),
            role_id: 4242,
        })
        .await;

    match result {
        Err(AppError::ValidationErr(err)) => assert!(err.has_field("role_id")),
        other => panic!("expected validation error, got {:?}", other.map(|u| u.id)),
    }
    Ok(())
}

/// Tests that roles are only assigned to admin accounts.
///
/// Expected: Err(BadRequest) for a learner
#[tokio::test]
async fn roles_only_for_admins() -> Result<(), AppError> {
    let test = TestBuilder::new().with_identity_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();
    let service = AdminService::new(db);
    let support = service.create_role(role("Support")).await?;
    let learner = factory::create_user(db).await?;

    let result = service.assign_role(learner.id, support.id).await;

    assert!(matches!(result, Err(AppError::BadRequest(_))));
    Ok(())
}
