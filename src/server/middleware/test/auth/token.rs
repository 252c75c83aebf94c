use super::*;

/// Tests a request without an Authorization header.
///
/// Expected: Err(AuthError::MissingToken) from require, Ok(None) from optional
#[tokio::test]
async fn missing_header() -> Result<(), AppError> {
    let test = TestBuilder::new().with_identity_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();
    let jwt = jwt_config();
    let headers = HeaderMap::new();

    let guard = AuthGuard::new(db, &jwt, &headers);
    let result = guard.require(&[]).await;
    assert!(matches!(
        result,
        Err(AppError::AuthErr(AuthError::MissingToken))
    ));
    assert!(guard.optional().await?.is_none());

    Ok(())
}

/// Tests that a token signed with another secret is rejected, even by optional.
///
/// Expected: Err(AuthError::InvalidToken)
#[tokio::test]
async fn rejects_foreign_signature() -> Result<(), AppError> {
    let test = TestBuilder::new().with_identity_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();
    let user = factory::create_user(db).await?;
    let headers = bearer_for(db, user).await;

    let mut jwt = jwt_config();
    jwt.access_secret = "rotated-secret".to_string();

    let guard = AuthGuard::new(db, &jwt, &headers);
    assert!(matches!(
        guard.require(&[]).await,
        Err(AppError::AuthErr(AuthError::InvalidToken(_)))
    ));
    assert!(matches!(
        guard.optional().await,
        Err(AppError::AuthErr(AuthError::InvalidToken(_)))
    ));

    Ok(())
}

/// Tests that only the bearer scheme is accepted.
///
/// Expected: Err(AuthError::InvalidToken)
#[tokio::test]
async fn rejects_non_bearer_scheme() -> Result<(), AppError> {
    let test = TestBuilder::new().with_identity_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();
    let jwt = jwt_config();

    let mut headers = HeaderMap::new();
    headers.insert(AUTHORIZATION, HeaderValue::from_static("Basic dXNlcjpwYXNz"));

    let result = AuthGuard::new(db, &jwt, &headers).require(&[]).await;
    assert!(matches!(
        result,
        Err(AppError::AuthErr(AuthError::InvalidToken(_)))
    ));

    Ok(())
}

/// Tests that a refresh token cannot be used as an access token.
///
/// Expected: Err(AuthError::InvalidToken)
#[tokio::test]
async fn rejects_refresh_token() -> Result<(), AppError> {
    let test = TestBuilder::new().with_identity_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();
    let jwt = jwt_config();
    let user = User::from_entity(factory::create_user(db).await?);
    let pair = TokenService::new(db, &jwt).issue_pair(&user, "phone").await?;

    let mut headers = HeaderMap::new();
    headers.insert(
        AUTHORIZATION,
        HeaderValue::from_str(&format!("Bearer {}", pair.refresh_token)).unwrap(),
    );

    let result = AuthGuard::new(db, &jwt, &headers).require(&[]).await;
    assert!(matches!(
        result,
        Err(AppError::AuthErr(AuthError::InvalidToken(_)))
    ));

    Ok(())
}

/// Tests that deactivated accounts lose access with a still-valid token.
///
/// Expected: Err(AuthError::AccountInactive)
#[tokio::test]
async fn rejects_inactive_account() -> Result<(), AppError> {
    let test = TestBuilder::new().with_identity_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();
    let jwt = jwt_config();
    let user = factory::user::UserFactory::new(db).active(false).build().await?;
    let user_id = user.id;
    let headers = bearer_for(db, user).await;

    let result = AuthGuard::new(db, &jwt, &headers).require(&[]).await;
    match result {
        Err(AppError::AuthErr(AuthError::AccountInactive(id))) => assert_eq!(id, user_id),
        other => panic!("Expected AccountInactive, got: {:?}", other.map(|u| u.id)),
    }

    Ok(())
}

/// Tests an empty permission list with a valid token.
///
/// Expected: Ok(User) matching the token subject
#[tokio::test]
async fn empty_permission_list_grants_access() -> Result<(), AppError> {
    let test = TestBuilder::new().with_identity_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();
    let jwt = jwt_config();
    let user = factory::create_user(db).await?;
    let user_id = user.id;
    let headers = bearer_for(db, user).await;

    let guard = AuthGuard::new(db, &jwt, &headers);
    assert_eq!(guard.require(&[]).await?.id, user_id);
    assert_eq!(guard.optional().await?.map(|u| u.id), Some(user_id));

    Ok(())
}
