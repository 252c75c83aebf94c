use super::*;

/// Tests revoking the tokens of one device.
///
/// Verifies that tokens on other devices of the same user stay live.
///
/// Expected: Ok(1), the other device's token unrevoked
#[tokio::test]
async fn revokes_only_that_device() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_identity_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let user = factory::user::create_user(db).await?;
    let expires_at = Utc::now() + Duration::days(30);

    let repo = RefreshTokenRepository::new(db);
    repo.create(user.id, "phone", "hash-phone".to_string(), expires_at)
        .await?;
    repo.create(user.id, "tablet", "hash-tablet".to_string(), expires_at)
        .await?;

    let revoked = repo.revoke_for_device(user.id, "phone").await?;

    assert_eq!(revoked, 1);
    let phone = repo.find_by_hash("hash-phone").await?.unwrap();
    let tablet = repo.find_by_hash("hash-tablet").await?.unwrap();
    assert!(phone.revoked_at.is_some());
    assert!(tablet.revoked_at.is_none());

    Ok(())
}

/// Tests that already revoked tokens are not counted again.
///
/// Expected: Ok(0) on the second call
#[tokio::test]
async fn is_idempotent() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_identity_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let user = factory::user::create_user(db).await?;

    let repo = RefreshTokenRepository::new(db);
    repo.create(
        user.id,
        "phone",
        "hash".to_string(),
        Utc::now() + Duration::days(1),
    )
    .await?;

    assert_eq!(repo.revoke_for_device(user.id, "phone").await?, 1);
    assert_eq!(repo.revoke_for_device(user.id, "phone").await?, 0);

    Ok(())
}
