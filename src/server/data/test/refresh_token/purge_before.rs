use super::*;

/// Tests purging expired tokens.
///
/// Verifies that live tokens survive while expired ones are deleted.
///
/// Expected: Ok(1), live token still present
#[tokio::test]
async fn deletes_expired_tokens() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_identity_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let user = factory::user::create_user(db).await?;
    let now = Utc::now();

    let repo = RefreshTokenRepository::new(db);
    repo.create(user.id, "old", "expired".to_string(), now - Duration::days(2))
        .await?;
    repo.create(user.id, "new", "live".to_string(), now + Duration::days(2))
        .await?;

    let purged = repo.purge_before(now - Duration::days(1)).await?;

    assert_eq!(purged, 1);
    assert!(repo.find_by_hash("expired").await?.is_none());
    assert!(repo.find_by_hash("live").await?.is_some());

    Ok(())
}
