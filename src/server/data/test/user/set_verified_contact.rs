use super::*;

/// Tests replacing a user's email with a verified address.
///
/// Expected: email updated and flagged verified, mobile untouched
#[tokio::test]
async fn replaces_email_and_marks_verified() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_identity_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let user = factory::user::UserFactory::new(db).no_email().build().await?;

    let repo = UserRepository::new(db);
    repo.set_verified_contact(user.id, &Contact::Email("new@example.com".to_string()))
        .await?;

    let updated = repo.find_by_id(user.id).await?.unwrap();
    assert_eq!(updated.email.as_deref(), Some("new@example.com"));
    assert!(updated.is_email_verified);
    assert_eq!(updated.mobile, user.mobile);

    Ok(())
}
