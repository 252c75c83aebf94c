use super::*;

/// Tests finding a user by a mobile contact.
///
/// Expected: Ok(Some(User)) for the owner of the number
#[tokio::test]
async fn finds_user_by_mobile() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_identity_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let user = factory::user::UserFactory::new(db)
        .mobile("+919800000001")
        .build()
        .await?;

    let repo = UserRepository::new(db);
    let found = repo
        .find_by_contact(&Contact::Mobile("+919800000001".to_string()))
        .await?;

    assert_eq!(found.map(|u| u.id), Some(user.id));

    Ok(())
}

/// Tests finding a user by an email contact.
///
/// Expected: Ok(Some(User)) for the owner of the address
#[tokio::test]
async fn finds_user_by_email() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_identity_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let user = factory::user::UserFactory::new(db)
        .email("coach@example.com")
        .build()
        .await?;

    let repo = UserRepository::new(db);
    let found = repo
        .find_by_contact(&Contact::Email("coach@example.com".to_string()))
        .await?;

    assert_eq!(found.map(|u| u.id), Some(user.id));

    Ok(())
}

/// Tests looking up a contact nobody owns.
///
/// Expected: Ok(None)
#[tokio::test]
async fn returns_none_for_unknown_contact() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_identity_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    factory::user::create_user(db).await?;

    let repo = UserRepository::new(db);
    let found = repo
        .find_by_contact(&Contact::Mobile("+919899999999".to_string()))
        .await?;

    assert!(found.is_none());

    Ok(())
}
