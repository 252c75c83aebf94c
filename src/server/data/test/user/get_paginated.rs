use super::*;

/// Tests listing users filtered by role.
///
/// Verifies that only academies are returned and that the total counts the
/// filtered rows, not the whole table.
///
/// Expected: Ok(Paginated) with 2 academies
#[tokio::test]
async fn filters_by_role() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_identity_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    factory::user::create_user(db).await?;
    factory::user::create_user_with_role(db, UserRole::Academy).await?;
    factory::user::create_user_with_role(db, UserRole::Academy).await?;

    let repo = UserRepository::new(db);
    let page = repo
        .get_paginated(Some(UserRole::Academy), PageRequest::new(0, Some(10)))
        .await?;

    assert_eq!(page.total, 2);
    assert!(page.items.iter().all(|u| u.role == UserRole::Academy));

    Ok(())
}

/// Tests that pages are sliced by `per_page`.
///
/// Expected: Ok(Paginated) with 2 items on page 0, 1 item on page 1, 2 total pages
#[tokio::test]
async fn slices_pages() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_identity_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    for _ in 0..3 {
        factory::user::create_user(db).await?;
    }

    let repo = UserRepository::new(db);
    let first = repo.get_paginated(None, PageRequest::new(0, Some(2))).await?;
    let second = repo.get_paginated(None, PageRequest::new(1, Some(2))).await?;

    assert_eq!(first.items.len(), 2);
    assert_eq!(second.items.len(), 1);
    assert_eq!(first.total_pages, 2);

    Ok(())
}
