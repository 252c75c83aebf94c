use super::*;

/// Tests that a user sees their own notifications and broadcasts only.
///
/// Expected: Ok(Paginated) with 2 items
#[tokio::test]
async fn lists_own_and_broadcast() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_content_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let user = factory::create_user(db).await?;
    let other = factory::create_user(db).await?;

    let repo = NotificationRepository::new(db);
    for user_id in [Some(user.id), Some(other.id), None] {
        repo.create(NotificationParams {
            user_id,
            title: "Hello".to_string(),
            body: "Welcome".to_string(),
        })
        .await?;
    }

    let page = repo.get_for_user(user.id, PageRequest::default()).await?;

    assert_eq!(page.total, 2);
    assert!(page
        .items
        .iter()
        .all(|n| n.user_id.is_none() || n.user_id == Some(user.id)));

    Ok(())
}

/// Tests marking notifications read.
///
/// A user may mark their own notification but neither another user's nor a broadcast.
///
/// Expected: Some with read_at for own, None for the others
#[tokio::test]
async fn marks_only_own_notifications_read() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_content_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let user = factory::create_user(db).await?;
    let other = factory::create_user(db).await?;

    let repo = NotificationRepository::new(db);
    let own = repo
        .create(NotificationParams {
            user_id: Some(user.id),
            title: "Booking".to_string(),
            body: "Confirmed".to_string(),
        })
        .await?;
    let foreign = repo
        .create(NotificationParams {
            user_id: Some(other.id),
            title: "Booking".to_string(),
            body: "Confirmed".to_string(),
        })
        .await?;
    let broadcast = repo
        .create(NotificationParams {
            user_id: None,
            title: "News".to_string(),
            body: "New sports".to_string(),
        })
        .await?;

    let read = repo.mark_read(user.id, own.id).await?;
    assert!(read.and_then(|n| n.read_at).is_some());
    assert!(repo.mark_read(user.id, foreign.id).await?.is_none());
    assert!(repo.mark_read(user.id, broadcast.id).await?.is_none());

    Ok(())
}
