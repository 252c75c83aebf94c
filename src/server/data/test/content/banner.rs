use super::*;

fn banner(title: &str, sort_order: i32) -> BannerParams {
    BannerParams {
        title: title.to_string(),
        image_url: "https://cdn.example.com/banner.jpg".to_string(),
        link_url: None,
        sort_order,
        is_active: true,
        starts_at: None,
        ends_at: None,
    }
}

/// Tests the public banner query.
///
/// Inactive banners, banners not started yet and expired banners are hidden; the rest
/// are ordered by `sort_order`.
///
/// Expected: Ok(vec!["First", "Second"])
#[tokio::test]
async fn returns_visible_banners_in_order() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_content_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let now = Utc::now();
    let repo = BannerRepository::new(db);
    repo.create(banner("Second", 2)).await?;
    repo.create(BannerParams {
        starts_at: Some(now - Duration::days(1)),
        ends_at: Some(now + Duration::days(1)),
        ..banner("First", 1)
    })
    .await?;
    repo.create(BannerParams {
        is_active: false,
        ..banner("Hidden", 0)
    })
    .await?;
    repo.create(BannerParams {
        starts_at: Some(now + Duration::days(1)),
        ..banner("Upcoming", 0)
    })
    .await?;
    repo.create(BannerParams {
        ends_at: Some(now - Duration::hours(1)),
        ..banner("Expired", 0)
    })
    .await?;

    let visible = repo.get_visible(now).await?;

    assert_eq!(
        visible.iter().map(|b| b.title.as_str()).collect::<Vec<_>>(),
        vec!["First", "Second"]
    );
    assert_eq!(repo.get_all().await?.len(), 5);

    Ok(())
}
