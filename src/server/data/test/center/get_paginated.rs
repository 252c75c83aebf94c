use super::*;

/// Tests the public listing filters.
///
/// Creates a published center offering the sport, a published center without it and a
/// draft offering it. Only the first matches `status = published, sport_id`.
///
/// Expected: Ok(Paginated) containing exactly the matching center
#[tokio::test]
async fn filters_by_status_and_sport() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_center_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let academy = factory::user::create_user_with_role(db, UserRole::Academy).await?;
    let sport = factory::create_sport(db).await?;
    let other = factory::create_sport(db).await?;

    let matching = factory::center::CoachingCenterFactory::new(db, academy.id)
        .published()
        .sport(sport.id)
        .build()
        .await?;
    factory::center::CoachingCenterFactory::new(db, academy.id)
        .published()
        .sport(other.id)
        .build()
        .await?;
    factory::center::CoachingCenterFactory::new(db, academy.id)
        .sport(sport.id)
        .build()
        .await?;

    let repo = CenterRepository::new(db);
    let page = repo
        .get_paginated(
            CenterFilter {
                sport_id: Some(sport.id),
                city_id: None,
                status: Some(CenterStatus::Published),
            },
            PageRequest::default(),
        )
        .await?;

    assert_eq!(page.total, 1);
    assert_eq!(page.items[0].id, matching.id);

    Ok(())
}

/// Tests filtering by city.
///
/// Expected: Ok(Paginated) with only the center in that city
#[tokio::test]
async fn filters_by_city() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_center_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let academy = factory::user::create_user_with_role(db, UserRole::Academy).await?;
    let city = factory::create_city(db).await?;
    let in_city = factory::center::CoachingCenterFactory::new(db, academy.id)
        .city(city.id)
        .build()
        .await?;
    factory::create_center(db, academy.id).await?;

    let repo = CenterRepository::new(db);
    let page = repo
        .get_paginated(
            CenterFilter {
                city_id: Some(city.id),
                ..Default::default()
            },
            PageRequest::default(),
        )
        .await?;

    assert_eq!(page.total, 1);
    assert_eq!(page.items[0].id, in_city.id);

    Ok(())
}
