use super::*;

/// Tests creating a center with its sports.
///
/// Verifies that the center starts as a draft and that sport media round-trip
/// through the `center_sport` table.
///
/// Expected: Ok(Center) in draft with one sport and its image
#[tokio::test]
async fn creates_draft_with_sports() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_center_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let academy = factory::user::create_user_with_role(db, UserRole::Academy).await?;
    let sport = factory::create_sport(db).await?;

    let repo = CenterRepository::new(db);
    let center = repo.create(academy.id, profile_with_sport(sport.id)).await?;

    assert_eq!(center.status, CenterStatus::Draft);
    assert_eq!(center.owner_id, academy.id);
    assert!(center.offers_sport(sport.id));
    assert_eq!(
        center.profile.sports[0].images,
        vec!["https://cdn.example.com/a.jpg".to_string()]
    );

    let reloaded = repo.get_by_id(center.id).await?.unwrap();
    assert_eq!(reloaded.profile, center.profile);

    Ok(())
}
