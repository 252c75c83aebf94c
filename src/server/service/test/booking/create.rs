use super::*;
use crate::server::data::booking::BookingRepository;

/// Tests booking two participants on a monthly batch for three months.
///
/// Expected: pending booking priced at 2 x 3 x 150000 with one line per participant
#[tokio::test]
async fn creates_pending_booking_from_quote() -> Result<(), AppError> {
    let test = TestBuilder::new().with_booking_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();
    let (_, _, _, batch) = factory::helpers::create_batch_with_dependencies(db).await?;
    let user = User::from_entity(factory::create_user(db).await?);
    let first = factory::create_participant(db, user.id).await?;
    let second = factory::create_participant(db, user.id).await?;

    let booking = BookingService::new(db)
        .create(
            &user,
            CreateBookingParams {
                batch_id: batch.id,
                participant_ids: vec![first.id, second.id],
                quantity: 3,
            },
            "INR",
        )
        .await?;

    assert!(booking.booking_ref.starts_with("BK"));
    assert_eq!(booking.status, BookingStatus::Pending);
    assert_eq!(booking.payment.status, PaymentStatus::Pending);
    assert_eq!(booking.amount, 900_000);
    assert_eq!(booking.currency, "INR");
    assert_eq!(booking.participants.len(), 2);
    assert!(booking.participants.iter().all(|l| l.amount == 450_000));
    Ok(())
}

/// Tests that inactive batches and unpublished centers cannot be booked.
///
/// Expected: ValidationErr on batch_id for both
#[tokio::test]
async fn rejects_closed_batches() -> Result<(), AppError> {
    let test = TestBuilder::new().with_booking_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();
    let (academy, center, sport, _) = factory::helpers::create_batch_with_dependencies(db).await?;
    let inactive = factory::batch::BatchFactory::new(db, center.id, sport.id)
        .active(false)
        .build()
        .await?;
    let draft = factory::center::CoachingCenterFactory::new(db, academy.id)
        .sport(sport.id)
        .build()
        .await?;
    let draft_batch = factory::create_batch(db, draft.id, sport.id).await?;
    let user = User::from_entity(factory::create_user(db).await?);
    let participant = factory::create_participant(db, user.id).await?;
    let service = BookingService::new(db);

    for batch_id in [inactive.id, draft_batch.id, 9999] {
        match service
            .create(&user, request(batch_id, vec![participant.id]), "INR")
            .await
        {
            Err(AppError::ValidationErr(err)) => assert!(err.has_field("batch_id")),
            other => panic!("expected validation error, got {:?}", other.map(|b| b.id)),
        }
    }
    Ok(())
}

/// Tests that a participant cannot hold two live bookings on one batch.
///
/// Expected: Err(Conflict) for the second booking, Ok again after cancelling the first
#[tokio::test]
async fn rejects_double_booking() -> Result<(), AppError> {
    let test = TestBuilder::new().with_booking_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();
    let (_, _, _, batch) = factory::helpers::create_batch_with_dependencies(db).await?;
    let user = User::from_entity(factory::create_user(db).await?);
    let participant = factory::create_participant(db, user.id).await?;
    let service = BookingService::new(db);

    let first = service
        .create(&user, request(batch.id, vec![participant.id]), "INR")
        .await?;
    let second = service
        .create(&user, request(batch.id, vec![participant.id]), "INR")
        .await;
    assert!(matches!(second, Err(AppError::Conflict(_))));

    service.cancel(&user, first.id).await?;
    service
        .create(&user, request(batch.id, vec![participant.id]), "INR")
        .await?;
    Ok(())
}

/// Tests that bookings stop once the batch is full.
///
/// Expected: Err(Conflict) when two participants ask for the last seat
#[tokio::test]
async fn rejects_over_capacity() -> Result<(), AppError> {
    let test = TestBuilder::new().with_booking_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();
    let (_, center, sport, _) = factory::helpers::create_batch_with_dependencies(db).await?;
    let batch = factory::batch::BatchFactory::new(db, center.id, sport.id)
        .capacity(2)
        .build()
        .await?;
    let other = factory::create_user(db).await?;
    let seated = factory::create_participant(db, other.id).await?;
    factory::create_booking(db, other.id, &batch, seated.id).await?;

    let user = User::from_entity(factory::create_user(db).await?);
    let first = factory::create_participant(db, user.id).await?;
    let second = factory::create_participant(db, user.id).await?;

    let result = BookingService::new(db)
        .create(&user, request(batch.id, vec![first.id, second.id]), "INR")
        .await;

    assert!(matches!(result, Err(AppError::Conflict(_))));
    Ok(())
}

/// Tests two learners racing for the last seat of a batch.
///
/// Expected: exactly one booking succeeds, the other gets Err(Conflict), seats stay
/// within capacity
#[tokio::test]
async fn concurrent_bookings_respect_capacity() -> Result<(), AppError> {
    let test = TestBuilder::new().with_booking_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();
    let (_, center, sport, _) = factory::helpers::create_batch_with_dependencies(db).await?;
    let batch = factory::batch::BatchFactory::new(db, center.id, sport.id)
        .capacity(1)
        .build()
        .await?;
    let alice = User::from_entity(factory::create_user(db).await?);
    let alice_child = factory::create_participant(db, alice.id).await?;
    let bob = User::from_entity(factory::create_user(db).await?);
    let bob_child = factory::create_participant(db, bob.id).await?;
    let service = BookingService::new(db);

    let (first, second) = tokio::join!(
        service.create(&alice, request(batch.id, vec![alice_child.id]), "INR"),
        service.create(&bob, request(batch.id, vec![bob_child.id]), "INR"),
    );

    let results = [first, second];
    assert_eq!(results.iter().filter(|r| r.is_ok()).count(), 1);
    assert!(results
        .iter()
        .any(|r| matches!(r, Err(AppError::Conflict(_)))));
    assert_eq!(BookingRepository::new(db).seats_taken(batch.id).await?, 1);
    Ok(())
}

/// Tests that a user's bookings are private.
///
/// Expected: owner lists and reads the booking, another user gets NotFound
#[tokio::test]
async fn bookings_are_private() -> Result<(), AppError> {
    let test = TestBuilder::new().with_booking_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();
    let (_, _, _, batch) = factory::helpers::create_batch_with_dependencies(db).await?;
    let owner = User::from_entity(factory::create_user(db).await?);
    let participant = factory::create_participant(db, owner.id).await?;
    let booking = factory::create_booking(db, owner.id, &batch, participant.id).await?;
    let stranger = User::from_entity(factory::create_user(db).await?);
    let service = BookingService::new(db);

    let page = service.list_for_user(&owner, PageRequest::default()).await?;
    assert_eq!(page.total, 1);
    assert_eq!(service.get_for_user(&owner, booking.id).await?.id, booking.id);

    assert!(matches!(
        service.get_for_user(&stranger, booking.id).await,
        Err(AppError::NotFound(_))
    ));
    assert_eq!(
        service
            .list_for_user(&stranger, PageRequest::default())
            .await?
            .total,
        0
    );
    Ok(())
}
