use super::*;

/// Tests inserting a booking with its participant lines.
///
/// Expected: Ok(Booking) pending with both lines and the quoted amounts
#[tokio::test]
async fn creates_pending_booking_with_lines() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_booking_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let (_, center, _, batch) = factory::helpers::create_batch_with_dependencies(db).await?;
    let user = factory::create_user(db).await?;
    let first = factory::create_participant(db, user.id).await?;
    let second = factory::create_participant(db, user.id).await?;

    let repo = BookingRepository::new(db);
    let booking = repo
        .create(NewBooking {
            booking_ref: "BKABCDEF1234".to_string(),
            user_id: user.id,
            batch_id: batch.id,
            center_id: center.id,
            quantity: 1,
            amount: 300000,
            currency: "INR".to_string(),
            lines: vec![
                BookingLine {
                    participant_id: first.id,
                    amount: 150000,
                },
                BookingLine {
                    participant_id: second.id,
                    amount: 150000,
                },
            ],
        })
        .await?;

    assert_eq!(booking.status, BookingStatus::Pending);
    assert_eq!(booking.payment.status, PaymentStatus::Pending);
    assert_eq!(booking.participants.len(), 2);

    let reloaded = repo.get_by_id(booking.id).await?.unwrap();
    assert_eq!(reloaded.participants, booking.participants);
    assert_eq!(reloaded.amount, 300000);

    Ok(())
}
