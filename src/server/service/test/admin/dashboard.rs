use super::*;

/// Tests the dashboard aggregates.
///
/// Expected: counts per role, learner type and status; revenue net of refunds
#[tokio::test]
async fn aggregates_dashboard_figures() -> Result<(), AppError> {
    let test = TestBuilder::new().with_booking_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();
    let (_, _, _, batch) = factory::helpers::create_batch_with_dependencies(db).await?;
    let student = factory::user::UserFactory::new(db)
        .user_type(Some(UserType::Student))
        .build()
        .await?;
    factory::user::UserFactory::new(db)
        .user_type(Some(UserType::Guardian))
        .build()
        .await?;
    let participant = factory::create_participant(db, student.id).await?;
    let paid = factory::booking::BookingFactory::new(db, student.id, &batch)
        .participant(participant.id)
        .status(BookingStatus::Confirmed, PaymentStatus::Success)
        .build()
        .await?;

    let ledger = TransactionRepository::new(db);
    for (kind, amount) in [
        (TransactionKind::Payment, 150_000),
        (TransactionKind::Refund, 50_000),
    ] {
        ledger
            .create(NewTransaction {
                booking_id: paid.id,
                user_id: student.id,
                kind,
                status: TransactionStatus::Success,
                amount,
                currency: "INR".to_string(),
                gateway_order_id: None,
                gateway_payment_id: None,
                gateway_refund_id: None,
                note: None,
            })
            .await?;
    }

    let dashboard = AdminService::new(db).dashboard().await?;

    assert_eq!(dashboard.users_by_role.get("academy"), Some(&1));
    assert_eq!(dashboard.users_by_role.get("user"), Some(&2));
    assert_eq!(dashboard.students, 1);
    assert_eq!(dashboard.guardians, 1);
    assert_eq!(dashboard.centers_by_status.get("published"), Some(&1));
    assert_eq!(dashboard.bookings_by_status.get("confirmed"), Some(&1));
    assert_eq!(dashboard.payments_by_status.get("success"), Some(&1));
    assert_eq!(dashboard.revenue, 100_000);
    assert_eq!(dashboard.bookings_last_30_days, 1);
    Ok(())
}
