use sea_orm_migration::{prelude::*, schema::*};

use super::{
    m20260105_000002_create_user_table::User,
    m20260107_000006_create_coaching_center_tables::CoachingCenter,
    m20260107_000007_create_batch_table::Batch,
    m20260108_000008_create_participant_table::Participant,
};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Booking::Table)
                    .if_not_exists()
                    .col(pk_auto(Booking::Id))
                    .col(string_uniq(Booking::BookingRef))
                    .col(integer(Booking::UserId))
                    .col(integer(Booking::BatchId))
                    .col(integer(Booking::CenterId))
                    .col(integer(Booking::Quantity))
                    .col(big_integer(Booking::Amount))
                    .col(string(Booking::Currency))
                    .col(string(Booking::Status))
                    .col(string(Booking::PaymentStatus))
                    .col(string_null(Booking::GatewayOrderId).unique_key())
                    .col(string_null(Booking::GatewayPaymentId))
                    .col(string_null(Booking::GatewaySignature))
                    .col(text_null(Booking::FailureReason))
                    .col(timestamp_with_time_zone_null(Booking::PaidAt))
                    .col(
                        timestamp_with_time_zone(Booking::CreatedAt)
                            .default(Expr::current_timestamp()),
                    )
                    .col(
                        timestamp_with_time_zone(Booking::UpdatedAt)
                            .default(Expr::current_timestamp()),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_booking_user_id")
                            .from(Booking::Table, Booking::UserId)
                            .to(User::Table, User::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_booking_batch_id")
                            .from(Booking::Table, Booking::BatchId)
                            .to(Batch::Table, Batch::Id)
                            .on_delete(ForeignKeyAction::Restrict)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_booking_center_id")
                            .from(Booking::Table, Booking::CenterId)
                            .to(CoachingCenter::Table, CoachingCenter::Id)
                            .on_delete(ForeignKeyAction::Restrict)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(BookingParticipant::Table)
                    .if_not_exists()
                    .col(pk_auto(BookingParticipant::Id))
                    .col(integer(BookingParticipant::BookingId))
                    .col(integer(BookingParticipant::ParticipantId))
                    .col(big_integer(BookingParticipant::Amount))
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_booking_participant_booking_id")
                            .from(BookingParticipant::Table, BookingParticipant::BookingId)
                            .to(Booking::Table, Booking::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_booking_participant_participant_id")
                            .from(BookingParticipant::Table, BookingParticipant::ParticipantId)
                            .to(Participant::Table, Participant::Id)
                            .on_delete(ForeignKeyAction::Restrict)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(BookingParticipant::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Booking::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
pub enum Booking {
    Table,
    Id,
    BookingRef,
    UserId,
    BatchId,
    CenterId,
    Quantity,
    Amount,
    Currency,
    Status,
    PaymentStatus,
    GatewayOrderId,
    GatewayPaymentId,
    GatewaySignature,
    FailureReason,
    PaidAt,
    CreatedAt,
    UpdatedAt,
}

#[derive(DeriveIden)]
pub enum BookingParticipant {
    Table,
    Id,
    BookingId,
    ParticipantId,
    Amount,
}
