use sea_orm_migration::{prelude::*, schema::*};

use super::m20260109_000009_create_booking_tables::Booking;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(PaymentTransaction::Table)
                    .if_not_exists()
                    .col(pk_auto(PaymentTransaction::Id))
                    .col(integer(PaymentTransaction::BookingId))
                    .col(integer(PaymentTransaction::UserId))
                    .col(string(PaymentTransaction::Kind))
                    .col(string(PaymentTransaction::Status))
                    .col(big_integer(PaymentTransaction::Amount))
                    .col(string(PaymentTransaction::Currency))
                    .col(string_null(PaymentTransaction::GatewayOrderId))
                    .col(string_null(PaymentTransaction::GatewayPaymentId))
                    .col(string_null(PaymentTransaction::GatewayRefundId))
                    .col(text_null(PaymentTransaction::Note))
                    .col(
                        timestamp_with_time_zone(PaymentTransaction::CreatedAt)
                            .default(Expr::current_timestamp()),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_payment_transaction_booking_id")
                            .from(PaymentTransaction::Table, PaymentTransaction::BookingId)
                            .to(Booking::Table, Booking::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(PaymentTransaction::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
pub enum PaymentTransaction {
    Table,
    Id,
    BookingId,
    UserId,
    Kind,
    Status,
    Amount,
    Currency,
    GatewayOrderId,
    GatewayPaymentId,
    GatewayRefundId,
    Note,
    CreatedAt,
}
