use sea_orm_migration::{prelude::*, schema::*};

use super::m20260105_000002_create_user_table::User;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Participant::Table)
                    .if_not_exists()
                    .col(pk_auto(Participant::Id))
                    .col(integer(Participant::UserId))
                    .col(string(Participant::FirstName))
                    .col(string(Participant::LastName))
                    .col(date(Participant::DateOfBirth))
                    .col(string(Participant::Gender))
                    .col(string(Participant::Relation))
                    .col(
                        timestamp_with_time_zone(Participant::CreatedAt)
                            .default(Expr::current_timestamp()),
                    )
                    .col(
                        timestamp_with_time_zone(Participant::UpdatedAt)
                            .default(Expr::current_timestamp()),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_participant_user_id")
                            .from(Participant::Table, Participant::UserId)
                            .to(User::Table, User::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Participant::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
pub enum Participant {
    Table,
    Id,
    UserId,
    FirstName,
    LastName,
    DateOfBirth,
    Gender,
    Relation,
    CreatedAt,
    UpdatedAt,
}
