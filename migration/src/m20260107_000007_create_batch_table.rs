use sea_orm_migration::{prelude::*, schema::*};

use super::{
    m20260106_000004_create_catalog_tables::Sport,
    m20260107_000006_create_coaching_center_tables::CoachingCenter,
};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Batch::Table)
                    .if_not_exists()
                    .col(pk_auto(Batch::Id))
                    .col(integer(Batch::CenterId))
                    .col(integer(Batch::SportId))
                    .col(string(Batch::Name))
                    .col(text_null(Batch::Description))
                    .col(json(Batch::ScheduleDays))
                    .col(time(Batch::StartTime))
                    .col(time(Batch::EndTime))
                    .col(date(Batch::StartDate))
                    .col(date_null(Batch::EndDate))
                    .col(integer(Batch::Capacity))
                    .col(integer(Batch::AgeMin))
                    .col(integer(Batch::AgeMax))
                    .col(string(Batch::FeeType))
                    .col(json(Batch::FeeConfiguration))
                    .col(boolean(Batch::IsActive).default(true))
                    .col(
                        timestamp_with_time_zone(Batch::CreatedAt)
                            .default(Expr::current_timestamp()),
                    )
                    .col(
                        timestamp_with_time_zone(Batch::UpdatedAt)
                            .default(Expr::current_timestamp()),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_batch_center_id")
                            .from(Batch::Table, Batch::CenterId)
                            .to(CoachingCenter::Table, CoachingCenter::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_batch_sport_id")
                            .from(Batch::Table, Batch::SportId)
                            .to(Sport::Table, Sport::Id)
                            .on_delete(ForeignKeyAction::Restrict)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Batch::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
pub enum Batch {
    Table,
    Id,
    CenterId,
    SportId,
    Name,
    Description,
    ScheduleDays,
    StartTime,
    EndTime,
    StartDate,
    EndDate,
    Capacity,
    AgeMin,
    AgeMax,
    FeeType,
    FeeConfiguration,
    IsActive,
    CreatedAt,
    UpdatedAt,
}
