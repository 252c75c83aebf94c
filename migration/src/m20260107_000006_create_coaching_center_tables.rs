use sea_orm_migration::{prelude::*, schema::*};

use super::{
    m20260105_000002_create_user_table::User, m20260106_000004_create_catalog_tables::Sport,
    m20260106_000005_create_location_tables::City,
};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(CoachingCenter::Table)
                    .if_not_exists()
                    .col(pk_auto(CoachingCenter::Id))
                    .col(integer(CoachingCenter::OwnerId))
                    .col(string(CoachingCenter::Name))
                    .col(text_null(CoachingCenter::Description))
                    .col(string_null(CoachingCenter::Email))
                    .col(string_null(CoachingCenter::Mobile))
                    .col(string_null(CoachingCenter::AddressLine1))
                    .col(string_null(CoachingCenter::AddressLine2))
                    .col(integer_null(CoachingCenter::CityId))
                    .col(string_null(CoachingCenter::Pincode))
                    .col(double_null(CoachingCenter::Latitude))
                    .col(double_null(CoachingCenter::Longitude))
                    .col(json(CoachingCenter::FacilityIds))
                    .col(json(CoachingCenter::OperationalTiming))
                    .col(json_null(CoachingCenter::BankInfo))
                    .col(string(CoachingCenter::Status))
                    .col(
                        timestamp_with_time_zone(CoachingCenter::CreatedAt)
                            .default(Expr::current_timestamp()),
                    )
                    .col(
                        timestamp_with_time_zone(CoachingCenter::UpdatedAt)
                            .default(Expr::current_timestamp()),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_coaching_center_owner_id")
                            .from(CoachingCenter::Table, CoachingCenter::OwnerId)
                            .to(User::Table, User::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_coaching_center_city_id")
                            .from(CoachingCenter::Table, CoachingCenter::CityId)
                            .to(City::Table, City::Id)
                            .on_delete(ForeignKeyAction::SetNull)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(CenterSport::Table)
                    .if_not_exists()
                    .col(pk_auto(CenterSport::Id))
                    .col(integer(CenterSport::CenterId))
                    .col(integer(CenterSport::SportId))
                    .col(text_null(CenterSport::Description))
                    .col(json(CenterSport::Images))
                    .col(json(CenterSport::Videos))
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_center_sport_center_id")
                            .from(CenterSport::Table, CenterSport::CenterId)
                            .to(CoachingCenter::Table, CoachingCenter::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_center_sport_sport_id")
                            .from(CenterSport::Table, CenterSport::SportId)
                            .to(Sport::Table, Sport::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_center_sport_unique")
                    .table(CenterSport::Table)
                    .col(CenterSport::CenterId)
                    .col(CenterSport::SportId)
                    .unique()
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(CenterSport::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(CoachingCenter::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
pub enum CoachingCenter {
    Table,
    Id,
    OwnerId,
    Name,
    Description,
    Email,
    Mobile,
    AddressLine1,
    AddressLine2,
    CityId,
    Pincode,
    Latitude,
    Longitude,
    FacilityIds,
    OperationalTiming,
    BankInfo,
    Status,
    CreatedAt,
    UpdatedAt,
}

#[derive(DeriveIden)]
pub enum CenterSport {
    Table,
    Id,
    CenterId,
    SportId,
    Description,
    Images,
    Videos,
}
