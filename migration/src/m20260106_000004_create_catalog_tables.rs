use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Sport::Table)
                    .if_not_exists()
                    .col(pk_auto(Sport::Id))
                    .col(string_uniq(Sport::Name))
                    .col(string_uniq(Sport::Slug))
                    .col(string_null(Sport::IconUrl))
                    .col(boolean(Sport::IsActive).default(true))
                    .col(
                        timestamp_with_time_zone(Sport::CreatedAt)
                            .default(Expr::current_timestamp()),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(Facility::Table)
                    .if_not_exists()
                    .col(pk_auto(Facility::Id))
                    .col(string_uniq(Facility::Name))
                    .col(string_null(Facility::IconUrl))
                    .col(boolean(Facility::IsActive).default(true))
                    .col(
                        timestamp_with_time_zone(Facility::CreatedAt)
                            .default(Expr::current_timestamp()),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Facility::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Sport::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
pub enum Sport {
    Table,
    Id,
    Name,
    Slug,
    IconUrl,
    IsActive,
    CreatedAt,
}

#[derive(DeriveIden)]
pub enum Facility {
    Table,
    Id,
    Name,
    IconUrl,
    IsActive,
    CreatedAt,
}
