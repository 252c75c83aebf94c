use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(AdminRole::Table)
                    .if_not_exists()
                    .col(pk_auto(AdminRole::Id))
                    .col(string_uniq(AdminRole::Name))
                    .col(text_null(AdminRole::Description))
                    .col(json(AdminRole::Permissions))
                    .col(
                        timestamp_with_time_zone(AdminRole::CreatedAt)
                            .default(Expr::current_timestamp()),
                    )
                    .col(
                        timestamp_with_time_zone(AdminRole::UpdatedAt)
                            .default(Expr::current_timestamp()),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(AdminRole::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
pub enum AdminRole {
    Table,
    Id,
    Name,
    Description,
    Permissions,
    CreatedAt,
    UpdatedAt,
}
