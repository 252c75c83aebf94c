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
                    .table(CmsPage::Table)
                    .if_not_exists()
                    .col(pk_auto(CmsPage::Id))
                    .col(string_uniq(CmsPage::Slug))
                    .col(string(CmsPage::Title))
                    .col(text(CmsPage::Content))
                    .col(boolean(CmsPage::IsPublished).default(false))
                    .col(
                        timestamp_with_time_zone(CmsPage::CreatedAt)
                            .default(Expr::current_timestamp()),
                    )
                    .col(
                        timestamp_with_time_zone(CmsPage::UpdatedAt)
                            .default(Expr::current_timestamp()),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(Banner::Table)
                    .if_not_exists()
                    .col(pk_auto(Banner::Id))
                    .col(string(Banner::Title))
                    .col(string(Banner::ImageUrl))
                    .col(string_null(Banner::LinkUrl))
                    .col(integer(Banner::SortOrder).default(0))
                    .col(boolean(Banner::IsActive).default(true))
                    .col(timestamp_with_time_zone_null(Banner::StartsAt))
                    .col(timestamp_with_time_zone_null(Banner::EndsAt))
                    .col(
                        timestamp_with_time_zone(Banner::CreatedAt)
                            .default(Expr::current_timestamp()),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(Notification::Table)
                    .if_not_exists()
                    .col(pk_auto(Notification::Id))
                    .col(integer_null(Notification::UserId))
                    .col(string(Notification::Title))
                    .col(text(Notification::Body))
                    .col(timestamp_with_time_zone_null(Notification::ReadAt))
                    .col(
                        timestamp_with_time_zone(Notification::CreatedAt)
                            .default(Expr::current_timestamp()),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_notification_user_id")
                            .from(Notification::Table, Notification::UserId)
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
            .drop_table(Table::drop().table(Notification::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Banner::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(CmsPage::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
pub enum CmsPage {
    Table,
    Id,
    Slug,
    Title,
    Content,
    IsPublished,
    CreatedAt,
    UpdatedAt,
}

#[derive(DeriveIden)]
pub enum Banner {
    Table,
    Id,
    Title,
    ImageUrl,
    LinkUrl,
    SortOrder,
    IsActive,
    StartsAt,
    EndsAt,
    CreatedAt,
}

#[derive(DeriveIden)]
pub enum Notification {
    Table,
    Id,
    UserId,
    Title,
    Body,
    ReadAt,
    CreatedAt,
}
