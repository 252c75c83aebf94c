use sea_orm_migration::{prelude::*, schema::*};

use super::m20260105_000001_create_admin_role_table::AdminRole;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(User::Table)
                    .if_not_exists()
                    .col(pk_auto(User::Id))
                    .col(string(User::Role))
                    .col(string_null(User::UserType))
                    .col(string(User::FirstName))
                    .col(string(User::LastName))
                    .col(string_null(User::Email).unique_key())
                    .col(string_null(User::Mobile).unique_key())
                    .col(string_null(User::PasswordHash))
                    .col(boolean(User::IsEmailVerified).default(false))
                    .col(boolean(User::IsMobileVerified).default(false))
                    .col(string_null(User::FirebaseUid).unique_key())
                    .col(integer_null(User::AdminRoleId))
                    .col(boolean(User::IsActive).default(true))
                    .col(
                        timestamp_with_time_zone(User::CreatedAt)
                            .default(Expr::current_timestamp()),
                    )
                    .col(
                        timestamp_with_time_zone(User::UpdatedAt)
                            .default(Expr::current_timestamp()),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_user_admin_role_id")
                            .from(User::Table, User::AdminRoleId)
                            .to(AdminRole::Table, AdminRole::Id)
                            .on_delete(ForeignKeyAction::SetNull)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(User::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
pub enum User {
    Table,
    Id,
    Role,
    UserType,
    FirstName,
    LastName,
    Email,
    Mobile,
    PasswordHash,
    IsEmailVerified,
    IsMobileVerified,
    FirebaseUid,
    AdminRoleId,
    IsActive,
    CreatedAt,
    UpdatedAt,
}
