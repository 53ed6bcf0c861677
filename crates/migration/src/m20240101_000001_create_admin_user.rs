//! Create `admin_user` table.
//!
//! Holds dashboard operators; passwords are stored as argon2 hashes.
use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(AdminUser::Table)
                    .if_not_exists()
                    .col(pk_auto(AdminUser::Id))
                    .col(string_len(AdminUser::Username, 64).unique_key().not_null())
                    .col(string_len(AdminUser::PasswordHash, 255).not_null())
                    .col(timestamp_with_time_zone(AdminUser::CreatedAt).not_null())
                    .col(timestamp_with_time_zone(AdminUser::UpdatedAt).not_null())
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager.drop_table(Table::drop().table(AdminUser::Table).to_owned()).await
    }
}

#[derive(DeriveIden)]
enum AdminUser { Table, Id, Username, PasswordHash, CreatedAt, UpdatedAt }
