//! Create `home_image` table; same shape as `gallery_image`, kept as a
//! separate table to match the slideshow's independent ordering.
use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(HomeImage::Table)
                    .if_not_exists()
                    .col(pk_auto(HomeImage::Id))
                    .col(string_len(HomeImage::ImageUrl, 512).not_null())
                    .col(string_len(HomeImage::PublicId, 255).unique_key().not_null())
                    .col(string_len(HomeImage::Caption, 255).not_null())
                    .col(integer(HomeImage::DisplayOrder).not_null().default(0))
                    .col(boolean(HomeImage::IsActive).not_null().default(true))
                    .col(timestamp_with_time_zone(HomeImage::CreatedAt).not_null())
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager.drop_table(Table::drop().table(HomeImage::Table).to_owned()).await
    }
}

#[derive(DeriveIden)]
enum HomeImage { Table, Id, ImageUrl, PublicId, Caption, DisplayOrder, IsActive, CreatedAt }
