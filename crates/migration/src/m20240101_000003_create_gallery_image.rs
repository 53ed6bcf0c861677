//! Create `gallery_image` table with soft-delete flag and explicit ordering.
use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(GalleryImage::Table)
                    .if_not_exists()
                    .col(pk_auto(GalleryImage::Id))
                    .col(string_len(GalleryImage::ImageUrl, 512).not_null())
                    .col(string_len(GalleryImage::PublicId, 255).unique_key().not_null())
                    .col(string_len(GalleryImage::Caption, 255).not_null())
                    .col(integer(GalleryImage::DisplayOrder).not_null().default(0))
                    .col(boolean(GalleryImage::IsActive).not_null().default(true))
                    .col(timestamp_with_time_zone(GalleryImage::CreatedAt).not_null())
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager.drop_table(Table::drop().table(GalleryImage::Table).to_owned()).await
    }
}

#[derive(DeriveIden)]
enum GalleryImage { Table, Id, ImageUrl, PublicId, Caption, DisplayOrder, IsActive, CreatedAt }
