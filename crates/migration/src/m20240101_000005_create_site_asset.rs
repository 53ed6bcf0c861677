//! Create `site_asset` table. One row per asset type (logo, favicon, ...);
//! writes are upserts keyed by `asset_type`.
use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(SiteAsset::Table)
                    .if_not_exists()
                    .col(pk_auto(SiteAsset::Id))
                    .col(string_len(SiteAsset::AssetType, 64).unique_key().not_null())
                    .col(string_len(SiteAsset::ImageUrl, 512).not_null())
                    .col(string_len(SiteAsset::PublicId, 255).not_null())
                    .col(string_len(SiteAsset::AltText, 255).not_null())
                    .col(timestamp_with_time_zone(SiteAsset::UpdatedAt).not_null())
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager.drop_table(Table::drop().table(SiteAsset::Table).to_owned()).await
    }
}

#[derive(DeriveIden)]
enum SiteAsset { Table, Id, AssetType, ImageUrl, PublicId, AltText, UpdatedAt }
