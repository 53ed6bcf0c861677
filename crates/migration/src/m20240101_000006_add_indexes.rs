use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // Booking: the dashboard lists newest-first
        manager
            .create_index(
                Index::create()
                    .name("idx_booking_created_at")
                    .table(Booking::Table)
                    .col(Booking::CreatedAt)
                    .to_owned(),
            )
            .await?;

        // Booking: status counters on the dashboard
        manager
            .create_index(
                Index::create()
                    .name("idx_booking_status")
                    .table(Booking::Table)
                    .col(Booking::Status)
                    .to_owned(),
            )
            .await?;

        // Image listings filter on is_active and sort by display_order
        manager
            .create_index(
                Index::create()
                    .name("idx_gallery_active_order")
                    .table(GalleryImage::Table)
                    .col(GalleryImage::IsActive)
                    .col(GalleryImage::DisplayOrder)
                    .to_owned(),
            )
            .await?;
        manager
            .create_index(
                Index::create()
                    .name("idx_home_active_order")
                    .table(HomeImage::Table)
                    .col(HomeImage::IsActive)
                    .col(HomeImage::DisplayOrder)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_index(Index::drop().name("idx_booking_created_at").table(Booking::Table).to_owned())
            .await?;
        manager
            .drop_index(Index::drop().name("idx_booking_status").table(Booking::Table).to_owned())
            .await?;
        manager
            .drop_index(Index::drop().name("idx_gallery_active_order").table(GalleryImage::Table).to_owned())
            .await?;
        manager
            .drop_index(Index::drop().name("idx_home_active_order").table(HomeImage::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum Booking { Table, CreatedAt, Status }

#[derive(DeriveIden)]
enum GalleryImage { Table, IsActive, DisplayOrder }

#[derive(DeriveIden)]
enum HomeImage { Table, IsActive, DisplayOrder }
