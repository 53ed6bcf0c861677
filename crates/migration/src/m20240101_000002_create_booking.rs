//! Create `booking` table.
//!
//! Intake inserts rows with status `pending`; the status column only moves
//! through the transitions the service layer allows.
use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Booking::Table)
                    .if_not_exists()
                    .col(pk_auto(Booking::Id))
                    .col(string_len(Booking::Name, 128).not_null())
                    .col(string_len(Booking::Phone, 20).not_null())
                    // Optional contact email; NULL when the client gave none
                    .col(ColumnDef::new(Booking::Email).string_len(255).null())
                    .col(string_len(Booking::Package, 128).not_null())
                    .col(string_len(Booking::EventDate, 32).not_null())
                    .col(text(Booking::Details).not_null())
                    .col(string_len(Booking::Status, 16).not_null())
                    .col(timestamp_with_time_zone(Booking::CreatedAt).not_null())
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager.drop_table(Table::drop().table(Booking::Table).to_owned()).await
    }
}

#[derive(DeriveIden)]
enum Booking { Table, Id, Name, Phone, Email, Package, EventDate, Details, Status, CreatedAt }
