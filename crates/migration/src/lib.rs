//! Migrator registering entity-specific migrations in dependency order.
//! Indexes are applied last.
pub use sea_orm_migration::prelude::*;

mod m20240101_000001_create_admin_user;
mod m20240101_000002_create_booking;
mod m20240101_000003_create_gallery_image;
mod m20240101_000004_create_home_image;
mod m20240101_000005_create_site_asset;
mod m20240101_000006_add_indexes;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20240101_000001_create_admin_user::Migration),
            Box::new(m20240101_000002_create_booking::Migration),
            Box::new(m20240101_000003_create_gallery_image::Migration),
            Box::new(m20240101_000004_create_home_image::Migration),
            Box::new(m20240101_000005_create_site_asset::Migration),
            // Indexes should always be applied last
            Box::new(m20240101_000006_add_indexes::Migration),
        ]
    }
}
