//! Asset registry: gallery images, home slideshow images and keyed site
//! assets (logo). Uploads flow through the configured [`crate::storage`]
//! backend; rows live in the database.

pub mod domain;
pub mod service;

pub use service::AssetService;
