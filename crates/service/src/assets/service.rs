use std::sync::Arc;

use sea_orm::DatabaseConnection;
use tracing::{info, instrument};

use super::domain::UploadedFile;
use crate::errors::ServiceError;
use crate::storage::ImageStorage;

/// Gallery listing cap inherited from the public site.
pub const GALLERY_LIST_LIMIT: u64 = 20;

/// Registry service for every uploaded-image kind. Rows are soft-deleted
/// uniformly; stored objects are never removed.
pub struct AssetService {
    db: DatabaseConnection,
    storage: Arc<dyn ImageStorage>,
}

impl AssetService {
    pub fn new(db: DatabaseConnection, storage: Arc<dyn ImageStorage>) -> Self {
        Self { db, storage }
    }

    pub fn backend_name(&self) -> &'static str {
        self.storage.backend_name()
    }

    fn validate_upload(file: &UploadedFile) -> Result<(), ServiceError> {
        if file.is_empty() {
            return Err(ServiceError::Validation("No image".into()));
        }
        Ok(())
    }

    // ---- gallery ----

    #[instrument(skip(self, file), fields(file = %file.name))]
    pub async fn upload_gallery(&self, file: UploadedFile, caption: &str) -> Result<models::gallery_image::Model, ServiceError> {
        Self::validate_upload(&file)?;
        let stored = self.storage.put(&file.name, &file.content_type, file.bytes).await?;
        let row = models::gallery_image::create(&self.db, &stored.url, &stored.public_id, caption, 0).await?;
        info!(public_id = %row.public_id, "gallery image uploaded");
        Ok(row)
    }

    pub async fn list_gallery(&self) -> Result<Vec<models::gallery_image::Model>, ServiceError> {
        Ok(models::gallery_image::list_active(&self.db, GALLERY_LIST_LIMIT).await?)
    }

    pub async fn delete_gallery(&self, public_id: &str) -> Result<bool, ServiceError> {
        Ok(models::gallery_image::soft_delete_by_public_id(&self.db, public_id).await?)
    }

    pub async fn reorder_gallery(&self, ids: &[i32]) -> Result<(), ServiceError> {
        models::gallery_image::reorder(&self.db, ids).await?;
        info!(count = ids.len(), "gallery reordered");
        Ok(())
    }

    // ---- home slideshow ----

    #[instrument(skip(self, file), fields(file = %file.name))]
    pub async fn upload_home(
        &self,
        file: UploadedFile,
        caption: &str,
        display_order: i32,
    ) -> Result<models::home_image::Model, ServiceError> {
        Self::validate_upload(&file)?;
        let stored = self.storage.put(&file.name, &file.content_type, file.bytes).await?;
        let row = models::home_image::create(&self.db, &stored.url, &stored.public_id, caption, display_order).await?;
        info!(public_id = %row.public_id, "home image uploaded");
        Ok(row)
    }

    pub async fn list_home(&self) -> Result<Vec<models::home_image::Model>, ServiceError> {
        Ok(models::home_image::list_active(&self.db).await?)
    }

    pub async fn delete_home(&self, id: i32) -> Result<bool, ServiceError> {
        Ok(models::home_image::soft_delete(&self.db, id).await?)
    }

    pub async fn set_home_order(&self, id: i32, display_order: i32) -> Result<bool, ServiceError> {
        Ok(models::home_image::set_order(&self.db, id, display_order).await?)
    }

    pub async fn reorder_home(&self, ids: &[i32]) -> Result<(), ServiceError> {
        models::home_image::reorder(&self.db, ids).await?;
        info!(count = ids.len(), "home slideshow reordered");
        Ok(())
    }

    // ---- keyed site assets ----

    #[instrument(skip(self, file), fields(asset_type = %asset_type))]
    pub async fn upsert_site_asset(
        &self,
        asset_type: &str,
        alt_text: &str,
        file: UploadedFile,
    ) -> Result<models::site_asset::Model, ServiceError> {
        if asset_type.trim().is_empty() {
            return Err(ServiceError::Validation("Asset type required".into()));
        }
        Self::validate_upload(&file)?;
        let stored = self.storage.put(&file.name, &file.content_type, file.bytes).await?;
        let row = models::site_asset::upsert(&self.db, asset_type, &stored.url, &stored.public_id, alt_text).await?;
        info!(asset_type = %row.asset_type, "site asset updated");
        Ok(row)
    }

    pub async fn list_site_assets(&self) -> Result<Vec<models::site_asset::Model>, ServiceError> {
        Ok(models::site_asset::list(&self.db).await?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::memory::MemoryStorage;
    use migration::MigratorTrait;
    use sea_orm::EntityTrait;

    async fn setup() -> anyhow::Result<AssetService> {
        let db = models::db::connect().await?;
        migration::Migrator::up(&db, None).await?;
        Ok(AssetService::new(db, Arc::new(MemoryStorage::default())))
    }

    fn png(name: &str) -> UploadedFile {
        UploadedFile { name: name.into(), content_type: "image/png".into(), bytes: vec![0x89, b'P', b'N', b'G'] }
    }

    #[tokio::test]
    async fn upload_then_list_then_soft_delete() -> anyhow::Result<()> {
        if std::env::var("SKIP_DB_TESTS").is_ok() {
            return Ok(());
        }
        let svc = setup().await?;

        let row = svc.upload_gallery(png("studio.png"), "the studio").await?;
        let listed = svc.list_gallery().await?;
        assert!(listed.iter().any(|m| m.public_id == row.public_id));

        assert!(svc.delete_gallery(&row.public_id).await?);
        let listed = svc.list_gallery().await?;
        assert!(listed.iter().all(|m| m.public_id != row.public_id));

        models::gallery_image::Entity::delete_by_id(row.id).exec(&svc.db).await?;
        Ok(())
    }

    #[tokio::test]
    async fn empty_upload_rejected_before_storage() -> anyhow::Result<()> {
        if std::env::var("SKIP_DB_TESTS").is_ok() {
            return Ok(());
        }
        let svc = setup().await?;
        let empty = UploadedFile { name: "x.png".into(), content_type: "image/png".into(), bytes: vec![] };
        let err = svc.upload_gallery(empty, "").await.unwrap_err();
        assert!(matches!(err, ServiceError::Validation(_)));
        Ok(())
    }
}
