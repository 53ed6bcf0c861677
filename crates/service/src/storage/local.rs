use std::path::PathBuf;

use async_trait::async_trait;
use tokio::fs;
use tracing::info;

use super::{unique_object_name, ImageStorage, StoredImage};
use crate::errors::ServiceError;

/// Writes uploads under a local root and serves them below a public base
/// path handled by the static file layer.
pub struct LocalDiskStorage {
    root: PathBuf,
    public_base: String,
}

impl LocalDiskStorage {
    pub fn new<P: Into<PathBuf>>(root: P, public_base: impl Into<String>) -> Self {
        let public_base = public_base.into();
        Self { root: root.into(), public_base: public_base.trim_end_matches('/').to_string() }
    }
}

#[async_trait]
impl ImageStorage for LocalDiskStorage {
    async fn put(&self, original_name: &str, _content_type: &str, bytes: Vec<u8>) -> Result<StoredImage, ServiceError> {
        fs::create_dir_all(&self.root)
            .await
            .map_err(|e| ServiceError::Storage(format!("cannot create uploads dir: {e}")))?;
        let name = unique_object_name(original_name);
        let path = self.root.join(&name);
        fs::write(&path, bytes)
            .await
            .map_err(|e| ServiceError::Storage(format!("cannot write {}: {e}", path.display())))?;
        info!(public_id = %name, "image stored locally");
        Ok(StoredImage { url: format!("{}/{}", self.public_base, name), public_id: name })
    }

    fn backend_name(&self) -> &'static str { "local" }
}
