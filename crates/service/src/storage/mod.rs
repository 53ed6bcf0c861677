//! Pluggable image storage.
//!
//! One service, two backends: local disk for single-box deployments and an
//! HTTP object store for hosted ones, selected by configuration. Deletion is
//! intentionally absent from the seam; the registry soft-deletes rows and
//! keeps stored objects.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::errors::ServiceError;

pub mod local;
pub mod remote;

pub use local::LocalDiskStorage;
pub use remote::RemoteStorage;

/// Result of persisting an image: where it is served from and the backend's
/// stable reference for it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoredImage {
    pub url: String,
    pub public_id: String,
}

#[async_trait]
pub trait ImageStorage: Send + Sync {
    /// Persist the image bytes and return the public URL + reference id.
    async fn put(&self, original_name: &str, content_type: &str, bytes: Vec<u8>) -> Result<StoredImage, ServiceError>;

    /// Backend label for diagnostics.
    fn backend_name(&self) -> &'static str;
}

/// Collision-free object name preserving the original extension.
pub(crate) fn unique_object_name(original: &str) -> String {
    let ext = std::path::Path::new(original)
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("bin");
    format!("image-{}.{}", Uuid::new_v4(), ext)
}

/// In-memory storage for tests and doc examples.
pub mod memory {
    use super::*;
    use std::collections::HashMap;
    use std::sync::Mutex;

    #[derive(Default)]
    pub struct MemoryStorage {
        objects: Mutex<HashMap<String, Vec<u8>>>,
    }

    impl MemoryStorage {
        pub fn len(&self) -> usize {
            self.objects.lock().unwrap().len()
        }

        pub fn is_empty(&self) -> bool {
            self.len() == 0
        }
    }

    #[async_trait]
    impl ImageStorage for MemoryStorage {
        async fn put(&self, original_name: &str, _content_type: &str, bytes: Vec<u8>) -> Result<StoredImage, ServiceError> {
            let name = unique_object_name(original_name);
            self.objects.lock().unwrap().insert(name.clone(), bytes);
            Ok(StoredImage { url: format!("/static/uploads/{name}"), public_id: name })
        }

        fn backend_name(&self) -> &'static str { "memory" }
    }
}
