use async_trait::async_trait;
use serde::Deserialize;
use tracing::info;

use super::{ImageStorage, StoredImage};
use crate::errors::ServiceError;

/// Uploads to an HTTP object-storage endpoint (Cloudinary-style API): one
/// multipart POST with the file, JSON back with the public URL and id.
pub struct RemoteStorage {
    client: reqwest::Client,
    upload_url: String,
    api_key: String,
}

#[derive(Debug, Deserialize)]
struct RemoteUploadResponse {
    secure_url: String,
    public_id: String,
}

impl RemoteStorage {
    pub fn new(upload_url: impl Into<String>, api_key: impl Into<String>) -> Self {
        Self { client: reqwest::Client::new(), upload_url: upload_url.into(), api_key: api_key.into() }
    }
}

#[async_trait]
impl ImageStorage for RemoteStorage {
    async fn put(&self, original_name: &str, content_type: &str, bytes: Vec<u8>) -> Result<StoredImage, ServiceError> {
        let part = reqwest::multipart::Part::bytes(bytes)
            .file_name(original_name.to_string())
            .mime_str(content_type)
            .map_err(|e| ServiceError::Storage(format!("invalid content type: {e}")))?;
        let mut form = reqwest::multipart::Form::new().part("file", part);
        if !self.api_key.is_empty() {
            form = form.text("api_key", self.api_key.clone());
        }

        let resp = self
            .client
            .post(&self.upload_url)
            .multipart(form)
            .send()
            .await
            .map_err(|e| ServiceError::Storage(format!("upload request failed: {e}")))?
            .error_for_status()
            .map_err(|e| ServiceError::Storage(format!("upload rejected: {e}")))?;

        let body: RemoteUploadResponse = resp
            .json()
            .await
            .map_err(|e| ServiceError::Storage(format!("unexpected upload response: {e}")))?;
        info!(public_id = %body.public_id, "image stored remotely");
        Ok(StoredImage { url: body.secure_url, public_id: body.public_id })
    }

    fn backend_name(&self) -> &'static str { "remote" }
}
