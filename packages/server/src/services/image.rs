use std::path::{Path, PathBuf};
use std::sync::Arc;

use axum::body::Bytes;
use common::storage::{ObjectKey, ObjectStore, StorageError};
use thiserror::Error;
use tokio::fs;
use tracing::instrument;

use crate::config::ImageConfig;

/// A file received from a form, not yet stored.
#[derive(Debug, Clone)]
pub struct ImageUpload {
    pub file_name: Option<String>,
    pub content_type: Option<String>,
    pub bytes: Bytes,
}

/// An image the object store has acknowledged.
#[derive(Debug, Clone)]
pub struct StoredImage {
    pub url: String,
    pub key: ObjectKey,
}

#[derive(Debug, Error)]
pub enum UploadError {
    #[error("uploaded file is empty")]
    Empty,
    #[error("unsupported content type '{0}', expected an image")]
    UnsupportedType(String),
    #[error("image is {size} bytes, limit is {limit}")]
    TooLarge { size: usize, limit: u64 },
    #[error("failed to stage upload: {0}")]
    Staging(#[from] std::io::Error),
    #[error("object store rejected upload: {0}")]
    Store(#[from] StorageError),
}

impl UploadError {
    /// Whether the client sent an unacceptable file, as opposed to the
    /// storage path failing.
    pub fn is_client_error(&self) -> bool {
        matches!(
            self,
            UploadError::Empty | UploadError::UnsupportedType(_) | UploadError::TooLarge { .. }
        )
    }
}

/// Stages uploads on local disk and pushes them to the object store.
pub struct ImageService {
    objects: Arc<dyn ObjectStore>,
    staging_dir: PathBuf,
    max_bytes: u64,
}

impl ImageService {
    pub fn new(objects: Arc<dyn ObjectStore>, config: ImageConfig) -> Self {
        Self {
            objects,
            staging_dir: config.staging_dir,
            max_bytes: config.max_bytes,
        }
    }

    /// Store an image under `hint/` and return its public URL.
    ///
    /// The staged copy is removed whatever the outcome.
    #[instrument(skip(self, upload), fields(file_name = ?upload.file_name, size = upload.bytes.len()))]
    pub async fn store(&self, upload: ImageUpload, hint: &str) -> Result<StoredImage, UploadError> {
        if upload.bytes.is_empty() {
            return Err(UploadError::Empty);
        }
        if upload.bytes.len() as u64 > self.max_bytes {
            return Err(UploadError::TooLarge {
                size: upload.bytes.len(),
                limit: self.max_bytes,
            });
        }
        let content_type = resolve_content_type(&upload);
        if !content_type.starts_with("image/") {
            return Err(UploadError::UnsupportedType(content_type));
        }

        let extension = extension_for(upload.file_name.as_deref(), &content_type);
        let key = ObjectKey::generate(hint, extension.as_deref());

        fs::create_dir_all(&self.staging_dir).await?;
        let staged = self.staging_dir.join(uuid::Uuid::new_v4().to_string());
        let result = self
            .push_staged(&staged, &key, &upload.bytes, &content_type)
            .await;
        if let Err(e) = fs::remove_file(&staged).await
            && e.kind() != std::io::ErrorKind::NotFound
        {
            tracing::warn!(path = %staged.display(), error = %e, "Failed to remove staged upload");
        }

        let url = result?;
        tracing::info!(key = %key, url = %url, "Image stored");
        Ok(StoredImage { url, key })
    }

    async fn push_staged(
        &self,
        staged: &Path,
        key: &ObjectKey,
        bytes: &[u8],
        content_type: &str,
    ) -> Result<String, UploadError> {
        fs::write(staged, bytes).await?;
        let data = fs::read(staged).await?;
        Ok(self.objects.put(key, &data, content_type).await?)
    }

    /// Delete an object previously returned by [`store`](Self::store).
    ///
    /// Failures are logged and swallowed; URLs the store does not recognize
    /// are left alone.
    pub async fn discard(&self, url: &str) {
        let Some(key) = self.objects.key_from_url(url) else {
            tracing::warn!(url, "Not discarding image outside the object store");
            return;
        };
        match self.objects.delete(&key).await {
            Ok(true) => tracing::debug!(key = %key, "Image discarded"),
            Ok(false) => tracing::debug!(key = %key, "Image already gone"),
            Err(e) => tracing::warn!(key = %key, error = %e, "Failed to discard image"),
        }
    }
}

/// Declared content type, or one guessed from the file name.
fn resolve_content_type(upload: &ImageUpload) -> String {
    let declared = upload
        .content_type
        .as_deref()
        .and_then(|ct| ct.split(';').next())
        .map(|ct| ct.trim().to_ascii_lowercase())
        .filter(|ct| !ct.is_empty() && ct != "application/octet-stream");

    declared
        .or_else(|| {
            upload
                .file_name
                .as_deref()
                .and_then(|name| mime_guess::from_path(name).first())
                .map(|mime| mime.essence_str().to_string())
        })
        .unwrap_or_else(|| "application/octet-stream".to_string())
}

fn extension_for(file_name: Option<&str>, content_type: &str) -> Option<String> {
    let from_name = file_name
        .and_then(|name| Path::new(name).extension())
        .and_then(|ext| ext.to_str())
        .map(str::to_ascii_lowercase);
    if from_name.is_some() {
        return from_name;
    }
    let preferred = match content_type {
        "image/jpeg" => Some("jpg"),
        "image/png" => Some("png"),
        "image/gif" => Some("gif"),
        "image/webp" => Some("webp"),
        "image/svg+xml" => Some("svg"),
        _ => None,
    };
    preferred
        .or_else(|| mime_guess::get_mime_extensions_str(content_type).and_then(|e| e.first().copied()))
        .map(str::to_string)
}
