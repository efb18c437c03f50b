mod error;
mod key;
mod traits;

pub mod filesystem;
#[cfg(feature = "object-storage")]
pub mod s3;

use std::sync::Arc;

pub use error::StorageError;
pub use key::ObjectKey;
pub use traits::ObjectStore;

use crate::config::ObjectStorageConfig;

/// Open the object store described by `config`.
pub async fn open(config: &ObjectStorageConfig) -> Result<Arc<dyn ObjectStore>, StorageError> {
    match config {
        ObjectStorageConfig::Filesystem(fs) => {
            let store = filesystem::FilesystemObjectStore::new(
                fs.root.clone(),
                fs.public_base_url.clone(),
                fs.max_object_size,
            )
            .await?;
            tracing::info!(root = %fs.root.display(), "Using filesystem object store");
            Ok(Arc::new(store))
        }
        #[cfg(feature = "object-storage")]
        ObjectStorageConfig::S3(s3_config) => {
            let store = s3::S3ObjectStore::new(s3_config)?;
            tracing::info!(bucket = %s3_config.bucket, "Using S3 object store");
            Ok(Arc::new(store))
        }
        #[cfg(not(feature = "object-storage"))]
        ObjectStorageConfig::S3(_) => Err(StorageError::Remote(
            "S3 storage requires the `object-storage` feature".into(),
        )),
    }
}
