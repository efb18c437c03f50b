use async_trait::async_trait;

use super::error::StorageError;
use super::key::ObjectKey;

/// Object storage with publicly resolvable URLs.
///
/// `put` must only return once the backend has acknowledged the write; the
/// returned URL is safe to persist.
#[async_trait]
pub trait ObjectStore: Send + Sync {
    /// Store `data` under `key` and return its public URL.
    async fn put(
        &self,
        key: &ObjectKey,
        data: &[u8],
        content_type: &str,
    ) -> Result<String, StorageError>;

    /// Delete an object.
    ///
    /// Returns `true` if the object was deleted, `false` if it did not exist.
    async fn delete(&self, key: &ObjectKey) -> Result<bool, StorageError>;

    /// Check whether an object exists.
    async fn exists(&self, key: &ObjectKey) -> Result<bool, StorageError>;

    /// Base URL under which objects are published, without trailing slash.
    fn public_base_url(&self) -> &str;

    /// Public URL of an object.
    fn url_for(&self, key: &ObjectKey) -> String {
        format!("{}/{}", self.public_base_url().trim_end_matches('/'), key)
    }

    /// Recover the key of an object from a URL previously returned by `put`.
    ///
    /// Returns `None` for URLs that do not belong to this store.
    fn key_from_url(&self, url: &str) -> Option<ObjectKey> {
        let base = self.public_base_url().trim_end_matches('/');
        let rest = url.strip_prefix(base)?.strip_prefix('/')?;
        ObjectKey::new(rest).ok()
    }
}
