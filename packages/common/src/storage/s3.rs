use async_trait::async_trait;
use s3::creds::Credentials;
use s3::error::S3Error;
use s3::{Bucket, Region};

use super::error::StorageError;
use super::key::ObjectKey;
use super::traits::ObjectStore;
use crate::config::S3Config;

/// S3-compatible object store (AWS S3, Cloudflare R2, MinIO).
pub struct S3ObjectStore {
    bucket: Box<Bucket>,
    public_base_url: String,
}

impl S3ObjectStore {
    pub fn new(config: &S3Config) -> Result<Self, StorageError> {
        let region = match &config.endpoint {
            Some(endpoint) => Region::Custom {
                region: config.region.clone(),
                endpoint: endpoint.trim_end_matches('/').to_string(),
            },
            None => config
                .region
                .parse()
                .map_err(|e| StorageError::Remote(format!("invalid region: {e}")))?,
        };

        let credentials = Credentials::new(
            config.access_key.as_deref(),
            config.secret_key.as_deref(),
            None,
            None,
            None,
        )
        .map_err(|e| StorageError::Remote(format!("invalid credentials: {e}")))?;

        let mut bucket = Bucket::new(&config.bucket, region, credentials)
            .map_err(|e| StorageError::Remote(e.to_string()))?;
        if config.path_style {
            bucket = bucket.with_path_style();
        }

        let public_base_url = match (&config.public_base_url, &config.endpoint) {
            (Some(url), _) => url.trim_end_matches('/').to_string(),
            (None, Some(endpoint)) => {
                format!("{}/{}", endpoint.trim_end_matches('/'), config.bucket)
            }
            (None, None) => format!(
                "https://{}.s3.{}.amazonaws.com",
                config.bucket, config.region
            ),
        };

        Ok(Self {
            bucket,
            public_base_url,
        })
    }
}

fn remote(err: S3Error) -> StorageError {
    StorageError::Remote(err.to_string())
}

#[async_trait]
impl ObjectStore for S3ObjectStore {
    async fn put(
        &self,
        key: &ObjectKey,
        data: &[u8],
        content_type: &str,
    ) -> Result<String, StorageError> {
        let response = self
            .bucket
            .put_object_with_content_type(key.as_str(), data, content_type)
            .await
            .map_err(remote)?;

        let status = response.status_code();
        if !(200..300).contains(&status) {
            return Err(StorageError::Rejected {
                status,
                key: key.to_string(),
            });
        }

        tracing::debug!(key = %key, bytes = data.len(), "stored object in bucket");
        Ok(self.url_for(key))
    }

    async fn delete(&self, key: &ObjectKey) -> Result<bool, StorageError> {
        if !self.exists(key).await? {
            return Ok(false);
        }

        let response = self
            .bucket
            .delete_object(key.as_str())
            .await
            .map_err(remote)?;

        match response.status_code() {
            200..=299 => Ok(true),
            404 => Ok(false),
            status => Err(StorageError::Rejected {
                status,
                key: key.to_string(),
            }),
        }
    }

    async fn exists(&self, key: &ObjectKey) -> Result<bool, StorageError> {
        match self.bucket.head_object(key.as_str()).await {
            Ok((_, 200..=299)) => Ok(true),
            Ok((_, 404)) => Ok(false),
            Ok((_, status)) => Err(StorageError::Rejected {
                status,
                key: key.to_string(),
            }),
            Err(S3Error::HttpFailWithBody(404, _)) => Ok(false),
            Err(e) => Err(remote(e)),
        }
    }

    fn public_base_url(&self) -> &str {
        &self.public_base_url
    }
}
