use std::path::PathBuf;

use serde::Deserialize;

/// Where uploaded objects are kept.
///
/// ```toml
/// [storage]
/// backend = "filesystem"
/// root = "./data/media"
/// public_base_url = "http://127.0.0.1:3000/media"
/// ```
#[derive(Debug, Deserialize, Clone)]
#[serde(tag = "backend", rename_all = "snake_case")]
pub enum ObjectStorageConfig {
    Filesystem(FilesystemConfig),
    S3(S3Config),
}

#[derive(Debug, Deserialize, Clone)]
pub struct FilesystemConfig {
    /// Directory objects are written to. Default: "./data/media".
    #[serde(default = "default_root")]
    pub root: PathBuf,
    /// URL prefix the directory is published under. Default: "/media".
    #[serde(default = "default_public_base_url")]
    pub public_base_url: String,
    /// Largest accepted object in bytes. Default: 10 MiB.
    #[serde(default = "default_max_object_size")]
    pub max_object_size: u64,
}

#[derive(Debug, Deserialize, Clone)]
pub struct S3Config {
    pub bucket: String,
    /// Region name, e.g. "us-east-1". Default: "us-east-1".
    #[serde(default = "default_region")]
    pub region: String,
    /// Custom endpoint for S3-compatible services (R2, MinIO).
    pub endpoint: Option<String>,
    /// Falls back to the environment/credential chain when absent.
    pub access_key: Option<String>,
    pub secret_key: Option<String>,
    /// URL prefix objects are reachable under; derived from endpoint/bucket when absent.
    pub public_base_url: Option<String>,
    /// Use path-style bucket addressing. Default: false.
    #[serde(default)]
    pub path_style: bool,
}

fn default_root() -> PathBuf {
    PathBuf::from("./data/media")
}
fn default_public_base_url() -> String {
    "/media".into()
}
fn default_max_object_size() -> u64 {
    10 * 1024 * 1024
}
fn default_region() -> String {
    "us-east-1".into()
}

impl Default for FilesystemConfig {
    fn default() -> Self {
        Self {
            root: default_root(),
            public_base_url: default_public_base_url(),
            max_object_size: default_max_object_size(),
        }
    }
}

impl Default for ObjectStorageConfig {
    fn default() -> Self {
        Self::Filesystem(FilesystemConfig::default())
    }
}
