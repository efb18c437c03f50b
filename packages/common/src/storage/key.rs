use std::fmt;

use serde::{Deserialize, Serialize};

use super::error::StorageError;

/// Maximum length of an object key in bytes.
pub const MAX_KEY_LENGTH: usize = 512;

/// A validated object key such as `tools/0190f3c2-….png`.
///
/// Keys are relative, `/`-separated, and every segment is restricted to
/// ASCII letters, digits, `.`, `_` and `-`. `.` and `..` segments are
/// rejected so a key can never escape the store root.
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct ObjectKey(String);

impl ObjectKey {
    /// Parse and validate a key.
    pub fn new(key: impl Into<String>) -> Result<Self, StorageError> {
        let key = key.into();
        if key.is_empty() {
            return Err(StorageError::InvalidKey("key must not be empty".into()));
        }
        if key.len() > MAX_KEY_LENGTH {
            return Err(StorageError::InvalidKey(format!(
                "key exceeds {MAX_KEY_LENGTH} bytes"
            )));
        }
        for segment in key.split('/') {
            if segment.is_empty() || segment == "." || segment == ".." {
                return Err(StorageError::InvalidKey(format!(
                    "invalid path segment in '{key}'"
                )));
            }
            if !segment
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || matches!(c, '.' | '_' | '-'))
            {
                return Err(StorageError::InvalidKey(format!(
                    "unsupported character in '{key}'"
                )));
            }
        }
        Ok(Self(key))
    }

    /// Generate a fresh, time-ordered key under `prefix`.
    ///
    /// `prefix` is sanitized to the key alphabet; an empty prefix falls back
    /// to `uploads`. The extension is lowercased and dropped if it is not
    /// purely alphanumeric.
    pub fn generate(prefix: &str, extension: Option<&str>) -> Self {
        let prefix: String = prefix
            .trim_matches('/')
            .split('/')
            .filter(|s| !s.is_empty() && *s != "." && *s != "..")
            .map(|s| {
                s.chars()
                    .map(|c| {
                        if c.is_ascii_alphanumeric() || matches!(c, '_' | '-') {
                            c.to_ascii_lowercase()
                        } else {
                            '-'
                        }
                    })
                    .collect::<String>()
            })
            .collect::<Vec<_>>()
            .join("/");
        let prefix = if prefix.is_empty() {
            "uploads".to_string()
        } else {
            prefix
        };

        let id = uuid::Uuid::now_v7();
        let name = match extension
            .map(|e| e.trim_start_matches('.').to_ascii_lowercase())
            .filter(|e| !e.is_empty() && e.len() <= 8 && e.chars().all(|c| c.is_ascii_alphanumeric()))
        {
            Some(ext) => format!("{id}.{ext}"),
            None => id.to_string(),
        };

        Self(format!("{prefix}/{name}"))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Split the key into its path segments.
    pub fn segments(&self) -> impl Iterator<Item = &str> {
        self.0.split('/')
    }
}

impl fmt::Debug for ObjectKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ObjectKey({})", self.0)
    }
}

impl fmt::Display for ObjectKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl Serialize for ObjectKey {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.0)
    }
}

impl<'de> Deserialize<'de> for ObjectKey {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        Self::new(s).map_err(serde::de::Error::custom)
    }
}
