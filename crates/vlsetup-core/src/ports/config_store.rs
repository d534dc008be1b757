//! Configuration store port.
//!
//! A small key/value view over the downstream application's config file.
//! Keys may be dotted (`a.b`) to address nested values.

use std::path::PathBuf;

use thiserror::Error;

/// Errors reading or writing the configuration file.
#[derive(Debug, Error)]
pub enum ConfigStoreError {
    #[error("failed to access {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("{} is not valid YAML: {source}", .path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_yaml::Error,
    },

    /// A key segment addresses a scalar where a mapping is required.
    #[error("cannot address '{key}': '{segment}' is not a mapping")]
    NotAMapping { key: String, segment: String },

    #[error("invalid key '{0}'")]
    InvalidKey(String),
}

/// Port for persisting settings across runs.
pub trait ConfigStore: Send + Sync {
    /// Read a value; a missing file or key is `Ok(None)`.
    fn read(&self, key: &str) -> Result<Option<String>, ConfigStoreError>;

    /// Write a value, creating the file if needed and preserving other keys.
    fn write(&self, key: &str, value: &str) -> Result<(), ConfigStoreError>;
}
