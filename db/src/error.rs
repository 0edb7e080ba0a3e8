//! Error types for dataset loading.
//!
//! Covers every way a release table can fail to load: I/O, malformed CSV
//! content, configuration parsing, and an exhausted fallback chain.

use std::path::PathBuf;

use distro_info_core::DataError;
use thiserror::Error;

/// Errors that can occur while loading release data.
#[derive(Debug, Error)]
pub enum DatabaseError {
    /// File I/O failure.
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),

    /// YAML parsing or serialization failure.
    #[error("YAML error: {0}")]
    YamlError(#[from] serde_yaml::Error),

    /// A dataset file exists but its content is malformed.
    #[error("invalid data in `{}`: {source}", path.display())]
    Data {
        path: PathBuf,
        #[source]
        source: DataError,
    },

    /// None of the configured sources has a dataset file.
    #[error("no release data found")]
    NoSourcesAvailable,
}

/// Convenience alias for results with [`DatabaseError`].
pub type Result<T> = std::result::Result<T, DatabaseError>;
