//! Error types for rendering and snapshot checks.

use std::path::PathBuf;
use thiserror::Error;

/// Errors raised while serializing trees or comparing snapshots.
#[derive(Error, Debug)]
pub enum ViewError {
    /// Stored snapshot differs from the rendered output
    #[error("Snapshot '{name}' does not match the stored reference")]
    Mismatch {
        name: String,
        expected: String,
        actual: String,
    },

    /// Snapshot name would escape the snapshot directory
    #[error("Invalid snapshot name: {0}")]
    InvalidName(String),

    /// Reading or writing a snapshot file failed
    #[error("Snapshot I/O failed for {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Tree could not be serialized
    #[error(transparent)]
    Serialize(#[from] serde_json::Error),
}

/// Result type for view operations.
pub type Result<T> = std::result::Result<T, ViewError>;
