//! Error types for storage backends
//!
//! These errors never cross the [`PreferenceStore`](crate::PreferenceStore)
//! boundary; the facade recovers with defaults. Backends report IO
//! failures; the facade wraps serde failures in the typed variants before
//! logging them.

use std::path::PathBuf;

/// Errors a storage backend can report
#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    /// IO failure reading or writing a record
    #[error("io error on {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Stored record is not valid JSON for the expected type
    #[error("corrupt record under key '{key}': {source}")]
    Corrupt {
        key: String,
        #[source]
        source: serde_json::Error,
    },

    /// Value could not be encoded
    #[error("encode failed for key '{key}': {source}")]
    Encode {
        key: String,
        #[source]
        source: serde_json::Error,
    },
}

impl StorageError {
    /// Create IO error for path
    pub fn io_error(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    /// Create corrupt-record error for key
    pub fn corrupt(key: impl Into<String>, source: serde_json::Error) -> Self {
        Self::Corrupt {
            key: key.into(),
            source,
        }
    }

    /// Create encode error for key
    pub fn encode(key: impl Into<String>, source: serde_json::Error) -> Self {
        Self::Encode {
            key: key.into(),
            source,
        }
    }
}
