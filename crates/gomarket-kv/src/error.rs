//! Key-value store error types.

use thiserror::Error;

/// Errors that can occur when talking to a persistence provider.
#[derive(Error, Debug)]
pub enum KvError {
    /// Filesystem failure in a file-backed store.
    #[error("I/O error on {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// The backend rejected an operation or could not be opened.
    #[error("Store operation failed: {0}")]
    Store(String),

    /// Failed to serialize or deserialize a value.
    #[error("Serialization error: {0}")]
    Serialize(#[from] serde_json::Error),
}

impl KvError {
    pub(crate) fn io(path: impl Into<String>, source: std::io::Error) -> Self {
        KvError::Io {
            path: path.into(),
            source,
        }
    }
}
