//! Cart error types.

use gomarket_kv::KvError;
use thiserror::Error;

/// Errors surfaced by cart mutations.
///
/// Loading never fails: an unreadable snapshot is treated as an empty cart.
#[derive(Error, Debug)]
pub enum CartError {
    /// The in-memory change was applied but writing the snapshot failed.
    #[error("Failed to persist cart snapshot under {key}: {source}")]
    Persist {
        key: String,
        #[source]
        source: KvError,
    },
}

impl CartError {
    /// The underlying store error.
    pub fn store_error(&self) -> &KvError {
        match self {
            CartError::Persist { source, .. } => source,
        }
    }
}
