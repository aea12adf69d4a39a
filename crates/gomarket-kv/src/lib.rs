//! Async key-value persistence providers for the GoMarketplace cart.
//!
//! The cart keeps its whole state as a single JSON blob under one key.
//! This crate defines the store contract and the backends it can live in:
//!
//! - [`MemoryStore`]: in-process, for tests and previews
//! - [`FileStore`]: one file per key on the local filesystem
//! - `SpinStore`: Spin's Key-Value Store (wasm32 only)
//!
//! # Example
//!
//! ```rust,ignore
//! use gomarket_kv::{FileStore, KvStore, KvStoreExt};
//!
//! let store = FileStore::open(".gomarket")?;
//! store.set("@GoMarketplace:products", "[]").await?;
//! let raw = store.get("@GoMarketplace:products").await?;
//! ```

mod error;
mod file;
mod kv;
mod memory;
#[cfg(target_arch = "wasm32")]
mod spin;

pub use error::KvError;
pub use file::FileStore;
pub use kv::{KvStore, KvStoreExt};
pub use memory::MemoryStore;
#[cfg(target_arch = "wasm32")]
pub use spin::SpinStore;

/// Prelude for convenient imports.
pub mod prelude {
    pub use crate::{FileStore, KvError, KvStore, KvStoreExt, MemoryStore};
}
