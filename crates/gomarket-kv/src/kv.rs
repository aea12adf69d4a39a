//! Key-value store abstraction with JSON helpers.

use std::sync::Arc;

use async_trait::async_trait;
use serde::{de::DeserializeOwned, Serialize};

use crate::KvError;

/// An asynchronous string key-value store.
///
/// This is the persistence provider the cart mirrors its snapshot into.
/// Implementations only move opaque strings; encoding is the caller's
/// concern (see [`KvStoreExt`]).
#[async_trait]
pub trait KvStore: Send + Sync {
    /// Get a value. Returns `None` if the key doesn't exist.
    async fn get(&self, key: &str) -> Result<Option<String>, KvError>;

    /// Set a value, overwriting whatever was stored under `key`.
    async fn set(&self, key: &str, value: &str) -> Result<(), KvError>;

    /// Delete a value. Deleting a missing key is not an error.
    async fn delete(&self, key: &str) -> Result<(), KvError>;
}

#[async_trait]
impl<S: KvStore + ?Sized> KvStore for Arc<S> {
    async fn get(&self, key: &str) -> Result<Option<String>, KvError> {
        (**self).get(key).await
    }

    async fn set(&self, key: &str, value: &str) -> Result<(), KvError> {
        (**self).set(key, value).await
    }

    async fn delete(&self, key: &str) -> Result<(), KvError> {
        (**self).delete(key).await
    }
}

/// JSON serialization on top of any [`KvStore`].
///
/// # Example
///
/// ```rust,ignore
/// let store = MemoryStore::new();
/// store.set_json("@GoMarketplace:products", &items).await?;
/// let items: Option<Vec<CartItem>> = store.get_json("@GoMarketplace:products").await?;
/// ```
#[async_trait]
pub trait KvStoreExt: KvStore {
    /// Get and deserialize a value.
    async fn get_json<T: DeserializeOwned + Send>(&self, key: &str) -> Result<Option<T>, KvError> {
        match self.get(key).await? {
            Some(raw) => Ok(Some(serde_json::from_str(&raw)?)),
            None => Ok(None),
        }
    }

    /// Serialize and store a value.
    async fn set_json<T: Serialize + Sync + ?Sized>(
        &self,
        key: &str,
        value: &T,
    ) -> Result<(), KvError> {
        let raw = serde_json::to_string(value)?;
        self.set(key, &raw).await
    }
}

impl<S: KvStore + ?Sized> KvStoreExt for S {}

/// Build a namespaced storage key of the form `@Namespace:name`.
///
/// # Example
///
/// ```rust
/// let key = gomarket_kv::namespaced_key!("GoMarketplace", "products");
/// assert_eq!(key, "@GoMarketplace:products");
/// ```
#[macro_export]
macro_rules! namespaced_key {
    ($namespace:expr, $($part:expr),+) => {{
        let mut key = String::from("@");
        key.push_str(&$namespace.to_string());
        $(
            key.push(':');
            key.push_str(&$part.to_string());
        )+
        key
    }};
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::MemoryStore;
    use serde::Deserialize;

    #[derive(Debug, PartialEq, Serialize, Deserialize)]
    struct Entry {
        name: String,
        count: u32,
    }

    #[test]
    fn test_namespaced_key() {
        assert_eq!(namespaced_key!("GoMarketplace", "products"), "@GoMarketplace:products");
        assert_eq!(namespaced_key!("Shop", "cart", 42), "@Shop:cart:42");
    }

    #[tokio::test]
    async fn test_json_helpers() {
        let store = MemoryStore::new();
        let entry = Entry {
            name: "apple".to_string(),
            count: 3,
        };

        store.set_json("k", &entry).await.unwrap();
        let loaded: Option<Entry> = store.get_json("k").await.unwrap();
        assert_eq!(loaded, Some(entry));

        let missing: Option<Entry> = store.get_json("missing").await.unwrap();
        assert!(missing.is_none());
    }

    #[tokio::test]
    async fn test_get_json_rejects_garbage() {
        let store = MemoryStore::new();
        store.set("k", "not json").await.unwrap();

        let result = store.get_json::<Entry>("k").await;
        assert!(matches!(result, Err(KvError::Serialize(_))));
    }

    #[tokio::test]
    async fn test_arc_store_shares_state() {
        let store = Arc::new(MemoryStore::new());
        let handle = Arc::clone(&store);

        handle.set("k", "v").await.unwrap();
        assert_eq!(store.get("k").await.unwrap().as_deref(), Some("v"));
    }
}
