//! Spin Key-Value Store backend (wasm32 only).

use async_trait::async_trait;
use spin_sdk::key_value::Store;

use crate::{KvError, KvStore};

/// Store backed by Spin's Key-Value Store.
///
/// Only the store label is kept; a handle is opened for each operation and
/// dropped before it returns, so no host resource outlives a call.
#[derive(Debug, Clone)]
pub struct SpinStore {
    label: Option<String>,
}

impl SpinStore {
    /// Use the default Key-Value store.
    ///
    /// The store is opened once here so a missing or forbidden store is
    /// reported up front.
    pub fn open_default() -> Result<Self, KvError> {
        let store = Self { label: None };
        store.handle()?;
        Ok(store)
    }

    /// Use a named Key-Value store.
    pub fn open(name: &str) -> Result<Self, KvError> {
        let store = Self {
            label: Some(name.to_string()),
        };
        store.handle()?;
        Ok(store)
    }

    fn handle(&self) -> Result<Store, KvError> {
        let opened = match &self.label {
            Some(name) => Store::open(name),
            None => Store::open_default(),
        };
        opened.map_err(|e| {
            let name = self.label.as_deref().unwrap_or("default");
            KvError::Store(format!("failed to open store {name}: {e}"))
        })
    }
}

#[async_trait]
impl KvStore for SpinStore {
    async fn get(&self, key: &str) -> Result<Option<String>, KvError> {
        match self.handle()?.get(key) {
            Ok(Some(bytes)) => String::from_utf8(bytes)
                .map(Some)
                .map_err(|e| KvError::Store(e.to_string())),
            Ok(None) => Ok(None),
            Err(e) => Err(KvError::Store(e.to_string())),
        }
    }

    async fn set(&self, key: &str, value: &str) -> Result<(), KvError> {
        self.handle()?
            .set(key, value.as_bytes())
            .map_err(|e| KvError::Store(e.to_string()))
    }

    async fn delete(&self, key: &str) -> Result<(), KvError> {
        self.handle()?
            .delete(key)
            .map_err(|e| KvError::Store(e.to_string()))
    }
}
