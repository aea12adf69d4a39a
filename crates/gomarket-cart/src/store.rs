//! Cart state mirrored into a key-value store.

use std::sync::{Mutex, MutexGuard};

use gomarket_kv::{KvError, KvStore, KvStoreExt};
use tokio::sync::{watch, OnceCell};
use tracing::{debug, info, warn};

use crate::cart::{CartItem, CartState, NewCartItem};
use crate::config::CartConfig;
use crate::error::CartError;
use crate::ids::ProductId;

/// What [`CartStore::initialize`] found in storage.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadOutcome {
    /// A snapshot was read; holds the number of items restored.
    Restored(usize),
    /// Nothing was stored under the key.
    Empty,
    /// The snapshot could not be read or parsed and was ignored.
    Discarded,
}

/// Shopping cart kept in memory and persisted after every change.
///
/// Memory is authoritative for the session; the store is a best-effort
/// backup. Every mutation updates memory first, then writes the complete
/// resulting cart under [`CartConfig::storage_key`]. A failed write is
/// returned to the caller and never rolls the memory change back.
///
/// Writes are not serialized: when two mutations overlap, each writes the
/// cart as it stood right after its own change, and the last write to land
/// wins. Watchers are updated while memory is still locked, so the watch
/// channel always ends on the same items as memory.
///
/// # Example
///
/// ```rust,ignore
/// use gomarket_cart::prelude::*;
/// use gomarket_kv::FileStore;
///
/// let cart = CartStore::new(FileStore::open(".gomarket")?, CartConfig::default());
/// cart.initialize().await;
///
/// cart.add_to_cart(NewCartItem::new("A", "Camiseta", "https://...", 49.9)).await?;
/// cart.increment(&"A".into()).await?;
/// assert_eq!(cart.item_count(), 2);
/// ```
pub struct CartStore<S> {
    store: S,
    config: CartConfig,
    state: Mutex<CartState>,
    changes: watch::Sender<Vec<CartItem>>,
    loaded: OnceCell<LoadOutcome>,
}

impl<S: KvStore> CartStore<S> {
    /// Create an empty cart backed by `store`.
    pub fn new(store: S, config: CartConfig) -> Self {
        let (changes, _) = watch::channel(Vec::new());
        Self {
            store,
            config,
            state: Mutex::new(CartState::new()),
            changes,
            loaded: OnceCell::new(),
        }
    }

    /// Create a cart using the default storage key.
    pub fn with_default_config(store: S) -> Self {
        Self::new(store, CartConfig::default())
    }

    /// Load the persisted snapshot, once, at startup.
    ///
    /// A missing snapshot leaves the cart empty. An unreadable or malformed
    /// one is logged and ignored; this never fails.
    ///
    /// Only the first call reads the store. Later (or concurrent) calls wait
    /// for it and return its outcome without touching memory, so a restore
    /// can never overwrite mutations made after startup.
    pub async fn initialize(&self) -> LoadOutcome {
        *self.loaded.get_or_init(|| self.load()).await
    }

    async fn load(&self) -> LoadOutcome {
        let key = self.config.storage_key.as_str();

        let items = match self.store.get_json::<Vec<CartItem>>(key).await {
            Ok(Some(items)) => items,
            Ok(None) => {
                debug!(key, "no saved cart");
                return LoadOutcome::Empty;
            }
            Err(KvError::Serialize(e)) => {
                warn!(key, error = %e, "discarding malformed cart snapshot");
                return LoadOutcome::Discarded;
            }
            Err(e) => {
                warn!(key, error = %e, "could not read cart snapshot");
                return LoadOutcome::Discarded;
            }
        };

        let (restored, dropped) = CartState::from_snapshot(items);
        if dropped > 0 {
            warn!(key, dropped, "dropped invalid entries from cart snapshot");
        }

        let count = restored.len();
        {
            let mut state = self.state();
            *state = restored;
            self.publish(&state);
        }

        info!(key, items = count, "restored cart");
        LoadOutcome::Restored(count)
    }

    /// Add a product with quantity 1.
    ///
    /// If the product is already in the cart this does nothing at all: the
    /// quantity is not bumped and nothing is written.
    pub async fn add_to_cart(&self, product: NewCartItem) -> Result<(), CartError> {
        let id = product.id.clone();
        let snapshot = {
            let mut state = self.state();
            if !state.add(product) {
                debug!(id = %id, "product already in cart");
                return Ok(());
            }
            self.publish(&state);
            state.items().to_vec()
        };

        debug!(id = %id, items = snapshot.len(), "added to cart");
        self.commit(snapshot).await
    }

    /// Increase the quantity of a product by one.
    ///
    /// An unknown id leaves the cart unchanged; the cart is still written.
    pub async fn increment(&self, id: &ProductId) -> Result<(), CartError> {
        let (snapshot, touched) = {
            let mut state = self.state();
            let touched = state.increment(id);
            if touched > 0 {
                self.publish(&state);
            }
            (state.items().to_vec(), touched)
        };

        debug!(id = %id, touched, "incremented");
        self.commit(snapshot).await
    }

    /// Decrease the quantity of a product by one, removing it at zero.
    ///
    /// An unknown id leaves the cart unchanged; the cart is still written.
    pub async fn decrement(&self, id: &ProductId) -> Result<(), CartError> {
        let (snapshot, touched) = {
            let mut state = self.state();
            let touched = state.decrement(id);
            if touched > 0 {
                self.publish(&state);
            }
            (state.items().to_vec(), touched)
        };

        debug!(id = %id, touched, items = snapshot.len(), "decremented");
        self.commit(snapshot).await
    }

    /// Current items in insertion order.
    pub fn products(&self) -> Vec<CartItem> {
        self.state().items().to_vec()
    }

    /// Get an item by product id.
    pub fn get(&self, id: &ProductId) -> Option<CartItem> {
        self.state().get(id).cloned()
    }

    /// Check whether a product is in the cart.
    pub fn contains(&self, id: &ProductId) -> bool {
        self.state().contains(id)
    }

    /// Number of distinct products.
    pub fn len(&self) -> usize {
        self.state().len()
    }

    /// Check if cart is empty.
    pub fn is_empty(&self) -> bool {
        self.state().is_empty()
    }

    /// Total item count (sum of quantities).
    pub fn item_count(&self) -> u64 {
        self.state().item_count()
    }

    /// Watch the cart.
    ///
    /// The receiver always holds the latest items and is marked changed
    /// after every mutation that altered the cart and after a restore.
    pub fn subscribe(&self) -> watch::Receiver<Vec<CartItem>> {
        self.changes.subscribe()
    }

    /// The cart configuration.
    pub fn config(&self) -> &CartConfig {
        &self.config
    }

    /// The backing store.
    pub fn storage(&self) -> &S {
        &self.store
    }

    fn state(&self) -> MutexGuard<'_, CartState> {
        self.state.lock().unwrap_or_else(|e| e.into_inner())
    }

    /// Push the locked state to watchers; callers hold the state lock.
    fn publish(&self, state: &CartState) {
        self.changes.send_replace(state.items().to_vec());
    }

    async fn commit(&self, snapshot: Vec<CartItem>) -> Result<(), CartError> {
        let key = self.config.storage_key.as_str();
        match self.store.set_json(key, snapshot.as_slice()).await {
            Ok(()) => {
                debug!(key, items = snapshot.len(), "persisted cart");
                Ok(())
            }
            Err(source) => {
                warn!(key, error = %source, "failed to persist cart");
                Err(CartError::Persist {
                    key: key.to_string(),
                    source,
                })
            }
        }
    }
}
