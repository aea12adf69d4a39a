//! Persistent shopping cart state for the GoMarketplace storefront.
//!
//! The cart is a list of products with quantities, kept in memory and
//! mirrored as a single JSON snapshot into a key-value store so it
//! survives restarts.
//!
//! - **Cart**: [`CartItem`], [`NewCartItem`] and the [`CartState`] line list
//! - **Store**: [`CartStore`], which applies mutations, persists them and
//!   notifies watchers
//!
//! # Example
//!
//! ```rust,ignore
//! use gomarket_cart::prelude::*;
//! use gomarket_kv::MemoryStore;
//!
//! let cart = CartStore::new(MemoryStore::new(), CartConfig::default());
//! cart.initialize().await;
//!
//! cart.add_to_cart(NewCartItem::new("A", "Camiseta", "https://...", 49.9)).await?;
//! cart.increment(&ProductId::new("A")).await?;
//! cart.decrement(&ProductId::new("A")).await?;
//!
//! let mut changes = cart.subscribe();
//! changes.changed().await?;
//! println!("{} items", changes.borrow().len());
//! ```

pub mod cart;
pub mod config;
pub mod error;
pub mod ids;
pub mod store;

pub use cart::{CartItem, CartState, NewCartItem};
pub use config::CartConfig;
pub use error::CartError;
pub use ids::ProductId;
pub use store::{CartStore, LoadOutcome};

/// Prelude for convenient imports.
pub mod prelude {
    pub use crate::cart::{CartItem, CartState, NewCartItem};
    pub use crate::config::CartConfig;
    pub use crate::error::CartError;
    pub use crate::ids::ProductId;
    pub use crate::store::{CartStore, LoadOutcome};
}
