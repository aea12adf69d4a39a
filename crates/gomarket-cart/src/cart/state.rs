//! The cart line list and its mutations.

use crate::cart::{CartItem, NewCartItem};
use crate::ids::ProductId;
use serde::{Deserialize, Serialize};

/// Ordered list of cart items, unique by product id.
///
/// Every item has `quantity >= 1`. Insertion order is kept for display.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(transparent)]
pub struct CartState {
    items: Vec<CartItem>,
}

impl CartState {
    /// Create an empty cart.
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a cart from a loaded snapshot, repairing it where needed.
    ///
    /// Items with quantity 0 are dropped and repeated ids keep their first
    /// occurrence. Returns the cart and how many entries were dropped.
    pub fn from_snapshot(items: Vec<CartItem>) -> (Self, usize) {
        let total = items.len();
        let mut kept: Vec<CartItem> = Vec::with_capacity(total);
        for item in items {
            if item.quantity == 0 || kept.iter().any(|k| k.id == item.id) {
                continue;
            }
            kept.push(item);
        }
        let dropped = total - kept.len();
        (Self { items: kept }, dropped)
    }

    /// Add a product with quantity 1.
    ///
    /// Returns `false` and leaves the cart untouched if the id is already
    /// present; the existing quantity is not bumped.
    pub fn add(&mut self, product: NewCartItem) -> bool {
        if self.contains(&product.id) {
            return false;
        }
        self.items.push(CartItem::new(product, 1));
        true
    }

    /// Increase the quantity of every item with this id by one.
    ///
    /// Returns the number of items touched (0 or 1 under the uniqueness rule).
    pub fn increment(&mut self, id: &ProductId) -> usize {
        let mut touched = 0;
        for item in self.items.iter_mut().filter(|i| &i.id == id) {
            item.quantity = item.quantity.saturating_add(1);
            touched += 1;
        }
        touched
    }

    /// Decrease the quantity of the matching item and drop any item that
    /// reached zero.
    ///
    /// Returns the number of items touched.
    pub fn decrement(&mut self, id: &ProductId) -> usize {
        let mut touched = 0;
        for item in self.items.iter_mut().filter(|i| &i.id == id) {
            if item.quantity > 0 {
                item.quantity -= 1;
                touched += 1;
            }
        }
        self.items.retain(|i| i.quantity > 0);
        touched
    }

    /// Items in insertion order.
    pub fn items(&self) -> &[CartItem] {
        &self.items
    }

    /// Get an item by product id.
    pub fn get(&self, id: &ProductId) -> Option<&CartItem> {
        self.items.iter().find(|i| &i.id == id)
    }

    /// Check whether a product is in the cart.
    pub fn contains(&self, id: &ProductId) -> bool {
        self.get(id).is_some()
    }

    /// Number of distinct products.
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Check if cart is empty.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Total item count (sum of quantities).
    pub fn item_count(&self) -> u64 {
        self.items.iter().map(|i| u64::from(i.quantity)).sum()
    }

    /// Take the items out.
    pub fn into_items(self) -> Vec<CartItem> {
        self.items
    }
}
