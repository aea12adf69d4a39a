//! Shopping cart module.
//!
//! Contains the cart item types and the in-memory line list.

mod item;
mod state;

pub use item::{CartItem, NewCartItem};
pub use state::CartState;
