//! Cart line item types.

use crate::ids::ProductId;
use serde::{Deserialize, Serialize};

/// A product in the cart together with how many of it were picked.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CartItem {
    /// Product identifier, unique within a cart.
    pub id: ProductId,
    /// Product title (denormalized for display).
    pub title: String,
    /// Product image URL.
    pub image_url: String,
    /// Unit price.
    pub price: f64,
    /// Quantity, never below 1 while the item is in the cart.
    pub quantity: u32,
}

impl CartItem {
    /// Build a cart item with an explicit quantity.
    pub fn new(product: NewCartItem, quantity: u32) -> Self {
        Self {
            id: product.id,
            title: product.title,
            image_url: product.image_url,
            price: product.price,
            quantity,
        }
    }
}

/// A product about to be added to the cart. Quantity starts at 1.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct NewCartItem {
    /// Product identifier.
    pub id: ProductId,
    /// Product title.
    pub title: String,
    /// Product image URL.
    pub image_url: String,
    /// Unit price.
    pub price: f64,
}

impl NewCartItem {
    /// Create a new product entry.
    pub fn new(
        id: impl Into<ProductId>,
        title: impl Into<String>,
        image_url: impl Into<String>,
        price: f64,
    ) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            image_url: image_url.into(),
            price,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_snapshot_field_names() {
        let item = CartItem::new(
            NewCartItem::new("A", "Camiseta", "https://img/a.png", 10.5),
            2,
        );
        let json = serde_json::to_value(&item).unwrap();

        assert_eq!(json["id"], "A");
        assert_eq!(json["title"], "Camiseta");
        assert_eq!(json["image_url"], "https://img/a.png");
        assert_eq!(json["price"], 10.5);
        assert_eq!(json["quantity"], 2);
    }

    #[test]
    fn test_integer_price_is_accepted() {
        let item: CartItem = serde_json::from_str(
            r#"{"id":"B","title":"Mug","image_url":"","price":10,"quantity":3}"#,
        )
        .unwrap();
        assert_eq!(item.price, 10.0);
        assert_eq!(item.quantity, 3);
    }
}
