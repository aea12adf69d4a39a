//! Cart configuration.

use serde::{Deserialize, Serialize};

/// Where the cart keeps its snapshot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CartConfig {
    /// Key the whole cart is stored under.
    #[serde(default = "default_storage_key")]
    pub storage_key: String,
}

/// The key used by the GoMarketplace mobile app.
pub fn default_storage_key() -> String {
    gomarket_kv::namespaced_key!("GoMarketplace", "products")
}

impl CartConfig {
    /// Override the storage key.
    pub fn with_storage_key(mut self, key: impl Into<String>) -> Self {
        self.storage_key = key.into();
        self
    }
}

impl Default for CartConfig {
    fn default() -> Self {
        Self {
            storage_key: default_storage_key(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_key() {
        assert_eq!(CartConfig::default().storage_key, "@GoMarketplace:products");
    }

    #[test]
    fn test_missing_key_falls_back_to_default() {
        let config: CartConfig = serde_json::from_str("{}").unwrap();
        assert_eq!(config, CartConfig::default());

        let config = CartConfig::default().with_storage_key("@Other:cart");
        assert_eq!(config.storage_key, "@Other:cart");
    }
}
