//! CLI configuration.

use std::path::Path;

use anyhow::{Context, Result};
use gomarket_cart::CartConfig;
use serde::{Deserialize, Serialize};

/// Config file names searched for, in order.
pub const CONFIG_FILE_NAMES: [&str; 3] = ["gomarket.toml", ".gomarket.toml", "gomarket.json"];

/// CLI configuration file.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CliConfig {
    /// Where snapshots are kept on disk.
    #[serde(default)]
    pub storage: StorageConfig,

    /// Cart settings.
    #[serde(default)]
    pub cart: CartConfig,
}

impl CliConfig {
    /// Load config from a file.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        if is_json(path) {
            serde_json::from_str(&content)
                .with_context(|| format!("Failed to parse JSON config: {}", path.display()))
        } else {
            toml::from_str(&content)
                .with_context(|| format!("Failed to parse TOML config: {}", path.display()))
        }
    }

    /// Save config to a file.
    pub fn save(&self, path: &Path) -> Result<()> {
        let content = if is_json(path) {
            serde_json::to_string_pretty(self)?
        } else {
            toml::to_string_pretty(self)?
        };

        std::fs::write(path, content)
            .with_context(|| format!("Failed to write config file: {}", path.display()))
    }
}

fn is_json(path: &Path) -> bool {
    path.extension().is_some_and(|e| e == "json")
}

/// Storage configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StorageConfig {
    /// Directory holding the snapshot files, relative to the working directory.
    #[serde(default = "default_dir")]
    pub dir: String,
}

fn default_dir() -> String {
    ".gomarket".to_string()
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self { dir: default_dir() }
    }
}

/// Generate a default gomarket.toml config file.
pub fn generate_default_config() -> String {
    format!(
        r#"# GoMarketplace cart configuration

[storage]
dir = "{dir}"

[cart]
storage_key = "{key}"
"#,
        dir = default_dir(),
        key = gomarket_cart::config::default_storage_key(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generated_config_parses_to_defaults() {
        let config: CliConfig = toml::from_str(&generate_default_config()).unwrap();
        assert_eq!(config, CliConfig::default());
    }

    #[test]
    fn test_partial_config_fills_defaults() {
        let config: CliConfig = toml::from_str("[storage]\ndir = \"/tmp/cart\"\n").unwrap();
        assert_eq!(config.storage.dir, "/tmp/cart");
        assert_eq!(config.cart.storage_key, "@GoMarketplace:products");
    }

    #[test]
    fn test_save_and_load_both_formats() {
        let dir = tempfile::tempdir().unwrap();
        let mut config = CliConfig::default();
        config.cart = CartConfig::default().with_storage_key("@Test:cart");

        for name in ["gomarket.toml", "gomarket.json"] {
            let path = dir.path().join(name);
            config.save(&path).unwrap();
            assert_eq!(CliConfig::load(&path).unwrap(), config);
        }
    }
}
