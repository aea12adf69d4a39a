//! CLI execution context.

use std::path::{Path, PathBuf};

use anyhow::{Context as _, Result};
use gomarket_cart::{CartStore, LoadOutcome};
use gomarket_kv::FileStore;

use crate::config::{CliConfig, CONFIG_FILE_NAMES};
use crate::output::Output;

/// Execution context for CLI commands.
pub struct Context {
    /// CLI configuration.
    pub config: CliConfig,
    /// File the configuration came from, if any.
    pub config_path: Option<PathBuf>,
    /// Output handler.
    pub output: Output,
    /// Working directory.
    pub cwd: PathBuf,
}

impl Context {
    /// Load context from config file.
    pub fn load(config_path: Option<&str>, output: Output) -> Result<Self> {
        let cwd = std::env::current_dir().context("Failed to get current directory")?;

        let (config, config_path) = if let Some(path) = config_path {
            let path = PathBuf::from(path);
            (CliConfig::load(&path)?, Some(path))
        } else {
            // Try to find config in current directory or parent directories
            match Self::find_config(&cwd) {
                Some((config, path)) => (config, Some(path)),
                None => (CliConfig::default(), None),
            }
        };

        Ok(Self {
            config,
            config_path,
            output,
            cwd,
        })
    }

    /// Find config file in directory tree.
    fn find_config(start: &Path) -> Option<(CliConfig, PathBuf)> {
        let mut current = start.to_path_buf();
        loop {
            for name in &CONFIG_FILE_NAMES {
                let config_path = current.join(name);
                if config_path.exists() {
                    if let Ok(config) = CliConfig::load(&config_path) {
                        return Some((config, config_path));
                    }
                }
            }

            if !current.pop() {
                break;
            }
        }

        None
    }

    /// Resolve a path relative to the working directory.
    pub fn resolve_path(&self, path: &str) -> PathBuf {
        if PathBuf::from(path).is_absolute() {
            PathBuf::from(path)
        } else {
            self.cwd.join(path)
        }
    }

    /// Directory holding the cart snapshot.
    pub fn storage_dir(&self) -> PathBuf {
        self.resolve_path(&self.config.storage.dir)
    }

    /// Open the file store.
    pub fn open_store(&self) -> Result<FileStore> {
        let dir = self.storage_dir();
        FileStore::open(&dir)
            .with_context(|| format!("Failed to open cart storage at {}", dir.display()))
    }

    /// Open the cart and load its saved snapshot.
    pub async fn open_cart(&self) -> Result<CartStore<FileStore>> {
        let cart = CartStore::new(self.open_store()?, self.config.cart.clone());

        match cart.initialize().await {
            LoadOutcome::Restored(n) => self.output.debug(&format!("Restored {} product(s)", n)),
            LoadOutcome::Empty => self.output.debug("No saved cart, starting empty"),
            LoadOutcome::Discarded => self
                .output
                .warn("Saved cart could not be read and was ignored"),
        }

        Ok(cart)
    }
}
