//! CLI command implementations.

pub mod cart;
pub mod config;

use clap::{Args, Subcommand};

/// Arguments for the add command.
#[derive(Args)]
pub struct AddArgs {
    /// Product ID.
    pub id: String,

    /// Product title.
    #[arg(short, long)]
    pub title: String,

    /// Unit price.
    #[arg(short, long)]
    pub price: f64,

    /// Product image URL.
    #[arg(short, long, default_value = "")]
    pub image_url: String,
}

/// Arguments for the inc and dec commands.
#[derive(Args)]
pub struct QuantityArgs {
    /// Product ID.
    pub id: String,
}

/// Arguments for the reset command.
#[derive(Args)]
pub struct ResetArgs {
    /// Skip confirmation prompt.
    #[arg(short, long)]
    pub yes: bool,
}

/// Arguments for the config command.
#[derive(Args)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub command: ConfigCommand,
}

#[derive(Subcommand)]
pub enum ConfigCommand {
    /// Show current configuration.
    Show,
    /// Get a config value.
    Get {
        /// Config key (dot-separated).
        key: String,
    },
    /// Set a config value.
    Set {
        /// Config key (dot-separated).
        key: String,
        /// Value to set.
        value: String,
    },
    /// Initialize a new config file.
    Init {
        /// Force overwrite existing config.
        #[arg(short, long)]
        force: bool,
    },
    /// Validate the config file.
    Validate,
}
