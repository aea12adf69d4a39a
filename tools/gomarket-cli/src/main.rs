//! GoMarketplace CLI - drive a persistent cart from the terminal.
//!
//! Commands:
//! - `gomarket show` - Print the cart
//! - `gomarket add` - Add a product
//! - `gomarket inc` / `gomarket dec` - Change a product's quantity
//! - `gomarket reset` - Delete the saved cart
//! - `gomarket config` - Manage configuration

mod commands;
mod config;
mod context;
mod output;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use commands::{AddArgs, ConfigArgs, QuantityArgs, ResetArgs};

/// GoMarketplace CLI - manage a cart stored on this machine
#[derive(Parser)]
#[command(name = "gomarket")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Use JSON output format
    #[arg(long, global = true)]
    json: bool,

    /// Config file path
    #[arg(short, long, global = true)]
    config: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Show the products in the cart
    Show,

    /// Add a product to the cart
    Add(AddArgs),

    /// Increase a product's quantity by one
    Inc(QuantityArgs),

    /// Decrease a product's quantity by one, removing it at zero
    Dec(QuantityArgs),

    /// Delete the saved cart
    Reset(ResetArgs),

    /// Manage configuration
    Config(ConfigArgs),
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    init_tracing(cli.verbose);

    // Setup output formatting
    let output = output::Output::new(cli.verbose, cli.json);

    // Load config
    let config_path = cli.config.as_deref();
    let ctx = context::Context::load(config_path, output)?;
    tracing::debug!(
        config = ?ctx.config_path,
        storage = %ctx.storage_dir().display(),
        "loaded configuration"
    );

    // Execute command
    let result = match cli.command {
        Commands::Show => commands::cart::show(&ctx).await,
        Commands::Add(args) => commands::cart::add(args, &ctx).await,
        Commands::Inc(args) => commands::cart::increment(args, &ctx).await,
        Commands::Dec(args) => commands::cart::decrement(args, &ctx).await,
        Commands::Reset(args) => commands::cart::reset(args, &ctx).await,
        Commands::Config(args) => commands::config::run(args, &ctx).await,
    };

    if let Err(e) = result {
        ctx.output.error(&format!("{:#}", e));
        std::process::exit(1);
    }

    Ok(())
}

/// Log to stderr; `RUST_LOG` wins over `--verbose`.
fn init_tracing(verbose: bool) {
    let default = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}
