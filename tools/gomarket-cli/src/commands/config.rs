//! Configuration management commands.

use std::fs;
use std::path::PathBuf;

use anyhow::{bail, Result};

use super::{ConfigArgs, ConfigCommand};
use crate::config::{generate_default_config, CliConfig, CONFIG_FILE_NAMES};
use crate::context::Context;

/// Run the config command.
pub async fn run(args: ConfigArgs, ctx: &Context) -> Result<()> {
    match args.command {
        ConfigCommand::Show => show_config(ctx),
        ConfigCommand::Get { key } => get_config(&key, ctx),
        ConfigCommand::Set { key, value } => set_config(&key, &value, ctx),
        ConfigCommand::Init { force } => init_config(force, ctx),
        ConfigCommand::Validate => validate_config(ctx),
    }
}

fn show_config(ctx: &Context) -> Result<()> {
    if ctx.output.is_json() {
        ctx.output.json(&ctx.config);
        return Ok(());
    }

    ctx.output.header("Current Configuration");

    match &ctx.config_path {
        Some(path) => ctx.output.kv("file", &path.display().to_string()),
        None => ctx.output.kv("file", "(defaults)"),
    }

    ctx.output.info("");
    ctx.output.info("[storage]");
    ctx.output.kv("dir", &ctx.config.storage.dir);
    ctx.output.kv("resolved", &ctx.storage_dir().display().to_string());

    ctx.output.info("");
    ctx.output.info("[cart]");
    ctx.output.kv("storage_key", &ctx.config.cart.storage_key);

    Ok(())
}

fn get_config(key: &str, ctx: &Context) -> Result<()> {
    let value = get_config_value(&ctx.config, key)?;

    if ctx.output.is_json() {
        ctx.output.json(&serde_json::json!({ "key": key, "value": value }));
    } else {
        println!("{}", value);
    }

    Ok(())
}

fn set_config(key: &str, value: &str, ctx: &Context) -> Result<()> {
    let config_path = find_config_file(ctx)?;

    let mut config = CliConfig::load(&config_path)?;
    set_config_value(&mut config, key, value)?;
    config.save(&config_path)?;

    ctx.output.success(&format!("Set {} = {}", key, value));

    Ok(())
}

fn init_config(force: bool, ctx: &Context) -> Result<()> {
    let config_path = ctx.cwd.join(CONFIG_FILE_NAMES[0]);

    if config_path.exists() && !force {
        bail!(
            "Config file already exists: {}. Use --force to overwrite.",
            config_path.display()
        );
    }

    fs::write(&config_path, generate_default_config())?;

    ctx.output.success(&format!("Created: {}", config_path.display()));

    Ok(())
}

fn validate_config(ctx: &Context) -> Result<()> {
    let errors = validation_errors(&ctx.config);

    if errors.is_empty() {
        ctx.output.success("Configuration is valid");
        return Ok(());
    }

    for error in &errors {
        ctx.output.error(&format!("Error: {}", error));
    }

    bail!("Configuration has {} error(s)", errors.len())
}

fn validation_errors(config: &CliConfig) -> Vec<String> {
    let mut errors = Vec::new();

    if config.storage.dir.trim().is_empty() {
        errors.push("storage.dir must not be empty".to_string());
    }

    if config.cart.storage_key.trim().is_empty() {
        errors.push("cart.storage_key must not be empty".to_string());
    }

    errors
}

fn get_config_value(config: &CliConfig, key: &str) -> Result<String> {
    let parts: Vec<&str> = key.split('.').collect();

    match parts.as_slice() {
        ["storage", "dir"] => Ok(config.storage.dir.clone()),
        ["cart", "storage_key"] => Ok(config.cart.storage_key.clone()),
        _ => bail!("Unknown config key: {}", key),
    }
}

fn set_config_value(config: &mut CliConfig, key: &str, value: &str) -> Result<()> {
    let parts: Vec<&str> = key.split('.').collect();

    match parts.as_slice() {
        ["storage", "dir"] => config.storage.dir = value.to_string(),
        ["cart", "storage_key"] => config.cart.storage_key = value.to_string(),
        _ => bail!("Unknown config key: {}", key),
    }

    Ok(())
}

/// The file loaded at startup, or the first config file in the working directory.
fn find_config_file(ctx: &Context) -> Result<PathBuf> {
    if let Some(path) = &ctx.config_path {
        return Ok(path.clone());
    }
    for name in &CONFIG_FILE_NAMES {
        let path = ctx.cwd.join(name);
        if path.exists() {
            return Ok(path);
        }
    }
    bail!("No config file found. Run `gomarket config init` to create one.")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_get_and_set_values() {
        let mut config = CliConfig::default();

        set_config_value(&mut config, "storage.dir", "/var/cart").unwrap();
        set_config_value(&mut config, "cart.storage_key", "@Test:cart").unwrap();

        assert_eq!(get_config_value(&config, "storage.dir").unwrap(), "/var/cart");
        assert_eq!(
            get_config_value(&config, "cart.storage_key").unwrap(),
            "@Test:cart"
        );
        assert!(get_config_value(&config, "cart.unknown").is_err());
        assert!(set_config_value(&mut config, "storage", "x").is_err());
    }

    #[test]
    fn test_validation() {
        assert!(validation_errors(&CliConfig::default()).is_empty());

        let mut config = CliConfig::default();
        config.storage.dir = " ".to_string();
        config.cart.storage_key = String::new();
        assert_eq!(validation_errors(&config).len(), 2);
    }
}
