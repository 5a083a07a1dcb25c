//
//  scribe-cli
//  cli/config.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! CLI configuration commands
//!
//! Reads and writes `config.toml`. Only the keys in [`CONFIG_KEYS`] are
//! accepted; values are validated before anything is saved.

use anyhow::{bail, Result};
use clap::{Args, Subcommand};
use console::style;

use crate::config::{Config, CONFIG_KEYS};

use super::GlobalOptions;

/// Manage CLI configuration
#[derive(Args, Debug)]
pub struct ConfigCommand {
    #[command(subcommand)]
    pub command: ConfigSubcommand,
}

#[derive(Subcommand, Debug)]
pub enum ConfigSubcommand {
    /// Get a configuration value
    Get(GetArgs),

    /// Set a configuration value
    Set(SetArgs),

    /// Reset a configuration value to its default
    Unset(GetArgs),

    /// List all configuration values
    #[command(visible_alias = "ls")]
    List,

    /// Show configuration file path
    Path,
}

#[derive(Args, Debug)]
pub struct GetArgs {
    /// Configuration key, e.g. api.base_url
    pub key: String,
}

#[derive(Args, Debug)]
pub struct SetArgs {
    /// Configuration key, e.g. api.base_url
    pub key: String,

    /// New value
    pub value: String,
}

impl ConfigCommand {
    pub async fn run(&self, global: &GlobalOptions) -> Result<()> {
        match &self.command {
            ConfigSubcommand::Get(args) => get(args, global),
            ConfigSubcommand::Set(args) => set(args, global),
            ConfigSubcommand::Unset(args) => unset(args, global),
            ConfigSubcommand::List => list(global),
            ConfigSubcommand::Path => path(global),
        }
    }
}

fn get(args: &GetArgs, global: &GlobalOptions) -> Result<()> {
    let config = Config::load()?;
    let Some(value) = config.get(&args.key) else {
        bail!(
            "Unknown configuration key '{}'. Valid keys: {}",
            args.key,
            CONFIG_KEYS.join(", ")
        );
    };

    if global.json {
        let result = serde_json::json!({ "key": args.key, "value": value });
        println!("{}", serde_json::to_string_pretty(&result)?);
    } else {
        println!("{}", value);
    }
    Ok(())
}

fn set(args: &SetArgs, global: &GlobalOptions) -> Result<()> {
    let mut config = Config::load()?;
    config.set(&args.key, &args.value)?;
    config.save()?;
    report_change(global, &args.key, config.get(&args.key))
}

fn unset(args: &GetArgs, global: &GlobalOptions) -> Result<()> {
    let mut config = Config::load()?;
    let Some(default) = Config::default().get(&args.key) else {
        bail!(
            "Unknown configuration key '{}'. Valid keys: {}",
            args.key,
            CONFIG_KEYS.join(", ")
        );
    };
    config.set(&args.key, &default)?;
    config.save()?;
    report_change(global, &args.key, Some(default))
}

fn report_change(global: &GlobalOptions, key: &str, value: Option<String>) -> Result<()> {
    if global.json {
        let result = serde_json::json!({ "success": true, "key": key, "value": value });
        println!("{}", serde_json::to_string_pretty(&result)?);
    } else {
        println!(
            "{} Set {} = {}",
            style("✓").green(),
            style(key).cyan(),
            value.unwrap_or_default()
        );
    }
    Ok(())
}

fn list(global: &GlobalOptions) -> Result<()> {
    let config = Config::load()?;

    if global.json {
        println!("{}", serde_json::to_string_pretty(&config)?);
        return Ok(());
    }

    println!();
    println!("{}", style("Configuration").bold());
    println!("{}", "-".repeat(50));
    for key in CONFIG_KEYS {
        let value = config.get(key).unwrap_or_default();
        println!("  {:<26} {}", style(key).cyan(), value);
    }
    println!();
    Ok(())
}

fn path(global: &GlobalOptions) -> Result<()> {
    let path = Config::config_path()?;
    if global.json {
        let result = serde_json::json!({
            "path": path.display().to_string(),
            "exists": path.exists(),
        });
        println!("{}", serde_json::to_string_pretty(&result)?);
    } else {
        println!("{}", path.display());
    }
    Ok(())
}
