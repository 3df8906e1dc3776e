//! Config command - create, locate and inspect the showcase config file

use std::path::Path;

use anyhow::{anyhow, Context, Result};
use clap::{Parser, Subcommand};
use showcase_core::ShowcaseConfig;

use super::config_path;

#[derive(Parser, Debug)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub command: ConfigCommands,
}

#[derive(Subcommand, Debug)]
pub enum ConfigCommands {
    /// Write a config file with the default settings
    Init(InitArgs),
    /// Print the effective configuration as TOML
    Show,
    /// Show config file path
    Path,
}

#[derive(Parser, Debug)]
pub struct InitArgs {
    /// Force overwrite existing config
    #[arg(long, short)]
    pub force: bool,
}

pub fn run_config(args: ConfigArgs, explicit: Option<&Path>) -> Result<()> {
    match args.command {
        ConfigCommands::Init(args) => run_init(args, explicit),
        ConfigCommands::Show => run_show(explicit),
        ConfigCommands::Path => run_path(explicit),
    }
}

fn run_init(args: InitArgs, explicit: Option<&Path>) -> Result<()> {
    let path = config_path(explicit);

    if path.exists() && !args.force {
        return Err(anyhow!(
            "Config already exists at {}\n\nUse --force to overwrite",
            path.display()
        ));
    }

    ShowcaseConfig::default()
        .save_to(&path)
        .with_context(|| format!("Failed to write config file: {}", path.display()))?;

    println!("✅ Created config at: {}", path.display());
    println!("\nNext steps:");
    println!("  1. Edit the config: $EDITOR {}", path.display());
    println!("  2. Tune [search] debounce_ms / latency_ms");
    println!("  3. Run: showcase config show");

    Ok(())
}

fn run_show(explicit: Option<&Path>) -> Result<()> {
    let path = config_path(explicit);
    let config = ShowcaseConfig::load_from(&path)
        .with_context(|| format!("Failed to load config from {}", path.display()))?;

    let toml_str = config
        .to_toml()
        .context("Failed to serialize config to TOML")?;

    println!("{}", toml_str);

    Ok(())
}

fn run_path(explicit: Option<&Path>) -> Result<()> {
    println!("{}", config_path(explicit).display());
    Ok(())
}
