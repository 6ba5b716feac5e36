//! CLI command definitions and dispatch.

pub mod config;
pub mod pricing;
pub mod validate;

use std::path::PathBuf;

use clap::{Parser, Subcommand};

use crate::output::OutputFormat;
use fandreams_core::config::AppConfig;
use fandreams_core::error::AppError;

/// FanDreams pricing tables and API payload validation
#[derive(Debug, Parser)]
#[command(name = "fandreams", version, about, long_about = None)]
pub struct Cli {
    /// Directory holding `default.toml` and environment overlays
    #[arg(short, long, default_value = fandreams_core::config::DEFAULT_CONFIG_DIR)]
    pub config_dir: PathBuf,

    /// Configuration environment overlay to apply
    #[arg(short, long, env = "FANDREAMS_ENV", default_value = "development")]
    pub env: String,

    /// Output format
    #[arg(short, long, value_enum, default_value = "table")]
    pub format: OutputFormat,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,
}

/// Top-level commands
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Show platform fees, payout policy, and limits
    Pricing(pricing::PricingArgs),
    /// Validate a JSON payload against a request schema
    Validate(validate::ValidateArgs),
    /// Configuration management
    Config(config::ConfigArgs),
}

impl Cli {
    /// Load configuration for the selected directory and environment
    pub fn load_config(&self) -> Result<AppConfig, AppError> {
        AppConfig::load_from(&self.config_dir, &self.env)
    }

    /// Execute the CLI command
    pub fn execute(&self, config: &AppConfig) -> Result<(), AppError> {
        match &self.command {
            Commands::Pricing(args) => pricing::execute(args, self.format),
            Commands::Validate(args) => validate::execute(args, self.format),
            Commands::Config(args) => config::execute(args, config, &self.config_dir, &self.env),
        }
    }
}
