//! Configuration management CLI commands.

use std::path::{Path, PathBuf};

use clap::{Args, Subcommand};

use crate::output;
use fandreams_core::config::AppConfig;
use fandreams_core::error::{AppError, ErrorKind};

/// Default configuration shipped with the binary
const DEFAULT_CONFIG: &str = include_str!("../../../../config/default.toml");

/// Arguments for config commands
#[derive(Debug, Args)]
pub struct ConfigArgs {
    /// Config subcommand
    #[command(subcommand)]
    pub command: ConfigCommand,
}

/// Config subcommands
#[derive(Debug, Subcommand)]
pub enum ConfigCommand {
    /// Show the effective configuration
    Show,
    /// Validate the configuration files for the selected environment
    Validate,
    /// Generate a default configuration file
    Generate {
        /// Output file path
        #[arg(short, long, default_value = "config/generated.toml")]
        output: PathBuf,
    },
}

/// Execute config commands
pub fn execute(
    args: &ConfigArgs,
    config: &AppConfig,
    config_dir: &Path,
    env: &str,
) -> Result<(), AppError> {
    match &args.command {
        ConfigCommand::Show => output::print_json(config),
        ConfigCommand::Validate => match AppConfig::load_from(config_dir, env) {
            Ok(loaded) => {
                output::print_success(&format!(
                    "Configuration '{}' ({}) is valid",
                    config_dir.display(),
                    env
                ));
                output::print_kv("Log level", &loaded.logging.level);
                output::print_kv("Log format", &loaded.logging.format);
            }
            Err(e) => {
                output::print_error(&format!("Configuration invalid: {}", e));
                return Err(e);
            }
        },
        ConfigCommand::Generate { output: out_path } => {
            write_default(out_path)?;
            output::print_success(&format!(
                "Default config written to '{}'",
                out_path.display()
            ));
        }
    }

    Ok(())
}

fn write_default(out_path: &Path) -> Result<(), AppError> {
    if let Some(parent) = out_path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent).map_err(|e| {
            AppError::with_source(
                ErrorKind::Io,
                format!("Failed to create '{}': {}", parent.display(), e),
                e,
            )
        })?;
    }

    std::fs::write(out_path, DEFAULT_CONFIG).map_err(|e| {
        AppError::with_source(
            ErrorKind::Io,
            format!("Failed to write '{}': {}", out_path.display(), e),
            e,
        )
    })
}
