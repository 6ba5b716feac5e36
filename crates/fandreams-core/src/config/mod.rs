//! Application configuration schemas.
//!
//! Configuration is merged from TOML files and the environment via the
//! `config` crate. Each sub-module represents a logical section.

pub mod logging;

use std::path::Path;

use serde::{Deserialize, Serialize};

use self::logging::LoggingConfig;

use crate::error::AppError;

/// Directory searched for configuration files by [`AppConfig::load`].
pub const DEFAULT_CONFIG_DIR: &str = "config";

/// Prefix for configuration overrides taken from the environment.
pub const ENV_PREFIX: &str = "FANDREAMS";

/// Root application configuration.
///
/// Deserialized from `default.toml`, then an environment overlay
/// (`{env}.toml`), then `FANDREAMS__*` variables.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    /// Logging settings.
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl AppConfig {
    /// Load configuration for `env` from the default `config/` directory.
    pub fn load(env: &str) -> Result<Self, AppError> {
        Self::load_from(Path::new(DEFAULT_CONFIG_DIR), env)
    }

    /// Load configuration for `env` from `dir`.
    ///
    /// Both files are optional; a missing directory yields the defaults
    /// plus any environment overrides.
    pub fn load_from(dir: &Path, env: &str) -> Result<Self, AppError> {
        tracing::debug!(dir = %dir.display(), env, "Loading configuration");

        let default_path = dir.join("default");
        let env_path = dir.join(env);

        let config = config::Config::builder()
            .add_source(config::File::with_name(&default_path.to_string_lossy()).required(false))
            .add_source(config::File::with_name(&env_path.to_string_lossy()).required(false))
            .add_source(
                config::Environment::with_prefix(ENV_PREFIX)
                    .separator("__")
                    .try_parsing(true),
            )
            .build()
            .map_err(|e| AppError::configuration(format!("Failed to build config: {e}")))?;

        config
            .try_deserialize()
            .map_err(|e| AppError::configuration(format!("Failed to deserialize config: {e}")))
    }
}
