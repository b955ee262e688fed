//! Configuration management for snipbin
//!
//! Layered loading, lowest priority first:
//! 1. Default values (embedded in the structs)
//! 2. TOML configuration file (default: `config/snipbin.toml`, overridable
//!    via the `SNIPBIN_CONFIG` environment variable)
//! 3. Environment variables with the pattern `SNIPBIN__<section>__<key>`,
//!    e.g. `SNIPBIN__SERVER__BIND_ADDR=0.0.0.0:9000`
//!
//! A `.env` file is honored via dotenvy before the environment is read.

mod models;
mod sources;
mod validation;

pub use crate::humanize::ByteSize;
pub use models::{ApiLimits, Config, ServerConfig};
pub use validation::ValidationError;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to load configuration: {0}")]
    LoadError(#[from] config::ConfigError),

    #[error("Configuration validation failed: {0}")]
    ValidationError(#[from] ValidationError),
}

impl Config {
    /// Load configuration from all sources (file + environment).
    pub fn load() -> Result<Self, ConfigError> {
        let config = sources::load()?;
        validation::validate(&config)?;
        Ok(config)
    }

    /// Load configuration from a specific path. Useful for tests with
    /// custom configuration files.
    pub fn load_from_path(path: std::path::PathBuf) -> Result<Self, ConfigError> {
        let config = sources::load_from_sources(path)?;
        validation::validate(&config)?;
        Ok(config)
    }
}
