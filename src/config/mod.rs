//! Configuration management for the offload engine
//!
//! Layered configuration loaded from:
//! 1. Default values (embedded in structs)
//! 2. TOML configuration file
//! 3. Environment variables (highest priority)
//!
//! # Environment Variables
//!
//! Settings can be overridden with the pattern `COLDSTORE__<section>__<key>`:
//! - `COLDSTORE__STORAGE__BASE_PATH=/mnt/cold`
//! - `COLDSTORE__OFFLOAD__APPEND_WORKERS=8`
//!
//! The configuration file defaults to `config/coldstore.toml` and can be
//! pointed elsewhere with the `COLDSTORE_CONFIG` environment variable.

mod models;
mod sources;
mod validation;

pub use models::{Config, OffloadConfig, StorageConfig};
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
    /// Load configuration from all sources (file + environment)
    pub fn load() -> Result<Self, ConfigError> {
        let config = sources::load()?;
        validation::validate(&config)?;
        Ok(config)
    }

    /// Load configuration from a specific path
    ///
    /// Useful for testing with custom configuration files.
    pub fn load_from_path(path: std::path::PathBuf) -> Result<Self, ConfigError> {
        let config = sources::load_from_sources(path)?;
        validation::validate(&config)?;
        Ok(config)
    }
}
