//! Application configuration module
//!
//! This module provides type-safe configuration loading from environment variables
//! using the `config` and `dotenvy` crates. Configuration is loaded with the
//! `HOME_COMPASS` prefix and nested values use double underscores as separators.
//! Every section has defaults, so an empty environment loads successfully.
//!
//! # Example
//!
//! ```no_run
//! use home_compass::config::{init_tracing, AppConfig};
//!
//! let config = AppConfig::load().expect("Failed to load configuration");
//! config.validate().expect("Invalid configuration");
//! init_tracing(&config.logging);
//! ```

mod error;
mod logging;
mod snapshot;
mod thresholds;

pub use error::{ConfigError, ValidationError};
pub use logging::{init_tracing, LoggingConfig};
pub use snapshot::SnapshotConfig;
pub use thresholds::ThresholdConfig;

use serde::Deserialize;

/// Root application configuration
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    /// Log filter and output format
    #[serde(default)]
    pub logging: LoggingConfig,

    /// Comparator significance thresholds and magnitude bands
    #[serde(default)]
    pub thresholds: ThresholdConfig,

    /// Default raw-data snapshot
    #[serde(default)]
    pub snapshot: SnapshotConfig,
}

impl AppConfig {
    /// Load configuration from environment variables
    ///
    /// This function:
    /// 1. Loads `.env` file if present (for development)
    /// 2. Reads environment variables with `HOME_COMPASS` prefix
    /// 3. Uses `__` (double underscore) to separate nested values
    /// 4. Deserializes into typed configuration structs
    ///
    /// # Environment Variable Format
    ///
    /// - `HOME_COMPASS__LOGGING__JSON=true` -> `logging.json = true`
    /// - `HOME_COMPASS__THRESHOLDS__EPI_SIGNIFICANT=12` -> `thresholds.epi_significant = 12`
    /// - `HOME_COMPASS__SNAPSHOT__PATH=./data/snapshot.json` -> `snapshot.path`
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if values cannot be parsed into expected types.
    pub fn load() -> Result<Self, ConfigError> {
        // Load .env file if present (development)
        dotenvy::dotenv().ok();

        let config = config::Config::builder()
            .add_source(
                config::Environment::default()
                    .prefix("HOME_COMPASS")
                    .separator("__"),
            )
            .build()?
            .try_deserialize()?;

        Ok(config)
    }

    /// Validate all configuration values
    ///
    /// # Errors
    ///
    /// Returns `ValidationError` if any configuration value is invalid.
    pub fn validate(&self) -> Result<(), ValidationError> {
        self.logging.validate()?;
        self.thresholds.validate()?;
        self.snapshot.validate()?;
        Ok(())
    }
}
