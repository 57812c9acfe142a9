//! Configuration error types

use thiserror::Error;

/// Errors that can occur during configuration loading
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Configuration loading failed: {0}")]
    LoadError(#[from] config::ConfigError),

    #[error("Validation failed: {0}")]
    ValidationFailed(#[from] ValidationError),
}

/// Errors that can occur during configuration validation
#[derive(Debug, Error, PartialEq)]
pub enum ValidationError {
    #[error("Invalid log filter directive: {0}")]
    InvalidLogFilter(String),

    #[error("Threshold {0} must be positive")]
    NonPositiveThreshold(&'static str),

    #[error("Magnitude bands for {0} must be positive and ascending")]
    InvalidBands(&'static str),

    #[error("Confidence gaps must satisfy 0 < preference_gap < clear_winner_gap")]
    InvalidConfidenceGaps,

    #[error("Snapshot path must not be blank")]
    BlankSnapshotPath,
}
