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
#[derive(Debug, Error)]
pub enum ValidationError {
    #[error("Required configuration missing: {0}")]
    MissingRequired(&'static str),

    #[error("Storage root directory must not be empty")]
    InvalidStorageRoot,

    #[error("Debounce window must be between 1 and 3600 seconds")]
    InvalidDebounceWindow,

    #[error("Poll backoff needs a nonzero base delay, a multiplier of at least one, and an attempt cap")]
    InvalidPollSchedule,

    #[error("Log level directive must not be blank")]
    InvalidLogLevel,
}
