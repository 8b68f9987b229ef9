//! Application configuration module
//!
//! This module provides type-safe configuration loading from environment variables
//! using the `config` and `dotenvy` crates. Configuration is loaded with the
//! `HABIT_LENS_` prefix and nested values use underscores as separators.
//!
//! # Example
//!
//! ```no_run
//! use habit_lens::config::AppConfig;
//!
//! let config = AppConfig::load().expect("Failed to load configuration");
//! config.validate().expect("Invalid configuration");
//!
//! println!("Storing profiles under {}", config.storage.root_dir.display());
//! ```

mod error;
mod features;
mod logging;
mod scheduler;
mod storage;

pub use error::{ConfigError, ValidationError};
pub use features::FeatureFlags;
pub use logging::LoggingConfig;
pub use scheduler::SchedulerConfig;
pub use storage::{StorageBackend, StorageConfig};

use serde::Deserialize;

/// Root application configuration
///
/// Contains all configuration sections for the Habit Lens engine.
/// Load using [`AppConfig::load()`] which reads from environment variables.
#[derive(Debug, Clone, Deserialize, Default)]
pub struct AppConfig {
    /// Storage configuration (profile and preference files)
    #[serde(default)]
    pub storage: StorageConfig,

    /// Scheduler configuration (debounce window, polling backoff)
    #[serde(default)]
    pub scheduler: SchedulerConfig,

    /// Logging configuration (filter directive, output format)
    #[serde(default)]
    pub logging: LoggingConfig,

    /// Feature flags
    #[serde(default)]
    pub features: FeatureFlags,
}

impl AppConfig {
    /// Load configuration from environment variables
    ///
    /// This function:
    /// 1. Loads `.env` file if present (for development)
    /// 2. Reads environment variables with `HABIT_LENS` prefix
    /// 3. Uses `__` (double underscore) to separate nested values
    /// 4. Deserializes into typed configuration structs
    ///
    /// # Environment Variable Format
    ///
    /// - `HABIT_LENS__STORAGE__ROOT_DIR=/var/lib/habit-lens` -> `storage.root_dir = ...`
    /// - `HABIT_LENS__SCHEDULER__DEBOUNCE_WINDOW_SECS=60` -> `scheduler.debounce_window_secs = 60`
    ///
    /// Every section has working defaults, so an empty environment is
    /// a valid configuration.
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
                    .prefix("HABIT_LENS")
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
        self.storage.validate()?;
        self.scheduler.validate()?;
        self.logging.validate()?;
        Ok(())
    }
}
