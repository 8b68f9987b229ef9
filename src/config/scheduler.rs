//! Scheduler configuration

use serde::Deserialize;
use std::time::Duration;

use super::error::ValidationError;
use crate::application::PollBackoff;

/// Cadence and polling configuration for the analysis scheduler
#[derive(Debug, Clone, Deserialize)]
pub struct SchedulerConfig {
    /// Seconds within which repeated trigger checks for one user
    /// collapse into a single check
    #[serde(default = "default_debounce_window_secs")]
    pub debounce_window_secs: u64,

    /// Base delay in milliseconds for profile polling backoff
    #[serde(default = "default_poll_base_delay_ms")]
    pub poll_base_delay_ms: u64,

    /// Growth factor between consecutive polling delays
    #[serde(default = "default_poll_multiplier")]
    pub poll_multiplier: f64,

    /// Maximum profile polling attempts before giving up
    #[serde(default = "default_poll_max_attempts")]
    pub poll_max_attempts: u32,
}

impl SchedulerConfig {
    /// Get the debounce window as a duration
    pub fn debounce_window(&self) -> Duration {
        Duration::from_secs(self.debounce_window_secs)
    }

    /// Build a poll backoff following the configured schedule
    pub fn poll_backoff(&self) -> PollBackoff {
        PollBackoff::with(
            Duration::from_millis(self.poll_base_delay_ms),
            self.poll_multiplier,
            self.poll_max_attempts,
        )
    }

    /// Validate scheduler configuration
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.debounce_window_secs == 0 || self.debounce_window_secs > 3600 {
            return Err(ValidationError::InvalidDebounceWindow);
        }
        if self.poll_base_delay_ms == 0
            || self.poll_multiplier < 1.0
            || self.poll_max_attempts == 0
        {
            return Err(ValidationError::InvalidPollSchedule);
        }
        Ok(())
    }
}

impl Default for SchedulerConfig {
    fn default() -> Self {
        Self {
            debounce_window_secs: default_debounce_window_secs(),
            poll_base_delay_ms: default_poll_base_delay_ms(),
            poll_multiplier: default_poll_multiplier(),
            poll_max_attempts: default_poll_max_attempts(),
        }
    }
}

fn default_debounce_window_secs() -> u64 {
    crate::application::DEBOUNCE_WINDOW_SECS
}

fn default_poll_base_delay_ms() -> u64 {
    crate::application::POLL_BASE_DELAY_MS
}

fn default_poll_multiplier() -> f64 {
    crate::application::POLL_MULTIPLIER
}

fn default_poll_max_attempts() -> u32 {
    crate::application::POLL_MAX_ATTEMPTS
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scheduler_defaults() {
        let config = SchedulerConfig::default();
        assert_eq!(config.debounce_window_secs, 120);
        assert_eq!(config.poll_base_delay_ms, 500);
        assert!((config.poll_multiplier - 1.5).abs() < f64::EPSILON);
        assert_eq!(config.poll_max_attempts, 5);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_debounce_window_as_duration() {
        let config = SchedulerConfig {
            debounce_window_secs: 30,
            ..Default::default()
        };
        assert_eq!(config.debounce_window(), Duration::from_secs(30));
    }

    #[test]
    fn test_validation_rejects_zero_debounce() {
        let config = SchedulerConfig {
            debounce_window_secs: 0,
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validation_rejects_empty_poll_schedule() {
        let config = SchedulerConfig {
            poll_max_attempts: 0,
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validation_rejects_a_shrinking_multiplier() {
        let config = SchedulerConfig {
            poll_multiplier: 0.5,
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_poll_backoff_follows_the_configured_schedule() {
        let config = SchedulerConfig {
            poll_base_delay_ms: 10,
            poll_multiplier: 2.0,
            poll_max_attempts: 3,
            ..Default::default()
        };

        let mut backoff = config.poll_backoff();
        assert_eq!(backoff.next_delay(), Some(Duration::from_millis(10)));
        assert_eq!(backoff.next_delay(), Some(Duration::from_millis(20)));
        assert_eq!(backoff.next_delay(), None);
    }
}
