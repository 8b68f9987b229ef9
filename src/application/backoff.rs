//! Exponential backoff for polling freshly persisted profiles.

use std::time::Duration;

/// Base delay before the first retry.
pub const POLL_BASE_DELAY_MS: u64 = 500;

/// Growth factor between consecutive delays.
pub const POLL_MULTIPLIER: f64 = 1.5;

/// Total attempts before giving up.
pub const POLL_MAX_ATTEMPTS: u32 = 5;

/// Bounded exponential backoff: 500ms, 750ms, 1125ms, ... with at most
/// five attempts overall.
#[derive(Debug, Clone)]
pub struct PollBackoff {
    base: Duration,
    multiplier: f64,
    max_attempts: u32,
    attempt: u32,
}

impl PollBackoff {
    /// Backoff with the default polling schedule.
    pub fn new() -> Self {
        Self::with(
            Duration::from_millis(POLL_BASE_DELAY_MS),
            POLL_MULTIPLIER,
            POLL_MAX_ATTEMPTS,
        )
    }

    /// Backoff with a custom schedule.
    pub fn with(base: Duration, multiplier: f64, max_attempts: u32) -> Self {
        Self {
            base,
            multiplier,
            max_attempts,
            attempt: 1,
        }
    }

    /// The attempt about to run, starting at 1.
    pub fn attempt(&self) -> u32 {
        self.attempt
    }

    /// Delay to sleep before the next attempt, or `None` once all
    /// attempts are used up.
    pub fn next_delay(&mut self) -> Option<Duration> {
        if self.attempt >= self.max_attempts {
            return None;
        }
        let exponent = self.attempt.saturating_sub(1) as i32;
        let delay = self.base.mul_f64(self.multiplier.powi(exponent));
        self.attempt += 1;
        Some(delay)
    }
}

impl Default for PollBackoff {
    fn default() -> Self {
        Self::new()
    }
}
