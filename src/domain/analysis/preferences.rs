//! Per-user analysis preferences.

use serde::{Deserialize, Serialize};

use crate::domain::foundation::{Timestamp, UserId};

/// How often automatic analysis should run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AnalysisFrequency {
    /// Only on explicit user request.
    Manual,
    Daily,
    Weekly,
    Monthly,
}

impl AnalysisFrequency {
    /// Days between automatic runs; `None` for manual.
    pub fn interval_days(&self) -> Option<i64> {
        match self {
            AnalysisFrequency::Manual => None,
            AnalysisFrequency::Daily => Some(1),
            AnalysisFrequency::Weekly => Some(7),
            AnalysisFrequency::Monthly => Some(30),
        }
    }
}

/// A user's analysis settings.
///
/// Created with defaults on first access, then only overwritten by
/// explicit user actions; never deleted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PersonalityAnalysisPreferences {
    pub user_id: UserId,
    pub is_enabled: bool,
    pub frequency: AnalysisFrequency,
    pub paused_until: Option<Timestamp>,
    pub show_data_usage: bool,
}

impl PersonalityAnalysisPreferences {
    /// Default settings for a user seen for the first time.
    pub fn defaults(user_id: UserId) -> Self {
        Self {
            user_id,
            is_enabled: true,
            frequency: AnalysisFrequency::Weekly,
            paused_until: None,
            show_data_usage: true,
        }
    }

    /// Enabled and not inside a pause window.
    pub fn is_currently_active(&self, now: Timestamp) -> bool {
        if !self.is_enabled {
            return false;
        }
        match self.paused_until {
            Some(paused_until) => paused_until.is_before(&now),
            None => true,
        }
    }

    /// A copy paused until the given time.
    pub fn paused(mut self, until: Timestamp) -> Self {
        self.paused_until = Some(until);
        self
    }

    /// A copy with any pause cleared.
    pub fn resumed(mut self) -> Self {
        self.paused_until = None;
        self
    }

    /// A copy with the enabled flag set.
    pub fn with_enabled(mut self, enabled: bool) -> Self {
        self.is_enabled = enabled;
        self
    }

    /// A copy with a different frequency.
    pub fn with_frequency(mut self, frequency: AnalysisFrequency) -> Self {
        self.frequency = frequency;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn user() -> UserId {
        UserId::new("user-1").unwrap()
    }

    #[test]
    fn defaults_are_enabled_weekly() {
        let prefs = PersonalityAnalysisPreferences::defaults(user());
        assert!(prefs.is_enabled);
        assert_eq!(prefs.frequency, AnalysisFrequency::Weekly);
        assert!(prefs.paused_until.is_none());
        assert!(prefs.show_data_usage);
    }

    #[test]
    fn active_when_enabled_and_unpaused() {
        let prefs = PersonalityAnalysisPreferences::defaults(user());
        assert!(prefs.is_currently_active(Timestamp::now()));
    }

    #[test]
    fn inactive_when_disabled() {
        let prefs = PersonalityAnalysisPreferences::defaults(user()).with_enabled(false);
        assert!(!prefs.is_currently_active(Timestamp::now()));
    }

    #[test]
    fn inactive_while_pause_window_is_open() {
        let now = Timestamp::now();
        let prefs = PersonalityAnalysisPreferences::defaults(user()).paused(now.plus_days(3));
        assert!(!prefs.is_currently_active(now));
    }

    #[test]
    fn active_again_after_pause_expires() {
        let now = Timestamp::now();
        let prefs = PersonalityAnalysisPreferences::defaults(user()).paused(now.minus_days(1));
        assert!(prefs.is_currently_active(now));
    }

    #[test]
    fn resumed_clears_pause() {
        let now = Timestamp::now();
        let prefs = PersonalityAnalysisPreferences::defaults(user())
            .paused(now.plus_days(3))
            .resumed();
        assert!(prefs.paused_until.is_none());
        assert!(prefs.is_currently_active(now));
    }

    #[test]
    fn frequency_intervals_match_cadence() {
        assert_eq!(AnalysisFrequency::Manual.interval_days(), None);
        assert_eq!(AnalysisFrequency::Daily.interval_days(), Some(1));
        assert_eq!(AnalysisFrequency::Weekly.interval_days(), Some(7));
        assert_eq!(AnalysisFrequency::Monthly.interval_days(), Some(30));
    }
}
