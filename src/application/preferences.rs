//! AnalysisPreferencesManager - user-facing preference operations.
//!
//! Loads and saves per-user analysis settings, keeps the scheduler's
//! cadence in step with them, and bootstraps the automatic trigger on
//! first load. Saves report success as a boolean so the caller can
//! offer a retry instead of handling an error.

use std::sync::Arc;

use tracing::{debug, info, warn};

use crate::application::orchestrator::PersonalityAnalysisOrchestrator;
use crate::domain::analysis::{AnalysisError, PersonalityAnalysisPreferences};
use crate::domain::foundation::{Timestamp, UserId};
use crate::ports::{PersonalityAnalysisRepository, PersonalityAnalysisScheduler};

/// Owns preference reads and writes plus their scheduling side effects.
pub struct AnalysisPreferencesManager {
    repository: Arc<dyn PersonalityAnalysisRepository>,
    scheduler: Arc<dyn PersonalityAnalysisScheduler>,
    orchestrator: Arc<PersonalityAnalysisOrchestrator>,
}

impl AnalysisPreferencesManager {
    /// Creates a new AnalysisPreferencesManager.
    pub fn new(
        repository: Arc<dyn PersonalityAnalysisRepository>,
        scheduler: Arc<dyn PersonalityAnalysisScheduler>,
        orchestrator: Arc<PersonalityAnalysisOrchestrator>,
    ) -> Self {
        Self {
            repository,
            scheduler,
            orchestrator,
        }
    }

    /// Returns the user's preferences, creating and persisting the
    /// defaults on first access.
    ///
    /// Active preferences start the scheduling cadence, and non-manual
    /// frequencies run one automatic trigger check. Both side effects
    /// are best-effort; the scheduler absorbs repeated checks inside
    /// its debounce window.
    pub async fn load_preferences(
        &self,
        user_id: &UserId,
    ) -> Result<PersonalityAnalysisPreferences, AnalysisError> {
        let preferences = match self.repository.analysis_preferences(user_id).await? {
            Some(preferences) => preferences,
            None => {
                let defaults = PersonalityAnalysisPreferences::defaults(user_id.clone());
                if let Err(error) = self.repository.save_analysis_preferences(&defaults).await {
                    warn!(
                        user_id = %user_id,
                        error = %error,
                        "Could not persist default analysis preferences"
                    );
                } else {
                    debug!(user_id = %user_id, "Created default analysis preferences");
                }
                defaults
            }
        };

        if preferences.is_currently_active(Timestamp::now()) {
            if let Err(error) = self.scheduler.start_scheduling(user_id).await {
                warn!(user_id = %user_id, error = %error, "Could not start analysis scheduling");
            }
        }
        if preferences.frequency.interval_days().is_some() {
            if let Err(error) = self.scheduler.trigger_analysis_check(user_id).await {
                warn!(user_id = %user_id, error = %error, "Automatic analysis check failed");
            }
        }

        Ok(preferences)
    }

    /// Persists preferences and realigns the scheduler with them.
    ///
    /// Returns false when the preferences could not be stored. A
    /// scheduling failure after a successful store still counts as a
    /// success; the cadence catches up on the next change.
    pub async fn save_preferences(&self, preferences: &PersonalityAnalysisPreferences) -> bool {
        if let Err(error) = self.repository.save_analysis_preferences(preferences).await {
            warn!(
                user_id = %preferences.user_id,
                error = %error,
                "Could not save analysis preferences"
            );
            return false;
        }
        if let Err(error) = self
            .scheduler
            .update_scheduling(&preferences.user_id, preferences)
            .await
        {
            warn!(
                user_id = %preferences.user_id,
                error = %error,
                "Could not update scheduling after preference change"
            );
        }
        true
    }

    /// Pauses automatic analysis until the given time.
    pub async fn pause(&self, user_id: &UserId, until: Timestamp) -> bool {
        let Some(current) = self.current_preferences(user_id).await else {
            return false;
        };
        self.save_preferences(&current.paused(until)).await
    }

    /// Clears any pause window and refreshes the analysis if the
    /// preferences are active again.
    pub async fn resume(&self, user_id: &UserId) -> bool {
        let Some(current) = self.current_preferences(user_id).await else {
            return false;
        };
        let updated = current.resumed();
        let saved = self.save_preferences(&updated).await;
        if saved && updated.is_currently_active(Timestamp::now()) {
            self.refresh_after_enable(user_id).await;
        }
        saved
    }

    /// Flips the enabled flag, refreshing the analysis when the flip
    /// turns analysis on.
    pub async fn toggle(&self, user_id: &UserId) -> bool {
        let Some(current) = self.current_preferences(user_id).await else {
            return false;
        };
        let enabled = !current.is_enabled;
        self.apply_enabled(user_id, current, enabled).await
    }

    /// Sets the enabled flag, refreshing the analysis when it turns
    /// analysis on.
    pub async fn set_enabled(&self, user_id: &UserId, enabled: bool) -> bool {
        let Some(current) = self.current_preferences(user_id).await else {
            return false;
        };
        self.apply_enabled(user_id, current, enabled).await
    }

    /// Whether analysis is enabled for the user; users with no stored
    /// preferences count as enabled.
    pub async fn is_analysis_enabled(&self, user_id: &UserId) -> Result<bool, AnalysisError> {
        self.repository.is_analysis_enabled(user_id).await
    }

    async fn apply_enabled(
        &self,
        user_id: &UserId,
        current: PersonalityAnalysisPreferences,
        enabled: bool,
    ) -> bool {
        let updated = current.with_enabled(enabled);
        let active = updated.is_currently_active(Timestamp::now());
        let saved = self.save_preferences(&updated).await;
        if saved && enabled && active {
            self.refresh_after_enable(user_id).await;
        }
        saved
    }

    /// Stored preferences, or unsaved defaults, without any scheduling
    /// side effects.
    async fn current_preferences(
        &self,
        user_id: &UserId,
    ) -> Option<PersonalityAnalysisPreferences> {
        match self.repository.analysis_preferences(user_id).await {
            Ok(Some(preferences)) => Some(preferences),
            Ok(None) => Some(PersonalityAnalysisPreferences::defaults(user_id.clone())),
            Err(error) => {
                warn!(user_id = %user_id, error = %error, "Could not load analysis preferences");
                None
            }
        }
    }

    async fn refresh_after_enable(&self, user_id: &UserId) {
        match self.orchestrator.analyze(user_id).await {
            Ok(profile) => {
                info!(
                    user_id = %user_id,
                    profile_id = %profile.id(),
                    "Analysis refreshed after re-enable"
                );
            }
            Err(AnalysisError::InsufficientData { .. }) => {
                debug!(user_id = %user_id, "Re-enable analysis skipped, user not yet eligible");
            }
            Err(error) => {
                warn!(user_id = %user_id, error = %error, "Re-enable analysis failed");
            }
        }
    }
}
