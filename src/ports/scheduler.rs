//! PersonalityAnalysisScheduler port for automatic re-analysis cadence

use async_trait::async_trait;

use crate::domain::{
    analysis::{AnalysisError, PersonalityAnalysisPreferences, PersonalityProfile},
    foundation::{Timestamp, UserId},
};

/// Drives automatic re-analysis according to each user's preferred
/// cadence.
///
/// Cadence checks are best-effort background work: call sites log
/// failures and move on rather than surfacing them to users.
#[async_trait]
pub trait PersonalityAnalysisScheduler: Send + Sync {
    /// Begin cadence checks for a user whose preferences are active.
    /// No-op when analysis is disabled, paused, or manual-only.
    async fn start_scheduling(&self, user_id: &UserId) -> Result<(), AnalysisError>;

    /// Reconfigure cadence after a preference change, replacing any
    /// check already in flight for the user.
    async fn update_scheduling(
        &self,
        user_id: &UserId,
        preferences: &PersonalityAnalysisPreferences,
    ) -> Result<(), AnalysisError>;

    /// When the next automatic analysis is due, or `None` when nothing
    /// is scheduled for the user.
    async fn next_scheduled_analysis(&self, user_id: &UserId) -> Option<Timestamp>;

    /// Run an analysis now if the user's cadence says one is due.
    /// Manual-frequency users are never due.
    async fn trigger_analysis_check(&self, user_id: &UserId) -> Result<(), AnalysisError>;

    /// Run an analysis immediately, bypassing cadence gating. Used for
    /// explicit user requests under the manual frequency.
    async fn force_manual_analysis(
        &self,
        user_id: &UserId,
    ) -> Result<PersonalityProfile, AnalysisError>;
}
