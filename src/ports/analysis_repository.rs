//! PersonalityAnalysisRepository port for profile and preference persistence

use async_trait::async_trait;

use crate::domain::{
    analysis::{AnalysisError, PersonalityAnalysisPreferences, PersonalityProfile, ProfileId},
    foundation::UserId,
};

/// Persistence for personality profiles and analysis preferences.
///
/// Profiles are append-only history keyed by user and analysis date;
/// preferences are one record per user.
#[async_trait]
pub trait PersonalityAnalysisRepository: Send + Sync {
    /// Fetch the most recent profile for a user, if any.
    async fn latest_profile(
        &self,
        user_id: &UserId,
    ) -> Result<Option<PersonalityProfile>, AnalysisError>;

    /// Persist a newly generated profile. Existing history is never
    /// overwritten; each analysis appends a new record.
    async fn save_profile(&self, profile: &PersonalityProfile) -> Result<(), AnalysisError>;

    /// Fetch all stored profiles for a user, newest first.
    async fn profile_history(
        &self,
        user_id: &UserId,
    ) -> Result<Vec<PersonalityProfile>, AnalysisError>;

    /// Delete a single profile by id. Deleting an unknown id is a no-op.
    async fn delete_profile(&self, profile_id: ProfileId) -> Result<(), AnalysisError>;

    /// Delete every stored profile for a user.
    async fn delete_all_profiles(&self, user_id: &UserId) -> Result<(), AnalysisError>;

    /// Fetch stored analysis preferences, or `None` when the user has
    /// never saved any.
    async fn analysis_preferences(
        &self,
        user_id: &UserId,
    ) -> Result<Option<PersonalityAnalysisPreferences>, AnalysisError>;

    /// Persist analysis preferences, replacing any prior record for the
    /// same user.
    async fn save_analysis_preferences(
        &self,
        preferences: &PersonalityAnalysisPreferences,
    ) -> Result<(), AnalysisError>;

    /// Whether analysis is enabled for the user. Users with no stored
    /// preferences default to enabled.
    async fn is_analysis_enabled(&self, user_id: &UserId) -> Result<bool, AnalysisError>;
}
