//! In-Memory Analysis Store Adapter
//!
//! Holds personality profiles and analysis preferences in memory.
//! Useful for testing and development.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::domain::analysis::{
    AnalysisError, PersonalityAnalysisPreferences, PersonalityProfile, ProfileId,
};
use crate::domain::foundation::UserId;
use crate::ports::PersonalityAnalysisRepository;

/// In-memory profile and preference store.
///
/// Profiles are appended in save order; the latest profile is the one
/// with the greatest analysis date.
#[derive(Debug, Clone)]
pub struct InMemoryAnalysisStore {
    profiles: Arc<RwLock<Vec<PersonalityProfile>>>,
    preferences: Arc<RwLock<HashMap<UserId, PersonalityAnalysisPreferences>>>,
}

impl InMemoryAnalysisStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self {
            profiles: Arc::new(RwLock::new(Vec::new())),
            preferences: Arc::new(RwLock::new(HashMap::new())),
        }
    }

    /// Number of stored profiles across all users (useful for tests).
    pub async fn profile_count(&self) -> usize {
        self.profiles.read().await.len()
    }

    /// Clear all stored data (useful for tests).
    pub async fn clear(&self) {
        self.profiles.write().await.clear();
        self.preferences.write().await.clear();
    }
}

impl Default for InMemoryAnalysisStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl PersonalityAnalysisRepository for InMemoryAnalysisStore {
    async fn latest_profile(
        &self,
        user_id: &UserId,
    ) -> Result<Option<PersonalityProfile>, AnalysisError> {
        let profiles = self.profiles.read().await;
        Ok(profiles
            .iter()
            .filter(|profile| profile.user_id() == user_id)
            .max_by_key(|profile| profile.analysis_date())
            .cloned())
    }

    async fn save_profile(&self, profile: &PersonalityProfile) -> Result<(), AnalysisError> {
        self.profiles.write().await.push(profile.clone());
        Ok(())
    }

    async fn profile_history(
        &self,
        user_id: &UserId,
    ) -> Result<Vec<PersonalityProfile>, AnalysisError> {
        let profiles = self.profiles.read().await;
        let mut history: Vec<PersonalityProfile> = profiles
            .iter()
            .filter(|profile| profile.user_id() == user_id)
            .cloned()
            .collect();
        history.sort_by(|a, b| b.analysis_date().cmp(&a.analysis_date()));
        Ok(history)
    }

    async fn delete_profile(&self, profile_id: ProfileId) -> Result<(), AnalysisError> {
        let mut profiles = self.profiles.write().await;
        profiles.retain(|profile| profile.id() != profile_id);
        Ok(())
    }

    async fn delete_all_profiles(&self, user_id: &UserId) -> Result<(), AnalysisError> {
        let mut profiles = self.profiles.write().await;
        profiles.retain(|profile| profile.user_id() != user_id);
        Ok(())
    }

    async fn analysis_preferences(
        &self,
        user_id: &UserId,
    ) -> Result<Option<PersonalityAnalysisPreferences>, AnalysisError> {
        Ok(self.preferences.read().await.get(user_id).cloned())
    }

    async fn save_analysis_preferences(
        &self,
        preferences: &PersonalityAnalysisPreferences,
    ) -> Result<(), AnalysisError> {
        self.preferences
            .write()
            .await
            .insert(preferences.user_id.clone(), preferences.clone());
        Ok(())
    }

    async fn is_analysis_enabled(&self, user_id: &UserId) -> Result<bool, AnalysisError> {
        let preferences = self.preferences.read().await;
        Ok(preferences
            .get(user_id)
            .map(|stored| stored.is_enabled)
            .unwrap_or(true))
    }
}
