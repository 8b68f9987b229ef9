//! File-Backed Analysis Store Adapter
//!
//! Persists profiles and preferences as YAML under a root directory:
//! one file per profile keyed by `(user, analysis date)`, plus a single
//! shared `preferences.yaml` blob holding every user's preferences.
//!
//! Older installs stored preferences as one file per user under
//! `legacy-preferences/`. A versioned migration folds those into the
//! shared blob exactly once at open time, off the hot read path.

use async_trait::async_trait;
use std::collections::HashMap;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tokio::fs;
use tokio::sync::Mutex;
use tracing::{debug, info, warn};

use crate::domain::analysis::{
    AnalysisError, PersonalityAnalysisPreferences, PersonalityProfile, ProfileId,
};
use crate::domain::foundation::UserId;
use crate::ports::PersonalityAnalysisRepository;

use serde::{Deserialize, Serialize};

/// Identifier of the legacy-to-shared preferences migration. Recorded
/// in `migrations.yaml` once it has run.
const SHARED_PREFERENCES_MIGRATION: &str = "2024-06-shared-preferences";

const PROFILES_DIR: &str = "profiles";
const PREFERENCES_FILE: &str = "preferences.yaml";
const LEGACY_PREFERENCES_DIR: &str = "legacy-preferences";
const MIGRATIONS_FILE: &str = "migrations.yaml";

#[derive(Debug, Default, Serialize, Deserialize)]
struct MigrationState {
    completed: Vec<String>,
}

/// YAML file store for profiles and preferences.
pub struct FileAnalysisStore {
    root: PathBuf,
    // Preference writes are read-modify-write over one shared file.
    preferences_lock: Mutex<()>,
}

impl FileAnalysisStore {
    /// Opens a store rooted at `root`, creating directories and running
    /// any pending migrations.
    pub async fn open(root: impl Into<PathBuf>) -> Result<Self, AnalysisError> {
        let store = Self {
            root: root.into(),
            preferences_lock: Mutex::new(()),
        };
        fs::create_dir_all(store.root.join(PROFILES_DIR)).await?;
        store.run_pending_migrations().await?;
        Ok(store)
    }

    /// Folds legacy per-user preference files into the shared blob.
    ///
    /// Runs at most once per store root; a re-run after a lost marker
    /// leaves existing blob entries untouched.
    async fn run_pending_migrations(&self) -> Result<(), AnalysisError> {
        let mut state = self.read_migration_state().await?;
        if state.completed.iter().any(|id| id == SHARED_PREFERENCES_MIGRATION) {
            debug!(migration = SHARED_PREFERENCES_MIGRATION, "Migration already applied");
            return Ok(());
        }

        let migrated = self.migrate_legacy_preferences().await?;
        if migrated > 0 {
            info!(
                migration = SHARED_PREFERENCES_MIGRATION,
                migrated, "Migrated legacy per-user preferences into shared blob"
            );
        }

        state.completed.push(SHARED_PREFERENCES_MIGRATION.to_string());
        self.write_migration_state(&state).await
    }

    async fn migrate_legacy_preferences(&self) -> Result<usize, AnalysisError> {
        let legacy_dir = self.root.join(LEGACY_PREFERENCES_DIR);
        let mut entries = match fs::read_dir(&legacy_dir).await {
            Ok(entries) => entries,
            Err(err) if err.kind() == ErrorKind::NotFound => return Ok(0),
            Err(err) => return Err(err.into()),
        };

        let mut blob = self.read_preferences_blob().await?;
        let mut migrated = 0usize;

        while let Some(entry) = entries.next_entry().await? {
            let path = entry.path();
            if path.extension().and_then(|ext| ext.to_str()) != Some("yaml") {
                continue;
            }
            let contents = fs::read_to_string(&path).await?;
            let preferences: PersonalityAnalysisPreferences = match serde_yaml::from_str(&contents)
            {
                Ok(preferences) => preferences,
                Err(err) => {
                    warn!(path = %path.display(), error = %err, "Skipping unreadable legacy preferences file");
                    continue;
                }
            };
            // Never clobber preferences already in the shared blob.
            if blob.contains_key(&preferences.user_id) {
                continue;
            }
            blob.insert(preferences.user_id.clone(), preferences);
            migrated += 1;
        }

        if migrated > 0 {
            self.write_preferences_blob(&blob).await?;
        }
        Ok(migrated)
    }

    async fn read_migration_state(&self) -> Result<MigrationState, AnalysisError> {
        match fs::read_to_string(self.root.join(MIGRATIONS_FILE)).await {
            Ok(contents) => serde_yaml::from_str(&contents).map_err(AnalysisError::repository),
            Err(err) if err.kind() == ErrorKind::NotFound => Ok(MigrationState::default()),
            Err(err) => Err(err.into()),
        }
    }

    async fn write_migration_state(&self, state: &MigrationState) -> Result<(), AnalysisError> {
        let contents = serde_yaml::to_string(state).map_err(AnalysisError::repository)?;
        fs::write(self.root.join(MIGRATIONS_FILE), contents).await?;
        Ok(())
    }

    async fn read_preferences_blob(
        &self,
    ) -> Result<HashMap<UserId, PersonalityAnalysisPreferences>, AnalysisError> {
        match fs::read_to_string(self.root.join(PREFERENCES_FILE)).await {
            Ok(contents) => serde_yaml::from_str(&contents).map_err(AnalysisError::repository),
            Err(err) if err.kind() == ErrorKind::NotFound => Ok(HashMap::new()),
            Err(err) => Err(err.into()),
        }
    }

    async fn write_preferences_blob(
        &self,
        blob: &HashMap<UserId, PersonalityAnalysisPreferences>,
    ) -> Result<(), AnalysisError> {
        let contents = serde_yaml::to_string(blob).map_err(AnalysisError::encoding)?;
        fs::write(self.root.join(PREFERENCES_FILE), contents).await?;
        Ok(())
    }

    fn user_profile_dir(&self, user_id: &UserId) -> PathBuf {
        self.root.join(PROFILES_DIR).join(user_id.as_str())
    }

    fn profile_file_name(profile: &PersonalityProfile) -> String {
        format!(
            "{}.yaml",
            profile
                .analysis_date()
                .as_datetime()
                .format("%Y%m%dT%H%M%S%fZ")
        )
    }

    async fn read_profiles_in(dir: &Path) -> Result<Vec<PersonalityProfile>, AnalysisError> {
        let mut entries = match fs::read_dir(dir).await {
            Ok(entries) => entries,
            Err(err) if err.kind() == ErrorKind::NotFound => return Ok(Vec::new()),
            Err(err) => return Err(err.into()),
        };

        let mut profiles = Vec::new();
        while let Some(entry) = entries.next_entry().await? {
            let path = entry.path();
            if path.extension().and_then(|ext| ext.to_str()) != Some("yaml") {
                continue;
            }
            let contents = fs::read_to_string(&path).await?;
            let profile =
                serde_yaml::from_str(&contents).map_err(AnalysisError::repository)?;
            profiles.push(profile);
        }
        Ok(profiles)
    }

    async fn user_dirs(&self) -> Result<Vec<PathBuf>, AnalysisError> {
        let mut entries = match fs::read_dir(self.root.join(PROFILES_DIR)).await {
            Ok(entries) => entries,
            Err(err) if err.kind() == ErrorKind::NotFound => return Ok(Vec::new()),
            Err(err) => return Err(err.into()),
        };

        let mut dirs = Vec::new();
        while let Some(entry) = entries.next_entry().await? {
            if entry.file_type().await?.is_dir() {
                dirs.push(entry.path());
            }
        }
        Ok(dirs)
    }
}

#[async_trait]
impl PersonalityAnalysisRepository for FileAnalysisStore {
    async fn latest_profile(
        &self,
        user_id: &UserId,
    ) -> Result<Option<PersonalityProfile>, AnalysisError> {
        let profiles = Self::read_profiles_in(&self.user_profile_dir(user_id)).await?;
        Ok(profiles
            .into_iter()
            .max_by_key(|profile| profile.analysis_date()))
    }

    async fn save_profile(&self, profile: &PersonalityProfile) -> Result<(), AnalysisError> {
        let dir = self.user_profile_dir(profile.user_id());
        fs::create_dir_all(&dir).await?;
        let contents = serde_yaml::to_string(profile).map_err(AnalysisError::repository)?;
        fs::write(dir.join(Self::profile_file_name(profile)), contents).await?;
        Ok(())
    }

    async fn profile_history(
        &self,
        user_id: &UserId,
    ) -> Result<Vec<PersonalityProfile>, AnalysisError> {
        let mut profiles = Self::read_profiles_in(&self.user_profile_dir(user_id)).await?;
        profiles.sort_by(|a, b| b.analysis_date().cmp(&a.analysis_date()));
        Ok(profiles)
    }

    async fn delete_profile(&self, profile_id: ProfileId) -> Result<(), AnalysisError> {
        for dir in self.user_dirs().await? {
            let mut entries = fs::read_dir(&dir).await?;
            while let Some(entry) = entries.next_entry().await? {
                let path = entry.path();
                if path.extension().and_then(|ext| ext.to_str()) != Some("yaml") {
                    continue;
                }
                let contents = fs::read_to_string(&path).await?;
                let profile: PersonalityProfile =
                    serde_yaml::from_str(&contents).map_err(AnalysisError::repository)?;
                if profile.id() == profile_id {
                    fs::remove_file(&path).await?;
                    return Ok(());
                }
            }
        }
        Ok(())
    }

    async fn delete_all_profiles(&self, user_id: &UserId) -> Result<(), AnalysisError> {
        match fs::remove_dir_all(self.user_profile_dir(user_id)).await {
            Ok(()) => Ok(()),
            Err(err) if err.kind() == ErrorKind::NotFound => Ok(()),
            Err(err) => Err(err.into()),
        }
    }

    async fn analysis_preferences(
        &self,
        user_id: &UserId,
    ) -> Result<Option<PersonalityAnalysisPreferences>, AnalysisError> {
        let blob = self.read_preferences_blob().await?;
        Ok(blob.get(user_id).cloned())
    }

    async fn save_analysis_preferences(
        &self,
        preferences: &PersonalityAnalysisPreferences,
    ) -> Result<(), AnalysisError> {
        let _guard = self.preferences_lock.lock().await;
        let mut blob = self.read_preferences_blob().await?;
        blob.insert(preferences.user_id.clone(), preferences.clone());
        self.write_preferences_blob(&blob).await
    }

    async fn is_analysis_enabled(&self, user_id: &UserId) -> Result<bool, AnalysisError> {
        let blob = self.read_preferences_blob().await?;
        Ok(blob
            .get(user_id)
            .map(|preferences| preferences.is_enabled)
            .unwrap_or(true))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::analysis::{
        AnalysisFrequency, AnalysisMetadata, ConfidenceLevel, TraitScores,
    };
    use crate::domain::foundation::Timestamp;
    use tempfile::tempdir;

    fn user() -> UserId {
        UserId::new("user-1").unwrap()
    }

    fn profile_at(user_id: &UserId, analysis_date: Timestamp) -> PersonalityProfile {
        PersonalityProfile::new(
            user_id.clone(),
            TraitScores::neutral(),
            ConfidenceLevel::Medium,
            AnalysisMetadata::new(analysis_date, 42, 30),
        )
    }

    #[tokio::test]
    async fn test_profile_save_and_load_round_trip() {
        let dir = tempdir().unwrap();
        let store = FileAnalysisStore::open(dir.path()).await.unwrap();
        let user_id = user();

        let saved = profile_at(&user_id, Timestamp::now());
        store.save_profile(&saved).await.unwrap();

        let loaded = store.latest_profile(&user_id).await.unwrap().unwrap();

        assert_eq!(loaded.id(), saved.id());
        assert_eq!(loaded.metadata().data_points_analyzed, 42);
    }

    #[tokio::test]
    async fn test_latest_profile_is_max_analysis_date() {
        let dir = tempdir().unwrap();
        let store = FileAnalysisStore::open(dir.path()).await.unwrap();
        let user_id = user();
        let now = Timestamp::now();

        store
            .save_profile(&profile_at(&user_id, now.minus_days(9)))
            .await
            .unwrap();
        let newest = profile_at(&user_id, now);
        store.save_profile(&newest).await.unwrap();

        let latest = store.latest_profile(&user_id).await.unwrap().unwrap();
        let history = store.profile_history(&user_id).await.unwrap();

        assert_eq!(latest.id(), newest.id());
        assert_eq!(history.len(), 2);
        assert!(history[0].analysis_date() > history[1].analysis_date());
    }

    #[tokio::test]
    async fn test_delete_profile_removes_one_file() {
        let dir = tempdir().unwrap();
        let store = FileAnalysisStore::open(dir.path()).await.unwrap();
        let user_id = user();
        let now = Timestamp::now();

        let doomed = profile_at(&user_id, now);
        store.save_profile(&doomed).await.unwrap();
        store
            .save_profile(&profile_at(&user_id, now.minus_days(1)))
            .await
            .unwrap();

        store.delete_profile(doomed.id()).await.unwrap();

        let history = store.profile_history(&user_id).await.unwrap();
        assert_eq!(history.len(), 1);
        assert_ne!(history[0].id(), doomed.id());
    }

    #[tokio::test]
    async fn test_missing_user_has_no_profiles() {
        let dir = tempdir().unwrap();
        let store = FileAnalysisStore::open(dir.path()).await.unwrap();

        assert!(store.latest_profile(&user()).await.unwrap().is_none());
        assert!(store.profile_history(&user()).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_preferences_round_trip_through_shared_blob() {
        let dir = tempdir().unwrap();
        let store = FileAnalysisStore::open(dir.path()).await.unwrap();
        let user_id = user();

        let preferences = PersonalityAnalysisPreferences::defaults(user_id.clone())
            .with_frequency(AnalysisFrequency::Daily);
        store.save_analysis_preferences(&preferences).await.unwrap();

        let loaded = store.analysis_preferences(&user_id).await.unwrap().unwrap();
        assert_eq!(loaded, preferences);
        assert!(store.is_analysis_enabled(&user_id).await.unwrap());
    }

    #[tokio::test]
    async fn test_legacy_preferences_migrate_once_into_the_blob() {
        let dir = tempdir().unwrap();
        let legacy_dir = dir.path().join(LEGACY_PREFERENCES_DIR);
        std::fs::create_dir_all(&legacy_dir).unwrap();

        let legacy_user = UserId::new("legacy-user").unwrap();
        let legacy = PersonalityAnalysisPreferences::defaults(legacy_user.clone())
            .with_frequency(AnalysisFrequency::Monthly);
        std::fs::write(
            legacy_dir.join("legacy-user.yaml"),
            serde_yaml::to_string(&legacy).unwrap(),
        )
        .unwrap();

        let store = FileAnalysisStore::open(dir.path()).await.unwrap();
        let migrated = store
            .analysis_preferences(&legacy_user)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(migrated.frequency, AnalysisFrequency::Monthly);

        // Re-opening must not run the migration again.
        drop(store);
        let reopened = FileAnalysisStore::open(dir.path()).await.unwrap();
        let still_there = reopened
            .analysis_preferences(&legacy_user)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(still_there.frequency, AnalysisFrequency::Monthly);
    }

    #[tokio::test]
    async fn test_migration_never_overwrites_existing_blob_entries() {
        let dir = tempdir().unwrap();
        let user_id = user();

        // Current blob already knows the user as Daily.
        let store = FileAnalysisStore::open(dir.path()).await.unwrap();
        let current = PersonalityAnalysisPreferences::defaults(user_id.clone())
            .with_frequency(AnalysisFrequency::Daily);
        store.save_analysis_preferences(&current).await.unwrap();
        drop(store);

        // A stale legacy file and a lost migration marker must not
        // resurrect the old value.
        let legacy_dir = dir.path().join(LEGACY_PREFERENCES_DIR);
        std::fs::create_dir_all(&legacy_dir).unwrap();
        let stale = PersonalityAnalysisPreferences::defaults(user_id.clone())
            .with_frequency(AnalysisFrequency::Monthly);
        std::fs::write(
            legacy_dir.join("user-1.yaml"),
            serde_yaml::to_string(&stale).unwrap(),
        )
        .unwrap();
        std::fs::remove_file(dir.path().join(MIGRATIONS_FILE)).unwrap();

        let reopened = FileAnalysisStore::open(dir.path()).await.unwrap();
        let kept = reopened
            .analysis_preferences(&user_id)
            .await
            .unwrap()
            .unwrap();

        assert_eq!(kept.frequency, AnalysisFrequency::Daily);
    }

    #[tokio::test]
    async fn test_unreadable_legacy_files_are_skipped() {
        let dir = tempdir().unwrap();
        let legacy_dir = dir.path().join(LEGACY_PREFERENCES_DIR);
        std::fs::create_dir_all(&legacy_dir).unwrap();
        std::fs::write(legacy_dir.join("broken.yaml"), "{ not: [valid").unwrap();

        let store = FileAnalysisStore::open(dir.path()).await;

        assert!(store.is_ok());
    }
}
