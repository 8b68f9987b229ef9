//! PersonalityAnalysisOrchestrator - sequences the analysis pipeline.
//!
//! Runs one analysis as: validate eligibility (via aggregation), score
//! traits, attach confidence and metadata, persist the profile. Also
//! owns regeneration, staleness checks, and the read surface consumers
//! use to fetch profiles and eligibility progress.
//!
//! Concurrent `analyze`/`regenerate` calls for the same user are
//! serialized through a per-user lock; distinct users never contend.

use std::collections::HashMap;
use std::sync::Arc;

use tokio::sync::Mutex;
use tracing::{debug, info, warn};

use crate::application::aggregator::HabitDataAggregator;
use crate::application::backoff::PollBackoff;
use crate::domain::analysis::{
    AnalysisEligibility, AnalysisError, AnalysisMetadata, ConfidenceLevel, EligibilityValidator,
    PersonalityProfile, ThresholdRequirement, TraitScorer,
};
use crate::domain::foundation::{Timestamp, UserId};
use crate::ports::PersonalityAnalysisRepository;

/// Data points credited on top of the snapshot total when the
/// completion summary shows at least one habit was evaluated.
pub const EVALUATED_HABITS_BONUS: u32 = 10;

/// Lifecycle of one analysis call.
///
/// `Ineligible` ends the call with an `InsufficientData` error; `Failed`
/// marks an unexpected I/O failure. Every other phase leads to `Done`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnalysisPhase {
    NotStarted,
    Validating,
    Ineligible,
    Aggregating,
    Scoring,
    Persisting,
    Done,
    Failed,
}

impl AnalysisPhase {
    pub fn as_str(&self) -> &'static str {
        match self {
            AnalysisPhase::NotStarted => "not_started",
            AnalysisPhase::Validating => "validating",
            AnalysisPhase::Ineligible => "ineligible",
            AnalysisPhase::Aggregating => "aggregating",
            AnalysisPhase::Scoring => "scoring",
            AnalysisPhase::Persisting => "persisting",
            AnalysisPhase::Done => "done",
            AnalysisPhase::Failed => "failed",
        }
    }
}

impl std::fmt::Display for AnalysisPhase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Sequences aggregation, validation, scoring, and persistence into
/// complete analysis runs.
pub struct PersonalityAnalysisOrchestrator {
    aggregator: HabitDataAggregator,
    repository: Arc<dyn PersonalityAnalysisRepository>,
    user_locks: Mutex<HashMap<UserId, Arc<Mutex<()>>>>,
}

impl PersonalityAnalysisOrchestrator {
    /// Creates a new PersonalityAnalysisOrchestrator.
    pub fn new(
        aggregator: HabitDataAggregator,
        repository: Arc<dyn PersonalityAnalysisRepository>,
    ) -> Self {
        Self {
            aggregator,
            repository,
            user_locks: Mutex::new(HashMap::new()),
        }
    }

    /// Runs a full analysis for a user and persists the new profile.
    ///
    /// Fails with `InsufficientData` when the eligibility gate rejects
    /// the user's current data.
    pub async fn analyze(&self, user_id: &UserId) -> Result<PersonalityProfile, AnalysisError> {
        let lock = self.user_lock(user_id).await;
        let _serialized = lock.lock().await;
        self.run_pipeline(user_id).await
    }

    /// Deletes the latest profile (if any) and runs a fresh analysis.
    pub async fn regenerate(&self, user_id: &UserId) -> Result<PersonalityProfile, AnalysisError> {
        let lock = self.user_lock(user_id).await;
        let _serialized = lock.lock().await;

        if let Some(latest) = self.repository.latest_profile(user_id).await? {
            self.repository.delete_profile(latest.id()).await?;
            debug!(
                user_id = %user_id,
                profile_id = %latest.id(),
                "Deleted latest profile before regeneration"
            );
        }
        self.run_pipeline(user_id).await
    }

    /// Whether a fresh analysis is warranted: no profile yet, or the
    /// latest one is past its validity period.
    pub async fn should_update_analysis(&self, user_id: &UserId) -> Result<bool, AnalysisError> {
        match self.repository.latest_profile(user_id).await? {
            Some(latest) => Ok(latest.is_stale(Timestamp::now())),
            None => Ok(true),
        }
    }

    /// Eligibility verdict over a fresh snapshot.
    pub async fn validate_eligibility(
        &self,
        user_id: &UserId,
    ) -> Result<AnalysisEligibility, AnalysisError> {
        let input = self.aggregator.aggregate(user_id).await?;
        Ok(EligibilityValidator::validate(&input))
    }

    /// All six threshold requirements with current values, for progress
    /// display.
    pub async fn progress_details(
        &self,
        user_id: &UserId,
    ) -> Result<Vec<ThresholdRequirement>, AnalysisError> {
        let input = self.aggregator.aggregate(user_id).await?;
        Ok(EligibilityValidator::requirements(&input))
    }

    /// Estimated days until the user becomes eligible; `None` when
    /// already eligible.
    pub async fn estimated_days_to_eligibility(
        &self,
        user_id: &UserId,
    ) -> Result<Option<u32>, AnalysisError> {
        let eligibility = self.validate_eligibility(user_id).await?;
        Ok(eligibility.estimated_days_to_eligibility)
    }

    /// The latest stored profile, if any.
    pub async fn profile(
        &self,
        user_id: &UserId,
    ) -> Result<Option<PersonalityProfile>, AnalysisError> {
        self.repository.latest_profile(user_id).await
    }

    /// Full profile history, newest first.
    pub async fn history(
        &self,
        user_id: &UserId,
    ) -> Result<Vec<PersonalityProfile>, AnalysisError> {
        self.repository.profile_history(user_id).await
    }

    /// Polls for the latest profile under eventual consistency, backing
    /// off exponentially. Returns `None` once all attempts are used.
    pub async fn await_latest_profile(
        &self,
        user_id: &UserId,
    ) -> Result<Option<PersonalityProfile>, AnalysisError> {
        let mut backoff = PollBackoff::new();
        loop {
            if let Some(profile) = self.repository.latest_profile(user_id).await? {
                return Ok(Some(profile));
            }
            match backoff.next_delay() {
                Some(delay) => {
                    debug!(
                        user_id = %user_id,
                        attempt = backoff.attempt(),
                        delay_ms = delay.as_millis() as u64,
                        "Latest profile not visible yet, backing off"
                    );
                    tokio::time::sleep(delay).await;
                }
                None => return Ok(None),
            }
        }
    }

    async fn user_lock(&self, user_id: &UserId) -> Arc<Mutex<()>> {
        let mut locks = self.user_locks.lock().await;
        locks.entry(user_id.clone()).or_default().clone()
    }

    async fn run_pipeline(&self, user_id: &UserId) -> Result<PersonalityProfile, AnalysisError> {
        match self.run_phases(user_id).await {
            Ok(profile) => Ok(profile),
            Err(error) => Err(self.record_failure(user_id, error)),
        }
    }

    async fn run_phases(&self, user_id: &UserId) -> Result<PersonalityProfile, AnalysisError> {
        let now = Timestamp::now();

        self.transition(user_id, AnalysisPhase::Validating);
        let input = self.aggregator.aggregate_at(user_id, now).await?;
        let eligibility = EligibilityValidator::validate(&input);
        if !eligibility.is_eligible {
            self.transition(user_id, AnalysisPhase::Ineligible);
            return Err(AnalysisError::insufficient_data(
                eligibility.missing_requirements,
            ));
        }

        // The validation snapshot is reused as-is; only the habit-set
        // completion summary is computed separately.
        self.transition(user_id, AnalysisPhase::Aggregating);
        let summary = self.aggregator.completion_summary(now).await?;
        let bonus = if summary.habits_evaluated > 0 {
            EVALUATED_HABITS_BONUS
        } else {
            0
        };

        self.transition(user_id, AnalysisPhase::Scoring);
        let scores = TraitScorer::score(&input);
        let metadata = AnalysisMetadata::new(
            now,
            input.total_data_points + bonus,
            input.analysis_time_range_days,
        );
        let confidence = ConfidenceLevel::from_data_points(metadata.data_points_analyzed);

        self.transition(user_id, AnalysisPhase::Persisting);
        let profile = PersonalityProfile::new(user_id.clone(), scores, confidence, metadata);
        self.repository.save_profile(&profile).await?;

        self.transition(user_id, AnalysisPhase::Done);
        info!(
            user_id = %user_id,
            profile_id = %profile.id(),
            dominant_trait = %profile.dominant_trait(),
            confidence = %profile.confidence(),
            data_points = profile.metadata().data_points_analyzed,
            "Personality analysis complete"
        );
        Ok(profile)
    }

    fn record_failure(&self, user_id: &UserId, error: AnalysisError) -> AnalysisError {
        match &error {
            // Ineligibility already traced its own terminal phase.
            AnalysisError::InsufficientData { .. } => error,
            _ => {
                self.transition(user_id, AnalysisPhase::Failed);
                warn!(user_id = %user_id, error = %error, "Analysis failed");
                error
            }
        }
    }

    fn transition(&self, user_id: &UserId, phase: AnalysisPhase) {
        debug!(user_id = %user_id, phase = %phase, "Analysis phase");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::time::Duration;

    use crate::adapters::catalog::StaticSuggestionCatalog;
    use crate::adapters::memory::{
        InMemoryAnalysisStore, InMemoryCategoryRepository, InMemoryHabitRepository,
        InMemoryLogRepository,
    };
    use crate::domain::analysis::{
        PersonalityAnalysisPreferences, ProfileId, TraitScores, ANALYSIS_VERSION,
    };
    use crate::domain::foundation::{CategoryId, HabitId, PersonalityTrait, SuggestionId};
    use crate::domain::habit::{Category, Habit, HabitKind, HabitLog, HabitSchedule, HabitSuggestion};
    use crate::ports::HabitRepository;

    // ─────────────────────────────────────────────────────────────────────
    // Test fixtures
    // ─────────────────────────────────────────────────────────────────────

    struct Dataset {
        habits: Vec<Habit>,
        logs: Vec<HabitLog>,
        categories: Vec<Category>,
        suggestions: Vec<HabitSuggestion>,
    }

    fn user() -> UserId {
        UserId::new("user-1").unwrap()
    }

    fn daily_habit(name: &str, category_id: CategoryId) -> Habit {
        Habit::new(name, HabitKind::Binary, category_id, HabitSchedule::Daily)
            .with_start_date(Timestamp::now().minus_days(60))
    }

    /// A user that clears all six thresholds: eight active habits (five
    /// suggestion-based, three custom) across three custom categories,
    /// logged daily for the past ten days.
    fn eligible_dataset() -> Dataset {
        let focus = Category::custom("Focus");
        let chess = Category::custom("Chess");
        let garden = Category::custom("Garden");
        let categories = vec![focus.clone(), chess.clone(), garden.clone()];
        let spread = [focus.id, chess.id, garden.id];

        let mut habits = Vec::new();
        let mut suggestions = Vec::new();
        for index in 0..5 {
            let suggestion_id = SuggestionId::new(format!("suggested-{index}")).unwrap();
            let category_id = spread[index % spread.len()];
            suggestions.push(HabitSuggestion::new(
                suggestion_id.clone(),
                format!("Suggested {index}"),
                category_id,
                [
                    (PersonalityTrait::Conscientiousness, 0.8),
                    (PersonalityTrait::Openness, 0.3),
                ]
                .into_iter()
                .collect(),
            ));
            habits.push(
                daily_habit(&format!("Suggested {index}"), category_id)
                    .with_suggestion(suggestion_id),
            );
        }
        for index in 0..3 {
            habits.push(daily_habit(
                &format!("Custom {index}"),
                spread[index % spread.len()],
            ));
        }

        let now = Timestamp::now();
        let mut logs = Vec::new();
        for habit in &habits {
            for days_ago in 0..10 {
                logs.push(HabitLog::new(habit.id, now.minus_days(days_ago)));
            }
        }

        Dataset {
            habits,
            logs,
            categories,
            suggestions,
        }
    }

    /// Three habits, three tracked days, nothing custom.
    fn sparse_dataset() -> Dataset {
        let health = Category::predefined("Health");
        let habits: Vec<Habit> = (0..3)
            .map(|index| daily_habit(&format!("Habit {index}"), health.id))
            .collect();

        let now = Timestamp::now();
        let mut logs = Vec::new();
        for habit in &habits {
            for days_ago in 0..3 {
                logs.push(HabitLog::new(habit.id, now.minus_days(days_ago)));
            }
        }

        Dataset {
            habits,
            logs,
            categories: vec![health],
            suggestions: vec![],
        }
    }

    fn orchestrator_with(
        dataset: Dataset,
    ) -> (PersonalityAnalysisOrchestrator, Arc<InMemoryAnalysisStore>) {
        let store = Arc::new(InMemoryAnalysisStore::new());
        let aggregator = HabitDataAggregator::new(
            Arc::new(InMemoryHabitRepository::with_habits(dataset.habits)),
            Arc::new(InMemoryLogRepository::with_logs(dataset.logs)),
            Arc::new(InMemoryCategoryRepository::with_categories(
                dataset.categories,
            )),
            Arc::new(StaticSuggestionCatalog::from_entries(dataset.suggestions)),
        );
        (
            PersonalityAnalysisOrchestrator::new(aggregator, store.clone()),
            store,
        )
    }

    fn profile_at(user_id: &UserId, analysis_date: Timestamp) -> PersonalityProfile {
        PersonalityProfile::new(
            user_id.clone(),
            TraitScores::neutral(),
            ConfidenceLevel::Low,
            AnalysisMetadata::new(analysis_date, 10, 30),
        )
    }

    // ─────────────────────────────────────────────────────────────────────
    // Mock implementations
    // ─────────────────────────────────────────────────────────────────────

    /// Habit source that records how many fetches overlap in time.
    struct OverlapProbe {
        habits: Vec<Habit>,
        in_flight: AtomicUsize,
        max_overlap: AtomicUsize,
    }

    impl OverlapProbe {
        fn new(habits: Vec<Habit>) -> Self {
            Self {
                habits,
                in_flight: AtomicUsize::new(0),
                max_overlap: AtomicUsize::new(0),
            }
        }
    }

    #[async_trait]
    impl HabitRepository for OverlapProbe {
        async fn fetch_all_habits(&self) -> Result<Vec<Habit>, AnalysisError> {
            let current = self.in_flight.fetch_add(1, Ordering::SeqCst) + 1;
            self.max_overlap.fetch_max(current, Ordering::SeqCst);
            tokio::time::sleep(Duration::from_millis(20)).await;
            self.in_flight.fetch_sub(1, Ordering::SeqCst);
            Ok(self.habits.clone())
        }

        async fn fetch_habit(&self, id: HabitId) -> Result<Option<Habit>, AnalysisError> {
            Ok(self.habits.iter().find(|habit| habit.id == id).cloned())
        }
    }

    /// Store whose profile saves always fail.
    struct FailingSaveStore {
        inner: InMemoryAnalysisStore,
    }

    #[async_trait]
    impl PersonalityAnalysisRepository for FailingSaveStore {
        async fn latest_profile(
            &self,
            user_id: &UserId,
        ) -> Result<Option<PersonalityProfile>, AnalysisError> {
            self.inner.latest_profile(user_id).await
        }

        async fn save_profile(&self, _profile: &PersonalityProfile) -> Result<(), AnalysisError> {
            Err(AnalysisError::repository("disk full"))
        }

        async fn profile_history(
            &self,
            user_id: &UserId,
        ) -> Result<Vec<PersonalityProfile>, AnalysisError> {
            self.inner.profile_history(user_id).await
        }

        async fn delete_profile(&self, profile_id: ProfileId) -> Result<(), AnalysisError> {
            self.inner.delete_profile(profile_id).await
        }

        async fn delete_all_profiles(&self, user_id: &UserId) -> Result<(), AnalysisError> {
            self.inner.delete_all_profiles(user_id).await
        }

        async fn analysis_preferences(
            &self,
            user_id: &UserId,
        ) -> Result<Option<PersonalityAnalysisPreferences>, AnalysisError> {
            self.inner.analysis_preferences(user_id).await
        }

        async fn save_analysis_preferences(
            &self,
            preferences: &PersonalityAnalysisPreferences,
        ) -> Result<(), AnalysisError> {
            self.inner.save_analysis_preferences(preferences).await
        }

        async fn is_analysis_enabled(&self, user_id: &UserId) -> Result<bool, AnalysisError> {
            self.inner.is_analysis_enabled(user_id).await
        }
    }

    // ─────────────────────────────────────────────────────────────────────
    // Tests
    // ─────────────────────────────────────────────────────────────────────

    #[tokio::test]
    async fn analyze_rejects_a_sparse_user_with_the_unmet_requirements() {
        let (orchestrator, store) = orchestrator_with(sparse_dataset());

        let error = orchestrator.analyze(&user()).await.unwrap_err();

        let missing = error.missing_requirements().unwrap();
        assert!(missing.iter().any(|req| req.name == "Active Habits"));
        assert!(missing.iter().any(|req| req.name == "Tracking Days"));
        assert_eq!(store.profile_count().await, 0);
    }

    #[tokio::test]
    async fn analyze_persists_exactly_one_profile_for_an_eligible_user() {
        let (orchestrator, store) = orchestrator_with(eligible_dataset());
        let user_id = user();

        let profile = orchestrator.analyze(&user_id).await.unwrap();

        assert_eq!(store.profile_count().await, 1);
        assert_eq!(profile.user_id(), &user_id);
        assert_eq!(profile.metadata().version, ANALYSIS_VERSION);
        assert_eq!(profile.metadata().time_range_days, 30);
        // Every suggestion pushes conscientiousness hardest, so the
        // dominant trait is fixed for this dataset.
        assert_eq!(
            profile.dominant_trait(),
            PersonalityTrait::Conscientiousness
        );
    }

    #[tokio::test]
    async fn analyze_adds_the_completion_summary_bonus_to_data_points() {
        let (orchestrator, _store) = orchestrator_with(eligible_dataset());

        let profile = orchestrator.analyze(&user()).await.unwrap();

        // 80 window logs + 3 custom habits + 3 custom categories +
        // 8 active habits, plus the evaluated-habits bonus.
        assert_eq!(
            profile.metadata().data_points_analyzed,
            94 + EVALUATED_HABITS_BONUS
        );
        assert_eq!(profile.confidence(), ConfidenceLevel::High);
    }

    #[tokio::test]
    async fn concurrent_analyze_calls_for_one_user_are_serialized() {
        let dataset = eligible_dataset();
        let probe = Arc::new(OverlapProbe::new(dataset.habits.clone()));
        let store = Arc::new(InMemoryAnalysisStore::new());
        let aggregator = HabitDataAggregator::new(
            probe.clone(),
            Arc::new(InMemoryLogRepository::with_logs(dataset.logs)),
            Arc::new(InMemoryCategoryRepository::with_categories(
                dataset.categories,
            )),
            Arc::new(StaticSuggestionCatalog::from_entries(dataset.suggestions)),
        );
        let orchestrator = Arc::new(PersonalityAnalysisOrchestrator::new(
            aggregator,
            store.clone(),
        ));

        let first = tokio::spawn({
            let orchestrator = orchestrator.clone();
            let user_id = user();
            async move { orchestrator.analyze(&user_id).await }
        });
        let second = tokio::spawn({
            let orchestrator = orchestrator.clone();
            let user_id = user();
            async move { orchestrator.analyze(&user_id).await }
        });

        first.await.unwrap().unwrap();
        second.await.unwrap().unwrap();

        assert_eq!(probe.max_overlap.load(Ordering::SeqCst), 1);
        assert_eq!(store.profile_count().await, 2);
    }

    #[tokio::test]
    async fn regenerate_replaces_the_latest_profile_with_a_newer_one() {
        let (orchestrator, store) = orchestrator_with(eligible_dataset());
        let user_id = user();

        let original = orchestrator.analyze(&user_id).await.unwrap();
        let regenerated = orchestrator.regenerate(&user_id).await.unwrap();

        let history = store.profile_history(&user_id).await.unwrap();
        assert_eq!(history.len(), 1);
        assert_eq!(history[0].id(), regenerated.id());
        assert!(regenerated.analysis_date() > original.analysis_date());
    }

    #[tokio::test]
    async fn should_update_analysis_tracks_the_validity_period() {
        let (orchestrator, store) = orchestrator_with(eligible_dataset());
        let user_id = user();
        let now = Timestamp::now();

        // No profile at all.
        assert!(orchestrator.should_update_analysis(&user_id).await.unwrap());

        store
            .save_profile(&profile_at(&user_id, now.minus_days(6)))
            .await
            .unwrap();
        assert!(!orchestrator.should_update_analysis(&user_id).await.unwrap());

        store.clear().await;
        store
            .save_profile(&profile_at(&user_id, now.minus_days(8)))
            .await
            .unwrap();
        assert!(orchestrator.should_update_analysis(&user_id).await.unwrap());
    }

    #[tokio::test]
    async fn eligibility_surface_reports_progress_and_estimates() {
        let (orchestrator, _store) = orchestrator_with(sparse_dataset());
        let user_id = user();

        let eligibility = orchestrator.validate_eligibility(&user_id).await.unwrap();
        let requirements = orchestrator.progress_details(&user_id).await.unwrap();
        let estimate = orchestrator
            .estimated_days_to_eligibility(&user_id)
            .await
            .unwrap();

        assert!(!eligibility.is_eligible);
        assert!((eligibility.overall_progress - 0.5).abs() < f64::EPSILON);
        assert_eq!(requirements.len(), 6);
        assert!(estimate.unwrap() > 0);
    }

    #[tokio::test]
    async fn repository_failure_during_persist_surfaces_unchanged() {
        let dataset = eligible_dataset();
        let aggregator = HabitDataAggregator::new(
            Arc::new(InMemoryHabitRepository::with_habits(dataset.habits)),
            Arc::new(InMemoryLogRepository::with_logs(dataset.logs)),
            Arc::new(InMemoryCategoryRepository::with_categories(
                dataset.categories,
            )),
            Arc::new(StaticSuggestionCatalog::from_entries(dataset.suggestions)),
        );
        let orchestrator = PersonalityAnalysisOrchestrator::new(
            aggregator,
            Arc::new(FailingSaveStore {
                inner: InMemoryAnalysisStore::new(),
            }),
        );

        let error = orchestrator.analyze(&user()).await.unwrap_err();

        assert!(matches!(error, AnalysisError::RepositoryFailure(_)));
    }

    #[tokio::test]
    async fn await_latest_profile_returns_a_present_profile_immediately() {
        let (orchestrator, store) = orchestrator_with(eligible_dataset());
        let user_id = user();

        store
            .save_profile(&profile_at(&user_id, Timestamp::now()))
            .await
            .unwrap();

        let found = orchestrator.await_latest_profile(&user_id).await.unwrap();
        assert!(found.is_some());
    }

    #[tokio::test(start_paused = true)]
    async fn await_latest_profile_gives_up_after_all_attempts() {
        let (orchestrator, _store) = orchestrator_with(sparse_dataset());

        let found = orchestrator.await_latest_profile(&user()).await.unwrap();

        assert!(found.is_none());
    }

    #[test]
    fn analysis_phases_format_as_snake_case() {
        assert_eq!(AnalysisPhase::NotStarted.to_string(), "not_started");
        assert_eq!(AnalysisPhase::Done.to_string(), "done");
        assert_eq!(AnalysisPhase::Failed.to_string(), "failed");
    }
}
