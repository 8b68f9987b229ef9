//! CadenceScheduler - automatic re-analysis on the user's cadence.
//!
//! Keeps per-user cadence state (`Idle ⇄ Scheduled → Triggered → Idle`)
//! and a background task per scheduled user that wakes when the next
//! analysis is due. Trigger checks are debounced so rapid re-entry
//! collapses into a single check; reconfiguration supersedes any
//! in-flight task, and a superseded task never writes state back.
//!
//! The debounce stamp is recorded before the triggered work starts.
//! If that work then fails, the retry is absorbed until the window
//! lapses; an accepted trade-off for closing the re-entry race.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use tokio::sync::{Mutex, RwLock};
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

use crate::application::orchestrator::PersonalityAnalysisOrchestrator;
use crate::domain::analysis::{
    AnalysisError, PersonalityAnalysisPreferences, PersonalityProfile,
};
use crate::domain::foundation::{Timestamp, UserId};
use crate::ports::{PersonalityAnalysisRepository, PersonalityAnalysisScheduler};

/// Window within which repeated trigger checks for the same user
/// collapse into one.
pub const DEBOUNCE_WINDOW_SECS: u64 = 120;

/// Cadence lifecycle of one user, surfaced in logs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum CadencePhase {
    Idle,
    Scheduled,
    Triggered,
}

impl CadencePhase {
    fn as_str(&self) -> &'static str {
        match self {
            CadencePhase::Idle => "idle",
            CadencePhase::Scheduled => "scheduled",
            CadencePhase::Triggered => "triggered",
        }
    }
}

/// Scheduler-owned record per user. The epoch identifies the latest
/// reconfiguration; background tasks from older epochs must not write.
#[derive(Debug, Clone, Copy, Default)]
struct CadenceState {
    last_check: Option<Timestamp>,
    next_due: Option<Timestamp>,
    epoch: u64,
}

/// Preference-driven scheduler that runs analyses when they fall due.
#[derive(Clone)]
pub struct CadenceScheduler {
    inner: Arc<SchedulerInner>,
}

struct SchedulerInner {
    repository: Arc<dyn PersonalityAnalysisRepository>,
    orchestrator: Arc<PersonalityAnalysisOrchestrator>,
    state: RwLock<HashMap<UserId, CadenceState>>,
    tasks: Mutex<HashMap<UserId, JoinHandle<()>>>,
    debounce_window: Duration,
}

impl CadenceScheduler {
    /// Creates a scheduler with the standard debounce window.
    pub fn new(
        repository: Arc<dyn PersonalityAnalysisRepository>,
        orchestrator: Arc<PersonalityAnalysisOrchestrator>,
    ) -> Self {
        Self::with_debounce_window(
            repository,
            orchestrator,
            Duration::from_secs(DEBOUNCE_WINDOW_SECS),
        )
    }

    /// Creates a scheduler with an explicit debounce window.
    pub fn with_debounce_window(
        repository: Arc<dyn PersonalityAnalysisRepository>,
        orchestrator: Arc<PersonalityAnalysisOrchestrator>,
        debounce_window: Duration,
    ) -> Self {
        Self {
            inner: Arc::new(SchedulerInner {
                repository,
                orchestrator,
                state: RwLock::new(HashMap::new()),
                tasks: Mutex::new(HashMap::new()),
                debounce_window,
            }),
        }
    }
}

#[async_trait]
impl PersonalityAnalysisScheduler for CadenceScheduler {
    async fn start_scheduling(&self, user_id: &UserId) -> Result<(), AnalysisError> {
        let preferences = self.inner.preferences_or_defaults(user_id).await?;
        if !preferences.is_currently_active(Timestamp::now()) {
            debug!(user_id = %user_id, "Scheduling not started, analysis inactive");
            return Ok(());
        }
        self.inner.reconfigure(user_id, &preferences).await
    }

    async fn update_scheduling(
        &self,
        user_id: &UserId,
        preferences: &PersonalityAnalysisPreferences,
    ) -> Result<(), AnalysisError> {
        self.inner.reconfigure(user_id, preferences).await
    }

    async fn next_scheduled_analysis(&self, user_id: &UserId) -> Option<Timestamp> {
        let state = self.inner.state.read().await;
        state.get(user_id).and_then(|entry| entry.next_due)
    }

    async fn trigger_analysis_check(&self, user_id: &UserId) -> Result<(), AnalysisError> {
        self.inner.check_and_maybe_analyze(user_id).await
    }

    async fn force_manual_analysis(
        &self,
        user_id: &UserId,
    ) -> Result<PersonalityProfile, AnalysisError> {
        info!(user_id = %user_id, "Manual analysis requested");
        self.inner.orchestrator.analyze(user_id).await
    }
}

impl SchedulerInner {
    async fn preferences_or_defaults(
        &self,
        user_id: &UserId,
    ) -> Result<PersonalityAnalysisPreferences, AnalysisError> {
        match self.repository.analysis_preferences(user_id).await? {
            Some(preferences) => Ok(preferences),
            None => Ok(PersonalityAnalysisPreferences::defaults(user_id.clone())),
        }
    }

    /// Applies new preferences to a user's cadence, cancelling and
    /// replacing any task already scheduled for them.
    async fn reconfigure(
        self: &Arc<Self>,
        user_id: &UserId,
        preferences: &PersonalityAnalysisPreferences,
    ) -> Result<(), AnalysisError> {
        {
            let mut tasks = self.tasks.lock().await;
            if let Some(previous) = tasks.remove(user_id) {
                previous.abort();
            }
        }

        let now = Timestamp::now();
        let days = match preferences.frequency.interval_days() {
            Some(days) if preferences.is_currently_active(now) => days,
            _ => {
                let mut state = self.state.write().await;
                let entry = state.entry(user_id.clone()).or_default();
                entry.epoch += 1;
                entry.next_due = None;
                self.transition(user_id, CadencePhase::Idle);
                return Ok(());
            }
        };

        let epoch = {
            let mut state = self.state.write().await;
            let entry = state.entry(user_id.clone()).or_default();
            entry.epoch += 1;
            entry.epoch
        };

        let next_due = self.next_due_after(user_id, now, days, true).await?;
        if !self.store_next_due(user_id, epoch, Some(next_due)).await {
            return Ok(());
        }
        self.transition(user_id, CadencePhase::Scheduled);
        debug!(user_id = %user_id, next_due = %next_due, "Cadence scheduled");

        let task = tokio::spawn(Self::run_cadence(self.clone(), user_id.clone(), epoch));
        let mut tasks = self.tasks.lock().await;
        if let Some(previous) = tasks.insert(user_id.clone(), task) {
            previous.abort();
        }
        Ok(())
    }

    /// Background loop for one user and one epoch: sleep until the next
    /// due time, run a check, reschedule. Exits as soon as the stored
    /// epoch moves past its own.
    async fn run_cadence(inner: Arc<Self>, user_id: UserId, epoch: u64) {
        loop {
            let next_due = {
                let state = inner.state.read().await;
                match state.get(&user_id) {
                    Some(entry) if entry.epoch == epoch => entry.next_due,
                    _ => return,
                }
            };
            let Some(next_due) = next_due else { return };

            let now = Timestamp::now();
            if next_due.is_after(&now) {
                let wait = next_due.duration_since(&now).to_std().unwrap_or_default();
                tokio::time::sleep(wait).await;
            }

            if let Err(error) = inner.check_and_maybe_analyze(&user_id).await {
                warn!(user_id = %user_id, error = %error, "Scheduled analysis check failed");
            }

            if !inner.advance_schedule(&user_id, epoch).await {
                return;
            }
        }
    }

    /// Decides whether an analysis is due for the user and runs it if
    /// so. Repeated calls inside the debounce window are absorbed.
    async fn check_and_maybe_analyze(&self, user_id: &UserId) -> Result<(), AnalysisError> {
        let now = Timestamp::now();

        // Check and record the stamp in one critical section so a
        // second caller sees it before this check's awaited work runs.
        {
            let mut state = self.state.write().await;
            let entry = state.entry(user_id.clone()).or_default();
            if let Some(last_check) = entry.last_check {
                let elapsed = now.duration_since(&last_check).to_std().unwrap_or_default();
                if elapsed < self.debounce_window {
                    debug!(user_id = %user_id, "Trigger check debounced");
                    return Ok(());
                }
            }
            entry.last_check = Some(now);
        }

        let preferences = self.preferences_or_defaults(user_id).await?;
        let Some(days) = preferences.frequency.interval_days() else {
            debug!(user_id = %user_id, "Manual frequency, trigger check is a no-op");
            return Ok(());
        };
        if !preferences.is_currently_active(now) {
            debug!(user_id = %user_id, "Analysis disabled or paused, trigger check skipped");
            return Ok(());
        }

        let due = match self.repository.latest_profile(user_id).await? {
            Some(profile) => now.duration_since(&profile.analysis_date()).num_days() >= days,
            None => true,
        };
        if !due {
            debug!(user_id = %user_id, "Analysis not yet due");
            return Ok(());
        }

        self.transition(user_id, CadencePhase::Triggered);
        let outcome = self.orchestrator.analyze(user_id).await;
        self.transition(user_id, CadencePhase::Idle);
        match outcome {
            Ok(profile) => {
                info!(
                    user_id = %user_id,
                    profile_id = %profile.id(),
                    "Cadence check produced a new profile"
                );
                Ok(())
            }
            Err(AnalysisError::InsufficientData { .. }) => {
                debug!(user_id = %user_id, "Cadence check skipped, user not yet eligible");
                Ok(())
            }
            Err(error) => Err(error),
        }
    }

    /// Recomputes the next due time after a cadence wake. Returns false
    /// when this epoch has been superseded or the cadence lapsed.
    async fn advance_schedule(&self, user_id: &UserId, epoch: u64) -> bool {
        let preferences = match self.preferences_or_defaults(user_id).await {
            Ok(preferences) => preferences,
            Err(error) => {
                warn!(user_id = %user_id, error = %error, "Could not reload preferences, cadence stops");
                return false;
            }
        };

        let now = Timestamp::now();
        let next_due = match preferences.frequency.interval_days() {
            Some(days) if preferences.is_currently_active(now) => {
                match self.next_due_after(user_id, now, days, false).await {
                    Ok(next_due) => Some(next_due),
                    Err(error) => {
                        warn!(user_id = %user_id, error = %error, "Could not compute next due time, cadence stops");
                        return false;
                    }
                }
            }
            _ => None,
        };

        if !self.store_next_due(user_id, epoch, next_due).await {
            return false;
        }
        match next_due {
            Some(_) => self.transition(user_id, CadencePhase::Scheduled),
            None => self.transition(user_id, CadencePhase::Idle),
        }
        next_due.is_some()
    }

    /// Next due time anchored on the latest profile's analysis date.
    /// With no anchor (or an overdue one), `immediate_when_overdue`
    /// picks between "due right now" and "one interval from now".
    async fn next_due_after(
        &self,
        user_id: &UserId,
        now: Timestamp,
        days: i64,
        immediate_when_overdue: bool,
    ) -> Result<Timestamp, AnalysisError> {
        let anchored = self
            .repository
            .latest_profile(user_id)
            .await?
            .map(|profile| profile.analysis_date().plus_days(days));
        Ok(match anchored {
            Some(due) if due.is_after(&now) => due,
            _ if immediate_when_overdue => now,
            _ => now.plus_days(days),
        })
    }

    /// Writes the next due time only when the epoch is still current.
    async fn store_next_due(
        &self,
        user_id: &UserId,
        epoch: u64,
        next_due: Option<Timestamp>,
    ) -> bool {
        let mut state = self.state.write().await;
        match state.get_mut(user_id) {
            Some(entry) if entry.epoch == epoch => {
                entry.next_due = next_due;
                true
            }
            _ => false,
        }
    }

    fn transition(&self, user_id: &UserId, phase: CadencePhase) {
        debug!(user_id = %user_id, phase = phase.as_str(), "Cadence phase");
    }
}
