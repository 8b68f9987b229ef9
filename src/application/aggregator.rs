//! HabitDataAggregator - builds the analysis snapshot from raw habit data.
//!
//! Pulls habits, logs, and categories through their ports and condenses
//! them into a `HabitAnalysisInput` for one analysis run. Aggregation is
//! read-only: repository errors propagate unchanged and nothing is
//! persisted.

use std::collections::HashSet;
use std::sync::Arc;

use tracing::debug;

use crate::domain::analysis::{
    AnalysisError, CompletionCalculator, CompletionSummary, HabitAnalysisInput,
    ANALYSIS_WINDOW_DAYS,
};
use crate::domain::foundation::{CategoryId, HabitId, Timestamp, UserId};
use crate::domain::habit::{Category, Habit, HabitLog, HabitSuggestion};
use crate::ports::{CategoryRepository, HabitRepository, HabitSuggestionCatalog, LogRepository};

/// Aggregates raw habit, log, and category data into an immutable
/// analysis snapshot over a fixed 30-day window.
pub struct HabitDataAggregator {
    habits: Arc<dyn HabitRepository>,
    logs: Arc<dyn LogRepository>,
    categories: Arc<dyn CategoryRepository>,
    catalog: Arc<dyn HabitSuggestionCatalog>,
}

impl HabitDataAggregator {
    /// Creates a new HabitDataAggregator.
    pub fn new(
        habits: Arc<dyn HabitRepository>,
        logs: Arc<dyn LogRepository>,
        categories: Arc<dyn CategoryRepository>,
        catalog: Arc<dyn HabitSuggestionCatalog>,
    ) -> Self {
        Self {
            habits,
            logs,
            categories,
            catalog,
        }
    }

    /// Builds a fresh snapshot for the window ending now.
    pub async fn aggregate(&self, user_id: &UserId) -> Result<HabitAnalysisInput, AnalysisError> {
        self.aggregate_at(user_id, Timestamp::now()).await
    }

    /// Builds a fresh snapshot for the window `[now - 30d, now]`.
    pub async fn aggregate_at(
        &self,
        user_id: &UserId,
        now: Timestamp,
    ) -> Result<HabitAnalysisInput, AnalysisError> {
        let window_start = now.minus_days(i64::from(ANALYSIS_WINDOW_DAYS));

        let active_habits = self.fetch_active_habits().await?;
        let habit_ids: Vec<HabitId> = active_habits.iter().map(|habit| habit.id).collect();

        // One batched log fetch for the whole habit set instead of a
        // round trip per habit.
        let (logs_by_habit, all_categories, custom_categories) = futures::try_join!(
            self.logs.logs_for_habits(&habit_ids, window_start, now),
            self.categories.all_categories(),
            self.categories.custom_categories(),
        )?;

        let completion_rates: Vec<f64> = active_habits
            .iter()
            .map(|habit| {
                let habit_logs = logs_by_habit
                    .get(&habit.id)
                    .map(Vec::as_slice)
                    .unwrap_or(&[]);
                CompletionCalculator::habit_completion_rate(habit, habit_logs, window_start, now)
            })
            .collect();

        let custom_habits: Vec<Habit> = active_habits
            .iter()
            .filter(|habit| habit.is_custom())
            .cloned()
            .collect();

        let referenced_categories: HashSet<CategoryId> =
            active_habits.iter().map(|habit| habit.category_id).collect();
        let habit_categories: Vec<Category> = all_categories
            .into_iter()
            .filter(|category| referenced_categories.contains(&category.id))
            .collect();

        let selected_suggestions = self.resolve_suggestions(&active_habits).await;

        let window_logs: Vec<HabitLog> = logs_by_habit.values().flatten().cloned().collect();
        let tracking_days = CompletionCalculator::tracking_streak(&window_logs);

        let total_data_points = window_logs.len() as u32
            + custom_habits.len() as u32
            + custom_categories.len() as u32
            + active_habits.len() as u32;

        debug!(
            user_id = %user_id,
            active_habits = active_habits.len(),
            window_logs = window_logs.len(),
            tracking_days,
            total_data_points,
            "Aggregated analysis snapshot"
        );

        Ok(HabitAnalysisInput {
            active_habits,
            completion_rates,
            custom_habits,
            custom_categories,
            habit_categories,
            selected_suggestions,
            tracking_days,
            analysis_time_range_days: ANALYSIS_WINDOW_DAYS,
            total_data_points,
        })
    }

    /// Schedule-aware completion totals for the active habit set over
    /// the window `[now - 30d, now]`.
    pub async fn completion_summary(
        &self,
        now: Timestamp,
    ) -> Result<CompletionSummary, AnalysisError> {
        let window_start = now.minus_days(i64::from(ANALYSIS_WINDOW_DAYS));

        let active_habits = self.fetch_active_habits().await?;
        let habit_ids: Vec<HabitId> = active_habits.iter().map(|habit| habit.id).collect();
        let logs_by_habit = self
            .logs
            .logs_for_habits(&habit_ids, window_start, now)
            .await?;

        Ok(CompletionCalculator::summary(
            &active_habits,
            &logs_by_habit,
            window_start,
            now,
        ))
    }

    async fn fetch_active_habits(&self) -> Result<Vec<Habit>, AnalysisError> {
        let all_habits = self.habits.fetch_all_habits().await?;
        Ok(all_habits
            .into_iter()
            .filter(|habit| habit.is_active)
            .collect())
    }

    /// Resolves catalog entries for every suggestion-based active habit.
    /// Unknown suggestion ids are skipped.
    async fn resolve_suggestions(&self, active_habits: &[Habit]) -> Vec<HabitSuggestion> {
        let mut selected = Vec::new();
        let mut seen = HashSet::new();
        for habit in active_habits {
            let Some(suggestion_id) = &habit.suggestion_id else {
                continue;
            };
            if !seen.insert(suggestion_id.clone()) {
                continue;
            }
            match self.catalog.suggestion(suggestion_id).await {
                Some(suggestion) => selected.push(suggestion),
                None => debug!(
                    suggestion_id = %suggestion_id,
                    "Suggestion id not in catalog, skipping"
                ),
            }
        }
        selected
    }
}
