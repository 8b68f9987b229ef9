//! Analysis input snapshot.

use crate::domain::habit::{Category, Habit, HabitSuggestion};

/// Length of the analysis window in days.
pub const ANALYSIS_WINDOW_DAYS: u32 = 30;

/// Immutable snapshot of a user's habit data for one analysis run.
///
/// Built fresh by the aggregator for every call and never persisted.
#[derive(Debug, Clone, PartialEq)]
pub struct HabitAnalysisInput {
    /// Habits with `is_active == true`.
    pub active_habits: Vec<Habit>,
    /// Schedule-aware completion rates, parallel to `active_habits`.
    pub completion_rates: Vec<f64>,
    /// Active habits not adopted from the suggestion catalog.
    pub custom_habits: Vec<Habit>,
    /// User-created categories.
    pub custom_categories: Vec<Category>,
    /// Categories referenced by at least one active habit.
    pub habit_categories: Vec<Category>,
    /// Catalog entries resolved from the active habits' suggestion ids.
    pub selected_suggestions: Vec<HabitSuggestion>,
    /// Consecutive-day tracking streak.
    pub tracking_days: u32,
    /// Analysis window length; always `ANALYSIS_WINDOW_DAYS`.
    pub analysis_time_range_days: u32,
    /// Window logs + custom habits + custom categories + active habits.
    pub total_data_points: u32,
}

impl HabitAnalysisInput {
    /// Mean completion rate across active habits; 0.0 when there are none.
    pub fn average_completion_rate(&self) -> f64 {
        if self.completion_rates.is_empty() {
            return 0.0;
        }
        self.completion_rates.iter().sum::<f64>() / self.completion_rates.len() as f64
    }

    /// Number of distinct categories spanned by active habits.
    pub fn distinct_category_count(&self) -> usize {
        self.habit_categories.len()
    }

    /// Resolves the catalog entry for a habit, if it has one.
    pub fn suggestion_for(&self, habit: &Habit) -> Option<&HabitSuggestion> {
        let suggestion_id = habit.suggestion_id.as_ref()?;
        self.selected_suggestions
            .iter()
            .find(|suggestion| &suggestion.id == suggestion_id)
    }
}
