//! Habit entity and schedule types.

use serde::{Deserialize, Serialize};

use crate::domain::foundation::{CategoryId, HabitId, SuggestionId, Timestamp, WeekdaySet};

/// Daily target assumed for numeric habits that never set one.
pub const DEFAULT_DAILY_TARGET: f64 = 1.0;

/// How a habit's completion is recorded.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HabitKind {
    /// Done or not done on a given day.
    Binary,
    /// A measured amount compared against a daily target.
    Numeric,
}

/// When a habit expects an entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HabitSchedule {
    /// Every day.
    Daily,
    /// Only on the given weekdays.
    DaysOfWeek(WeekdaySet),
    /// A flexible target of n completions per week; any day counts.
    TimesPerWeek(u8),
}

/// A tracked habit, consumed read-only by the analysis engine.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Habit {
    pub id: HabitId,
    pub name: String,
    pub kind: HabitKind,
    pub category_id: CategoryId,
    pub schedule: HabitSchedule,
    /// Set when the habit was adopted from the suggestion catalog.
    pub suggestion_id: Option<SuggestionId>,
    pub daily_target: Option<f64>,
    pub is_active: bool,
    pub start_date: Timestamp,
    pub end_date: Option<Timestamp>,
}

impl Habit {
    /// Creates an active habit starting now with no suggestion link.
    pub fn new(
        name: impl Into<String>,
        kind: HabitKind,
        category_id: CategoryId,
        schedule: HabitSchedule,
    ) -> Self {
        Self {
            id: HabitId::new(),
            name: name.into(),
            kind,
            category_id,
            schedule,
            suggestion_id: None,
            daily_target: None,
            is_active: true,
            start_date: Timestamp::now(),
            end_date: None,
        }
    }

    /// Links this habit to a suggestion catalog entry.
    pub fn with_suggestion(mut self, suggestion_id: SuggestionId) -> Self {
        self.suggestion_id = Some(suggestion_id);
        self
    }

    /// Sets the numeric daily target.
    pub fn with_daily_target(mut self, target: f64) -> Self {
        self.daily_target = Some(target);
        self
    }

    /// Sets the start date.
    pub fn with_start_date(mut self, start: Timestamp) -> Self {
        self.start_date = start;
        self
    }

    /// Sets the end date.
    pub fn with_end_date(mut self, end: Timestamp) -> Self {
        self.end_date = Some(end);
        self
    }

    /// A habit is custom when it was not adopted from the catalog.
    pub fn is_custom(&self) -> bool {
        self.suggestion_id.is_none()
    }

    /// The daily target to measure numeric logs against.
    pub fn effective_daily_target(&self) -> f64 {
        self.daily_target.unwrap_or(DEFAULT_DAILY_TARGET)
    }
}
