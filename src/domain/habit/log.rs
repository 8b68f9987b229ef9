//! Habit log entries.

use serde::{Deserialize, Serialize};

use crate::domain::foundation::{HabitId, Timestamp};

/// A single logged entry for a habit on a given day.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HabitLog {
    pub habit_id: HabitId,
    pub date: Timestamp,
    /// Logged amount for numeric habits; binary habits usually log `None`.
    pub value: Option<f64>,
}

impl HabitLog {
    /// Creates a log entry with no explicit value (a plain completion).
    pub fn new(habit_id: HabitId, date: Timestamp) -> Self {
        Self {
            habit_id,
            date,
            value: None,
        }
    }

    /// Creates a log entry carrying a measured amount.
    pub fn with_value(habit_id: HabitId, date: Timestamp, value: f64) -> Self {
        Self {
            habit_id,
            date,
            value: Some(value),
        }
    }

    /// The logged amount, treating a valueless entry as one completion.
    pub fn amount(&self) -> f64 {
        self.value.unwrap_or(1.0)
    }
}
