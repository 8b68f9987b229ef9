//! LogRepository port for read-only completion log access

use std::collections::HashMap;

use async_trait::async_trait;

use crate::domain::{
    analysis::AnalysisError,
    foundation::{HabitId, Timestamp},
    habit::HabitLog,
};

/// Read-only access to habit completion logs.
#[async_trait]
pub trait LogRepository: Send + Sync {
    /// Fetch every log entry recorded for one habit.
    async fn logs_for_habit(&self, habit_id: HabitId) -> Result<Vec<HabitLog>, AnalysisError>;

    /// Fetch logs for many habits in one call, restricted to the
    /// `[since, until]` window. Habits with no logs in the window may be
    /// absent from the returned map.
    async fn logs_for_habits(
        &self,
        habit_ids: &[HabitId],
        since: Timestamp,
        until: Timestamp,
    ) -> Result<HashMap<HabitId, Vec<HabitLog>>, AnalysisError>;
}
