//! HabitRepository port for read-only habit access

use async_trait::async_trait;

use crate::domain::{
    analysis::AnalysisError,
    foundation::HabitId,
    habit::Habit,
};

/// Read-only access to the host application's habits.
///
/// The host scopes the repository to the current user; the engine
/// never writes habits.
#[async_trait]
pub trait HabitRepository: Send + Sync {
    /// Fetch every habit, active or not.
    async fn fetch_all_habits(&self) -> Result<Vec<Habit>, AnalysisError>;

    /// Fetch a single habit by id.
    async fn fetch_habit(&self, id: HabitId) -> Result<Option<Habit>, AnalysisError>;
}
