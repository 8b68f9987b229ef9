//! HabitSuggestionCatalog port for trait-weight lookups

use async_trait::async_trait;

use crate::domain::{foundation::SuggestionId, habit::HabitSuggestion};

/// Lookup table mapping suggestion ids to catalog entries carrying
/// personality trait weights.
///
/// Lookups are infallible; an unknown id resolves to `None` and callers
/// skip the habit when scoring.
#[async_trait]
pub trait HabitSuggestionCatalog: Send + Sync {
    /// Resolve a catalog entry by id.
    async fn suggestion(&self, id: &SuggestionId) -> Option<HabitSuggestion>;
}
