//! Foundation module - Shared domain primitives.
//!
//! Contains value objects, identifiers, and error types
//! that form the vocabulary of the Habit Lens domain.

mod ids;
mod timestamp;
mod percentage;
mod personality_trait;
mod weekday_set;
mod errors;

pub use ids::{CategoryId, HabitId, SuggestionId, UserId};
pub use timestamp::Timestamp;
pub use percentage::Percentage;
pub use personality_trait::PersonalityTrait;
pub use weekday_set::WeekdaySet;
pub use errors::ValidationError;
