//! Domain layer containing business logic and domain types.
//!
//! # Module Organization
//!
//! - `foundation` - Shared domain primitives (value objects, IDs, enums, errors)
//! - `habit` - Habits, logs, categories, and catalog suggestions (consumed read-only)
//! - `analysis` - Pure domain services for personality analysis (eligibility, scoring, confidence)

pub mod analysis;
pub mod foundation;
pub mod habit;
