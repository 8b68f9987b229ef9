//! Analysis module - Pure domain services for personality analysis.
//!
//! This module contains stateless calculators that operate on an
//! analysis snapshot, plus the profile and preferences types they
//! produce and govern.
//!
//! # Components
//!
//! - `CompletionCalculator` - Schedule-aware completion rates and streaks
//! - `EligibilityValidator` - Threshold requirements and eligibility verdicts
//! - `TraitScorer` - Weighted OCEAN scoring with the instability heuristic
//! - `ConfidenceLevel` - Data-volume confidence buckets
//! - `PersonalityProfile` - The persisted analysis result
//! - `PersonalityAnalysisPreferences` - Per-user scheduling settings
//!
//! All calculators are pure: they take the snapshot as input and return
//! computed results, with no I/O and no shared state.

mod completion;
mod confidence;
mod eligibility;
mod error;
mod input;
mod preferences;
mod profile;
mod scorer;
mod trait_scores;

pub use completion::{CompletionCalculator, CompletionSummary};
pub use confidence::ConfidenceLevel;
pub use eligibility::{
    AnalysisEligibility, EligibilityValidator, RequirementCategory, ThresholdRequirement,
    MIN_ACTIVE_HABITS, MIN_AVG_COMPLETION_PERCENT, MIN_CUSTOM_CATEGORIES, MIN_CUSTOM_HABITS,
    MIN_DISTINCT_CATEGORIES, MIN_TRACKING_DAYS,
};
pub use error::AnalysisError;
pub use input::{HabitAnalysisInput, ANALYSIS_WINDOW_DAYS};
pub use preferences::{AnalysisFrequency, PersonalityAnalysisPreferences};
pub use profile::{
    AnalysisMetadata, PersonalityProfile, ProfileId, ANALYSIS_VERSION, PROFILE_VALIDITY_DAYS,
};
pub use scorer::{
    TraitScorer, INSTABILITY_COMPLETION_THRESHOLD, LOW_COMPLETION_NEUROTICISM_SHIFT,
};
pub use trait_scores::{TraitScores, NEUTRAL_SCORE};
