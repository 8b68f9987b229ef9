//! Application layer - Services that run the analysis engine.
//!
//! This layer coordinates domain calculators with the ports: it
//! aggregates snapshots, sequences analysis runs, keeps the cadence,
//! and manages user preferences.

pub mod aggregator;
pub mod backoff;
pub mod orchestrator;
pub mod preferences;
pub mod scheduler;

pub use aggregator::HabitDataAggregator;
pub use backoff::{PollBackoff, POLL_BASE_DELAY_MS, POLL_MAX_ATTEMPTS, POLL_MULTIPLIER};
pub use orchestrator::{AnalysisPhase, PersonalityAnalysisOrchestrator, EVALUATED_HABITS_BONUS};
pub use preferences::AnalysisPreferencesManager;
pub use scheduler::{CadenceScheduler, DEBOUNCE_WINDOW_SECS};
