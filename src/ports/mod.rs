//! Ports - Interfaces for external dependencies.
//!
//! Following hexagonal architecture, ports define the contracts between
//! the domain and the outside world. Adapters implement these ports.
//!
//! ## Data Source Ports
//!
//! - `HabitRepository` - Read-only habit access
//! - `LogRepository` - Read-only completion log access
//! - `CategoryRepository` - Read-only category access
//! - `HabitSuggestionCatalog` - Trait-weight lookup for catalog habits
//!
//! ## Persistence Ports
//!
//! - `PersonalityAnalysisRepository` - Profile history and preference storage
//!
//! ## Scheduling Ports
//!
//! - `PersonalityAnalysisScheduler` - Automatic re-analysis cadence

mod analysis_repository;
mod category_repository;
mod habit_repository;
mod log_repository;
mod scheduler;
mod suggestion_catalog;

pub use analysis_repository::PersonalityAnalysisRepository;
pub use category_repository::CategoryRepository;
pub use habit_repository::HabitRepository;
pub use log_repository::LogRepository;
pub use scheduler::PersonalityAnalysisScheduler;
pub use suggestion_catalog::HabitSuggestionCatalog;
