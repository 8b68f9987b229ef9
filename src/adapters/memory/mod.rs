//! In-memory adapters for tests and development wiring.

mod analysis_store;
mod category_repository;
mod habit_repository;
mod log_repository;

pub use analysis_store::InMemoryAnalysisStore;
pub use category_repository::InMemoryCategoryRepository;
pub use habit_repository::InMemoryHabitRepository;
pub use log_repository::InMemoryLogRepository;
