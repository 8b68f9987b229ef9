//! Adapters - Implementations of port interfaces.
//!
//! Adapters connect the domain to external systems:
//! - `memory` - In-memory data sources and stores for tests and development
//! - `catalog` - Static suggestion catalog
//! - `store` - File-backed profile and preference persistence

pub mod catalog;
pub mod memory;
pub mod store;

pub use catalog::StaticSuggestionCatalog;
pub use memory::{
    InMemoryAnalysisStore, InMemoryCategoryRepository, InMemoryHabitRepository,
    InMemoryLogRepository,
};
pub use store::FileAnalysisStore;
