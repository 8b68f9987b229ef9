//! File-backed persistence adapters.

mod file_analysis_store;

pub use file_analysis_store::FileAnalysisStore;
