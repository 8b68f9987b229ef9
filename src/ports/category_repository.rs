//! CategoryRepository port for read-only category access

use async_trait::async_trait;

use crate::domain::{analysis::AnalysisError, habit::Category};

/// Read-only access to habit categories.
#[async_trait]
pub trait CategoryRepository: Send + Sync {
    /// Fetch every category, predefined and custom.
    async fn all_categories(&self) -> Result<Vec<Category>, AnalysisError>;

    /// Fetch only user-created categories.
    async fn custom_categories(&self) -> Result<Vec<Category>, AnalysisError>;

    /// Fetch categories currently in use.
    async fn active_categories(&self) -> Result<Vec<Category>, AnalysisError>;
}
