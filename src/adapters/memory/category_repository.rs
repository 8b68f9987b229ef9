//! In-Memory Category Repository Adapter
//!
//! Serves categories from memory in insertion order.
//! Useful for testing and development.

use async_trait::async_trait;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::domain::analysis::AnalysisError;
use crate::domain::habit::Category;
use crate::ports::CategoryRepository;

/// In-memory category source.
#[derive(Debug, Clone)]
pub struct InMemoryCategoryRepository {
    categories: Arc<RwLock<Vec<Category>>>,
}

impl InMemoryCategoryRepository {
    /// Create an empty repository.
    pub fn new() -> Self {
        Self {
            categories: Arc::new(RwLock::new(Vec::new())),
        }
    }

    /// Create a repository pre-seeded with categories.
    pub fn with_categories(categories: Vec<Category>) -> Self {
        Self {
            categories: Arc::new(RwLock::new(categories)),
        }
    }

    /// Add one category.
    pub async fn insert(&self, category: Category) {
        self.categories.write().await.push(category);
    }
}

impl Default for InMemoryCategoryRepository {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl CategoryRepository for InMemoryCategoryRepository {
    async fn all_categories(&self) -> Result<Vec<Category>, AnalysisError> {
        Ok(self.categories.read().await.clone())
    }

    async fn custom_categories(&self) -> Result<Vec<Category>, AnalysisError> {
        let categories = self.categories.read().await;
        Ok(categories
            .iter()
            .filter(|category| category.is_custom)
            .cloned()
            .collect())
    }

    async fn active_categories(&self) -> Result<Vec<Category>, AnalysisError> {
        let categories = self.categories.read().await;
        Ok(categories
            .iter()
            .filter(|category| category.is_active)
            .cloned()
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_custom_categories_filters_predefined_ones() {
        let repository = InMemoryCategoryRepository::with_categories(vec![
            Category::predefined("Health"),
            Category::custom("Chess practice"),
        ]);

        let custom = repository.custom_categories().await.unwrap();

        assert_eq!(custom.len(), 1);
        assert_eq!(custom[0].name, "Chess practice");
    }

    #[tokio::test]
    async fn test_active_categories_excludes_inactive_ones() {
        let mut archived = Category::predefined("Finance");
        archived.is_active = false;

        let repository = InMemoryCategoryRepository::with_categories(vec![
            Category::predefined("Health"),
            archived,
        ]);

        let active = repository.active_categories().await.unwrap();

        assert_eq!(active.len(), 1);
        assert_eq!(active[0].name, "Health");
    }
}
