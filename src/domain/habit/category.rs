//! Habit categories.

use serde::{Deserialize, Serialize};

use crate::domain::foundation::CategoryId;

/// A grouping for habits, either predefined or user-created.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Category {
    pub id: CategoryId,
    pub name: String,
    pub is_custom: bool,
    pub is_active: bool,
}

impl Category {
    /// Creates an active predefined category.
    pub fn predefined(name: impl Into<String>) -> Self {
        Self {
            id: CategoryId::new(),
            name: name.into(),
            is_custom: false,
            is_active: true,
        }
    }

    /// Creates an active user-created category.
    pub fn custom(name: impl Into<String>) -> Self {
        Self {
            id: CategoryId::new(),
            name: name.into(),
            is_custom: true,
            is_active: true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn category_predefined_is_not_custom() {
        let category = Category::predefined("Health");
        assert!(!category.is_custom);
        assert!(category.is_active);
    }

    #[test]
    fn category_custom_is_custom() {
        let category = Category::custom("Chess practice");
        assert!(category.is_custom);
        assert!(category.is_active);
    }
}
