//! In-Memory Habit Repository Adapter
//!
//! Serves habits from memory in insertion order.
//! Useful for testing and development.

use async_trait::async_trait;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::domain::analysis::AnalysisError;
use crate::domain::foundation::HabitId;
use crate::domain::habit::Habit;
use crate::ports::HabitRepository;

/// In-memory habit source.
#[derive(Debug, Clone)]
pub struct InMemoryHabitRepository {
    habits: Arc<RwLock<Vec<Habit>>>,
}

impl InMemoryHabitRepository {
    /// Create an empty repository.
    pub fn new() -> Self {
        Self {
            habits: Arc::new(RwLock::new(Vec::new())),
        }
    }

    /// Create a repository pre-seeded with habits.
    pub fn with_habits(habits: Vec<Habit>) -> Self {
        Self {
            habits: Arc::new(RwLock::new(habits)),
        }
    }

    /// Add one habit.
    pub async fn insert(&self, habit: Habit) {
        self.habits.write().await.push(habit);
    }

    /// Number of stored habits (useful for tests).
    pub async fn habit_count(&self) -> usize {
        self.habits.read().await.len()
    }
}

impl Default for InMemoryHabitRepository {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl HabitRepository for InMemoryHabitRepository {
    async fn fetch_all_habits(&self) -> Result<Vec<Habit>, AnalysisError> {
        Ok(self.habits.read().await.clone())
    }

    async fn fetch_habit(&self, id: HabitId) -> Result<Option<Habit>, AnalysisError> {
        let habits = self.habits.read().await;
        Ok(habits.iter().find(|habit| habit.id == id).cloned())
    }
}
