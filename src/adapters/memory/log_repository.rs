//! In-Memory Log Repository Adapter
//!
//! Stores habit completion logs in memory.
//! Useful for testing and development.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::domain::analysis::AnalysisError;
use crate::domain::foundation::{HabitId, Timestamp};
use crate::domain::habit::HabitLog;
use crate::ports::LogRepository;

/// In-memory log source.
#[derive(Debug, Clone)]
pub struct InMemoryLogRepository {
    logs: Arc<RwLock<Vec<HabitLog>>>,
}

impl InMemoryLogRepository {
    /// Create an empty repository.
    pub fn new() -> Self {
        Self {
            logs: Arc::new(RwLock::new(Vec::new())),
        }
    }

    /// Create a repository pre-seeded with logs.
    pub fn with_logs(logs: Vec<HabitLog>) -> Self {
        Self {
            logs: Arc::new(RwLock::new(logs)),
        }
    }

    /// Record one log entry.
    pub async fn record(&self, log: HabitLog) {
        self.logs.write().await.push(log);
    }

    /// Number of stored logs (useful for tests).
    pub async fn log_count(&self) -> usize {
        self.logs.read().await.len()
    }
}

impl Default for InMemoryLogRepository {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl LogRepository for InMemoryLogRepository {
    async fn logs_for_habit(&self, habit_id: HabitId) -> Result<Vec<HabitLog>, AnalysisError> {
        let logs = self.logs.read().await;
        Ok(logs
            .iter()
            .filter(|log| log.habit_id == habit_id)
            .cloned()
            .collect())
    }

    async fn logs_for_habits(
        &self,
        habit_ids: &[HabitId],
        since: Timestamp,
        until: Timestamp,
    ) -> Result<HashMap<HabitId, Vec<HabitLog>>, AnalysisError> {
        let logs = self.logs.read().await;
        let mut by_habit: HashMap<HabitId, Vec<HabitLog>> = HashMap::new();
        for log in logs.iter() {
            if !habit_ids.contains(&log.habit_id) {
                continue;
            }
            if log.date.is_before(&since) || log.date.is_after(&until) {
                continue;
            }
            by_habit.entry(log.habit_id).or_default().push(log.clone());
        }
        Ok(by_habit)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_logs_for_habit_filters_by_habit() {
        let tracked = HabitId::new();
        let other = HabitId::new();
        let now = Timestamp::now();

        let repository = InMemoryLogRepository::with_logs(vec![
            HabitLog::new(tracked, now),
            HabitLog::new(other, now),
        ]);

        let logs = repository.logs_for_habit(tracked).await.unwrap();

        assert_eq!(logs.len(), 1);
        assert_eq!(logs[0].habit_id, tracked);
    }

    #[tokio::test]
    async fn test_batched_fetch_respects_the_window() {
        let habit_id = HabitId::new();
        let now = Timestamp::now();

        let repository = InMemoryLogRepository::with_logs(vec![
            HabitLog::new(habit_id, now.minus_days(1)),
            HabitLog::new(habit_id, now.minus_days(10)),
        ]);

        let by_habit = repository
            .logs_for_habits(&[habit_id], now.minus_days(5), now)
            .await
            .unwrap();

        assert_eq!(by_habit.get(&habit_id).unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_batched_fetch_omits_unrequested_habits() {
        let requested = HabitId::new();
        let unrequested = HabitId::new();
        let now = Timestamp::now();

        let repository = InMemoryLogRepository::with_logs(vec![
            HabitLog::new(requested, now),
            HabitLog::new(unrequested, now),
        ]);

        let by_habit = repository
            .logs_for_habits(&[requested], now.minus_days(5), now)
            .await
            .unwrap();

        assert!(by_habit.contains_key(&requested));
        assert!(!by_habit.contains_key(&unrequested));
    }
}
