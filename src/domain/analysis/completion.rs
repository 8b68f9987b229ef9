//! Schedule-aware completion calculation.
//!
//! Single source of truth for completion rates: only days a habit's
//! schedule expects an entry count toward the denominator. A naive
//! "any log counts" rate over-rewards sparse schedules and must not
//! be reintroduced.

use std::collections::{BTreeSet, HashMap};

use chrono::{Datelike, NaiveDate};

use crate::domain::foundation::{HabitId, Timestamp};
use crate::domain::habit::{Habit, HabitKind, HabitLog, HabitSchedule};

/// Aggregate completion over a habit set, at set granularity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct CompletionSummary {
    pub habits_evaluated: u32,
    pub expected_entries: u32,
    pub completed_entries: u32,
}

impl CompletionSummary {
    /// Overall completion rate across the whole set.
    pub fn rate(&self) -> f64 {
        if self.expected_entries == 0 {
            return 0.0;
        }
        f64::from(self.completed_entries) / f64::from(self.expected_entries)
    }
}

/// Calculator for schedule-aware habit completion.
pub struct CompletionCalculator;

impl CompletionCalculator {
    /// Completion rate for one habit over a window.
    ///
    /// The window is clamped to the habit's own lifetime, so a habit
    /// started mid-window is only measured from its start date.
    ///
    /// # Edge Cases
    /// - No schedule-expected days in the window: returns 0.0
    pub fn habit_completion_rate(
        habit: &Habit,
        logs: &[HabitLog],
        window_start: Timestamp,
        window_end: Timestamp,
    ) -> f64 {
        let (expected, completed) = Self::habit_counts(habit, logs, window_start, window_end);
        if expected == 0 {
            return 0.0;
        }
        f64::from(completed) / f64::from(expected)
    }

    /// Aggregate expected/completed counts across a habit set.
    pub fn summary(
        habits: &[Habit],
        logs_by_habit: &HashMap<HabitId, Vec<HabitLog>>,
        window_start: Timestamp,
        window_end: Timestamp,
    ) -> CompletionSummary {
        let mut summary = CompletionSummary::default();
        for habit in habits {
            let logs = logs_by_habit
                .get(&habit.id)
                .map(Vec::as_slice)
                .unwrap_or(&[]);
            let (expected, completed) = Self::habit_counts(habit, logs, window_start, window_end);
            summary.habits_evaluated += 1;
            summary.expected_entries += expected;
            summary.completed_entries += completed;
        }
        summary
    }

    /// Consecutive-day tracking streak ending at the most recent logged day.
    ///
    /// Walks backward one calendar day at a time; the first day without
    /// any log ends the streak immediately.
    pub fn tracking_streak(logs: &[HabitLog]) -> u32 {
        let logged_days: BTreeSet<NaiveDate> = logs.iter().map(|log| log.date.date()).collect();

        let most_recent = match logged_days.iter().next_back() {
            Some(day) => *day,
            None => return 0,
        };

        let mut streak = 0u32;
        let mut cursor = most_recent;
        while logged_days.contains(&cursor) {
            streak += 1;
            match cursor.pred_opt() {
                Some(previous) => cursor = previous,
                None => break,
            }
        }
        streak
    }

    fn habit_counts(
        habit: &Habit,
        logs: &[HabitLog],
        window_start: Timestamp,
        window_end: Timestamp,
    ) -> (u32, u32) {
        let start = if habit.start_date.is_after(&window_start) {
            habit.start_date
        } else {
            window_start
        };
        let end = match habit.end_date {
            Some(habit_end) if habit_end.is_before(&window_end) => habit_end,
            _ => window_end,
        };

        let first_day = start.date();
        let last_day = end.date();
        if first_day > last_day {
            return (0, 0);
        }

        // Bucket logs by calendar day: running sum plus a flag for any
        // positive entry.
        let mut day_totals: HashMap<NaiveDate, (f64, bool)> = HashMap::new();
        for log in logs {
            let entry = day_totals.entry(log.date.date()).or_insert((0.0, false));
            entry.0 += log.amount();
            if log.amount() > 0.0 {
                entry.1 = true;
            }
        }

        let mut expected = 0u32;
        let mut completed = 0u32;
        for day in first_day.iter_days() {
            if day > last_day {
                break;
            }
            if !Self::expects_entry(&habit.schedule, day) {
                continue;
            }
            expected += 1;
            if Self::satisfied_on(habit, &day_totals, day) {
                completed += 1;
            }
        }
        (expected, completed)
    }

    fn expects_entry(schedule: &HabitSchedule, day: NaiveDate) -> bool {
        match schedule {
            HabitSchedule::Daily => true,
            HabitSchedule::DaysOfWeek(days) => days.contains(day.weekday()),
            // Flexible weekly targets treat every day as a candidate day.
            HabitSchedule::TimesPerWeek(_) => true,
        }
    }

    fn satisfied_on(
        habit: &Habit,
        day_totals: &HashMap<NaiveDate, (f64, bool)>,
        day: NaiveDate,
    ) -> bool {
        match day_totals.get(&day) {
            None => false,
            Some((sum, any_positive)) => match habit.kind {
                HabitKind::Binary => *any_positive,
                HabitKind::Numeric => *sum >= habit.effective_daily_target(),
            },
        }
    }
}
