//! Compact set of weekdays for habit schedules.

use chrono::Weekday;
use serde::{Deserialize, Serialize};
use std::fmt;

/// A set of weekdays stored as a 7-bit mask (bit 0 = Monday).
///
/// Serializes as the raw mask so stored schedules stay stable
/// across chrono versions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct WeekdaySet(u8);

const ALL_DAYS_MASK: u8 = 0b0111_1111;

impl WeekdaySet {
    /// The empty set.
    pub const EMPTY: Self = Self(0);

    /// Every day of the week.
    pub const ALL: Self = Self(ALL_DAYS_MASK);

    /// Creates a set from a slice of weekdays.
    pub fn new(days: &[Weekday]) -> Self {
        let mut set = Self::EMPTY;
        for day in days {
            set = set.with(*day);
        }
        set
    }

    /// Creates a set for Monday through Friday.
    pub fn weekdays_only() -> Self {
        Self::new(&[
            Weekday::Mon,
            Weekday::Tue,
            Weekday::Wed,
            Weekday::Thu,
            Weekday::Fri,
        ])
    }

    /// Returns a copy of this set with the given day added.
    pub fn with(self, day: Weekday) -> Self {
        Self(self.0 | Self::bit(day))
    }

    /// Checks whether the set contains the given day.
    pub fn contains(&self, day: Weekday) -> bool {
        self.0 & Self::bit(day) != 0
    }

    /// Number of days in the set.
    pub fn len(&self) -> usize {
        self.0.count_ones() as usize
    }

    /// Whether the set is empty.
    pub fn is_empty(&self) -> bool {
        self.0 == 0
    }

    /// Iterates the contained days in Monday-first order.
    pub fn iter(&self) -> impl Iterator<Item = Weekday> + '_ {
        const ORDER: [Weekday; 7] = [
            Weekday::Mon,
            Weekday::Tue,
            Weekday::Wed,
            Weekday::Thu,
            Weekday::Fri,
            Weekday::Sat,
            Weekday::Sun,
        ];
        ORDER.into_iter().filter(|day| self.contains(*day))
    }

    fn bit(day: Weekday) -> u8 {
        1 << day.num_days_from_monday()
    }
}

impl Default for WeekdaySet {
    fn default() -> Self {
        Self::EMPTY
    }
}

impl fmt::Display for WeekdaySet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let names: Vec<String> = self.iter().map(|d| d.to_string()).collect();
        write!(f, "{{{}}}", names.join(", "))
    }
}
