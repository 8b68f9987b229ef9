//! Habit module - External entities consumed by the engine.
//!
//! Habits, logs, categories, and catalog suggestions are owned by the
//! host application; the analysis engine only reads them through the
//! repository ports.

mod category;
mod habit;
mod log;
mod suggestion;

pub use category::Category;
pub use habit::{Habit, HabitKind, HabitSchedule, DEFAULT_DAILY_TARGET};
pub use log::HabitLog;
pub use suggestion::HabitSuggestion;
