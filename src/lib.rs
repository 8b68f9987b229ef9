//! Habit Lens - Personality Analysis Engine
//!
//! This crate derives Big Five (OCEAN) personality profiles from
//! habit-tracking behavior and governs when analysis runs through
//! per-user preferences and scheduling.

pub mod adapters;
pub mod application;
pub mod config;
pub mod domain;
pub mod ports;
pub mod telemetry;
