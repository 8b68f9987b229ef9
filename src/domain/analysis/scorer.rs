//! Weighted trait scoring from suggestion weights and completion rates.

use std::collections::HashMap;

use super::input::HabitAnalysisInput;
use super::trait_scores::{TraitScores, NEUTRAL_SCORE};
use crate::domain::foundation::PersonalityTrait;

/// Average completion below which the instability heuristic fires.
pub const INSTABILITY_COMPLETION_THRESHOLD: f64 = 0.30;

/// Single neuroticism shift applied when follow-through is erratic.
pub const LOW_COMPLETION_NEUROTICISM_SHIFT: f64 = 0.2;

/// Scorer turning an analysis snapshot into per-trait scores.
pub struct TraitScorer;

impl TraitScorer {
    /// Computes per-trait scores for a snapshot.
    ///
    /// Each habit with a resolved suggestion contributes its trait
    /// weights scaled by that habit's completion rate. The accumulated
    /// delta per trait is normalized by the active-habit count (minimum
    /// 1), then shifted from the 0.5 neutral baseline; the divisor is
    /// fixed so stored scores stay reproducible across releases. If the
    /// overall average completion falls below 30%, a single fixed shift
    /// is added to neuroticism after normalization. Final scores clamp
    /// to [0, 1].
    pub fn score(input: &HabitAnalysisInput) -> TraitScores {
        let mut deltas: HashMap<PersonalityTrait, f64> = HashMap::new();

        for (habit, completion_rate) in input.active_habits.iter().zip(&input.completion_rates) {
            let suggestion = match input.suggestion_for(habit) {
                Some(suggestion) => suggestion,
                None => continue,
            };
            for (personality_trait, weight) in &suggestion.personality_weights {
                *deltas.entry(*personality_trait).or_insert(0.0) += weight * completion_rate;
            }
        }

        let divisor = input.active_habits.len().max(1) as f64;
        let instability_shift =
            if input.average_completion_rate() < INSTABILITY_COMPLETION_THRESHOLD {
                LOW_COMPLETION_NEUROTICISM_SHIFT
            } else {
                0.0
            };

        TraitScores::from_fn(|personality_trait| {
            let delta = deltas.get(&personality_trait).copied().unwrap_or(0.0) / divisor;
            let shift = if personality_trait == PersonalityTrait::Neuroticism {
                instability_shift
            } else {
                0.0
            };
            NEUTRAL_SCORE + delta + shift
        })
    }
}
