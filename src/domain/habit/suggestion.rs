//! Habit suggestion catalog entries.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::domain::foundation::{CategoryId, PersonalityTrait, SuggestionId};

/// A catalog entry describing a suggested habit and how adopting it
/// weighs on each personality trait.
///
/// Weights are sparse: traits a suggestion says nothing about are
/// simply absent from the map.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HabitSuggestion {
    pub id: SuggestionId,
    pub name: String,
    pub category_id: CategoryId,
    pub personality_weights: HashMap<PersonalityTrait, f64>,
}

impl HabitSuggestion {
    /// Creates a suggestion, clamping every weight to [-1, 1].
    pub fn new(
        id: SuggestionId,
        name: impl Into<String>,
        category_id: CategoryId,
        weights: HashMap<PersonalityTrait, f64>,
    ) -> Self {
        let personality_weights = weights
            .into_iter()
            .map(|(personality_trait, weight)| (personality_trait, weight.clamp(-1.0, 1.0)))
            .collect();

        Self {
            id,
            name: name.into(),
            category_id,
            personality_weights,
        }
    }

    /// Weight for a given trait, zero when the suggestion is silent on it.
    pub fn weight_for(&self, personality_trait: PersonalityTrait) -> f64 {
        self.personality_weights
            .get(&personality_trait)
            .copied()
            .unwrap_or(0.0)
    }
}
