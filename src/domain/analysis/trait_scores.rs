//! Per-trait score container with clamping and dominant-trait selection.

use serde::{Deserialize, Serialize};

use crate::domain::foundation::PersonalityTrait;

/// The neutral score assigned to a trait with no evidence either way.
pub const NEUTRAL_SCORE: f64 = 0.5;

/// Scores for the five personality dimensions, each clamped to [0, 1].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TraitScores {
    openness: f64,
    conscientiousness: f64,
    extraversion: f64,
    agreeableness: f64,
    neuroticism: f64,
}

impl TraitScores {
    /// Creates scores, clamping each dimension to [0, 1].
    pub fn new(
        openness: f64,
        conscientiousness: f64,
        extraversion: f64,
        agreeableness: f64,
        neuroticism: f64,
    ) -> Self {
        Self {
            openness: openness.clamp(0.0, 1.0),
            conscientiousness: conscientiousness.clamp(0.0, 1.0),
            extraversion: extraversion.clamp(0.0, 1.0),
            agreeableness: agreeableness.clamp(0.0, 1.0),
            neuroticism: neuroticism.clamp(0.0, 1.0),
        }
    }

    /// All dimensions at the neutral baseline.
    pub fn neutral() -> Self {
        Self::new(
            NEUTRAL_SCORE,
            NEUTRAL_SCORE,
            NEUTRAL_SCORE,
            NEUTRAL_SCORE,
            NEUTRAL_SCORE,
        )
    }

    /// Builds scores by evaluating a function per trait in canonical order.
    pub fn from_fn(mut score: impl FnMut(PersonalityTrait) -> f64) -> Self {
        Self::new(
            score(PersonalityTrait::Openness),
            score(PersonalityTrait::Conscientiousness),
            score(PersonalityTrait::Extraversion),
            score(PersonalityTrait::Agreeableness),
            score(PersonalityTrait::Neuroticism),
        )
    }

    /// Score for a single trait.
    pub fn get(&self, personality_trait: PersonalityTrait) -> f64 {
        match personality_trait {
            PersonalityTrait::Openness => self.openness,
            PersonalityTrait::Conscientiousness => self.conscientiousness,
            PersonalityTrait::Extraversion => self.extraversion,
            PersonalityTrait::Agreeableness => self.agreeableness,
            PersonalityTrait::Neuroticism => self.neuroticism,
        }
    }

    /// Iterates (trait, score) pairs in canonical order.
    pub fn iter(&self) -> impl Iterator<Item = (PersonalityTrait, f64)> + '_ {
        PersonalityTrait::ALL
            .into_iter()
            .map(|personality_trait| (personality_trait, self.get(personality_trait)))
    }

    /// The trait with the strictly highest score.
    ///
    /// Ties resolve to the earliest trait in canonical order, so the
    /// result is deterministic for equal scores.
    pub fn dominant(&self) -> PersonalityTrait {
        let mut best = PersonalityTrait::Openness;
        let mut best_score = self.get(best);
        for personality_trait in PersonalityTrait::ALL {
            let score = self.get(personality_trait);
            if score > best_score {
                best = personality_trait;
                best_score = score;
            }
        }
        best
    }
}

impl Default for TraitScores {
    fn default() -> Self {
        Self::neutral()
    }
}
