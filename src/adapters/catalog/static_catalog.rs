//! Static Habit Suggestion Catalog Adapter
//!
//! Read-only lookup table mapping suggestion ids to trait weights.
//! Ships with a built-in table and can also be seeded from YAML.

use async_trait::async_trait;
use once_cell::sync::Lazy;
use std::collections::HashMap;
use uuid::Uuid;

use crate::domain::analysis::AnalysisError;
use crate::domain::foundation::{CategoryId, PersonalityTrait, SuggestionId};
use crate::domain::habit::HabitSuggestion;
use crate::ports::HabitSuggestionCatalog;

/// Built-in suggestion table.
///
/// Category ids are fixed so the same catalog entry always refers to
/// the same grouping across runs.
static BUILT_IN: Lazy<Vec<HabitSuggestion>> = Lazy::new(|| {
    use PersonalityTrait::*;

    let fitness = CategoryId::from_uuid(Uuid::from_u128(0x8c2f_41d6_9a3e_4b7f_a1c5_2e8d_73f0_6b91));
    let mindfulness =
        CategoryId::from_uuid(Uuid::from_u128(0x3b7a_e2c9_5d14_48a6_b38f_91d4_c6e2_0a75));
    let learning = CategoryId::from_uuid(Uuid::from_u128(0xd94c_7f21_8b6a_4e53_92d7_45a1_e8b3_c062));
    let social = CategoryId::from_uuid(Uuid::from_u128(0x61e8_93b5_2c4d_47f9_8a06_d7e3_15c8_4bfa));
    let productivity =
        CategoryId::from_uuid(Uuid::from_u128(0xf25a_68d3_e791_4c08_b5a4_3f96_d210_e7c3));
    let creativity =
        CategoryId::from_uuid(Uuid::from_u128(0x0a4d_b7e6_38f2_45c1_97b8_6e05_a3d9_128f));

    let table: Vec<(&str, &str, CategoryId, Vec<(PersonalityTrait, f64)>)> = vec![
        (
            "morning-run",
            "Morning run",
            fitness,
            vec![(Conscientiousness, 0.6), (Extraversion, 0.3), (Neuroticism, -0.2)],
        ),
        (
            "evening-walk",
            "Evening walk",
            fitness,
            vec![(Conscientiousness, 0.4), (Neuroticism, -0.3)],
        ),
        (
            "strength-training",
            "Strength training",
            fitness,
            vec![(Conscientiousness, 0.7), (Extraversion, 0.2)],
        ),
        (
            "daily-meditation",
            "Daily meditation",
            mindfulness,
            vec![(Openness, 0.4), (Conscientiousness, 0.3), (Neuroticism, -0.5)],
        ),
        (
            "journal-before-bed",
            "Journal before bed",
            mindfulness,
            vec![(Openness, 0.5), (Conscientiousness, 0.4), (Neuroticism, -0.3)],
        ),
        (
            "gratitude-list",
            "Write a gratitude list",
            mindfulness,
            vec![(Agreeableness, 0.7), (Openness, 0.2), (Neuroticism, -0.4)],
        ),
        (
            "read-30-minutes",
            "Read for 30 minutes",
            learning,
            vec![(Openness, 0.7), (Conscientiousness, 0.2)],
        ),
        (
            "learn-a-language",
            "Practice a new language",
            learning,
            vec![(Openness, 0.8), (Conscientiousness, 0.4)],
        ),
        (
            "call-a-friend",
            "Call a friend",
            social,
            vec![(Extraversion, 0.8), (Agreeableness, 0.6)],
        ),
        (
            "volunteer-weekly",
            "Volunteer weekly",
            social,
            vec![(Agreeableness, 0.8), (Extraversion, 0.5)],
        ),
        (
            "plan-tomorrow",
            "Plan tomorrow tonight",
            productivity,
            vec![(Conscientiousness, 0.8), (Openness, 0.1)],
        ),
        (
            "inbox-zero",
            "Clear the inbox",
            productivity,
            vec![(Conscientiousness, 0.6), (Neuroticism, -0.1)],
        ),
        (
            "try-new-recipe",
            "Try a new recipe",
            creativity,
            vec![(Openness, 0.8), (Extraversion, 0.2)],
        ),
        (
            "practice-instrument",
            "Practice an instrument",
            creativity,
            vec![(Openness, 0.6), (Conscientiousness, 0.5)],
        ),
    ];

    table
        .into_iter()
        .filter_map(|(id, name, category_id, weights)| {
            let id = SuggestionId::new(id).ok()?;
            Some(HabitSuggestion::new(
                id,
                name,
                category_id,
                weights.into_iter().collect(),
            ))
        })
        .collect()
});

/// Static suggestion catalog backed by an in-process table.
#[derive(Debug, Clone)]
pub struct StaticSuggestionCatalog {
    entries: HashMap<SuggestionId, HabitSuggestion>,
}

impl StaticSuggestionCatalog {
    /// Catalog with the built-in suggestion table.
    pub fn built_in() -> Self {
        Self::from_entries(BUILT_IN.clone())
    }

    /// Catalog over caller-provided entries. Later duplicates of an id
    /// replace earlier ones.
    pub fn from_entries(entries: Vec<HabitSuggestion>) -> Self {
        Self {
            entries: entries
                .into_iter()
                .map(|suggestion| (suggestion.id.clone(), suggestion))
                .collect(),
        }
    }

    /// Catalog parsed from a YAML list of suggestions. Weights outside
    /// [-1, 1] are clamped on load.
    pub fn from_yaml_str(yaml: &str) -> Result<Self, AnalysisError> {
        let parsed: Vec<HabitSuggestion> =
            serde_yaml::from_str(yaml).map_err(AnalysisError::encoding)?;
        let clamped = parsed
            .into_iter()
            .map(|raw| HabitSuggestion::new(raw.id, raw.name, raw.category_id, raw.personality_weights))
            .collect();
        Ok(Self::from_entries(clamped))
    }

    /// Number of catalog entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the catalog is empty.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Default for StaticSuggestionCatalog {
    fn default() -> Self {
        Self::built_in()
    }
}

#[async_trait]
impl HabitSuggestionCatalog for StaticSuggestionCatalog {
    async fn suggestion(&self, id: &SuggestionId) -> Option<HabitSuggestion> {
        self.entries.get(id).cloned()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_built_in_catalog_resolves_known_ids() {
        let catalog = StaticSuggestionCatalog::built_in();

        let suggestion = catalog
            .suggestion(&SuggestionId::new("morning-run").unwrap())
            .await
            .unwrap();

        assert_eq!(suggestion.name, "Morning run");
        assert!(suggestion.weight_for(PersonalityTrait::Conscientiousness) > 0.0);
        assert!(catalog.len() >= 10);
    }

    #[tokio::test]
    async fn test_unknown_id_resolves_to_none() {
        let catalog = StaticSuggestionCatalog::built_in();

        let missing = catalog
            .suggestion(&SuggestionId::new("no-such-entry").unwrap())
            .await;

        assert!(missing.is_none());
    }

    #[test]
    fn test_yaml_catalog_parses_and_clamps_weights() {
        let yaml = r#"
- id: cold-shower
  name: Cold shower
  category_id: 8c2f41d6-9a3e-4b7f-a1c5-2e8d73f06b91
  personality_weights:
    conscientiousness: 4.0
    neuroticism: -0.2
"#;

        let catalog = StaticSuggestionCatalog::from_yaml_str(yaml).unwrap();

        assert_eq!(catalog.len(), 1);
        let entries: Vec<&HabitSuggestion> = catalog.entries.values().collect();
        assert!(
            (entries[0].weight_for(PersonalityTrait::Conscientiousness) - 1.0).abs()
                < f64::EPSILON
        );
    }

    #[test]
    fn test_invalid_yaml_reports_an_encoding_failure() {
        let result = StaticSuggestionCatalog::from_yaml_str(": not yaml");

        assert!(matches!(result, Err(AnalysisError::EncodingFailure(_))));
    }

    #[test]
    fn test_built_in_weights_stay_within_unit_range() {
        for suggestion in BUILT_IN.iter() {
            for (_, weight) in &suggestion.personality_weights {
                assert!((-1.0..=1.0).contains(weight));
            }
        }
    }
}
