//! Eligibility validation against fixed data thresholds.

use serde::{Deserialize, Serialize};

use super::input::HabitAnalysisInput;
use crate::domain::foundation::Percentage;

/// Minimum number of active habits.
pub const MIN_ACTIVE_HABITS: u32 = 5;

/// Minimum consecutive tracking days.
pub const MIN_TRACKING_DAYS: u32 = 7;

/// Minimum user-created categories.
pub const MIN_CUSTOM_CATEGORIES: u32 = 3;

/// Minimum user-created habits.
pub const MIN_CUSTOM_HABITS: u32 = 3;

/// Minimum average completion rate, as a whole percent.
pub const MIN_AVG_COMPLETION_PERCENT: u32 = 30;

/// Minimum distinct categories spanned by active habits.
pub const MIN_DISTINCT_CATEGORIES: u32 = 3;

/// Which aspect of the user's data a requirement measures.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RequirementCategory {
    Habits,
    Tracking,
    Customization,
    Diversity,
}

/// One named, measurable eligibility criterion.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ThresholdRequirement {
    pub name: String,
    pub description: String,
    pub current_value: u32,
    pub required_value: u32,
    pub category: RequirementCategory,
}

impl ThresholdRequirement {
    fn new(
        name: &str,
        description: &str,
        current_value: u32,
        required_value: u32,
        category: RequirementCategory,
    ) -> Self {
        Self {
            name: name.to_string(),
            description: description.to_string(),
            current_value,
            required_value,
            category,
        }
    }

    /// A requirement is met once the current value reaches the required one.
    pub fn is_met(&self) -> bool {
        self.current_value >= self.required_value
    }
}

/// Verdict on whether a user's data supports an analysis run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisEligibility {
    pub is_eligible: bool,
    pub missing_requirements: Vec<ThresholdRequirement>,
    /// Coarse progress indicator: 1.0 when eligible, otherwise a flat 0.5.
    pub overall_progress: f64,
    pub estimated_days_to_eligibility: Option<u32>,
}

/// Validator turning an analysis snapshot into threshold requirements
/// and an eligibility verdict.
pub struct EligibilityValidator;

impl EligibilityValidator {
    /// Builds the six threshold requirements for a snapshot.
    ///
    /// Deterministic: the same input always yields the same list, in
    /// the same order.
    pub fn requirements(input: &HabitAnalysisInput) -> Vec<ThresholdRequirement> {
        let average_completion = Percentage::from_fraction(input.average_completion_rate());

        vec![
            ThresholdRequirement::new(
                "Active Habits",
                "Track at least 5 active habits",
                input.active_habits.len() as u32,
                MIN_ACTIVE_HABITS,
                RequirementCategory::Habits,
            ),
            ThresholdRequirement::new(
                "Tracking Days",
                "Log habits on 7 consecutive days",
                input.tracking_days,
                MIN_TRACKING_DAYS,
                RequirementCategory::Tracking,
            ),
            ThresholdRequirement::new(
                "Custom Categories",
                "Create at least 3 of your own categories",
                input.custom_categories.len() as u32,
                MIN_CUSTOM_CATEGORIES,
                RequirementCategory::Customization,
            ),
            ThresholdRequirement::new(
                "Custom Habits",
                "Create at least 3 of your own habits",
                input.custom_habits.len() as u32,
                MIN_CUSTOM_HABITS,
                RequirementCategory::Customization,
            ),
            ThresholdRequirement::new(
                "Average Completion",
                "Keep average habit completion at 30% or higher",
                u32::from(average_completion.value()),
                MIN_AVG_COMPLETION_PERCENT,
                RequirementCategory::Habits,
            ),
            ThresholdRequirement::new(
                "Category Diversity",
                "Spread active habits across 3 or more categories",
                input.distinct_category_count() as u32,
                MIN_DISTINCT_CATEGORIES,
                RequirementCategory::Diversity,
            ),
        ]
    }

    /// Full eligibility verdict for a snapshot.
    pub fn validate(input: &HabitAnalysisInput) -> AnalysisEligibility {
        let requirements = Self::requirements(input);
        let missing_requirements: Vec<ThresholdRequirement> = requirements
            .iter()
            .filter(|requirement| !requirement.is_met())
            .cloned()
            .collect();
        let is_eligible = missing_requirements.is_empty();

        AnalysisEligibility {
            is_eligible,
            estimated_days_to_eligibility: Self::estimated_days(&missing_requirements),
            overall_progress: if is_eligible { 1.0 } else { 0.5 },
            missing_requirements,
        }
    }

    /// Estimated days until all requirements can be met.
    ///
    /// Per-category rules: `tracking` needs the remaining day gap,
    /// `habits` and `customization` can be fixed in a day, `diversity`
    /// takes a few days of rearranging. The estimate is the maximum
    /// across unmet requirements; `None` when everything is met.
    pub fn estimated_days(missing: &[ThresholdRequirement]) -> Option<u32> {
        missing
            .iter()
            .map(|requirement| match requirement.category {
                RequirementCategory::Tracking => {
                    requirement.required_value.saturating_sub(requirement.current_value)
                }
                RequirementCategory::Habits | RequirementCategory::Customization => 1,
                RequirementCategory::Diversity => 3,
            })
            .max()
    }
}
