//! PersonalityProfile aggregate and analysis metadata.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::confidence::ConfidenceLevel;
use super::trait_scores::TraitScores;
use crate::domain::foundation::{PersonalityTrait, Timestamp, UserId};

/// Fixed schema/algorithm version recorded in every profile.
///
/// Bump when the scoring contract changes (weights normalization,
/// instability heuristic, confidence bands).
pub const ANALYSIS_VERSION: &str = "1.0";

/// Days a profile stays fresh before a re-analysis is due.
pub const PROFILE_VALIDITY_DAYS: i64 = 7;

/// Unique identifier for a personality profile.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ProfileId(Uuid);

impl ProfileId {
    /// Creates a new random profile ID.
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Creates a ProfileId from an existing UUID.
    pub fn from_uuid(uuid: Uuid) -> Self {
        Self(uuid)
    }

    /// Returns the inner UUID.
    pub fn as_uuid(&self) -> Uuid {
        self.0
    }
}

impl Default for ProfileId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for ProfileId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// How and when a profile was produced.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisMetadata {
    pub analysis_date: Timestamp,
    pub data_points_analyzed: u32,
    pub time_range_days: u32,
    pub version: String,
}

impl AnalysisMetadata {
    /// Creates metadata stamped with the current algorithm version.
    pub fn new(analysis_date: Timestamp, data_points_analyzed: u32, time_range_days: u32) -> Self {
        Self {
            analysis_date,
            data_points_analyzed,
            time_range_days,
            version: ANALYSIS_VERSION.to_string(),
        }
    }
}

/// A persisted personality analysis result.
///
/// Immutable once created; newer analyses supersede rather than mutate,
/// and the "latest" profile for a user is the one with the greatest
/// analysis date.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PersonalityProfile {
    id: ProfileId,
    user_id: UserId,
    trait_scores: TraitScores,
    dominant_trait: PersonalityTrait,
    confidence: ConfidenceLevel,
    metadata: AnalysisMetadata,
}

impl PersonalityProfile {
    /// Creates a fresh profile with a new id.
    ///
    /// The dominant trait is derived from the scores here so a stored
    /// profile can never disagree with its own score map.
    pub fn new(
        user_id: UserId,
        trait_scores: TraitScores,
        confidence: ConfidenceLevel,
        metadata: AnalysisMetadata,
    ) -> Self {
        Self {
            id: ProfileId::new(),
            user_id,
            dominant_trait: trait_scores.dominant(),
            trait_scores,
            confidence,
            metadata,
        }
    }

    pub fn id(&self) -> ProfileId {
        self.id
    }

    pub fn user_id(&self) -> &UserId {
        &self.user_id
    }

    pub fn trait_scores(&self) -> &TraitScores {
        &self.trait_scores
    }

    pub fn dominant_trait(&self) -> PersonalityTrait {
        self.dominant_trait
    }

    pub fn confidence(&self) -> ConfidenceLevel {
        self.confidence
    }

    pub fn metadata(&self) -> &AnalysisMetadata {
        &self.metadata
    }

    pub fn analysis_date(&self) -> Timestamp {
        self.metadata.analysis_date
    }

    /// Whether this profile is past its validity period at `now`.
    pub fn is_stale(&self, now: Timestamp) -> bool {
        now.duration_since(&self.metadata.analysis_date).num_days() > PROFILE_VALIDITY_DAYS
    }
}
