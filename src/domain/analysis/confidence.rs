//! Confidence estimation from data volume.

use serde::{Deserialize, Serialize};

/// Coarse reliability label for a personality profile.
///
/// A step function of the data points analyzed; the analysis time
/// range is carried in profile metadata for display but does not move
/// the bucket.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ConfidenceLevel {
    /// Fewer than 30 data points.
    Low,
    /// 30 to 74 data points.
    Medium,
    /// 75 to 149 data points.
    High,
    /// 150 or more data points.
    VeryHigh,
}

impl ConfidenceLevel {
    /// Calculates confidence from the number of data points analyzed.
    pub fn from_data_points(count: u32) -> Self {
        match count {
            0..=29 => Self::Low,
            30..=74 => Self::Medium,
            75..=149 => Self::High,
            _ => Self::VeryHigh,
        }
    }

    /// Minimum data points for this confidence level.
    pub fn min_data_points(&self) -> u32 {
        match self {
            Self::Low => 0,
            Self::Medium => 30,
            Self::High => 75,
            Self::VeryHigh => 150,
        }
    }
}

impl std::fmt::Display for ConfidenceLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Low => write!(f, "Low"),
            Self::Medium => write!(f, "Medium"),
            Self::High => write!(f, "High"),
            Self::VeryHigh => write!(f, "Very High"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn confidence_buckets_by_data_points() {
        assert_eq!(ConfidenceLevel::from_data_points(0), ConfidenceLevel::Low);
        assert_eq!(ConfidenceLevel::from_data_points(29), ConfidenceLevel::Low);
        assert_eq!(ConfidenceLevel::from_data_points(30), ConfidenceLevel::Medium);
        assert_eq!(ConfidenceLevel::from_data_points(74), ConfidenceLevel::Medium);
        assert_eq!(ConfidenceLevel::from_data_points(75), ConfidenceLevel::High);
    }

    #[test]
    fn confidence_149_is_high_and_150_is_very_high() {
        assert_eq!(ConfidenceLevel::from_data_points(149), ConfidenceLevel::High);
        assert_eq!(ConfidenceLevel::from_data_points(150), ConfidenceLevel::VeryHigh);
    }

    #[test]
    fn min_data_points_matches_bucket_edges() {
        for level in [
            ConfidenceLevel::Low,
            ConfidenceLevel::Medium,
            ConfidenceLevel::High,
            ConfidenceLevel::VeryHigh,
        ] {
            assert_eq!(ConfidenceLevel::from_data_points(level.min_data_points()), level);
        }
    }

    #[test]
    fn confidence_serializes_to_snake_case() {
        let json = serde_json::to_string(&ConfidenceLevel::VeryHigh).unwrap();
        assert_eq!(json, "\"very_high\"");
    }
}
