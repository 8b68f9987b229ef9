//! Engine-wide error taxonomy.

use thiserror::Error;

use super::eligibility::ThresholdRequirement;

/// Errors surfaced by the personality analysis engine.
#[derive(Debug, Clone, Error)]
pub enum AnalysisError {
    /// The eligibility gate failed; carries the unmet requirements so
    /// callers can render a "needs more data" state.
    #[error("Insufficient data for analysis: {} requirement(s) unmet", missing_requirements.len())]
    InsufficientData {
        missing_requirements: Vec<ThresholdRequirement>,
    },

    /// An underlying data source failed; the collaborator's message is
    /// passed through unchanged.
    #[error("Repository failure: {0}")]
    RepositoryFailure(String),

    /// Preferences could not be serialized on save.
    #[error("Preferences encoding failure: {0}")]
    EncodingFailure(String),

    /// Orchestration-layer catch-all for anything unexpected.
    #[error("Unknown analysis error: {0}")]
    UnknownError(String),
}

impl AnalysisError {
    /// Builds an eligibility failure from the unmet requirements.
    pub fn insufficient_data(missing_requirements: Vec<ThresholdRequirement>) -> Self {
        AnalysisError::InsufficientData {
            missing_requirements,
        }
    }

    /// Wraps a data-source failure.
    pub fn repository(source: impl std::fmt::Display) -> Self {
        AnalysisError::RepositoryFailure(source.to_string())
    }

    /// Wraps a serialization failure.
    pub fn encoding(source: impl std::fmt::Display) -> Self {
        AnalysisError::EncodingFailure(source.to_string())
    }

    /// Wraps anything unexpected.
    pub fn unknown(message: impl Into<String>) -> Self {
        AnalysisError::UnknownError(message.into())
    }

    /// The unmet requirements when this is an eligibility failure.
    pub fn missing_requirements(&self) -> Option<&[ThresholdRequirement]> {
        match self {
            AnalysisError::InsufficientData {
                missing_requirements,
            } => Some(missing_requirements),
            _ => None,
        }
    }
}

impl From<std::io::Error> for AnalysisError {
    fn from(err: std::io::Error) -> Self {
        AnalysisError::repository(err)
    }
}
