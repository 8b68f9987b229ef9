//! Feature flags configuration

use serde::Deserialize;

/// Feature flags for enabling/disabling functionality
#[derive(Debug, Clone, Deserialize)]
pub struct FeatureFlags {
    /// Run the background scheduling cadence
    #[serde(default = "default_enable_scheduling")]
    pub enable_scheduling: bool,

    /// Show detailed error messages (disable in production!)
    #[serde(default)]
    pub verbose_errors: bool,
}

fn default_enable_scheduling() -> bool {
    true
}

impl Default for FeatureFlags {
    fn default() -> Self {
        Self {
            enable_scheduling: default_enable_scheduling(),
            verbose_errors: false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_feature_flag_defaults() {
        let flags = FeatureFlags::default();
        assert!(flags.enable_scheduling);
        assert!(!flags.verbose_errors);
    }

    #[test]
    fn test_feature_flags_deserialization() {
        let json = r#"{
            "enable_scheduling": false,
            "verbose_errors": true
        }"#;

        let flags: FeatureFlags = serde_json::from_str(json).unwrap();
        assert!(!flags.enable_scheduling);
        assert!(flags.verbose_errors);
    }
}
