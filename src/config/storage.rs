//! Storage configuration

use serde::Deserialize;
use std::path::PathBuf;

use super::error::ValidationError;

/// Which analysis store implementation to wire up
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StorageBackend {
    /// Keep profiles and preferences in process memory
    Memory,
    /// Persist profiles and preferences as YAML files
    File,
}

/// Analysis store configuration
#[derive(Debug, Clone, Deserialize)]
pub struct StorageConfig {
    /// Store implementation backing profiles and preferences
    #[serde(default = "default_backend")]
    pub backend: StorageBackend,

    /// Root directory for profiles, preferences, and migration markers
    #[serde(default = "default_root_dir")]
    pub root_dir: PathBuf,
}

impl StorageConfig {
    /// Validate storage configuration
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.backend == StorageBackend::File && self.root_dir.as_os_str().is_empty() {
            return Err(ValidationError::InvalidStorageRoot);
        }
        Ok(())
    }
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            backend: default_backend(),
            root_dir: default_root_dir(),
        }
    }
}

fn default_backend() -> StorageBackend {
    StorageBackend::File
}

fn default_root_dir() -> PathBuf {
    PathBuf::from("./data")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_storage_defaults() {
        let config = StorageConfig::default();
        assert_eq!(config.backend, StorageBackend::File);
        assert_eq!(config.root_dir, PathBuf::from("./data"));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_file_backend_rejects_an_empty_root() {
        let config = StorageConfig {
            backend: StorageBackend::File,
            root_dir: PathBuf::new(),
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_memory_backend_needs_no_root() {
        let config = StorageConfig {
            backend: StorageBackend::Memory,
            root_dir: PathBuf::new(),
        };
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_backend_deserializes_from_snake_case() {
        let json = r#"{"backend": "memory"}"#;

        let config: StorageConfig = serde_json::from_str(json).unwrap();
        assert_eq!(config.backend, StorageBackend::Memory);
        assert_eq!(config.root_dir, PathBuf::from("./data"));
    }
}
