use crate::error::Result;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// What the operation guard does when asked to start a second operation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum OverlapPolicy {
    /// Treat the overlap as a programming error and panic
    #[default]
    Panic,
    /// Return `SyncmarkError::OperationInProgress` to the caller
    Reject,
}

/// Application configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub overlap_policy: OverlapPolicy,

    /// Name given to the import/export worker thread
    #[serde(default = "default_worker_thread_name")]
    pub worker_thread_name: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            overlap_policy: OverlapPolicy::default(),
            worker_thread_name: default_worker_thread_name(),
        }
    }
}

fn default_worker_thread_name() -> String {
    "syncmark.import.export".to_string()
}

impl Config {
    /// Default config file location (~/.config/syncmark/config.yml)
    pub fn default_path() -> PathBuf {
        crate::utils::get_config_dir().join("config.yml")
    }

    /// Load configuration from a file path
    pub fn load_from_path(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path)?;
        let config: Config = serde_yaml::from_str(&contents)?;
        Ok(config)
    }

    /// Load configuration from the default location.
    /// Falls back to default config if the file is missing or unreadable.
    pub fn load() -> Self {
        let config_path = Self::default_path();

        if config_path.exists() {
            match Self::load_from_path(&config_path) {
                Ok(config) => config,
                Err(e) => {
                    log::warn!(
                        "Failed to load config from {:?}: {}. Using default configuration",
                        config_path,
                        e
                    );
                    Self::default()
                }
            }
        } else {
            Self::default()
        }
    }

    /// Save configuration to a file path
    pub fn save_to_path(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }

        let yaml = serde_yaml::to_string(self)?;
        fs::write(path, yaml)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::SyncmarkError;
    use rstest::rstest;
    use tempfile::NamedTempFile;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.overlap_policy, OverlapPolicy::Panic);
        assert_eq!(config.worker_thread_name, "syncmark.import.export");
    }

    #[test]
    fn test_save_and_load() {
        let temp_file = NamedTempFile::new().unwrap();
        let config_path = temp_file.path();

        let original = Config {
            overlap_policy: OverlapPolicy::Reject,
            worker_thread_name: "custom.worker".to_string(),
        };

        original.save_to_path(config_path).unwrap();
        let loaded = Config::load_from_path(config_path).unwrap();

        assert_eq!(original, loaded);
    }

    #[test]
    fn test_save_creates_parent_dirs() {
        let temp_dir = tempfile::tempdir().unwrap();
        let config_path = temp_dir.path().join("nested/dir/config.yml");

        Config::default().save_to_path(&config_path).unwrap();
        assert!(config_path.exists());
    }

    #[test]
    fn test_load_invalid_yaml() {
        let temp_file = NamedTempFile::new().unwrap();
        let config_path = temp_file.path();

        fs::write(config_path, "invalid: yaml: content:").unwrap();

        let result = Config::load_from_path(config_path);
        assert!(matches!(result, Err(SyncmarkError::Yaml(_))));
    }

    #[rstest]
    #[case("# Empty config\n", OverlapPolicy::Panic)]
    #[case("overlap_policy: reject\n", OverlapPolicy::Reject)]
    #[case("overlap_policy: panic\n", OverlapPolicy::Panic)]
    fn test_load_partial_config(#[case] yaml: &str, #[case] expected: OverlapPolicy) {
        let temp_file = NamedTempFile::new().unwrap();
        let config_path = temp_file.path();

        fs::write(config_path, yaml).unwrap();

        let config = Config::load_from_path(config_path).unwrap();
        assert_eq!(config.overlap_policy, expected);
        assert_eq!(config.worker_thread_name, default_worker_thread_name());
    }

    #[test]
    fn test_load_unknown_policy() {
        let temp_file = NamedTempFile::new().unwrap();
        fs::write(temp_file.path(), "overlap_policy: queue\n").unwrap();

        assert!(Config::load_from_path(temp_file.path()).is_err());
    }
}
