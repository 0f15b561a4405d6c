use crate::error::{Result, RetentionError};
use crate::model::DEFAULT_STORAGE_KEY;
use directories::ProjectDirs;
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

const CONFIG_FILENAME: &str = "config.json";
pub const HOME_ENV: &str = "EXTRACTPICS_HOME";

/// Configuration for the file-backed store, kept in `<data dir>/config.json`.
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
pub struct RetentionConfig {
    /// Key (file stem) the retention record is stored under
    #[serde(default = "default_storage_key")]
    pub storage_key: String,

    /// Write the record as indented JSON
    #[serde(default = "default_pretty_json")]
    pub pretty_json: bool,
}

fn default_storage_key() -> String {
    DEFAULT_STORAGE_KEY.to_string()
}

fn default_pretty_json() -> bool {
    true
}

impl Default for RetentionConfig {
    fn default() -> Self {
        Self {
            storage_key: default_storage_key(),
            pretty_json: default_pretty_json(),
        }
    }
}

impl RetentionConfig {
    /// Load config from the given directory, or return defaults if not found
    pub fn load<P: AsRef<Path>>(config_dir: P) -> Result<Self> {
        let config_path = config_dir.as_ref().join(CONFIG_FILENAME);

        if !config_path.exists() {
            return Ok(Self::default());
        }

        let content = fs::read_to_string(&config_path).map_err(RetentionError::Io)?;
        let config: RetentionConfig =
            serde_json::from_str(&content).map_err(RetentionError::Serialization)?;
        Ok(config)
    }
}

/// `$EXTRACTPICS_HOME` if set, otherwise the platform data directory.
pub fn data_dir() -> Result<PathBuf> {
    if let Some(home) = std::env::var_os(HOME_ENV).filter(|v| !v.is_empty()) {
        return Ok(PathBuf::from(home));
    }
    let dirs = ProjectDirs::from("com", "extractpics", "extractpics").ok_or_else(|| {
        RetentionError::Storage("Could not determine a data directory".to_string())
    })?;
    Ok(dirs.data_dir().to_path_buf())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = RetentionConfig::default();
        assert_eq!(config.storage_key, DEFAULT_STORAGE_KEY);
        assert!(config.pretty_json);
    }

    #[test]
    fn test_load_missing_config() {
        let dir = tempfile::tempdir().unwrap();
        let config = RetentionConfig::load(dir.path()).unwrap();
        assert_eq!(config, RetentionConfig::default());
    }

    #[test]
    fn test_load_written_config() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(
            dir.path().join(CONFIG_FILENAME),
            r#"{"storage_key": "staging_retention", "pretty_json": false}"#,
        )
        .unwrap();

        let config = RetentionConfig::load(dir.path()).unwrap();
        assert_eq!(config.storage_key, "staging_retention");
        assert!(!config.pretty_json);
    }

    #[test]
    fn test_partial_config_uses_defaults() {
        let config: RetentionConfig = serde_json::from_str(r#"{"pretty_json": false}"#).unwrap();
        assert_eq!(config.storage_key, DEFAULT_STORAGE_KEY);
        assert!(!config.pretty_json);
    }

    #[test]
    fn test_malformed_config_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join(CONFIG_FILENAME), "{").unwrap();
        assert!(matches!(
            RetentionConfig::load(dir.path()),
            Err(RetentionError::Serialization(_))
        ));
    }
}
