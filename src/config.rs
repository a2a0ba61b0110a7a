//! Configuration management and validation.
//!
//! Settings are layered: defaults, then an optional JSON config file, then
//! environment variables, then command-line flags (applied by the CLI).

use serde::{Deserialize, Deserializer, Serialize};
use std::path::{Path, PathBuf};
use tracing::debug;

use crate::app::models::TimeWindow;
use crate::constants::{DEFAULT_LOG_LEVEL, ENV_EXPORT_DIR, ENV_LOG_LEVEL, ENV_STORE_PATH};
use crate::{Error, Result};

const APP_DIR: &str = "charge-ledger";

const VALID_LOG_LEVELS: &[&str] = &["trace", "debug", "info", "warn", "error"];

/// Global configuration for the ledger
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LedgerConfig {
    /// JSON document holding both record collections
    pub store_path: PathBuf,

    /// Directory exports are written to
    pub export_dir: PathBuf,

    pub log_level: String,

    /// Window used by `summary` when none is given
    ///
    /// Accepts the same spellings as `--window` (`last-month`, `lastMonth`, ...).
    #[serde(deserialize_with = "deserialize_window")]
    pub default_window: TimeWindow,

    /// Try the XLSX workbook before falling back to CSV
    pub prefer_workbook: bool,
}

fn deserialize_window<'de, D>(deserializer: D) -> std::result::Result<TimeWindow, D::Error>
where
    D: Deserializer<'de>,
{
    let name = String::deserialize(deserializer)?;
    name.parse().map_err(serde::de::Error::custom)
}

impl Default for LedgerConfig {
    fn default() -> Self {
        let store_path = dirs::data_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(APP_DIR)
            .join("ledger.json");

        Self {
            store_path,
            export_dir: PathBuf::from("."),
            log_level: DEFAULT_LOG_LEVEL.to_string(),
            default_window: TimeWindow::Month,
            prefer_workbook: true,
        }
    }
}

impl LedgerConfig {
    /// `<config dir>/charge-ledger/config.json`
    pub fn default_config_path() -> Result<PathBuf> {
        dirs::config_dir()
            .map(|dir| dir.join(APP_DIR).join("config.json"))
            .ok_or_else(|| Error::configuration("Could not determine the user config directory"))
    }

    /// Load a config file; fields it leaves out keep their defaults
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| Error::file_read(path.display().to_string(), e))?;
        let config: Self = serde_json::from_str(&content).map_err(|e| {
            Error::serialization(format!("Invalid config file {}", path.display()), e)
        })?;
        debug!("Loaded config from {}", path.display());
        Ok(config)
    }

    /// Apply `CHARGE_LEDGER_*` environment overrides
    pub fn apply_env(&mut self) {
        self.apply_env_from(|key| std::env::var(key).ok());
    }

    pub(crate) fn apply_env_from<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(path) = lookup(ENV_STORE_PATH).filter(|value| !value.is_empty()) {
            debug!("{} overrides store path", ENV_STORE_PATH);
            self.store_path = PathBuf::from(path);
        }
        if let Some(dir) = lookup(ENV_EXPORT_DIR).filter(|value| !value.is_empty()) {
            debug!("{} overrides export dir", ENV_EXPORT_DIR);
            self.export_dir = PathBuf::from(dir);
        }
        if let Some(level) = lookup(ENV_LOG_LEVEL).filter(|value| !value.is_empty()) {
            self.log_level = level.to_lowercase();
        }
    }

    pub fn validate(&self) -> Result<()> {
        if self.store_path.as_os_str().is_empty() {
            return Err(Error::configuration("Store path must not be empty"));
        }
        if self.store_path.is_dir() {
            return Err(Error::configuration(format!(
                "Store path {} is a directory, expected a file",
                self.store_path.display()
            )));
        }
        if self.export_dir.exists() && !self.export_dir.is_dir() {
            return Err(Error::configuration(format!(
                "Export path {} is not a directory",
                self.export_dir.display()
            )));
        }
        if !VALID_LOG_LEVELS.contains(&self.log_level.as_str()) {
            return Err(Error::configuration(format!(
                "Invalid log level '{}': expected one of {}",
                self.log_level,
                VALID_LOG_LEVELS.join(", ")
            )));
        }
        Ok(())
    }

    pub fn with_store_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.store_path = path.into();
        self
    }

    pub fn with_export_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.export_dir = dir.into();
        self
    }

    pub fn with_default_window(mut self, window: TimeWindow) -> Self {
        self.default_window = window;
        self
    }

    pub fn with_log_level(mut self, level: impl Into<String>) -> Self {
        self.log_level = level.into();
        self
    }

    /// Always export as CSV
    pub fn without_workbook(mut self) -> Self {
        self.prefer_workbook = false;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_defaults() {
        let config = LedgerConfig::default();
        assert!(config.store_path.ends_with("charge-ledger/ledger.json"));
        assert_eq!(config.log_level, "info");
        assert_eq!(config.default_window, TimeWindow::Month);
        assert!(config.prefer_workbook);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_builders() {
        let config = LedgerConfig::default()
            .with_store_path("/tmp/ledger.json")
            .with_export_dir("/tmp")
            .with_default_window(TimeWindow::Year)
            .with_log_level("debug")
            .without_workbook();

        assert_eq!(config.store_path, PathBuf::from("/tmp/ledger.json"));
        assert_eq!(config.export_dir, PathBuf::from("/tmp"));
        assert_eq!(config.default_window, TimeWindow::Year);
        assert_eq!(config.log_level, "debug");
        assert!(!config.prefer_workbook);
    }

    #[test]
    fn test_partial_file_keeps_defaults() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.json");
        std::fs::write(&path, r#"{"default_window": "lastYear", "prefer_workbook": false}"#).unwrap();

        let config = LedgerConfig::from_file(&path).unwrap();
        assert_eq!(config.default_window, TimeWindow::LastYear);
        assert!(!config.prefer_workbook);
        assert_eq!(config.log_level, "info");
    }

    #[test]
    fn test_window_uses_cli_spellings() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.json");

        std::fs::write(&path, r#"{"default_window": "last-month"}"#).unwrap();
        let config = LedgerConfig::from_file(&path).unwrap();
        assert_eq!(config.default_window, TimeWindow::LastMonth);

        std::fs::write(&path, r#"{"default_window": "decade"}"#).unwrap();
        assert!(matches!(
            LedgerConfig::from_file(&path),
            Err(Error::Serialization { .. })
        ));
    }

    #[test]
    fn test_invalid_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.json");
        std::fs::write(&path, "not json").unwrap();

        assert!(matches!(
            LedgerConfig::from_file(&path),
            Err(Error::Serialization { .. })
        ));
        assert!(matches!(
            LedgerConfig::from_file(&dir.path().join("missing.json")),
            Err(Error::FileRead { .. })
        ));
    }

    #[test]
    fn test_env_overrides() {
        let mut config = LedgerConfig::default();
        config.apply_env_from(|key| match key {
            ENV_STORE_PATH => Some("/data/ledger.json".to_string()),
            ENV_LOG_LEVEL => Some("DEBUG".to_string()),
            ENV_EXPORT_DIR => Some(String::new()),
            _ => None,
        });

        assert_eq!(config.store_path, PathBuf::from("/data/ledger.json"));
        assert_eq!(config.log_level, "debug");
        assert_eq!(config.export_dir, PathBuf::from("."));
    }

    #[test]
    fn test_validate_rejects_bad_values() {
        let dir = TempDir::new().unwrap();

        let store_is_dir = LedgerConfig::default().with_store_path(dir.path());
        assert!(store_is_dir.validate().is_err());

        let bad_level = LedgerConfig::default()
            .with_store_path(dir.path().join("ledger.json"))
            .with_log_level("loud");
        assert!(matches!(bad_level.validate(), Err(Error::Configuration { .. })));
    }
}
