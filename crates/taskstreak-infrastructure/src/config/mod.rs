//! Application configuration.
//!
//! Settings live in a JSON file (`taskstreak.json` under the platform config
//! directory unless a path is given). The service-account credential blob is
//! a secret and is never read from that file: it comes from the
//! `TASKSTREAK_CREDENTIALS` environment variable or from `credentials_path`.

mod timeouts;

pub use timeouts::TimeoutConfig;

use anyhow::{bail, Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use taskstreak_domain::activity::{StreakPolicy, DEFAULT_HEATMAP_WEEKS};
use tracing::info;

/// Environment variable carrying the service-account JSON blob.
pub const CREDENTIALS_ENV: &str = "TASKSTREAK_CREDENTIALS";

const CONFIG_FILE_NAME: &str = "taskstreak.json";
const APP_DIR_NAME: &str = "taskstreak";

/// Log level configuration
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Error,
    Warn,
    #[default]
    Info,
    Debug,
    Trace,
}

impl LogLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            LogLevel::Error => "error",
            LogLevel::Warn => "warn",
            LogLevel::Info => "info",
            LogLevel::Debug => "debug",
            LogLevel::Trace => "trace",
        }
    }
}

/// Which `TaskRepository` implementation backs the service.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum StoreBackend {
    #[default]
    Firestore,
    Sqlite,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct FirestoreSettings {
    /// Falls back to the `project_id` inside the credential blob.
    pub project_id: Option<String>,
    pub collection: String,
    pub base_url: String,
    /// Talk to a local emulator: no token exchange, fixed `owner` bearer.
    pub emulator: bool,
    pub credentials_path: Option<PathBuf>,
}

impl Default for FirestoreSettings {
    fn default() -> Self {
        Self {
            project_id: None,
            collection: "tasks".to_string(),
            base_url: "https://firestore.googleapis.com".to_string(),
            emulator: false,
            credentials_path: None,
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct SqliteSettings {
    /// Defaults to `taskstreak.db` in the platform data directory.
    pub path: Option<PathBuf>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct AppConfig {
    pub bind_address: String,
    pub store: StoreBackend,
    pub firestore: FirestoreSettings,
    pub sqlite: SqliteSettings,
    /// Fixed offset used for every "today" in the system.
    pub utc_offset_minutes: i32,
    pub streak_policy: StreakPolicy,
    pub heatmap_weeks: u32,
    pub log_level: LogLevel,
    pub log_dir: Option<PathBuf>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            bind_address: "127.0.0.1:8080".to_string(),
            store: StoreBackend::default(),
            firestore: FirestoreSettings::default(),
            sqlite: SqliteSettings::default(),
            utc_offset_minutes: 0,
            streak_policy: StreakPolicy::default(),
            heatmap_weeks: DEFAULT_HEATMAP_WEEKS,
            log_level: LogLevel::default(),
            log_dir: None,
        }
    }
}

impl AppConfig {
    /// Default config file location.
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join(APP_DIR_NAME).join(CONFIG_FILE_NAME))
    }

    /// Load from `path`, or from the default location.
    ///
    /// A missing file yields the defaults; a malformed one is an error.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let path = match path {
            Some(p) => Some(p.to_path_buf()),
            None => Self::default_path(),
        };

        let config = match path {
            Some(ref p) if p.exists() => {
                let content = std::fs::read_to_string(p)
                    .with_context(|| format!("Failed to read config file {}", p.display()))?;
                let config: AppConfig = serde_json::from_str(&content)
                    .with_context(|| format!("Failed to parse config file {}", p.display()))?;
                info!("📁 Config loaded from: {}", p.display());
                config
            }
            _ => {
                info!("📁 No config file found, using defaults");
                AppConfig::default()
            }
        };

        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if self.heatmap_weeks == 0 || self.heatmap_weeks > 104 {
            bail!("heatmap_weeks must be between 1 and 104");
        }
        if self.utc_offset_minutes.abs() >= 24 * 60 {
            bail!("utc_offset_minutes must be within ±1439");
        }
        if self.firestore.collection.trim().is_empty() {
            bail!("firestore.collection cannot be empty");
        }
        self.bind_address
            .parse::<std::net::SocketAddr>()
            .with_context(|| format!("Invalid bind_address '{}'", self.bind_address))?;
        Ok(())
    }

    /// SQLite database file, resolved against the platform data directory.
    pub fn sqlite_path(&self) -> Result<PathBuf> {
        if let Some(path) = &self.sqlite.path {
            return Ok(path.clone());
        }
        let data_dir = dirs::data_dir().context("Failed to resolve data directory")?;
        Ok(data_dir.join(APP_DIR_NAME).join("taskstreak.db"))
    }

    /// Log directory, resolved against the platform data directory.
    pub fn log_dir(&self) -> Result<PathBuf> {
        if let Some(dir) = &self.log_dir {
            return Ok(dir.clone());
        }
        let data_dir = dirs::data_dir().context("Failed to resolve data directory")?;
        Ok(data_dir.join(APP_DIR_NAME).join("logs"))
    }

    /// Read the credential blob from the environment, then from
    /// `firestore.credentials_path`.
    pub fn credentials_blob(&self) -> Result<Option<String>> {
        self.credentials_blob_from(std::env::var(CREDENTIALS_ENV).ok())
    }

    pub fn credentials_blob_from(&self, env_value: Option<String>) -> Result<Option<String>> {
        if let Some(blob) = env_value.filter(|v| !v.trim().is_empty()) {
            return Ok(Some(blob));
        }

        match &self.firestore.credentials_path {
            Some(path) => {
                let blob = std::fs::read_to_string(path).with_context(|| {
                    format!("Failed to read credentials file {}", path.display())
                })?;
                Ok(Some(blob))
            }
            None => Ok(None),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_defaults_are_valid() {
        let config = AppConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.store, StoreBackend::Firestore);
        assert_eq!(config.streak_policy, StreakPolicy::GraceDay);
        assert_eq!(config.firestore.collection, "tasks");
    }

    #[test]
    fn test_missing_file_yields_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = AppConfig::load(Some(&dir.path().join("absent.json"))).unwrap();
        assert_eq!(config, AppConfig::default());
    }

    #[test]
    fn test_partial_file_merges_with_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("taskstreak.json");
        let mut file = std::fs::File::create(&path).unwrap();
        write!(
            file,
            r#"{{ "store": "sqlite", "streak_policy": "strict", "utc_offset_minutes": 330,
                 "firestore": {{ "project_id": "task-tracker-app" }} }}"#
        )
        .unwrap();

        let config = AppConfig::load(Some(&path)).unwrap();

        assert_eq!(config.store, StoreBackend::Sqlite);
        assert_eq!(config.streak_policy, StreakPolicy::Strict);
        assert_eq!(config.utc_offset_minutes, 330);
        assert_eq!(config.firestore.project_id.as_deref(), Some("task-tracker-app"));
        assert_eq!(config.firestore.collection, "tasks");
        assert_eq!(config.bind_address, "127.0.0.1:8080");
    }

    #[test]
    fn test_malformed_file_is_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("taskstreak.json");
        std::fs::write(&path, "{ not json").unwrap();

        assert!(AppConfig::load(Some(&path)).is_err());
    }

    #[test]
    fn test_validation_rejects_bad_values() {
        let mut config = AppConfig::default();
        config.heatmap_weeks = 0;
        assert!(config.validate().is_err());

        let mut config = AppConfig::default();
        config.utc_offset_minutes = 24 * 60;
        assert!(config.validate().is_err());

        let mut config = AppConfig::default();
        config.bind_address = "not an address".to_string();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_credentials_prefer_environment() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("key.json");
        std::fs::write(&path, "{\"from\":\"file\"}").unwrap();

        let mut config = AppConfig::default();
        config.firestore.credentials_path = Some(path);

        let blob = config
            .credentials_blob_from(Some("{\"from\":\"env\"}".to_string()))
            .unwrap();
        assert_eq!(blob.as_deref(), Some("{\"from\":\"env\"}"));

        let blob = config.credentials_blob_from(None).unwrap();
        assert_eq!(blob.as_deref(), Some("{\"from\":\"file\"}"));
    }

    #[test]
    fn test_no_credentials_configured() {
        let config = AppConfig::default();
        assert_eq!(config.credentials_blob_from(None).unwrap(), None);
    }
}
