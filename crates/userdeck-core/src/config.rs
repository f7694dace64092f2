//! Configuration management for userdeck.
//!
//! Loads configuration from ${USERDECK_HOME}/config.toml with sensible defaults.

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::navigation::Route;

/// Returns the default config template with comments.
///
/// This is embedded from default_config.toml at compile time.
fn default_config_template() -> &'static str {
    include_str!("../default_config.toml")
}

pub mod paths {
    //! Path resolution for userdeck configuration and data directories.
    //!
    //! USERDECK_HOME resolution order:
    //! 1. USERDECK_HOME environment variable (if set)
    //! 2. ~/.config/userdeck (default)
    //! 3. ./.userdeck when no home directory can be determined

    use std::path::PathBuf;

    /// Returns the userdeck home directory.
    pub fn userdeck_home() -> PathBuf {
        if let Ok(home) = std::env::var("USERDECK_HOME")
            && !home.trim().is_empty()
        {
            return PathBuf::from(home);
        }

        dirs::home_dir().map_or_else(
            || PathBuf::from(".userdeck"),
            |h| h.join(".config").join("userdeck"),
        )
    }

    /// Returns the path to the config.toml file.
    pub fn config_path() -> PathBuf {
        userdeck_home().join("config.toml")
    }

    /// Returns the directory holding log files.
    pub fn logs_dir() -> PathBuf {
        userdeck_home().join("logs")
    }
}

/// Firebase project settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FirebaseConfig {
    /// Web API key (falls back to `FIREBASE_API_KEY`).
    pub api_key: Option<String>,
    /// Project id (falls back to `FIREBASE_PROJECT_ID`).
    pub project_id: Option<String>,
    /// Firestore database id.
    pub database: String,
    /// Identity Toolkit endpoint override.
    pub auth_base_url: Option<String>,
    /// Firestore endpoint override.
    pub firestore_base_url: Option<String>,
    /// Documents fetched per list page.
    pub page_size: u32,
}

impl FirebaseConfig {
    pub const DEFAULT_DATABASE: &str = "(default)";
    pub const DEFAULT_PAGE_SIZE: u32 = 300;

    pub fn effective_api_key(&self) -> Option<&str> {
        non_empty(self.api_key.as_deref())
    }

    pub fn effective_project_id(&self) -> Option<&str> {
        non_empty(self.project_id.as_deref())
    }

    pub fn effective_auth_base_url(&self) -> Option<&str> {
        non_empty(self.auth_base_url.as_deref())
    }

    pub fn effective_firestore_base_url(&self) -> Option<&str> {
        non_empty(self.firestore_base_url.as_deref())
    }
}

impl Default for FirebaseConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            project_id: None,
            database: Self::DEFAULT_DATABASE.to_string(),
            auth_base_url: None,
            firestore_base_url: None,
            page_size: Self::DEFAULT_PAGE_SIZE,
        }
    }
}

/// Interactive UI settings.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct UiConfig {
    /// Show the last backend error in the footer.
    pub show_errors: bool,
}

/// Logging settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LogConfig {
    /// Filter directive (`RUST_LOG` takes precedence).
    pub level: String,
    /// Log file for the interactive UI.
    pub file: Option<String>,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            file: None,
        }
    }
}

/// Main configuration structure.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Collection managed by the records screen.
    pub collection: String,

    /// Screen shown at startup.
    pub start_screen: Route,

    /// Timeout for each backend request in seconds (0 disables).
    pub request_timeout_secs: u32,

    #[serde(default)]
    pub firebase: FirebaseConfig,

    #[serde(default)]
    pub ui: UiConfig,

    #[serde(default)]
    pub log: LogConfig,
}

impl Config {
    pub const DEFAULT_COLLECTION: &str = "Users";

    /// Loads configuration from the default config path.
    pub fn load() -> Result<Self> {
        Self::load_from(&paths::config_path())
    }

    /// Loads configuration from a specific path.
    /// Returns defaults if file doesn't exist.
    pub fn load_from(path: &Path) -> Result<Self> {
        if path.exists() {
            let contents = fs::read_to_string(path)
                .with_context(|| format!("Failed to read config from {}", path.display()))?;
            toml::from_str(&contents)
                .with_context(|| format!("Failed to parse config from {}", path.display()))
        } else {
            Ok(Config::default())
        }
    }

    /// Creates a default config file at the given path.
    /// Returns an error if the file already exists.
    pub fn init(path: &Path) -> Result<()> {
        if path.exists() {
            anyhow::bail!("Config file already exists at {}", path.display());
        }

        Self::write_config(path, default_config_template())
    }

    pub fn request_timeout(&self) -> Option<Duration> {
        if self.request_timeout_secs == 0 {
            None
        } else {
            Some(Duration::from_secs(u64::from(self.request_timeout_secs)))
        }
    }

    /// Returns the log file used by the interactive UI.
    pub fn log_file(&self) -> PathBuf {
        non_empty(self.log.file.as_deref())
            .map_or_else(|| paths::logs_dir().join("userdeck.log"), PathBuf::from)
    }

    fn write_config(path: &Path, content: &str) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create directory {}", parent.display()))?;
        }

        let tmp_path = path.with_extension("toml.tmp");
        fs::write(&tmp_path, content)
            .with_context(|| format!("Failed to write config to {}", tmp_path.display()))?;
        fs::rename(&tmp_path, path).with_context(|| {
            format!(
                "Failed to rename {} to {}",
                tmp_path.display(),
                path.display()
            )
        })?;

        Ok(())
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            collection: Self::DEFAULT_COLLECTION.to_string(),
            start_screen: Route::default(),
            request_timeout_secs: 0,
            firebase: FirebaseConfig::default(),
            ui: UiConfig::default(),
            log: LogConfig::default(),
        }
    }
}

fn non_empty(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|s| !s.is_empty())
}

#[cfg(test)]
mod tests {
    use tempfile::tempdir;

    use super::*;

    #[test]
    fn test_load_missing_file_returns_defaults() {
        let dir = tempdir().unwrap();
        let config_path = dir.path().join("nonexistent.toml");

        let config = Config::load_from(&config_path).unwrap();
        assert_eq!(config.collection, "Users");
        assert_eq!(config.start_screen, Route::Register);
        assert_eq!(config.firebase.database, "(default)");
        assert!(!config.ui.show_errors);
    }

    #[test]
    fn test_default_template_matches_defaults() {
        let config: Config = toml::from_str(default_config_template()).unwrap();
        let defaults = Config::default();
        assert_eq!(config.collection, defaults.collection);
        assert_eq!(config.start_screen, defaults.start_screen);
        assert_eq!(config.request_timeout_secs, defaults.request_timeout_secs);
        assert_eq!(config.firebase.page_size, defaults.firebase.page_size);
        assert_eq!(config.log.level, defaults.log.level);
    }

    #[test]
    fn test_load_partial_config_merges_defaults() {
        let dir = tempdir().unwrap();
        let config_path = dir.path().join("config.toml");

        fs::write(
            &config_path,
            "start_screen = \"login\"\n[firebase]\nproject_id = \"demo-project\"\n",
        )
        .unwrap();

        let config = Config::load_from(&config_path).unwrap();
        assert_eq!(config.start_screen, Route::Login);
        assert_eq!(config.firebase.effective_project_id(), Some("demo-project"));
        assert_eq!(config.collection, "Users");
        assert_eq!(config.firebase.page_size, 300);
    }

    #[test]
    fn test_invalid_start_screen_fails() {
        let dir = tempdir().unwrap();
        let config_path = dir.path().join("config.toml");
        fs::write(&config_path, "start_screen = \"settings\"\n").unwrap();

        assert!(Config::load_from(&config_path).is_err());
    }

    #[test]
    fn test_init_creates_config_with_defaults() {
        let dir = tempdir().unwrap();
        let config_path = dir.path().join("subdir").join("config.toml");

        Config::init(&config_path).unwrap();

        assert!(config_path.exists());
        let contents = fs::read_to_string(&config_path).unwrap();
        assert!(contents.contains("collection = \"Users\""));
        assert!(contents.contains("# api_key ="));
    }

    #[test]
    fn test_init_fails_if_exists() {
        let dir = tempdir().unwrap();
        let config_path = dir.path().join("config.toml");

        fs::write(&config_path, "").unwrap();

        assert!(Config::init(&config_path).is_err());
    }

    #[test]
    fn test_request_timeout_zero_disables() {
        let config = Config::default();
        assert_eq!(config.request_timeout(), None);

        let config = Config {
            request_timeout_secs: 15,
            ..Default::default()
        };
        assert_eq!(config.request_timeout(), Some(Duration::from_secs(15)));
    }

    #[test]
    fn test_blank_firebase_values_are_unset() {
        let config = Config {
            firebase: FirebaseConfig {
                api_key: Some("   ".to_string()),
                firestore_base_url: Some(String::new()),
                ..Default::default()
            },
            ..Default::default()
        };
        assert_eq!(config.firebase.effective_api_key(), None);
        assert_eq!(config.firebase.effective_firestore_base_url(), None);
    }

    #[test]
    fn test_log_file_override() {
        let config = Config {
            log: LogConfig {
                file: Some("/tmp/userdeck-test.log".to_string()),
                ..Default::default()
            },
            ..Default::default()
        };
        assert_eq!(config.log_file(), PathBuf::from("/tmp/userdeck-test.log"));
    }
}
