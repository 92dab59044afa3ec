//! Configuration handling for the TUI

use anyhow::Result;
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;

/// Form and user services used when nothing else is configured
pub const DEFAULT_API_URL: &str = "https://dynamic-form-generator-9rl7.onrender.com";

/// Doctor directory feed used when nothing else is configured
pub const DEFAULT_DIRECTORY_URL: &str =
    "https://srijandubey.github.io/campus-api-mock/SRM-C1-25.json";

/// Environment variable overriding the service base URL
pub const API_URL_ENV: &str = "DYNFORM_API_URL";

/// Environment variable overriding the directory feed URL
pub const DIRECTORY_URL_ENV: &str = "DYNFORM_DIRECTORY_URL";

/// User configuration for the TUI
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
pub struct AppConfig {
    /// Base URL of the form and user services
    pub api_base_url: Option<String>,
    /// URL of the doctor directory feed
    pub directory_url: Option<String>,
    /// Roll number pre-filled on the login screen
    pub identifier: Option<String>,
    /// Name pre-filled on the login screen
    pub user_name: Option<String>,
    /// Service base URL from the environment, never written back to disk
    #[serde(skip)]
    pub(crate) api_url_override: Option<String>,
    /// Directory feed URL from the environment, never written back to disk
    #[serde(skip)]
    pub(crate) directory_url_override: Option<String>,
}

impl AppConfig {
    fn project_dirs() -> Option<ProjectDirs> {
        ProjectDirs::from("io", "dynform", "dynform-tui")
    }

    /// Get the config file path
    fn config_path() -> Option<PathBuf> {
        Self::project_dirs().map(|dirs| dirs.config_dir().join("config.json"))
    }

    /// Directory for the log file
    pub fn log_dir() -> Option<PathBuf> {
        Self::project_dirs().map(|dirs| dirs.data_dir().to_path_buf())
    }

    /// Load configuration from file, then apply environment overrides
    pub fn load() -> Result<Self> {
        let mut config = Self::default();

        if let Some(path) = Self::config_path() {
            if path.exists() {
                let content = fs::read_to_string(&path)?;
                config = serde_json::from_str(&content)?;
            }
        }

        Ok(config.with_env_overrides(|key| std::env::var(key).ok()))
    }

    /// Save configuration to file
    pub fn save(&self) -> Result<()> {
        if let Some(path) = Self::config_path() {
            if let Some(parent) = path.parent() {
                fs::create_dir_all(parent)?;
            }
            let content = serde_json::to_string_pretty(self)?;
            fs::write(&path, content)?;
        }
        Ok(())
    }

    /// Take service URLs from non-empty values of `lookup` for this run only
    pub fn with_env_overrides(mut self, lookup: impl Fn(&str) -> Option<String>) -> Self {
        let non_empty = |key| lookup(key).filter(|v: &String| !v.trim().is_empty());
        self.api_url_override = non_empty(API_URL_ENV);
        self.directory_url_override = non_empty(DIRECTORY_URL_ENV);
        self
    }

    pub fn api_base_url(&self) -> &str {
        self.api_url_override
            .as_deref()
            .or(self.api_base_url.as_deref())
            .unwrap_or(DEFAULT_API_URL)
    }

    pub fn directory_url(&self) -> &str {
        self.directory_url_override
            .as_deref()
            .or(self.directory_url.as_deref())
            .unwrap_or(DEFAULT_DIRECTORY_URL)
    }

    /// Remember the login credentials for the next start
    pub fn remember_login(&mut self, identifier: &str, name: &str) {
        self.identifier = Some(identifier.to_string());
        self.user_name = Some(name.to_string());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_default_config() {
        let config = AppConfig::default();
        assert!(config.api_base_url.is_none());
        assert!(config.directory_url.is_none());
        assert!(config.identifier.is_none());
        assert!(config.user_name.is_none());
        assert_eq!(config.api_base_url(), DEFAULT_API_URL);
        assert_eq!(config.directory_url(), DEFAULT_DIRECTORY_URL);
    }

    #[test]
    fn test_serialization() {
        let config = AppConfig {
            api_base_url: Some("http://localhost:8080".to_string()),
            directory_url: Some("http://localhost:8080/doctors.json".to_string()),
            identifier: Some("RA2211003010001".to_string()),
            user_name: Some("Ann".to_string()),
            ..Default::default()
        };

        let json = serde_json::to_string(&config).unwrap();
        let parsed: AppConfig = serde_json::from_str(&json).unwrap();

        assert_eq!(parsed, config);
        assert_eq!(parsed.api_base_url(), "http://localhost:8080");
    }

    #[test]
    fn test_deserialize_from_empty_json() {
        let parsed: AppConfig = serde_json::from_str("{}").unwrap();
        assert_eq!(parsed, AppConfig::default());
    }

    #[test]
    fn test_deserialize_with_extra_fields() {
        let json = r#"{"identifier": "RA1", "theme": "dark"}"#;
        let parsed: AppConfig = serde_json::from_str(json).unwrap();
        assert_eq!(parsed.identifier, Some("RA1".to_string()));
    }

    #[test]
    fn test_env_overrides_replace_urls() {
        let config = AppConfig {
            api_base_url: Some("http://from-file".to_string()),
            ..Default::default()
        }
        .with_env_overrides(|key| match key {
            API_URL_ENV => Some("http://from-env".to_string()),
            DIRECTORY_URL_ENV => Some("http://feed-env".to_string()),
            _ => None,
        });

        assert_eq!(config.api_base_url(), "http://from-env");
        assert_eq!(config.directory_url(), "http://feed-env");
    }

    #[test]
    fn test_blank_env_values_are_ignored() {
        let config = AppConfig {
            api_base_url: Some("http://from-file".to_string()),
            ..Default::default()
        }
        .with_env_overrides(|_| Some("  ".to_string()));

        assert_eq!(config.api_base_url(), "http://from-file");
        assert_eq!(config.directory_url(), DEFAULT_DIRECTORY_URL);
    }

    #[test]
    fn test_remember_login() {
        let mut config = AppConfig::default();
        config.remember_login("RA1", "Ann");
        assert_eq!(config.identifier.as_deref(), Some("RA1"));
        assert_eq!(config.user_name.as_deref(), Some("Ann"));
    }

    #[test]
    fn test_saved_login_keeps_env_urls_out_of_file() {
        let mut config = AppConfig {
            directory_url: Some("http://feed-file".to_string()),
            ..Default::default()
        }
        .with_env_overrides(|key| match key {
            API_URL_ENV => Some("http://localhost:9999".to_string()),
            DIRECTORY_URL_ENV => Some("http://feed-env".to_string()),
            _ => None,
        });
        config.remember_login("RA1", "Ann");

        let saved = serde_json::to_value(&config).unwrap();
        assert_eq!(
            saved,
            serde_json::json!({
                "api_base_url": null,
                "directory_url": "http://feed-file",
                "identifier": "RA1",
                "user_name": "Ann",
            })
        );
        assert_eq!(config.api_base_url(), "http://localhost:9999");
        assert_eq!(config.directory_url(), "http://feed-env");
    }

    #[test]
    fn test_config_path_is_under_app_dir() {
        if let Some(path) = AppConfig::config_path() {
            assert!(path.ends_with("config.json"));
            assert!(path.to_string_lossy().contains("dynform-tui"));
        }
    }
}
