//! Configuration management for taskctl
//!
//! The backend base URL is resolved once at startup with flag/env taking
//! precedence over the config file, which takes precedence over the default.
//! There are no alternate-host fallbacks anywhere below this layer: whatever
//! URL is resolved here is the only one the client will ever talk to.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::error::{ConfigError, Result};

/// Default backend base URL for local development setups
pub const DEFAULT_API_URL: &str = "http://localhost:8000";

/// Application configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// Backend base URL
    #[serde(skip_serializing_if = "Option::is_none")]
    pub api_url: Option<String>,

    /// Current chat thread handle, assigned by the backend on the first
    /// message and carried across invocations
    #[serde(skip_serializing_if = "Option::is_none")]
    pub conversation_id: Option<String>,

    /// User preferences
    #[serde(default)]
    pub preferences: Preferences,
}

/// User preferences
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Preferences {
    /// Default output format
    #[serde(skip_serializing_if = "Option::is_none")]
    pub format: Option<String>,
}

impl Config {
    /// Resolve the config file path: the `--config` override or
    /// `~/.taskctl/config.yaml`
    pub fn resolve_path(custom: Option<&str>) -> Result<PathBuf> {
        if let Some(path) = custom {
            return Ok(PathBuf::from(path));
        }

        let home = dirs::home_dir().ok_or(ConfigError::Invalid(
            "Could not determine home directory".to_string(),
        ))?;

        Ok(home.join(".taskctl").join("config.yaml"))
    }

    /// Directory holding the config file; the credential store lives beside it
    pub fn state_dir(custom: Option<&str>) -> Result<PathBuf> {
        let path = Self::resolve_path(custom)?;
        Ok(path
            .parent()
            .map(|p| p.to_path_buf())
            .unwrap_or_else(|| PathBuf::from(".")))
    }

    /// Load configuration, failing if the file does not exist
    pub fn load_at(custom: Option<&str>) -> Result<Self> {
        let path = Self::resolve_path(custom)?;
        if !path.exists() {
            return Err(ConfigError::NotFound.into());
        }

        let contents = std::fs::read_to_string(&path)?;
        let config: Config = serde_yaml::from_str(&contents).map_err(ConfigError::from)?;

        Ok(config)
    }

    /// Load configuration, falling back to defaults when no file exists yet.
    /// Commands that do not strictly need a config file (login, register)
    /// use this so first runs work without a setup step.
    pub fn load_or_default(custom: Option<&str>) -> Self {
        Self::load_at(custom).unwrap_or_default()
    }

    /// Save configuration, creating the parent directory if needed
    pub fn save_at(&self, custom: Option<&str>) -> Result<()> {
        let path = Self::resolve_path(custom)?;

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let contents =
            serde_yaml::to_string(self).map_err(|e| ConfigError::SaveError(e.to_string()))?;

        std::fs::write(&path, contents)?;
        Ok(())
    }

    /// Resolve the backend base URL: explicit override, then config file,
    /// then the default
    pub fn api_url(&self, override_url: Option<&str>) -> String {
        override_url
            .map(str::to_string)
            .or_else(|| self.api_url.clone())
            .unwrap_or_else(|| DEFAULT_API_URL.to_string())
            .trim_end_matches('/')
            .to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert!(config.api_url.is_none());
        assert!(config.conversation_id.is_none());
        assert!(config.preferences.format.is_none());
    }

    #[test]
    fn test_api_url_precedence() {
        let mut config = Config::default();
        assert_eq!(config.api_url(None), DEFAULT_API_URL);

        config.api_url = Some("https://tasks.example.com/".to_string());
        assert_eq!(config.api_url(None), "https://tasks.example.com");

        // Explicit override wins over the config file
        assert_eq!(
            config.api_url(Some("http://127.0.0.1:9000")),
            "http://127.0.0.1:9000"
        );
    }

    #[test]
    fn test_load_at_missing_file_is_not_found() {
        let temp = tempdir().unwrap();
        let path = temp.path().join("missing.yaml");
        let err = Config::load_at(Some(path.to_str().unwrap())).unwrap_err();
        assert!(matches!(
            err,
            crate::error::Error::Config(ConfigError::NotFound)
        ));
    }

    #[test]
    fn test_load_or_default_missing_file() {
        let temp = tempdir().unwrap();
        let path = temp.path().join("missing.yaml");
        let config = Config::load_or_default(Some(path.to_str().unwrap()));
        assert!(config.api_url.is_none());
    }

    #[test]
    fn test_save_and_load_round_trip() {
        let temp = tempdir().unwrap();
        let path = temp.path().join("config.yaml");
        let path_str = path.to_str().unwrap();

        let config = Config {
            api_url: Some("http://10.0.0.5:8000".to_string()),
            conversation_id: Some("conv-1".to_string()),
            preferences: Preferences {
                format: Some("json".to_string()),
            },
        };
        config.save_at(Some(path_str)).unwrap();

        let loaded = Config::load_at(Some(path_str)).unwrap();
        assert_eq!(loaded.api_url.as_deref(), Some("http://10.0.0.5:8000"));
        assert_eq!(loaded.conversation_id.as_deref(), Some("conv-1"));
        assert_eq!(loaded.preferences.format.as_deref(), Some("json"));
    }

    #[test]
    fn test_state_dir_is_config_parent() {
        let temp = tempdir().unwrap();
        let path = temp.path().join("config.yaml");
        let dir = Config::state_dir(Some(path.to_str().unwrap())).unwrap();
        assert_eq!(dir, temp.path());
    }
}
