//! Configuration management for SentraOp

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::error::{ConfigError, Result};

/// Application configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// Sentra API key
    #[serde(skip_serializing_if = "Option::is_none")]
    pub api_key: Option<String>,

    /// Platform region, e.g. `eu-central-1`
    #[serde(skip_serializing_if = "Option::is_none")]
    pub region: Option<String>,

    /// Custom API host for development/testing
    #[serde(skip_serializing_if = "Option::is_none")]
    pub api_host: Option<String>,

    /// Cached session token
    #[serde(skip_serializing_if = "Option::is_none")]
    pub session: Option<SessionToken>,

    /// User preferences
    #[serde(default)]
    pub preferences: Preferences,
}

/// Session token with expiry
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionToken {
    /// The JWT token string
    pub token: String,

    /// Token expiration time
    pub expires_at: DateTime<Utc>,
}

/// User preferences
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Preferences {
    /// Default output format
    #[serde(skip_serializing_if = "Option::is_none")]
    pub format: Option<String>,

    /// Default page size for API requests
    #[serde(default = "default_page_size")]
    pub page_size: usize,
}

fn default_page_size() -> usize {
    250
}

impl Default for Preferences {
    fn default() -> Self {
        Self {
            format: None,
            page_size: default_page_size(),
        }
    }
}

impl Config {
    /// Get the default config file path
    pub fn default_path() -> Result<PathBuf> {
        let home = dirs::home_dir().ok_or(ConfigError::Invalid(
            "Could not determine home directory".to_string(),
        ))?;

        Ok(home.join(".sentraop").join("config.yaml"))
    }

    /// Resolve the config path from an optional override
    pub fn resolve_path(path: Option<&str>) -> Result<PathBuf> {
        match path {
            Some(path) => Ok(PathBuf::from(path)),
            None => Self::default_path(),
        }
    }

    /// Load configuration from an optional path override
    pub fn load_at(path: Option<&str>) -> Result<Self> {
        let path = Self::resolve_path(path)?;
        if !path.exists() {
            return Err(ConfigError::NotFound.into());
        }

        let contents = std::fs::read_to_string(&path)?;
        let config: Config = serde_yaml::from_str(&contents).map_err(ConfigError::from)?;

        Ok(config)
    }

    /// Save configuration to an optional path override
    pub fn save_at(&self, path: Option<&str>) -> Result<()> {
        let path = Self::resolve_path(path)?;

        // Ensure parent directory exists
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let contents = serde_yaml::to_string(self)
            .map_err(|e| ConfigError::SaveError(e.to_string()))?;

        std::fs::write(&path, contents)?;

        // The file holds the API key; keep it private on Unix systems
        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            let mut perms = std::fs::metadata(&path)?.permissions();
            perms.set_mode(0o600);
            std::fs::set_permissions(&path, perms)?;
        }

        Ok(())
    }

    /// The API host to use: explicit override first, then region, then the
    /// production default (`None` lets the client pick it).
    pub fn resolve_api_host(&self) -> Option<String> {
        if self.api_host.is_some() {
            return self.api_host.clone();
        }
        self.region
            .as_ref()
            .map(|region| format!("https://api.{}.sentra.io", region))
    }

    /// Check if the session token is expired or will expire soon (within 5 minutes)
    pub fn is_token_expired(&self) -> bool {
        match &self.session {
            None => true,
            Some(session) => {
                let now = Utc::now();
                let buffer = chrono::Duration::minutes(5);
                session.expires_at - buffer < now
            }
        }
    }

    /// Validate that required configuration is present
    pub fn validate_auth(&self) -> Result<()> {
        if self.api_key.is_none() {
            return Err(ConfigError::MissingApiKey.into());
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert!(config.api_key.is_none());
        assert!(config.region.is_none());
        assert!(config.session.is_none());
        assert_eq!(config.preferences.page_size, 250);
    }

    #[test]
    fn test_token_expiry() {
        let mut config = Config::default();

        // No token should be expired
        assert!(config.is_token_expired());

        // Token expired in the past
        config.session = Some(SessionToken {
            token: "test".to_string(),
            expires_at: Utc::now() - chrono::Duration::hours(1),
        });
        assert!(config.is_token_expired());

        // Token expires in the future (more than 5 minutes)
        config.session = Some(SessionToken {
            token: "test".to_string(),
            expires_at: Utc::now() + chrono::Duration::hours(1),
        });
        assert!(!config.is_token_expired());

        // Token expires soon (less than 5 minutes)
        config.session = Some(SessionToken {
            token: "test".to_string(),
            expires_at: Utc::now() + chrono::Duration::minutes(2),
        });
        assert!(config.is_token_expired());
    }

    #[test]
    fn test_resolve_api_host_precedence() {
        let mut config = Config::default();
        assert_eq!(config.resolve_api_host(), None);

        config.region = Some("eu-central-1".to_string());
        assert_eq!(
            config.resolve_api_host().as_deref(),
            Some("https://api.eu-central-1.sentra.io")
        );

        config.api_host = Some("http://localhost:8080".to_string());
        assert_eq!(
            config.resolve_api_host().as_deref(),
            Some("http://localhost:8080")
        );
    }

    #[test]
    fn test_save_and_load_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.yaml");
        let path_str = path.to_string_lossy().to_string();

        let config = Config {
            api_key: Some("key-123".to_string()),
            region: Some("us-east-1".to_string()),
            ..Config::default()
        };
        config.save_at(Some(&path_str)).unwrap();

        let loaded = Config::load_at(Some(&path_str)).unwrap();
        assert_eq!(loaded.api_key.as_deref(), Some("key-123"));
        assert_eq!(loaded.region.as_deref(), Some("us-east-1"));

        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            let mode = std::fs::metadata(&path).unwrap().permissions().mode();
            assert_eq!(mode & 0o777, 0o600);
        }
    }

    #[test]
    fn test_load_missing_file_is_not_found() {
        let err = Config::load_at(Some("/nonexistent/sentraop/config.yaml")).unwrap_err();
        assert!(err.to_string().contains("sentraop init"));
    }

    #[test]
    fn test_validate_auth_requires_api_key() {
        let config = Config::default();
        assert!(config.validate_auth().is_err());

        let config = Config {
            api_key: Some("key".to_string()),
            ..Config::default()
        };
        assert!(config.validate_auth().is_ok());
    }
}
