//! Client configuration and credential lookup.
//!
//! Configuration is read from a TOML file with a `[quickstatements]` table
//! and can be overridden from the environment:
//!
//! ```toml
//! [quickstatements]
//! username = "Example"
//! token = "$2y$10$..."
//! base_url = "https://quickstatements.toolforge.org"
//! site = "wikidata"
//! ```

use std::fmt;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

pub const DEFAULT_BASE_URL: &str = "https://quickstatements.toolforge.org";
pub const DEFAULT_SITE: &str = "wikidata";

pub const ENV_USERNAME: &str = "QUICKSTATEMENTS_USERNAME";
pub const ENV_TOKEN: &str = "QUICKSTATEMENTS_TOKEN";
pub const ENV_BASE_URL: &str = "QUICKSTATEMENTS_BASE_URL";

/// Username and API token for the QuickStatements service.
#[derive(Clone, PartialEq, Eq)]
pub struct Credentials {
    pub username: String,
    pub token: String,
}

impl Credentials {
    pub fn new(username: impl Into<String>, token: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            token: token.into(),
        }
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("username", &self.username)
            .field("token", &"<redacted>")
            .finish()
    }
}

/// Supplies credentials on demand.
pub trait CredentialsProvider {
    fn credentials(&self) -> Result<Credentials, ConfigError>;
}

impl CredentialsProvider for Credentials {
    fn credentials(&self) -> Result<Credentials, ConfigError> {
        Ok(self.clone())
    }
}

/// Reads credentials from `QUICKSTATEMENTS_USERNAME` and `QUICKSTATEMENTS_TOKEN`.
#[derive(Debug, Clone, Copy, Default)]
pub struct EnvCredentials;

impl CredentialsProvider for EnvCredentials {
    fn credentials(&self) -> Result<Credentials, ConfigError> {
        ClientConfig::default()
            .with_overrides(|key| std::env::var(key).ok())
            .credentials()
    }
}

#[derive(Debug, Deserialize)]
struct ConfigFile {
    #[serde(default)]
    quickstatements: ClientConfig,
}

/// Settings for talking to a QuickStatements instance.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClientConfig {
    #[serde(default = "default_base_url")]
    pub base_url: String,
    #[serde(default = "default_site")]
    pub site: String,
    #[serde(default)]
    pub username: Option<String>,
    #[serde(default)]
    pub token: Option<String>,
}

fn default_base_url() -> String {
    DEFAULT_BASE_URL.to_string()
}

fn default_site() -> String {
    DEFAULT_SITE.to_string()
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            site: default_site(),
            username: None,
            token: None,
        }
    }
}

impl fmt::Debug for ClientConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ClientConfig")
            .field("base_url", &self.base_url)
            .field("site", &self.site)
            .field("username", &self.username)
            .field("token", &self.token.as_ref().map(|_| "<redacted>"))
            .finish()
    }
}

impl ClientConfig {
    /// Parses the `[quickstatements]` table of a TOML document.
    pub fn from_toml_str(contents: &str) -> Result<Self, ConfigError> {
        let file: ConfigFile = toml::from_str(contents)?;
        Ok(file.quickstatements)
    }

    /// Loads a TOML config file.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_toml_str(&contents)
    }

    /// Applies `QUICKSTATEMENTS_*` environment variables on top of these values.
    pub fn with_env_overrides(self) -> Self {
        self.with_overrides(|key| std::env::var(key).ok())
    }

    /// Applies overrides from an arbitrary key lookup.
    pub fn with_overrides(mut self, lookup: impl Fn(&str) -> Option<String>) -> Self {
        if let Some(username) = lookup(ENV_USERNAME) {
            self.username = Some(username);
        }
        if let Some(token) = lookup(ENV_TOKEN) {
            self.token = Some(token);
        }
        if let Some(base_url) = lookup(ENV_BASE_URL) {
            self.base_url = base_url;
        }
        self
    }

    /// Returns the base URL without a trailing slash.
    pub fn base_url(&self) -> &str {
        self.base_url.trim_end_matches('/')
    }
}

impl CredentialsProvider for ClientConfig {
    fn credentials(&self) -> Result<Credentials, ConfigError> {
        let username = self.username.clone().ok_or(ConfigError::MissingField {
            field: "username",
            env: ENV_USERNAME,
        })?;
        let token = self.token.clone().ok_or(ConfigError::MissingField {
            field: "token",
            env: ENV_TOKEN,
        })?;
        Ok(Credentials { username, token })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_toml_str() {
        let config = ClientConfig::from_toml_str(
            r#"
            [quickstatements]
            username = "Example"
            token = "secret"
            "#,
        )
        .unwrap();
        assert_eq!(config.base_url, DEFAULT_BASE_URL);
        assert_eq!(config.site, DEFAULT_SITE);
        assert_eq!(
            config.credentials().unwrap(),
            Credentials::new("Example", "secret")
        );
    }

    #[test]
    fn test_empty_config_uses_defaults() {
        let config = ClientConfig::from_toml_str("").unwrap();
        assert_eq!(config, ClientConfig::default());
        assert!(matches!(
            config.credentials(),
            Err(ConfigError::MissingField { field: "username", .. })
        ));
    }

    #[test]
    fn test_invalid_toml() {
        assert!(matches!(
            ClientConfig::from_toml_str("[quickstatements"),
            Err(ConfigError::Parse(_))
        ));
    }

    #[test]
    fn test_overrides() {
        let config = ClientConfig::default().with_overrides(|key| match key {
            ENV_USERNAME => Some("env-user".to_string()),
            ENV_TOKEN => Some("env-token".to_string()),
            ENV_BASE_URL => Some("https://qs.example.org/".to_string()),
            _ => None,
        });
        assert_eq!(config.base_url(), "https://qs.example.org");
        assert_eq!(config.credentials().unwrap().username, "env-user");
    }

    #[test]
    fn test_debug_redacts_token() {
        let creds = Credentials::new("user", "hunter2");
        assert!(!format!("{creds:?}").contains("hunter2"));
        let config = ClientConfig {
            token: Some("hunter2".to_string()),
            ..ClientConfig::default()
        };
        assert!(!format!("{config:?}").contains("hunter2"));
    }

    #[test]
    fn test_missing_file() {
        assert!(matches!(
            ClientConfig::from_file("/nonexistent/quickstatements.toml"),
            Err(ConfigError::Io(_))
        ));
    }
}
