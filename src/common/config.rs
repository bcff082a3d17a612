//! Configuration file handling

use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

use super::paths::config_path;
use super::{Error, Result};

/// Main configuration structure
#[derive(Debug, Deserialize, Serialize, Default, Clone, PartialEq, Eq)]
pub struct Config {
    /// Service under test
    #[serde(default)]
    pub service: ServiceConfig,

    /// Credentials used by the journey
    #[serde(default)]
    pub credentials: Credentials,
}

/// Where the authentication service lives
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq, Eq)]
pub struct ServiceConfig {
    /// Base URL every endpoint path is appended to
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Per-request timeout in seconds. Unset means wait indefinitely.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timeout_secs: Option<u64>,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            timeout_secs: None,
        }
    }
}

fn default_base_url() -> String {
    "http://localhost:5000".to_string()
}

/// Email and passwords for the journey
///
/// `new_password` doubles as the wrong password in the rejected login,
/// since it is not yet the account's password at that point.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq, Eq)]
pub struct Credentials {
    #[serde(default = "default_email")]
    pub email: String,

    #[serde(default = "default_password")]
    pub password: String,

    #[serde(default = "default_new_password")]
    pub new_password: String,
}

impl Default for Credentials {
    fn default() -> Self {
        Self {
            email: default_email(),
            password: default_password(),
            new_password: default_new_password(),
        }
    }
}

fn default_email() -> String {
    "guillaume@holberton.io".to_string()
}
fn default_password() -> String {
    "b4l0u".to_string()
}
fn default_new_password() -> String {
    "t4rt1fl3tt3".to_string()
}

impl Config {
    /// Load configuration from the default config file
    ///
    /// Returns default configuration if file doesn't exist
    pub fn load() -> Result<Self> {
        if let Some(path) = config_path() {
            if path.exists() {
                return Self::load_from(&path);
            }
        }
        Ok(Self::default())
    }

    /// Load configuration from an explicit path, which must exist
    pub fn load_from(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| Error::FileRead {
            path: path.display().to_string(),
            error: e.to_string(),
        })?;
        Self::parse(&content)
    }

    /// Parse configuration from TOML text
    pub fn parse(content: &str) -> Result<Self> {
        toml::from_str(content).map_err(|e| Error::ConfigParse(e.to_string()))
    }

    /// Render the effective configuration as TOML
    pub fn to_toml(&self) -> Result<String> {
        toml::to_string_pretty(self).map_err(|e| Error::Config(e.to_string()))
    }

    /// Request timeout, if one is configured
    pub fn timeout(&self) -> Option<Duration> {
        self.service.timeout_secs.map(Duration::from_secs)
    }
}
