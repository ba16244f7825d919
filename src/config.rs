//! Client configuration.
//!
//! Configuration is stored in `.flowset/config.yaml` and includes:
//! - Base URL of the controller REST API
//! - Request timeout
//! - The client id sent with every revision

use std::env;
use std::fs;
use std::path::PathBuf;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use url::Url;
use uuid::Uuid;

use crate::error::{FlowsetError, Result};
use crate::paths::flowset_root;

pub const DEFAULT_API_URL: &str = "http://localhost:8080/nifi-api/";

/// Environment variable that overrides the configured API URL
pub const API_URL_ENV: &str = "FLOWSET_API_URL";

/// Main configuration structure
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Base URL of the controller REST API
    #[serde(default = "default_api_url")]
    pub api_url: String,

    /// Request timeout in seconds (default: 30)
    #[serde(default = "default_timeout")]
    pub timeout: u64,

    /// Client id paired with the revision version on mutating calls
    #[serde(skip_serializing_if = "Option::is_none")]
    pub client_id: Option<String>,
}

fn default_api_url() -> String {
    DEFAULT_API_URL.to_string()
}

fn default_timeout() -> u64 {
    30
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_url: default_api_url(),
            timeout: default_timeout(),
            client_id: None,
        }
    }
}

impl Config {
    /// Get the path to the config file
    pub fn config_path() -> PathBuf {
        flowset_root().join("config.yaml")
    }

    /// Load configuration from file, or return default if not found
    pub fn load() -> Result<Self> {
        let path = Self::config_path();
        if !path.exists() {
            return Ok(Config::default());
        }

        let content = fs::read_to_string(&path).map_err(|e| {
            FlowsetError::Io(std::io::Error::new(
                e.kind(),
                format!("Failed to read config at {}: {}", path.display(), e),
            ))
        })?;
        let config: Config = serde_yaml_ng::from_str(&content)?;
        Ok(config)
    }

    /// Save configuration to file
    pub fn save(&self) -> Result<()> {
        let path = Self::config_path();

        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(|e| {
                FlowsetError::Io(std::io::Error::new(
                    e.kind(),
                    format!(
                        "Failed to create directory for config at {}: {}",
                        parent.display(),
                        e
                    ),
                ))
            })?;
        }

        let content = serde_yaml_ng::to_string(self)?;
        fs::write(&path, content).map_err(|e| {
            FlowsetError::Io(std::io::Error::new(
                e.kind(),
                format!("Failed to write config at {}: {}", path.display(), e),
            ))
        })?;

        // Owner read/write only
        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            let permissions = std::fs::Permissions::from_mode(0o600);
            std::fs::set_permissions(&path, permissions)?;
        }

        Ok(())
    }

    /// Get the API URL from the environment or the config file
    pub fn api_url(&self) -> String {
        if let Ok(url) = env::var(API_URL_ENV)
            && !url.is_empty()
        {
            return url;
        }

        self.api_url.clone()
    }

    /// Parse the effective API URL into a base that relative endpoints can be joined onto.
    pub fn base_url(&self) -> Result<Url> {
        parse_base_url(&self.api_url())
    }

    /// Set the API URL after validating it
    pub fn set_api_url(&mut self, url: &str) -> Result<()> {
        parse_base_url(url)?;
        self.api_url = url.to_string();
        Ok(())
    }

    /// Get the request timeout duration
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout)
    }

    /// Return the client id, generating one when none is configured.
    ///
    /// The boolean is true when a new id was generated and the config should be saved.
    pub fn ensure_client_id(&mut self) -> (String, bool) {
        match &self.client_id {
            Some(id) => (id.clone(), false),
            None => {
                let id = Uuid::new_v4().to_string();
                self.client_id = Some(id.clone());
                (id, true)
            }
        }
    }
}

/// Parse a base URL, ensuring a trailing slash so `Url::join` keeps the path prefix.
pub fn parse_base_url(raw: &str) -> Result<Url> {
    let normalized = if raw.ends_with('/') {
        raw.to_string()
    } else {
        format!("{raw}/")
    };
    let url = Url::parse(&normalized).map_err(|e| FlowsetError::InvalidUrl(raw.to_string(), e))?;
    match url.scheme() {
        "http" | "https" => Ok(url),
        other => Err(FlowsetError::Config(format!(
            "unsupported URL scheme '{other}', expected 'http' or 'https'"
        ))),
    }
}
