//! Client configuration
//!
//! Settings come from, in increasing precedence: defaults, a YAML file,
//! `RESTPAGE_*` environment variables, and explicit overrides from the
//! command line.

use crate::http::{HttpTransportConfig, DEFAULT_BASE_URL};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;
use thiserror::Error;

/// Environment variable overriding the base URL
pub const ENV_BASE_URL: &str = "RESTPAGE_BASE_URL";

/// Environment variable overriding the account SID
pub const ENV_ACCOUNT_SID: &str = "RESTPAGE_ACCOUNT_SID";

/// Environment variable overriding the auth token
pub const ENV_AUTH_TOKEN: &str = "RESTPAGE_AUTH_TOKEN";

/// Errors raised while loading configuration or building a transport
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config file '{path}': {source}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse YAML: {0}")]
    YamlParse(#[from] serde_yaml::Error),

    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    #[error("Failed to build HTTP client: {0}")]
    HttpClient(#[from] reqwest::Error),

    #[error("Invalid config value for '{field}': {message}")]
    InvalidValue { field: String, message: String },
}

/// Client configuration loaded from YAML
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ClientConfig {
    /// API domain
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Request timeout in seconds
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    /// User agent override
    #[serde(default)]
    pub user_agent: Option<String>,

    /// Account SID, also used as the Basic auth username
    #[serde(default)]
    pub account_sid: Option<String>,

    /// Auth token, used as the Basic auth password
    #[serde(default)]
    pub auth_token: Option<String>,
}

fn default_base_url() -> String {
    DEFAULT_BASE_URL.to_string()
}

fn default_timeout_secs() -> u64 {
    30
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            timeout_secs: default_timeout_secs(),
            user_agent: None,
            account_sid: None,
            auth_token: None,
        }
    }
}

impl ClientConfig {
    /// Parse a config from YAML text
    pub fn from_yaml_str(yaml: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_yaml::from_str(yaml)?;
        config.validate()?;
        Ok(config)
    }

    /// Load a config from a YAML file
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_yaml_str(&content)
    }

    /// Apply `RESTPAGE_*` environment overrides
    #[must_use]
    pub fn with_env(self) -> Self {
        self.with_overrides(|key| std::env::var(key).ok())
    }

    /// Apply overrides from an arbitrary lookup
    #[must_use]
    pub fn with_overrides<F>(mut self, lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(url) = lookup(ENV_BASE_URL) {
            self.base_url = url;
        }
        if let Some(sid) = lookup(ENV_ACCOUNT_SID) {
            self.account_sid = Some(sid);
        }
        if let Some(token) = lookup(ENV_AUTH_TOKEN) {
            self.auth_token = Some(token);
        }
        self
    }

    /// Check values that serde cannot
    pub fn validate(&self) -> Result<(), ConfigError> {
        url::Url::parse(&self.base_url)?;
        if self.timeout_secs == 0 {
            return Err(ConfigError::InvalidValue {
                field: "timeout_secs".to_string(),
                message: "must be greater than zero".to_string(),
            });
        }
        Ok(())
    }

    /// Build the transport configuration
    ///
    /// Credentials are attached only when both the account SID and the
    /// auth token are present.
    pub fn transport_config(&self) -> HttpTransportConfig {
        let mut builder = HttpTransportConfig::builder()
            .base_url(&self.base_url)
            .timeout(Duration::from_secs(self.timeout_secs));

        if let Some(ref agent) = self.user_agent {
            builder = builder.user_agent(agent);
        }

        if let (Some(sid), Some(token)) = (&self.account_sid, &self.auth_token) {
            builder = builder.basic_auth(sid, token);
        }

        builder.build()
    }
}
