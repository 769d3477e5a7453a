//! reqwest-backed transport
//!
//! Resolves request targets against a base URL, appends query parameters
//! in order, and applies Basic credentials and default headers. It does
//! not retry: a failed exchange is reported once as a [`TransportError`].

use super::types::{Request, Response, Target, Transport, TransportError};
use crate::config::ConfigError;
use async_trait::async_trait;
use reqwest::Client;
use std::fmt;
use std::time::Duration;
use tracing::{debug, warn};
use url::Url;

/// Default API domain
pub const DEFAULT_BASE_URL: &str = "https://api.twilio.com";

/// Default request timeout
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// HTTP Basic credentials
#[derive(Clone, PartialEq, Eq)]
pub struct Credentials {
    /// Username (account SID or API key)
    pub username: String,
    /// Password (auth token or API secret)
    pub password: String,
}

impl Credentials {
    /// Create credentials
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            password: password.into(),
        }
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("username", &self.username)
            .field("password", &"***")
            .finish()
    }
}

/// Configuration for the HTTP transport
#[derive(Debug, Clone)]
pub struct HttpTransportConfig {
    /// Base URL that paths and relative cursors resolve against
    pub base_url: String,
    /// Request timeout
    pub timeout: Duration,
    /// User agent string
    pub user_agent: String,
    /// Optional Basic credentials
    pub credentials: Option<Credentials>,
    /// Headers added to every request
    pub default_headers: Vec<(String, String)>,
}

impl Default for HttpTransportConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout: DEFAULT_TIMEOUT,
            user_agent: format!("restpage/{}", env!("CARGO_PKG_VERSION")),
            credentials: None,
            default_headers: Vec::new(),
        }
    }
}

impl HttpTransportConfig {
    /// Create a new config builder
    pub fn builder() -> HttpTransportConfigBuilder {
        HttpTransportConfigBuilder::default()
    }
}

/// Builder for transport config
#[derive(Default)]
pub struct HttpTransportConfigBuilder {
    config: HttpTransportConfig,
}

impl HttpTransportConfigBuilder {
    /// Set the base URL
    pub fn base_url(mut self, url: impl Into<String>) -> Self {
        self.config.base_url = url.into();
        self
    }

    /// Set the request timeout
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.config.timeout = timeout;
        self
    }

    /// Set user agent
    pub fn user_agent(mut self, agent: impl Into<String>) -> Self {
        self.config.user_agent = agent.into();
        self
    }

    /// Set Basic credentials
    pub fn basic_auth(mut self, username: impl Into<String>, password: impl Into<String>) -> Self {
        self.config.credentials = Some(Credentials::new(username, password));
        self
    }

    /// Add a default header
    pub fn header(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.config.default_headers.push((key.into(), value.into()));
        self
    }

    /// Build the config
    pub fn build(self) -> HttpTransportConfig {
        self.config
    }
}

/// HTTP transport over reqwest
pub struct HttpTransport {
    client: Client,
    base_url: Url,
    config: HttpTransportConfig,
}

impl HttpTransport {
    /// Create a transport with default configuration
    pub fn new() -> Result<Self, ConfigError> {
        Self::with_config(HttpTransportConfig::default())
    }

    /// Create a transport with custom configuration
    pub fn with_config(config: HttpTransportConfig) -> Result<Self, ConfigError> {
        let mut base_url = Url::parse(&config.base_url)?;
        // Paths join under the base path, so it must end in a slash
        if !base_url.path().ends_with('/') {
            let path = format!("{}/", base_url.path());
            base_url.set_path(&path);
        }
        let client = Client::builder()
            .timeout(config.timeout)
            .user_agent(&config.user_agent)
            .build()?;

        Ok(Self {
            client,
            base_url,
            config,
        })
    }

    /// The base URL requests resolve against
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Resolve a request target to an absolute URL
    ///
    /// Absolute URIs pass through untouched. Paths and relative URIs are
    /// joined under the base URL's path, so a base of
    /// `http://proxy/twilio` keeps its `/twilio` prefix.
    pub fn resolve(&self, target: &Target) -> Result<Url, TransportError> {
        let raw = target.as_str();
        if let Target::Uri(uri) = target {
            if uri.starts_with("http://") || uri.starts_with("https://") {
                return Url::parse(uri).map_err(|e| TransportError::new(format!("{uri}: {e}")));
            }
        }
        self.base_url
            .join(raw.trim_start_matches('/'))
            .map_err(|e| TransportError::new(format!("{raw}: {e}")))
    }
}

#[async_trait]
impl Transport for HttpTransport {
    async fn send(&self, request: &Request) -> Result<Response, TransportError> {
        let url = self.resolve(&request.target)?;
        debug!("GET {}", url);

        let mut req = self.client.get(url.clone());

        for (key, value) in &self.config.default_headers {
            req = req.header(key.as_str(), value.as_str());
        }

        if !request.query_params().is_empty() {
            req = req.query(request.query_params());
        }

        if let Some(ref creds) = self.config.credentials {
            req = req.basic_auth(&creds.username, Some(&creds.password));
        }

        let response = req.send().await.map_err(|e| {
            warn!("Request to {} failed: {}", url, e);
            TransportError::new(e.to_string())
        })?;

        let status = response.status().as_u16();
        let body = response.text().await.map_err(|e| {
            warn!("Failed to read response body from {}: {}", url, e);
            TransportError::new(e.to_string())
        })?;

        debug!("GET {} -> {}", url, status);
        Ok(Response { status, body })
    }
}

impl fmt::Debug for HttpTransport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HttpTransport")
            .field("base_url", &self.base_url.as_str())
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}
