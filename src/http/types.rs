//! Request/response types and the transport trait
//!
//! The list engine only ever talks to a [`Transport`]. Anything that can
//! turn a [`Request`] into a [`Response`] can be injected.

use async_trait::async_trait;
use std::fmt;
use thiserror::Error;

/// Where a request is sent
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Target {
    /// A path on the API domain, built from parent identifiers
    Path(String),
    /// A literal URI supplied by the server (absolute or domain-relative)
    Uri(String),
}

impl Target {
    /// The path or URI as text
    pub fn as_str(&self) -> &str {
        match self {
            Target::Path(p) | Target::Uri(p) => p,
        }
    }
}

impl fmt::Display for Target {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// An outgoing API read
///
/// List operations only read, so every request is a GET.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Request {
    /// Request target
    pub target: Target,
    /// Query parameters, in insertion order
    query: Vec<(String, String)>,
}

impl Request {
    /// Create a GET request for a path on the API domain
    pub fn get(path: impl Into<String>) -> Self {
        Self {
            target: Target::Path(path.into()),
            query: Vec::new(),
        }
    }

    /// Create a GET request for a server-supplied URI
    pub fn get_uri(uri: impl Into<String>) -> Self {
        Self {
            target: Target::Uri(uri.into()),
            query: Vec::new(),
        }
    }

    /// Append a query parameter. Existing parameters with the same name
    /// are kept.
    pub fn add_query_param(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.query.push((key.into(), value.into()));
    }

    /// Query parameters in insertion order
    pub fn query_params(&self) -> &[(String, String)] {
        &self.query
    }

    /// First value for a query parameter
    pub fn query_param(&self, key: &str) -> Option<&str> {
        self.query
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }
}

/// A response from the API
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Response {
    /// HTTP status code
    pub status: u16,
    /// Raw response body
    pub body: String,
}

impl Response {
    /// Create a response
    pub fn new(status: u16, body: impl Into<String>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }

    /// Whether the status is 200 OK
    pub fn is_ok(&self) -> bool {
        self.status == 200
    }
}

/// The transport produced no response
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{0}")]
pub struct TransportError(pub String);

impl TransportError {
    /// Create a transport error
    pub fn new(message: impl Into<String>) -> Self {
        Self(message.into())
    }
}

/// Sends requests to the API
///
/// Authentication, retries and rate limiting are the implementor's
/// business. Implementations must be shareable across tasks.
#[async_trait]
pub trait Transport: Send + Sync {
    /// Perform one request/response exchange
    async fn send(&self, request: &Request) -> std::result::Result<Response, TransportError>;
}
