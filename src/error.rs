//! Error types for restpage
//!
//! Every list operation either succeeds or fails with exactly one of the
//! two variants of [`Error`]. Configuration problems live in
//! [`crate::config::ConfigError`] and never reach the list engine.

use serde_json::{Map, Value};
use std::fmt;
use thiserror::Error;

/// Message used when the transport produced no response at all
pub const CONNECTION_FAILED_MESSAGE: &str = "Unable to connect to server";

/// Message used when a non-200 body cannot be read as an error envelope
pub const NO_CONTENT_MESSAGE: &str = "Server Error, no content";

/// Error returned by list operations
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// The transport could not reach the server
    #[error("{message}")]
    Connection {
        /// Always [`CONNECTION_FAILED_MESSAGE`]
        message: String,
        /// Transport-level detail, for diagnostics only
        reason: String,
    },

    /// The server answered with a non-success status, or with a body
    /// that could not be decoded
    #[error(transparent)]
    Api(#[from] ApiError),
}

impl Error {
    /// Create a connection error
    pub fn connection(reason: impl Into<String>) -> Self {
        Self::Connection {
            message: CONNECTION_FAILED_MESSAGE.to_string(),
            reason: reason.into(),
        }
    }

    /// The API error, if this is one
    pub fn as_api(&self) -> Option<&ApiError> {
        match self {
            Error::Api(e) => Some(e),
            Error::Connection { .. } => None,
        }
    }

    /// Check if this is a connection error
    pub fn is_connection(&self) -> bool {
        matches!(self, Error::Connection { .. })
    }
}

/// Structured detail for a failed API call
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ApiError {
    /// Server-supplied message (empty when absent)
    pub message: String,
    /// Numeric API error code
    pub code: Option<i64>,
    /// Link to documentation for this error
    pub more_info: Option<String>,
    /// HTTP status echoed by the server
    pub status: Option<u16>,
}

impl ApiError {
    /// Create an API error with only a message
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            ..Default::default()
        }
    }

    /// The error used when a non-200 body is unreadable
    pub fn no_content() -> Self {
        Self::new(NO_CONTENT_MESSAGE)
    }

    /// Set the HTTP status
    #[must_use]
    pub fn with_status(mut self, status: u16) -> Self {
        self.status = Some(status);
        self
    }
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match (self.status, self.code) {
            (Some(status), Some(code)) => write!(f, "HTTP {status} [{code}]: {}", self.message),
            (Some(status), None) => write!(f, "HTTP {status}: {}", self.message),
            (None, Some(code)) => write!(f, "[{code}]: {}", self.message),
            (None, None) => f.write_str(&self.message),
        }
    }
}

impl std::error::Error for ApiError {}

impl From<RestError> for ApiError {
    fn from(rest: RestError) -> Self {
        Self {
            message: rest.message.unwrap_or_default(),
            code: rest.code,
            more_info: rest.more_info,
            status: rest.status,
        }
    }
}

/// Error envelope returned by the API on non-200 responses
///
/// Every field is optional and read on its own: a partial or mistyped
/// envelope still keeps whatever detail it carries.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RestError {
    pub message: Option<String>,
    pub code: Option<i64>,
    pub more_info: Option<String>,
    pub status: Option<u16>,
}

impl RestError {
    /// Parse an error envelope, returning `None` when the body is not a
    /// JSON object
    pub fn from_json(body: &str) -> Option<Self> {
        let fields: Map<String, Value> = serde_json::from_str(body).ok()?;
        Some(Self {
            message: text_field(&fields, "message"),
            code: integer_field(&fields, "code"),
            more_info: text_field(&fields, "more_info"),
            status: integer_field(&fields, "status").and_then(|n| u16::try_from(n).ok()),
        })
    }
}

fn text_field(fields: &Map<String, Value>, name: &str) -> Option<String> {
    fields.get(name)?.as_str().map(str::to_string)
}

/// Numbers sometimes arrive as strings
fn integer_field(fields: &Map<String, Value>, name: &str) -> Option<i64> {
    match fields.get(name)? {
        Value::Number(n) => n.as_i64(),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

/// Result type alias for restpage
pub type Result<T> = std::result::Result<T, Error>;
