//! HTTP transport module
//!
//! The list engine depends only on the [`Transport`] trait. This module
//! also ships [`HttpTransport`], a reqwest implementation.
//!
//! # Features
//!
//! - **Ordered Query Parameters**: appended, never overwritten
//! - **Cursor Resolution**: server-relative next-page URIs resolve against the base URL
//! - **Basic Credentials**: forwarded on every request when configured

mod client;
mod types;

pub use client::{
    Credentials, HttpTransport, HttpTransportConfig, HttpTransportConfigBuilder,
    DEFAULT_BASE_URL, DEFAULT_TIMEOUT,
};
pub use types::{Request, Response, Target, Transport, TransportError};

#[cfg(test)]
pub(crate) mod scripted;
