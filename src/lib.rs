//! # restpage
//!
//! A generic paginated-list engine for telephony REST API clients.
//!
//! ## Features
//!
//! - **One Engine, Many Resources**: each list resource is a descriptor constant
//! - **Typed Errors**: every failure is a connection error or an API error
//! - **Lazy Pagination**: cursors are followed only as records are consumed
//! - **Injected Transport**: bring any [`http::Transport`], or use the reqwest one
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use restpage::http::{HttpTransport, HttpTransportConfig};
//! use restpage::list::ListOptions;
//! use restpage::resources::notification::{self, NotificationFilter};
//! use std::sync::Arc;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let config = HttpTransportConfig::builder()
//!         .basic_auth("AC...", "auth-token")
//!         .build();
//!     let transport = Arc::new(HttpTransport::with_config(config)?);
//!
//!     let filter = NotificationFilter { log: Some(0), ..Default::default() };
//!     let op = notification::list("AC...", "CA...", filter, ListOptions::default());
//!
//!     let mut records = op.execute(transport).await?;
//!     while let Some(record) = records.next().await {
//!         println!("{:?}", record?);
//!     }
//!     Ok(())
//! }
//! ```
//!
//! ## Architecture
//!
//! ```text
//! ┌────────────────────────────────────────────────────────────┐
//! │  PagedListOperation<T>  (descriptor + path + filter)       │
//! │  execute() → ResourceSet<T>     next_page(uri) → Page<T>   │
//! └────────────────────────────────────────────────────────────┘
//!                               │
//! ┌──────────────┬──────────────┴─────┬─────────────────────────┐
//! │  Transport   │  Error mapping     │  Page decoding          │
//! ├──────────────┼────────────────────┼─────────────────────────┤
//! │  reqwest     │  Connection        │  envelope key           │
//! │  Basic auth  │  Api{code,status}  │  next_page_uri / meta   │
//! └──────────────┴────────────────────┴─────────────────────────┘
//! ```

#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]
#![allow(clippy::doc_markdown)]

// ============================================================================
// Module declarations
// ============================================================================

/// Error types
pub mod error;

/// Request/response types and the transport
pub mod http;

/// Generic paginated list engine
pub mod list;

/// Pages and cursor-following record sets
pub mod pagination;

/// Concrete list resources
pub mod resources;

/// Client configuration
pub mod config;

/// Command-line interface
pub mod cli;

// ============================================================================
// Re-exports
// ============================================================================

pub use error::{ApiError, Error, Result};
pub use list::{ListFilter, ListOptions, PagedListOperation, ResourceDescriptor};
pub use pagination::{Page, ResourceSet};

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Crate name
pub const NAME: &str = env!("CARGO_PKG_NAME");
