//! CLI module
//!
//! Command-line interface for listing resources.
//!
//! # Commands
//!
//! - `notifications` - List the notifications of a call, one JSON record per line
//! - `config` - Print the effective configuration

mod commands;
mod runner;

pub use commands::{Cli, Commands, OutputFormat};
pub use runner::Runner;
