//! Command-line front end for debuglens.
//!
//! `serve` starts the HTTP API; `analyze` runs the same pipeline once against
//! a local screenshot; `check` and `config` report on the environment.

#![deny(unsafe_code)]
#![deny(unused_crate_dependencies)]

#[cfg(test)]
use tempfile as _;

// Used by the binary in main.rs
use dotenvy as _;
use tracing_subscriber as _;

pub mod bootstrap;
pub mod commands;
pub mod error;
pub mod handlers;
pub mod parser;

// Re-export primary types for convenient access
pub use bootstrap::{CliContext, bootstrap, load_config};
pub use commands::Commands;
pub use error::CliError;
pub use parser::Cli;
