//! # service_cli
//!
//! Library half of the `strategy-sim` binary: configuration loading, input
//! validation, the command implementations and their table/JSON rendering.
//!
//! As the service layer, this crate orchestrates all other crates and is the
//! only place where configuration files or the environment are read.

pub mod commands;
pub mod config;
pub mod output;
pub mod validation;

mod error;

pub use error::{CliError, Result};
