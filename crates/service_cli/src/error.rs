//! CLI error types

use pricer_core::types::PricingError;
use pricer_optimiser::OptimiserError;
use thiserror::Error;

use crate::config::ConfigError;
use crate::validation::ValidationError;

/// CLI error type
#[derive(Debug, Error)]
pub enum CliError {
    /// Configuration could not be loaded
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Input rejected before reaching the pricing core
    #[error("Invalid input: {0}")]
    Validation(#[from] ValidationError),

    /// Pricing, simulation or analysis failed
    #[error("Pricing error: {0}")]
    Pricing(#[from] PricingError),

    /// Strike search failed
    #[error("Optimisation error: {0}")]
    Optimiser(#[from] OptimiserError),

    /// Invalid command-line argument
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// JSON rendering failed
    #[error("Serialisation error: {0}")]
    Serialisation(#[from] serde_json::Error),

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for CLI operations
pub type Result<T> = std::result::Result<T, CliError>;
