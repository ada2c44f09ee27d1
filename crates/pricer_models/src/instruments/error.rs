//! Instrument error types.
//!
//! This module provides structured error handling for option-type parsing
//! and payout-structure construction.

use pricer_core::types::PricingError;
use thiserror::Error;

/// Instrument-related errors.
///
/// # Variants
/// - `InvalidStrike`: Strike price is non-positive or non-finite
/// - `InvalidStrikeOrdering`: Strikes violate the ordering a payout requires
/// - `InvalidOptionType`: Option type outside {call, put}
///
/// # Examples
/// ```
/// use pricer_models::instruments::InstrumentError;
///
/// let err = InstrumentError::InvalidStrike { strike: -5.0 };
/// assert!(format!("{}", err).contains("-5"));
/// ```
#[derive(Error, Debug, Clone, PartialEq)]
pub enum InstrumentError {
    /// Invalid strike price (non-positive).
    #[error("Invalid strike: K = {strike}")]
    InvalidStrike {
        /// The invalid strike value
        strike: f64,
    },

    /// Strikes do not satisfy the ordering required by the structure.
    #[error("{structure} requires {expected}, got {strikes:?}")]
    InvalidStrikeOrdering {
        /// Name of the payout structure
        structure: &'static str,
        /// The required ordering
        expected: &'static str,
        /// The strikes supplied
        strikes: Vec<f64>,
    },

    /// Option type outside {call, put}.
    #[error("Invalid option type '{0}': expected C, P, call or put")]
    InvalidOptionType(String),
}

impl From<InstrumentError> for PricingError {
    fn from(err: InstrumentError) -> Self {
        match err {
            InstrumentError::InvalidStrike { strike } => {
                PricingError::invalid_parameter("strike", strike, "must be positive")
            }
            ordering @ InstrumentError::InvalidStrikeOrdering { .. } => {
                PricingError::InvalidStrikeOrdering(ordering.to_string())
            }
            InstrumentError::InvalidOptionType(value) => PricingError::InvalidOptionType(value),
        }
    }
}
