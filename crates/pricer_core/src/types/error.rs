//! Error types for structured error handling.
//!
//! This module provides [`PricingError`], the error taxonomy shared by every
//! layer of the simulator:
//! - `InvalidParameter`: a scalar input violates a hard precondition
//! - `InvalidOptionType`: option type outside {call, put}
//! - `InvalidStrikeOrdering`: payout construction invariant violated
//! - `NumericDegeneracy`: NaN/Inf or a singular derivation during pricing

use thiserror::Error;

/// Categorised pricing errors.
///
/// Every variant carries the violated precondition and, where there is one,
/// the offending value.
///
/// # Examples
/// ```
/// use pricer_core::types::PricingError;
///
/// let err = PricingError::invalid_parameter("spot", -1.0, "must be positive");
/// assert_eq!(
///     format!("{}", err),
///     "Invalid parameter 'spot' = -1: must be positive"
/// );
/// ```
#[derive(Error, Debug, Clone, PartialEq)]
pub enum PricingError {
    /// A scalar input violates a hard mathematical precondition.
    #[error("Invalid parameter '{name}' = {value}: {reason}")]
    InvalidParameter {
        /// Name of the offending parameter
        name: &'static str,
        /// The offending value
        value: f64,
        /// The violated precondition
        reason: &'static str,
    },

    /// Option type outside {call, put}.
    #[error("Invalid option type '{0}': expected call or put")]
    InvalidOptionType(String),

    /// Strike ordering required by a payout structure is violated.
    #[error("Invalid strike ordering: {0}")]
    InvalidStrikeOrdering(String),

    /// Computation produced NaN/Inf or hit a singular derivation.
    #[error("Numeric degeneracy: {0}")]
    NumericDegeneracy(String),
}

impl PricingError {
    /// Shorthand for [`PricingError::InvalidParameter`].
    #[inline]
    pub fn invalid_parameter(name: &'static str, value: f64, reason: &'static str) -> Self {
        PricingError::InvalidParameter {
            name,
            value,
            reason,
        }
    }

    /// Returns true for errors raised by numerical failure rather than by
    /// invalid inputs.
    #[inline]
    pub fn is_degenerate(&self) -> bool {
        matches!(self, PricingError::NumericDegeneracy(_))
    }
}

/// Result alias used across the pricing layers.
pub type PricingResult<T> = Result<T, PricingError>;

/// Returns `value` unchanged when finite, otherwise a `NumericDegeneracy`
/// naming `what`.
///
/// # Examples
/// ```
/// use pricer_core::types::error::ensure_finite;
///
/// assert_eq!(ensure_finite(1.5, "price").unwrap(), 1.5);
/// assert!(ensure_finite(f64::NAN, "price").is_err());
/// ```
#[inline]
pub fn ensure_finite(value: f64, what: &str) -> PricingResult<f64> {
    if value.is_finite() {
        Ok(value)
    } else {
        Err(PricingError::NumericDegeneracy(format!(
            "{} is not finite ({})",
            what, value
        )))
    }
}
