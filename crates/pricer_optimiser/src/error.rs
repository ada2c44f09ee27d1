//! Optimiser error types.

use pricer_core::types::PricingError;
use thiserror::Error;

/// Errors that abort a strike search.
///
/// Per-candidate failures never surface here; they are recorded as skipped
/// candidates in the result.
///
/// # Examples
///
/// ```
/// use pricer_optimiser::OptimiserError;
///
/// let err = OptimiserError::EmptyGrid { spot: 3.0 };
/// assert!(format!("{}", err).contains("3"));
/// ```
#[derive(Error, Debug, Clone, PartialEq)]
pub enum OptimiserError {
    /// The grid generator produced no candidates.
    #[error("Strike grid is empty for spot {spot}")]
    EmptyGrid {
        /// Spot price the grid was generated for
        spot: f64,
    },

    /// No simulated final prices were supplied.
    #[error("Final-price sample is empty")]
    EmptySample,

    /// Market-level pricing failure shared by every candidate.
    #[error(transparent)]
    Pricing(#[from] PricingError),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display() {
        assert_eq!(OptimiserError::EmptySample.to_string(), "Final-price sample is empty");
        let err: OptimiserError = PricingError::NumericDegeneracy("u <= d".into()).into();
        assert_eq!(err.to_string(), PricingError::NumericDegeneracy("u <= d".into()).to_string());
    }
}
