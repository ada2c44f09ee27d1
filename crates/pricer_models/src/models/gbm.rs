//! Geometric Brownian Motion under the real-world measure.
//!
//! ```text
//! dS = μ S dt + σ S dW
//! ```
//!
//! Paths are advanced with the exact log-space solution:
//! ```text
//! S(t+dt) = S(t) · exp((μ − σ²/2)·dt + σ·√dt·Z),   Z ~ N(0, 1)
//! ```

use pricer_core::types::{PricingError, PricingResult};

/// GBM drift and volatility.
///
/// # Examples
/// ```
/// use pricer_models::models::GbmDynamics;
///
/// let gbm = GbmDynamics::new(0.05, 0.0).unwrap();
/// let s_t = gbm.step(100.0, 1.0, 0.0);
/// assert!((s_t - 100.0 * 0.05_f64.exp()).abs() < 1e-12);
/// ```
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GbmDynamics {
    /// Real-world drift μ (annualised)
    pub drift: f64,
    /// Volatility σ (annualised)
    pub volatility: f64,
}

impl GbmDynamics {
    /// Creates GBM dynamics.
    ///
    /// # Errors
    /// `InvalidParameter` if `volatility` is negative or either input is not finite.
    pub fn new(drift: f64, volatility: f64) -> PricingResult<Self> {
        if !drift.is_finite() {
            return Err(PricingError::invalid_parameter(
                "drift",
                drift,
                "must be finite",
            ));
        }
        if !(volatility >= 0.0) || !volatility.is_finite() {
            return Err(PricingError::invalid_parameter(
                "volatility",
                volatility,
                "must be non-negative",
            ));
        }
        Ok(Self { drift, volatility })
    }

    /// Log-increment over `dt` for a standard normal draw `z`.
    #[inline]
    pub fn log_increment(&self, dt: f64, z: f64) -> f64 {
        (self.drift - 0.5 * self.volatility * self.volatility) * dt + self.volatility * dt.sqrt() * z
    }

    /// Advances `spot` by one step.
    #[inline]
    pub fn step(&self, spot: f64, dt: f64, z: f64) -> f64 {
        spot * self.log_increment(dt, z).exp()
    }

    /// E[S(T)] = S0 · e^(μT).
    #[inline]
    pub fn expected_terminal(&self, spot: f64, maturity: f64) -> f64 {
        spot * (self.drift * maturity).exp()
    }
}
