//! Market parameters for a single calculation request.

use crate::types::{PricingError, PricingResult};

/// Immutable market and discretisation parameters.
///
/// Bundles everything a calculation needs apart from the strikes:
/// spot, risk-free rate, real-world drift, volatility, horizon and the
/// binomial step / Monte Carlo path counts.
///
/// # Examples
/// ```
/// use pricer_core::market_data::MarketParams;
///
/// let market = MarketParams::new(100.0, 0.05, 0.08, 0.2, 1.0, 365, 1000).unwrap();
/// assert_eq!(market.n_steps, 365);
/// assert!((market.dt() - 1.0 / 365.0).abs() < 1e-15);
///
/// assert!(MarketParams::new(-1.0, 0.05, 0.08, 0.2, 1.0, 365, 1000).is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct MarketParams {
    /// Current underlying price (S)
    pub spot: f64,
    /// Risk-free rate (r), annualised
    pub rate: f64,
    /// Real-world drift (μ), annualised
    pub drift: f64,
    /// Volatility (σ), annualised
    pub volatility: f64,
    /// Time to expiry in years (T)
    pub maturity: f64,
    /// Binomial step count (N)
    pub n_steps: usize,
    /// Monte Carlo path count
    pub n_paths: usize,
}

impl MarketParams {
    /// Creates validated market parameters.
    ///
    /// # Errors
    /// `InvalidParameter` if S ≤ 0, σ ≤ 0, T ≤ 0, N = 0, n_paths = 0, or any
    /// scalar is non-finite.
    pub fn new(
        spot: f64,
        rate: f64,
        drift: f64,
        volatility: f64,
        maturity: f64,
        n_steps: usize,
        n_paths: usize,
    ) -> PricingResult<Self> {
        let params = Self {
            spot,
            rate,
            drift,
            volatility,
            maturity,
            n_steps,
            n_paths,
        };
        params.validate()?;
        Ok(params)
    }

    /// Checks the positivity and finiteness preconditions.
    pub fn validate(&self) -> PricingResult<()> {
        if !(self.spot > 0.0 && self.spot.is_finite()) {
            return Err(PricingError::invalid_parameter(
                "spot",
                self.spot,
                "must be positive and finite",
            ));
        }
        if !self.rate.is_finite() {
            return Err(PricingError::invalid_parameter(
                "rate",
                self.rate,
                "must be finite",
            ));
        }
        if !self.drift.is_finite() {
            return Err(PricingError::invalid_parameter(
                "drift",
                self.drift,
                "must be finite",
            ));
        }
        if !(self.volatility > 0.0 && self.volatility.is_finite()) {
            return Err(PricingError::invalid_parameter(
                "volatility",
                self.volatility,
                "must be positive and finite",
            ));
        }
        if !(self.maturity > 0.0 && self.maturity.is_finite()) {
            return Err(PricingError::invalid_parameter(
                "maturity",
                self.maturity,
                "must be positive and finite",
            ));
        }
        if self.n_steps == 0 {
            return Err(PricingError::invalid_parameter(
                "n_steps",
                0.0,
                "must be at least 1",
            ));
        }
        if self.n_paths == 0 {
            return Err(PricingError::invalid_parameter(
                "n_paths",
                0.0,
                "must be at least 1",
            ));
        }
        Ok(())
    }

    /// Length of one binomial step, Δt = T / N.
    #[inline]
    pub fn dt(&self) -> f64 {
        self.maturity / self.n_steps as f64
    }

    /// Returns a copy with a different step count.
    #[inline]
    pub fn with_steps(mut self, n_steps: usize) -> Self {
        self.n_steps = n_steps;
        self
    }

    /// Returns a copy with a different path count.
    #[inline]
    pub fn with_paths(mut self, n_paths: usize) -> Self {
        self.n_paths = n_paths;
        self
    }
}

impl Default for MarketParams {
    fn default() -> Self {
        Self {
            spot: 100.0,
            rate: 0.05,
            drift: 0.08,
            volatility: 0.2,
            maturity: 1.0,
            n_steps: 365,
            n_paths: 1000,
        }
    }
}
