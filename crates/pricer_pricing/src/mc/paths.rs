//! GBM path generation.
//!
//! Paths follow `dS/S = μ dt + σ dW` under the real-world drift and are
//! advanced with the exact log-space solution:
//! ```text
//! S(t+dt) = S(t) × exp((μ - 0.5σ²)dt + σ√dt × Z)
//! ```
//!
//! # Memory Layout
//!
//! Paths are stored in row-major order: `data[path_idx * (n_steps + 1) + step_idx]`
//! where `step_idx = 0` contains the initial spot price.
//!
//! Generation is an explicit two-phase API: [`GbmSimulator::generate`]
//! produces an immutable [`PathSet`], from which final prices are read.
//! Nothing is regenerated behind the caller's back.

use pricer_core::market_data::MarketParams;
use pricer_core::types::{PricingError, PricingResult};
use pricer_models::instruments::StrategyPayout;
use pricer_models::models::GbmDynamics;

use super::config::SimulationConfig;
use crate::rng::PricerRng;

/// GBM path simulator.
///
/// # Examples
///
/// ```rust
/// use pricer_pricing::mc::GbmSimulator;
/// use pricer_pricing::rng::PricerRng;
///
/// let sim = GbmSimulator::new(100.0, 0.08, 0.2, 1.0, 52, 500).unwrap();
/// let paths = sim.generate(&mut PricerRng::from_seed(42));
///
/// assert_eq!(paths.n_paths(), 500);
/// assert_eq!(paths.path(0).len(), 53);
/// assert_eq!(paths.path(0)[0], 100.0);
/// ```
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GbmSimulator {
    spot: f64,
    dynamics: GbmDynamics,
    maturity: f64,
    n_steps: usize,
    n_paths: usize,
}

impl GbmSimulator {
    /// Creates a simulator.
    ///
    /// # Errors
    ///
    /// `InvalidParameter` if `spot ≤ 0`, `volatility < 0`, `maturity ≤ 0`,
    /// `n_steps = 0` or `n_paths = 0`.
    pub fn new(
        spot: f64,
        drift: f64,
        volatility: f64,
        maturity: f64,
        n_steps: usize,
        n_paths: usize,
    ) -> PricingResult<Self> {
        if !(spot > 0.0) || !spot.is_finite() {
            return Err(PricingError::invalid_parameter(
                "spot",
                spot,
                "must be positive",
            ));
        }
        if !(maturity > 0.0) || !maturity.is_finite() {
            return Err(PricingError::invalid_parameter(
                "maturity",
                maturity,
                "must be positive",
            ));
        }
        let dynamics = GbmDynamics::new(drift, volatility)?;
        let config = SimulationConfig::builder()
            .n_paths(n_paths)
            .n_steps(n_steps)
            .build()?;
        Ok(Self {
            spot,
            dynamics,
            maturity,
            n_steps: config.n_steps(),
            n_paths: config.n_paths(),
        })
    }

    /// Creates a simulator from market parameters, simulating under the drift μ.
    pub fn from_market(market: &MarketParams) -> PricingResult<Self> {
        Self::new(
            market.spot,
            market.drift,
            market.volatility,
            market.maturity,
            market.n_steps,
            market.n_paths,
        )
    }

    /// Creates a simulator whose counts come from a [`SimulationConfig`].
    pub fn with_config(
        spot: f64,
        drift: f64,
        volatility: f64,
        maturity: f64,
        config: &SimulationConfig,
    ) -> PricingResult<Self> {
        Self::new(
            spot,
            drift,
            volatility,
            maturity,
            config.n_steps(),
            config.n_paths(),
        )
    }

    /// Number of paths generated per call.
    #[inline]
    pub fn n_paths(&self) -> usize {
        self.n_paths
    }

    /// Number of steps per path.
    #[inline]
    pub fn n_steps(&self) -> usize {
        self.n_steps
    }

    /// Generates a full path matrix from `rng`.
    ///
    /// Draws `n_paths × n_steps` normals in path-major order, so the same
    /// seed always reproduces the same matrix.
    pub fn generate(&self, rng: &mut PricerRng) -> PathSet {
        let width = self.n_steps + 1;
        let dt = self.maturity / self.n_steps as f64;
        let mut data = vec![0.0; self.n_paths * width];
        let mut normals = vec![0.0; self.n_steps];

        for row in data.chunks_exact_mut(width) {
            rng.fill_normal(&mut normals);
            row[0] = self.spot;
            let mut log_sum = 0.0;
            for (cell, &z) in row[1..].iter_mut().zip(normals.iter()) {
                log_sum += self.dynamics.log_increment(dt, z);
                *cell = self.spot * log_sum.exp();
            }
        }

        PathSet {
            data,
            n_paths: self.n_paths,
            n_steps: self.n_steps,
        }
    }
}

/// Simulates GBM paths in one call.
///
/// # Errors
///
/// See [`GbmSimulator::new`].
pub fn simulate_gbm(
    drift: f64,
    volatility: f64,
    n_steps: usize,
    n_paths: usize,
    spot: f64,
    maturity: f64,
    rng: &mut PricerRng,
) -> PricingResult<PathSet> {
    let simulator = GbmSimulator::new(spot, drift, volatility, maturity, n_steps, n_paths)?;
    Ok(simulator.generate(rng))
}

/// Immutable matrix of simulated paths with shape `(n_paths, n_steps + 1)`.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PathSet {
    data: Vec<f64>,
    n_paths: usize,
    n_steps: usize,
}

impl PathSet {
    /// Number of paths.
    #[inline]
    pub fn n_paths(&self) -> usize {
        self.n_paths
    }

    /// Number of steps per path.
    #[inline]
    pub fn n_steps(&self) -> usize {
        self.n_steps
    }

    /// The `i`-th path, including the initial price.
    ///
    /// # Panics
    ///
    /// Panics if `i >= n_paths`.
    #[inline]
    pub fn path(&self, i: usize) -> &[f64] {
        let width = self.n_steps + 1;
        &self.data[i * width..(i + 1) * width]
    }

    /// Iterator over paths.
    pub fn iter(&self) -> impl Iterator<Item = &[f64]> {
        self.data.chunks_exact(self.n_steps + 1)
    }

    /// Row-major backing slice.
    #[inline]
    pub fn as_slice(&self) -> &[f64] {
        &self.data
    }

    /// Last column of the matrix.
    pub fn final_prices(&self) -> Vec<f64> {
        self.iter().map(|row| row[self.n_steps]).collect()
    }
}

/// Output of one simulation request: paths, final prices and strategy payouts.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SimulationResult {
    /// Simulated paths
    pub paths: PathSet,
    /// Last column of `paths`
    pub final_prices: Vec<f64>,
    /// Payout owed at each final price
    pub payout_values: Vec<f64>,
}

impl SimulationResult {
    /// Bundles a path set with the payouts of `payout` at its final prices.
    pub fn new(paths: PathSet, payout: &StrategyPayout) -> Self {
        let final_prices = paths.final_prices();
        let payout_values = payout.payouts(&final_prices);
        Self {
            paths,
            final_prices,
            payout_values,
        }
    }

    /// Mean final price.
    pub fn mean_final_price(&self) -> f64 {
        mean(&self.final_prices)
    }

    /// Population standard deviation of final prices.
    pub fn std_final_price(&self) -> f64 {
        let m = self.mean_final_price();
        let n = self.final_prices.len().max(1) as f64;
        (self.final_prices.iter().map(|s| (s - m).powi(2)).sum::<f64>() / n).sqrt()
    }

    /// Mean payout over the sample.
    pub fn mean_payout(&self) -> f64 {
        mean(&self.payout_values)
    }
}

fn mean(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    values.iter().sum::<f64>() / values.len() as f64
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_shape_and_initial_column() {
        let sim = GbmSimulator::new(100.0, 0.08, 0.2, 1.0, 10, 25).unwrap();
        let paths = sim.generate(&mut PricerRng::from_seed(1));
        assert_eq!(paths.as_slice().len(), 25 * 11);
        assert!(paths.iter().all(|row| row[0] == 100.0));
        assert!(paths.as_slice().iter().all(|s| *s > 0.0));
        assert_eq!(paths.final_prices().len(), 25);
        assert_eq!(paths.final_prices()[3], paths.path(3)[10]);
    }

    #[test]
    fn test_zero_volatility_is_deterministic() {
        let sim = GbmSimulator::new(100.0, 0.05, 0.0, 1.0, 365, 200).unwrap();
        let finals = sim.generate(&mut PricerRng::from_seed(3)).final_prices();
        let expected = 100.0 * 0.05_f64.exp();
        for s in &finals {
            assert!((s - expected).abs() < 1e-5);
        }
        let result = SimulationResult::new(
            sim.generate(&mut PricerRng::from_seed(4)),
            &StrategyPayout::straddle(100.0).unwrap(),
        );
        assert!(result.std_final_price() < 1e-9);
    }

    #[test]
    fn test_same_seed_reproduces_paths() {
        let sim = GbmSimulator::new(100.0, 0.08, 0.2, 1.0, 50, 100).unwrap();
        let a = sim.generate(&mut PricerRng::from_seed(42));
        let b = sim.generate(&mut PricerRng::from_seed(42));
        assert_eq!(a, b);
        let c = sim.generate(&mut PricerRng::from_seed(43));
        assert_ne!(a, c);
    }

    #[test]
    fn test_terminal_mean_matches_drift() {
        let sim = GbmSimulator::new(100.0, 0.08, 0.2, 1.0, 12, 20_000).unwrap();
        let finals = sim.generate(&mut PricerRng::from_seed(2024)).final_prices();
        let m = finals.iter().sum::<f64>() / finals.len() as f64;
        // Standard error is about 0.15 here.
        assert_relative_eq!(m, 100.0 * 0.08_f64.exp(), epsilon = 0.75);
    }

    #[test]
    fn test_rejects_invalid_inputs() {
        let cases = [
            GbmSimulator::new(0.0, 0.05, 0.2, 1.0, 10, 10),
            GbmSimulator::new(100.0, 0.05, -0.2, 1.0, 10, 10),
            GbmSimulator::new(100.0, 0.05, 0.2, 0.0, 10, 10),
            GbmSimulator::new(100.0, 0.05, 0.2, 1.0, 0, 10),
            GbmSimulator::new(100.0, 0.05, 0.2, 1.0, 10, 0),
        ];
        for case in cases {
            assert!(matches!(case, Err(PricingError::InvalidParameter { .. })));
        }
    }

    #[test]
    fn test_simulation_result_stats() {
        let sim = GbmSimulator::new(100.0, 0.0, 0.0, 1.0, 4, 10).unwrap();
        let payout = StrategyPayout::straddle(90.0).unwrap();
        let result = SimulationResult::new(sim.generate(&mut PricerRng::from_seed(0)), &payout);
        assert_relative_eq!(result.mean_final_price(), 100.0, epsilon = 1e-12);
        assert_relative_eq!(result.mean_payout(), 10.0, epsilon = 1e-9);
        assert_eq!(result.payout_values.len(), 10);
    }

    #[test]
    fn test_simulate_gbm_matches_simulator() {
        let direct = simulate_gbm(0.08, 0.2, 20, 30, 100.0, 1.0, &mut PricerRng::from_seed(5)).unwrap();
        let sim = GbmSimulator::from_market(
            &MarketParams::default().with_steps(20).with_paths(30),
        )
        .unwrap();
        assert_eq!(direct, sim.generate(&mut PricerRng::from_seed(5)));
    }
}
