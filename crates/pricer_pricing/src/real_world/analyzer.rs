//! Exact real-world expectations over a binomial lattice.
//!
//! The real-world up-probability is the first-order shift
//! ```text
//! p_rw = 0.5 − (r − μ)·Δt / (2σ·√Δt)
//! ```
//! shared by every model. Each model contributes only its own (u, d), so the
//! terminal distribution puts mass `C(N,j)·p_rw^(N−j)·q_rw^j` on the price
//! `S·u^(N−j)·d^j`, where `j` counts down moves.

use pricer_core::market_data::MarketParams;
use pricer_core::math::binomial::{binomial_masses, ln_binomial_coefficients};
use pricer_core::types::{PricingError, PricingResult};
use pricer_models::instruments::{Strategy, StrategyPayout, StrikeSet};
use pricer_models::models::{TreeModel, TreeParams};

/// Implied real-world step probability.
///
/// # Errors
///
/// - `InvalidParameter` if the market parameters are invalid
/// - `NumericDegeneracy` if the result is not finite or lies outside [0, 1]
///
/// # Examples
///
/// ```rust
/// use pricer_core::market_data::MarketParams;
/// use pricer_pricing::real_world::real_world_probability;
///
/// // μ > r tilts the lattice upwards.
/// let p = real_world_probability(&MarketParams::default()).unwrap();
/// assert!(p > 0.5 && p < 0.51);
/// ```
pub fn real_world_probability(market: &MarketParams) -> PricingResult<f64> {
    market.validate()?;
    let dt = market.dt();
    let p = 0.5 - (market.rate - market.drift) * dt / (2.0 * market.volatility * dt.sqrt());
    if !p.is_finite() || !(0.0..=1.0).contains(&p) {
        return Err(PricingError::NumericDegeneracy(format!(
            "real-world probability {p} outside [0, 1] (r = {}, μ = {}, σ = {}, Δt = {dt})",
            market.rate, market.drift, market.volatility
        )));
    }
    Ok(p)
}

/// Terminal prices of a lattice with their real-world masses.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PriceDistribution {
    /// `S·u^(N−j)·d^j` for `j` in `0..=N`
    pub prices: Vec<f64>,
    /// Binomial mass of each price
    pub masses: Vec<f64>,
}

impl PriceDistribution {
    /// Expectation of `f` over the distribution.
    pub fn expectation<F: Fn(f64) -> f64>(&self, f: F) -> f64 {
        self.prices
            .iter()
            .zip(self.masses.iter())
            .map(|(&s, &m)| m * f(s))
            .sum()
    }

    /// Total mass on prices strictly inside `(lower, upper)`.
    pub fn mass_between(&self, lower: f64, upper: f64) -> f64 {
        self.prices
            .iter()
            .zip(self.masses.iter())
            .filter(|&(&s, _)| s > lower && s < upper)
            .map(|(_, &m)| m)
            .sum()
    }

    /// Sum of all masses.
    pub fn total_mass(&self) -> f64 {
        self.masses.iter().sum()
    }
}

/// Real-world analyzer for one tree model.
///
/// # Examples
///
/// ```rust
/// use pricer_core::market_data::MarketParams;
/// use pricer_models::instruments::StrategyPayout;
/// use pricer_models::models::TreeModel;
/// use pricer_pricing::real_world::RealWorldAnalyzer;
///
/// let market = MarketParams::default();
/// let analyzer = RealWorldAnalyzer::new(TreeModel::CoxRossRubinstein, &market).unwrap();
/// let condor = StrategyPayout::iron_condor(90.0, 95.0, 105.0, 110.0).unwrap();
///
/// let probability = analyzer.profit_probability(&condor).unwrap();
/// assert!(probability > 0.0 && probability < 1.0);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct RealWorldAnalyzer {
    model: TreeModel,
    probability: f64,
    distribution: PriceDistribution,
}

impl RealWorldAnalyzer {
    /// Builds the analyzer for `model`, deriving its own lattice factors.
    pub fn new(model: TreeModel, market: &MarketParams) -> PricingResult<Self> {
        let params = model.tree_params(
            market.n_steps,
            market.maturity,
            market.rate,
            market.volatility,
            market.drift,
        )?;
        let ln_coefficients = ln_binomial_coefficients::<f64>(market.n_steps);
        Self::from_parts(model, market, &params, &ln_coefficients)
    }

    /// Builds the analyzer from precomputed tree parameters and log binomial
    /// coefficients for `market.n_steps`.
    ///
    /// # Errors
    ///
    /// `NumericDegeneracy` if the real-world probability is out of range or
    /// the coefficient vector does not have `N + 1` entries.
    pub fn from_parts(
        model: TreeModel,
        market: &MarketParams,
        params: &TreeParams,
        ln_coefficients: &[f64],
    ) -> PricingResult<Self> {
        let n = market.n_steps;
        if ln_coefficients.len() != n + 1 {
            return Err(PricingError::NumericDegeneracy(format!(
                "expected {} binomial coefficients, got {}",
                n + 1,
                ln_coefficients.len()
            )));
        }
        let probability = real_world_probability(market)?;
        let masses = binomial_masses(ln_coefficients, probability)?;
        let prices = (0..=n)
            .map(|downs| params.node_price(market.spot, n, n - downs))
            .collect();

        Ok(Self {
            model,
            probability,
            distribution: PriceDistribution { prices, masses },
        })
    }

    /// Analyzers for all three models, in [`TreeModel::ALL`] order.
    ///
    /// The coefficient vector is computed once and shared.
    pub fn for_all_models(market: &MarketParams) -> PricingResult<[RealWorldAnalyzer; 3]> {
        let ln_coefficients = ln_binomial_coefficients::<f64>(market.n_steps);
        let build = |model: TreeModel| -> PricingResult<RealWorldAnalyzer> {
            let params = model.tree_params(
                market.n_steps,
                market.maturity,
                market.rate,
                market.volatility,
                market.drift,
            )?;
            Self::from_parts(model, market, &params, &ln_coefficients)
        };
        Ok([
            build(TreeModel::CoxRossRubinstein)?,
            build(TreeModel::Shreve)?,
            build(TreeModel::DriftAdjusted)?,
        ])
    }

    /// The tree model supplying (u, d).
    #[inline]
    pub fn model(&self) -> TreeModel {
        self.model
    }

    /// The real-world step probability p_rw.
    #[inline]
    pub fn probability(&self) -> f64 {
        self.probability
    }

    /// The terminal distribution.
    #[inline]
    pub fn distribution(&self) -> &PriceDistribution {
        &self.distribution
    }

    /// Exact expected payout under the real-world measure.
    pub fn expected_payout(&self, payout: &StrategyPayout) -> f64 {
        self.distribution.expectation(|s| payout.payout(s))
    }

    /// Exact expected profit `Σ mass · (capital − payout)`.
    pub fn expected_profit(&self, payout: &StrategyPayout, initial_capital: f64) -> f64 {
        self.distribution
            .expectation(|s| initial_capital - payout.payout(s))
    }

    /// Mass strictly inside the approximate profit zone.
    ///
    /// Only the Iron Condor has a profit zone; other payouts return `None`.
    pub fn profit_probability(&self, payout: &StrategyPayout) -> Option<f64> {
        payout
            .profit_zone()
            .map(|(lower, upper)| self.distribution.mass_between(lower, upper))
    }
}

/// Real-world expected profit of a strategy under one tree model.
///
/// # Errors
///
/// Strike validation errors from the payout, otherwise as
/// [`RealWorldAnalyzer::new`].
pub fn real_world_expected_profit(
    model: TreeModel,
    market: &MarketParams,
    strategy: Strategy,
    strikes: &StrikeSet,
    initial_capital: f64,
) -> PricingResult<f64> {
    let payout = StrategyPayout::for_strategy(strategy, strikes)?;
    let analyzer = RealWorldAnalyzer::new(model, market)?;
    Ok(analyzer.expected_profit(&payout, initial_capital))
}

/// Real-world profit probability, `None` unless `strategy` is an Iron Condor.
pub fn real_world_profit_probability(
    model: TreeModel,
    market: &MarketParams,
    strategy: Strategy,
    strikes: &StrikeSet,
) -> PricingResult<Option<f64>> {
    let payout = StrategyPayout::for_strategy(strategy, strikes)?;
    let analyzer = RealWorldAnalyzer::new(model, market)?;
    Ok(analyzer.profit_probability(&payout))
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn test_probability_formula() {
        let market = MarketParams::default();
        let dt: f64 = 1.0 / 365.0;
        let expected = 0.5 - (0.05 - 0.08) * dt / (2.0 * 0.2 * dt.sqrt());
        assert_abs_diff_eq!(real_world_probability(&market).unwrap(), expected, epsilon = 1e-15);
    }

    #[test]
    fn test_probability_is_half_when_drift_equals_rate() {
        let mut market = MarketParams::default();
        market.drift = market.rate;
        assert_eq!(real_world_probability(&market).unwrap(), 0.5);
    }

    #[test]
    fn test_out_of_range_probability_is_degenerate() {
        // Large |r − μ| with small σ and a single step.
        let market = MarketParams::new(100.0, 0.2, -0.5, 0.01, 5.0, 1, 100).unwrap();
        assert!(real_world_probability(&market).unwrap_err().is_degenerate());
        assert!(RealWorldAnalyzer::new(TreeModel::Shreve, &market).is_err());
    }

    #[test]
    fn test_masses_normalised_for_every_model() {
        let market = MarketParams::default();
        for analyzer in RealWorldAnalyzer::for_all_models(&market).unwrap() {
            let distribution = analyzer.distribution();
            assert_eq!(distribution.prices.len(), 366);
            assert_abs_diff_eq!(distribution.total_mass(), 1.0, epsilon = 1e-10);
            // j = 0 is the all-up node.
            assert!(distribution.prices[0] > distribution.prices[365]);
        }
    }

    #[test]
    fn test_models_share_probability_but_not_prices() {
        let analyzers = RealWorldAnalyzer::for_all_models(&MarketParams::default()).unwrap();
        assert_eq!(analyzers[0].probability(), analyzers[1].probability());
        assert_eq!(analyzers[1].probability(), analyzers[2].probability());
        assert_ne!(analyzers[0].distribution().prices, analyzers[1].distribution().prices);
        for (analyzer, model) in analyzers.iter().zip(TreeModel::ALL) {
            assert_eq!(analyzer.model(), model);
        }
    }

    #[test]
    fn test_expected_profit_is_capital_minus_expected_payout() {
        let market = MarketParams::default();
        let analyzer = RealWorldAnalyzer::new(TreeModel::DriftAdjusted, &market).unwrap();
        let condor = StrategyPayout::iron_condor(90.0, 95.0, 105.0, 110.0).unwrap();
        let expected = analyzer.expected_profit(&condor, 2.0);
        assert_abs_diff_eq!(expected, 2.0 - analyzer.expected_payout(&condor), epsilon = 1e-9);
    }

    #[test]
    fn test_high_capital_guarantees_profit() {
        let market = MarketParams::default();
        let condor = StrategyPayout::iron_condor(90.0, 95.0, 105.0, 110.0).unwrap();
        for analyzer in RealWorldAnalyzer::for_all_models(&market).unwrap() {
            // Capital above the maximum payout of 5.
            assert!(analyzer.expected_profit(&condor, 6.0) > 0.0);
        }
    }

    #[test]
    fn test_profit_probability_only_for_iron_condor() {
        let market = MarketParams::default();
        let analyzer = RealWorldAnalyzer::new(TreeModel::CoxRossRubinstein, &market).unwrap();
        let condor = StrategyPayout::iron_condor(90.0, 95.0, 105.0, 110.0).unwrap();
        let probability = analyzer.profit_probability(&condor).unwrap();
        assert!((0.0..=1.0).contains(&probability));

        let wide = StrategyPayout::iron_condor(10.0, 20.0, 1_000.0, 2_000.0).unwrap();
        assert_abs_diff_eq!(analyzer.profit_probability(&wide).unwrap(), 1.0, epsilon = 1e-10);

        let straddle = StrategyPayout::straddle(100.0).unwrap();
        assert_eq!(analyzer.profit_probability(&straddle), None);
    }

    #[test]
    fn test_free_functions() {
        let market = MarketParams::default().with_steps(100);
        let strikes = StrikeSet::default();
        let profit = real_world_expected_profit(
            TreeModel::Shreve,
            &market,
            Strategy::IronCondor,
            &strikes,
            1.5,
        )
        .unwrap();
        assert!(profit.is_finite());

        let straddle = real_world_profit_probability(
            TreeModel::Shreve,
            &market,
            Strategy::Straddle,
            &StrikeSet::straddle(100.0),
        )
        .unwrap();
        assert_eq!(straddle, None);

        let bad = StrikeSet::new(95.0, 90.0, 105.0, 110.0);
        assert!(matches!(
            real_world_expected_profit(TreeModel::Shreve, &market, Strategy::IronCondor, &bad, 1.0),
            Err(PricingError::InvalidStrikeOrdering(_))
        ));
    }

    #[test]
    fn test_from_parts_checks_coefficient_length() {
        let market = MarketParams::default().with_steps(10);
        let params = TreeModel::Shreve.tree_params(10, 1.0, 0.05, 0.2, 0.08).unwrap();
        let wrong = ln_binomial_coefficients::<f64>(9);
        assert!(RealWorldAnalyzer::from_parts(TreeModel::Shreve, &market, &params, &wrong)
            .unwrap_err()
            .is_degenerate());
    }
}
