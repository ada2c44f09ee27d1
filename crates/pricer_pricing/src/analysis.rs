//! Strategy pricing and per-model analysis records.
//!
//! Initial capital is the seller's net premium: short legs add their price,
//! long legs subtract it. Profit is initial capital minus payout.

use pricer_core::market_data::MarketParams;
use pricer_core::math::binomial::ln_binomial_coefficients;
use pricer_core::types::{PricingError, PricingResult};
use pricer_models::instruments::{Leg, Strategy, StrategyPayout, StrikeSet};
use pricer_models::models::TreeModel;

use crate::lattice::BinomialPricer;
use crate::real_world::RealWorldAnalyzer;

/// One priced leg.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct LegQuote {
    /// The leg
    pub leg: Leg,
    /// Model price of the vanilla option
    pub price: f64,
}

impl LegQuote {
    /// Signed premium cash flow at inception.
    #[inline]
    pub fn premium(&self) -> f64 {
        self.leg.position.premium_sign() * self.price
    }
}

/// Leg quotes of a strategy and their net premium.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct StrategyQuote {
    /// Priced legs in [`Strategy::legs`] order
    pub legs: Vec<LegQuote>,
    /// Net premium received
    pub initial_capital: f64,
}

/// Prices every leg of `strategy` with `model`.
///
/// # Errors
///
/// Propagates pricing errors of any leg.
pub fn quote_strategy(
    pricer: &mut BinomialPricer,
    model: TreeModel,
    market: &MarketParams,
    strategy: Strategy,
    strikes: &StrikeSet,
) -> PricingResult<StrategyQuote> {
    let legs = strategy
        .legs(strikes)
        .into_iter()
        .map(|leg| {
            let price = pricer.price(model, market, leg.strike, leg.option_type)?;
            Ok(LegQuote { leg, price })
        })
        .collect::<PricingResult<Vec<_>>>()?;
    let initial_capital = legs.iter().map(LegQuote::premium).sum();
    Ok(StrategyQuote {
        legs,
        initial_capital,
    })
}

/// Net premium received for `strategy` under `model`.
///
/// # Examples
///
/// ```rust
/// use pricer_core::market_data::MarketParams;
/// use pricer_models::instruments::{Strategy, StrikeSet};
/// use pricer_models::models::TreeModel;
/// use pricer_pricing::analysis::initial_capital;
/// use pricer_pricing::lattice::BinomialPricer;
///
/// let mut pricer = BinomialPricer::new();
/// let market = MarketParams::default().with_steps(100);
/// let capital = initial_capital(
///     &mut pricer,
///     TreeModel::CoxRossRubinstein,
///     &market,
///     Strategy::IronCondor,
///     &StrikeSet::default(),
/// )
/// .unwrap();
/// assert!(capital > 0.0 && capital < 5.0);
/// ```
pub fn initial_capital(
    pricer: &mut BinomialPricer,
    model: TreeModel,
    market: &MarketParams,
    strategy: Strategy,
    strikes: &StrikeSet,
) -> PricingResult<f64> {
    quote_strategy(pricer, model, market, strategy, strikes).map(|q| q.initial_capital)
}

/// Results of one model for one strategy.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ModelReport {
    /// Tree model
    pub model: TreeModel,
    /// Priced legs
    pub legs: Vec<LegQuote>,
    /// Net premium received
    pub initial_capital: f64,
    /// Capital minus mean payout over the simulated sample
    pub gbm_expected_profit: f64,
    /// Exact real-world expected profit, `None` if the real-world measure is
    /// degenerate
    pub rw_expected_profit: Option<f64>,
    /// Real-world profit probability, Iron Condor only
    pub profit_probability: Option<f64>,
    /// Why the real-world figures are missing
    pub rw_unavailable: Option<String>,
}

/// A model whose lattice cannot be built for the market.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct UnavailableModel {
    /// Tree model
    pub model: TreeModel,
    /// Rendered lattice failure
    pub reason: String,
}

/// Per-model reports for one strategy.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct StrategyAnalysis {
    /// Analysed strategy
    pub strategy: Strategy,
    /// Strikes used
    pub strikes: StrikeSet,
    /// Mean payout over the simulated sample
    pub mean_payout: f64,
    /// Reports of the models that priced, in [`TreeModel::ALL`] order
    pub reports: Vec<ModelReport>,
    /// Models left out because their lattice is degenerate
    pub unavailable: Vec<UnavailableModel>,
}

impl StrategyAnalysis {
    /// Report of `model`, `None` if its lattice is degenerate.
    #[inline]
    pub fn report(&self, model: TreeModel) -> Option<&ModelReport> {
        self.reports.iter().find(|r| r.model == model)
    }
}

/// Runs the full single-request pipeline for every tree model.
///
/// Degeneracy is contained per model: a model whose lattice cannot be built
/// is listed in [`StrategyAnalysis::unavailable`], and a degenerate
/// real-world probability leaves only the real-world fields empty.
///
/// # Errors
///
/// - `InvalidParameter` if `final_prices` is empty or inputs are invalid
/// - `InvalidStrikeOrdering` if the strikes do not fit the strategy
/// - `NumericDegeneracy` if a leg price is not finite, or if no model's
///   lattice can be built
pub fn analyse_strategy(
    pricer: &mut BinomialPricer,
    market: &MarketParams,
    strategy: Strategy,
    strikes: &StrikeSet,
    final_prices: &[f64],
) -> PricingResult<StrategyAnalysis> {
    market.validate()?;
    let payout = StrategyPayout::for_strategy(strategy, strikes)?;
    let mean_payout = payout.mean_payout(final_prices).ok_or_else(|| {
        PricingError::invalid_parameter("final_prices", 0.0, "sample must not be empty")
    })?;
    let ln_coefficients = ln_binomial_coefficients::<f64>(market.n_steps);

    let mut reports = Vec::with_capacity(TreeModel::ALL.len());
    let mut unavailable = Vec::new();
    let mut first_failure = None;

    for model in TreeModel::ALL {
        let params = match pricer.tree_params(model, market) {
            Ok(params) => params,
            Err(err) => {
                unavailable.push(UnavailableModel {
                    model,
                    reason: err.to_string(),
                });
                first_failure.get_or_insert(err);
                continue;
            }
        };
        let quote = quote_strategy(pricer, model, market, strategy, strikes)?;
        let (rw_expected_profit, profit_probability, rw_unavailable) =
            match RealWorldAnalyzer::from_parts(model, market, &params, &ln_coefficients) {
                Ok(analyzer) => (
                    Some(analyzer.expected_profit(&payout, quote.initial_capital)),
                    analyzer.profit_probability(&payout),
                    None,
                ),
                Err(err) => (None, None, Some(err.to_string())),
            };
        reports.push(ModelReport {
            model,
            legs: quote.legs,
            initial_capital: quote.initial_capital,
            gbm_expected_profit: quote.initial_capital - mean_payout,
            rw_expected_profit,
            profit_probability,
            rw_unavailable,
        });
    }

    if reports.is_empty() {
        if let Some(err) = first_failure {
            return Err(err);
        }
    }
    Ok(StrategyAnalysis {
        strategy,
        strikes: *strikes,
        mean_payout,
        reports,
        unavailable,
    })
}
