//! Exhaustive strike grid search.
//!
//! For every candidate and every tree model the optimiser tracks two
//! independent objectives:
//! - simulated expected profit: model capital minus the mean payout over a
//!   GBM final-price sample
//! - analytic real-world expected profit over the model's own lattice
//!
//! Each objective keeps the first candidate that attains its maximum.
//! Candidates that fail to price are skipped and reported, never fatal.
//! Market-wide degeneracy is contained per model: a degenerate real-world
//! measure drops only the real-world objective, a degenerate lattice drops
//! only that model.

use pricer_core::market_data::MarketParams;
use pricer_core::math::binomial::ln_binomial_coefficients;
use pricer_core::types::{PricingError, PricingResult};
use pricer_models::instruments::{Strategy, StrategyPayout, StrikeSet};
use pricer_models::models::TreeModel;
use pricer_pricing::analysis::initial_capital;
use pricer_pricing::lattice::BinomialPricer;
use pricer_pricing::real_world::RealWorldAnalyzer;

use super::grid::{generate_strike_grid, GridSize};
use crate::OptimiserError;

/// Best strikes for one objective.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Optimum {
    /// Winning strike tuple
    pub strikes: StrikeSet,
    /// Objective value at `strikes`
    pub expected_profit: f64,
}

/// Search outcome for one tree model.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ModelOptimum {
    /// Tree model
    pub model: TreeModel,
    /// Best simulated expected profit, `None` if nothing was evaluated
    pub gbm: Option<Optimum>,
    /// Best real-world expected profit, `None` if nothing was evaluated
    pub rw: Option<Optimum>,
    /// Real-world profit probability at the real-world optimum
    pub rw_profit_probability: Option<f64>,
    /// Why an objective of this model was not scored
    pub skip_reason: Option<String>,
}

impl ModelOptimum {
    fn empty(model: TreeModel) -> Self {
        Self {
            model,
            gbm: None,
            rw: None,
            rw_profit_probability: None,
            skip_reason: None,
        }
    }

    fn offer(&mut self, strikes: StrikeSet, score: &ModelScore) {
        if self
            .gbm
            .map_or(true, |best| score.gbm_expected_profit > best.expected_profit)
        {
            self.gbm = Some(Optimum {
                strikes,
                expected_profit: score.gbm_expected_profit,
            });
        }
        let Some(rw_profit) = score.rw_expected_profit else {
            return;
        };
        if self.rw.map_or(true, |best| rw_profit > best.expected_profit) {
            self.rw = Some(Optimum {
                strikes,
                expected_profit: rw_profit,
            });
            self.rw_profit_probability = score.profit_probability;
        }
    }
}

/// Objective values of one candidate under one model.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ModelScore {
    /// Net premium received
    pub initial_capital: f64,
    /// Capital minus mean simulated payout
    pub gbm_expected_profit: f64,
    /// Exact real-world expected profit, `None` if the real-world measure is
    /// degenerate
    pub rw_expected_profit: Option<f64>,
    /// Real-world profit probability, Iron Condor only
    pub profit_probability: Option<f64>,
}

/// Result of evaluating one candidate.
#[derive(Debug, Clone, PartialEq)]
pub enum CandidateOutcome {
    /// Every available model priced the candidate.
    Evaluated {
        /// Candidate strikes
        strikes: StrikeSet,
        /// Scores in [`TreeModel::ALL`] order, `None` for an unavailable model
        scores: [Option<ModelScore>; 3],
    },
    /// The candidate failed to price and was left out of the search.
    Skipped {
        /// Candidate strikes
        strikes: StrikeSet,
        /// Why it failed
        reason: PricingError,
    },
}

/// A candidate left out of the search.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SkippedCandidate {
    /// Candidate strikes
    pub strikes: StrikeSet,
    /// Rendered failure
    pub reason: String,
}

/// Completed grid search.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct OptimisationResult {
    /// Strategy searched
    pub strategy: Strategy,
    /// Grid density used, `None` for an explicit candidate list
    pub grid_size: Option<GridSize>,
    /// Per-model optima in [`TreeModel::ALL`] order
    pub models: [ModelOptimum; 3],
    /// Number of candidates evaluated by every available model
    pub evaluated: usize,
    /// Candidates that failed to price
    pub skipped: Vec<SkippedCandidate>,
}

impl OptimisationResult {
    /// Optimum of `model`.
    #[inline]
    pub fn model(&self, model: TreeModel) -> &ModelOptimum {
        &self.models[model.index()]
    }

    /// Total number of candidates considered.
    #[inline]
    pub fn candidates(&self) -> usize {
        self.evaluated + self.skipped.len()
    }
}

/// What one tree model contributes to a search under the current market.
#[derive(Debug, Clone, PartialEq)]
pub enum ModelSetup {
    /// Both objectives are scored.
    Full(RealWorldAnalyzer),
    /// The real-world measure is degenerate, so only the simulated objective
    /// is scored.
    SimulatedOnly {
        /// Tree model
        model: TreeModel,
        /// Real-world failure
        reason: PricingError,
    },
    /// The lattice is degenerate and the model takes no part in the search.
    Unavailable {
        /// Tree model
        model: TreeModel,
        /// Lattice failure
        reason: PricingError,
    },
}

impl ModelSetup {
    /// The tree model.
    pub fn model(&self) -> TreeModel {
        match self {
            ModelSetup::Full(analyzer) => analyzer.model(),
            ModelSetup::SimulatedOnly { model, .. } | ModelSetup::Unavailable { model, .. } => {
                *model
            }
        }
    }

    /// The real-world analyzer, if the measure is usable.
    pub fn analyzer(&self) -> Option<&RealWorldAnalyzer> {
        match self {
            ModelSetup::Full(analyzer) => Some(analyzer),
            _ => None,
        }
    }

    /// Why the model is degraded, if it is.
    pub fn reason(&self) -> Option<&PricingError> {
        match self {
            ModelSetup::Full(_) => None,
            ModelSetup::SimulatedOnly { reason, .. } | ModelSetup::Unavailable { reason, .. } => {
                Some(reason)
            }
        }
    }

    /// Whether the model can price at all.
    #[inline]
    pub fn is_available(&self) -> bool {
        !matches!(self, ModelSetup::Unavailable { .. })
    }
}

/// Strike grid optimiser.
///
/// Owns a [`BinomialPricer`] whose cache is shared across candidates, since
/// every candidate uses the same `(N, T, r, σ, μ)`.
///
/// # Examples
///
/// ```
/// use pricer_core::market_data::MarketParams;
/// use pricer_models::instruments::Strategy;
/// use pricer_models::models::TreeModel;
/// use pricer_optimiser::strikes::{GridSize, StrikeOptimiser};
///
/// let market = MarketParams::default().with_steps(50);
/// let sample = vec![92.0, 100.0, 104.0, 111.0];
///
/// let mut optimiser = StrikeOptimiser::new(market, Strategy::IronCondor);
/// let result = optimiser.optimise(&sample, GridSize::Small).unwrap();
///
/// assert_eq!(result.evaluated, 20);
/// assert!(result.model(TreeModel::Shreve).rw.is_some());
/// ```
#[derive(Debug, Clone)]
pub struct StrikeOptimiser {
    market: MarketParams,
    strategy: Strategy,
    pricer: BinomialPricer,
}

impl StrikeOptimiser {
    /// Creates an optimiser for `strategy` under `market`.
    pub fn new(market: MarketParams, strategy: Strategy) -> Self {
        Self {
            market,
            strategy,
            pricer: BinomialPricer::new(),
        }
    }

    /// The pricer, exposing its cache statistics.
    pub fn pricer(&self) -> &BinomialPricer {
        &self.pricer
    }

    /// Searches the generated grid of `grid_size`.
    ///
    /// # Errors
    ///
    /// - `EmptySample` if `final_prices` is empty
    /// - `EmptyGrid` if the grid has no candidates for the spot
    /// - `Pricing` if the market parameters are invalid
    pub fn optimise(
        &mut self,
        final_prices: &[f64],
        grid_size: GridSize,
    ) -> Result<OptimisationResult, OptimiserError> {
        let grid = generate_strike_grid(self.market.spot, grid_size);
        if grid.is_empty() {
            return Err(OptimiserError::EmptyGrid {
                spot: self.market.spot,
            });
        }
        let mut result = self.optimise_over(&grid, final_prices)?;
        result.grid_size = Some(grid_size);
        tracing::info!(
            strategy = %self.strategy,
            grid = %grid_size,
            evaluated = result.evaluated,
            skipped = result.skipped.len(),
            "Strike optimisation complete"
        );
        Ok(result)
    }

    /// Searches an explicit candidate list in order.
    ///
    /// # Errors
    ///
    /// As [`optimise`](Self::optimise), with `EmptyGrid` for an empty list.
    pub fn optimise_over(
        &mut self,
        candidates: &[StrikeSet],
        final_prices: &[f64],
    ) -> Result<OptimisationResult, OptimiserError> {
        if final_prices.is_empty() {
            return Err(OptimiserError::EmptySample);
        }
        if candidates.is_empty() {
            return Err(OptimiserError::EmptyGrid {
                spot: self.market.spot,
            });
        }
        let setups = self.setup()?;

        let mut models = TreeModel::ALL.map(ModelOptimum::empty);
        for (optimum, setup) in models.iter_mut().zip(setups.iter()) {
            optimum.skip_reason = setup.reason().map(ToString::to_string);
        }
        let mut evaluated = 0;
        let mut skipped = Vec::new();

        for strikes in candidates {
            match self.evaluate(&setups, strikes, final_prices) {
                CandidateOutcome::Evaluated { strikes, scores } => {
                    evaluated += 1;
                    for (optimum, score) in models.iter_mut().zip(scores.iter()) {
                        if let Some(score) = score {
                            optimum.offer(strikes, score);
                        }
                    }
                }
                CandidateOutcome::Skipped { strikes, reason } => {
                    tracing::debug!(
                        k1 = strikes.k1,
                        k2 = strikes.k2,
                        k3 = strikes.k3,
                        k4 = strikes.k4,
                        reason = %reason,
                        "Skipping strike candidate"
                    );
                    skipped.push(SkippedCandidate {
                        strikes,
                        reason: reason.to_string(),
                    });
                }
            }
        }

        Ok(OptimisationResult {
            strategy: self.strategy,
            grid_size: None,
            models,
            evaluated,
            skipped,
        })
    }

    /// What each model can contribute under the optimiser's market, sharing
    /// one coefficient vector.
    ///
    /// # Errors
    ///
    /// `InvalidParameter` if the market parameters are invalid. Degeneracy
    /// of a lattice or of the real-world measure is recorded in the setup.
    pub fn setup(&mut self) -> PricingResult<[ModelSetup; 3]> {
        self.market.validate()?;
        let ln_coefficients = ln_binomial_coefficients::<f64>(self.market.n_steps);
        let market = self.market;
        let pricer = &mut self.pricer;
        Ok(TreeModel::ALL.map(|model| {
            let setup = match pricer.tree_params(model, &market) {
                Err(reason) => ModelSetup::Unavailable { model, reason },
                Ok(params) => {
                    match RealWorldAnalyzer::from_parts(model, &market, &params, &ln_coefficients) {
                        Ok(analyzer) => ModelSetup::Full(analyzer),
                        Err(reason) => ModelSetup::SimulatedOnly { model, reason },
                    }
                }
            };
            if let Some(reason) = setup.reason() {
                tracing::warn!(
                    model = %model,
                    available = setup.is_available(),
                    reason = %reason,
                    "Tree model degraded for strike search"
                );
            }
            setup
        }))
    }

    /// Scores one candidate under every available model.
    ///
    /// `setups` must be in [`TreeModel::ALL`] order.
    pub fn evaluate(
        &mut self,
        setups: &[ModelSetup; 3],
        strikes: &StrikeSet,
        final_prices: &[f64],
    ) -> CandidateOutcome {
        match self.score(setups, strikes, final_prices) {
            Ok(scores) => CandidateOutcome::Evaluated {
                strikes: *strikes,
                scores,
            },
            Err(reason) => CandidateOutcome::Skipped {
                strikes: *strikes,
                reason,
            },
        }
    }

    fn score(
        &mut self,
        setups: &[ModelSetup; 3],
        strikes: &StrikeSet,
        final_prices: &[f64],
    ) -> PricingResult<[Option<ModelScore>; 3]> {
        let payout = StrategyPayout::for_strategy(self.strategy, strikes)?;
        let mean_payout = payout.mean_payout(final_prices).ok_or_else(|| {
            PricingError::invalid_parameter("final_prices", 0.0, "sample must not be empty")
        })?;
        if !setups.iter().any(ModelSetup::is_available) {
            return Err(PricingError::NumericDegeneracy(
                "no tree model has a valid lattice for the market".to_string(),
            ));
        }

        let mut scores = [None; 3];
        for (slot, setup) in scores.iter_mut().zip(setups.iter()) {
            if !setup.is_available() {
                continue;
            }
            let model = setup.model();
            let capital =
                initial_capital(&mut self.pricer, model, &self.market, self.strategy, strikes)?;
            let analyzer = setup.analyzer();
            let score = ModelScore {
                initial_capital: capital,
                gbm_expected_profit: capital - mean_payout,
                rw_expected_profit: analyzer.map(|a| a.expected_profit(&payout, capital)),
                profit_probability: analyzer.and_then(|a| a.profit_probability(&payout)),
            };
            if !score.gbm_expected_profit.is_finite()
                || score.rw_expected_profit.is_some_and(|p| !p.is_finite())
            {
                return Err(PricingError::NumericDegeneracy(format!(
                    "{} expected profit is not finite for {strikes}",
                    model.name()
                )));
            }
            *slot = Some(score);
        }
        Ok(scores)
    }
}

/// Runs a grid search with a fresh optimiser.
///
/// # Errors
///
/// See [`StrikeOptimiser::optimise`].
pub fn optimise_strikes(
    market: &MarketParams,
    final_prices: &[f64],
    grid_size: GridSize,
    strategy: Strategy,
) -> Result<OptimisationResult, OptimiserError> {
    StrikeOptimiser::new(*market, strategy).optimise(final_prices, grid_size)
}
