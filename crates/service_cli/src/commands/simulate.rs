//! Simulate command implementation
//!
//! Runs the GBM simulator under the real-world drift and summarises the
//! terminal distribution and the strategy payout over it.

use pricer_core::types::PricingError;
use pricer_models::instruments::{Strategy, StrategyPayout, StrikeSet};
use pricer_models::models::GbmDynamics;
use pricer_pricing::mc::{simulate_gbm, SimulationResult};
use serde::Serialize;
use tracing::info;

use super::rng_for;
use crate::config::SimConfig;
use crate::output::{num, Report, Table};
use crate::validation::{validate_market, validate_strikes};
use crate::Result;

/// Result of the simulate command
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SimulationSummary {
    pub seed: u64,
    pub strategy: Strategy,
    pub strikes: StrikeSet,
    pub n_paths: usize,
    pub n_steps: usize,
    pub mean_final_price: f64,
    pub std_final_price: f64,
    pub min_final_price: f64,
    pub max_final_price: f64,
    /// Analytic E[S(T)] under the drift
    pub expected_final_price: f64,
    pub mean_payout: f64,
}

impl Report for SimulationSummary {
    fn to_table(&self) -> String {
        let mut table = Table::new(["Statistic", "Value"]);
        table
            .row(["Seed".to_string(), self.seed.to_string()])
            .row(["Paths".to_string(), self.n_paths.to_string()])
            .row(["Steps".to_string(), self.n_steps.to_string()])
            .row(["Mean S(T)".to_string(), num(self.mean_final_price)])
            .row(["Std S(T)".to_string(), num(self.std_final_price)])
            .row(["Min S(T)".to_string(), num(self.min_final_price)])
            .row(["Max S(T)".to_string(), num(self.max_final_price)])
            .row(["E[S(T)]".to_string(), num(self.expected_final_price)])
            .row([
                format!("Mean {} payout {}", self.strategy, self.strikes),
                num(self.mean_payout),
            ]);
        table.render()
    }
}

/// Run the simulate command
pub fn run(config: &SimConfig) -> Result<SimulationSummary> {
    let market = &config.market;
    validate_market(market)?;
    validate_strikes(config.strategy, &config.strikes, market.spot)?;
    let payout =
        StrategyPayout::for_strategy(config.strategy, &config.strikes).map_err(PricingError::from)?;

    let mut rng = rng_for(config);
    let seed = rng.seed();
    info!(seed, n_paths = market.n_paths, n_steps = market.n_steps, "Simulating GBM paths");
    let paths = simulate_gbm(
        market.drift,
        market.volatility,
        market.n_steps,
        market.n_paths,
        market.spot,
        market.maturity,
        &mut rng,
    )?;
    let result = SimulationResult::new(paths, &payout);

    let (min_final_price, max_final_price) = result
        .final_prices
        .iter()
        .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), &s| {
            (lo.min(s), hi.max(s))
        });
    let dynamics = GbmDynamics::new(market.drift, market.volatility)?;

    Ok(SimulationSummary {
        seed,
        strategy: config.strategy,
        strikes: config.strikes,
        n_paths: result.paths.n_paths(),
        n_steps: result.paths.n_steps(),
        mean_final_price: result.mean_final_price(),
        std_final_price: result.std_final_price(),
        min_final_price,
        max_final_price,
        expected_final_price: dynamics.expected_terminal(market.spot, market.maturity),
        mean_payout: result.mean_payout(),
    })
}
