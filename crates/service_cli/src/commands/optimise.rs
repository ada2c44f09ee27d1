//! Optimise command implementation
//!
//! Searches a strike grid for the configured strategy on a freshly simulated
//! final-price sample.

use pricer_core::market_data::MarketParams;
use pricer_optimiser::strikes::{GridSize, OptimisationResult, Optimum, StrikeOptimiser};
use serde::Serialize;

use super::{rng_for, simulate_final_prices};
use crate::config::SimConfig;
use crate::output::{num, pct, Report, Table};
use crate::validation::validate_market;
use crate::Result;

/// Result of the optimise command
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OptimisationReport {
    pub seed: u64,
    pub market: MarketParams,
    #[serde(flatten)]
    pub result: OptimisationResult,
}

fn optimum_cells(optimum: Option<Optimum>) -> [String; 2] {
    match optimum {
        Some(o) => [o.strikes.to_string(), num(o.expected_profit)],
        None => ["-".to_string(), "-".to_string()],
    }
}

impl Report for OptimisationReport {
    fn to_table(&self) -> String {
        let result = &self.result;
        let grid = result
            .grid_size
            .map_or_else(|| "custom".to_string(), |g| g.to_string());
        let mut out = format!(
            "{} | {} grid | {} candidates, {} skipped | seed = {}\n",
            result.strategy,
            grid,
            result.candidates(),
            result.skipped.len(),
            self.seed
        );

        let mut table = Table::new([
            "Model",
            "GBM strikes",
            "GBM E[profit]",
            "RW strikes",
            "RW E[profit]",
            "RW P(profit)",
        ]);
        for model in &result.models {
            let [gbm_strikes, gbm_profit] = optimum_cells(model.gbm);
            let [rw_strikes, rw_profit] = optimum_cells(model.rw);
            table.row([
                model.model.name().to_string(),
                gbm_strikes,
                gbm_profit,
                rw_strikes,
                rw_profit,
                pct(model.rw_profit_probability),
            ]);
        }
        out.push_str(&table.render());

        for model in &result.models {
            if let Some(reason) = &model.skip_reason {
                out.push_str(&format!("{}: {reason}\n", model.model));
            }
        }
        for skipped in &result.skipped {
            out.push_str(&format!("skipped {}: {}\n", skipped.strikes, skipped.reason));
        }
        out
    }
}

/// Run the optimise command
///
/// `grid` overrides the configured grid size.
pub fn run(config: &SimConfig, grid: Option<GridSize>) -> Result<OptimisationReport> {
    validate_market(&config.market)?;

    let mut rng = rng_for(config);
    let seed = rng.seed();
    let final_prices = simulate_final_prices(config, &mut rng)?;

    let grid_size = grid.unwrap_or(config.grid_size);
    let mut optimiser = StrikeOptimiser::new(config.market, config.strategy);
    let result = optimiser.optimise(&final_prices, grid_size)?;

    Ok(OptimisationReport {
        seed,
        market: config.market,
        result,
    })
}
