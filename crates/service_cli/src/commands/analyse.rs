//! Analyse command implementation
//!
//! Prices the configured strategy under every tree model and compares the
//! simulated and real-world expected profit.

use pricer_core::market_data::MarketParams;
use pricer_pricing::analysis::{analyse_strategy, StrategyAnalysis};
use pricer_pricing::lattice::BinomialPricer;
use serde::Serialize;
use tracing::{debug, info, warn};

use super::{rng_for, simulate_final_prices};
use crate::config::SimConfig;
use crate::output::{num, opt_num, pct, Report, Table};
use crate::validation::{validate_market, validate_strikes};
use crate::Result;

/// Result of the analyse command
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AnalysisReport {
    pub seed: u64,
    pub market: MarketParams,
    #[serde(flatten)]
    pub analysis: StrategyAnalysis,
}

impl Report for AnalysisReport {
    fn to_table(&self) -> String {
        let analysis = &self.analysis;
        let mut out = format!(
            "{} {} | S = {} | mean simulated payout = {} | seed = {}\n",
            analysis.strategy,
            analysis.strikes,
            self.market.spot,
            num(analysis.mean_payout),
            self.seed
        );

        let mut legs = Table::new(["Model", "Leg", "Type", "Strike", "Price"]);
        for report in &analysis.reports {
            for quote in &report.legs {
                legs.row([
                    report.model.name().to_string(),
                    format!("{:?}", quote.leg.position),
                    quote.leg.option_type.to_string(),
                    num(quote.leg.strike),
                    num(quote.price),
                ]);
            }
        }
        out.push_str(&legs.render());

        let mut summary = Table::new([
            "Model",
            "Initial capital",
            "GBM E[profit]",
            "RW E[profit]",
            "RW P(profit)",
        ]);
        for report in &analysis.reports {
            summary.row([
                report.model.name().to_string(),
                num(report.initial_capital),
                num(report.gbm_expected_profit),
                opt_num(report.rw_expected_profit),
                pct(report.profit_probability),
            ]);
        }
        out.push_str(&summary.render());

        for report in &analysis.reports {
            if let Some(reason) = &report.rw_unavailable {
                out.push_str(&format!("{}: no real-world figures: {reason}\n", report.model));
            }
        }
        for unavailable in &analysis.unavailable {
            out.push_str(&format!("{}: unavailable: {}\n", unavailable.model, unavailable.reason));
        }
        out
    }
}

/// Run the analyse command
pub fn run(config: &SimConfig) -> Result<AnalysisReport> {
    validate_market(&config.market)?;
    validate_strikes(config.strategy, &config.strikes, config.market.spot)?;

    let mut rng = rng_for(config);
    let seed = rng.seed();
    let final_prices = simulate_final_prices(config, &mut rng)?;

    let mut pricer = BinomialPricer::new();
    let analysis = analyse_strategy(
        &mut pricer,
        &config.market,
        config.strategy,
        &config.strikes,
        &final_prices,
    )?;
    for unavailable in &analysis.unavailable {
        warn!(model = %unavailable.model, reason = %unavailable.reason, "Tree model unavailable");
    }
    debug!(
        hits = pricer.cache().hits(),
        misses = pricer.cache().misses(),
        "Tree parameter cache"
    );
    info!(strategy = %config.strategy, strikes = %config.strikes, "Analysis complete");

    Ok(AnalysisReport {
        seed,
        market: config.market,
        analysis,
    })
}
