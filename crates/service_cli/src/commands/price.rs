//! Price command implementation
//!
//! Prices one European vanilla with a chosen binomial tree.

use pricer_core::market_data::MarketParams;
use pricer_core::types::PricingError;
use pricer_models::instruments::OptionType;
use pricer_models::models::TreeModel;
use pricer_pricing::lattice::price_option;
use serde::Serialize;
use tracing::info;

use crate::config::SimConfig;
use crate::output::{num, Report, Table};
use crate::validation::{validate_market, validate_strike};
use crate::Result;

/// Result of the price command
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PriceReport {
    pub model: TreeModel,
    pub option_type: OptionType,
    pub strike: f64,
    pub price: f64,
    pub market: MarketParams,
}

impl Report for PriceReport {
    fn to_table(&self) -> String {
        let mut table = Table::new(["Model", "Type", "Strike", "Steps", "Price"]);
        table.row([
            self.model.name().to_string(),
            self.option_type.to_string(),
            num(self.strike),
            self.market.n_steps.to_string(),
            num(self.price),
        ]);
        table.render()
    }
}

/// Run the price command
pub fn run(
    config: &SimConfig,
    model: TreeModel,
    strike: f64,
    option_type: &str,
) -> Result<PriceReport> {
    validate_market(&config.market)?;
    validate_strike(strike)?;
    let parsed: OptionType = option_type.parse().map_err(PricingError::from)?;

    info!(model = %model, strike, option_type = %parsed, "Pricing vanilla option");
    let price = price_option(model, &config.market, strike, option_type)?;

    Ok(PriceReport {
        model,
        option_type: parsed,
        strike,
        price,
        market: config.market,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::CliError;

    #[test]
    fn test_prices_with_configured_market() {
        let mut config = SimConfig::default();
        config.market.n_steps = 200;
        let report = run(&config, TreeModel::CoxRossRubinstein, 100.0, "C").unwrap();
        assert_eq!(report.option_type, OptionType::Call);
        // Black-Scholes value is 10.4506.
        assert!((report.price - 10.45).abs() < 0.1);
        assert!(report.to_table().contains("Cox-Ross-Rubinstein"));
    }

    #[test]
    fn test_rejects_bad_inputs() {
        let config = SimConfig::default();
        assert!(matches!(
            run(&config, TreeModel::Shreve, 100.0, "X"),
            Err(CliError::Pricing(PricingError::InvalidOptionType(_)))
        ));
        assert!(matches!(
            run(&config, TreeModel::Shreve, -5.0, "P"),
            Err(CliError::Validation(_))
        ));

        let mut config = SimConfig::default();
        config.market.volatility = 5.0;
        assert!(matches!(
            run(&config, TreeModel::Shreve, 100.0, "P"),
            Err(CliError::Validation(_))
        ));
    }
}
