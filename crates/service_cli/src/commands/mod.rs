//! CLI command implementations
//!
//! Each submodule implements a specific CLI command. Commands validate their
//! inputs, run the pricing core and return a [`Report`](crate::output::Report).

pub mod analyse;
pub mod optimise;
pub mod price;
pub mod simulate;

use pricer_pricing::mc::GbmSimulator;
use pricer_pricing::rng::PricerRng;
use tracing::info;

use crate::config::SimConfig;
use crate::Result;

/// Random source for one run: the configured seed, or fresh entropy.
pub(crate) fn rng_for(config: &SimConfig) -> PricerRng {
    match config.seed {
        Some(seed) => PricerRng::from_seed(seed),
        None => PricerRng::from_entropy(),
    }
}

/// Simulates the final-price sample used by `analyse` and `optimise`.
pub(crate) fn simulate_final_prices(config: &SimConfig, rng: &mut PricerRng) -> Result<Vec<f64>> {
    let simulator = GbmSimulator::from_market(&config.market)?;
    info!(
        n_paths = simulator.n_paths(),
        n_steps = simulator.n_steps(),
        seed = rng.seed(),
        "Simulating GBM paths"
    );
    Ok(simulator.generate(rng).final_prices())
}
