//! GBM path simulation.
//!
//! # Architecture
//!
//! ```text
//! GbmSimulator
//! ├── SimulationConfig  (path and step counts, optional seed)
//! ├── PricerRng         (single explicit randomness source per run)
//! └── generate() → PathSet → final_prices()
//! ```
//!
//! ```rust
//! use pricer_pricing::mc::{GbmSimulator, SimulationResult};
//! use pricer_pricing::rng::PricerRng;
//! use pricer_models::instruments::StrategyPayout;
//!
//! let sim = GbmSimulator::new(100.0, 0.08, 0.2, 1.0, 365, 1_000).unwrap();
//! let paths = sim.generate(&mut PricerRng::from_seed(42));
//! let payout = StrategyPayout::iron_condor(90.0, 95.0, 105.0, 110.0).unwrap();
//!
//! let result = SimulationResult::new(paths, &payout);
//! assert_eq!(result.final_prices.len(), 1_000);
//! assert!(result.mean_payout() >= 0.0);
//! ```

mod config;
mod paths;

pub use config::{SimulationConfig, SimulationConfigBuilder};
pub use paths::{simulate_gbm, GbmSimulator, PathSet, SimulationResult};
