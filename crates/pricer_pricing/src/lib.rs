//! # Pricer Pricing (Layer 3: Pricing Engine)
//!
//! ## Layer 3 Role
//!
//! pricer_pricing turns the models of Layer 2 into numbers:
//! - Binomial tree pricing of European options with a bounded parameter cache
//! - Seeded GBM path simulation
//! - Exact real-world expected profit and profit probability
//! - Per-model strategy analysis combining all of the above
//!
//! ## Usage Example
//!
//! ```rust
//! use pricer_core::market_data::MarketParams;
//! use pricer_models::instruments::{Strategy, StrikeSet};
//! use pricer_pricing::analysis::analyse_strategy;
//! use pricer_pricing::lattice::BinomialPricer;
//! use pricer_pricing::mc::GbmSimulator;
//! use pricer_pricing::rng::PricerRng;
//!
//! let market = MarketParams::default().with_steps(100).with_paths(200);
//! let finals = GbmSimulator::from_market(&market)
//!     .unwrap()
//!     .generate(&mut PricerRng::from_seed(42))
//!     .final_prices();
//!
//! let mut pricer = BinomialPricer::new();
//! let analysis = analyse_strategy(
//!     &mut pricer,
//!     &market,
//!     Strategy::IronCondor,
//!     &StrikeSet::default(),
//!     &finals,
//! )
//! .unwrap();
//! assert_eq!(analysis.reports.len(), 3);
//! ```
//!
//! All computation is single-threaded and deterministic given a seed.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![deny(rustdoc::private_intra_doc_links)]

pub mod analysis;
pub mod lattice;
pub mod mc;
pub mod real_world;
pub mod rng;

pub use analysis::{analyse_strategy, initial_capital, ModelReport, StrategyAnalysis};
pub use lattice::{price_option, BinomialPricer, TreeParamsCache};
pub use mc::{simulate_gbm, GbmSimulator, PathSet, SimulationResult};
pub use real_world::RealWorldAnalyzer;
pub use rng::PricerRng;
