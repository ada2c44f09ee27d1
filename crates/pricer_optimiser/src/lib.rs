//! # pricer_optimiser
//!
//! Strike selection for multi-leg option strategies.
//!
//! Sits above the pricing layer: every candidate strike tuple is priced with
//! `pricer_pricing` under each tree model and scored on two objectives,
//! simulated expected profit and real-world expected profit.
//!
//! ## Modules
//!
//! - `strikes`: grid generation and the exhaustive search
//!
//! ## Example
//!
//! ```rust
//! use pricer_core::market_data::MarketParams;
//! use pricer_models::instruments::Strategy;
//! use pricer_optimiser::prelude::*;
//!
//! let market = MarketParams::default().with_steps(40);
//! let finals = [95.0, 99.0, 101.0, 104.0];
//! let result = optimise_strikes(&market, &finals, GridSize::Small, Strategy::IronCondor).unwrap();
//! assert_eq!(result.candidates(), 20);
//! ```

#![warn(missing_docs)]

pub mod strikes;

mod error;

pub use error::OptimiserError;

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::strikes::*;
    pub use crate::OptimiserError;
}
