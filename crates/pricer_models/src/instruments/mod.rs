//! Option types, strategies and payout structures.
//!
//! # Types
//!
//! - [`OptionType`]: vanilla call or put
//! - [`Strategy`]: Iron Condor, Straddle or Strangle, with its [`Leg`]s
//! - [`StrikeSet`]: ordered strike tuple (K1, K2, K3, K4)
//! - [`StrategyPayout`]: validated piecewise payout owed by the seller
//!
//! # Examples
//!
//! ```
//! use pricer_models::instruments::{Strategy, StrategyPayout, StrikeSet};
//!
//! let strikes = StrikeSet::new(90.0, 95.0, 105.0, 110.0);
//! let payout = StrategyPayout::for_strategy(Strategy::IronCondor, &strikes).unwrap();
//! assert_eq!(payout.payout(100.0), 0.0);
//! assert_eq!(payout.payout(80.0), 5.0);
//! ```

mod error;
mod payoff;
mod payout;
mod strategy;

pub use error::InstrumentError;
pub use payoff::OptionType;
pub use payout::StrategyPayout;
pub use strategy::{Leg, ParseStrategyError, Position, Strategy, StrikeSet};
