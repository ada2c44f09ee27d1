//! Market data for a calculation request.
//!
//! - [`MarketParams`]: spot, rates, drift, volatility and discretisation counts

mod params;

pub use params::MarketParams;
