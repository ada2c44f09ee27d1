//! Binomial tree pricing.
//!
//! - [`BinomialPricer`]: backward induction for the three tree models
//! - [`TreeParamsCache`]: explicit bounded LRU cache of lattice factors

mod cache;
mod pricer;

pub use cache::{TreeParamsCache, DEFAULT_CACHE_CAPACITY};
pub use pricer::{price_option, BinomialPricer};
