//! # pricer_core: Mathematical Foundation for the Strategy Simulator
//!
//! ## Layer 1 (Foundation) Role
//!
//! pricer_core serves as the bottom layer of the workspace, providing:
//! - Error taxonomy: `PricingError` (`types::error`)
//! - Market parameters: `MarketParams` (`market_data`)
//! - Log-space binomial coefficients and masses (`math::binomial`)
//!
//! ## Zero Dependency Principle
//!
//! Layer 1 has no dependencies on other pricer_* crates, with minimal external dependencies:
//! - num-traits: Traits for generic numerical computation
//! - thiserror: Error derivation
//! - serde: Serialisation support (optional)
//!
//! ## Usage Examples
//!
//! ```rust
//! use pricer_core::market_data::MarketParams;
//! use pricer_core::math::binomial::{binomial_masses, ln_binomial_coefficients};
//!
//! let market = MarketParams::default();
//! let ln_c = ln_binomial_coefficients::<f64>(market.n_steps);
//! let masses = binomial_masses(&ln_c, 0.5).unwrap();
//! let total: f64 = masses.iter().sum();
//! assert!((total - 1.0).abs() < 1e-10);
//! ```
//!
//! ## Feature Flags
//!
//! - `serde`: Enable serialisation for `MarketParams`

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![deny(rustdoc::private_intra_doc_links)]

pub mod market_data;
pub mod math;
pub mod types;
