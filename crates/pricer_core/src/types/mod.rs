//! Core error types.
//!
//! This module provides:
//! - `error`: Structured error taxonomy for pricing, simulation and payout construction
//!
//! # Re-exports
//!
//! - [`PricingError`], [`PricingResult`] from `error`

pub mod error;

pub use error::{PricingError, PricingResult};
