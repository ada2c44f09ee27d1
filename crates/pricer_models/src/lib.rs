//! # Pricer Models (L2: Business Logic)
//!
//! Option strategies, payout structures and price dynamics.
//!
//! This crate provides:
//! - Option types and multi-leg strategies (Iron Condor, Straddle, Strangle)
//! - Payout structures owed by the seller at expiry
//! - Binomial lattice parameterisations (CRR, Shreve, Drift-Adjusted)
//! - Real-world GBM dynamics
//!
//! ## Design Principles
//!
//! - **Enum-based models and payouts** for static dispatch and exhaustive matching
//! - **Validated construction**: payouts check strike ordering themselves

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![deny(rustdoc::private_intra_doc_links)]

pub mod instruments;
pub mod models;
