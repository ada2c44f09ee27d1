//! # Random Number Generation
//!
//! Seeded pseudo-random number generation for GBM path simulation.
//!
//! Every simulation run draws from exactly one explicit [`PricerRng`], so
//! the same seed always reproduces the same path matrix.
//!
//! ## Usage Example
//!
//! ```rust
//! use pricer_pricing::rng::PricerRng;
//!
//! let mut rng = PricerRng::from_seed(12345);
//!
//! let mut buffer = vec![0.0; 8];
//! rng.fill_normal(&mut buffer);
//! assert!(buffer.iter().all(|z| z.is_finite()));
//! ```

mod prng;

pub use prng::PricerRng;
