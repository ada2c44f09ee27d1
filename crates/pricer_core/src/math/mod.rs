//! Mathematical utilities.
//!
//! - [`binomial`]: log-space binomial coefficients and binomial probability masses

pub mod binomial;
