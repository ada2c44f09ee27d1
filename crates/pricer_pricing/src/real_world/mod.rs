//! Real-World Probability Analyzer.
//!
//! Profitability under the physical measure, computed by exact enumeration
//! over each model's lattice rather than by sampling.

mod analyzer;

pub use analyzer::{
    real_world_expected_profit, real_world_probability, real_world_profit_probability,
    PriceDistribution, RealWorldAnalyzer,
};
