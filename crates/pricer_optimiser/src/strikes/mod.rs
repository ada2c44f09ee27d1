//! Strike grid generation and search.

mod grid;
mod optimiser;

pub use grid::{generate_strike_grid, GridSize, ParseGridSizeError};
pub use optimiser::{
    optimise_strikes, CandidateOutcome, ModelOptimum, ModelScore, ModelSetup, OptimisationResult,
    Optimum, SkippedCandidate, StrikeOptimiser,
};
