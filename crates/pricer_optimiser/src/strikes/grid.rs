//! Deterministic strike grid generation.
//!
//! Candidates are Iron-Condor-shaped tuples around the spot S:
//! - K1 walks upward from a fraction of S to just below 0.95·S
//! - K2 = K1 + offset, kept only while K2 < S
//! - K3 = ⌊S⌋ + offset, kept only while K3 > S
//! - K4 = K3 + offset
//!
//! Iteration order is fixed (K1, then K2, K3 and K4 offsets ascending), so
//! ties in the search resolve identically on every run.

use std::fmt;
use std::str::FromStr;

use pricer_models::instruments::StrikeSet;
use thiserror::Error;

/// Error returned when a grid size cannot be parsed.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("Unknown grid size '{0}': expected small, medium or large")]
pub struct ParseGridSizeError(pub String);

/// Grid density.
///
/// | Size   | K1 start | K1 step | Offsets     |
/// |--------|----------|---------|-------------|
/// | small  | 0.70·S   | 10      | 5, 10       |
/// | medium | 0.70·S   | 10      | 5, 10, 15   |
/// | large  | 0.60·S   | 5       | 5, 10, 15   |
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum GridSize {
    /// Coarsest grid
    Small,
    /// Default grid
    #[default]
    Medium,
    /// Widest and densest grid
    Large,
}

impl GridSize {
    fn k1_start_fraction(&self) -> f64 {
        match self {
            GridSize::Small | GridSize::Medium => 0.7,
            GridSize::Large => 0.6,
        }
    }

    fn k1_step(&self) -> usize {
        match self {
            GridSize::Small | GridSize::Medium => 10,
            GridSize::Large => 5,
        }
    }

    fn offsets(&self) -> &'static [i64] {
        match self {
            GridSize::Small => &[5, 10],
            GridSize::Medium | GridSize::Large => &[5, 10, 15],
        }
    }

    /// Lower-case name.
    pub fn name(&self) -> &'static str {
        match self {
            GridSize::Small => "small",
            GridSize::Medium => "medium",
            GridSize::Large => "large",
        }
    }
}

impl FromStr for GridSize {
    type Err = ParseGridSizeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "small" => Ok(GridSize::Small),
            "medium" => Ok(GridSize::Medium),
            "large" => Ok(GridSize::Large),
            _ => Err(ParseGridSizeError(s.to_string())),
        }
    }
}

impl fmt::Display for GridSize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Generates the candidate strike tuples for `spot`.
///
/// Returns an empty grid for non-finite or non-positive spots.
///
/// # Examples
///
/// ```
/// use pricer_models::instruments::StrikeSet;
/// use pricer_optimiser::strikes::{generate_strike_grid, GridSize};
///
/// let grid = generate_strike_grid(100.0, GridSize::Small);
/// assert!(grid.contains(&StrikeSet::new(90.0, 95.0, 105.0, 110.0)));
/// assert!(grid.iter().all(|k| k.k2 < 100.0 && k.k3 > 100.0));
/// ```
pub fn generate_strike_grid(spot: f64, size: GridSize) -> Vec<StrikeSet> {
    if !(spot > 0.0) || !spot.is_finite() {
        return Vec::new();
    }
    let k1_start = (spot * size.k1_start_fraction()) as i64;
    let k1_end = (spot * 0.95) as i64;
    let floor_spot = spot as i64;
    let offsets = size.offsets();

    let mut grid = Vec::new();
    for k1 in (k1_start..k1_end).step_by(size.k1_step()) {
        for &k2_offset in offsets {
            let k2 = k1 + k2_offset;
            if k2 as f64 >= spot {
                continue;
            }
            for &k3_offset in offsets {
                let k3 = floor_spot + k3_offset;
                if k3 as f64 <= spot {
                    continue;
                }
                for &k4_offset in offsets {
                    let k4 = k3 + k4_offset;
                    if k1 > 0 && k1 < k2 && k2 < k3 && k3 < k4 {
                        grid.push(StrikeSet::new(k1 as f64, k2 as f64, k3 as f64, k4 as f64));
                    }
                }
            }
        }
    }
    grid
}
