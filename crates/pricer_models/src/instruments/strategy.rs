//! Multi-leg option strategies and their strike sets.
//!
//! Positions are expressed from the seller's side: the payout of a
//! strategy is what the seller owes at expiry, and the initial capital is
//! the net premium received when the legs are opened.

use std::fmt;
use std::str::FromStr;

use thiserror::Error;

use super::payoff::OptionType;

/// Error returned when a strategy name cannot be parsed.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("Unknown strategy '{0}': expected iron_condor, straddle or strangle")]
pub struct ParseStrategyError(pub String);

/// Supported multi-leg strategies.
///
/// # Examples
/// ```
/// use pricer_models::instruments::Strategy;
///
/// let s: Strategy = "Iron Condor".parse().unwrap();
/// assert_eq!(s, Strategy::IronCondor);
/// assert_eq!(s.key(), "iron_condor");
/// assert_eq!("strangle".parse::<Strategy>().unwrap(), Strategy::Strangle);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum Strategy {
    /// Short put spread (K1/K2) plus short call spread (K3/K4).
    #[default]
    IronCondor,
    /// Short call and short put at the same strike K1.
    Straddle,
    /// Short put at K1 and short call at K2.
    Strangle,
}

impl Strategy {
    /// All strategies in display order.
    pub const ALL: [Strategy; 3] = [Strategy::IronCondor, Strategy::Straddle, Strategy::Strangle];

    /// Human-readable name.
    pub fn name(&self) -> &'static str {
        match self {
            Strategy::IronCondor => "Iron Condor",
            Strategy::Straddle => "Straddle",
            Strategy::Strangle => "Strangle",
        }
    }

    /// Snake-case key.
    pub fn key(&self) -> &'static str {
        match self {
            Strategy::IronCondor => "iron_condor",
            Strategy::Straddle => "straddle",
            Strategy::Strangle => "strangle",
        }
    }

    /// Legs making up the position for the given strikes.
    ///
    /// Straddle uses K1 only; Strangle uses K1 (put) and K2 (call).
    ///
    /// # Examples
    /// ```
    /// use pricer_models::instruments::{Position, Strategy, StrikeSet};
    ///
    /// let legs = Strategy::IronCondor.legs(&StrikeSet::new(90.0, 95.0, 105.0, 110.0));
    /// assert_eq!(legs.len(), 4);
    /// assert_eq!(legs[0].position, Position::Long);
    /// assert_eq!(legs[1].position, Position::Short);
    /// ```
    pub fn legs(&self, strikes: &StrikeSet) -> Vec<Leg> {
        match self {
            Strategy::IronCondor => vec![
                Leg::new(Position::Long, OptionType::Put, strikes.k1),
                Leg::new(Position::Short, OptionType::Put, strikes.k2),
                Leg::new(Position::Short, OptionType::Call, strikes.k3),
                Leg::new(Position::Long, OptionType::Call, strikes.k4),
            ],
            Strategy::Straddle => vec![
                Leg::new(Position::Short, OptionType::Call, strikes.k1),
                Leg::new(Position::Short, OptionType::Put, strikes.k1),
            ],
            Strategy::Strangle => vec![
                Leg::new(Position::Short, OptionType::Put, strikes.k1),
                Leg::new(Position::Short, OptionType::Call, strikes.k2),
            ],
        }
    }
}

impl FromStr for Strategy {
    type Err = ParseStrategyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalised = s.trim().to_lowercase().replace([' ', '-'], "_");
        match normalised.as_str() {
            "iron_condor" | "ironcondor" => Ok(Strategy::IronCondor),
            "straddle" => Ok(Strategy::Straddle),
            "strangle" => Ok(Strategy::Strangle),
            _ => Err(ParseStrategyError(s.to_string())),
        }
    }
}

impl fmt::Display for Strategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Direction of a leg.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Position {
    /// Bought: premium paid.
    Long,
    /// Sold: premium received.
    Short,
}

impl Position {
    /// Sign of the premium cash flow at inception (+1 received, −1 paid).
    #[inline]
    pub fn premium_sign(&self) -> f64 {
        match self {
            Position::Long => -1.0,
            Position::Short => 1.0,
        }
    }
}

/// A single vanilla leg of a strategy.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Leg {
    /// Long or short
    pub position: Position,
    /// Call or put
    pub option_type: OptionType,
    /// Strike price
    pub strike: f64,
}

impl Leg {
    /// Creates a new leg.
    #[inline]
    pub fn new(position: Position, option_type: OptionType, strike: f64) -> Self {
        Self {
            position,
            option_type,
            strike,
        }
    }
}

/// Ordered strike tuple (K1, K2, K3, K4).
///
/// Only the Iron Condor uses all four strikes. By convention a straddle
/// sets K2 = K3 = K4 = K1 and a strangle sets K3 = K4 = K2.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct StrikeSet {
    /// Lowest strike
    pub k1: f64,
    /// Second strike
    pub k2: f64,
    /// Third strike
    pub k3: f64,
    /// Highest strike
    pub k4: f64,
}

impl StrikeSet {
    /// Creates a strike set without validation.
    #[inline]
    pub fn new(k1: f64, k2: f64, k3: f64, k4: f64) -> Self {
        Self { k1, k2, k3, k4 }
    }

    /// Strike set for a straddle at `strike`.
    #[inline]
    pub fn straddle(strike: f64) -> Self {
        Self::new(strike, strike, strike, strike)
    }

    /// Strike set for a strangle with put at `put_strike` and call at `call_strike`.
    #[inline]
    pub fn strangle(put_strike: f64, call_strike: f64) -> Self {
        Self::new(put_strike, call_strike, call_strike, call_strike)
    }

    /// Strikes as an array.
    #[inline]
    pub fn to_array(&self) -> [f64; 4] {
        [self.k1, self.k2, self.k3, self.k4]
    }
}

impl Default for StrikeSet {
    fn default() -> Self {
        Self::new(90.0, 95.0, 105.0, 110.0)
    }
}

impl fmt::Display for StrikeSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {}, {}, {})", self.k1, self.k2, self.k3, self.k4)
    }
}
