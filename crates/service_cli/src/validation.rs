//! Input validation at the service boundary.
//!
//! The pricing core only rejects inputs that break its mathematics. These
//! checks are stricter: they bound every parameter to a range in which the
//! simulator's results are meaningful, and they require strikes that form a
//! sensible position around the spot.

use pricer_core::market_data::MarketParams;
use pricer_models::instruments::{Strategy, StrikeSet};
use thiserror::Error;

/// A rejected input, naming the parameter, the constraint and the value.
#[derive(Debug, Clone, PartialEq, Error)]
#[error("{parameter} = {value}: {constraint}")]
pub struct ValidationError {
    /// Offending parameter
    pub parameter: &'static str,
    /// Constraint it violates
    pub constraint: String,
    /// Value supplied
    pub value: f64,
}

impl ValidationError {
    /// Creates a validation error.
    pub fn new(parameter: &'static str, constraint: impl Into<String>, value: f64) -> Self {
        Self {
            parameter,
            constraint: constraint.into(),
            value,
        }
    }
}

fn within(parameter: &'static str, value: f64, lower: f64, upper: f64) -> Result<(), ValidationError> {
    if (lower..=upper).contains(&value) {
        Ok(())
    } else {
        Err(ValidationError::new(
            parameter,
            format!("must lie in [{lower}, {upper}]"),
            value,
        ))
    }
}

fn within_count(
    parameter: &'static str,
    value: usize,
    lower: usize,
    upper: usize,
) -> Result<(), ValidationError> {
    if (lower..=upper).contains(&value) {
        Ok(())
    } else {
        Err(ValidationError::new(
            parameter,
            format!("must lie in [{lower}, {upper}]"),
            value as f64,
        ))
    }
}

/// Checks market and discretisation parameters.
pub fn validate_market(market: &MarketParams) -> Result<(), ValidationError> {
    within("spot", market.spot, 1.0, 100_000.0)?;
    within("rate", market.rate, 0.0, 0.20)?;
    within("drift", market.drift, -0.50, 0.50)?;
    within("volatility", market.volatility, 0.01, 2.0)?;
    within("maturity", market.maturity, 0.01, 5.0)?;
    within_count("n_steps", market.n_steps, 10, 10_000)?;
    within_count("n_paths", market.n_paths, 100, 100_000)?;
    Ok(())
}

/// Checks that `strikes` form a sensible `strategy` position around `spot`.
///
/// - Iron Condor: K1 < K2 < K3 < K4, K2 < S < K3, both spreads at least 1,
///   and K2, K3 at least 2% away from S
/// - Straddle: K1 within 50% of S
/// - Strangle: K1 < S < K2
pub fn validate_strikes(
    strategy: Strategy,
    strikes: &StrikeSet,
    spot: f64,
) -> Result<(), ValidationError> {
    let StrikeSet { k1, k2, k3, k4 } = *strikes;
    for (name, k) in [("K1", k1), ("K2", k2), ("K3", k3), ("K4", k4)] {
        if !(k > 0.0) || !k.is_finite() {
            return Err(ValidationError::new(name, "must be positive", k));
        }
    }

    match strategy {
        Strategy::IronCondor => {
            if !(k1 < k2 && k2 < k3 && k3 < k4) {
                let offending = if k1 >= k2 {
                    ("K2", k2)
                } else if k2 >= k3 {
                    ("K3", k3)
                } else {
                    ("K4", k4)
                };
                return Err(ValidationError::new(
                    offending.0,
                    "Iron Condor requires K1 < K2 < K3 < K4",
                    offending.1,
                ));
            }
            if k2 >= spot {
                return Err(ValidationError::new(
                    "K2",
                    format!("short put must be below the spot {spot}"),
                    k2,
                ));
            }
            if k3 <= spot {
                return Err(ValidationError::new(
                    "K3",
                    format!("short call must be above the spot {spot}"),
                    k3,
                ));
            }
            if k2 - k1 < 1.0 {
                return Err(ValidationError::new(
                    "K1",
                    format!("put spread to K2 = {k2} must be at least 1"),
                    k1,
                ));
            }
            if k4 - k3 < 1.0 {
                return Err(ValidationError::new(
                    "K4",
                    format!("call spread to K3 = {k3} must be at least 1"),
                    k4,
                ));
            }
            let min_gap = 0.02 * spot;
            if (k2 - spot).abs() < min_gap {
                return Err(ValidationError::new(
                    "K2",
                    format!("must be at least 2% away from the spot {spot}"),
                    k2,
                ));
            }
            if (k3 - spot).abs() < min_gap {
                return Err(ValidationError::new(
                    "K3",
                    format!("must be at least 2% away from the spot {spot}"),
                    k3,
                ));
            }
        }
        Strategy::Straddle => {
            if (k1 - spot).abs() > 0.5 * spot {
                return Err(ValidationError::new(
                    "K1",
                    format!("must be within 50% of the spot {spot}"),
                    k1,
                ));
            }
        }
        Strategy::Strangle => {
            if k1 >= spot {
                return Err(ValidationError::new(
                    "K1",
                    format!("put strike must be below the spot {spot}"),
                    k1,
                ));
            }
            if k2 <= spot {
                return Err(ValidationError::new(
                    "K2",
                    format!("call strike must be above the spot {spot}"),
                    k2,
                ));
            }
        }
    }
    Ok(())
}

/// Checks a single vanilla strike.
pub fn validate_strike(strike: f64) -> Result<(), ValidationError> {
    if strike > 0.0 && strike.is_finite() {
        Ok(())
    } else {
        Err(ValidationError::new("strike", "must be positive", strike))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        let market = MarketParams::default();
        assert!(validate_market(&market).is_ok());
        assert!(validate_strikes(Strategy::IronCondor, &StrikeSet::default(), market.spot).is_ok());
        assert!(validate_strikes(Strategy::Straddle, &StrikeSet::straddle(100.0), 100.0).is_ok());
        assert!(validate_strikes(Strategy::Strangle, &StrikeSet::strangle(95.0, 105.0), 100.0).is_ok());
    }

    #[test]
    fn test_market_bounds() {
        let base = MarketParams::default();
        let cases = [
            (MarketParams { spot: 0.5, ..base }, "spot"),
            (MarketParams { rate: 0.25, ..base }, "rate"),
            (MarketParams { drift: -0.6, ..base }, "drift"),
            (MarketParams { volatility: 0.005, ..base }, "volatility"),
            (MarketParams { maturity: 6.0, ..base }, "maturity"),
            (MarketParams { n_steps: 5, ..base }, "n_steps"),
            (MarketParams { n_paths: 200_000, ..base }, "n_paths"),
            (MarketParams { volatility: f64::NAN, ..base }, "volatility"),
        ];
        for (market, parameter) in cases {
            let err = validate_market(&market).unwrap_err();
            assert_eq!(err.parameter, parameter);
        }
        assert!(validate_market(&MarketParams { n_steps: 10, n_paths: 100, ..base }).is_ok());
    }

    #[test]
    fn test_iron_condor_rules() {
        let check = |k: [f64; 4]| {
            validate_strikes(Strategy::IronCondor, &StrikeSet::new(k[0], k[1], k[2], k[3]), 100.0)
        };
        assert_eq!(check([95.0, 90.0, 105.0, 110.0]).unwrap_err().parameter, "K2");
        assert_eq!(check([90.0, 100.0, 105.0, 110.0]).unwrap_err().parameter, "K2");
        assert_eq!(check([90.0, 95.0, 99.0, 110.0]).unwrap_err().parameter, "K3");
        assert_eq!(check([94.5, 95.0, 105.0, 110.0]).unwrap_err().parameter, "K1");
        assert_eq!(check([90.0, 95.0, 105.0, 105.5]).unwrap_err().parameter, "K4");
        assert_eq!(check([90.0, 99.0, 105.0, 110.0]).unwrap_err().parameter, "K2");
        assert_eq!(check([90.0, 95.0, 101.0, 110.0]).unwrap_err().parameter, "K3");

        let err = check([95.0, 90.0, 105.0, 110.0]).unwrap_err();
        assert!(err.to_string().contains("K1 < K2 < K3 < K4"));
    }

    #[test]
    fn test_straddle_and_strangle_rules() {
        assert!(validate_strikes(Strategy::Straddle, &StrikeSet::straddle(160.0), 100.0).is_err());
        assert!(validate_strikes(Strategy::Straddle, &StrikeSet::straddle(150.0), 100.0).is_ok());
        assert_eq!(
            validate_strikes(Strategy::Strangle, &StrikeSet::strangle(100.0, 110.0), 100.0)
                .unwrap_err()
                .parameter,
            "K1"
        );
        assert_eq!(
            validate_strikes(Strategy::Strangle, &StrikeSet::strangle(90.0, 100.0), 100.0)
                .unwrap_err()
                .parameter,
            "K2"
        );
    }

    #[test]
    fn test_strike_positivity() {
        assert!(validate_strike(100.0).is_ok());
        assert!(validate_strike(0.0).is_err());
        assert!(validate_strike(f64::INFINITY).is_err());
        assert_eq!(
            validate_strikes(Strategy::Straddle, &StrikeSet::straddle(-1.0), 100.0)
                .unwrap_err()
                .parameter,
            "K1"
        );
    }
}
