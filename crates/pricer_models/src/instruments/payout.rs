//! Strategy payout structures.
//!
//! A payout is the non-negative amount the seller owes at expiry, not the
//! profit. Profit is initial capital minus payout.
//!
//! Every structure validates its strikes at construction, independently of
//! any upstream validation.

use super::error::InstrumentError;
use super::strategy::{Strategy, StrikeSet};

/// Validated payout structure for one of the supported strategies.
///
/// # Examples
/// ```
/// use pricer_models::instruments::StrategyPayout;
///
/// let condor = StrategyPayout::iron_condor(90.0, 95.0, 105.0, 110.0).unwrap();
/// let payouts = condor.payouts(&[85.0, 92.0, 100.0, 107.0, 115.0]);
/// assert_eq!(payouts, vec![5.0, 3.0, 0.0, 2.0, 5.0]);
///
/// assert!(StrategyPayout::iron_condor(95.0, 90.0, 105.0, 110.0).is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum StrategyPayout {
    /// Piecewise-linear condor payout with K1 < K2 < K3 < K4.
    IronCondor {
        /// Long put strike
        k1: f64,
        /// Short put strike
        k2: f64,
        /// Short call strike
        k3: f64,
        /// Long call strike
        k4: f64,
    },
    /// |S − K|.
    Straddle {
        /// Common strike
        strike: f64,
    },
    /// max(0, K_put − S) + max(0, S − K_call) with K_put < K_call.
    Strangle {
        /// Put strike
        put_strike: f64,
        /// Call strike
        call_strike: f64,
    },
}

fn check_positive(strike: f64) -> Result<(), InstrumentError> {
    if strike > 0.0 && strike.is_finite() {
        Ok(())
    } else {
        Err(InstrumentError::InvalidStrike { strike })
    }
}

impl StrategyPayout {
    /// Iron Condor payout.
    ///
    /// # Errors
    /// `InvalidStrikeOrdering` unless K1 < K2 < K3 < K4; `InvalidStrike` if
    /// K1 is not positive.
    pub fn iron_condor(k1: f64, k2: f64, k3: f64, k4: f64) -> Result<Self, InstrumentError> {
        if !(k1 < k2 && k2 < k3 && k3 < k4) {
            return Err(InstrumentError::InvalidStrikeOrdering {
                structure: "Iron Condor",
                expected: "K1 < K2 < K3 < K4",
                strikes: vec![k1, k2, k3, k4],
            });
        }
        check_positive(k1)?;
        check_positive(k4)?;
        Ok(StrategyPayout::IronCondor { k1, k2, k3, k4 })
    }

    /// Straddle payout.
    ///
    /// # Errors
    /// `InvalidStrike` if the strike is not positive.
    pub fn straddle(strike: f64) -> Result<Self, InstrumentError> {
        check_positive(strike)?;
        Ok(StrategyPayout::Straddle { strike })
    }

    /// Strangle payout.
    ///
    /// # Errors
    /// `InvalidStrike` if either strike is not positive;
    /// `InvalidStrikeOrdering` unless K_put < K_call.
    pub fn strangle(put_strike: f64, call_strike: f64) -> Result<Self, InstrumentError> {
        check_positive(put_strike)?;
        check_positive(call_strike)?;
        if put_strike >= call_strike {
            return Err(InstrumentError::InvalidStrikeOrdering {
                structure: "Strangle",
                expected: "K_put < K_call",
                strikes: vec![put_strike, call_strike],
            });
        }
        Ok(StrategyPayout::Strangle {
            put_strike,
            call_strike,
        })
    }

    /// Builds the payout for `strategy` from a strike set.
    ///
    /// Straddle reads K1; Strangle reads K1 (put) and K2 (call).
    pub fn for_strategy(strategy: Strategy, strikes: &StrikeSet) -> Result<Self, InstrumentError> {
        match strategy {
            Strategy::IronCondor => Self::iron_condor(strikes.k1, strikes.k2, strikes.k3, strikes.k4),
            Strategy::Straddle => Self::straddle(strikes.k1),
            Strategy::Strangle => Self::strangle(strikes.k1, strikes.k2),
        }
    }

    /// The strategy this payout belongs to.
    pub fn strategy(&self) -> Strategy {
        match self {
            StrategyPayout::IronCondor { .. } => Strategy::IronCondor,
            StrategyPayout::Straddle { .. } => Strategy::Straddle,
            StrategyPayout::Strangle { .. } => Strategy::Strangle,
        }
    }

    /// Payout owed for a single terminal price.
    #[inline]
    pub fn payout(&self, spot: f64) -> f64 {
        match *self {
            StrategyPayout::IronCondor { k1, k2, k3, k4 } => {
                if spot < k1 {
                    k2 - k1
                } else if spot < k2 {
                    k2 - spot
                } else if spot < k3 {
                    0.0
                } else if spot < k4 {
                    spot - k3
                } else {
                    k4 - k3
                }
            }
            StrategyPayout::Straddle { strike } => {
                (spot - strike).max(0.0) + (strike - spot).max(0.0)
            }
            StrategyPayout::Strangle {
                put_strike,
                call_strike,
            } => (put_strike - spot).max(0.0) + (spot - call_strike).max(0.0),
        }
    }

    /// Element-wise payouts for a slice of terminal prices.
    pub fn payouts(&self, spots: &[f64]) -> Vec<f64> {
        spots.iter().map(|&s| self.payout(s)).collect()
    }

    /// Mean payout over a sample, `None` for an empty sample.
    pub fn mean_payout(&self, spots: &[f64]) -> Option<f64> {
        if spots.is_empty() {
            return None;
        }
        let total: f64 = spots.iter().map(|&s| self.payout(s)).sum();
        Some(total / spots.len() as f64)
    }

    /// Approximate profit zone of an Iron Condor, `((K1+K2)/2, (K3+K4)/2)`.
    ///
    /// The bounds are midpoints of adjacent strikes rather than the exact
    /// premium-dependent breakevens. Other strategies return `None`.
    pub fn profit_zone(&self) -> Option<(f64, f64)> {
        match *self {
            StrategyPayout::IronCondor { k1, k2, k3, k4 } => {
                Some(((k1 + k2) / 2.0, (k3 + k4) / 2.0))
            }
            _ => None,
        }
    }

    /// Largest possible payout, `None` when unbounded.
    pub fn max_payout(&self) -> Option<f64> {
        match *self {
            StrategyPayout::IronCondor { k1, k2, k3, k4 } => Some((k2 - k1).max(k4 - k3)),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use super::Strategy;

    #[test]
    fn test_iron_condor_breakpoints_exact() {
        let condor = StrategyPayout::iron_condor(90.0, 95.0, 105.0, 110.0).unwrap();
        assert_eq!(
            condor.payouts(&[85.0, 92.0, 100.0, 107.0, 115.0]),
            vec![5.0, 3.0, 0.0, 2.0, 5.0]
        );
        // Region boundaries are closed on the left.
        assert_eq!(condor.payout(90.0), 5.0);
        assert_eq!(condor.payout(95.0), 0.0);
        assert_eq!(condor.payout(105.0), 0.0);
        assert_eq!(condor.payout(110.0), 5.0);
    }

    #[test]
    fn test_straddle_symmetry() {
        let straddle = StrategyPayout::straddle(100.0).unwrap();
        assert_eq!(
            straddle.payouts(&[90.0, 95.0, 100.0, 105.0, 110.0]),
            vec![10.0, 5.0, 0.0, 5.0, 10.0]
        );
    }

    #[test]
    fn test_strangle_payout() {
        let strangle = StrategyPayout::strangle(95.0, 105.0).unwrap();
        assert_eq!(
            strangle.payouts(&[85.0, 95.0, 100.0, 105.0, 120.0]),
            vec![10.0, 0.0, 0.0, 0.0, 15.0]
        );
    }

    #[test]
    fn test_iron_condor_rejects_bad_ordering() {
        let result = StrategyPayout::iron_condor(95.0, 90.0, 105.0, 110.0);
        assert!(matches!(
            result,
            Err(InstrumentError::InvalidStrikeOrdering { .. })
        ));
        assert!(StrategyPayout::iron_condor(90.0, 95.0, 95.0, 110.0).is_err());
    }

    #[test]
    fn test_iron_condor_rejects_non_positive_strike() {
        let result = StrategyPayout::iron_condor(-5.0, 95.0, 105.0, 110.0);
        assert_eq!(result, Err(InstrumentError::InvalidStrike { strike: -5.0 }));
    }

    #[test]
    fn test_straddle_rejects_non_positive_strike() {
        assert_eq!(
            StrategyPayout::straddle(-5.0),
            Err(InstrumentError::InvalidStrike { strike: -5.0 })
        );
        assert!(StrategyPayout::straddle(0.0).is_err());
    }

    #[test]
    fn test_strangle_rejects_bad_ordering() {
        assert!(matches!(
            StrategyPayout::strangle(105.0, 95.0),
            Err(InstrumentError::InvalidStrikeOrdering { .. })
        ));
        assert!(StrategyPayout::strangle(100.0, 100.0).is_err());
        assert!(matches!(
            StrategyPayout::strangle(0.0, 95.0),
            Err(InstrumentError::InvalidStrike { .. })
        ));
    }

    #[test]
    fn test_for_strategy_reads_convention_strikes() {
        let straddle =
            StrategyPayout::for_strategy(Strategy::Straddle, &StrikeSet::straddle(100.0)).unwrap();
        assert_eq!(straddle, StrategyPayout::Straddle { strike: 100.0 });

        let strangle =
            StrategyPayout::for_strategy(Strategy::Strangle, &StrikeSet::strangle(95.0, 105.0))
                .unwrap();
        assert_eq!(strangle.strategy(), Strategy::Strangle);

        let condor =
            StrategyPayout::for_strategy(Strategy::IronCondor, &StrikeSet::default()).unwrap();
        assert_eq!(condor.strategy(), Strategy::IronCondor);
    }

    #[test]
    fn test_mean_payout() {
        let straddle = StrategyPayout::straddle(100.0).unwrap();
        assert_eq!(straddle.mean_payout(&[90.0, 110.0, 100.0, 100.0]), Some(5.0));
        assert_eq!(straddle.mean_payout(&[]), None);
    }

    #[test]
    fn test_profit_zone_and_max_payout() {
        let condor = StrategyPayout::iron_condor(90.0, 95.0, 105.0, 115.0).unwrap();
        assert_eq!(condor.profit_zone(), Some((92.5, 110.0)));
        assert_eq!(condor.max_payout(), Some(10.0));

        let straddle = StrategyPayout::straddle(100.0).unwrap();
        assert_eq!(straddle.profit_zone(), None);
        assert_eq!(straddle.max_payout(), None);
    }

    proptest! {
        #[test]
        fn prop_iron_condor_payout_bounded(spot in 0.0f64..500.0) {
            let condor = StrategyPayout::iron_condor(90.0, 95.0, 105.0, 112.0).unwrap();
            let value = condor.payout(spot);
            prop_assert!(value >= 0.0);
            prop_assert!(value <= 7.0);
        }

        #[test]
        fn prop_strangle_never_exceeds_straddle(spot in 0.0f64..500.0, width in 0.5f64..20.0) {
            let straddle = StrategyPayout::straddle(100.0).unwrap();
            let strangle = StrategyPayout::strangle(100.0 - width, 100.0 + width).unwrap();
            prop_assert!(strangle.payout(spot) >= 0.0);
            prop_assert!(strangle.payout(spot) <= straddle.payout(spot));
        }
    }
}
