//! Recombining binomial lattices.
//!
//! Three parameterisations share one backward-induction skeleton and differ
//! only in how the per-step factors are derived (Δt = T/N):
//!
//! | Model          | u            | d            | p                   |
//! |----------------|--------------|--------------|---------------------|
//! | CRR            | e^(σ√Δt)     | e^(−σ√Δt)    | (e^(rΔt) − d)/(u − d) |
//! | Shreve         | 1 + rΔt + σ√Δt | 1 + rΔt − σ√Δt | 0.5               |
//! | Drift-Adjusted | 1 + μΔt + σ√Δt | 1 + μΔt − σ√Δt | (e^(rΔt) − d)/(u − d) |
//!
//! Every model discounts one step with e^(−rΔt). The drift-adjusted lattice
//! places its nodes with the real-world drift μ but still weights them with
//! the risk-neutral probability.

use std::fmt;
use std::str::FromStr;

use pricer_core::types::{PricingError, PricingResult};
use thiserror::Error;

/// Error returned when a tree model name cannot be parsed.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("Unknown tree model '{0}': expected crr, shreve or drift")]
pub struct ParseTreeModelError(pub String);

/// Binomial tree parameterisation.
///
/// # Examples
/// ```
/// use pricer_models::models::TreeModel;
///
/// let model: TreeModel = "crr".parse().unwrap();
/// assert_eq!(model, TreeModel::CoxRossRubinstein);
/// assert!(!model.uses_drift());
/// assert!(TreeModel::DriftAdjusted.uses_drift());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum TreeModel {
    /// Cox-Ross-Rubinstein: symmetric log factors.
    CoxRossRubinstein,
    /// Shreve: additive factors around 1 + rΔt with p fixed at one half.
    Shreve,
    /// Additive factors around 1 + μΔt with risk-neutral weighting.
    DriftAdjusted,
}

impl TreeModel {
    /// All models in reporting order.
    pub const ALL: [TreeModel; 3] = [
        TreeModel::CoxRossRubinstein,
        TreeModel::Shreve,
        TreeModel::DriftAdjusted,
    ];

    /// Position in [`TreeModel::ALL`].
    #[inline]
    pub fn index(&self) -> usize {
        match self {
            TreeModel::CoxRossRubinstein => 0,
            TreeModel::Shreve => 1,
            TreeModel::DriftAdjusted => 2,
        }
    }

    /// Display name.
    pub fn name(&self) -> &'static str {
        match self {
            TreeModel::CoxRossRubinstein => "Cox-Ross-Rubinstein",
            TreeModel::Shreve => "Steve Shreve",
            TreeModel::DriftAdjusted => "Drift-Adjusted",
        }
    }

    /// Short name used on the command line.
    pub fn short_name(&self) -> &'static str {
        match self {
            TreeModel::CoxRossRubinstein => "crr",
            TreeModel::Shreve => "shreve",
            TreeModel::DriftAdjusted => "drift",
        }
    }

    /// Whether the factor derivation reads the real-world drift.
    #[inline]
    pub fn uses_drift(&self) -> bool {
        matches!(self, TreeModel::DriftAdjusted)
    }

    /// Per-step up and down factors.
    ///
    /// `drift` is ignored unless [`uses_drift`](Self::uses_drift) is true.
    pub fn factors(&self, dt: f64, rate: f64, volatility: f64, drift: f64) -> LatticeFactors {
        let spread = volatility * dt.sqrt();
        match self {
            TreeModel::CoxRossRubinstein => LatticeFactors {
                up: spread.exp(),
                down: (-spread).exp(),
            },
            TreeModel::Shreve => LatticeFactors {
                up: 1.0 + rate * dt + spread,
                down: 1.0 + rate * dt - spread,
            },
            TreeModel::DriftAdjusted => LatticeFactors {
                up: 1.0 + drift * dt + spread,
                down: 1.0 + drift * dt - spread,
            },
        }
    }

    /// Derives the full tree parameters for `n_steps` steps over `maturity`.
    ///
    /// # Errors
    /// - `InvalidParameter` if `n_steps` is zero or `maturity` is not positive
    /// - `NumericDegeneracy` if the factors are non-finite, `d ≤ 0` or `u ≤ d`
    ///
    /// # Examples
    /// ```
    /// use pricer_models::models::TreeModel;
    ///
    /// let params = TreeModel::Shreve.tree_params(100, 1.0, 0.05, 0.2, 0.08).unwrap();
    /// assert_eq!(params.probability, 0.5);
    /// assert!(params.up > params.down);
    ///
    /// // Zero volatility collapses the lattice.
    /// assert!(TreeModel::CoxRossRubinstein.tree_params(100, 1.0, 0.05, 0.0, 0.0).is_err());
    /// ```
    pub fn tree_params(
        &self,
        n_steps: usize,
        maturity: f64,
        rate: f64,
        volatility: f64,
        drift: f64,
    ) -> PricingResult<TreeParams> {
        if n_steps == 0 {
            return Err(PricingError::invalid_parameter(
                "n_steps",
                0.0,
                "must be at least 1",
            ));
        }
        if !(maturity > 0.0) {
            return Err(PricingError::invalid_parameter(
                "maturity",
                maturity,
                "must be positive",
            ));
        }

        let dt = maturity / n_steps as f64;
        let LatticeFactors { up, down } = self.factors(dt, rate, volatility, drift);

        if !up.is_finite() || !down.is_finite() {
            return Err(PricingError::NumericDegeneracy(format!(
                "{} factors are not finite (u = {up}, d = {down})",
                self.name()
            )));
        }
        if down <= 0.0 {
            return Err(PricingError::NumericDegeneracy(format!(
                "{} down factor d = {down} is not positive",
                self.name()
            )));
        }
        if up <= down {
            return Err(PricingError::NumericDegeneracy(format!(
                "{} lattice collapsed: u = {up} <= d = {down}",
                self.name()
            )));
        }

        let probability = match self {
            TreeModel::Shreve => 0.5,
            TreeModel::CoxRossRubinstein | TreeModel::DriftAdjusted => {
                ((rate * dt).exp() - down) / (up - down)
            }
        };
        if !probability.is_finite() {
            return Err(PricingError::NumericDegeneracy(format!(
                "{} step probability is not finite",
                self.name()
            )));
        }

        Ok(TreeParams {
            up,
            down,
            probability,
            discount: (-rate * dt).exp(),
            dt,
        })
    }
}

impl FromStr for TreeModel {
    type Err = ParseTreeModelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalised = s.trim().to_lowercase().replace([' ', '_'], "-");
        match normalised.as_str() {
            "crr" | "cox-ross-rubinstein" => Ok(TreeModel::CoxRossRubinstein),
            "shreve" | "steve-shreve" => Ok(TreeModel::Shreve),
            "drift" | "drift-adjusted" => Ok(TreeModel::DriftAdjusted),
            _ => Err(ParseTreeModelError(s.to_string())),
        }
    }
}

impl fmt::Display for TreeModel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Up and down multipliers of one lattice step.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LatticeFactors {
    /// Up factor u
    pub up: f64,
    /// Down factor d
    pub down: f64,
}

/// Derived per-step parameters of a binomial tree.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TreeParams {
    /// Up factor u
    pub up: f64,
    /// Down factor d
    pub down: f64,
    /// Risk-neutral step probability
    pub probability: f64,
    /// One-step discount factor e^(−rΔt)
    pub discount: f64,
    /// Step length Δt
    pub dt: f64,
}

impl TreeParams {
    /// Price after `ups` up moves out of `n_steps`: `S · u^ups · d^(n−ups)`.
    ///
    /// Evaluated in log space so large step counts stay finite.
    #[inline]
    pub fn node_price(&self, spot: f64, n_steps: usize, ups: usize) -> f64 {
        let downs = n_steps.saturating_sub(ups);
        (spot.ln() + ups as f64 * self.up.ln() + downs as f64 * self.down.ln()).exp()
    }

    /// Terminal prices `S · d^N · (u/d)^j` for `j` in `0..=N`, ascending.
    pub fn terminal_prices(&self, spot: f64, n_steps: usize) -> Vec<f64> {
        (0..=n_steps)
            .map(|ups| self.node_price(spot, n_steps, ups))
            .collect()
    }
}
