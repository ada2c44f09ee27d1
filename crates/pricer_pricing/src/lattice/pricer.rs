//! European option pricing by backward induction on a binomial lattice.

use pricer_core::market_data::MarketParams;
use pricer_core::types::error::ensure_finite;
use pricer_core::types::{PricingError, PricingResult};
use pricer_models::instruments::OptionType;
use pricer_models::models::{TreeModel, TreeParams};

use super::cache::TreeParamsCache;

/// Binomial tree pricer owning a bounded tree-parameter cache.
///
/// Repeated calls with identical `(model, N, T, r, σ[, μ])` reuse the
/// cached lattice factors.
///
/// # Examples
///
/// ```rust
/// use pricer_core::market_data::MarketParams;
/// use pricer_models::instruments::OptionType;
/// use pricer_models::models::TreeModel;
/// use pricer_pricing::lattice::BinomialPricer;
///
/// let market = MarketParams::default().with_steps(200);
/// let mut pricer = BinomialPricer::new();
///
/// let call = pricer.price(TreeModel::CoxRossRubinstein, &market, 100.0, OptionType::Call).unwrap();
/// let put = pricer.price(TreeModel::CoxRossRubinstein, &market, 100.0, OptionType::Put).unwrap();
///
/// let parity = 100.0 - 100.0 * (-0.05_f64).exp();
/// assert!((call - put - parity).abs() < 1e-8);
/// ```
#[derive(Debug, Clone, Default)]
pub struct BinomialPricer {
    cache: TreeParamsCache,
}

impl BinomialPricer {
    /// Creates a pricer with a default-capacity cache.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a pricer around an existing cache.
    pub fn with_cache(cache: TreeParamsCache) -> Self {
        Self { cache }
    }

    /// The tree-parameter cache.
    pub fn cache(&self) -> &TreeParamsCache {
        &self.cache
    }

    /// Tree parameters for `model` under `market`, served from the cache.
    pub fn tree_params(&mut self, model: TreeModel, market: &MarketParams) -> PricingResult<TreeParams> {
        self.cache.get_or_compute(
            model,
            market.n_steps,
            market.maturity,
            market.rate,
            market.volatility,
            market.drift,
        )
    }

    /// Prices a European option.
    ///
    /// # Errors
    ///
    /// - `InvalidParameter` if the market parameters or strike are invalid
    /// - `NumericDegeneracy` if the lattice collapses or the price is not finite
    pub fn price(
        &mut self,
        model: TreeModel,
        market: &MarketParams,
        strike: f64,
        option_type: OptionType,
    ) -> PricingResult<f64> {
        market.validate()?;
        if !(strike > 0.0) || !strike.is_finite() {
            return Err(PricingError::invalid_parameter(
                "strike",
                strike,
                "must be positive",
            ));
        }

        let params = self.tree_params(model, market)?;
        let price = backward_induction(&params, market.spot, strike, market.n_steps, option_type);
        ensure_finite(price, &format!("{} price for K = {strike}", model.name()))
    }
}

/// Values the option backwards from its terminal payoffs.
fn backward_induction(
    params: &TreeParams,
    spot: f64,
    strike: f64,
    n_steps: usize,
    option_type: OptionType,
) -> f64 {
    let p = params.probability;
    let q = 1.0 - p;
    let disc = params.discount;

    let mut values: Vec<f64> = params
        .terminal_prices(spot, n_steps)
        .into_iter()
        .map(|s| option_type.intrinsic(s, strike))
        .collect();

    for step in (1..=n_steps).rev() {
        for i in 0..step {
            values[i] = disc * (p * values[i + 1] + q * values[i]);
        }
        values.truncate(step);
    }
    values[0]
}

/// Prices one European option with a fresh pricer.
///
/// `option_type` accepts `C`, `P`, `call` or `put` (case-insensitive).
///
/// # Errors
///
/// `InvalidOptionType` for any other option type, otherwise as
/// [`BinomialPricer::price`].
///
/// # Examples
///
/// ```rust
/// use pricer_core::market_data::MarketParams;
/// use pricer_core::types::PricingError;
/// use pricer_models::models::TreeModel;
/// use pricer_pricing::lattice::price_option;
///
/// let market = MarketParams::default().with_steps(100);
/// assert!(price_option(TreeModel::Shreve, &market, 105.0, "call").is_ok());
/// assert_eq!(
///     price_option(TreeModel::Shreve, &market, 105.0, "X"),
///     Err(PricingError::InvalidOptionType("X".into()))
/// );
/// ```
pub fn price_option(
    model: TreeModel,
    market: &MarketParams,
    strike: f64,
    option_type: &str,
) -> PricingResult<f64> {
    let option_type: OptionType = option_type.parse()?;
    BinomialPricer::new().price(model, market, strike, option_type)
}
