//! Bounded cache of derived tree parameters.
//!
//! Keys are the exact bit patterns of the numeric inputs, so two lookups
//! hit the same entry only when their inputs are identical. Eviction is
//! least-recently-used; results never depend on it.

use std::collections::HashMap;

use pricer_core::types::PricingResult;
use pricer_models::models::{TreeModel, TreeParams};

/// Default number of cached entries.
pub const DEFAULT_CACHE_CAPACITY: usize = 128;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
struct TreeKey {
    model: TreeModel,
    n_steps: usize,
    maturity: u64,
    rate: u64,
    volatility: u64,
    // Only the drift-adjusted lattice reads μ.
    drift: Option<u64>,
}

impl TreeKey {
    fn new(
        model: TreeModel,
        n_steps: usize,
        maturity: f64,
        rate: f64,
        volatility: f64,
        drift: f64,
    ) -> Self {
        Self {
            model,
            n_steps,
            maturity: maturity.to_bits(),
            rate: rate.to_bits(),
            volatility: volatility.to_bits(),
            drift: model.uses_drift().then(|| drift.to_bits()),
        }
    }
}

/// LRU cache of [`TreeParams`] keyed by `(model, N, T, r, σ[, μ])`.
///
/// # Examples
///
/// ```rust
/// use pricer_models::models::TreeModel;
/// use pricer_pricing::lattice::TreeParamsCache;
///
/// let mut cache = TreeParamsCache::new();
/// let a = cache.get_or_compute(TreeModel::CoxRossRubinstein, 100, 1.0, 0.05, 0.2, 0.08).unwrap();
/// let b = cache.get_or_compute(TreeModel::CoxRossRubinstein, 100, 1.0, 0.05, 0.2, 0.08).unwrap();
///
/// assert_eq!(a, b);
/// assert_eq!(cache.hits(), 1);
/// assert_eq!(cache.misses(), 1);
/// ```
#[derive(Debug, Clone)]
pub struct TreeParamsCache {
    entries: HashMap<TreeKey, (TreeParams, u64)>,
    capacity: usize,
    tick: u64,
    hits: u64,
    misses: u64,
}

impl TreeParamsCache {
    /// Creates a cache with [`DEFAULT_CACHE_CAPACITY`] entries.
    pub fn new() -> Self {
        Self::with_capacity(DEFAULT_CACHE_CAPACITY)
    }

    /// Creates a cache holding at most `capacity` entries.
    ///
    /// A capacity of zero disables caching.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            entries: HashMap::with_capacity(capacity),
            capacity,
            tick: 0,
            hits: 0,
            misses: 0,
        }
    }

    /// Returns cached parameters or derives and stores them.
    ///
    /// Errors are returned unchanged and never cached.
    pub fn get_or_compute(
        &mut self,
        model: TreeModel,
        n_steps: usize,
        maturity: f64,
        rate: f64,
        volatility: f64,
        drift: f64,
    ) -> PricingResult<TreeParams> {
        let key = TreeKey::new(model, n_steps, maturity, rate, volatility, drift);
        self.tick += 1;

        if let Some((params, last_used)) = self.entries.get_mut(&key) {
            *last_used = self.tick;
            self.hits += 1;
            return Ok(*params);
        }

        self.misses += 1;
        let params = model.tree_params(n_steps, maturity, rate, volatility, drift)?;
        if self.capacity == 0 {
            return Ok(params);
        }
        if self.entries.len() >= self.capacity {
            self.evict_least_recent();
        }
        self.entries.insert(key, (params, self.tick));
        Ok(params)
    }

    fn evict_least_recent(&mut self) {
        let oldest = self
            .entries
            .iter()
            .min_by_key(|(_, (_, last_used))| *last_used)
            .map(|(key, _)| *key);
        if let Some(key) = oldest {
            self.entries.remove(&key);
        }
    }

    /// Number of lookups served from the cache.
    #[inline]
    pub fn hits(&self) -> u64 {
        self.hits
    }

    /// Number of lookups that derived fresh parameters.
    #[inline]
    pub fn misses(&self) -> u64 {
        self.misses
    }

    /// Number of cached entries.
    #[inline]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the cache is empty.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Maximum number of entries.
    #[inline]
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Drops all entries and resets the counters.
    pub fn clear(&mut self) {
        self.entries.clear();
        self.tick = 0;
        self.hits = 0;
        self.misses = 0;
    }
}

impl Default for TreeParamsCache {
    fn default() -> Self {
        Self::new()
    }
}
