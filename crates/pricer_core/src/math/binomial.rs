//! Floating-point binomial coefficients and binomial probability masses.
//!
//! Coefficients are produced in log space so that large step counts
//! (C(10000, 5000) ≈ 10^3008) never overflow. Masses are combined in log
//! space as well and exponentiated once per node.
//!
//! Node ordering follows the lattice convention used throughout the
//! workspace: index `j` counts down moves, so node `j` carries mass
//! `C(n, j) · p^(n−j) · (1−p)^j`.

use num_traits::Float;

use crate::types::{PricingError, PricingResult};

#[inline]
fn lit<T: Float>(x: f64) -> T {
    T::from(x).unwrap_or_else(T::nan)
}

/// `k · ln(x)` with the convention `0 · ln(0) = 0`.
#[inline]
fn ln_pow<T: Float>(ln_x: T, k: usize) -> T {
    if k == 0 {
        T::zero()
    } else {
        lit::<T>(k as f64) * ln_x
    }
}

/// Natural logarithms of `C(n, k)` for every `k` in `0..=n`.
///
/// Built by the multiplicative recurrence on the lower half and mirrored,
/// which keeps the accumulated rounding error symmetric.
///
/// # Examples
/// ```
/// use pricer_core::math::binomial::ln_binomial_coefficients;
///
/// let ln_c: Vec<f64> = ln_binomial_coefficients(4);
/// assert_eq!(ln_c.len(), 5);
/// assert!((ln_c[2].exp() - 6.0).abs() < 1e-12);
/// ```
pub fn ln_binomial_coefficients<T: Float>(n: usize) -> Vec<T> {
    let mut out = vec![T::zero(); n + 1];
    let mut acc = T::zero();
    for k in 0..n / 2 {
        acc = acc + lit::<T>((n - k) as f64).ln() - lit::<T>((k + 1) as f64).ln();
        out[k + 1] = acc;
        out[n - k - 1] = acc;
    }
    out
}

/// Binomial coefficients `C(n, k)` for every `k` in `0..=n`, as floats.
///
/// Not exact: values beyond the float range become infinite. Use
/// [`ln_binomial_coefficients`] when `n` is large.
pub fn binomial_coefficients<T: Float>(n: usize) -> Vec<T> {
    ln_binomial_coefficients::<T>(n)
        .into_iter()
        .map(|c| c.exp())
        .collect()
}

/// Binomial masses `C(n, j) · p^(n−j) · (1−p)^j` for `j` in `0..=n`.
///
/// `ln_coefficients` must come from [`ln_binomial_coefficients`] for the
/// same `n`; this lets callers precompute the coefficient vector once per
/// step count.
///
/// # Errors
/// `NumericDegeneracy` if `p` is not a probability in `[0, 1]`.
///
/// # Examples
/// ```
/// use pricer_core::math::binomial::{binomial_masses, ln_binomial_coefficients};
///
/// let ln_c = ln_binomial_coefficients::<f64>(2);
/// let masses = binomial_masses(&ln_c, 0.5).unwrap();
/// assert!((masses[0] - 0.25).abs() < 1e-15);
/// assert!((masses[1] - 0.5).abs() < 1e-15);
/// ```
pub fn binomial_masses<T: Float>(ln_coefficients: &[T], p: T) -> PricingResult<Vec<T>> {
    if !(p >= T::zero() && p <= T::one()) {
        return Err(PricingError::NumericDegeneracy(format!(
            "probability {} outside [0, 1]",
            p.to_f64().unwrap_or(f64::NAN)
        )));
    }
    let n = ln_coefficients.len().saturating_sub(1);
    let ln_p = p.ln();
    let ln_q = (T::one() - p).ln();

    Ok(ln_coefficients
        .iter()
        .enumerate()
        .map(|(j, &ln_c)| (ln_c + ln_pow(ln_p, n - j) + ln_pow(ln_q, j)).exp())
        .collect())
}
