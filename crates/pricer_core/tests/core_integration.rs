//! Integration tests for the foundation layer.
//!
//! Verify that the public modules are reachable by absolute path and that
//! market parameters and binomial masses behave together as the upper
//! layers expect.

use approx::assert_relative_eq;
use pricer_core::market_data::MarketParams;
use pricer_core::math::binomial::{binomial_coefficients, binomial_masses, ln_binomial_coefficients};
use pricer_core::types::{PricingError, PricingResult};

#[test]
fn test_default_market_feeds_binomial_masses() {
    let market = MarketParams::default();
    assert_eq!(market.n_steps, 365);
    assert_relative_eq!(market.dt(), 1.0 / 365.0);

    let ln_c = ln_binomial_coefficients::<f64>(market.n_steps);
    assert_eq!(ln_c.len(), market.n_steps + 1);

    let masses = binomial_masses(&ln_c, 0.52).unwrap();
    assert_relative_eq!(masses.iter().sum::<f64>(), 1.0, epsilon = 1e-10);
    assert!(masses.iter().all(|m| *m >= 0.0));
}

#[test]
fn test_log_and_direct_coefficients_agree() {
    let direct: Vec<f64> = binomial_coefficients(30);
    let logs: Vec<f64> = ln_binomial_coefficients(30);
    for (c, ln_c) in direct.iter().zip(&logs) {
        assert_relative_eq!(*c, ln_c.exp(), max_relative = 1e-10);
    }
}

#[test]
fn test_errors_surface_through_result_alias() {
    fn build(spot: f64) -> PricingResult<MarketParams> {
        MarketParams::new(spot, 0.05, 0.08, 0.2, 1.0, 100, 1000)
    }

    assert!(build(100.0).is_ok());
    match build(-1.0) {
        Err(PricingError::InvalidParameter { name, value, .. }) => {
            assert_eq!(name, "spot");
            assert_eq!(value, -1.0);
        }
        other => panic!("unexpected result: {other:?}"),
    }

    let err = binomial_masses(&ln_binomial_coefficients::<f64>(10), 1.5).unwrap_err();
    assert!(err.is_degenerate());
}
