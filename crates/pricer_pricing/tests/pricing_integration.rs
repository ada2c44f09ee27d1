//! End-to-end tests across pricing, simulation and real-world analytics.

use approx::assert_abs_diff_eq;
use pricer_core::market_data::MarketParams;
use pricer_core::math::binomial::{binomial_masses, ln_binomial_coefficients};
use pricer_models::instruments::{OptionType, Strategy, StrategyPayout, StrikeSet};
use pricer_models::models::TreeModel;
use pricer_pricing::analysis::analyse_strategy;
use pricer_pricing::lattice::BinomialPricer;
use pricer_pricing::mc::{simulate_gbm, GbmSimulator, SimulationResult};
use pricer_pricing::real_world::RealWorldAnalyzer;
use pricer_pricing::rng::PricerRng;

// ============================================================================
// Tree pricers
// ============================================================================

#[test]
fn test_put_call_parity_at_200_steps() {
    let market = MarketParams::default().with_steps(200);
    let mut pricer = BinomialPricer::new();
    let parity = market.spot - 100.0 * (-market.rate * market.maturity).exp();

    for model in TreeModel::ALL {
        let call = pricer.price(model, &market, 100.0, OptionType::Call).unwrap();
        let put = pricer.price(model, &market, 100.0, OptionType::Put).unwrap();
        assert_abs_diff_eq!(call - put, parity, epsilon = 0.1);
    }
}

#[test]
fn test_crr_monotonic_convergence() {
    let mut pricer = BinomialPricer::new();
    let at = |pricer: &mut BinomialPricer, n: usize| {
        pricer
            .price(
                TreeModel::CoxRossRubinstein,
                &MarketParams::default().with_steps(n),
                100.0,
                OptionType::Call,
            )
            .unwrap()
    };
    let coarse = at(&mut pricer, 100);
    let fine = at(&mut pricer, 500);
    assert!((coarse - fine).abs() < 0.5);
}

// ============================================================================
// GBM simulation
// ============================================================================

#[test]
fn test_zero_volatility_paths() {
    let paths = simulate_gbm(0.05, 0.0, 365, 100, 100.0, 1.0, &mut PricerRng::from_seed(1)).unwrap();
    let target = 100.0 * 0.05_f64.exp();
    for s in paths.final_prices() {
        assert!((s - target).abs() < 1e-5);
    }
}

#[test]
fn test_reproducible_with_seed() {
    let a = simulate_gbm(0.08, 0.2, 100, 100, 100.0, 1.0, &mut PricerRng::from_seed(99)).unwrap();
    let b = simulate_gbm(0.08, 0.2, 100, 100, 100.0, 1.0, &mut PricerRng::from_seed(99)).unwrap();
    let c = simulate_gbm(0.08, 0.2, 100, 100, 100.0, 1.0, &mut PricerRng::from_seed(100)).unwrap();
    assert_eq!(a, b);
    assert_ne!(a, c);
}

// ============================================================================
// Real-world analytics
// ============================================================================

#[test]
fn test_binomial_mass_normalisation() {
    for n in [10, 365, 2_000] {
        let ln_c = ln_binomial_coefficients::<f64>(n);
        let total: f64 = binomial_masses(&ln_c, 0.503).unwrap().iter().sum();
        assert!((total - 1.0).abs() < 1e-10);
    }
}

#[test]
fn test_iron_condor_profit_probability_bounds() {
    let market = MarketParams::default();
    let condor = StrategyPayout::iron_condor(90.0, 95.0, 105.0, 110.0).unwrap();
    let narrow = StrategyPayout::iron_condor(97.0, 99.0, 101.0, 103.0).unwrap();

    for analyzer in RealWorldAnalyzer::for_all_models(&market).unwrap() {
        let wide_p = analyzer.profit_probability(&condor).unwrap();
        let narrow_p = analyzer.profit_probability(&narrow).unwrap();
        assert!(wide_p > narrow_p);
        assert!(narrow_p > 0.0 && wide_p < 1.0);
    }
}

// ============================================================================
// Full pipeline
// ============================================================================

#[test]
fn test_single_calculation_request() {
    let market = MarketParams::default().with_steps(120).with_paths(1_000);
    let strikes = StrikeSet::default();
    let payout = StrategyPayout::for_strategy(Strategy::IronCondor, &strikes).unwrap();

    let paths = GbmSimulator::from_market(&market)
        .unwrap()
        .generate(&mut PricerRng::from_seed(42));
    let simulation = SimulationResult::new(paths, &payout);

    let mut pricer = BinomialPricer::new();
    let analysis = analyse_strategy(
        &mut pricer,
        &market,
        Strategy::IronCondor,
        &strikes,
        &simulation.final_prices,
    )
    .unwrap();

    assert_abs_diff_eq!(analysis.mean_payout, simulation.mean_payout(), epsilon = 1e-12);
    for report in &analysis.reports {
        // Capital of a condor is bounded by the wider spread.
        assert!(report.initial_capital > 0.0 && report.initial_capital < 5.0);
        assert!(report.gbm_expected_profit < report.initial_capital);
        assert!(report.profit_probability.is_some());
    }
    // Four strikes share one lattice per model.
    assert_eq!(pricer.cache().len(), 3);
}
