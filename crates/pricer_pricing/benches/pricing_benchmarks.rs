//! Benchmarks for pricer_pricing.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use pricer_core::market_data::MarketParams;
use pricer_models::instruments::{OptionType, StrategyPayout};
use pricer_models::models::TreeModel;
use pricer_pricing::lattice::BinomialPricer;
use pricer_pricing::mc::GbmSimulator;
use pricer_pricing::real_world::RealWorldAnalyzer;
use pricer_pricing::rng::PricerRng;

fn benchmark_binomial_pricing(c: &mut Criterion) {
    let mut group = c.benchmark_group("binomial_price");

    for n_steps in [100, 365, 1_000] {
        let market = MarketParams::default().with_steps(n_steps);
        let mut pricer = BinomialPricer::new();

        group.bench_with_input(BenchmarkId::from_parameter(n_steps), &market, |b, m| {
            b.iter(|| {
                pricer.price(
                    TreeModel::CoxRossRubinstein,
                    black_box(m),
                    black_box(100.0),
                    OptionType::Call,
                )
            })
        });
    }

    group.finish();
}

fn benchmark_gbm_paths(c: &mut Criterion) {
    let simulator = GbmSimulator::new(100.0, 0.08, 0.2, 1.0, 365, 1_000).unwrap();

    c.bench_function("gbm_1000x365", |b| {
        b.iter(|| simulator.generate(&mut PricerRng::from_seed(black_box(42))))
    });
}

fn benchmark_real_world(c: &mut Criterion) {
    let market = MarketParams::default();
    let condor = StrategyPayout::iron_condor(90.0, 95.0, 105.0, 110.0).unwrap();

    c.bench_function("rw_analyzer_build_365", |b| {
        b.iter(|| RealWorldAnalyzer::new(TreeModel::DriftAdjusted, black_box(&market)))
    });

    let analyzer = RealWorldAnalyzer::new(TreeModel::DriftAdjusted, &market).unwrap();
    c.bench_function("rw_expected_profit_365", |b| {
        b.iter(|| analyzer.expected_profit(black_box(&condor), black_box(2.0)))
    });
}

criterion_group!(
    benches,
    benchmark_binomial_pricing,
    benchmark_gbm_paths,
    benchmark_real_world
);
criterion_main!(benches);
