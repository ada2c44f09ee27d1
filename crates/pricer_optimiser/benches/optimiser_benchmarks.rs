//! Benchmarks for pricer_optimiser.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use pricer_core::market_data::MarketParams;
use pricer_models::instruments::Strategy;
use pricer_optimiser::strikes::{generate_strike_grid, optimise_strikes, GridSize};
use pricer_pricing::mc::GbmSimulator;
use pricer_pricing::rng::PricerRng;

fn benchmark_grid_generation(c: &mut Criterion) {
    let mut group = c.benchmark_group("strike_grid");

    for size in [GridSize::Small, GridSize::Medium, GridSize::Large] {
        group.bench_with_input(BenchmarkId::from_parameter(size), &size, |b, &size| {
            b.iter(|| generate_strike_grid(black_box(100.0), size))
        });
    }

    group.finish();
}

fn benchmark_optimise(c: &mut Criterion) {
    let mut group = c.benchmark_group("optimise_strikes");
    group.sample_size(10);

    let market = MarketParams::default().with_steps(365).with_paths(1_000);
    let finals = GbmSimulator::from_market(&market)
        .unwrap()
        .generate(&mut PricerRng::from_seed(42))
        .final_prices();

    for size in [GridSize::Small, GridSize::Medium, GridSize::Large] {
        group.bench_with_input(BenchmarkId::from_parameter(size), &size, |b, &size| {
            b.iter(|| {
                optimise_strikes(
                    black_box(&market),
                    black_box(&finals),
                    size,
                    Strategy::IronCondor,
                )
            })
        });
    }

    group.finish();
}

criterion_group!(benches, benchmark_grid_generation, benchmark_optimise);
criterion_main!(benches);
