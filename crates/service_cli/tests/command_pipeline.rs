//! End-to-end tests of the command layer through its public API.

use pricer_models::instruments::Strategy;
use pricer_optimiser::strikes::GridSize;
use service_cli::commands::{analyse, optimise, simulate};
use service_cli::config::{build_config_with_env, CliOverrides, ENV_SEED};
use service_cli::output::{OutputFormat, Report};

fn overrides() -> CliOverrides {
    CliOverrides {
        n_steps: Some(80),
        n_paths: Some(400),
        ..Default::default()
    }
}

#[test]
fn test_env_seed_makes_commands_reproducible() {
    let env = |key: &str| (key == ENV_SEED).then(|| "2024".to_string());
    let config = build_config_with_env(&overrides(), env).unwrap();
    assert_eq!(config.seed, Some(2024));

    let first = simulate::run(&config).unwrap();
    let second = simulate::run(&config).unwrap();
    assert_eq!(first, second);

    let a = analyse::run(&config).unwrap();
    let b = analyse::run(&config).unwrap();
    assert_eq!(a.analysis, b.analysis);
}

#[test]
fn test_optimum_beats_configured_strikes() {
    let config = build_config_with_env(
        &CliOverrides {
            seed: Some(5),
            ..overrides()
        },
        |_| None,
    )
    .unwrap();

    let analysis = analyse::run(&config).unwrap().analysis;
    let search = optimise::run(&config, Some(GridSize::Medium)).unwrap().result;

    for (report, optimum) in analysis.reports.iter().zip(search.models.iter()) {
        assert_eq!(report.model, optimum.model);
        let rw = optimum.rw.unwrap().expected_profit;
        assert!(rw >= report.rw_expected_profit.unwrap() - 1e-12);
        let gbm = optimum.gbm.unwrap().expected_profit;
        assert!(gbm >= report.gbm_expected_profit - 1e-12);
    }
}

#[test]
fn test_strangle_from_overrides_renders() {
    let config = build_config_with_env(
        &CliOverrides {
            seed: Some(1),
            strategy: Some(Strategy::Strangle),
            k1: Some(92.0),
            k2: Some(108.0),
            ..overrides()
        },
        |_| None,
    )
    .unwrap();

    let report = analyse::run(&config).unwrap();
    let table = report.render(OutputFormat::Table).unwrap();
    assert!(table.contains("Strangle"));
    assert!(table.contains("n/a"));
}
