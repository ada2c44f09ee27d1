//! Simulator configuration management
//!
//! Handles loading configuration from a TOML file, environment variables and
//! command-line overrides.

use std::path::{Path, PathBuf};
use std::str::FromStr;

use pricer_core::market_data::MarketParams;
use pricer_models::instruments::{Strategy, StrikeSet};
use pricer_optimiser::strikes::GridSize;
use serde::Deserialize;
use thiserror::Error;

/// Config file read when `--config` is not given, if it exists.
pub const DEFAULT_CONFIG_FILE: &str = "strategy-sim.toml";

/// Environment variable overriding the log level.
pub const ENV_LOG_LEVEL: &str = "STRATEGY_SIM_LOG_LEVEL";

/// Environment variable overriding the random seed.
pub const ENV_SEED: &str = "STRATEGY_SIM_SEED";

/// Configuration error types
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid log level: {0}. Must be one of: trace, debug, info, warn, error")]
    InvalidLogLevel(String),

    #[error("Invalid seed: {0}. Must be an unsigned 64-bit integer")]
    InvalidSeed(String),

    #[error("Configuration file error: {0}")]
    FileError(String),
}

/// Log levels supported by the CLI
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogLevel {
    Trace,
    Debug,
    #[default]
    Info,
    Warn,
    Error,
}

impl FromStr for LogLevel {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "trace" => Ok(LogLevel::Trace),
            "debug" => Ok(LogLevel::Debug),
            "info" => Ok(LogLevel::Info),
            "warn" => Ok(LogLevel::Warn),
            "error" => Ok(LogLevel::Error),
            _ => Err(ConfigError::InvalidLogLevel(s.to_string())),
        }
    }
}

impl LogLevel {
    /// Convert log level to tracing filter string
    pub fn as_filter_str(&self) -> &'static str {
        match self {
            LogLevel::Trace => "trace",
            LogLevel::Debug => "debug",
            LogLevel::Info => "info",
            LogLevel::Warn => "warn",
            LogLevel::Error => "error",
        }
    }
}

impl std::fmt::Display for LogLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_filter_str())
    }
}

/// Simulator configuration
///
/// ```toml
/// strategy = "iron condor"
/// grid_size = "medium"
/// seed = 42
/// log_level = "info"
///
/// [market]
/// spot = 100.0
/// volatility = 0.25
///
/// [strikes]
/// k1 = 85.0
/// ```
///
/// Every field is optional and falls back to its default.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct SimConfig {
    /// Market and discretisation parameters
    pub market: MarketParams,
    /// Strike tuple
    pub strikes: StrikeSet,
    /// Strategy under analysis
    #[serde(deserialize_with = "deserialize_from_str")]
    pub strategy: Strategy,
    /// Seed for path simulation, fresh entropy when absent
    pub seed: Option<u64>,
    /// Log level
    #[serde(deserialize_with = "deserialize_from_str")]
    pub log_level: LogLevel,
    /// Default grid for `optimise`
    #[serde(deserialize_with = "deserialize_from_str")]
    pub grid_size: GridSize,
}

fn deserialize_from_str<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: serde::Deserializer<'de>,
    T: FromStr,
    T::Err: std::fmt::Display,
{
    let s = String::deserialize(deserializer)?;
    T::from_str(&s).map_err(serde::de::Error::custom)
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            market: MarketParams::default(),
            strikes: StrikeSet::default(),
            strategy: Strategy::IronCondor,
            seed: None,
            log_level: LogLevel::Info,
            grid_size: GridSize::Medium,
        }
    }
}

impl SimConfig {
    /// Load configuration from a TOML file
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            ConfigError::FileError(format!("Failed to read {}: {}", path.display(), e))
        })?;
        Self::from_toml(&content)
    }

    /// Parse configuration from TOML text
    pub fn from_toml(content: &str) -> Result<Self, ConfigError> {
        toml::from_str(content)
            .map_err(|e| ConfigError::FileError(format!("Failed to parse TOML: {}", e)))
    }

    /// Apply environment overrides read through `lookup`.
    pub fn apply_env<F>(&mut self, lookup: F) -> Result<(), ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(level) = lookup(ENV_LOG_LEVEL) {
            self.log_level = LogLevel::from_str(&level)?;
        }
        if let Some(seed) = lookup(ENV_SEED) {
            self.seed = Some(
                seed.trim()
                    .parse()
                    .map_err(|_| ConfigError::InvalidSeed(seed.clone()))?,
            );
        }
        Ok(())
    }

    /// Merge with CLI arguments (CLI takes precedence)
    pub fn merge_with_cli(&mut self, cli: &CliOverrides) {
        let market = &mut self.market;
        let scalars = [
            (&mut market.spot, cli.spot),
            (&mut market.rate, cli.rate),
            (&mut market.drift, cli.drift),
            (&mut market.volatility, cli.volatility),
            (&mut market.maturity, cli.maturity),
        ];
        for (slot, value) in scalars {
            if let Some(value) = value {
                *slot = value;
            }
        }
        if let Some(n_steps) = cli.n_steps {
            market.n_steps = n_steps;
        }
        if let Some(n_paths) = cli.n_paths {
            market.n_paths = n_paths;
        }

        let strikes = &mut self.strikes;
        for (slot, value) in [
            (&mut strikes.k1, cli.k1),
            (&mut strikes.k2, cli.k2),
            (&mut strikes.k3, cli.k3),
            (&mut strikes.k4, cli.k4),
        ] {
            if let Some(value) = value {
                *slot = value;
            }
        }

        if let Some(strategy) = cli.strategy {
            self.strategy = strategy;
        }
        if let Some(seed) = cli.seed {
            self.seed = Some(seed);
        }
        if let Some(grid_size) = cli.grid_size {
            self.grid_size = grid_size;
        }
        if cli.verbose {
            self.log_level = LogLevel::Debug;
        }
    }
}

/// Values supplied on the command line
#[derive(Debug, Clone, Default)]
pub struct CliOverrides {
    /// Config file path
    pub config_file: Option<PathBuf>,
    /// Raise the log level to debug
    pub verbose: bool,
    /// Seed override
    pub seed: Option<u64>,
    pub spot: Option<f64>,
    pub rate: Option<f64>,
    pub drift: Option<f64>,
    pub volatility: Option<f64>,
    pub maturity: Option<f64>,
    pub n_steps: Option<usize>,
    pub n_paths: Option<usize>,
    pub strategy: Option<Strategy>,
    pub k1: Option<f64>,
    pub k2: Option<f64>,
    pub k3: Option<f64>,
    pub k4: Option<f64>,
    pub grid_size: Option<GridSize>,
}

/// Build configuration from all sources
///
/// Priority (highest to lowest):
/// 1. CLI arguments
/// 2. Environment variables
/// 3. Config file
/// 4. Default values
pub fn build_config(cli: &CliOverrides) -> Result<SimConfig, ConfigError> {
    build_config_with_env(cli, |key| std::env::var(key).ok())
}

/// [`build_config`] with an explicit environment lookup.
pub fn build_config_with_env<F>(cli: &CliOverrides, lookup: F) -> Result<SimConfig, ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    let mut config = match &cli.config_file {
        Some(path) => SimConfig::from_file(path)?,
        None => {
            let fallback = Path::new(DEFAULT_CONFIG_FILE);
            if fallback.is_file() {
                SimConfig::from_file(fallback)?
            } else {
                SimConfig::default()
            }
        }
    };

    config.apply_env(lookup)?;
    config.merge_with_cli(cli);
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn no_env(_: &str) -> Option<String> {
        None
    }

    #[test]
    fn test_default_config() {
        let config = SimConfig::default();
        assert_eq!(config.market, MarketParams::default());
        assert_eq!(config.strikes, StrikeSet::new(90.0, 95.0, 105.0, 110.0));
        assert_eq!(config.strategy, Strategy::IronCondor);
        assert_eq!(config.grid_size, GridSize::Medium);
        assert_eq!(config.log_level, LogLevel::Info);
        assert!(config.seed.is_none());
    }

    #[test]
    fn test_log_level_parsing() {
        assert_eq!(LogLevel::from_str("trace").unwrap(), LogLevel::Trace);
        assert_eq!(LogLevel::from_str("DEBUG").unwrap(), LogLevel::Debug);
        assert_eq!(LogLevel::from_str("Info").unwrap(), LogLevel::Info);
        assert_eq!(LogLevel::from_str("WARN").unwrap(), LogLevel::Warn);
        assert_eq!(LogLevel::from_str("error").unwrap(), LogLevel::Error);
        assert!(LogLevel::from_str("verbose").is_err());
        assert_eq!(LogLevel::Warn.to_string(), "warn");
    }

    #[test]
    fn test_toml_deserialization() {
        let config = SimConfig::from_toml(
            r#"
            strategy = "strangle"
            grid_size = "large"
            seed = 7
            log_level = "warn"

            [market]
            spot = 120.0
            volatility = 0.3
            n_steps = 200

            [strikes]
            k1 = 110.0
            k2 = 130.0
            "#,
        )
        .unwrap();

        assert_eq!(config.strategy, Strategy::Strangle);
        assert_eq!(config.grid_size, GridSize::Large);
        assert_eq!(config.seed, Some(7));
        assert_eq!(config.log_level, LogLevel::Warn);
        assert_eq!(config.market.spot, 120.0);
        assert_eq!(config.market.volatility, 0.3);
        assert_eq!(config.market.n_steps, 200);
        // Unspecified fields keep their defaults.
        assert_eq!(config.market.rate, 0.05);
        assert_eq!(config.market.n_paths, 1000);
        assert_eq!(config.strikes.k3, 105.0);
    }

    #[test]
    fn test_example_file_matches_defaults() {
        let example = SimConfig::from_toml(include_str!("../../../strategy-sim.example.toml")).unwrap();
        assert_eq!(example, SimConfig::default());
    }

    #[test]
    fn test_partial_and_invalid_toml() {
        let config = SimConfig::from_toml("seed = 1").unwrap();
        assert_eq!(config.market, MarketParams::default());

        assert!(matches!(
            SimConfig::from_toml("strategy = \"butterfly\""),
            Err(ConfigError::FileError(_))
        ));
        assert!(matches!(
            SimConfig::from_toml("log_level = \"loud\""),
            Err(ConfigError::FileError(_))
        ));
    }

    #[test]
    fn test_env_overrides() {
        let env: HashMap<&str, &str> = [(ENV_LOG_LEVEL, "debug"), (ENV_SEED, "123")].into();
        let mut config = SimConfig::default();
        config.apply_env(|k| env.get(k).map(|v| v.to_string())).unwrap();
        assert_eq!(config.log_level, LogLevel::Debug);
        assert_eq!(config.seed, Some(123));

        let mut config = SimConfig::default();
        let err = config
            .apply_env(|k| (k == ENV_SEED).then(|| "-1".to_string()))
            .unwrap_err();
        assert!(matches!(err, ConfigError::InvalidSeed(_)));
    }

    #[test]
    fn test_cli_takes_precedence() {
        let cli = CliOverrides {
            seed: Some(9),
            spot: Some(150.0),
            n_paths: Some(500),
            strategy: Some(Strategy::Straddle),
            k1: Some(150.0),
            verbose: true,
            ..Default::default()
        };
        let config = build_config_with_env(&cli, |k| {
            (k == ENV_SEED).then(|| "1".to_string())
        })
        .unwrap();
        assert_eq!(config.seed, Some(9));
        assert_eq!(config.market.spot, 150.0);
        assert_eq!(config.market.n_paths, 500);
        assert_eq!(config.market.n_steps, 365);
        assert_eq!(config.strategy, Strategy::Straddle);
        assert_eq!(config.strikes.k1, 150.0);
        assert_eq!(config.log_level, LogLevel::Debug);
    }

    #[test]
    fn test_file_then_env_then_cli() {
        let path = std::env::temp_dir().join(format!(
            "strategy-sim-config-test-{}.toml",
            std::process::id()
        ));
        std::fs::write(&path, "seed = 5\nlog_level = \"error\"\n[market]\nspot = 80.0\n").unwrap();

        let cli = CliOverrides {
            config_file: Some(path.clone()),
            ..Default::default()
        };
        let from_file = build_config_with_env(&cli, no_env).unwrap();
        assert_eq!(from_file.seed, Some(5));
        assert_eq!(from_file.market.spot, 80.0);
        assert_eq!(from_file.log_level, LogLevel::Error);

        let with_env =
            build_config_with_env(&cli, |k| (k == ENV_LOG_LEVEL).then(|| "trace".into())).unwrap();
        assert_eq!(with_env.log_level, LogLevel::Trace);
        assert_eq!(with_env.seed, Some(5));

        std::fs::remove_file(&path).unwrap();
    }

    #[test]
    fn test_missing_explicit_file_is_an_error() {
        let cli = CliOverrides {
            config_file: Some(PathBuf::from("/nonexistent/strategy-sim.toml")),
            ..Default::default()
        };
        assert!(matches!(
            build_config_with_env(&cli, no_env),
            Err(ConfigError::FileError(_))
        ));
    }
}
