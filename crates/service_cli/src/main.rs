//! strategy-sim: options strategy simulator CLI
//!
//! # Commands
//!
//! - `strategy-sim price --model crr --strike 105 --option-type C` - Price one vanilla
//! - `strategy-sim simulate` - Summarise a GBM simulation
//! - `strategy-sim analyse` - Compare the strategy under every tree model
//! - `strategy-sim optimise --grid small` - Search a strike grid
//!
//! Configuration is read from `strategy-sim.toml` (or `--config`), then
//! `STRATEGY_SIM_LOG_LEVEL` / `STRATEGY_SIM_SEED`, then the flags below.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use pricer_models::instruments::Strategy;
use pricer_models::models::TreeModel;
use pricer_optimiser::strikes::GridSize;
use service_cli::commands;
use service_cli::config::{build_config, CliOverrides};
use service_cli::output::{OutputFormat, Report};
use service_cli::Result;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Options strategy simulator
#[derive(Parser, Debug)]
#[command(name = "strategy-sim")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Enable debug logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Configuration file path (TOML format)
    #[arg(short, long, global = true, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Output format
    #[arg(short, long, global = true, value_enum, default_value_t = OutputFormat::Table)]
    format: OutputFormat,

    /// Seed for path simulation
    #[arg(long, global = true)]
    seed: Option<u64>,

    #[command(flatten)]
    market: MarketArgs,

    #[command(subcommand)]
    command: Commands,
}

/// Market and strategy overrides
#[derive(Args, Debug, Default)]
struct MarketArgs {
    /// Spot price S
    #[arg(long, global = true)]
    spot: Option<f64>,

    /// Risk-free rate r
    #[arg(long, global = true)]
    rate: Option<f64>,

    /// Real-world drift μ
    #[arg(long, global = true, allow_hyphen_values = true)]
    drift: Option<f64>,

    /// Volatility σ
    #[arg(long, global = true)]
    volatility: Option<f64>,

    /// Maturity T in years
    #[arg(long, global = true)]
    maturity: Option<f64>,

    /// Binomial steps N
    #[arg(long, global = true)]
    steps: Option<usize>,

    /// Monte Carlo paths
    #[arg(long, global = true)]
    paths: Option<usize>,

    /// Strategy (iron-condor, straddle, strangle)
    #[arg(long, global = true)]
    strategy: Option<Strategy>,

    /// Strike K1
    #[arg(long, global = true)]
    k1: Option<f64>,

    /// Strike K2
    #[arg(long, global = true)]
    k2: Option<f64>,

    /// Strike K3
    #[arg(long, global = true)]
    k3: Option<f64>,

    /// Strike K4
    #[arg(long, global = true)]
    k4: Option<f64>,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Price a European vanilla with one tree model
    Price {
        /// Tree model (crr, shreve, drift)
        #[arg(short, long, default_value = "crr")]
        model: TreeModel,

        /// Strike price
        #[arg(short, long)]
        strike: f64,

        /// Option type (C or P)
        #[arg(short = 't', long, default_value = "C")]
        option_type: String,
    },

    /// Simulate GBM paths and summarise the terminal distribution
    Simulate,

    /// Analyse the configured strategy under every tree model
    Analyse,

    /// Search a strike grid for the best expected profit
    Optimise {
        /// Grid density (small, medium, large)
        #[arg(short, long)]
        grid: Option<GridSize>,
    },
}

impl Cli {
    fn overrides(&self) -> CliOverrides {
        let m = &self.market;
        CliOverrides {
            config_file: self.config.clone(),
            verbose: self.verbose,
            seed: self.seed,
            spot: m.spot,
            rate: m.rate,
            drift: m.drift,
            volatility: m.volatility,
            maturity: m.maturity,
            n_steps: m.steps,
            n_paths: m.paths,
            strategy: m.strategy,
            k1: m.k1,
            k2: m.k2,
            k3: m.k3,
            k4: m.k4,
            grid_size: None,
        }
    }
}

fn init_tracing(log_level: &str) {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(log_level)),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let config = build_config(&cli.overrides())?;

    init_tracing(config.log_level.as_filter_str());
    info!(
        strategy = %config.strategy,
        strikes = %config.strikes,
        seed = ?config.seed,
        "Configuration loaded"
    );

    let rendered = match cli.command {
        Commands::Price {
            model,
            strike,
            option_type,
        } => commands::price::run(&config, model, strike, &option_type)?.render(cli.format)?,
        Commands::Simulate => commands::simulate::run(&config)?.render(cli.format)?,
        Commands::Analyse => commands::analyse::run(&config)?.render(cli.format)?,
        Commands::Optimise { grid } => {
            commands::optimise::run(&config, grid)?.render(cli.format)?
        }
    };
    println!("{rendered}");
    Ok(())
}
