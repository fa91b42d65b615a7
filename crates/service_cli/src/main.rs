//! basket-lab CLI - Bachelier basket experiments from the command line
//!
//! # Commands
//!
//! - `basket-lab run` - Generate a market, simulate paths, build data sets
//! - `basket-lab price --spot S --strike K --vol V --time T` - Closed-form price
//! - `basket-lab check` - Validate the configuration
//!
//! # Configuration
//!
//! Settings are resolved in order: `basket_lab.toml` (or `--config`),
//! `BASKET_LAB_*` environment variables, then command-line flags.

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use tracing::{debug, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

mod commands;
mod config;
mod error;

pub use error::{CliError, Result};

use commands::run::RunOverrides;
use config::{LabConfig, ENV_LOG};

/// Bachelier basket experiment engine
#[derive(Parser)]
#[command(name = "basket-lab")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Configuration file path (defaults to basket_lab.toml if present)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the full experiment
    Run {
        /// Master seed
        #[arg(short, long)]
        seed: Option<u64>,

        /// Number of basket assets
        #[arg(short, long)]
        dimension: Option<usize>,

        /// Number of simulated paths
        #[arg(short, long)]
        n_simul: Option<usize>,

        /// Output format (table, json)
        #[arg(short, long, default_value = "table")]
        format: String,

        /// Directory for train.csv and test.csv
        #[arg(short, long)]
        export_dir: Option<PathBuf>,
    },

    /// Price a call with the Bachelier formula
    Price {
        /// Spot or basket value
        #[arg(long, allow_hyphen_values = true)]
        spot: f64,

        /// Strike
        #[arg(long, allow_hyphen_values = true)]
        strike: f64,

        /// Normal volatility
        #[arg(long)]
        vol: f64,

        /// Time to maturity
        #[arg(long)]
        time: f64,

        /// Output format (table, json)
        #[arg(short, long, default_value = "table")]
        format: String,
    },

    /// Check configuration
    Check,
}

/// Log filter: `BASKET_LAB_LOG` if set and valid, else the configured level,
/// raised to debug by `--verbose`.
fn init_tracing(verbose: bool, configured_level: &str) {
    let default_directive = if verbose { "debug" } else { configured_level };
    let filter = EnvFilter::try_from_env(ENV_LOG)
        .or_else(|_| EnvFilter::try_new(default_directive))
        .unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .with(filter)
        .init();
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // The price command needs no configuration file.
    let lab_config = match &cli.command {
        Commands::Price { .. } => LabConfig::default(),
        _ => LabConfig::resolve(cli.config.as_deref())?.with_env_override()?,
    };

    init_tracing(cli.verbose, &lab_config.log_level);
    if cli.verbose {
        info!("Verbose mode enabled");
    }
    debug!(config = ?cli.config, "configuration resolved");

    match cli.command {
        Commands::Run {
            seed,
            dimension,
            n_simul,
            format,
            export_dir,
        } => {
            let overrides = RunOverrides {
                seed,
                dimension,
                n_simul,
            };
            let experiment = overrides.apply(lab_config.experiment);
            commands::run::run(experiment, &format, export_dir.as_deref())?;
        }
        Commands::Price {
            spot,
            strike,
            vol,
            time,
            format,
        } => commands::price::run(spot, strike, vol, time, &format)?,
        Commands::Check => commands::check::run(cli.config.as_deref())?,
    }

    Ok(())
}
