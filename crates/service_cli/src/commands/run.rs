//! Run command implementation
//!
//! Runs the full experiment and prints a summary, optionally exporting the
//! training and test sets as CSV.

use std::path::Path;

use basket_core::math::stats;
use basket_pricing::experiment::{Experiment, ExperimentConfig, ExperimentOutput};
use serde::Serialize;
use tracing::info;

use super::export::export_datasets;
use crate::{CliError, Result};

/// Command-line overrides, applied after file and environment
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RunOverrides {
    /// Master seed
    pub seed: Option<u64>,
    /// Basket dimension
    pub dimension: Option<usize>,
    /// Number of simulated paths
    pub n_simul: Option<usize>,
}

impl RunOverrides {
    /// Apply to an experiment configuration
    pub fn apply(&self, mut config: ExperimentConfig) -> ExperimentConfig {
        if let Some(seed) = self.seed {
            config.seed = seed;
        }
        if let Some(dimension) = self.dimension {
            config.dimension = dimension;
        }
        if let Some(n_simul) = self.n_simul {
            config.n_simul = n_simul;
        }
        config
    }
}

/// Printable digest of an experiment run
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RunSummary {
    /// Master seed
    pub seed: u64,
    /// Market draws used
    pub market_attempts: usize,
    /// Basket dimension
    pub dimension: usize,
    /// Normalised basket weights
    pub weights: Vec<f64>,
    /// Rescaled per-asset volatilities
    pub sigma: Vec<f64>,
    /// Basket volatility after rescaling
    pub basket_vol: f64,
    /// Strike
    pub strike: f64,
    /// Simulated paths
    pub n_simul: usize,
    /// Test points
    pub n_test: usize,
    /// Mean training payoff
    pub mc_price: f64,
    /// Standard error of the mean payoff
    pub std_error: f64,
    /// Closed-form price at t0
    pub analytic_price: f64,
    /// (mc - analytic) / std_error
    pub z_score: f64,
    /// Mean test label
    pub mean_test_label: f64,
}

impl RunSummary {
    /// Summarise an experiment output
    pub fn from_output(config: &ExperimentConfig, output: &ExperimentOutput) -> Self {
        let check = output.price_check;
        Self {
            seed: config.seed,
            market_attempts: output.market_attempts,
            dimension: output.basket.dim(),
            weights: output.basket.weights().to_vec(),
            sigma: output.basket.market().sigma().to_vec(),
            basket_vol: output.basket.basket_vol(),
            strike: output.basket.strike(),
            n_simul: output.training.len(),
            n_test: output.test.len(),
            mc_price: check.mc_price,
            std_error: check.std_error,
            analytic_price: check.analytic_price,
            z_score: check.z_score(),
            mean_test_label: stats::mean(output.test.labels()),
        }
    }

    fn print_table(&self) {
        let fmt_vec = |v: &[f64]| {
            v.iter()
                .map(|x| format!("{:.4}", x))
                .collect::<Vec<_>>()
                .join(", ")
        };
        println!("\n┌──────────────────────┬──────────────────────────────┐");
        println!("│ {:<20} │ {:>28} │", "seed", self.seed);
        println!("│ {:<20} │ {:>28} │", "market attempts", self.market_attempts);
        println!("│ {:<20} │ {:>28} │", "dimension", self.dimension);
        println!("│ {:<20} │ {:>28.4} │", "basket vol", self.basket_vol);
        println!("│ {:<20} │ {:>28.4} │", "strike", self.strike);
        println!("│ {:<20} │ {:>28} │", "paths", self.n_simul);
        println!("│ {:<20} │ {:>28} │", "test points", self.n_test);
        println!("├──────────────────────┼──────────────────────────────┤");
        println!("│ {:<20} │ {:>28.6} │", "MC price", self.mc_price);
        println!("│ {:<20} │ {:>28.6} │", "std error", self.std_error);
        println!("│ {:<20} │ {:>28.6} │", "analytic price", self.analytic_price);
        println!("│ {:<20} │ {:>28.3} │", "z-score", self.z_score);
        println!("│ {:<20} │ {:>28.6} │", "mean test label", self.mean_test_label);
        println!("└──────────────────────┴──────────────────────────────┘");
        println!("weights: [{}]", fmt_vec(&self.weights));
        println!("sigma:   [{}]", fmt_vec(&self.sigma));
    }
}

/// Run the experiment and return its summary without printing
pub fn execute(
    config: ExperimentConfig,
    export_dir: Option<&Path>,
) -> Result<(ExperimentOutput, RunSummary)> {
    let experiment = Experiment::new(config)?;
    let output = experiment.run()?;
    let summary = RunSummary::from_output(experiment.config(), &output);

    if let Some(dir) = export_dir {
        export_datasets(dir, &output.training, &output.test)?;
    }
    Ok((output, summary))
}

/// Run the run command
pub fn run(config: ExperimentConfig, format: &str, export_dir: Option<&Path>) -> Result<()> {
    if !matches!(format, "json" | "table") {
        return Err(CliError::invalid_argument(format!(
            "Unknown format: {}. Supported: json, table",
            format
        )));
    }

    info!("Starting experiment...");
    let (_, summary) = execute(config, export_dir)?;

    match format {
        "json" => println!("{}", serde_json::to_string_pretty(&summary)?),
        _ => summary.print_table(),
    }

    info!("Experiment complete");
    Ok(())
}
