//! Check command implementation
//!
//! Loads and validates the configuration without running anything.

use std::path::Path;

use tracing::info;

use crate::config::LabConfig;
use crate::Result;

/// Run the check command
pub fn run(config_path: Option<&Path>) -> Result<()> {
    info!("Checking configuration...");
    let config = LabConfig::load_with_env_and_validate(config_path)?;
    let exp = &config.experiment;

    println!("Configuration OK");
    println!("  seed:        {}", exp.seed);
    println!("  market:      {} assets, vol in [{}, {}], spot {}", exp.n_assets, exp.vol_low, exp.vol_high, exp.spot);
    println!("  basket:      dimension {}, strike {}, target vol {}", exp.dimension, exp.strike, exp.target_basket_vol);
    println!("  schedule:    t1 = {}, t2 = {}, multiplier {}", exp.t1, exp.t2, exp.first_period_multiplier);
    println!("  simulation:  {} paths (parallel: {})", exp.n_simul, exp.parallel);
    println!("  test set:    {} points, target std {}", exp.n_test, exp.target_test_std);
    Ok(())
}
