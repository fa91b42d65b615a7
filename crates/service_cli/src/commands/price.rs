//! Price command implementation
//!
//! Prints the Bachelier call price for a single (basket) value.

use basket_models::analytical::bach;
use serde::Serialize;
use tracing::info;

use crate::{CliError, Result};

/// Inputs and result of a single `bach` evaluation
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct PriceOutput {
    /// Spot or basket value
    pub spot: f64,
    /// Strike
    pub strike: f64,
    /// Normal volatility
    pub vol: f64,
    /// Time to maturity
    pub time: f64,
    /// Call price
    pub price: f64,
}

/// Evaluate `bach` after checking the inputs are finite
pub fn evaluate(spot: f64, strike: f64, vol: f64, time: f64) -> Result<PriceOutput> {
    for (name, value) in [("spot", spot), ("strike", strike), ("vol", vol), ("time", time)] {
        if !value.is_finite() {
            return Err(CliError::invalid_argument(format!(
                "{} must be finite, got {}",
                name, value
            )));
        }
    }
    if vol < 0.0 || time < 0.0 {
        return Err(CliError::invalid_argument(
            "vol and time must be non-negative",
        ));
    }
    Ok(PriceOutput {
        spot,
        strike,
        vol,
        time,
        price: bach(spot, strike, vol, time),
    })
}

/// Run the price command
pub fn run(spot: f64, strike: f64, vol: f64, time: f64, format: &str) -> Result<()> {
    let output = evaluate(spot, strike, vol, time)?;
    info!(price = output.price, "priced");

    match format {
        "json" => println!("{}", serde_json::to_string_pretty(&output)?),
        "table" => println!(
            "bach(spot={}, strike={}, vol={}, time={}) = {:.10}",
            output.spot, output.strike, output.vol, output.time, output.price
        ),
        other => {
            return Err(CliError::invalid_argument(format!(
                "Unknown format: {}. Supported: json, table",
                other
            )));
        }
    }
    Ok(())
}
