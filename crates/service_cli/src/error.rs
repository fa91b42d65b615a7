//! Error types for the basket-lab CLI.

use basket_core::types::SimulationError;
use thiserror::Error;

use crate::config::ConfigError;

/// CLI error type
#[derive(Debug, Error)]
pub enum CliError {
    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Engine error
    #[error("Simulation error: {0}")]
    Simulation(#[from] SimulationError),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// CSV export error
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// JSON output error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Invalid command-line argument
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),
}

impl CliError {
    /// Create an invalid argument error
    pub fn invalid_argument(msg: impl Into<String>) -> Self {
        Self::InvalidArgument(msg.into())
    }
}

/// Result alias for CLI commands
pub type Result<T> = std::result::Result<T, CliError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = CliError::invalid_argument("unknown format");
        assert_eq!(err.to_string(), "Invalid argument: unknown format");
    }

    #[test]
    fn test_from_simulation_error() {
        let err: CliError = SimulationError::InvalidDimension {
            requested: 4,
            available: 2,
        }
        .into();
        assert!(err.to_string().contains("requested 4, available 2"));
    }
}
