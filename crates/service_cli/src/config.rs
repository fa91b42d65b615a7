//! CLI configuration management.
//!
//! Loads the experiment configuration from a TOML file, then applies
//! environment variable overrides. Command-line flags are applied last by
//! the commands themselves.
//!
//! ```toml
//! log_level = "info"
//!
//! [experiment]
//! seed = 42
//! dimension = 5
//! n_simul = 8192
//! ```

use std::path::{Path, PathBuf};

use basket_pricing::experiment::ExperimentConfig;
use serde::Deserialize;
use thiserror::Error;

/// File looked up when no `--config` is given.
pub const DEFAULT_CONFIG_PATH: &str = "basket_lab.toml";

/// Environment variable overriding the master seed.
pub const ENV_SEED: &str = "BASKET_LAB_SEED";
/// Environment variable overriding the basket dimension.
pub const ENV_DIMENSION: &str = "BASKET_LAB_DIMENSION";
/// Environment variable overriding the number of simulated paths.
pub const ENV_N_SIMUL: &str = "BASKET_LAB_N_SIMUL";
/// Environment variable overriding the log level.
pub const ENV_LOG: &str = "BASKET_LAB_LOG";

const VALID_LOG_LEVELS: [&str; 5] = ["trace", "debug", "info", "warn", "error"];

/// basket-lab configuration
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct LabConfig {
    /// Log level used when `BASKET_LAB_LOG` holds no filter directive
    #[serde(default = "default_log_level")]
    pub log_level: String,

    /// Experiment parameters
    #[serde(default)]
    pub experiment: ExperimentConfig,
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for LabConfig {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
            experiment: ExperimentConfig::default(),
        }
    }
}

impl LabConfig {
    /// Load configuration from a TOML file
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::Io {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;
        Self::from_toml_str(&content)
    }

    /// Parse configuration from TOML text
    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        toml::from_str(content).map_err(|e| ConfigError::Parse(e.to_string()))
    }

    /// Load from an explicit path, or from [`DEFAULT_CONFIG_PATH`] if it
    /// exists, or fall back to defaults.
    ///
    /// An explicit path that cannot be read is an error.
    pub fn resolve(path: Option<&Path>) -> Result<Self, ConfigError> {
        match path {
            Some(p) => Self::load(p),
            None => {
                let default_path = PathBuf::from(DEFAULT_CONFIG_PATH);
                if default_path.exists() {
                    Self::load(&default_path)
                } else {
                    Ok(Self::default())
                }
            }
        }
    }

    /// Apply environment variable overrides
    pub fn with_env_override(self) -> Result<Self, ConfigError> {
        self.with_overrides_from(|key| std::env::var(key).ok())
    }

    /// Apply overrides read through `lookup` (environment in production).
    pub fn with_overrides_from<F>(mut self, lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(seed) = lookup(ENV_SEED) {
            self.experiment.seed = parse_override(ENV_SEED, &seed)?;
        }
        if let Some(dimension) = lookup(ENV_DIMENSION) {
            self.experiment.dimension = parse_override(ENV_DIMENSION, &dimension)?;
        }
        if let Some(n_simul) = lookup(ENV_N_SIMUL) {
            self.experiment.n_simul = parse_override(ENV_N_SIMUL, &n_simul)?;
        }
        if let Some(log_level) = lookup(ENV_LOG) {
            self.log_level = log_level;
        }
        Ok(self)
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), ConfigError> {
        let mut errors = Vec::new();

        // A full filter directive (e.g. "basket_pricing=debug") is accepted
        // as-is; a bare word must be a known level.
        let level = self.log_level.to_lowercase();
        if !level.contains('=') && !VALID_LOG_LEVELS.contains(&level.as_str()) {
            errors.push(format!(
                "Invalid log_level '{}'. Valid values: {:?}",
                self.log_level, VALID_LOG_LEVELS
            ));
        }

        if let Err(e) = self.experiment.validate() {
            errors.push(e.to_string());
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(ConfigError::Validation(errors))
        }
    }

    /// Resolve, apply environment overrides and validate
    pub fn load_with_env_and_validate(path: Option<&Path>) -> Result<Self, ConfigError> {
        let config = Self::resolve(path)?.with_env_override()?;
        config.validate()?;
        Ok(config)
    }
}

fn parse_override<T: std::str::FromStr>(key: &'static str, value: &str) -> Result<T, ConfigError> {
    value.trim().parse().map_err(|_| ConfigError::Override {
        key,
        value: value.to_string(),
    })
}

/// Configuration error type
#[derive(Debug, Clone, Error, PartialEq)]
pub enum ConfigError {
    /// IO error reading config file
    #[error("IO error reading {path:?}: {reason}")]
    Io {
        /// File that failed to load
        path: PathBuf,
        /// Underlying error message
        reason: String,
    },

    /// Parse error in config file
    #[error("Parse error: {0}")]
    Parse(String),

    /// Unparsable environment override
    #[error("Invalid value '{value}' for {key}")]
    Override {
        /// Environment variable name
        key: &'static str,
        /// Offending value
        value: String,
    },

    /// Validation error
    #[error("Validation errors: {}", .0.join("; "))]
    Validation(Vec<String>),
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use std::io::Write;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key: &str| map.get(key).cloned()
    }

    #[test]
    fn test_default_config_is_valid() {
        let config = LabConfig::default();
        assert_eq!(config.log_level, "info");
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_parse_partial_toml_keeps_defaults() {
        let config = LabConfig::from_toml_str(
            r#"
            log_level = "debug"

            [experiment]
            seed = 7
            dimension = 3
            "#,
        )
        .unwrap();

        assert_eq!(config.log_level, "debug");
        assert_eq!(config.experiment.seed, 7);
        assert_eq!(config.experiment.dimension, 3);
        assert_eq!(config.experiment.n_assets, ExperimentConfig::default().n_assets);
    }

    #[test]
    fn test_parse_empty_toml_is_default() {
        assert_eq!(LabConfig::from_toml_str("").unwrap(), LabConfig::default());
    }

    #[test]
    fn test_parse_error() {
        let result = LabConfig::from_toml_str("[experiment]\nseed = \"abc\"");
        assert!(matches!(result, Err(ConfigError::Parse(_))));
    }

    #[test]
    fn test_load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[experiment]\nn_simul = 1234").unwrap();

        let config = LabConfig::load(file.path()).unwrap();
        assert_eq!(config.experiment.n_simul, 1234);
    }

    #[test]
    fn test_load_missing_explicit_file_fails() {
        let result = LabConfig::resolve(Some(Path::new("/nonexistent/basket_lab.toml")));
        assert!(matches!(result, Err(ConfigError::Io { .. })));
    }

    #[test]
    fn test_overrides_applied() {
        let config = LabConfig::default()
            .with_overrides_from(lookup_from(&[
                (ENV_SEED, "99"),
                (ENV_DIMENSION, "4"),
                (ENV_N_SIMUL, "2048"),
                (ENV_LOG, "warn"),
            ]))
            .unwrap();

        assert_eq!(config.experiment.seed, 99);
        assert_eq!(config.experiment.dimension, 4);
        assert_eq!(config.experiment.n_simul, 2048);
        assert_eq!(config.log_level, "warn");
    }

    #[test]
    fn test_no_overrides_is_identity() {
        let config = LabConfig::default().with_overrides_from(|_| None).unwrap();
        assert_eq!(config, LabConfig::default());
    }

    #[test]
    fn test_invalid_override_rejected() {
        let result = LabConfig::default().with_overrides_from(lookup_from(&[(ENV_SEED, "minus one")]));
        assert_eq!(
            result,
            Err(ConfigError::Override {
                key: ENV_SEED,
                value: "minus one".to_string()
            })
        );
    }

    #[test]
    fn test_validation_collects_errors() {
        let mut config = LabConfig::default();
        config.log_level = "verbose".to_string();
        config.experiment.dimension = 50;

        match config.validate() {
            Err(ConfigError::Validation(errors)) => {
                assert_eq!(errors.len(), 2);
                assert!(errors[0].contains("log_level"));
                assert!(errors[1].contains("requested 50"));
            }
            other => panic!("expected validation errors, got {:?}", other),
        }
    }

    #[test]
    fn test_filter_directive_accepted_as_log_level() {
        let config = LabConfig {
            log_level: "basket_pricing=debug,info".to_string(),
            ..LabConfig::default()
        };
        assert!(config.validate().is_ok());
    }
}
