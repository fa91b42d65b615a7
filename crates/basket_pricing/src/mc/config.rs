//! Monte Carlo simulation configuration.
//!
//! This module provides the configuration type and builder for the
//! correlated path simulation.

use basket_core::types::{SimulationError, SimulationResult};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Maximum number of simulation paths allowed.
pub const MAX_PATHS: usize = 10_000_000;

/// Monte Carlo simulation configuration.
///
/// Immutable configuration specifying simulation parameters.
/// Use [`SimulationConfigBuilder`] to construct instances.
///
/// # Examples
///
/// ```rust
/// use basket_pricing::mc::SimulationConfig;
///
/// let config = SimulationConfig::builder()
///     .n_simul(10_000)
///     .seed(42)
///     .parallel(true)
///     .build()
///     .expect("valid configuration");
///
/// assert_eq!(config.n_simul(), 10_000);
/// assert!(config.parallel());
/// ```
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct SimulationConfig {
    /// Number of simulated paths.
    n_simul: usize,
    /// Optional seed for reproducibility.
    seed: Option<u64>,
    /// Parallelise the correlation step over paths.
    parallel: bool,
}

impl SimulationConfig {
    /// Creates a new configuration builder.
    #[inline]
    pub fn builder() -> SimulationConfigBuilder {
        SimulationConfigBuilder::default()
    }

    /// Returns the number of simulated paths.
    #[inline]
    pub fn n_simul(&self) -> usize {
        self.n_simul
    }

    /// Returns the optional seed for reproducibility.
    #[inline]
    pub fn seed(&self) -> Option<u64> {
        self.seed
    }

    /// Returns whether the parallel simulator is used.
    #[inline]
    pub fn parallel(&self) -> bool {
        self.parallel
    }

    /// Validates the configuration.
    ///
    /// # Errors
    ///
    /// `InvalidParameter` if `n_simul` is 0 or greater than 10,000,000.
    pub fn validate(&self) -> SimulationResult<()> {
        if self.n_simul == 0 || self.n_simul > MAX_PATHS {
            return Err(SimulationError::invalid_parameter(
                "n_simul",
                format!("must be in [1, {}], got {}", MAX_PATHS, self.n_simul),
            ));
        }
        Ok(())
    }
}

/// Builder for [`SimulationConfig`].
///
/// # Examples
///
/// ```rust
/// use basket_pricing::mc::SimulationConfig;
///
/// let config = SimulationConfig::builder()
///     .n_simul(50_000)
///     .build()
///     .expect("valid config");
/// assert_eq!(config.seed(), None);
/// ```
#[derive(Clone, Debug, Default)]
pub struct SimulationConfigBuilder {
    n_simul: Option<usize>,
    seed: Option<u64>,
    parallel: bool,
}

impl SimulationConfigBuilder {
    /// Sets the number of simulated paths, in [1, 10_000_000].
    #[inline]
    pub fn n_simul(mut self, n_simul: usize) -> Self {
        self.n_simul = Some(n_simul);
        self
    }

    /// Sets the seed for reproducibility.
    #[inline]
    pub fn seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Enables or disables the parallel simulator.
    #[inline]
    pub fn parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    /// Builds the configuration.
    ///
    /// # Errors
    ///
    /// `InvalidParameter` if `n_simul` is not set or out of range.
    pub fn build(self) -> SimulationResult<SimulationConfig> {
        let n_simul = self
            .n_simul
            .ok_or_else(|| SimulationError::invalid_parameter("n_simul", "must be specified"))?;

        let config = SimulationConfig {
            n_simul,
            seed: self.seed,
            parallel: self.parallel,
        };

        config.validate()?;
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_builder_valid() {
        let config = SimulationConfig::builder().n_simul(10_000).build().unwrap();

        assert_eq!(config.n_simul(), 10_000);
        assert_eq!(config.seed(), None);
        assert!(!config.parallel());
    }

    #[test]
    fn test_config_builder_with_seed() {
        let config = SimulationConfig::builder()
            .n_simul(1000)
            .seed(42)
            .build()
            .unwrap();

        assert_eq!(config.seed(), Some(42));
    }

    #[test]
    fn test_config_invalid_zero_paths() {
        let result = SimulationConfig::builder().n_simul(0).build();

        assert!(matches!(
            result,
            Err(SimulationError::InvalidParameter { name: "n_simul", .. })
        ));
    }

    #[test]
    fn test_config_invalid_too_many_paths() {
        let result = SimulationConfig::builder().n_simul(MAX_PATHS + 1).build();

        assert!(result.is_err());
    }

    #[test]
    fn test_config_max_paths_accepted() {
        assert!(SimulationConfig::builder().n_simul(MAX_PATHS).build().is_ok());
    }

    #[test]
    fn test_config_missing_paths() {
        let result = SimulationConfig::builder().seed(1).build();

        assert!(matches!(
            result,
            Err(SimulationError::InvalidParameter { name: "n_simul", .. })
        ));
    }
}
