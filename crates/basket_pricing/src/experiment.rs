//! End-to-end experiment: market, basket, simulation and data sets.
//!
//! Stages run in a fixed order, each drawing from its own RNG stream:
//!
//! ```text
//! Market ──> Basket ──> Simulation ──> TrainingSet
//!                  └──> TestSet
//! ```
//!
//! If the truncated correlation fails to factorise, the market and basket
//! are redrawn (continuing the same streams) up to `max_market_attempts`
//! times.

use basket_core::math::{dot, stats};
use basket_core::types::{ensure_positive, SimulationError, SimulationResult};
use basket_models::analytical::bach;
use basket_models::basket::{Basket, BasketSpec, DEFAULT_FIRST_PERIOD_MULTIPLIER};
use basket_models::market::{Market, MarketGenerator};
use tracing::{info, warn};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::dataset::{TestSet, TrainingSet};
use crate::mc::{CorrelatedPathSimulator, SimulatedPaths, SimulationConfig};
use crate::rng::{RngStreams, Stream};

/// Parameters of a full experiment run.
///
/// # Examples
///
/// ```rust
/// use basket_pricing::experiment::ExperimentConfig;
///
/// let config = ExperimentConfig {
///     n_simul: 2048,
///     ..ExperimentConfig::default()
/// };
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize), serde(default))]
pub struct ExperimentConfig {
    /// Master seed for all RNG streams.
    pub seed: u64,
    /// Number of assets in the generated market.
    pub n_assets: usize,
    /// Lower bound of generated volatilities.
    pub vol_low: f64,
    /// Upper bound of generated volatilities.
    pub vol_high: f64,
    /// Common initial spot level.
    pub spot: f64,
    /// Number of leading assets in the basket.
    pub dimension: usize,
    /// Basket option strike.
    pub strike: f64,
    /// End of the first period.
    pub t1: f64,
    /// Option maturity.
    pub t2: f64,
    /// Target normal volatility of the basket.
    pub target_basket_vol: f64,
    /// Volatility multiplier over the first period.
    pub first_period_multiplier: f64,
    /// Number of simulated training paths.
    pub n_simul: usize,
    /// Number of test points.
    pub n_test: usize,
    /// Target standard deviation of test basket values.
    pub target_test_std: f64,
    /// Maximum number of market draws before giving up.
    pub max_market_attempts: usize,
    /// Parallelise the correlation step.
    pub parallel: bool,
}

impl Default for ExperimentConfig {
    fn default() -> Self {
        Self {
            seed: 42,
            n_assets: 10,
            vol_low: 10.0,
            vol_high: 30.0,
            spot: 100.0,
            dimension: 5,
            strike: 110.0,
            t1: 1.0,
            t2: 2.0,
            target_basket_vol: 20.0,
            first_period_multiplier: DEFAULT_FIRST_PERIOD_MULTIPLIER,
            n_simul: 8192,
            n_test: 256,
            target_test_std: 30.0,
            max_market_attempts: 5,
            parallel: false,
        }
    }
}

impl ExperimentConfig {
    /// Validates every stage's parameters.
    ///
    /// # Errors
    /// - `InvalidParameter` for any out-of-range value
    /// - `InvalidDimension` if `dimension` is 0 or exceeds `n_assets`
    pub fn validate(&self) -> SimulationResult<()> {
        self.market_generator()?;
        if self.dimension == 0 || self.dimension > self.n_assets {
            return Err(SimulationError::InvalidDimension {
                requested: self.dimension,
                available: self.n_assets,
            });
        }
        self.basket_spec().validate()?;
        self.simulation_config()?;
        if self.n_test < 2 {
            return Err(SimulationError::invalid_parameter(
                "n_test",
                format!("must be at least 2, got {}", self.n_test),
            ));
        }
        ensure_positive("target_test_std", self.target_test_std)?;
        if self.max_market_attempts == 0 {
            return Err(SimulationError::invalid_parameter(
                "max_market_attempts",
                "must be at least 1",
            ));
        }
        Ok(())
    }

    /// Market generator for these parameters.
    pub fn market_generator(&self) -> SimulationResult<MarketGenerator> {
        MarketGenerator::new(self.n_assets, self.vol_low, self.vol_high, self.spot)
    }

    /// Basket parameters for this run.
    pub fn basket_spec(&self) -> BasketSpec {
        BasketSpec::new(
            self.dimension,
            self.strike,
            self.t1,
            self.t2,
            self.target_basket_vol,
        )
        .with_first_period_multiplier(self.first_period_multiplier)
    }

    /// Simulation config for these parameters.
    ///
    /// Carries no seed: paths draw from the [`Stream::Simulation`] stream.
    pub fn simulation_config(&self) -> SimulationResult<SimulationConfig> {
        SimulationConfig::builder()
            .n_simul(self.n_simul)
            .parallel(self.parallel)
            .build()
    }
}

/// Monte-Carlo mean payoff against the closed-form price at `t0`.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct PriceCheck {
    /// Mean of the training labels.
    pub mc_price: f64,
    /// Standard error of the mean.
    pub std_error: f64,
    /// `bach(w·spot0, K, terminal_std, 1)`.
    pub analytic_price: f64,
}

impl PriceCheck {
    /// Compares payoff samples against the closed form for `basket`.
    pub fn new(payoffs: &[f64], basket: &Basket) -> Self {
        let spot = dot(basket.weights(), basket.market().spot0());
        Self {
            mc_price: stats::mean(payoffs),
            std_error: stats::standard_error(payoffs),
            analytic_price: bach(spot, basket.strike(), basket.terminal_std(), 1.0),
        }
    }

    /// `mc_price - analytic_price`.
    #[inline]
    pub fn error(&self) -> f64 {
        self.mc_price - self.analytic_price
    }

    /// Error in units of the standard error.
    #[inline]
    pub fn z_score(&self) -> f64 {
        self.error() / self.std_error
    }
}

/// Everything an experiment run produces.
#[derive(Debug, Clone)]
pub struct ExperimentOutput {
    /// Full generated market (before truncation and rescaling).
    pub market: Market,
    /// Configured basket over the rescaled, truncated market.
    pub basket: Basket,
    /// Simulated `S1`, `S2`.
    pub paths: SimulatedPaths,
    /// Features and payoff labels.
    pub training: TrainingSet,
    /// Test features with closed-form labels.
    pub test: TestSet,
    /// Monte-Carlo sanity check at `t0`.
    pub price_check: PriceCheck,
    /// Number of market draws used.
    pub market_attempts: usize,
}

/// A validated experiment, ready to run.
#[derive(Debug, Clone)]
pub struct Experiment {
    config: ExperimentConfig,
}

impl Experiment {
    /// Validates `config`.
    pub fn new(config: ExperimentConfig) -> SimulationResult<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    /// Returns the configuration.
    #[inline]
    pub fn config(&self) -> &ExperimentConfig {
        &self.config
    }

    /// Runs every stage.
    ///
    /// # Errors
    /// Any stage error; `NotPositiveDefinite` only once `max_market_attempts`
    /// markets have failed to factorise.
    pub fn run(&self) -> SimulationResult<ExperimentOutput> {
        let cfg = &self.config;
        let mut streams = RngStreams::from_master_seed(cfg.seed);
        let generator = cfg.market_generator()?;
        let spec = cfg.basket_spec();
        let sim_config = cfg.simulation_config()?;

        info!(seed = cfg.seed, n_assets = cfg.n_assets, dimension = cfg.dimension, "starting experiment");

        let mut attempt = 0;
        let (market, basket, simulator) = loop {
            attempt += 1;
            let market = generator.generate(streams.stream(Stream::Market))?;
            let basket = Basket::configure(&market, spec, streams.stream(Stream::Basket))?;
            match CorrelatedPathSimulator::new(
                basket.market().correl(),
                basket.period_one_vols(),
                basket.period_two_vols(),
                basket.market().spot0().to_vec(),
            ) {
                Ok(simulator) => break (market, basket, simulator),
                Err(e) if e.is_retryable() && attempt < cfg.max_market_attempts => {
                    warn!(attempt, error = %e, "correlation not factorisable, regenerating market");
                }
                Err(e) => return Err(e),
            }
        };

        info!(n_simul = sim_config.n_simul(), parallel = sim_config.parallel(), "simulating paths");
        let paths = simulator.simulate_with(&sim_config, streams.stream(Stream::Simulation))?;
        let training = TrainingSet::from_paths(&paths, &basket)?;

        info!(n_test = cfg.n_test, target_std = cfg.target_test_std, "building test set");
        let test = TestSet::generate(
            &basket,
            cfg.n_test,
            cfg.target_test_std,
            streams.stream(Stream::TestSet),
        )?;

        let price_check = PriceCheck::new(training.y(), &basket);
        info!(
            mc_price = price_check.mc_price,
            analytic_price = price_check.analytic_price,
            z_score = price_check.z_score(),
            "experiment complete"
        );

        Ok(ExperimentOutput {
            market,
            basket,
            paths,
            training,
            test,
            price_check,
            market_attempts: attempt,
        })
    }
}
