//! Basket configuration and volatility rescaling.
//!
//! A [`Basket`] fixes the traded dimension, the weights and the two-period
//! schedule `0 < t1 < t2`. The truncated market is rescaled so that the
//! normal volatility of the weighted basket equals a chosen target:
//!
//! ```text
//! bkt_vol = sqrt(wᵀ Σ w),   z = target / bkt_vol
//! sigma  <- z · sigma,       Σ <- z² · Σ
//! ```
//!
//! The first period runs with volatilities inflated by a constant multiplier
//! (`sigma_0 = m · sigma`), the second with the rescaled volatilities.

use basket_core::math::dot;
use basket_core::types::{ensure_positive, SimulationError, SimulationResult};
use rand::Rng;
use tracing::{debug, info};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::market::Market;

/// Default first-period volatility multiplier.
pub const DEFAULT_FIRST_PERIOD_MULTIPLIER: f64 = 2.0;

/// Contract and schedule parameters for a basket.
///
/// # Examples
/// ```
/// use basket_models::basket::BasketSpec;
///
/// let spec = BasketSpec::new(5, 110.0, 1.0, 2.0, 20.0);
/// assert!(spec.validate().is_ok());
/// assert_eq!(spec.first_period_multiplier, 2.0);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct BasketSpec {
    /// Number of leading market assets in the basket.
    pub dimension: usize,
    /// Strike `K`.
    pub strike: f64,
    /// End of the first simulation period.
    pub t1: f64,
    /// Option maturity.
    pub t2: f64,
    /// Target normal volatility of the weighted basket.
    pub target_vol: f64,
    /// Multiplier applied to the volatilities over `[0, t1]`.
    pub first_period_multiplier: f64,
}

impl BasketSpec {
    /// Creates basket parameters with the default first-period multiplier.
    pub fn new(dimension: usize, strike: f64, t1: f64, t2: f64, target_vol: f64) -> Self {
        Self {
            dimension,
            strike,
            t1,
            t2,
            target_vol,
            first_period_multiplier: DEFAULT_FIRST_PERIOD_MULTIPLIER,
        }
    }

    /// Sets the first-period volatility multiplier.
    pub fn with_first_period_multiplier(mut self, multiplier: f64) -> Self {
        self.first_period_multiplier = multiplier;
        self
    }

    /// Validates the schedule and volatility parameters.
    ///
    /// `dimension` is checked against the market when the basket is
    /// configured, where both `0` and anything above the market dimension
    /// fail with `InvalidDimension`.
    ///
    /// # Errors
    /// `InvalidParameter` unless `0 < t1 < t2`, `target_vol > 0`,
    /// `first_period_multiplier > 0` and the strike is finite.
    pub fn validate(&self) -> SimulationResult<()> {
        if !self.strike.is_finite() {
            return Err(SimulationError::invalid_parameter(
                "strike",
                format!("must be finite, got {}", self.strike),
            ));
        }
        ensure_positive("t1", self.t1)?;
        ensure_positive("t2", self.t2)?;
        if self.t2 <= self.t1 {
            return Err(SimulationError::invalid_parameter(
                "t2",
                format!("must be greater than t1 ({}), got {}", self.t1, self.t2),
            ));
        }
        ensure_positive("target_vol", self.target_vol)?;
        ensure_positive("first_period_multiplier", self.first_period_multiplier)?;
        Ok(())
    }
}

/// A configured basket over a rescaled, truncated market.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Basket {
    market: Market,
    weights: Vec<f64>,
    spec: BasketSpec,
    sigma_0: Vec<f64>,
}

impl Basket {
    /// Configures a basket with random weights.
    ///
    /// Truncates `market` to `spec.dimension`, draws one `U(0, 1)` weight per
    /// asset, normalises them to sum to one and rescales the market.
    ///
    /// # Errors
    /// - `InvalidParameter` from [`BasketSpec::validate`]
    /// - `InvalidDimension` if `spec.dimension` is 0 or exceeds the market
    /// - `InvalidWeights` if the raw weights do not sum to a positive value
    ///
    /// # Examples
    /// ```
    /// use basket_models::basket::{Basket, BasketSpec};
    /// use basket_models::market::MarketGenerator;
    /// use rand::rngs::StdRng;
    /// use rand::SeedableRng;
    ///
    /// let mut rng = StdRng::seed_from_u64(42);
    /// let market = MarketGenerator::new(10, 10.0, 30.0, 100.0)
    ///     .unwrap()
    ///     .generate(&mut rng)
    ///     .unwrap();
    /// let spec = BasketSpec::new(4, 110.0, 1.0, 2.0, 20.0);
    /// let basket = Basket::configure(&market, spec, &mut rng).unwrap();
    ///
    /// assert_eq!(basket.dim(), 4);
    /// assert!((basket.weights().iter().sum::<f64>() - 1.0).abs() < 1e-12);
    /// assert!((basket.realised_basket_vol() - 20.0).abs() < 1e-6);
    /// ```
    pub fn configure<R: Rng + ?Sized>(
        market: &Market,
        spec: BasketSpec,
        rng: &mut R,
    ) -> SimulationResult<Self> {
        spec.validate()?;
        let truncated = market.truncate(spec.dimension)?;
        let raw: Vec<f64> = (0..spec.dimension).map(|_| rng.gen::<f64>()).collect();
        Self::build(truncated, spec, raw)
    }

    /// Configures a basket with caller-supplied weights.
    ///
    /// Weights must be non-negative, one per basket asset, and are normalised
    /// to sum to one.
    ///
    /// # Errors
    /// As [`Basket::configure`], plus `DimensionMismatch` if
    /// `weights.len() != spec.dimension` and `InvalidWeights` for negative
    /// entries.
    pub fn with_weights(market: &Market, spec: BasketSpec, weights: &[f64]) -> SimulationResult<Self> {
        spec.validate()?;
        let truncated = market.truncate(spec.dimension)?;
        if weights.len() != spec.dimension {
            return Err(SimulationError::DimensionMismatch {
                expected: spec.dimension,
                got: weights.len(),
            });
        }
        if weights.iter().any(|w| !(*w >= 0.0)) {
            return Err(SimulationError::InvalidWeights {
                sum: weights.iter().sum(),
            });
        }
        Self::build(truncated, spec, weights.to_vec())
    }

    fn build(market: Market, spec: BasketSpec, raw_weights: Vec<f64>) -> SimulationResult<Self> {
        let sum: f64 = raw_weights.iter().sum();
        if !(sum.is_finite() && sum > 0.0) {
            return Err(SimulationError::InvalidWeights { sum });
        }
        let weights: Vec<f64> = raw_weights.iter().map(|w| w / sum).collect();

        let variance = market.covar().quadratic_form(&weights)?;
        let bkt_vol = variance.max(0.0).sqrt();
        if !(bkt_vol.is_finite() && bkt_vol > 0.0) {
            return Err(SimulationError::degenerate(format!(
                "basket variance wᵀΣw = {} is not positive",
                variance
            )));
        }

        let z = spec.target_vol / bkt_vol;
        let market = market.rescaled(z);
        let sigma_0 = market
            .sigma()
            .iter()
            .map(|s| spec.first_period_multiplier * s)
            .collect();

        info!(
            dimension = spec.dimension,
            raw_basket_vol = bkt_vol,
            target_vol = spec.target_vol,
            scale = z,
            "basket configured"
        );
        debug!(weights = ?weights, "basket weights");

        Ok(Self {
            market,
            weights,
            spec,
            sigma_0,
        })
    }

    /// Rescaled, truncated market.
    #[inline]
    pub fn market(&self) -> &Market {
        &self.market
    }

    /// Number of assets in the basket.
    #[inline]
    pub fn dim(&self) -> usize {
        self.weights.len()
    }

    /// Normalised weights (non-negative, sum to one).
    #[inline]
    pub fn weights(&self) -> &[f64] {
        &self.weights
    }

    /// Parameters this basket was configured from.
    #[inline]
    pub fn spec(&self) -> &BasketSpec {
        &self.spec
    }

    /// Strike `K`.
    #[inline]
    pub fn strike(&self) -> f64 {
        self.spec.strike
    }

    /// End of the first period.
    #[inline]
    pub fn t1(&self) -> f64 {
        self.spec.t1
    }

    /// Maturity.
    #[inline]
    pub fn t2(&self) -> f64 {
        self.spec.t2
    }

    /// Basket normal volatility after rescaling (the target).
    #[inline]
    pub fn basket_vol(&self) -> f64 {
        self.spec.target_vol
    }

    /// `sqrt(wᵀ Σ w)` recomputed from the rescaled covariance.
    pub fn realised_basket_vol(&self) -> f64 {
        self.market
            .covar()
            .quadratic_form(&self.weights)
            .map(|v| v.max(0.0).sqrt())
            .unwrap_or(f64::NAN)
    }

    /// First-period volatilities `m · sigma`.
    #[inline]
    pub fn sigma_0(&self) -> &[f64] {
        &self.sigma_0
    }

    /// Weighted basket value `w · x`.
    ///
    /// # Panics
    /// Panics if `x.len() != dim()`.
    #[inline]
    pub fn basket_value(&self, x: &[f64]) -> f64 {
        assert_eq!(x.len(), self.dim(), "basket value: length mismatch");
        dot(&self.weights, x)
    }

    /// Per-asset standard deviations of the first increment, `sigma_0 · sqrt(t1)`.
    pub fn period_one_vols(&self) -> Vec<f64> {
        let root_dt = self.spec.t1.sqrt();
        self.sigma_0.iter().map(|s| s * root_dt).collect()
    }

    /// Per-asset standard deviations of the second increment, `sigma · sqrt(t2 - t1)`.
    pub fn period_two_vols(&self) -> Vec<f64> {
        let root_dt = (self.spec.t2 - self.spec.t1).sqrt();
        self.market.sigma().iter().map(|s| s * root_dt).collect()
    }

    /// Standard deviation of `w · S2` around `w · spot0`.
    ///
    /// `basket_vol · sqrt(m² t1 + (t2 - t1))`.
    pub fn terminal_std(&self) -> f64 {
        let m = self.spec.first_period_multiplier;
        self.basket_vol() * (m * m * self.spec.t1 + (self.spec.t2 - self.spec.t1)).sqrt()
    }
}
