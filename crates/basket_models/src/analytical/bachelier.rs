//! Bachelier (normal) pricing model for European options and baskets.
//!
//! Under Bachelier dynamics absolute price changes are Gaussian, so a
//! weighted basket of jointly Gaussian assets is itself Gaussian and prices
//! with the single-asset formula applied to the basket value.
//!
//! ## Mathematical Formulas
//!
//! **Call Price**: C = (S - K)·N(d) + σ√T·φ(d)
//! **Put Price**: P = (K - S)·N(-d) + σ√T·φ(d)
//!
//! Where:
//! - d = (S - K) / (σ√T)
//! - N(·) is the standard normal CDF
//! - φ(·) is the standard normal PDF
//!
//! Rates are zero throughout: no discounting is applied.
//!
//! ## Degenerate Inputs
//!
//! When `σ√T` is zero (or not a positive finite number) `d` is undefined; the
//! functions return the intrinsic value directly rather than propagating
//! `NaN`. This is the `σ√T → 0⁺` limit of the formula.
//!
//! A `NaN` spot or strike has no price and is returned as `NaN` rather than
//! floored to zero.

use basket_core::math::dot;
use basket_core::types::{SimulationError, SimulationResult};

use super::distributions::{norm_cdf, norm_pdf};

/// Returns `σ√T` if it is a usable (positive, finite) standard deviation.
#[inline]
fn std_dev(vol: f64, time: f64) -> Option<f64> {
    let s = vol * time.max(0.0).sqrt();
    (s.is_finite() && s > 0.0).then_some(s)
}

/// Bachelier European call price.
///
/// Pure function of the current (basket) value, strike, normal volatility and
/// time to maturity. Non-negative unless `spot` or `strike` is `NaN`, in
/// which case the result is `NaN`.
///
/// # Examples
/// ```
/// use basket_models::analytical::bach;
///
/// let price = bach(100.0, 110.0, 20.0, 1.0);
/// assert!((price - 3.955931148).abs() < 1e-8);
///
/// // Zero volatility returns intrinsic value
/// assert_eq!(bach(120.0, 110.0, 0.0, 1.0), 10.0);
/// ```
#[inline]
pub fn bach(spot: f64, strike: f64, vol: f64, time: f64) -> f64 {
    if spot.is_nan() || strike.is_nan() {
        return f64::NAN;
    }
    let moneyness = spot - strike;
    match std_dev(vol, time) {
        Some(s) => {
            let d = moneyness / s;
            (moneyness * norm_cdf(d) + s * norm_pdf(d)).max(0.0)
        }
        None => moneyness.max(0.0),
    }
}

/// Bachelier European put price.
///
/// # Examples
/// ```
/// use basket_models::analytical::{bach, bach_put};
///
/// // Put-call parity: C - P = S - K
/// let parity = bach(100.0, 95.0, 15.0, 2.0) - bach_put(100.0, 95.0, 15.0, 2.0);
/// assert!((parity - 5.0).abs() < 1e-10);
/// ```
#[inline]
pub fn bach_put(spot: f64, strike: f64, vol: f64, time: f64) -> f64 {
    if spot.is_nan() || strike.is_nan() {
        return f64::NAN;
    }
    let moneyness = strike - spot;
    match std_dev(vol, time) {
        Some(s) => {
            let d = (spot - strike) / s;
            (moneyness * norm_cdf(-d) + s * norm_pdf(d)).max(0.0)
        }
        None => moneyness.max(0.0),
    }
}

/// Bachelier call on a weighted basket: `bach(weights · spots, ...)`.
///
/// `vol` is the normal volatility of the basket value itself, i.e.
/// `sqrt(wᵀ Σ w)`.
///
/// # Errors
/// `DimensionMismatch` if `spots` and `weights` differ in length.
///
/// # Examples
/// ```
/// use basket_models::analytical::{bach, bach_bkt};
///
/// let spots = [100.0, 120.0];
/// let weights = [0.5, 0.5];
/// let price = bach_bkt(&spots, &weights, 105.0, 20.0, 1.0).unwrap();
/// assert_eq!(price, bach(110.0, 105.0, 20.0, 1.0));
/// ```
pub fn bach_bkt(
    spots: &[f64],
    weights: &[f64],
    strike: f64,
    vol: f64,
    time: f64,
) -> SimulationResult<f64> {
    if spots.len() != weights.len() {
        return Err(SimulationError::DimensionMismatch {
            expected: weights.len(),
            got: spots.len(),
        });
    }
    Ok(bach(dot(weights, spots), strike, vol, time))
}

/// Bachelier (normal) model for European option pricing.
///
/// Model-object form of [`bach`] / [`bach_put`] holding the current value
/// and a validated volatility.
///
/// # Examples
/// ```
/// use basket_models::analytical::Bachelier;
///
/// let model = Bachelier::new(100.0, 20.0).unwrap();
/// let call = model.price_call(100.0, 1.0);
/// let put = model.price_put(100.0, 1.0);
///
/// // ATM call equals ATM put
/// assert!((call - put).abs() < 1e-10);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bachelier {
    /// Current value of the underlying (or basket) - can be negative
    forward: f64,
    /// Normal volatility (σ) - must be positive
    volatility: f64,
}

impl Bachelier {
    /// Creates a new Bachelier model.
    ///
    /// # Errors
    /// `InvalidParameter` if `volatility` is not finite and positive.
    pub fn new(forward: f64, volatility: f64) -> SimulationResult<Self> {
        if !(volatility.is_finite() && volatility > 0.0) {
            return Err(SimulationError::invalid_parameter(
                "volatility",
                format!("must be finite and positive, got {}", volatility),
            ));
        }
        Ok(Self { forward, volatility })
    }

    /// Returns the current value.
    #[inline]
    pub fn forward(&self) -> f64 {
        self.forward
    }

    /// Returns the volatility.
    #[inline]
    pub fn volatility(&self) -> f64 {
        self.volatility
    }

    /// European call price for `strike` and time to maturity `expiry`.
    #[inline]
    pub fn price_call(&self, strike: f64, expiry: f64) -> f64 {
        bach(self.forward, strike, self.volatility, expiry)
    }

    /// European put price for `strike` and time to maturity `expiry`.
    #[inline]
    pub fn price_put(&self, strike: f64, expiry: f64) -> f64 {
        bach_put(self.forward, strike, self.volatility, expiry)
    }
}
