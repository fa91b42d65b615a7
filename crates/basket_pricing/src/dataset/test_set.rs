//! Test set: points around the market labelled with the closed-form price.

use basket_core::math::{dot, stats, Matrix};
use basket_core::types::{ensure_positive, SimulationError, SimulationResult};
use basket_models::analytical::bach;
use basket_models::basket::Basket;
use tracing::debug;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::mc::GaussianSource;

/// Test features with Bachelier reference labels.
///
/// Feature rows are `spot0 + c·z` with `z` standard normal and `c` chosen so
/// that the population standard deviation of the basket values equals the
/// requested target. Labels are `bach(w·x, K, basket_vol, t2 - t1)`, the
/// exact conditional price at `t1`.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct TestSet {
    x: Matrix,
    basket_values: Vec<f64>,
    labels: Vec<f64>,
}

impl TestSet {
    /// Draws `n_test` test points.
    ///
    /// # Errors
    /// - `InvalidParameter` if `n_test < 2` or `target_std` is not positive
    /// - `DegenerateMatrix` if the drawn basket values have zero spread
    pub fn generate<G: GaussianSource + ?Sized>(
        basket: &Basket,
        n_test: usize,
        target_std: f64,
        source: &mut G,
    ) -> SimulationResult<Self> {
        if n_test < 2 {
            return Err(SimulationError::invalid_parameter(
                "n_test",
                format!("need at least 2 test points, got {}", n_test),
            ));
        }
        ensure_positive("target_std", target_std)?;

        let d = basket.dim();
        let weights = basket.weights();
        let z = source.standard_normals(n_test, d);

        let raw: Vec<f64> = z.row_iter().map(|row| dot(weights, row)).collect();
        let raw_std = stats::population_std(&raw);
        if !(raw_std.is_finite() && raw_std > 0.0) {
            return Err(SimulationError::degenerate(format!(
                "test basket values have standard deviation {}",
                raw_std
            )));
        }
        let scale = target_std / raw_std;
        debug!(n_test, raw_std, scale, "rescaling test set");

        let spot0 = basket.market().spot0();
        let x = Matrix::from_fn(n_test, d, |i, j| spot0[j] + scale * z.get(i, j));
        let basket_values: Vec<f64> = x.row_iter().map(|row| dot(weights, row)).collect();

        let strike = basket.strike();
        let vol = basket.basket_vol();
        let tau = basket.t2() - basket.t1();
        let labels = basket_values
            .iter()
            .map(|&b| bach(b, strike, vol, tau))
            .collect();

        Ok(Self {
            x,
            basket_values,
            labels,
        })
    }

    /// Test features, shape `[n_test, d]`.
    #[inline]
    pub fn x(&self) -> &Matrix {
        &self.x
    }

    /// Basket values `w·x` per test point.
    #[inline]
    pub fn basket_values(&self) -> &[f64] {
        &self.basket_values
    }

    /// Closed-form price labels.
    #[inline]
    pub fn labels(&self) -> &[f64] {
        &self.labels
    }

    /// Number of test points.
    #[inline]
    pub fn len(&self) -> usize {
        self.labels.len()
    }

    /// Returns `true` if the set holds no points.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }
}
