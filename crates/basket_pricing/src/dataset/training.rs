//! Training set: simulated features and realised payoffs.

use basket_core::math::{dot, Matrix};
use basket_core::types::{SimulationError, SimulationResult};
use basket_models::basket::Basket;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::mc::SimulatedPaths;

/// Features `X = S1` and labels `Y = max(0, w·S2 - K)`.
///
/// Labels are undiscounted terminal payoffs; each is an unbiased sample of
/// the option value conditional on its feature row.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct TrainingSet {
    x: Matrix,
    y: Vec<f64>,
}

impl TrainingSet {
    /// Builds the training set from simulated paths.
    ///
    /// # Errors
    /// `DimensionMismatch` if the paths and basket dimensions differ.
    pub fn from_paths(paths: &SimulatedPaths, basket: &Basket) -> SimulationResult<Self> {
        if paths.dim() != basket.dim() {
            return Err(SimulationError::DimensionMismatch {
                expected: basket.dim(),
                got: paths.dim(),
            });
        }
        let weights = basket.weights();
        let strike = basket.strike();
        let y = paths
            .s2()
            .row_iter()
            .map(|row| (dot(weights, row) - strike).max(0.0))
            .collect();

        Ok(Self {
            x: paths.s1().clone(),
            y,
        })
    }

    /// Feature matrix, shape `[n, d]`.
    #[inline]
    pub fn x(&self) -> &Matrix {
        &self.x
    }

    /// Payoff labels, length `n`.
    #[inline]
    pub fn y(&self) -> &[f64] {
        &self.y
    }

    /// Number of samples.
    #[inline]
    pub fn len(&self) -> usize {
        self.y.len()
    }

    /// Returns `true` if the set holds no samples.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.y.is_empty()
    }
}
