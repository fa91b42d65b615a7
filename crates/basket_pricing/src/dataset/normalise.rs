//! Feature and label normalisation.
//!
//! Statistics are scalars: one mean and one standard deviation over every
//! entry of the feature matrix, and one pair over the labels. Population
//! (`ddof = 0`) deviations are used.

use basket_core::math::{stats, Matrix};
use basket_core::types::{SimulationError, SimulationResult};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Fitted normalisation statistics.
///
/// # Examples
///
/// ```rust
/// use basket_core::math::Matrix;
/// use basket_pricing::dataset::Normaliser;
///
/// let x = Matrix::from_vec(2, 2, vec![1.0, 3.0, 5.0, 7.0]).unwrap();
/// let y = [0.0, 2.0];
/// let norm = Normaliser::fit(&x, &y).unwrap();
///
/// assert_eq!(norm.x_mean(), 4.0);
/// let scaled = norm.normalise_labels(&y);
/// assert_eq!(norm.denormalise_labels(&scaled), y.to_vec());
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Normaliser {
    x_mean: f64,
    x_std: f64,
    y_mean: f64,
    y_std: f64,
}

impl Normaliser {
    /// Fits scalar statistics to features and labels.
    ///
    /// # Errors
    /// - `InvalidParameter` if either input is empty
    /// - `DegenerateMatrix` if either standard deviation is zero
    pub fn fit(x: &Matrix, y: &[f64]) -> SimulationResult<Self> {
        if x.as_slice().is_empty() || y.is_empty() {
            return Err(SimulationError::invalid_parameter(
                "x",
                "cannot normalise an empty data set",
            ));
        }
        let x_mean = stats::mean(x.as_slice());
        let x_std = stats::population_std(x.as_slice());
        let y_mean = stats::mean(y);
        let y_std = stats::population_std(y);

        for (name, std) in [("features", x_std), ("labels", y_std)] {
            if !(std.is_finite() && std > 0.0) {
                return Err(SimulationError::degenerate(format!(
                    "{} have standard deviation {}",
                    name, std
                )));
            }
        }

        Ok(Self {
            x_mean,
            x_std,
            y_mean,
            y_std,
        })
    }

    /// Mean over all feature entries.
    #[inline]
    pub fn x_mean(&self) -> f64 {
        self.x_mean
    }

    /// Standard deviation over all feature entries.
    #[inline]
    pub fn x_std(&self) -> f64 {
        self.x_std
    }

    /// Label mean.
    #[inline]
    pub fn y_mean(&self) -> f64 {
        self.y_mean
    }

    /// Label standard deviation.
    #[inline]
    pub fn y_std(&self) -> f64 {
        self.y_std
    }

    /// `(x - x_mean) / x_std` entrywise.
    pub fn normalise_features(&self, x: &Matrix) -> Matrix {
        Matrix::from_fn(x.rows(), x.cols(), |i, j| {
            (x.get(i, j) - self.x_mean) / self.x_std
        })
    }

    /// `(y - y_mean) / y_std`.
    pub fn normalise_labels(&self, y: &[f64]) -> Vec<f64> {
        y.iter().map(|v| (v - self.y_mean) / self.y_std).collect()
    }

    /// Inverse of [`normalise_labels`](Self::normalise_labels).
    pub fn denormalise_labels(&self, y: &[f64]) -> Vec<f64> {
        y.iter().map(|v| v * self.y_std + self.y_mean).collect()
    }
}
