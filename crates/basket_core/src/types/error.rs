//! Error types for structured error handling.
//!
//! This module provides:
//! - `SimulationError`: Errors from market generation, basket configuration,
//!   matrix factorisation and path simulation
//! - `SimulationResult`: Result alias used across the workspace

use thiserror::Error;

/// Categorised errors for the basket experiment engine.
///
/// Every variant is fatal for the operation that raised it; no partial
/// results are returned. The only recoverable case is
/// [`SimulationError::NotPositiveDefinite`], where the caller may
/// regenerate the market and try again (see [`SimulationError::is_retryable`]).
///
/// Numeric degeneracy in the Bachelier pricer (`vol * sqrt(time) == 0`) is
/// not represented here: the pricer returns intrinsic value instead.
///
/// # Examples
/// ```
/// use basket_core::types::SimulationError;
///
/// let err = SimulationError::InvalidDimension { requested: 12, available: 10 };
/// assert_eq!(
///     format!("{}", err),
///     "Invalid dimension: requested 12, available 10"
/// );
/// ```
#[derive(Error, Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub enum SimulationError {
    /// A variance used for normalisation is zero, negative or not finite.
    #[error("Degenerate matrix: {reason}")]
    DegenerateMatrix {
        /// Description of the degenerate quantity
        reason: String,
    },

    /// Cholesky factorisation met a non-positive pivot.
    #[error("Matrix is not positive definite: pivot {pivot} at index {index}")]
    NotPositiveDefinite {
        /// Row/column at which the factorisation failed
        index: usize,
        /// The offending pivot value
        pivot: f64,
    },

    /// Basket weights do not sum to a positive, finite value.
    #[error("Invalid basket weights: raw sum = {sum}")]
    InvalidWeights {
        /// Raw sum of the weights before normalisation
        sum: f64,
    },

    /// Requested sub-dimension is zero or exceeds the market dimension.
    #[error("Invalid dimension: requested {requested}, available {available}")]
    InvalidDimension {
        /// Requested dimension
        requested: usize,
        /// Dimension available in the market
        available: usize,
    },

    /// A scalar configuration parameter is out of its valid range.
    #[error("Invalid parameter '{name}': {reason}")]
    InvalidParameter {
        /// Parameter name
        name: &'static str,
        /// Description of the invalid value
        reason: String,
    },

    /// Shapes of two operands do not agree.
    #[error("Dimension mismatch: expected {expected}, got {got}")]
    DimensionMismatch {
        /// Expected length or dimension
        expected: usize,
        /// Actual length or dimension
        got: usize,
    },
}

impl SimulationError {
    /// Creates an `InvalidParameter` error.
    pub fn invalid_parameter(name: &'static str, reason: impl Into<String>) -> Self {
        Self::InvalidParameter {
            name,
            reason: reason.into(),
        }
    }

    /// Creates a `DegenerateMatrix` error.
    pub fn degenerate(reason: impl Into<String>) -> Self {
        Self::DegenerateMatrix {
            reason: reason.into(),
        }
    }

    /// Returns `true` if regenerating the market may resolve the error.
    ///
    /// # Examples
    /// ```
    /// use basket_core::types::SimulationError;
    ///
    /// let err = SimulationError::NotPositiveDefinite { index: 3, pivot: -1e-17 };
    /// assert!(err.is_retryable());
    /// assert!(!SimulationError::InvalidWeights { sum: 0.0 }.is_retryable());
    /// ```
    pub fn is_retryable(&self) -> bool {
        matches!(self, Self::NotPositiveDefinite { .. })
    }
}

/// Result alias for fallible engine operations.
pub type SimulationResult<T> = Result<T, SimulationError>;

/// Ensures `value` is finite and strictly positive.
///
/// # Errors
/// Returns `InvalidParameter` naming `name` otherwise.
pub fn ensure_positive(name: &'static str, value: f64) -> SimulationResult<f64> {
    if value.is_finite() && value > 0.0 {
        Ok(value)
    } else {
        Err(SimulationError::invalid_parameter(
            name,
            format!("must be finite and positive, got {}", value),
        ))
    }
}
