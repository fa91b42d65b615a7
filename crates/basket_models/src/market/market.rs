//! Immutable market snapshot: spots, normal volatilities and correlation.

use basket_core::math::Matrix;
use basket_core::types::{SimulationError, SimulationResult};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Tolerance on the unit diagonal and symmetry of a supplied correlation.
pub const CORRELATION_TOLERANCE: f64 = 1e-9;

/// Market parameters for `dim` assets.
///
/// `covar` is always derived as `diag(sigma) · correl · diag(sigma)`, so it is
/// symmetric positive semi-definite whenever `correl` is.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Market {
    spot0: Vec<f64>,
    sigma: Vec<f64>,
    correl: Matrix,
    covar: Matrix,
}

impl Market {
    /// Builds a market from explicit spots, volatilities and correlation.
    ///
    /// # Errors
    /// - `InvalidParameter` if the market is empty
    /// - `DimensionMismatch` if lengths disagree with the correlation shape
    /// - `InvalidParameter` if any volatility is negative or non-finite
    /// - `DegenerateMatrix` if `correl` is not symmetric with unit diagonal
    ///
    /// # Examples
    /// ```
    /// use basket_core::math::Matrix;
    /// use basket_models::market::Market;
    ///
    /// let correl = Matrix::from_vec(2, 2, vec![1.0, 0.5, 0.5, 1.0]).unwrap();
    /// let market = Market::from_parts(vec![100.0, 100.0], vec![10.0, 20.0], correl).unwrap();
    /// assert_eq!(market.covar().get(0, 1), 100.0);
    /// ```
    pub fn from_parts(spot0: Vec<f64>, sigma: Vec<f64>, correl: Matrix) -> SimulationResult<Self> {
        let dim = spot0.len();
        if dim == 0 {
            return Err(SimulationError::invalid_parameter(
                "spot0",
                "market must contain at least one asset",
            ));
        }
        if sigma.len() != dim {
            return Err(SimulationError::DimensionMismatch {
                expected: dim,
                got: sigma.len(),
            });
        }
        if correl.shape() != (dim, dim) {
            return Err(SimulationError::DimensionMismatch {
                expected: dim,
                got: correl.rows(),
            });
        }
        if let Some(v) = sigma.iter().find(|v| !(v.is_finite() && **v >= 0.0)) {
            return Err(SimulationError::invalid_parameter(
                "sigma",
                format!("volatilities must be finite and non-negative, got {}", v),
            ));
        }
        if correl
            .diagonal()
            .iter()
            .any(|v| (v - 1.0).abs() > CORRELATION_TOLERANCE)
        {
            return Err(SimulationError::degenerate("correlation diagonal is not 1"));
        }
        if !correl.is_symmetric(CORRELATION_TOLERANCE) {
            return Err(SimulationError::degenerate("correlation is not symmetric"));
        }

        let covar = correl.diag_scaled(&sigma, &sigma)?;
        Ok(Self {
            spot0,
            sigma,
            correl,
            covar,
        })
    }

    /// Number of assets.
    #[inline]
    pub fn dim(&self) -> usize {
        self.spot0.len()
    }

    /// Initial spot levels.
    #[inline]
    pub fn spot0(&self) -> &[f64] {
        &self.spot0
    }

    /// Per-asset normal volatilities.
    #[inline]
    pub fn sigma(&self) -> &[f64] {
        &self.sigma
    }

    /// Correlation matrix.
    #[inline]
    pub fn correl(&self) -> &Matrix {
        &self.correl
    }

    /// Covariance matrix `diag(sigma) · correl · diag(sigma)`.
    #[inline]
    pub fn covar(&self) -> &Matrix {
        &self.covar
    }

    /// Restricts the market to its first `d` assets.
    ///
    /// Truncating to the current dimension returns an equal market, so the
    /// operation is idempotent.
    ///
    /// # Errors
    /// `InvalidDimension` if `d == 0` or `d > dim()`.
    pub fn truncate(&self, d: usize) -> SimulationResult<Self> {
        if d == 0 || d > self.dim() {
            return Err(SimulationError::InvalidDimension {
                requested: d,
                available: self.dim(),
            });
        }
        Ok(Self {
            spot0: self.spot0[..d].to_vec(),
            sigma: self.sigma[..d].to_vec(),
            correl: self.correl.leading_block(d)?,
            covar: self.covar.leading_block(d)?,
        })
    }

    /// Returns a copy with volatilities multiplied by `z` and covariance by `z²`.
    pub(crate) fn rescaled(&self, z: f64) -> Self {
        Self {
            spot0: self.spot0.clone(),
            sigma: self.sigma.iter().map(|s| s * z).collect(),
            correl: self.correl.clone(),
            covar: self.covar.scaled(z * z),
        }
    }
}
