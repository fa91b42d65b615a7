//! Random correlation matrices.
//!
//! A random Gram matrix `M = RᵀR` built from a tall `(2N, N)` uniform matrix
//! `R` is symmetric positive semi-definite (almost surely definite), and
//! dividing by the square roots of its diagonal yields a valid correlation
//! matrix.

use basket_core::math::Matrix;
use basket_core::types::{SimulationError, SimulationResult};
use rand::Rng;

/// Rows drawn per asset when building the random factor matrix.
pub const FACTOR_ROWS_PER_ASSET: usize = 2;

/// Converts a covariance-like matrix into a correlation matrix.
///
/// `correl[i][j] = m[i][j] / sqrt(m[i][i] * m[j][j])` with the diagonal set to
/// exactly `1.0`.
///
/// # Errors
/// - `DegenerateMatrix` if `m` is not square or any diagonal entry is not
///   finite and positive.
///
/// # Examples
/// ```
/// use basket_core::math::Matrix;
/// use basket_models::market::normalise_correlation;
///
/// let m = Matrix::from_vec(2, 2, vec![4.0, 1.0, 1.0, 1.0]).unwrap();
/// let c = normalise_correlation(&m).unwrap();
/// assert_eq!(c.get(0, 0), 1.0);
/// assert!((c.get(0, 1) - 0.5).abs() < 1e-15);
/// ```
pub fn normalise_correlation(m: &Matrix) -> SimulationResult<Matrix> {
    if !m.is_square() {
        let (rows, cols) = m.shape();
        return Err(SimulationError::degenerate(format!(
            "correlation source must be square, got {}x{}",
            rows, cols
        )));
    }

    let diag = m.diagonal();
    if let Some((i, v)) = diag
        .iter()
        .enumerate()
        .find(|(_, v)| !(v.is_finite() && **v > 0.0))
    {
        return Err(SimulationError::degenerate(format!(
            "diagonal entry {} is {}, expected positive",
            i, v
        )));
    }

    let inv_sqrt: Vec<f64> = diag.iter().map(|v| 1.0 / v.sqrt()).collect();
    let mut correl = m.diag_scaled(&inv_sqrt, &inv_sqrt)?;
    for i in 0..correl.rows() {
        correl.set(i, i, 1.0);
    }
    // Exact symmetry; the scaled products may differ in the last ulp.
    for i in 0..correl.rows() {
        for j in (i + 1)..correl.cols() {
            let v = correl.get(i, j);
            correl.set(j, i, v);
        }
    }
    Ok(correl)
}

/// Draws a random `n x n` correlation matrix.
///
/// Builds `R` of shape `(2n, n)` with entries `U(-1, 1)`, forms `M = RᵀR` and
/// normalises it with [`normalise_correlation`].
pub fn random_correlation<R: Rng + ?Sized>(n: usize, rng: &mut R) -> SimulationResult<Matrix> {
    let factors = Matrix::from_fn(FACTOR_ROWS_PER_ASSET * n, n, |_, _| rng.gen_range(-1.0..1.0));
    normalise_correlation(&factors.gram())
}
