//! Dense real matrices and Cholesky factorisation.
//!
//! Matrices are stored in row-major order: element `(i, j)` lives at
//! `data[i * cols + j]`. Sample matrices are laid out `[n_simul, d]`, one
//! simulation per row; correlation and covariance matrices are `[d, d]`.
//!
//! ## Mathematical Background
//!
//! Given a symmetric positive definite matrix `C`, the Cholesky factor is the
//! lower triangular `L` with positive diagonal such that:
//!
//! ```text
//! C = L * L^T
//! ```
//!
//! If `Z` is a vector of independent standard normals, `W = L * Z` has
//! covariance `C`.
//!
//! ## Usage
//!
//! ```
//! use basket_core::math::linalg::Matrix;
//!
//! let corr = Matrix::from_vec(2, 2, vec![
//!     1.0, 0.5,
//!     0.5, 1.0,
//! ]).unwrap();
//!
//! let chol = corr.cholesky().unwrap();
//! let w = chol.transform(&[0.5, 0.8]);
//! assert_eq!(w.len(), 2);
//! ```

use crate::types::{SimulationError, SimulationResult};

/// Dense row-major matrix of `f64`.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Matrix {
    /// Elements in row-major order
    data: Vec<f64>,
    /// Number of rows
    rows: usize,
    /// Number of columns
    cols: usize,
}

impl Matrix {
    /// Creates a `rows x cols` matrix of zeros.
    pub fn zeros(rows: usize, cols: usize) -> Self {
        Self {
            data: vec![0.0; rows * cols],
            rows,
            cols,
        }
    }

    /// Creates the `n x n` identity matrix.
    pub fn identity(n: usize) -> Self {
        Self::from_diagonal(&vec![1.0; n])
    }

    /// Creates a square matrix with `diag` on the diagonal.
    pub fn from_diagonal(diag: &[f64]) -> Self {
        let n = diag.len();
        let mut m = Self::zeros(n, n);
        for (i, &v) in diag.iter().enumerate() {
            m.data[i * n + i] = v;
        }
        m
    }

    /// Creates a matrix from row-major data.
    ///
    /// # Errors
    ///
    /// `DimensionMismatch` if `data.len() != rows * cols`.
    pub fn from_vec(rows: usize, cols: usize, data: Vec<f64>) -> SimulationResult<Self> {
        if data.len() != rows * cols {
            return Err(SimulationError::DimensionMismatch {
                expected: rows * cols,
                got: data.len(),
            });
        }
        Ok(Self { data, rows, cols })
    }

    /// Creates a matrix by evaluating `f(i, j)` for every element.
    pub fn from_fn(rows: usize, cols: usize, mut f: impl FnMut(usize, usize) -> f64) -> Self {
        let mut data = Vec::with_capacity(rows * cols);
        for i in 0..rows {
            for j in 0..cols {
                data.push(f(i, j));
            }
        }
        Self { data, rows, cols }
    }

    /// Number of rows.
    #[inline]
    pub fn rows(&self) -> usize {
        self.rows
    }

    /// Number of columns.
    #[inline]
    pub fn cols(&self) -> usize {
        self.cols
    }

    /// Returns `(rows, cols)`.
    #[inline]
    pub fn shape(&self) -> (usize, usize) {
        (self.rows, self.cols)
    }

    /// Returns `true` if the matrix is square.
    #[inline]
    pub fn is_square(&self) -> bool {
        self.rows == self.cols
    }

    /// Element at `(i, j)`.
    ///
    /// # Panics
    ///
    /// Panics if `(i, j)` is out of bounds.
    #[inline]
    pub fn get(&self, i: usize, j: usize) -> f64 {
        assert!(i < self.rows && j < self.cols, "index ({}, {}) out of bounds", i, j);
        self.data[i * self.cols + j]
    }

    /// Sets the element at `(i, j)`.
    ///
    /// # Panics
    ///
    /// Panics if `(i, j)` is out of bounds.
    #[inline]
    pub fn set(&mut self, i: usize, j: usize, value: f64) {
        assert!(i < self.rows && j < self.cols, "index ({}, {}) out of bounds", i, j);
        self.data[i * self.cols + j] = value;
    }

    /// Row `i` as a slice.
    #[inline]
    pub fn row(&self, i: usize) -> &[f64] {
        &self.data[i * self.cols..(i + 1) * self.cols]
    }

    /// Row `i` as a mutable slice.
    #[inline]
    pub fn row_mut(&mut self, i: usize) -> &mut [f64] {
        &mut self.data[i * self.cols..(i + 1) * self.cols]
    }

    /// Iterator over rows.
    pub fn row_iter(&self) -> impl Iterator<Item = &[f64]> + '_ {
        (0..self.rows).map(move |i| self.row(i))
    }

    /// Column `j` copied into a vector.
    pub fn column(&self, j: usize) -> Vec<f64> {
        (0..self.rows).map(|i| self.get(i, j)).collect()
    }

    /// Underlying row-major data.
    #[inline]
    pub fn as_slice(&self) -> &[f64] {
        &self.data
    }

    /// Underlying row-major data, mutable.
    #[inline]
    pub fn as_mut_slice(&mut self) -> &mut [f64] {
        &mut self.data
    }

    /// Diagonal elements of a square (or the leading square part of a) matrix.
    pub fn diagonal(&self) -> Vec<f64> {
        (0..self.rows.min(self.cols)).map(|i| self.get(i, i)).collect()
    }

    /// Transposed copy.
    pub fn transpose(&self) -> Self {
        Self::from_fn(self.cols, self.rows, |i, j| self.get(j, i))
    }

    /// Matrix product `self * other`.
    ///
    /// # Errors
    ///
    /// `DimensionMismatch` if `self.cols() != other.rows()`.
    pub fn matmul(&self, other: &Matrix) -> SimulationResult<Matrix> {
        if self.cols != other.rows {
            return Err(SimulationError::DimensionMismatch {
                expected: self.cols,
                got: other.rows,
            });
        }
        let mut out = Matrix::zeros(self.rows, other.cols);
        for i in 0..self.rows {
            for k in 0..self.cols {
                let a_ik = self.data[i * self.cols + k];
                if a_ik == 0.0 {
                    continue;
                }
                let other_row = other.row(k);
                let out_row = out.row_mut(i);
                for (o, &b) in out_row.iter_mut().zip(other_row) {
                    *o += a_ik * b;
                }
            }
        }
        Ok(out)
    }

    /// Gram matrix `self^T * self`.
    pub fn gram(&self) -> Matrix {
        let n = self.cols;
        let mut out = Matrix::zeros(n, n);
        for row in self.row_iter() {
            for i in 0..n {
                let r_i = row[i];
                for j in i..n {
                    out.data[i * n + j] += r_i * row[j];
                }
            }
        }
        // mirror the upper triangle so the result is exactly symmetric
        for i in 0..n {
            for j in 0..i {
                out.data[i * n + j] = out.data[j * n + i];
            }
        }
        out
    }

    /// Matrix-vector product `self * x`.
    ///
    /// # Errors
    ///
    /// `DimensionMismatch` if `x.len() != self.cols()`.
    pub fn mat_vec(&self, x: &[f64]) -> SimulationResult<Vec<f64>> {
        if x.len() != self.cols {
            return Err(SimulationError::DimensionMismatch {
                expected: self.cols,
                got: x.len(),
            });
        }
        Ok(self.row_iter().map(|row| dot(row, x)).collect())
    }

    /// Quadratic form `x^T * self * x`.
    ///
    /// # Errors
    ///
    /// `DimensionMismatch` if the matrix is not square or `x` has the wrong length.
    pub fn quadratic_form(&self, x: &[f64]) -> SimulationResult<f64> {
        if !self.is_square() {
            return Err(SimulationError::DimensionMismatch {
                expected: self.rows,
                got: self.cols,
            });
        }
        let ax = self.mat_vec(x)?;
        Ok(dot(x, &ax))
    }

    /// Copy with every element multiplied by `factor`.
    pub fn scaled(&self, factor: f64) -> Matrix {
        Matrix {
            data: self.data.iter().map(|v| v * factor).collect(),
            rows: self.rows,
            cols: self.cols,
        }
    }

    /// `diag(left) * self * diag(right)`.
    ///
    /// # Errors
    ///
    /// `DimensionMismatch` if `left.len() != rows` or `right.len() != cols`.
    pub fn diag_scaled(&self, left: &[f64], right: &[f64]) -> SimulationResult<Matrix> {
        if left.len() != self.rows {
            return Err(SimulationError::DimensionMismatch {
                expected: self.rows,
                got: left.len(),
            });
        }
        if right.len() != self.cols {
            return Err(SimulationError::DimensionMismatch {
                expected: self.cols,
                got: right.len(),
            });
        }
        Ok(Matrix::from_fn(self.rows, self.cols, |i, j| {
            left[i] * self.get(i, j) * right[j]
        }))
    }

    /// Leading `n x n` block (rows and columns `0..n`).
    ///
    /// # Errors
    ///
    /// `DimensionMismatch` if `n` exceeds either dimension.
    pub fn leading_block(&self, n: usize) -> SimulationResult<Matrix> {
        if n > self.rows || n > self.cols {
            return Err(SimulationError::DimensionMismatch {
                expected: self.rows.min(self.cols),
                got: n,
            });
        }
        Ok(Matrix::from_fn(n, n, |i, j| self.get(i, j)))
    }

    /// Returns `true` if square and `|a_ij - a_ji| <= tol` for all `i, j`.
    pub fn is_symmetric(&self, tol: f64) -> bool {
        if !self.is_square() {
            return false;
        }
        for i in 0..self.rows {
            for j in (i + 1)..self.cols {
                if (self.get(i, j) - self.get(j, i)).abs() > tol {
                    return false;
                }
            }
        }
        true
    }

    /// Largest absolute element-wise difference with `other`.
    ///
    /// Returns `f64::INFINITY` if the shapes differ.
    pub fn max_abs_diff(&self, other: &Matrix) -> f64 {
        if self.shape() != other.shape() {
            return f64::INFINITY;
        }
        self.data
            .iter()
            .zip(&other.data)
            .map(|(a, b)| (a - b).abs())
            .fold(0.0, f64::max)
    }

    /// Cholesky decomposition (lower triangular `L` where `self = L * L^T`).
    ///
    /// Uses the Cholesky-Banachiewicz ordering. Only the lower triangle of
    /// `self` is read.
    ///
    /// # Errors
    ///
    /// - `DimensionMismatch` if the matrix is not square
    /// - `NotPositiveDefinite` if a pivot is not strictly positive (this
    ///   includes positive semi-definite matrices and matrices made
    ///   indefinite by floating-point truncation)
    pub fn cholesky(&self) -> SimulationResult<CholeskyFactor> {
        if !self.is_square() {
            return Err(SimulationError::DimensionMismatch {
                expected: self.rows,
                got: self.cols,
            });
        }

        let n = self.rows;
        let mut lower = vec![0.0; n * n];

        for i in 0..n {
            for j in 0..=i {
                let mut sum = 0.0;
                for k in 0..j {
                    sum += lower[i * n + k] * lower[j * n + k];
                }

                if i == j {
                    let pivot = self.get(i, i) - sum;
                    if !(pivot.is_finite() && pivot > 0.0) {
                        return Err(SimulationError::NotPositiveDefinite { index: i, pivot });
                    }
                    lower[i * n + i] = pivot.sqrt();
                } else {
                    lower[i * n + j] = (self.get(i, j) - sum) / lower[j * n + j];
                }
            }
        }

        Ok(CholeskyFactor {
            lower: Matrix {
                data: lower,
                rows: n,
                cols: n,
            },
        })
    }
}

/// Lower triangular Cholesky factor.
///
/// Used to transform independent standard normals into correlated normals.
#[derive(Clone, Debug, PartialEq)]
pub struct CholeskyFactor {
    /// Lower triangular matrix (upper triangle is zero)
    lower: Matrix,
}

impl CholeskyFactor {
    /// Matrix dimension.
    #[inline]
    pub fn dim(&self) -> usize {
        self.lower.rows
    }

    /// Element at `(i, j)`; zero above the diagonal.
    #[inline]
    pub fn get(&self, i: usize, j: usize) -> f64 {
        self.lower.get(i, j)
    }

    /// The factor as a dense matrix.
    #[inline]
    pub fn lower(&self) -> &Matrix {
        &self.lower
    }

    /// Computes `W = L * Z`.
    ///
    /// # Panics
    ///
    /// Panics if `z.len() < self.dim()`.
    pub fn transform(&self, z: &[f64]) -> Vec<f64> {
        let mut w = vec![0.0; self.dim()];
        self.transform_into(z, &mut w);
        w
    }

    /// Computes `W = L * Z` into a caller-provided buffer.
    ///
    /// # Panics
    ///
    /// Panics if `z` or `out` is shorter than `self.dim()`.
    #[inline]
    pub fn transform_into(&self, z: &[f64], out: &mut [f64]) {
        let n = self.dim();
        assert!(
            z.len() >= n && out.len() >= n,
            "Input vector length {} is less than matrix dimension {}",
            z.len().min(out.len()),
            n
        );

        for (i, w_i) in out.iter_mut().enumerate().take(n) {
            let row = &self.lower.row(i)[..=i];
            *w_i = dot(row, &z[..=i]);
        }
    }

    /// Reconstructs `L * L^T`.
    pub fn reconstruct(&self) -> Matrix {
        let n = self.dim();
        Matrix::from_fn(n, n, |i, j| {
            let k_max = i.min(j);
            (0..=k_max).map(|k| self.get(i, k) * self.get(j, k)).sum()
        })
    }
}

/// Dot product of two slices of equal length.
///
/// # Panics
///
/// Panics in debug builds if the lengths differ.
#[inline]
pub fn dot(a: &[f64], b: &[f64]) -> f64 {
    debug_assert_eq!(a.len(), b.len());
    a.iter().zip(b).map(|(x, y)| x * y).sum()
}
