//! Numerical building blocks.
//!
//! This module provides:
//! - `linalg`: Dense row-major [`Matrix`], Cholesky factorisation and products
//! - `stats`: Means, population/sample moments and sample covariance

pub mod linalg;
pub mod stats;

pub use linalg::{dot, CholeskyFactor, Matrix};
