//! # basket_core: Numerical Foundation for the Basket Experiment Engine
//!
//! ## Layer 1 (Foundation) Role
//!
//! basket_core is the bottom layer of the workspace, providing:
//! - Error taxonomy shared by every layer (`types::error`)
//! - Dense row-major matrices and Cholesky factorisation (`math::linalg`)
//! - Sample statistics for validating simulated data (`math::stats`)
//!
//! ## Zero Dependency Principle
//!
//! Layer 1 has no dependencies on other basket_* crates and minimal external
//! dependencies:
//! - thiserror: Error derive
//! - serde: Serialisation support (optional)
//!
//! ## Usage Examples
//!
//! ```rust
//! use basket_core::math::linalg::Matrix;
//! use basket_core::types::SimulationError;
//!
//! let corr = Matrix::from_vec(2, 2, vec![1.0, 0.3, 0.3, 1.0]).unwrap();
//! let chol = corr.cholesky().unwrap();
//! assert!(chol.reconstruct().max_abs_diff(&corr) < 1e-15);
//!
//! let singular = Matrix::from_vec(2, 2, vec![1.0, 1.0, 1.0, 1.0]).unwrap();
//! assert!(matches!(
//!     singular.cholesky(),
//!     Err(SimulationError::NotPositiveDefinite { .. })
//! ));
//! ```
//!
//! ## Feature Flags
//!
//! - `serde`: Enable serialisation for `Matrix` and `SimulationError`

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![deny(rustdoc::private_intra_doc_links)]

pub mod math;
pub mod types;
