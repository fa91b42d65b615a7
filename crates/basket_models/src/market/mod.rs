//! Market parameter generation.
//!
//! This module provides:
//! - [`MarketGenerator`]: random spots, volatilities and correlation
//! - [`Market`]: immutable snapshot with derived covariance and truncation
//! - [`normalise_correlation`] / [`random_correlation`]: correlation helpers

pub mod correlation;
#[allow(clippy::module_inception)]
pub mod market;
pub mod generator;

pub use correlation::{normalise_correlation, random_correlation};
pub use generator::MarketGenerator;
pub use market::Market;
