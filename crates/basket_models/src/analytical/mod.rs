//! Closed-form Bachelier pricing.
//!
//! This module provides:
//! - `distributions`: standard normal CDF and PDF
//! - `bachelier`: [`bach`], [`bach_put`], [`bach_bkt`] and the [`Bachelier`] model object
//!
//! Prices are undiscounted (zero rates) and never negative.

pub mod bachelier;
pub mod distributions;

pub use bachelier::{bach, bach_bkt, bach_put, Bachelier};
pub use distributions::{norm_cdf, norm_pdf};
