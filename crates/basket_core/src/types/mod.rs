//! Core error types.
//!
//! This module provides:
//! - `error`: Structured error type shared by market generation, basket
//!   configuration, factorisation and simulation
//!
//! # Re-exports
//!
//! [`SimulationError`], [`SimulationResult`] and [`ensure_positive`] from `error`.

pub mod error;

pub use error::{ensure_positive, SimulationError, SimulationResult};
