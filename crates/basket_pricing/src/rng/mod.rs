//! # Random Number Generation
//!
//! Seeded generators for every random stage of the experiment.
//!
//! ## Module Structure
//!
//! - [`PricerRng`]: `StdRng` wrapper with uniform/normal batch fills
//! - [`RngStreams`]: one isolated [`PricerRng`] per [`Stream`], derived from a
//!   single master seed
//!
//! ## Usage Example
//!
//! ```rust
//! use basket_pricing::rng::{RngStreams, Stream};
//!
//! let mut streams = RngStreams::from_master_seed(12345);
//! let mut buffer = vec![0.0; 1000];
//! streams.stream(Stream::Simulation).fill_normal(&mut buffer);
//! ```

mod prng;
mod streams;

pub use prng::PricerRng;
pub use streams::{RngStreams, Stream};

#[cfg(test)]
mod tests;
