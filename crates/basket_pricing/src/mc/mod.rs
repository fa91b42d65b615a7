//! Monte Carlo simulation of correlated two-period Gaussian paths.
//!
//! # Architecture
//!
//! ```text
//! CorrelatedPathSimulator
//! ├── CholeskyFactor    (factorised once, shared read-only)
//! ├── period vols       (sigma_0·√t1, sigma·√(t2 - t1))
//! ├── GaussianSource    (PricerRng, or fixed values in tests)
//! └── SimulationConfig  (n_simul, seed, parallel)
//! ```
//!
//! # Usage
//!
//! ```rust
//! use basket_core::math::Matrix;
//! use basket_pricing::mc::{CorrelatedPathSimulator, SimulationConfig};
//!
//! let config = SimulationConfig::builder().n_simul(4096).seed(1).build().unwrap();
//! let simulator = CorrelatedPathSimulator::new(
//!     &Matrix::identity(3),
//!     vec![2.0; 3],
//!     vec![1.0; 3],
//!     vec![100.0; 3],
//! )
//! .unwrap();
//!
//! let paths = simulator.simulate_seeded(&config).unwrap();
//! assert_eq!(paths.n_simul(), 4096);
//! ```

mod config;
mod paths;
mod source;

pub use config::{SimulationConfig, SimulationConfigBuilder, MAX_PATHS};
pub use paths::{CorrelatedPathSimulator, SimulatedPaths};
pub use source::{ConstantSource, GaussianSource};
