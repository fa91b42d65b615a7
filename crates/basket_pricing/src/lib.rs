//! # basket_pricing (Layer 3: Simulation Engine)
//!
//! ## Layer 3 Role
//!
//! basket_pricing turns a configured basket into data:
//! - Seeded RNG with isolated per-stage streams ([`rng`])
//! - Correlated two-period Gaussian path simulation ([`mc`])
//! - Training and test set assembly ([`dataset`])
//! - End-to-end orchestration with a Monte-Carlo price check ([`experiment`])
//!
//! ## Usage Example
//!
//! ```rust
//! use basket_pricing::experiment::{Experiment, ExperimentConfig};
//!
//! let config = ExperimentConfig {
//!     n_simul: 4096,
//!     n_test: 128,
//!     ..ExperimentConfig::default()
//! };
//! let output = Experiment::new(config).unwrap().run().unwrap();
//!
//! assert_eq!(output.training.x().shape(), (4096, 5));
//! assert_eq!(output.test.labels().len(), 128);
//! ```
//!
//! ## Feature Flags
//!
//! - `serde`: Serialisation for configs, paths and data sets

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![deny(rustdoc::private_intra_doc_links)]

pub mod dataset;
pub mod experiment;
pub mod mc;
pub mod rng;
