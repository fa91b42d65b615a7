//! Training and test set assembly.
//!
//! - [`TrainingSet`]: `X = S1`, `Y = max(0, w·S2 - K)` from simulated paths
//! - [`TestSet`]: rescaled normal test points labelled with `bach`
//! - [`Normaliser`]: scalar mean/std normalisation of features and labels

mod normalise;
mod test_set;
mod training;

pub use normalise::Normaliser;
pub use test_set::TestSet;
pub use training::TrainingSet;
