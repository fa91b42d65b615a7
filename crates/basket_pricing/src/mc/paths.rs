//! Correlated two-period Gaussian path simulation.
//!
//! Each path draws two independent standard normal vectors `z1`, `z2`,
//! correlates them with the Cholesky factor `L` of the correlation matrix and
//! scales them by per-asset period volatilities:
//!
//! ```text
//! S1 = spot0 + vol1 ⊙ (L z1)
//! S2 = S1    + vol2 ⊙ (L z2)
//! ```
//!
//! The square root of each period length is already folded into `vol1` and
//! `vol2`.
//!
//! # Memory Layout
//!
//! All batches are row-major `[n_simul, d]`: `s1[path * d + asset]`.
//!
//! # Draw Order
//!
//! The whole `Z1` batch is drawn before the whole `Z2` batch, and both are
//! drawn serially from the source. The parallel simulator only parallelises
//! the correlation step, so it reproduces the serial output bit for bit.

use basket_core::math::{CholeskyFactor, Matrix};
use basket_core::types::{SimulationError, SimulationResult};
use rayon::prelude::*;
use tracing::debug;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use super::config::SimulationConfig;
use super::source::GaussianSource;
use crate::rng::PricerRng;

/// Simulated asset levels at `t1` and `t2`.
///
/// Immutable after construction.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct SimulatedPaths {
    s1: Matrix,
    s2: Matrix,
}

impl SimulatedPaths {
    /// Asset levels at `t1`, shape `[n_simul, d]`.
    #[inline]
    pub fn s1(&self) -> &Matrix {
        &self.s1
    }

    /// Asset levels at `t2`, shape `[n_simul, d]`.
    #[inline]
    pub fn s2(&self) -> &Matrix {
        &self.s2
    }

    /// Number of simulated paths.
    #[inline]
    pub fn n_simul(&self) -> usize {
        self.s1.rows()
    }

    /// Number of assets.
    #[inline]
    pub fn dim(&self) -> usize {
        self.s1.cols()
    }

    /// Second-period increments `S2 - S1`.
    pub fn increments(&self) -> Matrix {
        Matrix::from_fn(self.s1.rows(), self.s1.cols(), |i, j| {
            self.s2.get(i, j) - self.s1.get(i, j)
        })
    }
}

/// Two-period simulator over a fixed correlation structure.
///
/// The correlation matrix is factorised once at construction and shared
/// read-only by every simulation.
///
/// # Examples
///
/// ```rust
/// use basket_core::math::Matrix;
/// use basket_pricing::mc::CorrelatedPathSimulator;
/// use basket_pricing::rng::PricerRng;
///
/// let correl = Matrix::from_vec(2, 2, vec![1.0, 0.5, 0.5, 1.0]).unwrap();
/// let simulator = CorrelatedPathSimulator::new(
///     &correl,
///     vec![20.0, 40.0],
///     vec![10.0, 20.0],
///     vec![100.0, 100.0],
/// )
/// .unwrap();
///
/// let mut rng = PricerRng::from_seed(42);
/// let paths = simulator.simulate(1000, &mut rng).unwrap();
/// assert_eq!(paths.s1().shape(), (1000, 2));
/// ```
#[derive(Debug, Clone)]
pub struct CorrelatedPathSimulator {
    chol: CholeskyFactor,
    vol1: Vec<f64>,
    vol2: Vec<f64>,
    spot0: Vec<f64>,
}

impl CorrelatedPathSimulator {
    /// Creates a simulator.
    ///
    /// # Errors
    /// - `InvalidParameter` if `correl` is empty
    /// - `DimensionMismatch` if `correl` is not square or a vector length
    ///   differs from its dimension
    /// - `NotPositiveDefinite` if the Cholesky factorisation fails
    pub fn new(
        correl: &Matrix,
        vol1: Vec<f64>,
        vol2: Vec<f64>,
        spot0: Vec<f64>,
    ) -> SimulationResult<Self> {
        let (rows, cols) = correl.shape();
        if rows == 0 {
            return Err(SimulationError::invalid_parameter(
                "correl",
                "correlation matrix is empty",
            ));
        }
        if rows != cols {
            return Err(SimulationError::DimensionMismatch {
                expected: rows,
                got: cols,
            });
        }
        for v in [&vol1, &vol2, &spot0] {
            if v.len() != rows {
                return Err(SimulationError::DimensionMismatch {
                    expected: rows,
                    got: v.len(),
                });
            }
        }

        let chol = correl.cholesky()?;
        debug!(dimension = rows, "correlation factorised");
        Ok(Self {
            chol,
            vol1,
            vol2,
            spot0,
        })
    }

    /// Number of assets.
    #[inline]
    pub fn dim(&self) -> usize {
        self.spot0.len()
    }

    /// Cholesky factor of the correlation matrix.
    #[inline]
    pub fn cholesky(&self) -> &CholeskyFactor {
        &self.chol
    }

    /// Simulates `n_simul` paths serially.
    ///
    /// # Errors
    /// `InvalidParameter` if `n_simul == 0`.
    pub fn simulate<G: GaussianSource + ?Sized>(
        &self,
        n_simul: usize,
        source: &mut G,
    ) -> SimulationResult<SimulatedPaths> {
        let (z1, z2) = self.draw(n_simul, source)?;
        let d = self.dim();
        let mut s1 = Matrix::zeros(n_simul, d);
        let mut s2 = Matrix::zeros(n_simul, d);

        for i in 0..n_simul {
            self.correlate_row(z1.row(i), z2.row(i), s1.row_mut(i), s2.row_mut(i));
        }
        Ok(SimulatedPaths { s1, s2 })
    }

    /// Simulates `n_simul` paths with the correlation step spread over the
    /// rayon thread pool. Output is identical to [`simulate`](Self::simulate)
    /// for the same source state.
    ///
    /// # Errors
    /// `InvalidParameter` if `n_simul == 0`.
    pub fn simulate_par<G: GaussianSource + ?Sized>(
        &self,
        n_simul: usize,
        source: &mut G,
    ) -> SimulationResult<SimulatedPaths> {
        let (z1, z2) = self.draw(n_simul, source)?;
        let d = self.dim();
        let mut s1 = Matrix::zeros(n_simul, d);
        let mut s2 = Matrix::zeros(n_simul, d);

        s1.as_mut_slice()
            .par_chunks_mut(d)
            .zip(s2.as_mut_slice().par_chunks_mut(d))
            .zip(z1.as_slice().par_chunks(d).zip(z2.as_slice().par_chunks(d)))
            .for_each(|((out1, out2), (row1, row2))| {
                self.correlate_row(row1, row2, out1, out2);
            });
        Ok(SimulatedPaths { s1, s2 })
    }

    /// Simulates according to `config`, picking the serial or parallel path.
    pub fn simulate_with<G: GaussianSource + ?Sized>(
        &self,
        config: &SimulationConfig,
        source: &mut G,
    ) -> SimulationResult<SimulatedPaths> {
        config.validate()?;
        if config.parallel() {
            self.simulate_par(config.n_simul(), source)
        } else {
            self.simulate(config.n_simul(), source)
        }
    }

    /// Simulates according to `config` with a fresh [`PricerRng`] seeded
    /// from `config.seed()` (0 when unset).
    ///
    /// # Errors
    /// `InvalidParameter` if `config` fails validation.
    pub fn simulate_seeded(&self, config: &SimulationConfig) -> SimulationResult<SimulatedPaths> {
        let mut rng = PricerRng::from_seed(config.seed().unwrap_or(0));
        self.simulate_with(config, &mut rng)
    }

    fn draw<G: GaussianSource + ?Sized>(
        &self,
        n_simul: usize,
        source: &mut G,
    ) -> SimulationResult<(Matrix, Matrix)> {
        if n_simul == 0 {
            return Err(SimulationError::invalid_parameter(
                "n_simul",
                "must be at least 1",
            ));
        }
        let d = self.dim();
        debug!(n_simul, dimension = d, "drawing normals");
        let z1 = source.standard_normals(n_simul, d);
        let z2 = source.standard_normals(n_simul, d);
        Ok((z1, z2))
    }

    #[inline]
    fn correlate_row(&self, z1: &[f64], z2: &[f64], s1: &mut [f64], s2: &mut [f64]) {
        self.chol.transform_into(z1, s1);
        for ((s, spot), v) in s1.iter_mut().zip(&self.spot0).zip(&self.vol1) {
            *s = spot + v * *s;
        }
        self.chol.transform_into(z2, s2);
        for ((s, prev), v) in s2.iter_mut().zip(s1.iter()).zip(&self.vol2) {
            *s = prev + v * *s;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mc::source::ConstantSource;
    use approx::assert_relative_eq;

    fn two_asset_simulator() -> CorrelatedPathSimulator {
        let correl = Matrix::from_vec(2, 2, vec![1.0, 0.6, 0.6, 1.0]).unwrap();
        CorrelatedPathSimulator::new(
            &correl,
            vec![20.0, 30.0],
            vec![10.0, 15.0],
            vec![100.0, 90.0],
        )
        .unwrap()
    }

    #[test]
    fn test_new_validates_shapes() {
        let correl = Matrix::identity(2);
        assert!(matches!(
            CorrelatedPathSimulator::new(&correl, vec![1.0], vec![1.0, 1.0], vec![1.0, 1.0]),
            Err(SimulationError::DimensionMismatch { expected: 2, got: 1 })
        ));
        assert!(matches!(
            CorrelatedPathSimulator::new(&Matrix::zeros(2, 3), vec![], vec![], vec![]),
            Err(SimulationError::DimensionMismatch { .. })
        ));
        assert!(CorrelatedPathSimulator::new(&Matrix::zeros(0, 0), vec![], vec![], vec![]).is_err());
    }

    #[test]
    fn test_new_rejects_singular_correlation() {
        let correl = Matrix::from_vec(2, 2, vec![1.0, 1.0, 1.0, 1.0]).unwrap();
        let result = CorrelatedPathSimulator::new(&correl, vec![1.0; 2], vec![1.0; 2], vec![0.0; 2]);
        match result {
            Err(SimulationError::NotPositiveDefinite { index, .. }) => assert_eq!(index, 1),
            other => panic!("expected NotPositiveDefinite, got {:?}", other),
        }
    }

    #[test]
    fn test_zero_normals_stay_at_spot() {
        let simulator = two_asset_simulator();
        let paths = simulator.simulate(4, &mut ConstantSource(0.0)).unwrap();
        for i in 0..4 {
            assert_eq!(paths.s1().row(i), &[100.0, 90.0]);
            assert_eq!(paths.s2().row(i), &[100.0, 90.0]);
        }
    }

    #[test]
    fn test_unit_normals_apply_factor_and_vols() {
        let simulator = two_asset_simulator();
        let paths = simulator.simulate(1, &mut ConstantSource(1.0)).unwrap();
        // L = [[1, 0], [0.6, 0.8]], L·1 = [1, 1.4]
        assert_relative_eq!(paths.s1().get(0, 0), 120.0, epsilon = 1e-12);
        assert_relative_eq!(paths.s1().get(0, 1), 90.0 + 30.0 * 1.4, epsilon = 1e-12);
        assert_relative_eq!(paths.s2().get(0, 0), 130.0, epsilon = 1e-12);
        assert_relative_eq!(paths.s2().get(0, 1), 132.0 + 15.0 * 1.4, epsilon = 1e-12);
    }

    #[test]
    fn test_zero_paths_rejected() {
        let simulator = two_asset_simulator();
        let mut rng = PricerRng::from_seed(1);
        assert!(simulator.simulate(0, &mut rng).is_err());
        assert!(simulator.simulate_par(0, &mut rng).is_err());
    }

    #[test]
    fn test_same_seed_is_bit_identical() {
        let simulator = two_asset_simulator();
        let a = simulator.simulate(500, &mut PricerRng::from_seed(77)).unwrap();
        let b = simulator.simulate(500, &mut PricerRng::from_seed(77)).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_parallel_matches_serial() {
        let simulator = two_asset_simulator();
        let serial = simulator.simulate(2049, &mut PricerRng::from_seed(3)).unwrap();
        let parallel = simulator.simulate_par(2049, &mut PricerRng::from_seed(3)).unwrap();
        assert_eq!(serial, parallel);
    }

    #[test]
    fn test_simulate_with_config() {
        let simulator = two_asset_simulator();
        let config = SimulationConfig::builder()
            .n_simul(64)
            .parallel(true)
            .build()
            .unwrap();
        let paths = simulator
            .simulate_with(&config, &mut PricerRng::from_seed(5))
            .unwrap();
        assert_eq!(paths.n_simul(), 64);
        assert_eq!(paths.dim(), 2);
    }

    #[test]
    fn test_simulate_seeded_uses_config_seed() {
        let simulator = two_asset_simulator();
        let config = |seed: u64| {
            SimulationConfig::builder()
                .n_simul(32)
                .seed(seed)
                .build()
                .unwrap()
        };

        let one = simulator.simulate_seeded(&config(1)).unwrap();
        let other = simulator.simulate_seeded(&config(999)).unwrap();
        assert_ne!(one, other);

        let explicit = simulator
            .simulate_with(&config(1), &mut PricerRng::from_seed(1))
            .unwrap();
        assert_eq!(one, explicit);
        assert_eq!(one, simulator.simulate_seeded(&config(1)).unwrap());
    }

    #[test]
    fn test_simulate_seeded_defaults_to_zero_seed() {
        let simulator = two_asset_simulator();
        let unseeded = SimulationConfig::builder().n_simul(16).build().unwrap();
        let zero = SimulationConfig::builder().n_simul(16).seed(0).build().unwrap();
        assert_eq!(
            simulator.simulate_seeded(&unseeded).unwrap(),
            simulator.simulate_seeded(&zero).unwrap()
        );
    }

    #[test]
    fn test_increments() {
        let simulator = two_asset_simulator();
        let paths = simulator.simulate(1, &mut ConstantSource(1.0)).unwrap();
        let inc = paths.increments();
        assert_relative_eq!(inc.get(0, 0), 10.0, epsilon = 1e-12);
        assert_relative_eq!(inc.get(0, 1), 21.0, epsilon = 1e-12);
    }
}
