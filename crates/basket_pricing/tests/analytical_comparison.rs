//! Analytical comparison tests for the Monte Carlo simulation.
//!
//! These tests verify that simulated paths reproduce the moments implied by
//! the basket configuration and that the mean payoff converges to the
//! Bachelier closed form.
//!
//! # Test Categories
//!
//! 1. **Price**: MC mean payoff vs `bach` on the terminal basket distribution
//! 2. **Covariance**: sample covariance of each period vs its theoretical value
//! 3. **Determinism**: serial/parallel and seed reproducibility

use approx::assert_relative_eq;
use basket_core::math::{stats, Matrix};
use basket_models::analytical::bach;
use basket_models::basket::{Basket, BasketSpec};
use basket_models::market::MarketGenerator;
use basket_pricing::dataset::TrainingSet;
use basket_pricing::experiment::{Experiment, ExperimentConfig, PriceCheck};
use basket_pricing::mc::{CorrelatedPathSimulator, SimulatedPaths};
use basket_pricing::rng::{PricerRng, RngStreams, Stream};

const N_COVARIANCE: usize = 32_768;
const COVARIANCE_TOLERANCE: f64 = 0.05;

fn random_basket(seed: u64, n_assets: usize, dimension: usize, strike: f64) -> Basket {
    let mut streams = RngStreams::from_master_seed(seed);
    let market = MarketGenerator::new(n_assets, 10.0, 30.0, 100.0)
        .unwrap()
        .generate(streams.stream(Stream::Market))
        .unwrap();
    Basket::configure(
        &market,
        BasketSpec::new(dimension, strike, 1.0, 2.0, 20.0),
        streams.stream(Stream::Basket),
    )
    .unwrap()
}

fn simulate(basket: &Basket, n: usize, seed: u64) -> SimulatedPaths {
    CorrelatedPathSimulator::new(
        basket.market().correl(),
        basket.period_one_vols(),
        basket.period_two_vols(),
        basket.market().spot0().to_vec(),
    )
    .unwrap()
    .simulate_par(n, &mut PricerRng::from_seed(seed))
    .unwrap()
}

/// Theoretical covariance `diag(v) · correl · diag(v)` of one period.
fn period_covariance(basket: &Basket, vols: &[f64]) -> Matrix {
    basket.market().correl().diag_scaled(vols, vols).unwrap()
}

fn assert_covariance_close(sample: &Matrix, expected: &Matrix, vols: &[f64]) {
    let d = vols.len();
    for i in 0..d {
        for j in 0..d {
            let scale = vols[i] * vols[j];
            let err = (sample.get(i, j) - expected.get(i, j)).abs() / scale;
            assert!(
                err < COVARIANCE_TOLERANCE,
                "cov[{}][{}]: sample {} vs expected {} (relative error {})",
                i,
                j,
                sample.get(i, j),
                expected.get(i, j),
                err
            );
        }
    }
}

// ============================================================================
// Price Tests
// ============================================================================

#[test]
fn test_mc_mean_payoff_vs_bachelier() {
    for (seed, strike) in [(1, 100.0), (2, 110.0), (3, 90.0)] {
        let basket = random_basket(seed, 8, 5, strike);
        let paths = simulate(&basket, 100_000, seed + 100);
        let train = TrainingSet::from_paths(&paths, &basket).unwrap();
        let check = PriceCheck::new(train.y(), &basket);

        assert!(
            check.z_score().abs() < 4.0,
            "strike {}: mc {} vs analytic {} (z = {})",
            strike,
            check.mc_price,
            check.analytic_price,
            check.z_score()
        );
    }
}

#[test]
fn test_terminal_basket_std_matches_theory() {
    let basket = random_basket(7, 10, 6, 100.0);
    let paths = simulate(&basket, N_COVARIANCE, 8);
    let terminal: Vec<f64> = paths
        .s2()
        .row_iter()
        .map(|row| basket.basket_value(row))
        .collect();
    assert_relative_eq!(
        stats::population_std(&terminal),
        basket.terminal_std(),
        max_relative = 0.02
    );
}

#[test]
fn test_analytic_reference_value() {
    // d = -0.5 at vol 20, one year
    assert_relative_eq!(
        bach(100.0, 110.0, 20.0, 1.0),
        3.955_931_148_026_122,
        epsilon = 1e-12
    );
}

// ============================================================================
// Covariance Tests
// ============================================================================

#[test]
fn test_first_period_covariance() {
    let basket = random_basket(11, 10, 4, 100.0);
    let paths = simulate(&basket, N_COVARIANCE, 12);
    let vols = basket.period_one_vols();

    let sample = stats::sample_covariance(paths.s1());
    assert_covariance_close(&sample, &period_covariance(&basket, &vols), &vols);

    let means = stats::column_means(paths.s1());
    for (m, (s, v)) in means.iter().zip(basket.market().spot0().iter().zip(&vols)) {
        // Mean within 5 standard errors.
        assert!((m - s).abs() < 5.0 * v / (N_COVARIANCE as f64).sqrt());
    }
}

#[test]
fn test_second_period_covariance() {
    let basket = random_basket(13, 10, 4, 100.0);
    let paths = simulate(&basket, N_COVARIANCE, 14);
    let vols = basket.period_two_vols();

    let sample = stats::sample_covariance(&paths.increments());
    assert_covariance_close(&sample, &period_covariance(&basket, &vols), &vols);
}

#[test]
fn test_periods_are_uncorrelated() {
    let basket = random_basket(17, 4, 2, 100.0);
    let paths = simulate(&basket, N_COVARIANCE, 18);
    let inc = paths.increments();

    let first: Vec<f64> = paths.s1().column(0);
    let second: Vec<f64> = inc.column(0);
    let joint = Matrix::from_fn(N_COVARIANCE, 2, |i, j| if j == 0 { first[i] } else { second[i] });
    let cov = stats::sample_covariance(&joint);
    let scale = (cov.get(0, 0) * cov.get(1, 1)).sqrt();
    assert!((cov.get(0, 1) / scale).abs() < 0.03);
}

// ============================================================================
// Determinism Tests
// ============================================================================

#[test]
fn test_experiment_is_deterministic_per_seed() {
    let config = ExperimentConfig {
        n_simul: 2048,
        n_test: 32,
        ..ExperimentConfig::default()
    };
    let a = Experiment::new(config.clone()).unwrap().run().unwrap();
    let b = Experiment::new(config.clone()).unwrap().run().unwrap();
    let c = Experiment::new(ExperimentConfig { seed: 43, ..config })
        .unwrap()
        .run()
        .unwrap();

    assert_eq!(a.training, b.training);
    assert_ne!(a.training, c.training);
}

#[test]
fn test_experiment_price_check_is_consistent() {
    let config = ExperimentConfig {
        n_simul: 65_536,
        n_test: 32,
        parallel: true,
        ..ExperimentConfig::default()
    };
    let output = Experiment::new(config).unwrap().run().unwrap();
    assert!(output.price_check.z_score().abs() < 4.0);
}
