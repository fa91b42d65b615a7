use super::*;
use approx::assert_abs_diff_eq;
use rand::Rng;

// ==========================================================
// PricerRng
// ==========================================================

#[test]
fn test_same_seed_same_sequence() {
    let mut a = PricerRng::from_seed(99);
    let mut b = PricerRng::from_seed(99);
    let mut xa = vec![0.0; 64];
    let mut xb = vec![0.0; 64];
    a.fill_normal(&mut xa);
    b.fill_normal(&mut xb);
    assert_eq!(xa, xb);
}

#[test]
fn test_different_seeds_differ() {
    let mut a = PricerRng::from_seed(1);
    let mut b = PricerRng::from_seed(2);
    assert_ne!(a.gen_uniform(), b.gen_uniform());
}

#[test]
fn test_fill_matches_single_draws() {
    let mut a = PricerRng::from_seed(5);
    let mut b = PricerRng::from_seed(5);
    let mut buffer = vec![0.0; 16];
    a.fill_normal(&mut buffer);
    let singles: Vec<f64> = (0..16).map(|_| b.gen_normal()).collect();
    assert_eq!(buffer, singles);
}

#[test]
fn test_uniform_range() {
    let mut rng = PricerRng::from_seed(3);
    for _ in 0..1000 {
        let v = rng.gen_uniform_range(-1.0, 1.0);
        assert!((-1.0..1.0).contains(&v));
    }
    assert_eq!(rng.gen_uniform_range(2.0, 2.0), 2.0);
}

#[test]
fn test_normal_moments() {
    let mut rng = PricerRng::from_seed(2024);
    let mut buffer = vec![0.0; 100_000];
    rng.fill_normal(&mut buffer);
    let n = buffer.len() as f64;
    let mean = buffer.iter().sum::<f64>() / n;
    let var = buffer.iter().map(|x| (x - mean) * (x - mean)).sum::<f64>() / n;
    assert_abs_diff_eq!(mean, 0.0, epsilon = 0.02);
    assert_abs_diff_eq!(var, 1.0, epsilon = 0.02);
}

#[test]
fn test_usable_as_rand_rng() {
    let mut rng = PricerRng::from_seed(8);
    let v: f64 = rng.gen_range(10.0..20.0);
    assert!((10.0..20.0).contains(&v));
}

// ==========================================================
// RngStreams
// ==========================================================

#[test]
fn test_streams_have_distinct_seeds() {
    let streams = RngStreams::from_master_seed(42);
    let seeds: Vec<u64> = Stream::ALL.iter().map(|&s| streams.seed_of(s)).collect();
    for i in 0..seeds.len() {
        for j in (i + 1)..seeds.len() {
            assert_ne!(seeds[i], seeds[j]);
        }
    }
    assert_eq!(streams.master_seed(), 42);
}

#[test]
fn test_streams_are_reproducible() {
    let a = RngStreams::from_master_seed(17);
    let b = RngStreams::from_master_seed(17);
    for s in Stream::ALL {
        assert_eq!(a.seed_of(s), b.seed_of(s));
    }
}

#[test]
fn test_stream_isolation() {
    let mut disturbed = RngStreams::from_master_seed(1234);
    let mut clean = RngStreams::from_master_seed(1234);

    let mut extra = vec![0.0; 10_000];
    disturbed.stream(Stream::Market).fill_uniform(&mut extra);
    disturbed.stream(Stream::Basket).fill_normal(&mut extra);

    for s in [Stream::Simulation, Stream::TestSet] {
        let mut x = vec![0.0; 32];
        let mut y = vec![0.0; 32];
        disturbed.stream(s).fill_normal(&mut x);
        clean.stream(s).fill_normal(&mut y);
        assert_eq!(x, y, "stream {:?} was perturbed", s);
    }
}

// ==========================================================
// Property-based tests
// ==========================================================

mod proptests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(100))]

        #[test]
        fn test_consumption_never_leaks_across_streams(
            master in any::<u64>(),
            consumed in 0usize..4,
            draws in 0usize..500
        ) {
            let mut disturbed = RngStreams::from_master_seed(master);
            let mut clean = RngStreams::from_master_seed(master);
            let busy = Stream::ALL[consumed];

            let mut extra = vec![0.0; draws];
            disturbed.stream(busy).fill_normal(&mut extra);

            for s in Stream::ALL.into_iter().filter(|&s| s != busy) {
                let mut x = vec![0.0; 8];
                let mut y = vec![0.0; 8];
                disturbed.stream(s).fill_uniform(&mut x);
                clean.stream(s).fill_uniform(&mut y);
                prop_assert_eq!(x, y);
            }
        }
    }
}
