//! Unit tests for the RNG module.
//!
//! Covers:
//! - Seed reproducibility and seed tracking
//! - Scaled draws consuming exactly one standard normal
//! - Entropy seeding
//! - Statistical properties via property-based testing

use super::*;

#[test]
fn test_seed_reproducibility() {
    let mut rng1 = SimRng::from_seed(12345);
    let mut rng2 = SimRng::from_seed(12345);

    for _ in 0..100 {
        assert_eq!(rng1.gen_normal().to_bits(), rng2.gen_normal().to_bits());
    }
}

#[test]
fn test_different_seeds_differ() {
    let mut rng1 = SimRng::from_seed(42);
    let mut rng2 = SimRng::from_seed(43);

    let a: Vec<f64> = (0..10).map(|_| rng1.gen_normal()).collect();
    let b: Vec<f64> = (0..10).map(|_| rng2.gen_normal()).collect();
    assert_ne!(a, b);
}

#[test]
fn test_scaled_draw_matches_standard_draw() {
    let mut scaled = SimRng::from_seed(7);
    let mut plain = SimRng::from_seed(7);

    for _ in 0..50 {
        let s = scaled.gen_normal_scaled(0.25);
        let p = plain.gen_normal();
        assert_eq!(s, 0.25 * p);
    }
}

#[test]
fn test_fill_normal_matches_sequential_draws() {
    let mut batch = SimRng::from_seed(99);
    let mut single = SimRng::from_seed(99);

    let mut buffer = vec![0.0; 32];
    batch.fill_normal(&mut buffer);

    for &value in &buffer {
        assert_eq!(value, single.gen_normal());
    }
}

#[test]
fn test_empty_buffer() {
    let mut rng = SimRng::from_seed(42);
    let mut empty: Vec<f64> = vec![];
    rng.fill_normal(&mut empty);
    assert!(empty.is_empty());
}

#[test]
fn test_from_source_fixed_tracks_seed() {
    let rng = SimRng::from_source(SeedSource::Fixed(2024));
    assert_eq!(rng.seed(), 2024);
}

#[test]
fn test_entropy_source_is_not_reproducible_flag() {
    assert!(!SeedSource::Entropy.is_reproducible());
    assert!(SeedSource::Fixed(1).is_reproducible());
}

#[test]
fn test_entropy_seed_replays() {
    let mut first = SimRng::from_source(SeedSource::Entropy);
    let mut replay = SimRng::from_seed(first.seed());
    assert_eq!(first.gen_normal(), replay.gen_normal());
}

use proptest::prelude::*;

proptest! {
    #![proptest_config(ProptestConfig::with_cases(32))]

    /// Sample mean and variance of standard normals stay close to 0 and 1.
    #[test]
    fn prop_normal_moments(seed in any::<u64>()) {
        let mut rng = SimRng::from_seed(seed);
        let sample_size = 50_000;
        let mut buffer = vec![0.0; sample_size];
        rng.fill_normal(&mut buffer);

        let mean: f64 = buffer.iter().sum::<f64>() / sample_size as f64;
        let variance: f64 = buffer.iter().map(|x| (x - mean).powi(2)).sum::<f64>()
            / (sample_size - 1) as f64;

        prop_assert!(mean.abs() < 0.05, "mean {} too far from 0 (seed={})", mean, seed);
        prop_assert!((variance - 1.0).abs() < 0.05, "variance {} too far from 1 (seed={})", variance, seed);
    }
}
