//! Determinism verification tests
//!
//! The simulation must produce identical results given the same seed.

mod common;

use common::SimHarness;
use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};
use village_core::config::Config;
use village_events::TICKS_PER_DAY;

/// Test that SmallRng produces identical sequences with the same seed
#[test]
fn test_rng_determinism() {
    let seed = 42u64;

    let mut rng1 = SmallRng::seed_from_u64(seed);
    let values1: Vec<u32> = (0..100).map(|_| rng1.gen()).collect();

    let mut rng2 = SmallRng::seed_from_u64(seed);
    let values2: Vec<u32> = (0..100).map(|_| rng2.gen()).collect();

    assert_eq!(values1, values2, "RNG sequences should be identical with same seed");
}

/// Two runs with the same seed replay the exact same event stream and
/// end with every agent on the same tile.
#[test]
fn test_same_seed_reproduces_full_run() {
    let config = Config::default();

    let mut first = SimHarness::new(&config, 42, 0);
    first.run(TICKS_PER_DAY);

    let mut second = SimHarness::new(&config, 42, 0);
    second.run(TICKS_PER_DAY);

    assert_eq!(first.events, second.events);
    assert_eq!(first.positions(), second.positions());
}

/// Different seeds must not replay the same run.
#[test]
fn test_different_seeds_diverge() {
    let config = Config::default();

    let mut first = SimHarness::new(&config, 1, 0);
    first.run(TICKS_PER_DAY);

    let mut second = SimHarness::new(&config, 2, 0);
    second.run(TICKS_PER_DAY);

    assert_ne!(first.events, second.events);
}
