//! Shared test utilities for progress integration tests

#![allow(dead_code)]

use beacon::progress::{FixedClock, ProgressEngine};
use rand::SeedableRng;
use rand::rngs::StdRng;

pub type TestEngine = ProgressEngine<FixedClock, StdRng>;

/// Clock pinned to local noon on 2024-03-`day`
pub fn clock_on(day: u32) -> FixedClock {
    FixedClock::local_noon(2024, 3, day).expect("noon exists on every day")
}

/// Engine with a fixed clock and a seeded RNG
pub fn engine_on(day: u32, seed: u64) -> TestEngine {
    ProgressEngine::with_parts(clock_on(day), StdRng::seed_from_u64(seed))
}
