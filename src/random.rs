//! Random number generation helpers.
//!
//! Every trial owns its own generator; nothing in the crate touches a
//! global RNG.

use rand::rngs::StdRng;
use rand::SeedableRng;

/// Creates a deterministic generator from `seed`.
pub fn create_rng(seed: u64) -> StdRng {
    StdRng::seed_from_u64(seed)
}

/// Seed for trial `trial`: `base + trial` when a base seed is configured,
/// otherwise a fresh random seed.
pub fn trial_seed(base: Option<u64>, trial: usize) -> u64 {
    match base {
        Some(base) => base.wrapping_add(trial as u64),
        None => rand::random(),
    }
}
