//! Repeatable random inputs for tests.
use rand::distr::StandardUniform;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Fixed random seed to support repeatable testing
const SEED: u64 = 0x6e64_7461_626c_65;

/// Random number generator with a const seed
pub fn rng_fixed_seed() -> StdRng {
    StdRng::seed_from_u64(SEED)
}

/// `n` uniform samples in `[0, 1)`
pub fn randn<T>(rng: &mut StdRng, n: usize) -> Vec<T>
where
    StandardUniform: rand::distr::Distribution<T>,
{
    (0..n).map(|_| rng.random::<T>()).collect()
}
