//! Explicit random state for tensor creation.
//!
//! There is no process-global generator: every random constructor takes a
//! [`RandomContext`], so a fixed seed reproduces the same tensors in the same order.

use rand::rngs::StdRng;
use rand::SeedableRng;

/// Seeded random number generator passed to [`crate::tensor::randn`] and friends.
#[derive(Debug, Clone)]
pub struct RandomContext {
    seed: u64,
    rng: StdRng,
}

impl RandomContext {
    pub fn seeded(seed: u64) -> Self {
        RandomContext {
            seed,
            rng: StdRng::seed_from_u64(seed),
        }
    }

    /// Seed this context was last (re)seeded with.
    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// Restarts the stream from `seed`.
    pub fn reseed(&mut self, seed: u64) {
        self.seed = seed;
        self.rng = StdRng::seed_from_u64(seed);
    }

    pub(crate) fn rng_mut(&mut self) -> &mut StdRng {
        &mut self.rng
    }
}

/// Creates a context seeded with `seed`.
pub fn manual_seed(seed: u64) -> RandomContext {
    log::debug!("random context seeded with {}", seed);
    RandomContext::seeded(seed)
}
