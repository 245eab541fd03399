//! Pseudo-random number generator wrapper for path simulation.
//!
//! This module provides [`SimRng`], a seeded PRNG wrapper that offers
//! reproducible random number generation with batch operations.

use rand::rngs::StdRng;
use rand::SeedableRng;
use rand_distr::{Distribution, StandardNormal};

use super::SeedSource;

/// Simulation random number generator.
///
/// Wraps `rand::rngs::StdRng` and remembers the seed it was created with,
/// so entropy-seeded runs can be logged and replayed.
///
/// # Examples
///
/// ```rust
/// use synth_core::rng::SimRng;
///
/// let mut rng1 = SimRng::from_seed(42);
/// let mut rng2 = SimRng::from_seed(42);
/// assert_eq!(rng1.gen_normal(), rng2.gen_normal());
/// ```
pub struct SimRng {
    /// The underlying PRNG instance.
    inner: StdRng,
    /// The seed used for initialisation.
    seed: u64,
}

impl SimRng {
    /// Creates a new RNG instance initialised with the given seed.
    ///
    /// The same seed always produces the same sequence.
    #[inline]
    pub fn from_seed(seed: u64) -> Self {
        Self {
            inner: StdRng::seed_from_u64(seed),
            seed,
        }
    }

    /// Creates an RNG from a [`SeedSource`], resolving entropy if requested.
    #[inline]
    pub fn from_source(source: SeedSource) -> Self {
        Self::from_seed(source.resolve())
    }

    /// Returns the seed used for initialisation.
    #[inline]
    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// Generates a single standard normal variate (mean=0, std=1).
    ///
    /// Uses the Ziggurat sampler behind `rand_distr::StandardNormal`.
    #[inline]
    pub fn gen_normal(&mut self) -> f64 {
        StandardNormal.sample(&mut self.inner)
    }

    /// Generates a normal variate with mean 0 and the given standard deviation.
    ///
    /// Consumes exactly one standard normal draw.
    #[inline]
    pub fn gen_normal_scaled(&mut self, std_dev: f64) -> f64 {
        std_dev * self.gen_normal()
    }

    /// Fills the buffer with standard normal variates, in index order.
    ///
    /// Empty buffers are a no-op.
    #[inline]
    pub fn fill_normal(&mut self, buffer: &mut [f64]) {
        for value in buffer.iter_mut() {
            *value = StandardNormal.sample(&mut self.inner);
        }
    }
}

impl std::fmt::Debug for SimRng {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SimRng").field("seed", &self.seed).finish()
    }
}
