//! Seed selection for simulation streams.

/// Where a simulation stream takes its seed from.
///
/// # Examples
///
/// ```rust
/// use synth_core::rng::SeedSource;
///
/// assert_eq!(SeedSource::Fixed(7).resolve(), 7);
/// assert_eq!(SeedSource::from(Some(9)), SeedSource::Fixed(9));
/// assert_eq!(SeedSource::from(None), SeedSource::Entropy);
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum SeedSource {
    /// Deterministic seed: identical seeds give bit-identical streams.
    Fixed(u64),
    /// Fresh seed drawn from the operating system on every resolution.
    Entropy,
}

impl SeedSource {
    /// Resolves the source to a concrete seed.
    ///
    /// `Entropy` draws a new value each call.
    pub fn resolve(self) -> u64 {
        match self {
            SeedSource::Fixed(seed) => seed,
            SeedSource::Entropy => rand::random::<u64>(),
        }
    }

    /// Returns `true` for [`SeedSource::Fixed`].
    pub fn is_reproducible(&self) -> bool {
        matches!(self, SeedSource::Fixed(_))
    }
}

impl From<Option<u64>> for SeedSource {
    fn from(seed: Option<u64>) -> Self {
        seed.map_or(SeedSource::Entropy, SeedSource::Fixed)
    }
}

impl From<u64> for SeedSource {
    fn from(seed: u64) -> Self {
        SeedSource::Fixed(seed)
    }
}
