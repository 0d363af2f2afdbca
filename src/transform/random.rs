//! Randomness for faux Safe Links synthesis and random selection.
//!
//! [`FallbackRandom`] draws from a primary generator (the operating system's
//! CSPRNG by default) and switches to a non-cryptographic generator whenever
//! the primary one reports a failure. Both generators are injectable so
//! tests can make outcomes deterministic and exercise either branch.
//!
//! Nothing here logs. Callers read [`RandomSource::fallback_draws`] and
//! report fallback use under their own log target.

use rand::rngs::{OsRng, StdRng};
use rand::{Rng, RngCore, SeedableRng};
use std::time::{SystemTime, UNIX_EPOCH};

/// Source of uniform random choices.
pub trait RandomSource {
    /// Returns a uniformly distributed index in `[0, upper)`.
    ///
    /// Returns 0 when `upper` is 0 or 1.
    fn index(&mut self, upper: usize) -> usize;

    /// Returns a fair coin flip.
    fn coin_flip(&mut self) -> bool {
        self.index(2) == 1
    }

    /// Number of draws served by a fallback generator so far.
    ///
    /// Sources without a fallback always report 0.
    fn fallback_draws(&self) -> usize {
        0
    }
}

/// Primary generator with a non-cryptographic fallback.
#[derive(Debug, Clone)]
pub struct FallbackRandom<P, F> {
    primary: P,
    fallback: F,
    fallback_draws: usize,
}

/// Operating system CSPRNG, falling back to a clock-seeded [`StdRng`].
pub type SystemRandom = FallbackRandom<OsRng, StdRng>;

/// Deterministic provider built from a seed.
pub type SeededRandom = FallbackRandom<StdRng, StdRng>;

impl SystemRandom {
    /// Creates the default randomness provider.
    pub fn new() -> Self {
        let seed = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map_or(0, |d| d.as_nanos() as u64);
        FallbackRandom::with_generators(OsRng, StdRng::seed_from_u64(seed))
    }
}

impl Default for SystemRandom {
    fn default() -> Self {
        Self::new()
    }
}

impl SeededRandom {
    /// Creates a deterministic provider for reproducible output.
    pub fn seeded(seed: u64) -> Self {
        FallbackRandom::with_generators(
            StdRng::seed_from_u64(seed),
            StdRng::seed_from_u64(seed.wrapping_add(1)),
        )
    }
}

impl<P: RngCore, F: RngCore> FallbackRandom<P, F> {
    /// Creates a provider from explicit primary and fallback generators.
    pub fn with_generators(primary: P, fallback: F) -> Self {
        Self {
            primary,
            fallback,
            fallback_draws: 0,
        }
    }

    // Rejection sampling keeps the result unbiased for any `upper`.
    fn try_primary(&mut self, upper: u64) -> Result<u64, rand::Error> {
        let zone = u64::MAX - (u64::MAX % upper);
        loop {
            let mut buf = [0u8; 8];
            self.primary.try_fill_bytes(&mut buf)?;
            let value = u64::from_le_bytes(buf);
            if value < zone {
                return Ok(value % upper);
            }
        }
    }
}

impl<P: RngCore, F: RngCore> RandomSource for FallbackRandom<P, F> {
    fn index(&mut self, upper: usize) -> usize {
        if upper <= 1 {
            return 0;
        }

        match self.try_primary(upper as u64) {
            Ok(value) => value as usize,
            Err(_) => {
                self.fallback_draws += 1;
                self.fallback.gen_range(0..upper)
            }
        }
    }

    fn fallback_draws(&self) -> usize {
        self.fallback_draws
    }
}
