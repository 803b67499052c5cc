//! Deterministic random number generation.
//!
//! ## Key Features
//!
//! - **Deterministic**: Same seed produces identical piece batches
//! - **Owned**: One stream per session, advanced only by engine operations
//!
//! Piece sampling is the only source of randomness in the engine, so a
//! session constructed from a seed replays identically under the same
//! sequence of placements.

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

/// Deterministic RNG owned by a game session.
///
/// Uses ChaCha8 for speed while maintaining high-quality randomness.
#[derive(Clone, Debug)]
pub struct GameRng {
    inner: ChaCha8Rng,
}

impl GameRng {
    /// Create a new RNG with the given seed.
    #[must_use]
    pub fn new(seed: u64) -> Self {
        Self {
            inner: ChaCha8Rng::seed_from_u64(seed),
        }
    }

    /// Generate a random usize in the given range.
    pub fn gen_range_usize(&mut self, range: std::ops::Range<usize>) -> usize {
        self.inner.gen_range(range)
    }

    /// Shuffle a slice in place.
    pub fn shuffle<T>(&mut self, slice: &mut [T]) {
        use rand::seq::SliceRandom;
        slice.shuffle(&mut self.inner);
    }

    /// Shuffle only the first `count` positions of a slice (partial
    /// Fisher-Yates). Cheaper than a full shuffle when sampling a small
    /// prefix, and terminates unconditionally unlike rejection sampling.
    pub fn shuffle_prefix<T>(&mut self, slice: &mut [T], count: usize) {
        let n = slice.len();
        for i in 0..count.min(n) {
            let j = self.gen_range_usize(i..n);
            slice.swap(i, j);
        }
    }
}
