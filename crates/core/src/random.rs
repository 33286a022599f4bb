//! Random-integer source used by palette generation.
//!
//! Generation only needs uniform integers over inclusive ranges, so the
//! capability is a one-method trait. [`Xorshift64`] is the seedable
//! implementation: the same seed always yields the same palettes on every
//! platform (pure integer arithmetic).

use serde::{Deserialize, Serialize};

/// Uniform random integers over inclusive ranges.
pub trait RandomSource {
    /// Returns an integer in `[min, max]`, both ends inclusive.
    ///
    /// A degenerate call with `min > max` returns `min`.
    fn between(&mut self, min: i32, max: i32) -> i32;
}

impl<R: RandomSource + ?Sized> RandomSource for &mut R {
    fn between(&mut self, min: i32, max: i32) -> i32 {
        (**self).between(min, max)
    }
}

/// Xorshift64 deterministic PRNG with shifts (13, 7, 17).
///
/// Seed 0 is a fixed point of xorshift, so it is replaced with a non-zero
/// fallback.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Xorshift64 {
    state: u64,
}

impl Xorshift64 {
    const FALLBACK_SEED: u64 = 0x5EED_DEAD_BEEF_CAFE;

    pub fn new(seed: u64) -> Self {
        Self {
            state: if seed == 0 { Self::FALLBACK_SEED } else { seed },
        }
    }

    /// Advances the state and returns the next 64-bit value.
    pub fn next_u64(&mut self) -> u64 {
        self.state ^= self.state << 13;
        self.state ^= self.state >> 7;
        self.state ^= self.state << 17;
        self.state
    }
}

impl RandomSource for Xorshift64 {
    // Modulo reduction; the bias is negligible for spans this small.
    fn between(&mut self, min: i32, max: i32) -> i32 {
        if min > max {
            return min;
        }
        let span = (i64::from(max) - i64::from(min) + 1) as u64;
        let offset = (self.next_u64() % span) as i64;
        (i64::from(min) + offset) as i32
    }
}
