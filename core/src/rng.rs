//! Deterministic random number generation for visual effects.
//!
//! RULE: Nothing in the core may call any platform RNG.
//! All randomness flows through EffectRng instances derived from a
//! master seed supplied by the host.
//!
//! Each effect gets its own RNG stream, seeded deterministically from
//! (master_seed XOR stream_index). This means:
//!   - Adding a new effect never changes existing effects' streams.
//!   - Each stream is fully reproducible in isolation.

use rand::SeedableRng;
use rand_pcg::Pcg64Mcg;

/// Stable stream assignments for effect RNGs.
/// NEVER reorder or remove entries — only append.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[repr(u64)]
pub enum EffectStream {
    TrophyBurst = 0,
    // Add new effect streams here — append only.
}

/// A deterministic RNG for a single visual effect.
pub struct EffectRng {
    inner: Pcg64Mcg,
}

impl EffectRng {
    /// Derive an effect RNG from the master seed and a stable stream.
    pub fn new(master_seed: u64, stream: EffectStream) -> Self {
        let derived_seed =
            master_seed ^ (stream as u64).wrapping_mul(0x9e37_79b9_7f4a_7c15);
        Self {
            inner: Pcg64Mcg::seed_from_u64(derived_seed),
        }
    }

    /// Roll a float in [0.0, 1.0).
    pub fn next_f32(&mut self) -> f32 {
        use rand::RngCore;
        let bits = self.inner.next_u32();
        (bits >> 8) as f32 * (1.0 / (1u32 << 24) as f32)
    }

    /// Roll a float in [lo, hi).
    pub fn range_f32(&mut self, lo: f32, hi: f32) -> f32 {
        lo + (hi - lo) * self.next_f32()
    }

    /// Roll a u32 in [0, n).
    pub fn next_u32_below(&mut self, n: u32) -> u32 {
        use rand::RngCore;
        assert!(n > 0, "n must be > 0");
        self.inner.next_u32() % n
    }

    /// Bernoulli trial: returns true with probability p.
    pub fn chance(&mut self, p: f32) -> bool {
        self.next_f32() < p
    }
}
