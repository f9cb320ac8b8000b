//! Deterministic seeded generation utilities.
//!
//! Derives independent RNG streams from one user seed and provides
//! deterministic trigonometry via `libm`, so that noise offsets and sample
//! placement are identical across threads and platforms.

use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};

use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

/// Stream used for the per-octave noise offsets.
pub const OCTAVE_OFFSET_STREAM: u64 = 0x6f63_7461_7665;

/// Stream used by the Poisson-disc sampler.
pub const SCATTER_STREAM: u64 = 0x7363_6174_7465;

/// Derive a u64 seed for one purpose (`stream`) from the user seed.
///
/// Uses SipHash (via std's `DefaultHasher`) to combine the two values into a
/// well-distributed u64.
pub fn derive_seed(seed: u64, stream: u64) -> u64 {
    let mut hasher = DefaultHasher::new();
    seed.hash(&mut hasher);
    stream.hash(&mut hasher);
    hasher.finish()
}

/// Derive a deterministic RNG for a given stream.
///
/// The returned RNG yields the same sequence for the same `(seed, stream)`
/// pair regardless of thread or platform.
pub fn stream_rng(seed: u64, stream: u64) -> ChaCha8Rng {
    ChaCha8Rng::seed_from_u64(derive_seed(seed, stream))
}

/// Deterministic sine using libm (not platform libc).
#[inline]
pub fn det_sin(x: f64) -> f64 {
    libm::sin(x)
}

/// Deterministic cosine using libm.
#[inline]
pub fn det_cos(x: f64) -> f64 {
    libm::cos(x)
}
