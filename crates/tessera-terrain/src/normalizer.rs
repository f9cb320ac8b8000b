//! Two-pass height normalization across independently generated chunks.
//!
//! Pass 1 folds every chunk's local noise range into one global range. Pass 2
//! remaps each raw sample into `[0, 1]` against that global range, shapes it
//! with the height curve, and scales it into world units. The final map range
//! is scanned from the actual remapped samples, so non-monotonic curves are
//! handled correctly.

use serde::{Deserialize, Serialize};

use crate::chunk::TerrainChunk;
use crate::curve::HeightCurve;
use crate::range::MinMax;

/// Global ranges derived from one generation run.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct GlobalRanges {
    /// Raw noise range over all chunks.
    pub noise: MinMax,
    /// Final height range over all chunks, in world units.
    pub map: MinMax,
}

/// Pass 1: fold all chunks' local noise ranges into one global range.
pub fn collect_noise_range<'a>(chunks: impl IntoIterator<Item = &'a TerrainChunk>) -> MinMax {
    chunks
        .into_iter()
        .map(TerrainChunk::local_noise)
        .fold(MinMax::EMPTY, MinMax::merge)
}

/// Maps raw noise to world-unit heights against a fixed global noise range.
#[derive(Clone, Copy, Debug)]
pub struct HeightNormalizer<'a> {
    curve: &'a HeightCurve,
    height_scale: f32,
}

impl<'a> HeightNormalizer<'a> {
    pub fn new(curve: &'a HeightCurve, height_scale: f32) -> Self {
        Self {
            curve,
            height_scale,
        }
    }

    /// Final height of one raw sample.
    ///
    /// A degenerate noise range maps every sample to position `0`, giving the
    /// constant `curve(0) · height_scale` instead of dividing by zero.
    #[inline]
    pub fn height(&self, noise: MinMax, raw: f32) -> f32 {
        let t = noise.inverse_lerp(raw);
        self.curve.evaluate(t) * self.height_scale
    }

    /// Pass 2 for one chunk: rewrite its heights and return their range.
    pub fn remap_chunk(&self, chunk: &mut TerrainChunk, noise: MinMax) -> MinMax {
        chunk.remap_heights(|raw| self.height(noise, raw))
    }

    /// Run both passes sequentially over `chunks`.
    pub fn normalize(&self, chunks: &mut [TerrainChunk]) -> GlobalRanges {
        let noise = collect_noise_range(chunks.iter());
        let map = chunks
            .iter_mut()
            .map(|chunk| self.remap_chunk(chunk, noise))
            .fold(MinMax::EMPTY, MinMax::merge);
        GlobalRanges { noise, map }
    }
}
