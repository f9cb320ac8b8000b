//! A single terrain chunk: raw noise grid plus derived height grid.

use glam::DVec2;

use crate::grid::SquareGrid;
use crate::heightmap::NoiseField;
use crate::layout::{ChunkCoord, ChunkLayout};
use crate::range::MinMax;

/// One square tile of the terrain.
///
/// Holds `(chunk_side_length + 1)²` samples so that neighbours share their
/// edge vertices. Heights are all zero and `local_height` is empty until the
/// normalizer's remap pass has run.
#[derive(Clone, Debug)]
pub struct TerrainChunk {
    coord: ChunkCoord,
    center: DVec2,
    noise: SquareGrid,
    heights: SquareGrid,
    local_noise: MinMax,
    local_height: MinMax,
}

impl TerrainChunk {
    /// Sample the noise field over the chunk at `coord`.
    pub fn generate(coord: ChunkCoord, layout: &ChunkLayout, field: &NoiseField) -> Self {
        let samples = layout.chunk_side_length() as usize + 1;
        let grid = field.sample_grid(layout.chunk_origin(coord), samples);
        Self::from_noise(coord, layout.chunk_center(coord), grid.values)
    }

    /// Wrap an already-sampled noise grid.
    pub fn from_noise(coord: ChunkCoord, center: DVec2, noise: SquareGrid) -> Self {
        let local_noise = noise.min_max();
        let heights = SquareGrid::new(noise.size());
        Self {
            coord,
            center,
            noise,
            heights,
            local_noise,
            local_height: MinMax::EMPTY,
        }
    }

    pub fn coord(&self) -> ChunkCoord {
        self.coord
    }

    /// World position of the chunk's center.
    pub fn center(&self) -> DVec2 {
        self.center
    }

    /// Samples per side (`chunk_side_length + 1`).
    pub fn size(&self) -> usize {
        self.noise.size()
    }

    /// Raw noise samples.
    pub fn noise(&self) -> &SquareGrid {
        &self.noise
    }

    /// Final world-unit heights.
    pub fn heights(&self) -> &SquareGrid {
        &self.heights
    }

    /// Range of this chunk's raw noise.
    pub fn local_noise(&self) -> MinMax {
        self.local_noise
    }

    /// Range of this chunk's final heights.
    pub fn local_height(&self) -> MinMax {
        self.local_height
    }

    /// Replace the height grid with `f(raw)` for every noise sample and
    /// return the resulting height range.
    pub(crate) fn remap_heights(&mut self, f: impl FnMut(f32) -> f32) -> MinMax {
        self.heights = self.noise.map(f);
        self.local_height = self.heights.min_max();
        self.local_height
    }
}
