//! Chunk grid layout centered on the world origin.

use glam::DVec2;

use crate::settings::MapSettings;

/// Integer grid index of a chunk, `0..map_dimension` on each axis.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ChunkCoord {
    pub x: u32,
    pub y: u32,
}

impl ChunkCoord {
    pub const fn new(x: u32, y: u32) -> Self {
        Self { x, y }
    }
}

/// Positions of a `map_dimension × map_dimension` grid of square chunks.
///
/// The grid is centered: the map spans `[-L/2, L/2]` on both axes with
/// `L = map_dimension · chunk_side_length`, and for an odd dimension the
/// middle chunk is centered on the origin.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ChunkLayout {
    map_dimension: u32,
    chunk_side_length: u32,
}

impl ChunkLayout {
    pub fn new(map_dimension: u32, chunk_side_length: u32) -> Self {
        Self {
            map_dimension,
            chunk_side_length,
        }
    }

    pub fn from_settings(settings: &MapSettings) -> Self {
        Self::new(settings.map_dimension, settings.chunk_side_length)
    }

    pub fn map_dimension(&self) -> u32 {
        self.map_dimension
    }

    pub fn chunk_side_length(&self) -> u32 {
        self.chunk_side_length
    }

    /// World units spanned by the whole map along one axis.
    pub fn map_side_length(&self) -> u32 {
        self.map_dimension * self.chunk_side_length
    }

    /// Number of chunks in the layout.
    pub fn len(&self) -> usize {
        let d = self.map_dimension as usize;
        d * d
    }

    /// Returns `true` if the layout has no chunks.
    pub fn is_empty(&self) -> bool {
        self.map_dimension == 0
    }

    /// All chunk coordinates in row-major order: `x` outer, `y` inner.
    pub fn coords(&self) -> impl Iterator<Item = ChunkCoord> + '_ {
        let d = self.map_dimension;
        (0..d).flat_map(move |x| (0..d).map(move |y| ChunkCoord::new(x, y)))
    }

    /// Flat index of `coord` in [`ChunkLayout::coords`] order.
    pub fn index_of(&self, coord: ChunkCoord) -> usize {
        coord.x as usize * self.map_dimension as usize + coord.y as usize
    }

    /// World position of the chunk's minimum corner (its `(0, 0)` sample).
    ///
    /// Computed from integers so that neighbouring chunks' shared edges land
    /// on exactly the same coordinates.
    pub fn chunk_origin(&self, coord: ChunkCoord) -> DVec2 {
        let s = self.chunk_side_length as f64;
        let half_map = self.map_side_length() as f64 / 2.0;
        DVec2::new(coord.x as f64 * s - half_map, coord.y as f64 * s - half_map)
    }

    /// World position of the chunk's center:
    /// `(coord − (map_dimension − 1) / 2) · chunk_side_length`.
    pub fn chunk_center(&self, coord: ChunkCoord) -> DVec2 {
        self.chunk_origin(coord) + DVec2::splat(self.chunk_side_length as f64 / 2.0)
    }

    /// Chunk coordinates paired with their world centers, in
    /// [`ChunkLayout::coords`] order.
    pub fn positions(&self) -> Vec<(ChunkCoord, DVec2)> {
        self.coords().map(|c| (c, self.chunk_center(c))).collect()
    }

    /// Minimum and maximum world corner of the full map.
    pub fn world_bounds(&self) -> (DVec2, DVec2) {
        let half = self.map_side_length() as f64 / 2.0;
        (DVec2::splat(-half), DVec2::splat(half))
    }

    /// Pixel offset of the chunk's tile in the composite map image.
    pub fn tile_offset(&self, coord: ChunkCoord) -> (usize, usize) {
        let s = self.chunk_side_length as usize;
        (coord.x as usize * s, coord.y as usize * s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_single_chunk_sits_at_origin() {
        let layout = ChunkLayout::new(1, 4);
        let positions = layout.positions();
        assert_eq!(positions.len(), 1);
        assert_eq!(positions[0], (ChunkCoord::new(0, 0), DVec2::ZERO));
        assert_eq!(layout.chunk_origin(ChunkCoord::new(0, 0)), DVec2::splat(-2.0));
    }

    #[test]
    fn test_odd_dimension_has_center_chunk() {
        let layout = ChunkLayout::new(3, 10);
        assert_eq!(layout.chunk_center(ChunkCoord::new(1, 1)), DVec2::ZERO);
        assert_eq!(
            layout.chunk_center(ChunkCoord::new(0, 2)),
            DVec2::new(-10.0, 10.0)
        );
    }

    #[test]
    fn test_positions_symmetric_about_origin() {
        for (d, s) in [(1, 4), (2, 8), (3, 5), (4, 16), (5, 7)] {
            let layout = ChunkLayout::new(d, s);
            let positions = layout.positions();
            assert_eq!(positions.len(), (d * d) as usize);

            let sum = positions.iter().fold(DVec2::ZERO, |acc, (_, p)| acc + *p);
            assert_eq!(sum, DVec2::ZERO, "d={d} s={s}: centers must sum to zero");

            for (coord, center) in &positions {
                let mirror = ChunkCoord::new(d - 1 - coord.x, d - 1 - coord.y);
                assert_eq!(
                    layout.chunk_center(mirror),
                    -*center,
                    "d={d} s={s}: chunk {coord:?} has no mirror image"
                );
            }
        }
    }

    #[test]
    fn test_chunks_tile_without_gaps() {
        let layout = ChunkLayout::new(4, 6);
        let s = 6.0;
        for coord in layout.coords() {
            let origin = layout.chunk_origin(coord);
            if coord.x + 1 < 4 {
                let right = layout.chunk_origin(ChunkCoord::new(coord.x + 1, coord.y));
                assert_eq!(origin.x + s, right.x, "Right edge must meet neighbour");
                assert_eq!(origin.y, right.y);
            }
            if coord.y + 1 < 4 {
                let down = layout.chunk_origin(ChunkCoord::new(coord.x, coord.y + 1));
                assert_eq!(origin.y + s, down.y, "Bottom edge must meet neighbour");
            }
        }

        let (min, max) = layout.world_bounds();
        assert_eq!(layout.chunk_origin(ChunkCoord::new(0, 0)), min);
        assert_eq!(layout.chunk_origin(ChunkCoord::new(3, 3)) + DVec2::splat(s), max);
        assert_eq!(max.x - min.x, layout.map_side_length() as f64);
    }

    #[test]
    fn test_order_is_x_outer_y_inner() {
        let layout = ChunkLayout::new(2, 1);
        let coords: Vec<_> = layout.coords().collect();
        assert_eq!(
            coords,
            vec![
                ChunkCoord::new(0, 0),
                ChunkCoord::new(0, 1),
                ChunkCoord::new(1, 0),
                ChunkCoord::new(1, 1),
            ]
        );
        for (i, c) in coords.iter().enumerate() {
            assert_eq!(layout.index_of(*c), i);
        }
    }

    #[test]
    fn test_tile_offsets() {
        let layout = ChunkLayout::new(3, 8);
        assert_eq!(layout.tile_offset(ChunkCoord::new(0, 0)), (0, 0));
        assert_eq!(layout.tile_offset(ChunkCoord::new(2, 1)), (16, 8));
    }
}
