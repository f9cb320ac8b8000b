//! Composite map image: stitches every chunk's height grid into one image.
//!
//! The image is `map_side_length × map_side_length` pixels. Chunk `(cx, cy)`
//! writes its samples `0..chunk_side_length` on each axis at pixel offset
//! `(cx, cy) · chunk_side_length`; its last row and column duplicate the
//! neighbour's first ones and are dropped. Pixel `x` grows with world `x` and
//! pixel row `y` grows with world `y`.

mod export;
mod image;
mod policy;

pub use self::export::PngPixel;
pub use self::image::MapImage;
pub use self::policy::{
    ElevationPalette, Grayscale, Grayscale16, LayerShading, PixelPolicy, RawHeight,
};

use crate::chunk::TerrainChunk;
use crate::layout::ChunkLayout;

/// Compose all chunks' heights into one image using `policy` for pixels.
///
/// Chunks whose coordinates fall outside `layout` are ignored.
pub fn compose<P: PixelPolicy>(
    chunks: &[TerrainChunk],
    layout: &ChunkLayout,
    policy: &P,
) -> MapImage<P::Pixel> {
    let side = layout.map_side_length();
    let tile = layout.chunk_side_length() as usize;
    let mut image = MapImage::new(side, side);

    for chunk in chunks {
        let coord = chunk.coord();
        if coord.x >= layout.map_dimension() || coord.y >= layout.map_dimension() {
            continue;
        }
        let (ox, oy) = layout.tile_offset(coord);
        let heights = chunk.heights();
        let span = tile.min(heights.size());
        for y in 0..span {
            for x in 0..span {
                let pixel = policy.pixel(heights.get(x, y));
                image.set_pixel((ox + x) as u32, (oy + y) as u32, pixel);
            }
        }
    }

    image
}
