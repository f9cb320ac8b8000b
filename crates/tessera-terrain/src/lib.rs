//! Chunked procedural terrain: fractal noise heightmaps, global height
//! normalization, layer coloring, composite map images, and Poisson-disc prop
//! scattering.

mod chunk;
mod curve;
mod error;
mod generator;
mod grid;
mod heightmap;
mod histogram;
mod layout;
mod material;
mod normalizer;
mod parallel;
mod range;
mod settings;

pub mod map_image;
pub mod poisson;
pub mod seed;

pub use chunk::TerrainChunk;
pub use curve::{CurveKey, HeightCurve};
pub use error::{ConfigurationError, ExportError, TerrainError};
pub use generator::{GeneratedTerrain, TerrainGenerator, generate_terrain};
pub use grid::SquareGrid;
pub use heightmap::{NoiseField, NoiseGrid};
pub use histogram::{LayerHistogram, layer_start_heights};
pub use layout::{ChunkCoord, ChunkLayout};
pub use map_image::{
    ElevationPalette, Grayscale, Grayscale16, LayerShading, MapImage, PixelPolicy, RawHeight,
};
pub use material::MaterialParams;
pub use normalizer::{GlobalRanges, HeightNormalizer, collect_noise_range};
pub use parallel::{default_thread_count, run_parallel};
pub use poisson::{PoissonDiscSampler, SampleBudget, ScatterSettings, scatter_props};
pub use range::MinMax;
pub use settings::{Color, Layer, MapSettings, NoiseKind, NoiseSettings};
