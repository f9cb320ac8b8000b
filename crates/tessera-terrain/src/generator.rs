//! Terrain generation pipeline.
//!
//! `ChunkLayout → N × (NoiseField → TerrainChunk) → HeightNormalizer →
//! MapImageComposer`. Chunk sampling and the remap pass run on the worker
//! pool; the global noise fold between them is the barrier that makes the
//! result independent of scheduling.

use std::time::Instant;

use glam::DVec3;
use tracing::{debug, info, warn};

use crate::chunk::TerrainChunk;
use crate::error::TerrainError;
use crate::heightmap::NoiseField;
use crate::histogram::LayerHistogram;
use crate::layout::{ChunkCoord, ChunkLayout};
use crate::map_image::{self, LayerShading, MapImage, PixelPolicy, RawHeight};
use crate::material::MaterialParams;
use crate::normalizer::{GlobalRanges, HeightNormalizer, collect_noise_range};
use crate::parallel::{default_thread_count, run_parallel};
use crate::poisson::{ScatterSettings, scatter_props};
use crate::range::MinMax;
use crate::settings::MapSettings;

/// The output of one successful generation run.
#[derive(Clone, Debug)]
pub struct GeneratedTerrain {
    settings: MapSettings,
    layout: ChunkLayout,
    chunks: Vec<TerrainChunk>,
    ranges: GlobalRanges,
    height_image: MapImage<f32>,
}

impl GeneratedTerrain {
    pub fn settings(&self) -> &MapSettings {
        &self.settings
    }

    pub fn layout(&self) -> &ChunkLayout {
        &self.layout
    }

    /// Chunks in [`ChunkLayout::coords`] order.
    pub fn chunks(&self) -> &[TerrainChunk] {
        &self.chunks
    }

    pub fn chunk(&self, coord: ChunkCoord) -> Option<&TerrainChunk> {
        if coord.x >= self.layout.map_dimension() || coord.y >= self.layout.map_dimension() {
            return None;
        }
        self.chunks.get(self.layout.index_of(coord))
    }

    pub fn ranges(&self) -> GlobalRanges {
        self.ranges
    }

    /// Composite image of raw world-unit heights.
    pub fn height_image(&self) -> &MapImage<f32> {
        &self.height_image
    }

    /// Re-render the composite heights with another pixel policy.
    pub fn render<P: PixelPolicy>(&self, policy: &P) -> MapImage<P::Pixel> {
        self.height_image.map(|h| policy.pixel(h))
    }

    /// Layer-colored shading over the final map range.
    pub fn layer_shading(&self) -> LayerShading {
        LayerShading::new(&self.settings.layers, self.ranges.map)
    }

    /// Area fraction of each layer.
    pub fn layer_histogram(&self) -> LayerHistogram {
        LayerHistogram::compute(
            self.chunks.iter().map(TerrainChunk::heights),
            self.ranges.map,
            &self.settings.layers,
        )
    }

    /// Shader parameters for a terrain object placed at `origin_height`.
    pub fn material_params(&self, origin_height: f32) -> MaterialParams {
        MaterialParams::new(&self.settings, self.ranges.map, origin_height)
    }

    /// Scatter props across the map at `height_scale` elevation.
    pub fn scatter_props(&self, scatter: &ScatterSettings, place: impl FnMut(DVec3)) -> usize {
        scatter_props(
            self.layout.map_side_length() as f64,
            self.settings.height_scale as f64,
            scatter,
            place,
        )
    }
}

/// Run the full pipeline for `settings` on `threads` workers.
///
/// # Errors
///
/// Returns [`TerrainError::Configuration`] if the settings are invalid, or a
/// worker error if the pool fails.
pub fn generate_terrain(
    settings: &MapSettings,
    threads: usize,
) -> Result<GeneratedTerrain, TerrainError> {
    settings.validate()?;
    let start = Instant::now();

    let layout = ChunkLayout::from_settings(settings);
    let field = NoiseField::new(&settings.noise);
    let coords: Vec<ChunkCoord> = layout.coords().collect();

    let chunks = run_parallel(threads, coords, |coord| {
        TerrainChunk::generate(coord, &layout, &field)
    })?;
    debug!(chunks = chunks.len(), "sampled chunk noise");

    let noise = collect_noise_range(&chunks);
    if noise.is_degenerate() {
        warn!(value = noise.min, "noise field is constant, terrain will be flat");
    }

    let normalizer = HeightNormalizer::new(&settings.height_curve, settings.height_scale);
    let remapped = run_parallel(threads, chunks, |mut chunk| {
        let range = normalizer.remap_chunk(&mut chunk, noise);
        (chunk, range)
    })?;
    let map = remapped
        .iter()
        .map(|(_, range)| *range)
        .fold(MinMax::EMPTY, MinMax::merge);
    let chunks: Vec<TerrainChunk> = remapped.into_iter().map(|(chunk, _)| chunk).collect();
    let ranges = GlobalRanges { noise, map };

    let height_image = map_image::compose(&chunks, &layout, &RawHeight);

    info!(
        chunks = chunks.len(),
        map_side = layout.map_side_length(),
        noise_min = noise.min,
        noise_max = noise.max,
        height_min = map.min,
        height_max = map.max,
        elapsed_ms = start.elapsed().as_millis() as u64,
        "terrain generated"
    );

    Ok(GeneratedTerrain {
        settings: settings.clone(),
        layout,
        chunks,
        ranges,
        height_image,
    })
}

/// Owns the current terrain and replaces it on every run.
///
/// `generate` tears the previous terrain down before doing anything else, so a
/// failed run leaves the generator empty rather than holding a mix of old and
/// new state.
pub struct TerrainGenerator {
    threads: usize,
    terrain: Option<GeneratedTerrain>,
}

impl TerrainGenerator {
    /// Create a generator that uses `threads` workers (at least one).
    pub fn new(threads: usize) -> Self {
        Self {
            threads: threads.max(1),
            terrain: None,
        }
    }

    /// Create a generator with one worker per logical CPU.
    pub fn with_defaults() -> Self {
        Self::new(default_thread_count())
    }

    pub fn threads(&self) -> usize {
        self.threads
    }

    /// Clear any previous terrain, then generate a new one from `settings`.
    pub fn generate(&mut self, settings: &MapSettings) -> Result<&GeneratedTerrain, TerrainError> {
        self.clear();
        let terrain = generate_terrain(settings, self.threads)?;
        Ok(self.terrain.insert(terrain))
    }

    /// Drop the current terrain.
    pub fn clear(&mut self) {
        if self.terrain.take().is_some() {
            debug!("cleared previous terrain");
        }
    }

    /// The terrain from the last successful run, if any.
    pub fn terrain(&self) -> Option<&GeneratedTerrain> {
        self.terrain.as_ref()
    }

    /// Returns `true` if a terrain is currently installed.
    pub fn is_generated(&self) -> bool {
        self.terrain.is_some()
    }
}

impl Default for TerrainGenerator {
    fn default() -> Self {
        Self::with_defaults()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::curve::{CurveKey, HeightCurve};
    use crate::map_image::Grayscale;
    use crate::settings::{Color, Layer, NoiseKind, NoiseSettings};

    fn small_settings(seed: u64) -> MapSettings {
        MapSettings {
            chunk_side_length: 8,
            map_dimension: 3,
            noise: NoiseSettings {
                seed,
                scale: 12.0,
                ..Default::default()
            },
            height_scale: 30.0,
            ..Default::default()
        }
    }

    #[test]
    fn test_single_chunk_example() {
        let settings = MapSettings {
            chunk_side_length: 4,
            map_dimension: 1,
            ..Default::default()
        };
        let terrain = generate_terrain(&settings, 2).unwrap();
        assert_eq!(terrain.chunks().len(), 1);
        assert_eq!(terrain.chunks()[0].center(), glam::DVec2::ZERO);
        assert_eq!(terrain.height_image().dimensions(), (4, 4));
    }

    #[test]
    fn test_heights_within_map_range_and_bounds_attained() {
        let terrain = generate_terrain(&small_settings(9), 4).unwrap();
        let map = terrain.ranges().map;
        let mut hit_min = false;
        let mut hit_max = false;
        for chunk in terrain.chunks() {
            for &h in chunk.heights().values() {
                assert!(map.contains(h), "Height {h} outside {map:?}");
                hit_min |= h == map.min;
                hit_max |= h == map.max;
            }
        }
        assert!(hit_min && hit_max, "Map bounds must be attained by samples");
    }

    #[test]
    fn test_linear_curve_spans_full_height_scale() {
        let terrain = generate_terrain(&small_settings(4), 4).unwrap();
        let map = terrain.ranges().map;
        assert_eq!(map.min, 0.0);
        assert_eq!(map.max, 30.0);
    }

    #[test]
    fn test_generation_is_idempotent() {
        let settings = small_settings(1234);
        let a = generate_terrain(&settings, 1).unwrap();
        let b = generate_terrain(&settings, 8).unwrap();
        assert_eq!(a.ranges(), b.ranges());
        assert_eq!(a.height_image(), b.height_image());
    }

    #[test]
    fn test_shared_edges_match_across_chunks() {
        let terrain = generate_terrain(&small_settings(5), 3).unwrap();
        let left = terrain.chunk(ChunkCoord::new(0, 1)).unwrap();
        let right = terrain.chunk(ChunkCoord::new(1, 1)).unwrap();
        for i in 0..9 {
            assert_eq!(left.heights().get(8, i), right.heights().get(0, i));
        }
        assert!(terrain.chunk(ChunkCoord::new(3, 0)).is_none());
    }

    #[test]
    fn test_constant_noise_is_flat_with_one_full_layer() {
        let settings = MapSettings {
            noise: NoiseSettings {
                kind: NoiseKind::Constant(0.4),
                octaves: 1,
                ..Default::default()
            },
            chunk_side_length: 4,
            map_dimension: 2,
            ..Default::default()
        };
        let terrain = generate_terrain(&settings, 2).unwrap();
        let ranges = terrain.ranges();
        assert!(ranges.noise.is_degenerate());
        assert_eq!(ranges.map.min, ranges.map.max);

        let hist = terrain.layer_histogram();
        let full: Vec<_> = hist.fractions().iter().filter(|&&f| f == 1.0).collect();
        assert_eq!(full.len(), 1, "Exactly one layer holds every sample");
        let sum: f32 = hist.fractions().iter().sum();
        assert!((sum - 1.0).abs() < 1e-6);
    }

    #[test]
    fn test_histogram_sums_to_one() {
        let terrain = generate_terrain(&small_settings(77), 4).unwrap();
        let hist = terrain.layer_histogram();
        assert!(!hist.is_empty());
        let sum: f32 = hist.fractions().iter().sum();
        assert!((sum - 1.0).abs() < 1e-5, "Fractions sum to {sum}");
    }

    #[test]
    fn test_non_monotonic_curve_range_scanned_from_samples() {
        let mut settings = small_settings(21);
        settings.height_curve = HeightCurve::new(vec![
            CurveKey::new(0.0, 0.5),
            CurveKey::new(0.5, 1.0),
            CurveKey::new(1.0, 0.0),
        ]);
        let terrain = generate_terrain(&settings, 2).unwrap();
        let map = terrain.ranges().map;
        // Both endpoints of the curve map below the true maximum.
        assert!(map.max > 0.5 * 30.0);
        assert!(map.max <= 30.0);
        assert_eq!(map.min, 0.0, "The noise maximum maps to curve(1) = 0");
    }

    #[test]
    fn test_invalid_settings_clear_previous_terrain() {
        let mut generator = TerrainGenerator::new(2);
        generator.generate(&small_settings(1)).unwrap();
        assert!(generator.is_generated());

        let bad = MapSettings {
            layers: vec![
                Layer::new(0.5, Color::WHITE, 0.0),
                Layer::new(0.5, Color::BLACK, 0.0),
            ],
            ..small_settings(1)
        };
        let err = generator.generate(&bad).unwrap_err();
        assert!(matches!(err, TerrainError::Configuration(_)));
        assert!(!generator.is_generated(), "Failed run must leave no terrain");
    }

    #[test]
    fn test_regenerate_replaces_terrain() {
        let mut generator = TerrainGenerator::new(2);
        let first = generator.generate(&small_settings(1)).unwrap().ranges();
        let second = generator.generate(&small_settings(2)).unwrap().ranges();
        assert_ne!(first, second);
        assert_eq!(generator.terrain().unwrap().ranges(), second);

        generator.clear();
        assert!(generator.terrain().is_none());
    }

    #[test]
    fn test_render_with_policies() {
        let terrain = generate_terrain(&small_settings(8), 2).unwrap();
        let gray = terrain.render(&Grayscale {
            range: terrain.ranges().map,
        });
        assert_eq!(gray.dimensions(), (24, 24));
        let first = gray.get_pixel(0, 0);
        assert!(gray.pixels.iter().any(|&p| p != first), "Grayscale must vary");

        let colored = terrain.render(&terrain.layer_shading());
        assert!(colored.unique_color_count() > 1);
    }

    #[test]
    fn test_material_params_use_map_range() {
        let terrain = generate_terrain(&small_settings(3), 2).unwrap();
        let params = terrain.material_params(10.0);
        assert_eq!(params.min_height, terrain.ranges().map.min + 10.0);
        assert_eq!(params.max_height, terrain.ranges().map.max + 10.0);
    }

    #[test]
    fn test_scatter_over_map_side() {
        let terrain = generate_terrain(&small_settings(3), 2).unwrap();
        let mut positions = Vec::new();
        let count = terrain.scatter_props(&ScatterSettings::default(), |p| positions.push(p));
        assert_eq!(count, positions.len());
        assert!(count > 0);
        for p in positions {
            assert_eq!(p.y, 30.0);
            assert!(p.x <= 24.0 && p.z <= 24.0);
        }
    }
}
