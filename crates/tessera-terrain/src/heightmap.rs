//! Multi-octave fractal noise field sampled in world space.
//!
//! Composites several octaves of coherent noise into one scalar field. All
//! sampling happens at absolute world coordinates, so two chunks that share an
//! edge produce bit-identical values along it.

use glam::DVec2;
use noise::{Constant, NoiseFn, OpenSimplex, Perlin, Simplex};
use rand::Rng;

use crate::grid::SquareGrid;
use crate::range::MinMax;
use crate::seed::{OCTAVE_OFFSET_STREAM, stream_rng};
use crate::settings::{NoiseKind, NoiseSettings};

/// Half-extent of the random per-octave offsets, in noise units.
const OCTAVE_OFFSET_RANGE: f64 = 10_000.0;

type NoiseSource = Box<dyn NoiseFn<f64, 2> + Send + Sync>;

/// One chunk's raw noise samples and their range.
#[derive(Clone, Debug)]
pub struct NoiseGrid {
    pub values: SquareGrid,
    pub range: MinMax,
}

/// Fractal noise field: `Σ persistence^i · noise(p · lacunarity^i + offset_i)`.
pub struct NoiseField {
    source: NoiseSource,
    octave_offsets: Vec<DVec2>,
    settings: NoiseSettings,
}

impl NoiseField {
    /// Create a field from noise settings. Per-octave offsets are drawn from a
    /// seeded RNG so the field is fully determined by `settings`.
    pub fn new(settings: &NoiseSettings) -> Self {
        let basis_seed = settings.seed as u32;
        let source: NoiseSource = match settings.kind {
            NoiseKind::Perlin => Box::new(Perlin::new(basis_seed)),
            NoiseKind::Simplex => Box::new(Simplex::new(basis_seed)),
            NoiseKind::OpenSimplex => Box::new(OpenSimplex::new(basis_seed)),
            NoiseKind::Constant(value) => Box::new(Constant::new(value)),
        };

        let mut rng = stream_rng(settings.seed, OCTAVE_OFFSET_STREAM);
        let octave_offsets = (0..settings.octaves)
            .map(|_| {
                DVec2::new(
                    rng.random_range(-OCTAVE_OFFSET_RANGE..OCTAVE_OFFSET_RANGE),
                    rng.random_range(-OCTAVE_OFFSET_RANGE..OCTAVE_OFFSET_RANGE),
                )
            })
            .collect();

        Self {
            source,
            octave_offsets,
            settings: settings.clone(),
        }
    }

    /// Sample the field at a world-space position.
    pub fn sample(&self, world: DVec2) -> f64 {
        let base = world / self.settings.scale + self.settings.offset;
        let mut total = 0.0;
        let mut frequency = 1.0;
        let mut amplitude = 1.0;

        for octave_offset in &self.octave_offsets {
            let p = base * frequency + *octave_offset;
            total += self.source.get([p.x, p.y]) * amplitude;

            frequency *= self.settings.lacunarity;
            amplitude *= self.settings.persistence;
        }

        total
    }

    /// Sample a `samples_per_side²` grid whose `(0, 0)` sample sits at world
    /// position `origin`, with one world unit between samples.
    pub fn sample_grid(&self, origin: DVec2, samples_per_side: usize) -> NoiseGrid {
        let values = SquareGrid::from_fn(samples_per_side, |x, y| {
            let world = origin + DVec2::new(x as f64, y as f64);
            self.sample(world) as f32
        });
        let range = values.min_max();
        NoiseGrid { values, range }
    }

    /// Sum of all octave amplitudes; the noise magnitude never exceeds this
    /// times the basis's own bound.
    pub fn max_amplitude(&self) -> f64 {
        let mut sum = 0.0;
        let mut amp = 1.0;
        for _ in 0..self.settings.octaves {
            sum += amp;
            amp *= self.settings.persistence;
        }
        sum
    }

    /// Return a reference to the current parameters.
    pub fn settings(&self) -> &NoiseSettings {
        &self.settings
    }
}
