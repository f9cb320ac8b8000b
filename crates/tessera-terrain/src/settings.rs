//! Map generation settings: the immutable snapshot a generation run consumes.

use glam::DVec2;
use serde::{Deserialize, Serialize};

use crate::curve::HeightCurve;
use crate::error::ConfigurationError;

/// Coherent-noise basis used by each octave of the noise field.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub enum NoiseKind {
    /// Classic gradient noise.
    Perlin,
    /// Simplex noise.
    Simplex,
    /// OpenSimplex noise.
    OpenSimplex,
    /// A field that returns the same value everywhere. Produces a degenerate
    /// (flat) terrain; mostly useful for testing and as a baseline.
    Constant(f64),
}

/// Fractal noise configuration.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct NoiseSettings {
    /// Noise basis.
    pub kind: NoiseKind,
    /// Seed for the noise basis and the per-octave offsets.
    pub seed: u64,
    /// Number of octaves to sum. Must be at least 1.
    pub octaves: u32,
    /// Amplitude multiplier between successive octaves.
    pub persistence: f64,
    /// Frequency multiplier between successive octaves.
    pub lacunarity: f64,
    /// World units per noise unit at the first octave. Larger values give
    /// broader features.
    pub scale: f64,
    /// Translation applied to sample positions, in noise units.
    pub offset: DVec2,
}

impl Default for NoiseSettings {
    fn default() -> Self {
        Self {
            kind: NoiseKind::Perlin,
            seed: 0,
            octaves: 4,
            persistence: 0.5,
            lacunarity: 2.0,
            scale: 50.0,
            offset: DVec2::ZERO,
        }
    }
}

/// Linear RGBA color with components in `[0, 1]`.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Color {
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub a: f32,
}

impl Color {
    /// Opaque color from RGB components.
    pub const fn rgb(r: f32, g: f32, b: f32) -> Self {
        Self { r, g, b, a: 1.0 }
    }

    pub const WHITE: Self = Self::rgb(1.0, 1.0, 1.0);
    pub const BLACK: Self = Self::rgb(0.0, 0.0, 0.0);

    /// Componentwise linear interpolation towards `other`.
    pub fn lerp(self, other: Self, t: f32) -> Self {
        Self {
            r: self.r + (other.r - self.r) * t,
            g: self.g + (other.g - self.g) * t,
            b: self.b + (other.b - self.b) * t,
            a: self.a + (other.a - self.a) * t,
        }
    }

    /// Quantize to 8-bit RGBA, clamping each component.
    pub fn to_rgba8(self) -> [u8; 4] {
        let q = |c: f32| (c.clamp(0.0, 1.0) * 255.0).round() as u8;
        [q(self.r), q(self.g), q(self.b), q(self.a)]
    }
}

/// A height band used for texturing and area statistics.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Layer {
    /// Normalized start height in `[0, 1]`, relative to the final map range.
    pub height: f32,
    /// Base color of the band.
    pub color: Color,
    /// Width of the blend into this band, as a fraction of the map range.
    pub blend_strength: f32,
}

impl Layer {
    pub const fn new(height: f32, color: Color, blend_strength: f32) -> Self {
        Self {
            height,
            color,
            blend_strength,
        }
    }
}

/// Complete, validated description of one generation run.
///
/// The core never mutates a `MapSettings`; any reconciliation between the
/// curve and the layers must happen before it is handed over.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MapSettings {
    /// Quads per chunk side. Each chunk stores `chunk_side_length + 1`
    /// samples per side so neighbours share edge vertices.
    pub chunk_side_length: u32,
    /// Chunks per map side.
    pub map_dimension: u32,
    /// Fractal noise parameters.
    pub noise: NoiseSettings,
    /// World units per unit of curve response.
    pub height_scale: f32,
    /// Reshapes normalized noise before scaling.
    pub height_curve: HeightCurve,
    /// Height bands sorted by ascending, unique start height.
    pub layers: Vec<Layer>,
}

impl Default for MapSettings {
    fn default() -> Self {
        Self {
            chunk_side_length: 64,
            map_dimension: 3,
            noise: NoiseSettings::default(),
            height_scale: 20.0,
            height_curve: HeightCurve::linear(),
            layers: vec![
                Layer::new(0.0, Color::rgb(0.13, 0.30, 0.62), 0.0),
                Layer::new(0.3, Color::rgb(0.86, 0.80, 0.55), 0.05),
                Layer::new(0.4, Color::rgb(0.25, 0.55, 0.20), 0.1),
                Layer::new(0.7, Color::rgb(0.45, 0.40, 0.35), 0.1),
                Layer::new(0.9, Color::rgb(0.95, 0.95, 0.97), 0.05),
            ],
        }
    }
}

impl MapSettings {
    /// Number of samples per chunk side (`chunk_side_length + 1`).
    pub fn samples_per_side(&self) -> usize {
        self.chunk_side_length as usize + 1
    }

    /// Total number of chunks (`map_dimension²`).
    pub fn chunk_count(&self) -> usize {
        let d = self.map_dimension as usize;
        d * d
    }

    /// World units spanned by the full map along one axis.
    pub fn map_side_length(&self) -> u32 {
        self.map_dimension * self.chunk_side_length
    }

    /// Check every invariant generation relies on.
    ///
    /// # Errors
    ///
    /// Returns the first [`ConfigurationError`] found.
    pub fn validate(&self) -> Result<(), ConfigurationError> {
        if self.map_dimension == 0 {
            return Err(ConfigurationError::ZeroMapDimension);
        }
        if self.chunk_side_length == 0 {
            return Err(ConfigurationError::ZeroChunkSideLength);
        }
        if self
            .map_dimension
            .checked_mul(self.chunk_side_length)
            .is_none()
        {
            return Err(ConfigurationError::MapTooLarge {
                map_dimension: self.map_dimension,
                chunk_side_length: self.chunk_side_length,
            });
        }

        let noise = &self.noise;
        if noise.octaves == 0 {
            return Err(ConfigurationError::ZeroOctaves);
        }
        if !noise.scale.is_finite() || noise.scale <= 0.0 {
            return Err(ConfigurationError::InvalidNoiseScale(noise.scale));
        }
        let finite_fields = [
            ("noise persistence", noise.persistence),
            ("noise lacunarity", noise.lacunarity),
            ("noise offset x", noise.offset.x),
            ("noise offset y", noise.offset.y),
            ("height scale", self.height_scale as f64),
        ];
        for (field, value) in finite_fields {
            if !value.is_finite() {
                return Err(ConfigurationError::NonFinite { field, value });
            }
        }
        if let NoiseKind::Constant(value) = noise.kind
            && !value.is_finite()
        {
            return Err(ConfigurationError::NonFinite {
                field: "constant noise value",
                value,
            });
        }

        self.height_curve.validate()?;
        self.validate_layers()
    }

    fn validate_layers(&self) -> Result<(), ConfigurationError> {
        for (index, layer) in self.layers.iter().enumerate() {
            if !(0.0..=1.0).contains(&layer.height) {
                return Err(ConfigurationError::LayerHeightOutOfRange {
                    index,
                    height: layer.height,
                });
            }
            if !(0.0..=1.0).contains(&layer.blend_strength) {
                return Err(ConfigurationError::BlendStrengthOutOfRange {
                    index,
                    blend: layer.blend_strength,
                });
            }
        }
        for (i, pair) in self.layers.windows(2).enumerate() {
            let (prev, next) = (pair[0].height, pair[1].height);
            if next == prev {
                return Err(ConfigurationError::DuplicateLayerHeight {
                    first: i,
                    second: i + 1,
                    height: next,
                });
            }
            if next < prev {
                return Err(ConfigurationError::UnsortedLayers {
                    index: i + 1,
                    height: next,
                });
            }
        }
        Ok(())
    }
}
