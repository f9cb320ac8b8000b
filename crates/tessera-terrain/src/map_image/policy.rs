//! Pixel policies: how a world-unit height becomes a pixel.
//!
//! The composer only places samples; what a pixel looks like is decided by a
//! [`PixelPolicy`] supplied by the caller.

use crate::range::MinMax;
use crate::settings::{Color, Layer};

/// Small epsilon added to the lower blend bound so a zero blend strength
/// still produces a hard step instead of a division by zero.
const BLEND_EPSILON: f32 = 1e-4;

/// Converts one height sample into one pixel.
pub trait PixelPolicy {
    type Pixel: Copy + Default;

    fn pixel(&self, height: f32) -> Self::Pixel;
}

/// Keeps the raw world-unit height.
#[derive(Clone, Copy, Debug, Default)]
pub struct RawHeight;

impl PixelPolicy for RawHeight {
    type Pixel = f32;

    #[inline]
    fn pixel(&self, height: f32) -> f32 {
        height
    }
}

/// 8-bit grayscale: black at `range.min`, white at `range.max`.
#[derive(Clone, Copy, Debug)]
pub struct Grayscale {
    pub range: MinMax,
}

impl PixelPolicy for Grayscale {
    type Pixel = u8;

    fn pixel(&self, height: f32) -> u8 {
        (self.range.inverse_lerp(height) * 255.0).round() as u8
    }
}

/// 16-bit grayscale, for exports that need more precision than 8 bits.
#[derive(Clone, Copy, Debug)]
pub struct Grayscale16 {
    pub range: MinMax,
}

impl PixelPolicy for Grayscale16 {
    type Pixel = u16;

    fn pixel(&self, height: f32) -> u16 {
        (self.range.inverse_lerp(height) * 65535.0).round() as u16
    }
}

/// Colors each sample by blending the layer colors, the way the terrain
/// shader does: every layer whose start height lies below the sample paints
/// over the previous ones, fading in across its blend strength.
#[derive(Clone, Debug)]
pub struct LayerShading {
    layers: Vec<Layer>,
    range: MinMax,
}

impl LayerShading {
    pub fn new(layers: &[Layer], range: MinMax) -> Self {
        Self {
            layers: layers.to_vec(),
            range,
        }
    }

    /// Blended color at a normalized height in `[0, 1]`.
    pub fn color_at(&self, height_percent: f32) -> Color {
        self.layers.iter().fold(Color::BLACK, |color, layer| {
            let half_blend = layer.blend_strength / 2.0;
            let lower = -half_blend - BLEND_EPSILON;
            let strength =
                ((height_percent - layer.height - lower) / (half_blend - lower)).clamp(0.0, 1.0);
            color.lerp(layer.color, strength)
        })
    }
}

impl PixelPolicy for LayerShading {
    type Pixel = [u8; 4];

    fn pixel(&self, height: f32) -> [u8; 4] {
        self.color_at(self.range.inverse_lerp(height)).to_rgba8()
    }
}

/// Map a normalized height `[0, 1]` to a fixed elevation palette.
///
/// Color bands: deep water → shallow water → beach → lowlands → mountains →
/// snow. Useful when no layers are configured.
#[derive(Clone, Copy, Debug)]
pub struct ElevationPalette {
    pub range: MinMax,
}

impl PixelPolicy for ElevationPalette {
    type Pixel = [u8; 4];

    fn pixel(&self, height: f32) -> [u8; 4] {
        let normalized = self.range.inverse_lerp(height);
        let (r, g, b) = if normalized < 0.2 {
            (0, 0, 128)
        } else if normalized < 0.3 {
            (30, 80, 200)
        } else if normalized < 0.33 {
            (220, 200, 130)
        } else if normalized < 0.55 {
            let t = (normalized - 0.33) / 0.22;
            (
                (30.0 + t * 80.0) as u8,
                (160.0 - t * 40.0) as u8,
                (30.0 + t * 20.0) as u8,
            )
        } else if normalized < 0.75 {
            let t = (normalized - 0.55) / 0.2;
            (
                (110.0 + t * 40.0) as u8,
                (120.0 - t * 50.0) as u8,
                (50.0 + t * 20.0) as u8,
            )
        } else {
            let t = ((normalized - 0.75) / 0.25).min(1.0);
            let base = (150.0 + t * 105.0) as u8;
            (base, base, base)
        };
        [r, g, b, 255]
    }
}
