//! Terrain material parameters for an external rendering pipeline.
//!
//! Only the values are computed here; binding them to a shader is the
//! renderer's job.

use crate::range::MinMax;
use crate::settings::{Color, MapSettings};

/// Uniform values consumed by the layered terrain shader.
#[derive(Clone, Debug, PartialEq)]
pub struct MaterialParams {
    pub layer_count: usize,
    pub colors: Vec<Color>,
    /// Normalized start height per layer.
    pub start_heights: Vec<f32>,
    pub blend_strengths: Vec<f32>,
    /// Lowest terrain height in world units, including the terrain origin.
    pub min_height: f32,
    /// Highest terrain height in world units, including the terrain origin.
    pub max_height: f32,
}

impl MaterialParams {
    /// Collect shader parameters for a map whose heights span `map` and whose
    /// terrain object sits at vertical offset `origin_height`.
    pub fn new(settings: &MapSettings, map: MinMax, origin_height: f32) -> Self {
        let layers = &settings.layers;
        Self {
            layer_count: layers.len(),
            colors: layers.iter().map(|l| l.color).collect(),
            start_heights: layers.iter().map(|l| l.height).collect(),
            blend_strengths: layers.iter().map(|l| l.blend_strength).collect(),
            min_height: map.min + origin_height,
            max_height: map.max + origin_height,
        }
    }
}
