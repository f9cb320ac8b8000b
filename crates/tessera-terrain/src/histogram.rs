//! Fraction of terrain samples falling into each height layer.

use crate::grid::SquareGrid;
use crate::range::MinMax;
use crate::settings::Layer;

/// Per-layer sample counts and their fractions.
#[derive(Clone, Debug, PartialEq)]
pub struct LayerHistogram {
    start_heights: Vec<f32>,
    counts: Vec<u64>,
    fractions: Vec<f32>,
    unclassified: u64,
}

/// Absolute start height of each layer within the map range:
/// `layer.height · (map.max − map.min) + map.min`.
pub fn layer_start_heights(layers: &[Layer], map: MinMax) -> Vec<f32> {
    layers
        .iter()
        .map(|layer| layer.height * (map.max - map.min) + map.min)
        .collect()
}

impl LayerHistogram {
    /// Classify every sample of every grid into the highest layer whose start
    /// height it reaches.
    ///
    /// Samples below the first layer are counted as unclassified and do not
    /// contribute to the fractions. If nothing is classified, every fraction
    /// is `0.0`; check [`LayerHistogram::is_empty`].
    pub fn compute<'a>(
        grids: impl IntoIterator<Item = &'a SquareGrid>,
        map: MinMax,
        layers: &[Layer],
    ) -> Self {
        let start_heights = layer_start_heights(layers, map);
        let mut counts = vec![0u64; layers.len()];
        let mut unclassified = 0u64;

        for grid in grids {
            for &value in grid.values() {
                // Number of boundaries at or below `value`; layers are sorted.
                let above = start_heights.partition_point(|&start| start <= value);
                match above.checked_sub(1) {
                    Some(layer) => counts[layer] += 1,
                    None => unclassified += 1,
                }
            }
        }

        let total: u64 = counts.iter().sum();
        let fractions = if total == 0 {
            vec![0.0; counts.len()]
        } else {
            counts
                .iter()
                .map(|&c| (c as f64 / total as f64) as f32)
                .collect()
        };

        Self {
            start_heights,
            counts,
            fractions,
            unclassified,
        }
    }

    /// Fraction of classified samples in each layer.
    pub fn fractions(&self) -> &[f32] {
        &self.fractions
    }

    /// Raw sample count per layer.
    pub fn counts(&self) -> &[u64] {
        &self.counts
    }

    /// Absolute start height of each layer.
    pub fn start_heights(&self) -> &[f32] {
        &self.start_heights
    }

    /// Number of classified samples.
    pub fn total_samples(&self) -> u64 {
        self.counts.iter().sum()
    }

    /// Samples below the first layer's start height.
    pub fn unclassified(&self) -> u64 {
        self.unclassified
    }

    /// Returns `true` if no sample was classified; fractions are then all zero.
    pub fn is_empty(&self) -> bool {
        self.total_samples() == 0
    }
}
