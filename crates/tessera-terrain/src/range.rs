//! Running min/max accumulator shared by the normalizer, composer, and histogram.

use serde::{Deserialize, Serialize};

/// Closed value range `[min, max]`.
///
/// [`MinMax::EMPTY`] is the identity for [`MinMax::merge`] and
/// [`MinMax::include`]; a range that has seen no values stays empty.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct MinMax {
    pub min: f32,
    pub max: f32,
}

impl MinMax {
    /// The empty range (`min = +inf`, `max = -inf`).
    pub const EMPTY: Self = Self {
        min: f32::INFINITY,
        max: f32::NEG_INFINITY,
    };

    pub const fn new(min: f32, max: f32) -> Self {
        Self { min, max }
    }

    /// Range of all values yielded by `values`.
    pub fn from_values(values: impl IntoIterator<Item = f32>) -> Self {
        values.into_iter().fold(Self::EMPTY, Self::include)
    }

    /// Extend the range to contain `value`.
    #[must_use]
    pub fn include(self, value: f32) -> Self {
        Self {
            min: self.min.min(value),
            max: self.max.max(value),
        }
    }

    /// Smallest range containing both `self` and `other`.
    #[must_use]
    pub fn merge(self, other: Self) -> Self {
        Self {
            min: self.min.min(other.min),
            max: self.max.max(other.max),
        }
    }

    /// Returns `true` if no value has been included.
    pub fn is_empty(&self) -> bool {
        self.min > self.max
    }

    /// Returns `true` if the range is a single point (`min == max`).
    pub fn is_degenerate(&self) -> bool {
        self.min == self.max
    }

    /// `max - min`, or `0.0` for an empty range.
    pub fn range(&self) -> f32 {
        if self.is_empty() {
            0.0
        } else {
            self.max - self.min
        }
    }

    /// Returns `true` if `value` lies inside the closed range.
    pub fn contains(&self, value: f32) -> bool {
        value >= self.min && value <= self.max
    }

    /// Position of `value` in the range, clamped to `[0, 1]`.
    ///
    /// A degenerate or empty range maps every value to `0.0`.
    pub fn inverse_lerp(&self, value: f32) -> f32 {
        let span = self.max - self.min;
        if span.is_nan() || span <= 0.0 {
            return 0.0;
        }
        ((value - self.min) / span).clamp(0.0, 1.0)
    }

    /// Value at fraction `t` of the range.
    pub fn lerp(&self, t: f32) -> f32 {
        self.min + (self.max - self.min) * t
    }
}

impl Default for MinMax {
    fn default() -> Self {
        Self::EMPTY
    }
}
