//! Square sample grid stored row-major (`y` outer, `x` inner).

use crate::range::MinMax;

/// `size × size` grid of `f32` samples.
#[derive(Clone, Debug, PartialEq)]
pub struct SquareGrid {
    size: usize,
    values: Vec<f32>,
}

impl SquareGrid {
    /// A grid filled with `0.0`.
    pub fn new(size: usize) -> Self {
        Self {
            size,
            values: vec![0.0; size * size],
        }
    }

    /// Build a grid by evaluating `f(x, y)` at every cell.
    pub fn from_fn(size: usize, mut f: impl FnMut(usize, usize) -> f32) -> Self {
        let mut values = Vec::with_capacity(size * size);
        for y in 0..size {
            for x in 0..size {
                values.push(f(x, y));
            }
        }
        Self { size, values }
    }

    /// Samples per side.
    pub fn size(&self) -> usize {
        self.size
    }

    /// Sample at `(x, y)`.
    ///
    /// # Panics
    ///
    /// Panics if `x` or `y` is `>= size`.
    #[inline]
    pub fn get(&self, x: usize, y: usize) -> f32 {
        self.values[y * self.size + x]
    }

    /// Overwrite the sample at `(x, y)`.
    ///
    /// # Panics
    ///
    /// Panics if `x` or `y` is `>= size`.
    #[inline]
    pub fn set(&mut self, x: usize, y: usize, value: f32) {
        self.values[y * self.size + x] = value;
    }

    /// All samples, row-major.
    pub fn values(&self) -> &[f32] {
        &self.values
    }

    /// Min and max over all samples.
    pub fn min_max(&self) -> MinMax {
        MinMax::from_values(self.values.iter().copied())
    }

    /// Apply `f` to every sample, producing a new grid of the same size.
    pub fn map(&self, f: impl FnMut(f32) -> f32) -> Self {
        Self {
            size: self.size,
            values: self.values.iter().copied().map(f).collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_fn_is_row_major() {
        let grid = SquareGrid::from_fn(3, |x, y| (y * 10 + x) as f32);
        assert_eq!(grid.get(2, 0), 2.0);
        assert_eq!(grid.get(0, 2), 20.0);
        assert_eq!(grid.values()[5], 12.0);
    }

    #[test]
    fn test_set_and_min_max() {
        let mut grid = SquareGrid::new(2);
        grid.set(1, 1, -3.0);
        grid.set(0, 1, 4.0);
        assert_eq!(grid.min_max(), MinMax::new(-3.0, 4.0));
    }

    #[test]
    fn test_map_preserves_size() {
        let grid = SquareGrid::from_fn(4, |x, _| x as f32);
        let doubled = grid.map(|v| v * 2.0);
        assert_eq!(doubled.size(), 4);
        assert_eq!(doubled.get(3, 2), 6.0);
    }
}
