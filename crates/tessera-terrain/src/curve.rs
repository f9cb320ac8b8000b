//! Height-response curve: reshapes normalized noise into terrain elevation.
//!
//! The curve is authored externally as a list of control keys. Between keys the
//! value is linearly interpolated; outside the key range it is clamped to the
//! nearest key. The curve need not be monotonic.

use serde::{Deserialize, Serialize};

use crate::error::ConfigurationError;

/// A single control point of a [`HeightCurve`].
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct CurveKey {
    /// Normalized input position, usually in `[0, 1]`.
    pub time: f32,
    /// Response weight at `time`.
    pub value: f32,
}

impl CurveKey {
    /// Create a key at `time` with the given `value`.
    pub const fn new(time: f32, value: f32) -> Self {
        Self { time, value }
    }
}

/// Sampled mapping from normalized noise `[0, 1]` to a response weight.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct HeightCurve {
    keys: Vec<CurveKey>,
}

impl HeightCurve {
    /// Build a curve from keys. Keys are expected sorted by `time`; see
    /// [`HeightCurve::validate`].
    pub fn new(keys: Vec<CurveKey>) -> Self {
        Self { keys }
    }

    /// The identity curve `(0, 0) -> (1, 1)`.
    pub fn linear() -> Self {
        Self::new(vec![CurveKey::new(0.0, 0.0), CurveKey::new(1.0, 1.0)])
    }

    /// Control keys in time order.
    pub fn keys(&self) -> &[CurveKey] {
        &self.keys
    }

    /// Check that the curve has keys, that they are finite, and that their
    /// times are strictly increasing.
    pub fn validate(&self) -> Result<(), ConfigurationError> {
        if self.keys.is_empty() {
            return Err(ConfigurationError::EmptyHeightCurve);
        }
        for key in &self.keys {
            for (field, v) in [("curve key time", key.time), ("curve key value", key.value)] {
                if !v.is_finite() {
                    return Err(ConfigurationError::NonFinite {
                        field,
                        value: v as f64,
                    });
                }
            }
        }
        for (index, pair) in self.keys.windows(2).enumerate() {
            if pair[1].time <= pair[0].time {
                return Err(ConfigurationError::UnsortedCurveKeys {
                    index: index + 1,
                    time: pair[1].time,
                });
            }
        }
        Ok(())
    }

    /// Evaluate the curve at `t`.
    ///
    /// Returns `0.0` for an empty curve.
    pub fn evaluate(&self, t: f32) -> f32 {
        let (Some(first), Some(last)) = (self.keys.first(), self.keys.last()) else {
            return 0.0;
        };
        if t <= first.time {
            return first.value;
        }
        if t >= last.time {
            return last.value;
        }

        // First key strictly after t; the bounds checks above keep it in 1..len.
        let upper = self.keys.partition_point(|k| k.time <= t);
        let a = self.keys[upper - 1];
        let b = self.keys[upper];
        let span = b.time - a.time;
        if span <= 0.0 {
            return b.value;
        }
        let f = (t - a.time) / span;
        a.value + (b.value - a.value) * f
    }
}

impl Default for HeightCurve {
    fn default() -> Self {
        Self::linear()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPSILON: f32 = 1e-6;

    #[test]
    fn test_linear_curve_is_identity() {
        let curve = HeightCurve::linear();
        for i in 0..=10 {
            let t = i as f32 / 10.0;
            assert!(
                (curve.evaluate(t) - t).abs() < EPSILON,
                "Linear curve should map {t} to itself, got {}",
                curve.evaluate(t)
            );
        }
    }

    #[test]
    fn test_clamps_outside_key_range() {
        let curve = HeightCurve::new(vec![CurveKey::new(0.2, 0.1), CurveKey::new(0.8, 0.9)]);
        assert_eq!(curve.evaluate(-1.0), 0.1);
        assert_eq!(curve.evaluate(0.0), 0.1);
        assert_eq!(curve.evaluate(1.0), 0.9);
        assert_eq!(curve.evaluate(5.0), 0.9);
    }

    #[test]
    fn test_interpolates_between_keys() {
        let curve = HeightCurve::new(vec![
            CurveKey::new(0.0, 0.0),
            CurveKey::new(0.5, 0.0),
            CurveKey::new(1.0, 1.0),
        ]);
        assert!((curve.evaluate(0.25) - 0.0).abs() < EPSILON);
        assert!((curve.evaluate(0.75) - 0.5).abs() < EPSILON);
    }

    #[test]
    fn test_non_monotonic_curve_evaluates_peak() {
        let curve = HeightCurve::new(vec![
            CurveKey::new(0.0, 0.0),
            CurveKey::new(0.5, 1.0),
            CurveKey::new(1.0, 0.2),
        ]);
        assert!((curve.evaluate(0.5) - 1.0).abs() < EPSILON);
        assert!(curve.evaluate(1.0) < curve.evaluate(0.5));
    }

    #[test]
    fn test_single_key_is_constant() {
        let curve = HeightCurve::new(vec![CurveKey::new(0.5, 0.3)]);
        assert_eq!(curve.evaluate(0.0), 0.3);
        assert_eq!(curve.evaluate(0.5), 0.3);
        assert_eq!(curve.evaluate(1.0), 0.3);
    }

    #[test]
    fn test_validate_rejects_empty_and_unsorted() {
        assert_eq!(
            HeightCurve::new(Vec::new()).validate(),
            Err(ConfigurationError::EmptyHeightCurve)
        );

        let unsorted = HeightCurve::new(vec![CurveKey::new(0.5, 0.0), CurveKey::new(0.5, 1.0)]);
        assert!(matches!(
            unsorted.validate(),
            Err(ConfigurationError::UnsortedCurveKeys { index: 1, .. })
        ));

        let nan = HeightCurve::new(vec![CurveKey::new(0.0, f32::NAN)]);
        assert!(matches!(
            nan.validate(),
            Err(ConfigurationError::NonFinite { .. })
        ));
    }

    #[test]
    fn test_empty_curve_evaluates_to_zero() {
        assert_eq!(HeightCurve::new(Vec::new()).evaluate(0.7), 0.0);
    }
}
