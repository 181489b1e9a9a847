// easing/curve.rs
//
// Keyframed easing curve evaluated with cubic Hermite segments.
// Used as a data-driven alternative to the named eases.

use serde::{Deserialize, Serialize};

use crate::error::{Result, TweenError};

/// A single key of an [`AnimationCurve`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Keyframe {
    pub time: f32,
    pub value: f32,
    /// Incoming slope. A non-finite tangent makes the segment stepped.
    #[serde(default)]
    pub in_tangent: f32,
    /// Outgoing slope.
    #[serde(default)]
    pub out_tangent: f32,
}

impl Keyframe {
    pub fn new(time: f32, value: f32) -> Self {
        Self { time, value, in_tangent: 0.0, out_tangent: 0.0 }
    }

    pub fn with_tangents(mut self, in_tangent: f32, out_tangent: f32) -> Self {
        self.in_tangent = in_tangent;
        self.out_tangent = out_tangent;
        self
    }
}

/// Keyframed curve mapping normalized time to a progress value.
///
/// Always holds at least one key; keys are kept sorted by time.
/// Outside the key range the curve clamps to the first/last value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "Vec<Keyframe>", into = "Vec<Keyframe>")]
pub struct AnimationCurve {
    keys: Vec<Keyframe>,
}

impl AnimationCurve {
    /// Build a curve from keys. Fails with [`TweenError::EmptyCurve`] when `keys` is empty.
    pub fn new(mut keys: Vec<Keyframe>) -> Result<Self> {
        if keys.is_empty() {
            return Err(TweenError::EmptyCurve);
        }
        keys.sort_by(|a, b| a.time.total_cmp(&b.time));
        Ok(Self { keys })
    }

    /// Straight line between two keys.
    pub fn linear(time_start: f32, value_start: f32, time_end: f32, value_end: f32) -> Self {
        let span = time_end - time_start;
        let slope = if span.abs() > f32::EPSILON {
            (value_end - value_start) / span
        } else {
            0.0
        };
        Self::from_two(
            Keyframe::new(time_start, value_start).with_tangents(slope, slope),
            Keyframe::new(time_end, value_end).with_tangents(slope, slope),
        )
    }

    /// Flat tangents at both ends: slow start and slow end.
    pub fn ease_in_out(time_start: f32, value_start: f32, time_end: f32, value_end: f32) -> Self {
        Self::from_two(
            Keyframe::new(time_start, value_start),
            Keyframe::new(time_end, value_end),
        )
    }

    fn from_two(a: Keyframe, b: Keyframe) -> Self {
        let mut keys = vec![a, b];
        keys.sort_by(|a, b| a.time.total_cmp(&b.time));
        Self { keys }
    }

    pub fn keys(&self) -> &[Keyframe] {
        &self.keys
    }

    /// Evaluate the curve at `time`.
    pub fn evaluate(&self, time: f32) -> f32 {
        let first = self.keys[0];
        let last = self.keys[self.keys.len() - 1];
        // NaN compares false against every key.
        if time.is_nan() || time <= first.time {
            return first.value;
        }
        if time >= last.time {
            return last.value;
        }

        // First key strictly after `time`; guaranteed to exist and be > 0 here.
        let next = self.keys.partition_point(|k| k.time <= time);
        hermite(self.keys[next - 1], self.keys[next], time)
    }
}

fn hermite(k0: Keyframe, k1: Keyframe, time: f32) -> f32 {
    let span = k1.time - k0.time;
    if span <= f32::EPSILON {
        return k1.value;
    }
    if !k0.out_tangent.is_finite() || !k1.in_tangent.is_finite() {
        return k0.value;
    }

    let s = (time - k0.time) / span;
    let s2 = s * s;
    let s3 = s2 * s;
    let m0 = k0.out_tangent * span;
    let m1 = k1.in_tangent * span;

    (2.0 * s3 - 3.0 * s2 + 1.0) * k0.value
        + (s3 - 2.0 * s2 + s) * m0
        + (-2.0 * s3 + 3.0 * s2) * k1.value
        + (s3 - s2) * m1
}

impl TryFrom<Vec<Keyframe>> for AnimationCurve {
    type Error = TweenError;

    fn try_from(keys: Vec<Keyframe>) -> Result<Self> {
        Self::new(keys)
    }
}

impl From<AnimationCurve> for Vec<Keyframe> {
    fn from(curve: AnimationCurve) -> Self {
        curve.keys
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_curve_is_rejected() {
        assert_eq!(AnimationCurve::new(Vec::new()), Err(TweenError::EmptyCurve));
    }

    #[test]
    fn linear_curve_is_straight() {
        let curve = AnimationCurve::linear(0.0, 0.0, 1.0, 1.0);
        for i in 0..=10 {
            let t = i as f32 / 10.0;
            assert!((curve.evaluate(t) - t).abs() < 1e-4, "t={} got {}", t, curve.evaluate(t));
        }
    }

    #[test]
    fn ease_in_out_is_symmetric() {
        let curve = AnimationCurve::ease_in_out(0.0, 0.0, 1.0, 1.0);
        assert!((curve.evaluate(0.5) - 0.5).abs() < 1e-4);
        assert!(curve.evaluate(0.25) < 0.25);
        assert!(curve.evaluate(0.75) > 0.75);
    }

    #[test]
    fn clamps_outside_key_range() {
        let curve = AnimationCurve::linear(0.2, 1.0, 0.8, 3.0);
        assert_eq!(curve.evaluate(0.0), 1.0);
        assert_eq!(curve.evaluate(1.0), 3.0);
    }

    #[test]
    fn nan_time_yields_first_key() {
        let curve = AnimationCurve::linear(0.0, 0.0, 1.0, 1.0);
        assert_eq!(curve.evaluate(f32::NAN), 0.0);
        let curve = AnimationCurve::ease_in_out(0.2, 4.0, 0.8, 6.0);
        assert_eq!(curve.evaluate(f32::NAN), 4.0);
    }

    #[test]
    fn keys_are_sorted() {
        let curve = AnimationCurve::new(vec![Keyframe::new(1.0, 1.0), Keyframe::new(0.0, 0.0)]).unwrap();
        assert_eq!(curve.keys()[0].time, 0.0);
    }

    #[test]
    fn stepped_tangent_holds_value() {
        let curve = AnimationCurve::new(vec![
            Keyframe::new(0.0, 0.0).with_tangents(0.0, f32::INFINITY),
            Keyframe::new(1.0, 1.0),
        ])
        .unwrap();
        assert_eq!(curve.evaluate(0.9), 0.0);
    }

    #[test]
    fn deserialize_rejects_empty_keys() {
        assert!(serde_json::from_str::<AnimationCurve>("[]").is_err());
        let curve: AnimationCurve =
            serde_json::from_str(r#"[{ "time": 0.0, "value": 0.0 }, { "time": 1.0, "value": 2.0 }]"#).unwrap();
        assert_eq!(curve.keys().len(), 2);
    }
}
