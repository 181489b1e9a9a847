// easing/ease.rs
//
// Named easing functions. Pure math, no tween state.

use std::f32::consts::PI;

use serde::{Deserialize, Serialize};

/// Named easing curve.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Ease {
    /// Constant velocity (no easing).
    #[default]
    Linear,
    /// Smoothstep: slow start and end, gentler than quadratic.
    Smooth,
    /// Slow start.
    QuadIn,
    /// Slow end.
    QuadOut,
    /// Slow start and end.
    QuadInOut,
    CubicIn,
    CubicOut,
    CubicInOut,
    QuartIn,
    QuartOut,
    QuartInOut,
    QuintIn,
    QuintOut,
    QuintInOut,
    SineIn,
    SineOut,
    SineInOut,
    /// Exponential easing (dramatic).
    ExpoIn,
    ExpoOut,
    ExpoInOut,
    /// Exponential start, overshooting finish.
    ExpoInBackOut,
    CircIn,
    CircOut,
    CircInOut,
    /// Elastic spring.
    ElasticIn,
    ElasticOut,
    ElasticInOut,
    /// Overshoot then settle.
    BackIn,
    BackOut,
    BackInOut,
    /// Backs up first, exponential finish.
    BackInExpoOut,
    /// Backs up first, springy finish.
    BackInElasticOut,
    BounceIn,
    /// Bouncy finish.
    BounceOut,
    BounceInOut,
}

const BACK_C1: f32 = 1.70158;
const BACK_C2: f32 = BACK_C1 * 1.525;
const BACK_C3: f32 = BACK_C1 + 1.0;
const ELASTIC_C4: f32 = (2.0 * PI) / 3.0;
const ELASTIC_C5: f32 = (2.0 * PI) / 4.5;

impl Ease {
    /// Every named ease, in declaration order.
    pub const ALL: [Ease; 35] = [
        Ease::Linear,
        Ease::Smooth,
        Ease::QuadIn,
        Ease::QuadOut,
        Ease::QuadInOut,
        Ease::CubicIn,
        Ease::CubicOut,
        Ease::CubicInOut,
        Ease::QuartIn,
        Ease::QuartOut,
        Ease::QuartInOut,
        Ease::QuintIn,
        Ease::QuintOut,
        Ease::QuintInOut,
        Ease::SineIn,
        Ease::SineOut,
        Ease::SineInOut,
        Ease::ExpoIn,
        Ease::ExpoOut,
        Ease::ExpoInOut,
        Ease::ExpoInBackOut,
        Ease::CircIn,
        Ease::CircOut,
        Ease::CircInOut,
        Ease::ElasticIn,
        Ease::ElasticOut,
        Ease::ElasticInOut,
        Ease::BackIn,
        Ease::BackOut,
        Ease::BackInOut,
        Ease::BackInExpoOut,
        Ease::BackInElasticOut,
        Ease::BounceIn,
        Ease::BounceOut,
        Ease::BounceInOut,
    ];

    /// Apply the easing function to a normalized time value `t` in [0, 1].
    /// Returns the eased value, also typically in [0, 1] (but can overshoot for Back/Elastic).
    #[inline]
    pub fn apply(self, t: f32) -> f32 {
        let t = t.clamp(0.0, 1.0);
        match self {
            Ease::Linear => t,
            Ease::Smooth => t * t * (3.0 - 2.0 * t),

            // Quadratic
            Ease::QuadIn => t * t,
            Ease::QuadOut => 1.0 - (1.0 - t) * (1.0 - t),
            Ease::QuadInOut => {
                if t < 0.5 {
                    2.0 * t * t
                } else {
                    1.0 - (-2.0 * t + 2.0).powi(2) / 2.0
                }
            }

            // Cubic
            Ease::CubicIn => t * t * t,
            Ease::CubicOut => 1.0 - (1.0 - t).powi(3),
            Ease::CubicInOut => {
                if t < 0.5 {
                    4.0 * t * t * t
                } else {
                    1.0 - (-2.0 * t + 2.0).powi(3) / 2.0
                }
            }

            // Quartic
            Ease::QuartIn => t.powi(4),
            Ease::QuartOut => 1.0 - (1.0 - t).powi(4),
            Ease::QuartInOut => {
                if t < 0.5 {
                    8.0 * t.powi(4)
                } else {
                    1.0 - (-2.0 * t + 2.0).powi(4) / 2.0
                }
            }

            // Quintic
            Ease::QuintIn => t.powi(5),
            Ease::QuintOut => 1.0 - (1.0 - t).powi(5),
            Ease::QuintInOut => {
                if t < 0.5 {
                    16.0 * t.powi(5)
                } else {
                    1.0 - (-2.0 * t + 2.0).powi(5) / 2.0
                }
            }

            // Sine
            Ease::SineIn => 1.0 - (t * PI / 2.0).cos(),
            Ease::SineOut => (t * PI / 2.0).sin(),
            Ease::SineInOut => -((PI * t).cos() - 1.0) / 2.0,

            // Exponential
            Ease::ExpoIn => expo_in(t),
            Ease::ExpoOut => expo_out(t),
            Ease::ExpoInOut => {
                if t == 0.0 {
                    0.0
                } else if t == 1.0 {
                    1.0
                } else if t < 0.5 {
                    2.0_f32.powf(20.0 * t - 10.0) / 2.0
                } else {
                    (2.0 - 2.0_f32.powf(-20.0 * t + 10.0)) / 2.0
                }
            }
            Ease::ExpoInBackOut => split(t, expo_in, back_out),

            // Circular
            Ease::CircIn => 1.0 - (1.0 - t * t).sqrt(),
            Ease::CircOut => (1.0 - (t - 1.0).powi(2)).sqrt(),
            Ease::CircInOut => {
                if t < 0.5 {
                    (1.0 - (1.0 - (2.0 * t).powi(2)).sqrt()) / 2.0
                } else {
                    ((1.0 - (-2.0 * t + 2.0).powi(2)).sqrt() + 1.0) / 2.0
                }
            }

            // Elastic
            Ease::ElasticIn => {
                if t == 0.0 || t == 1.0 {
                    t
                } else {
                    -(2.0_f32.powf(10.0 * t - 10.0)) * ((t * 10.0 - 10.75) * ELASTIC_C4).sin()
                }
            }
            Ease::ElasticOut => elastic_out(t),
            Ease::ElasticInOut => {
                if t == 0.0 || t == 1.0 {
                    t
                } else if t < 0.5 {
                    -(2.0_f32.powf(20.0 * t - 10.0) * ((20.0 * t - 11.125) * ELASTIC_C5).sin()) / 2.0
                } else {
                    2.0_f32.powf(-20.0 * t + 10.0) * ((20.0 * t - 11.125) * ELASTIC_C5).sin() / 2.0
                        + 1.0
                }
            }

            // Back (overshoot)
            Ease::BackIn => back_in(t),
            Ease::BackOut => back_out(t),
            Ease::BackInOut => {
                if t < 0.5 {
                    (2.0 * t).powi(2) * ((BACK_C2 + 1.0) * 2.0 * t - BACK_C2) / 2.0
                } else {
                    ((2.0 * t - 2.0).powi(2) * ((BACK_C2 + 1.0) * (t * 2.0 - 2.0) + BACK_C2) + 2.0)
                        / 2.0
                }
            }
            Ease::BackInExpoOut => split(t, back_in, expo_out),
            Ease::BackInElasticOut => split(t, back_in, elastic_out),

            // Bounce
            Ease::BounceIn => 1.0 - bounce_out(1.0 - t),
            Ease::BounceOut => bounce_out(t),
            Ease::BounceInOut => {
                if t < 0.5 {
                    (1.0 - bounce_out(1.0 - 2.0 * t)) / 2.0
                } else {
                    (1.0 + bounce_out(2.0 * t - 1.0)) / 2.0
                }
            }
        }
    }

    /// Interpolate from `a` to `b` with this ease.
    #[inline]
    pub fn evaluate(self, a: f32, b: f32, t: f32) -> f32 {
        lerp(a, b, self.apply(t))
    }
}

/// First half uses `first`, second half uses `second`, each rescaled to half the range.
#[inline]
fn split(t: f32, first: fn(f32) -> f32, second: fn(f32) -> f32) -> f32 {
    if t < 0.5 {
        first(t * 2.0) / 2.0
    } else {
        second(t * 2.0 - 1.0) / 2.0 + 0.5
    }
}

#[inline]
fn expo_in(t: f32) -> f32 {
    if t == 0.0 { 0.0 } else { 2.0_f32.powf(10.0 * t - 10.0) }
}

#[inline]
fn expo_out(t: f32) -> f32 {
    if t == 1.0 { 1.0 } else { 1.0 - 2.0_f32.powf(-10.0 * t) }
}

#[inline]
fn back_in(t: f32) -> f32 {
    BACK_C3 * t * t * t - BACK_C1 * t * t
}

#[inline]
fn back_out(t: f32) -> f32 {
    1.0 + BACK_C3 * (t - 1.0).powi(3) + BACK_C1 * (t - 1.0).powi(2)
}

#[inline]
fn elastic_out(t: f32) -> f32 {
    if t == 0.0 || t == 1.0 {
        t
    } else {
        2.0_f32.powf(-10.0 * t) * ((t * 10.0 - 0.75) * ELASTIC_C4).sin() + 1.0
    }
}

#[inline]
fn bounce_out(t: f32) -> f32 {
    const N1: f32 = 7.5625;
    const D1: f32 = 2.75;

    if t < 1.0 / D1 {
        N1 * t * t
    } else if t < 2.0 / D1 {
        let t = t - 1.5 / D1;
        N1 * t * t + 0.75
    } else if t < 2.5 / D1 {
        let t = t - 2.25 / D1;
        N1 * t * t + 0.9375
    } else {
        let t = t - 2.625 / D1;
        N1 * t * t + 0.984375
    }
}

/// Linearly interpolate between two values.
#[inline]
pub fn lerp(a: f32, b: f32, t: f32) -> f32 {
    a + (b - a) * t
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn linear_endpoints() {
        assert_eq!(Ease::Linear.apply(0.0), 0.0);
        assert_eq!(Ease::Linear.apply(1.0), 1.0);
        assert_eq!(Ease::Linear.apply(0.5), 0.5);
    }

    #[test]
    fn every_ease_hits_both_endpoints() {
        for ease in Ease::ALL {
            assert!(ease.apply(0.0).abs() < 1e-3, "{:?} at 0 = {}", ease, ease.apply(0.0));
            assert!((ease.apply(1.0) - 1.0).abs() < 1e-3, "{:?} at 1 = {}", ease, ease.apply(1.0));
        }
    }

    #[test]
    fn quad_out_faster_start() {
        let mid = Ease::QuadOut.apply(0.5);
        assert!(mid > 0.5, "QuadOut at 0.5 should be > 0.5, got {}", mid);
    }

    #[test]
    fn back_overshoots() {
        assert!(Ease::BackIn.apply(0.2) < 0.0, "BackIn should dip below zero");
        assert!(Ease::BackOut.apply(0.7) > 1.0, "BackOut should overshoot");
    }

    #[test]
    fn combined_eases_meet_at_half() {
        for ease in [Ease::ExpoInBackOut, Ease::BackInExpoOut, Ease::BackInElasticOut] {
            assert!((ease.apply(0.5) - 0.5).abs() < 1e-3, "{:?} at 0.5 = {}", ease, ease.apply(0.5));
        }
    }

    #[test]
    fn input_is_clamped() {
        assert_eq!(Ease::Linear.apply(-1.0), 0.0);
        assert_eq!(Ease::QuadIn.apply(2.0), 1.0);
    }

    #[test]
    fn evaluate_interpolates() {
        let result = Ease::Linear.evaluate(100.0, 200.0, 0.5);
        assert!((result - 150.0).abs() < 0.001);
    }
}
