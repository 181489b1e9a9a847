// easing/mod.rs
//
// Easing delegates: named eases, keyframed curves, or caller-supplied closures.
// Every variant maps (a, b, t) to a value; none of them hold tween state.

mod curve;
mod ease;

use std::fmt;
use std::rc::Rc;

pub use curve::{AnimationCurve, Keyframe};
pub use ease::{lerp, Ease};

/// Signature of a custom easing delegate: `(from, to, t) -> value`.
pub type EaseFn = dyn Fn(f32, f32, f32) -> f32;

/// The pluggable easing delegate used by interpolation tweens.
#[derive(Clone)]
pub enum EaseFunction {
    Named(Ease),
    Curve(Rc<AnimationCurve>),
    Custom(Rc<EaseFn>),
}

impl EaseFunction {
    pub fn custom(f: impl Fn(f32, f32, f32) -> f32 + 'static) -> Self {
        EaseFunction::Custom(Rc::new(f))
    }

    /// Interpolate from `a` to `b` at normalized time `t`.
    #[inline]
    pub fn evaluate(&self, a: f32, b: f32, t: f32) -> f32 {
        match self {
            EaseFunction::Named(ease) => ease.evaluate(a, b, t),
            EaseFunction::Curve(curve) => lerp(a, b, curve.evaluate(t.clamp(0.0, 1.0))),
            EaseFunction::Custom(f) => f(a, b, t),
        }
    }
}

impl Default for EaseFunction {
    fn default() -> Self {
        EaseFunction::Named(Ease::Linear)
    }
}

impl From<Ease> for EaseFunction {
    fn from(ease: Ease) -> Self {
        EaseFunction::Named(ease)
    }
}

impl From<AnimationCurve> for EaseFunction {
    fn from(curve: AnimationCurve) -> Self {
        EaseFunction::Curve(Rc::new(curve))
    }
}

impl fmt::Debug for EaseFunction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EaseFunction::Named(ease) => f.debug_tuple("Named").field(ease).finish(),
            EaseFunction::Curve(curve) => f.debug_tuple("Curve").field(&curve.keys().len()).finish(),
            EaseFunction::Custom(_) => f.write_str("Custom(..)"),
        }
    }
}
