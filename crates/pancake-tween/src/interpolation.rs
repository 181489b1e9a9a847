// interpolation.rs
//
// Value types that can be tweened. Interpolation is pure: the ease delegate is
// applied per component, and add/subtract support incremental (relative) loops.

use bytemuck::{Pod, Zeroable};
use glam::{Quat, Vec2, Vec3, Vec4};
use serde::{Deserialize, Serialize};

use crate::easing::EaseFunction;

/// A value an interpolation tween can animate.
pub trait Interpolate: Copy + 'static {
    /// Value at normalized time `t` between `start` and `end`.
    fn evaluate(start: Self, end: Self, t: f32, ease: &EaseFunction) -> Self;

    fn add(a: Self, b: Self) -> Self;

    fn subtract(a: Self, b: Self) -> Self;
}

impl Interpolate for f32 {
    #[inline]
    fn evaluate(start: f32, end: f32, t: f32, ease: &EaseFunction) -> f32 {
        ease.evaluate(start, end, t)
    }

    #[inline]
    fn add(a: f32, b: f32) -> f32 {
        a + b
    }

    #[inline]
    fn subtract(a: f32, b: f32) -> f32 {
        a - b
    }
}

/// Eased in float space, rounded to the nearest integer.
impl Interpolate for i32 {
    #[inline]
    fn evaluate(start: i32, end: i32, t: f32, ease: &EaseFunction) -> i32 {
        ease.evaluate(start as f32, end as f32, t).round() as i32
    }

    #[inline]
    fn add(a: i32, b: i32) -> i32 {
        a.saturating_add(b)
    }

    #[inline]
    fn subtract(a: i32, b: i32) -> i32 {
        a.saturating_sub(b)
    }
}

impl Interpolate for Vec2 {
    #[inline]
    fn evaluate(start: Vec2, end: Vec2, t: f32, ease: &EaseFunction) -> Vec2 {
        Vec2::new(
            ease.evaluate(start.x, end.x, t),
            ease.evaluate(start.y, end.y, t),
        )
    }

    #[inline]
    fn add(a: Vec2, b: Vec2) -> Vec2 {
        a + b
    }

    #[inline]
    fn subtract(a: Vec2, b: Vec2) -> Vec2 {
        a - b
    }
}

impl Interpolate for Vec3 {
    #[inline]
    fn evaluate(start: Vec3, end: Vec3, t: f32, ease: &EaseFunction) -> Vec3 {
        Vec3::new(
            ease.evaluate(start.x, end.x, t),
            ease.evaluate(start.y, end.y, t),
            ease.evaluate(start.z, end.z, t),
        )
    }

    #[inline]
    fn add(a: Vec3, b: Vec3) -> Vec3 {
        a + b
    }

    #[inline]
    fn subtract(a: Vec3, b: Vec3) -> Vec3 {
        a - b
    }
}

impl Interpolate for Vec4 {
    #[inline]
    fn evaluate(start: Vec4, end: Vec4, t: f32, ease: &EaseFunction) -> Vec4 {
        Vec4::new(
            ease.evaluate(start.x, end.x, t),
            ease.evaluate(start.y, end.y, t),
            ease.evaluate(start.z, end.z, t),
            ease.evaluate(start.w, end.w, t),
        )
    }

    #[inline]
    fn add(a: Vec4, b: Vec4) -> Vec4 {
        a + b
    }

    #[inline]
    fn subtract(a: Vec4, b: Vec4) -> Vec4 {
        a - b
    }
}

/// Rotations follow the shortest arc; the ease shapes the slerp factor.
/// Add and subtract compose rotations, so incremental loops keep turning.
impl Interpolate for Quat {
    #[inline]
    fn evaluate(start: Quat, end: Quat, t: f32, ease: &EaseFunction) -> Quat {
        start.slerp(end, ease.evaluate(0.0, 1.0, t))
    }

    #[inline]
    fn add(a: Quat, b: Quat) -> Quat {
        (b * a).normalize()
    }

    #[inline]
    fn subtract(a: Quat, b: Quat) -> Quat {
        (a * b.inverse()).normalize()
    }
}

/// Linear RGBA color.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Default, Pod, Zeroable, Serialize, Deserialize)]
pub struct Color {
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub a: f32,
}

impl Color {
    pub const WHITE: Color = Color::new(1.0, 1.0, 1.0, 1.0);
    pub const BLACK: Color = Color::new(0.0, 0.0, 0.0, 1.0);
    pub const CLEAR: Color = Color::new(0.0, 0.0, 0.0, 0.0);

    pub const fn new(r: f32, g: f32, b: f32, a: f32) -> Self {
        Self { r, g, b, a }
    }

    pub fn with_alpha(self, a: f32) -> Self {
        Self { a, ..self }
    }

    pub fn to_array(self) -> [f32; 4] {
        bytemuck::cast(self)
    }

    pub fn to_vec4(self) -> Vec4 {
        Vec4::from_array(self.to_array())
    }
}

impl From<[f32; 4]> for Color {
    fn from(rgba: [f32; 4]) -> Self {
        bytemuck::cast(rgba)
    }
}

impl From<Vec4> for Color {
    fn from(v: Vec4) -> Self {
        Color::from(v.to_array())
    }
}

impl Interpolate for Color {
    #[inline]
    fn evaluate(start: Color, end: Color, t: f32, ease: &EaseFunction) -> Color {
        Color::from(Vec4::evaluate(start.to_vec4(), end.to_vec4(), t, ease))
    }

    #[inline]
    fn add(a: Color, b: Color) -> Color {
        Color::from(a.to_vec4() + b.to_vec4())
    }

    #[inline]
    fn subtract(a: Color, b: Color) -> Color {
        Color::from(a.to_vec4() - b.to_vec4())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::easing::Ease;

    #[test]
    fn float_interpolates_with_ease() {
        let ease = EaseFunction::default();
        assert!((f32::evaluate(0.0, 100.0, 0.25, &ease) - 25.0).abs() < 1e-4);
    }

    #[test]
    fn vec2_interpolates_per_component() {
        let ease = EaseFunction::default();
        let v = Vec2::evaluate(Vec2::ZERO, Vec2::new(10.0, 20.0), 0.5, &ease);
        assert!((v.x - 5.0).abs() < 1e-4);
        assert!((v.y - 10.0).abs() < 1e-4);
    }

    #[test]
    fn vec3_uses_ease_on_every_axis() {
        let ease = EaseFunction::from(Ease::QuadIn);
        let v = Vec3::evaluate(Vec3::ZERO, Vec3::splat(4.0), 0.5, &ease);
        assert!((v - Vec3::splat(1.0)).length() < 1e-4);
    }

    #[test]
    fn color_fades_alpha() {
        let ease = EaseFunction::default();
        let c = Color::evaluate(Color::WHITE, Color::WHITE.with_alpha(0.0), 0.5, &ease);
        assert!((c.a - 0.5).abs() < 1e-4);
        assert_eq!(c.r, 1.0);
    }

    #[test]
    fn add_and_subtract_are_inverse() {
        let a = Vec4::new(1.0, 2.0, 3.0, 4.0);
        let b = Vec4::splat(0.5);
        assert_eq!(Vec4::subtract(Vec4::add(a, b), b), a);

        let c = Color::new(0.2, 0.4, 0.6, 1.0);
        let delta = Color::subtract(Color::WHITE, c);
        let back = Color::add(c, delta);
        assert!((back.to_vec4() - Color::WHITE.to_vec4()).length() < 1e-6);
    }

    #[test]
    fn int_rounds_eased_value() {
        let ease = EaseFunction::default();
        assert_eq!(i32::evaluate(0, 10, 0.25, &ease), 3);
        assert_eq!(i32::evaluate(0, 100, 0.5, &ease), 50);
        assert_eq!(i32::evaluate(10, -10, 1.0, &ease), -10);
        assert_eq!(<i32 as Interpolate>::add(i32::MAX, 1), i32::MAX);
        assert_eq!(<i32 as Interpolate>::subtract(7, 3), 4);
    }

    #[test]
    fn quat_slerps_with_ease() {
        use std::f32::consts::FRAC_PI_2;

        let end = Quat::from_rotation_z(FRAC_PI_2);
        let half = Quat::evaluate(Quat::IDENTITY, end, 0.5, &EaseFunction::default());
        assert!((half.angle_between(Quat::IDENTITY) - FRAC_PI_2 / 2.0).abs() < 1e-4);

        // QuadIn at 0.5 covers a quarter of the arc.
        let eased = Quat::evaluate(Quat::IDENTITY, end, 0.5, &EaseFunction::from(Ease::QuadIn));
        assert!((eased.angle_between(Quat::IDENTITY) - FRAC_PI_2 / 4.0).abs() < 1e-4);
    }

    #[test]
    fn quat_delta_continues_rotation() {
        use std::f32::consts::FRAC_PI_4;

        let start = Quat::from_rotation_y(FRAC_PI_4);
        let end = Quat::from_rotation_y(2.0 * FRAC_PI_4);
        let delta = <Quat as Interpolate>::subtract(end, start);
        let next = <Quat as Interpolate>::add(end, delta);
        assert!(next.angle_between(Quat::from_rotation_y(3.0 * FRAC_PI_4)) < 1e-4);
    }

    #[test]
    fn color_array_layout() {
        assert_eq!(Color::new(0.1, 0.2, 0.3, 0.4).to_array(), [0.1, 0.2, 0.3, 0.4]);
        assert_eq!(Color::from([1.0, 0.0, 0.0, 1.0]), Color::new(1.0, 0.0, 0.0, 1.0));
    }
}
