// tween/builder.rs
//
// Fluent configuration of an interpolation tween before it exists.
// `build()` validates everything and hands back an idle `Tween`.

use crate::config::TweenSettings;
use crate::core::time::{TimeMode, UpdateMode};
use crate::easing::EaseFunction;
use crate::error::{check_non_negative, Result, TweenError};
use crate::interpolation::Interpolate;

use super::node::TweenNode;
use super::track::{Getter, Setter, Tweener, Validation};
use super::{ResetMode, Tween};

impl Tween {
    /// Tween the value behind `getter`/`setter` towards `target()` over
    /// `duration` seconds. The start value is read when the tween starts.
    pub fn to<T: Interpolate>(
        getter: impl Fn() -> T + 'static,
        setter: impl Fn(T) + 'static,
        target: impl Fn() -> T + 'static,
        duration: f32,
    ) -> TweenBuilder<T> {
        TweenBuilder::new(Box::new(getter), Box::new(setter), Box::new(target), duration)
    }
}

pub struct TweenBuilder<T: Interpolate> {
    getter: Getter<T>,
    setter: Setter<T>,
    target: Getter<T>,
    duration: f32,
    validation: Option<Validation>,
    ease: EaseFunction,
    loops: i32,
    loop_reset_mode: ResetMode,
    delay: f32,
    time_scale: f32,
    time_mode: TimeMode,
    update_mode: UpdateMode,
}

impl<T: Interpolate> TweenBuilder<T> {
    fn new(getter: Getter<T>, setter: Setter<T>, target: Getter<T>, duration: f32) -> Self {
        Self {
            getter,
            setter,
            target,
            duration,
            validation: None,
            ease: EaseFunction::default(),
            loops: 0,
            loop_reset_mode: ResetMode::InitialValues,
            delay: 0.0,
            time_scale: 1.0,
            time_mode: TimeMode::Scaled,
            update_mode: UpdateMode::Update,
        }
    }

    pub fn ease(mut self, ease: impl Into<EaseFunction>) -> Self {
        self.ease = ease.into();
        self
    }

    pub fn loops(mut self, loops: i32, mode: ResetMode) -> Self {
        self.loops = loops;
        self.loop_reset_mode = mode;
        self
    }

    pub fn delay(mut self, delay: f32) -> Self {
        self.delay = delay;
        self
    }

    pub fn time_scale(mut self, time_scale: f32) -> Self {
        self.time_scale = time_scale;
        self
    }

    pub fn time_mode(mut self, time_mode: TimeMode) -> Self {
        self.time_mode = time_mode;
        self
    }

    pub fn update_mode(mut self, update_mode: UpdateMode) -> Self {
        self.update_mode = update_mode;
        self
    }

    /// Checked before every update; returning false kills the tween.
    pub fn validation(mut self, valid: impl Fn() -> bool + 'static) -> Self {
        self.validation = Some(Box::new(valid));
        self
    }

    /// Take every configurable field from a settings preset.
    pub fn with_settings(mut self, settings: &TweenSettings) -> Self {
        self.ease = settings.ease.clone().into();
        self.loops = settings.loops;
        self.loop_reset_mode = settings.loop_reset_mode;
        self.delay = settings.delay;
        self.time_scale = settings.time_scale;
        self.time_mode = settings.time_mode;
        self.update_mode = settings.update_mode;
        self
    }

    pub fn build(self) -> Result<Tween> {
        let duration = check_non_negative(self.duration, TweenError::InvalidDuration)?;
        let track = Tweener::new(self.getter, self.setter, self.target, self.validation, duration);
        let tween = Tween::from_node(TweenNode::Interpolation(Box::new(track)));
        tween
            .set_ease(self.ease)?
            .set_loops(self.loops, self.loop_reset_mode)?
            .set_delay(self.delay)?
            .set_time_scale(self.time_scale, self.time_mode)?
            .set_update_mode(self.update_mode)?;
        Ok(tween)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::easing::Ease;
    use glam::Vec2;
    use std::cell::Cell;
    use std::rc::Rc;

    #[test]
    fn rejects_bad_numbers() {
        let build = |duration: f32, delay: f32, scale: f32| {
            Tween::to(|| 0.0f32, |_| {}, || 1.0, duration)
                .delay(delay)
                .time_scale(scale)
                .build()
                .err()
        };
        assert_eq!(build(-1.0, 0.0, 1.0), Some(TweenError::InvalidDuration(-1.0)));
        assert!(matches!(build(f32::NAN, 0.0, 1.0), Some(TweenError::InvalidDuration(_))));
        assert_eq!(build(1.0, -0.5, 1.0), Some(TweenError::InvalidDelay(-0.5)));
        assert_eq!(build(1.0, 0.0, -2.0), Some(TweenError::InvalidTimeScale(-2.0)));
        assert_eq!(build(0.0, 0.0, 0.0), None);
    }

    #[test]
    fn builds_idle_configured_tween() {
        let tween = Tween::to(|| 0.0f32, |_| {}, || 1.0, 1.5)
            .ease(Ease::BackOut)
            .loops(4, ResetMode::IncrementalValues)
            .delay(0.25)
            .update_mode(UpdateMode::LateUpdate)
            .build()
            .unwrap();
        assert_eq!(tween.status(), crate::tween::TweenStatus::Idle);
        assert_eq!(tween.duration(), 1.5);
        assert_eq!(tween.loops(), 4);
        assert_eq!(tween.loop_reset_mode(), ResetMode::IncrementalValues);
        assert_eq!(tween.delay(), 0.25);
        assert_eq!(tween.update_mode(), UpdateMode::LateUpdate);
    }

    #[test]
    fn with_settings_copies_preset() {
        let settings = TweenSettings::from_json(r#"{ "loops": -1, "time_mode": "Unscaled" }"#).unwrap();
        let tween = Tween::to(|| 0.0f32, |_| {}, || 1.0, 1.0)
            .with_settings(&settings)
            .build()
            .unwrap();
        assert_eq!(tween.loops(), -1);
        assert_eq!(tween.time_mode(), TimeMode::Unscaled);
    }

    #[test]
    fn tweens_vectors() {
        let pos = Rc::new(Cell::new(Vec2::ZERO));
        let (get, set) = (pos.clone(), pos.clone());
        let tween = Tween::to(move || get.get(), move |v| set.set(v), || Vec2::new(10.0, -4.0), 1.0)
            .build()
            .unwrap();
        tween.start(false).unwrap();
        tween.update(crate::core::time::FrameTime::new(0.5));
        assert!((pos.get() - Vec2::new(5.0, -2.0)).length() < 1e-4);
    }

    #[test]
    fn tweens_integers() {
        let score = Rc::new(Cell::new(0i32));
        let (get, set) = (score.clone(), score.clone());
        let tween = Tween::to(move || get.get(), move |v| set.set(v), || 9, 1.0)
            .build()
            .unwrap();
        tween.start(false).unwrap();
        tween.update(crate::core::time::FrameTime::new(0.5));
        assert_eq!(score.get(), 5);
        tween.update(crate::core::time::FrameTime::new(0.5));
        assert_eq!(score.get(), 9);
    }
}
