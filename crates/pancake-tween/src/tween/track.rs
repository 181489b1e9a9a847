// tween/track.rs
//
// Typed getter/setter binding behind an interpolation tween. The tween state
// machine only sees the type-erased `Track`; the value type stays here.
//
// No borrow of the track values is held while user code (getter, setter,
// target, validation) runs, so that code may kill or reset the tween.

use std::cell::RefCell;

use crate::easing::EaseFunction;
use crate::interpolation::Interpolate;

use super::ResetMode;

pub(crate) trait Track {
    fn duration(&self) -> f32;

    /// Capture start/end values unless they are already captured.
    fn begin(&self);

    /// Write the value at normalized time `t`.
    fn apply(&self, t: f32, ease: &EaseFunction);

    /// Write the exact end value.
    fn finish(&self);

    fn reset(&self, mode: ResetMode);

    fn is_valid(&self) -> bool;
}

pub(crate) type Getter<T> = Box<dyn Fn() -> T>;
pub(crate) type Setter<T> = Box<dyn Fn(T)>;
pub(crate) type Validation = Box<dyn Fn() -> bool>;

struct TrackValues<T> {
    /// Value read on the very first start; `InitialValues` resets return here.
    initial: Option<T>,
    /// (start, end) of the current iteration, `None` until captured.
    range: Option<(T, T)>,
}

pub(crate) struct Tweener<T: Interpolate> {
    getter: Getter<T>,
    setter: Setter<T>,
    target: Getter<T>,
    validation: Option<Validation>,
    duration: f32,
    values: RefCell<TrackValues<T>>,
}

impl<T: Interpolate> Tweener<T> {
    pub(crate) fn new(
        getter: Getter<T>,
        setter: Setter<T>,
        target: Getter<T>,
        validation: Option<Validation>,
        duration: f32,
    ) -> Self {
        Self {
            getter,
            setter,
            target,
            validation,
            duration,
            values: RefCell::new(TrackValues { initial: None, range: None }),
        }
    }

    fn range(&self) -> (T, T) {
        if let Some(range) = self.values.borrow().range {
            return range;
        }
        let start = (self.getter)();
        let end = (self.target)();
        let mut values = self.values.borrow_mut();
        values.initial.get_or_insert(start);
        values.range = Some((start, end));
        (start, end)
    }
}

impl<T: Interpolate> Track for Tweener<T> {
    fn duration(&self) -> f32 {
        self.duration
    }

    fn begin(&self) {
        self.range();
    }

    fn apply(&self, t: f32, ease: &EaseFunction) {
        let (start, end) = self.range();
        let value = T::evaluate(start, end, t, ease);
        (self.setter)(value);
    }

    fn finish(&self) {
        let (_, end) = self.range();
        (self.setter)(end);
    }

    fn reset(&self, mode: ResetMode) {
        match mode {
            ResetMode::InitialValues => {
                let initial = {
                    let mut values = self.values.borrow_mut();
                    values.range = None;
                    values.initial
                };
                if let Some(initial) = initial {
                    (self.setter)(initial);
                }
            }
            ResetMode::IncrementalValues => {
                let mut values = self.values.borrow_mut();
                if let Some((start, end)) = values.range {
                    let step = T::subtract(end, start);
                    values.range = Some((end, T::add(end, step)));
                }
            }
            ResetMode::CurrentValues => {
                self.values.borrow_mut().range = None;
            }
        }
    }

    fn is_valid(&self) -> bool {
        self.validation.as_ref().map_or(true, |valid| valid())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;
    use std::rc::Rc;

    fn track(value: &Rc<Cell<f32>>, to: f32) -> Tweener<f32> {
        let get = value.clone();
        let set = value.clone();
        Tweener::new(
            Box::new(move || get.get()),
            Box::new(move |v| set.set(v)),
            Box::new(move || to),
            None,
            1.0,
        )
    }

    #[test]
    fn apply_writes_interpolated_value() {
        let value = Rc::new(Cell::new(10.0));
        let track = track(&value, 20.0);
        track.apply(0.5, &EaseFunction::default());
        assert!((value.get() - 15.0).abs() < 1e-4);
    }

    #[test]
    fn start_is_captured_once() {
        let value = Rc::new(Cell::new(0.0));
        let track = track(&value, 10.0);
        track.apply(0.5, &EaseFunction::default());
        track.apply(0.6, &EaseFunction::default());
        assert!((value.get() - 6.0).abs() < 1e-4);
    }

    #[test]
    fn incremental_reset_shifts_range() {
        let value = Rc::new(Cell::new(0.0));
        let track = track(&value, 10.0);
        track.finish();
        track.reset(ResetMode::IncrementalValues);
        track.apply(0.5, &EaseFunction::default());
        assert!((value.get() - 15.0).abs() < 1e-4);
        track.finish();
        assert_eq!(value.get(), 20.0);
    }

    #[test]
    fn initial_reset_restores_first_value() {
        let value = Rc::new(Cell::new(3.0));
        let track = track(&value, 10.0);
        track.finish();
        track.reset(ResetMode::InitialValues);
        assert_eq!(value.get(), 3.0);
    }

    #[test]
    fn current_reset_recaptures_from_getter() {
        let value = Rc::new(Cell::new(0.0));
        let track = track(&value, 10.0);
        track.apply(0.5, &EaseFunction::default());
        track.reset(ResetMode::CurrentValues);
        track.apply(0.5, &EaseFunction::default());
        assert!((value.get() - 7.5).abs() < 1e-4);
    }

    #[test]
    fn validation_defaults_to_true() {
        let value = Rc::new(Cell::new(0.0));
        assert!(track(&value, 1.0).is_valid());

        let alive = Rc::new(Cell::new(false));
        let flag = alive.clone();
        let checked = Tweener::<f32>::new(
            Box::new(|| 0.0),
            Box::new(|_| {}),
            Box::new(|| 1.0),
            Some(Box::new(move || flag.get())),
            1.0,
        );
        assert!(!checked.is_valid());
        alive.set(true);
        assert!(checked.is_valid());
    }
}
