// manager.rs
//
// Tween manager: keeps played tweens alive and drives them once per tick.
//
// Usage:
//   let mut tweens = TweenManager::new();
//   tweens.play(&tween);
//   tweens.advance_frame(FrameTime::new(dt));  // Update, FixedUpdate steps, LateUpdate
//
// Tweens are grouped by their update mode. Newly played tweens join their
// list on the next tick of that mode; finished and newly nested tweens are
// dropped at the end of a tick. A tween belongs to one manager at a time:
// playing it through another manager moves it there.

use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};

use crate::core::time::{FixedTimestep, FrameTime, UpdateMode};
use crate::tween::Tween;

static NEXT_MANAGER_ID: AtomicU64 = AtomicU64::new(1);

#[derive(Debug)]
pub struct TweenManager {
    id: u64,
    alive: HashMap<UpdateMode, Vec<Tween>>,
    pending: HashMap<UpdateMode, Vec<Tween>>,
    /// Global multiplier on top of every tween's own time scale.
    time_scale: f32,
    fixed: FixedTimestep,
}

impl Default for TweenManager {
    fn default() -> Self {
        Self {
            id: NEXT_MANAGER_ID.fetch_add(1, Ordering::Relaxed),
            alive: HashMap::new(),
            pending: HashMap::new(),
            time_scale: 1.0,
            fixed: FixedTimestep::default(),
        }
    }
}

impl TweenManager {
    pub fn new() -> Self {
        Self::default()
    }

    /// Use a custom fixed step for `FixedUpdate` tweens. Steps that are
    /// not finite and positive are ignored.
    pub fn with_fixed_timestep(mut self, dt: f32) -> Self {
        if dt.is_finite() && dt > 0.0 {
            self.fixed = FixedTimestep::new(dt);
        } else {
            log::warn!("ignoring invalid fixed timestep {}, keeping {}", dt, self.fixed.dt());
        }
        self
    }

    pub fn fixed_timestep(&self) -> f32 {
        self.fixed.dt()
    }

    /// Start `tween` and keep it updated until it finishes. Nested tweens
    /// are driven by their group and are ignored. Playing an alive tween
    /// starts it again if it is not playing. A tween held by another
    /// manager moves here; the other one drops it on its next tick.
    pub fn play(&mut self, tween: &Tween) {
        if tween.is_nested() {
            log::debug!("ignoring play of a nested tween");
            return;
        }
        if !self.owns(tween) {
            if tween.manager_id().is_some() {
                log::debug!("tween moved to manager {}", self.id);
            }
            tween.set_manager(Some(self.id));
            self.pending.entry(tween.update_mode()).or_default().push(tween.clone());
        }
        Self::start(tween);
    }

    fn owns(&self, tween: &Tween) -> bool {
        tween.manager_id() == Some(self.id)
    }

    fn start(tween: &Tween) {
        let started = if tween.is_paused() {
            tween.resume();
            Ok(())
        } else if tween.status().is_finished() {
            tween.replay()
        } else if tween.is_playing() {
            Ok(())
        } else {
            tween.start(false)
        };
        if let Err(err) = started {
            log::warn!("manager could not start tween: {}", err);
        }
    }

    /// Update every playing tween of `mode`. Returns the number of tweens
    /// dropped because they finished or got nested.
    pub fn tick(&mut self, mode: UpdateMode, time: FrameTime) -> usize {
        let pending = self.pending.remove(&mode).unwrap_or_default();
        let alive = self.alive.entry(mode).or_default();
        alive.extend(pending);

        let id = self.id;
        let time = time.with_time_scale(time.time_scale * self.time_scale);
        for tween in alive.iter() {
            if tween.manager_id() == Some(id) && tween.is_playing() {
                tween.update(time);
            }
        }

        let before = alive.len();
        alive.retain(|tween| {
            let owned = tween.manager_id() == Some(id);
            let keep = owned && tween.is_active() && !tween.is_nested();
            if owned && !keep {
                tween.set_manager(None);
            }
            keep
        });
        let removed = before - alive.len();
        if removed > 0 {
            log::debug!("{:?} tick dropped {} finished tweens", mode, removed);
        }
        removed
    }

    /// One host frame: an `Update` tick, as many `FixedUpdate` ticks as the
    /// fixed timestep accumulates, then a `LateUpdate` tick.
    /// Returns the number of tweens dropped.
    pub fn advance_frame(&mut self, time: FrameTime) -> usize {
        let mut removed = self.tick(UpdateMode::Update, time);

        let steps = self.fixed.accumulate(time.delta);
        let dt = self.fixed.dt();
        let fixed_time = FrameTime::with_unscaled(dt, dt).with_time_scale(time.time_scale);
        for _ in 0..steps {
            removed += self.tick(UpdateMode::FixedUpdate, fixed_time);
        }

        removed += self.tick(UpdateMode::LateUpdate, time);
        removed
    }

    /// Held tweens, skipping any that moved to another manager.
    fn tweens(&self) -> impl Iterator<Item = &Tween> {
        self.alive
            .values()
            .chain(self.pending.values())
            .flatten()
            .filter(|tween| self.owns(tween))
    }

    pub fn pause_all(&mut self) {
        for tween in self.tweens() {
            tween.pause();
        }
    }

    pub fn resume_all(&mut self) {
        for tween in self.tweens() {
            tween.resume();
        }
    }

    /// Kill every managed tween. They are dropped on their next tick.
    pub fn kill_all(&mut self) {
        let tweens: Vec<Tween> = self.tweens().cloned().collect();
        for tween in tweens {
            tween.kill();
        }
    }

    /// Forget every managed tween without touching its state.
    pub fn clear(&mut self) {
        for tween in self.tweens() {
            tween.set_manager(None);
        }
        self.alive.clear();
        self.pending.clear();
    }

    /// Number of managed tween handles.
    pub fn len(&self) -> usize {
        self.tweens().count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Managed tweens counting group descendants individually.
    pub fn alive_tweens_count(&self) -> usize {
        self.tweens().map(Tween::tweens_count).sum()
    }

    pub fn playing_tweens_count(&self) -> usize {
        self.tweens().map(Tween::playing_tweens_count).sum()
    }

    pub fn time_scale(&self) -> f32 {
        self.time_scale
    }

    /// Negative or non-finite scales are ignored.
    pub fn set_time_scale(&mut self, time_scale: f32) {
        if time_scale.is_finite() && time_scale >= 0.0 {
            self.time_scale = time_scale;
        } else {
            log::warn!("ignoring invalid manager time scale {}", time_scale);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tween::ResetMode;
    use std::cell::Cell;
    use std::rc::Rc;

    fn tween_value(value: &Rc<Cell<f32>>, to: f32, duration: f32) -> Tween {
        let (get, set) = (value.clone(), value.clone());
        Tween::to(move || get.get(), move |v| set.set(v), move || to, duration)
            .build()
            .unwrap()
    }

    #[test]
    fn play_ticks_and_removes() {
        let mut tweens = TweenManager::new();
        let value = Rc::new(Cell::new(0.0));
        let tween = tween_value(&value, 100.0, 1.0);
        tweens.play(&tween);
        assert!(tween.is_playing());

        // Tick halfway
        tweens.tick(UpdateMode::Update, FrameTime::new(0.5));
        assert!((value.get() - 50.0).abs() < 0.01);

        // Tick to completion
        let removed = tweens.tick(UpdateMode::Update, FrameTime::new(0.5));
        assert!((value.get() - 100.0).abs() < 0.01);
        assert_eq!(removed, 1);
        assert!(tweens.is_empty());
        assert_eq!(tween.manager_id(), None);
    }

    #[test]
    fn looping_tween_stays_alive() {
        let mut tweens = TweenManager::new();
        let value = Rc::new(Cell::new(0.0));
        let tween = tween_value(&value, 1.0, 1.0);
        tween.set_loops(-1, ResetMode::InitialValues).unwrap();
        tweens.play(&tween);

        tweens.tick(UpdateMode::Update, FrameTime::new(1.0));
        tweens.tick(UpdateMode::Update, FrameTime::new(1.0));
        assert_eq!(tweens.len(), 1);
        assert_eq!(tweens.playing_tweens_count(), 1);
    }

    #[test]
    fn modes_tick_separately() {
        let mut tweens = TweenManager::new();
        let late = Rc::new(Cell::new(0.0));
        let tween = tween_value(&late, 10.0, 1.0);
        tween.set_update_mode(UpdateMode::LateUpdate).unwrap();
        tweens.play(&tween);

        tweens.tick(UpdateMode::Update, FrameTime::new(0.5));
        assert_eq!(late.get(), 0.0);
        tweens.tick(UpdateMode::LateUpdate, FrameTime::new(0.5));
        assert!((late.get() - 5.0).abs() < 0.01);
    }

    #[test]
    fn advance_frame_runs_fixed_steps() {
        let mut tweens = TweenManager::new().with_fixed_timestep(0.1);
        let value = Rc::new(Cell::new(0.0));
        let tween = tween_value(&value, 10.0, 1.0);
        tween.set_update_mode(UpdateMode::FixedUpdate).unwrap();
        tweens.play(&tween);

        tweens.advance_frame(FrameTime::new(0.25));
        assert!((value.get() - 2.0).abs() < 0.01);
    }

    #[test]
    fn invalid_fixed_timestep_keeps_default() {
        for dt in [0.0, -0.1, f32::NAN, f32::INFINITY] {
            let tweens = TweenManager::new().with_fixed_timestep(dt);
            assert_eq!(tweens.fixed_timestep(), 0.02, "dt = {}", dt);
        }

        let mut tweens = TweenManager::new().with_fixed_timestep(0.0);
        let value = Rc::new(Cell::new(0.0));
        let tween = tween_value(&value, 10.0, 1.0);
        tween.set_update_mode(UpdateMode::FixedUpdate).unwrap();
        tweens.play(&tween);
        // 0.11s holds five default steps of 0.02s.
        tweens.advance_frame(FrameTime::new(0.11));
        assert!((value.get() - 1.0).abs() < 0.01);
    }

    #[test]
    fn playing_in_second_manager_moves_tween() {
        let mut first = TweenManager::new();
        let mut second = TweenManager::new();
        let value = Rc::new(Cell::new(0.0));
        let tween = tween_value(&value, 10.0, 1.0);
        first.play(&tween);
        first.tick(UpdateMode::Update, FrameTime::new(0.25));
        assert!((value.get() - 2.5).abs() < 0.01);

        second.play(&tween);
        assert!(first.is_empty());
        assert_eq!(second.len(), 1);

        // Only the new owner drives it; the old one drops its handle.
        assert_eq!(first.tick(UpdateMode::Update, FrameTime::new(0.25)), 1);
        assert!((value.get() - 2.5).abs() < 0.01);
        second.tick(UpdateMode::Update, FrameTime::new(0.25));
        assert!((value.get() - 5.0).abs() < 0.01);

        first.clear();
        assert!(tween.is_playing());
        second.tick(UpdateMode::Update, FrameTime::new(0.5));
        assert!(tween.is_completed());
        assert!(second.is_empty());
        assert_eq!(tween.manager_id(), None);
    }

    #[test]
    fn pause_and_resume_all() {
        let mut tweens = TweenManager::new();
        let value = Rc::new(Cell::new(0.0));
        let tween = tween_value(&value, 10.0, 1.0);
        tweens.play(&tween);

        tweens.pause_all();
        tweens.tick(UpdateMode::Update, FrameTime::new(0.5));
        assert_eq!(value.get(), 0.0);
        assert_eq!(tweens.len(), 1);

        tweens.resume_all();
        tweens.tick(UpdateMode::Update, FrameTime::new(0.5));
        assert!((value.get() - 5.0).abs() < 0.01);
    }

    #[test]
    fn kill_all_then_tick_drops_everything() {
        let mut tweens = TweenManager::new();
        let value = Rc::new(Cell::new(0.0));
        let a = tween_value(&value, 10.0, 1.0);
        let b = tween_value(&value, 10.0, 2.0);
        tweens.play(&a);
        tweens.play(&b);
        assert_eq!(tweens.len(), 2);

        tweens.kill_all();
        assert!(a.is_killed() && b.is_killed());
        assert_eq!(tweens.tick(UpdateMode::Update, FrameTime::new(0.1)), 2);
        assert!(tweens.is_empty());
    }

    #[test]
    fn global_time_scale_applies() {
        let mut tweens = TweenManager::new();
        tweens.set_time_scale(2.0);
        tweens.set_time_scale(-1.0);
        assert_eq!(tweens.time_scale(), 2.0);

        let value = Rc::new(Cell::new(0.0));
        let tween = tween_value(&value, 10.0, 1.0);
        tweens.play(&tween);
        tweens.tick(UpdateMode::Update, FrameTime::new(0.25));
        assert!((value.get() - 5.0).abs() < 0.01);
    }

    #[test]
    fn nested_tweens_are_ignored() {
        let mut tweens = TweenManager::new();
        let value = Rc::new(Cell::new(0.0));
        let child = tween_value(&value, 10.0, 1.0);
        let group = Tween::group();
        group.add(&child).unwrap();

        tweens.play(&child);
        assert!(tweens.is_empty());

        tweens.play(&group);
        assert_eq!(tweens.len(), 1);
        assert_eq!(tweens.alive_tweens_count(), 1);
        tweens.tick(UpdateMode::Update, FrameTime::new(1.0));
        assert!(group.is_completed());
        assert_eq!(value.get(), 10.0);
    }

    #[test]
    fn replaying_finished_tween() {
        let mut tweens = TweenManager::new();
        let value = Rc::new(Cell::new(0.0));
        let tween = tween_value(&value, 10.0, 1.0);
        tweens.play(&tween);
        tweens.tick(UpdateMode::Update, FrameTime::new(1.0));
        assert!(tween.is_completed());

        tweens.play(&tween);
        assert!(tween.is_playing());
        assert_eq!(value.get(), 0.0);
        assert_eq!(tweens.len(), 1);
    }

    #[test]
    fn clear_forgets_tweens() {
        let mut tweens = TweenManager::new();
        let value = Rc::new(Cell::new(0.0));
        let tween = tween_value(&value, 10.0, 1.0);
        tweens.play(&tween);
        tweens.clear();
        assert!(tweens.is_empty());
        assert!(tween.is_playing());
        assert_eq!(tween.manager_id(), None);
    }
}
