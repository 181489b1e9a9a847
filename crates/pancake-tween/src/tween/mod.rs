// tween/mod.rs
//
// The tween handle and its lifecycle state machine.
//
// Usage:
//   let tween = Tween::to(get, set, || 100.0, 2.0).ease(Ease::QuadOut).build()?;
//   tween.start(false)?;
//   tween.update(FrameTime::new(dt));   // once per frame, or via TweenManager
//
// States: Idle -> Playing -> {Completed, Killed}, Playing <-> Paused.
// Terminal tweens run again only through `replay()` (or `reset` + `start`).
//
// No internal borrow is held while user code runs (setters, getters,
// callbacks, validation), so any of them may kill, pause or query the tween
// that invoked them.

mod builder;
mod callbacks;
mod completion;
mod node;
mod track;

use std::cell::{Ref, RefCell, RefMut};
use std::fmt;
use std::hash::{Hash, Hasher};
use std::rc::{Rc, Weak};

use futures::channel::oneshot;
use serde::{Deserialize, Serialize};

use crate::config::TweenSettings;
use crate::core::time::{FrameTime, TimeMode, UpdateMode};
use crate::easing::EaseFunction;
use crate::error::{check_non_negative, Result, TweenError};
use crate::sync::{self, SyncLink};

pub use builder::TweenBuilder;
pub use completion::Completion;

use callbacks::{Callbacks, Event};
use node::{Group, TweenNode};

/// How a tween's values are reset when it loops or is reset explicitly.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum ResetMode {
    /// Snap back to the value read on the very first start.
    #[default]
    InitialValues,
    /// Continue from the end value: each iteration moves by the same delta.
    IncrementalValues,
    /// Re-read the start and target values from the getters.
    CurrentValues,
}

/// Lifecycle state of a tween.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum TweenStatus {
    #[default]
    Idle,
    Playing,
    Paused,
    Completed,
    Killed,
}

impl TweenStatus {
    /// Playing or paused: started and not yet finished.
    pub fn is_active(self) -> bool {
        matches!(self, TweenStatus::Playing | TweenStatus::Paused)
    }

    /// Completed or killed.
    pub fn is_finished(self) -> bool {
        matches!(self, TweenStatus::Completed | TweenStatus::Killed)
    }
}

pub(crate) struct TweenCore {
    status: TweenStatus,
    /// Elapsed time of the current iteration, excluding delay.
    elapsed: f32,
    delay: f32,
    elapsed_delay: f32,
    /// Total iterations; -1 is infinite.
    loops: i32,
    /// Iterations left after the current one; -1 is infinite.
    loops_remaining: i32,
    loop_reset_mode: ResetMode,
    time_scale: f32,
    time_mode: TimeMode,
    update_mode: UpdateMode,
    ease: EaseFunction,
    nested: bool,
    parent: Weak<TweenInner>,
    /// Values captured or children started for the current iteration.
    begun: bool,
    /// Id of the manager holding this tween in its alive list.
    manager: Option<u64>,
}

impl Default for TweenCore {
    fn default() -> Self {
        Self {
            status: TweenStatus::Idle,
            elapsed: 0.0,
            delay: 0.0,
            elapsed_delay: 0.0,
            loops: 0,
            loops_remaining: 0,
            loop_reset_mode: ResetMode::InitialValues,
            time_scale: 1.0,
            time_mode: TimeMode::Scaled,
            update_mode: UpdateMode::Update,
            ease: EaseFunction::default(),
            nested: false,
            parent: Weak::new(),
            begun: false,
            manager: None,
        }
    }
}

impl TweenCore {
    fn delay_done(&self) -> bool {
        self.elapsed_delay >= self.delay
    }
}

pub(crate) struct TweenInner {
    core: RefCell<TweenCore>,
    node: TweenNode,
    callbacks: RefCell<Callbacks>,
    sync: RefCell<Option<SyncLink>>,
    waiters: RefCell<Vec<oneshot::Sender<TweenStatus>>>,
}

/// Shared handle to a tween. Cloning is cheap and yields the same tween;
/// equality and hashing use handle identity.
#[derive(Clone)]
pub struct Tween(Rc<TweenInner>);

impl Tween {
    fn from_node(node: TweenNode) -> Self {
        Tween(Rc::new(TweenInner {
            core: RefCell::new(TweenCore::default()),
            node,
            callbacks: RefCell::new(Callbacks::default()),
            sync: RefCell::new(None),
            waiters: RefCell::new(Vec::new()),
        }))
    }

    /// Zero-duration tween that runs `action` when it completes, which is as
    /// soon as it starts.
    pub fn callback(action: impl Fn() + 'static) -> Tween {
        Tween::from_node(TweenNode::Callback(Rc::new(action)))
    }

    /// Empty group. Children are added with [`Tween::add`].
    pub fn group() -> Tween {
        Tween::from_node(TweenNode::Group(Group::default()))
    }

    /// Same underlying tween.
    pub fn ptr_eq(&self, other: &Tween) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }

    fn core(&self) -> Ref<'_, TweenCore> {
        self.0.core.borrow()
    }

    fn core_mut(&self) -> RefMut<'_, TweenCore> {
        self.0.core.borrow_mut()
    }

    fn fire(&self, event: Event) {
        let callback = self.0.callbacks.borrow().get(event);
        if let Some(callback) = callback {
            callback();
        }
    }

    fn notify_waiters(&self, status: TweenStatus) {
        let waiters = std::mem::take(&mut *self.0.waiters.borrow_mut());
        for waiter in waiters {
            let _ = waiter.send(status);
        }
    }

    // -- Lifecycle --

    /// Start an idle tween. With `completing_instantly` the end state is
    /// applied and the tween completes before this returns; the same happens
    /// when there is no delay and nothing to animate.
    pub fn start(&self, completing_instantly: bool) -> Result<()> {
        if self.is_nested() {
            return Err(TweenError::Nested);
        }
        self.start_inner(completing_instantly)
    }

    fn start_inner(&self, completing_instantly: bool) -> Result<()> {
        match self.status() {
            TweenStatus::Idle => {}
            TweenStatus::Playing | TweenStatus::Paused => return Err(TweenError::AlreadyPlaying),
            TweenStatus::Completed | TweenStatus::Killed => return Err(TweenError::Finished),
        }
        {
            let mut core = self.core_mut();
            core.status = TweenStatus::Playing;
            core.elapsed = 0.0;
            core.elapsed_delay = 0.0;
            core.begun = false;
            core.loops_remaining = if core.loops < 0 { -1 } else { core.loops.max(1) - 1 };
        }
        log::trace!("{} tween started", self.0.node.kind());

        self.fire(Event::Start);
        if !self.is_playing() {
            return Ok(());
        }
        // A group's children start once its delay has run out.
        let deferred = matches!(self.0.node, TweenNode::Group(_)) && !self.core().delay_done();
        if !deferred {
            self.begin_iteration();
            if !self.is_playing() {
                return Ok(());
            }
        }
        sync::align_on_start(self);
        if !self.is_playing() {
            return Ok(());
        }

        if completing_instantly {
            self.complete_inner();
        } else if self.core().delay_done() && self.is_empty_iteration() {
            self.finish_iteration(false);
        }
        Ok(())
    }

    /// Capture track values, or start the children of a group.
    fn begin_iteration(&self) {
        self.core_mut().begun = true;
        match &self.0.node {
            TweenNode::Interpolation(track) => track.begin(),
            TweenNode::Callback(_) => {}
            TweenNode::Group(group) => {
                let mut live = Vec::new();
                for child in group.children() {
                    if child.start_inner(false).is_ok() && child.is_active() {
                        live.push(child);
                    }
                    if !self.is_active() {
                        return;
                    }
                }
                group.set_live(live);
            }
        }
    }

    fn begin_if_pending(&self) {
        let begun = self.core().begun;
        if !begun {
            self.begin_iteration();
        }
    }

    fn is_empty_iteration(&self) -> bool {
        match &self.0.node {
            TweenNode::Interpolation(track) => track.duration() <= 0.0,
            TweenNode::Callback(_) => true,
            TweenNode::Group(group) => group.is_live_empty(),
        }
    }

    /// Advance by one frame. Nested tweens are driven by their group, so
    /// calling this on one is a no-op.
    pub fn update(&self, time: FrameTime) {
        if self.is_nested() {
            return;
        }
        self.advance(time);
    }

    fn advance(&self, time: FrameTime) {
        if self.status() != TweenStatus::Playing {
            return;
        }
        if !self.is_valid() {
            log::warn!("{} tween failed its validity check, killing it", self.0.node.kind());
            self.kill();
            return;
        }

        let (dt, frame_dt) = {
            let mut core = self.core_mut();
            let frame_dt = time.delta_for(core.time_mode) * core.time_scale;
            let waiting = (core.delay - core.elapsed_delay).max(0.0);
            let consumed = frame_dt.min(waiting);
            core.elapsed_delay += consumed;
            if !core.delay_done() {
                return;
            }
            (frame_dt - consumed, frame_dt)
        };
        self.begin_if_pending();
        if !self.is_playing() {
            return;
        }

        match &self.0.node {
            TweenNode::Interpolation(track) => {
                let duration = track.duration();
                let (t, ease) = {
                    let mut core = self.core_mut();
                    core.elapsed = (core.elapsed + dt).min(duration);
                    let t = if duration > 0.0 { core.elapsed / duration } else { 1.0 };
                    (t, core.ease.clone())
                };
                track.apply(t, &ease);
                if self.is_playing() && t >= 1.0 {
                    self.finish_iteration(false);
                }
            }
            TweenNode::Callback(_) => self.finish_iteration(false),
            TweenNode::Group(group) => {
                self.core_mut().elapsed += dt;
                // Only the part of the frame left after the delay reaches children.
                let child_time = if frame_dt > 0.0 && dt < frame_dt {
                    let share = dt / frame_dt;
                    FrameTime {
                        delta: time.delta * share,
                        unscaled_delta: time.unscaled_delta * share,
                        time_scale: time.time_scale,
                    }
                } else {
                    time
                };
                for child in group.live() {
                    child.advance(child_time);
                    if !self.is_playing() {
                        return;
                    }
                }
                if group.prune_live() {
                    self.finish_iteration(false);
                }
            }
        }
    }

    /// End the current iteration: write the end state, then loop or complete.
    fn finish_iteration(&self, forced: bool) {
        match &self.0.node {
            TweenNode::Interpolation(track) => {
                self.core_mut().elapsed = track.duration();
                track.finish();
            }
            TweenNode::Callback(action) => action(),
            TweenNode::Group(group) => {
                for child in group.take_live() {
                    child.complete_inner();
                }
            }
        }
        if !self.is_active() {
            return;
        }

        let looping = !forced && self.core().loops_remaining != 0 && self.duration() > 0.0;
        if looping {
            let mode = {
                let mut core = self.core_mut();
                if core.loops_remaining > 0 {
                    core.loops_remaining -= 1;
                }
                core.loop_reset_mode
            };
            self.reset_inner(false, mode, true);
            if !self.is_playing() {
                return;
            }
            self.begin_iteration();
            if !self.is_playing() {
                return;
            }
            self.fire(Event::Loop);
            return;
        }

        self.core_mut().status = TweenStatus::Completed;
        log::trace!("{} tween completed", self.0.node.kind());
        sync::leave(self);
        self.fire(Event::Complete);
        self.fire(Event::CompleteOrKill);
        self.notify_waiters(TweenStatus::Completed);
    }

    /// Jump to the end state and complete, dropping any remaining loops.
    /// Idle tweens are started with instant completion. Completing a finished
    /// tween does nothing.
    pub fn complete(&self) {
        if self.status() == TweenStatus::Idle && self.is_nested() {
            return;
        }
        self.complete_inner();
    }

    fn complete_inner(&self) {
        match self.status() {
            TweenStatus::Idle => {
                if let Err(err) = self.start_inner(true) {
                    log::warn!("could not complete idle tween: {}", err);
                }
            }
            TweenStatus::Playing | TweenStatus::Paused => {
                {
                    let mut core = self.core_mut();
                    core.loops_remaining = 0;
                    core.elapsed_delay = core.delay;
                }
                self.begin_if_pending();
                if !self.is_active() {
                    return;
                }
                self.finish_iteration(true);
            }
            TweenStatus::Completed | TweenStatus::Killed => {}
        }
    }

    /// Stop where it is without writing the end value. Safe to call from
    /// any callback or setter.
    pub fn kill(&self) {
        if !self.is_active() {
            return;
        }
        self.core_mut().status = TweenStatus::Killed;
        if let TweenNode::Group(group) = &self.0.node {
            for child in group.take_live() {
                child.kill();
            }
        }
        log::trace!("{} tween killed", self.0.node.kind());
        sync::leave(self);
        self.fire(Event::Kill);
        self.fire(Event::CompleteOrKill);
        self.notify_waiters(TweenStatus::Killed);
    }

    /// Clear progress and reset values per `mode`, optionally killing first.
    /// A tween that is still playing (because `kill` was false) keeps playing
    /// from the start of its iteration.
    pub fn reset(&self, kill: bool, mode: ResetMode) {
        self.reset_inner(kill, mode, false);
    }

    fn reset_inner(&self, kill: bool, mode: ResetMode, looping: bool) {
        if kill {
            self.kill();
        }
        {
            let mut core = self.core_mut();
            if !core.status.is_active() {
                core.status = TweenStatus::Idle;
                core.begun = false;
            }
            core.elapsed = 0.0;
            // The delay only precedes the first iteration.
            if !looping {
                core.elapsed_delay = 0.0;
            }
        }
        match &self.0.node {
            TweenNode::Interpolation(track) => track.reset(mode),
            TweenNode::Callback(_) => {}
            TweenNode::Group(group) => {
                for child in group.children() {
                    child.reset_inner(kill, mode, false);
                }
            }
        }
        self.fire(Event::Reset);
    }

    /// Kill, reset to initial values and start again.
    pub fn replay(&self) -> Result<()> {
        self.reset(true, ResetMode::InitialValues);
        self.start(false)
    }

    /// Jump the current iteration to `elapsed` seconds (clamped to the
    /// duration) and apply the value. Consumes any pending delay. Fires no
    /// callbacks, even at the end.
    pub fn goto(&self, elapsed: f32) -> Result<()> {
        if !self.is_active() {
            return Err(TweenError::NotPlaying);
        }
        let duration = self.duration();
        let elapsed = elapsed.max(0.0).min(duration);
        let ease = {
            let mut core = self.core_mut();
            core.elapsed_delay = core.delay;
            core.elapsed = elapsed;
            core.ease.clone()
        };
        self.begin_if_pending();
        if !self.is_active() {
            return Ok(());
        }
        match &self.0.node {
            TweenNode::Interpolation(track) => {
                let t = if duration > 0.0 { elapsed / duration } else { 1.0 };
                track.apply(t, &ease);
            }
            TweenNode::Callback(_) => {}
            TweenNode::Group(group) => {
                for child in group.live() {
                    // Children that stopped meanwhile are pruned on the next update.
                    let _ = child.goto(elapsed);
                }
            }
        }
        Ok(())
    }

    pub fn pause(&self) {
        let mut core = self.core_mut();
        if core.status == TweenStatus::Playing {
            core.status = TweenStatus::Paused;
        }
    }

    pub fn resume(&self) {
        let mut core = self.core_mut();
        if core.status == TweenStatus::Paused {
            core.status = TweenStatus::Playing;
        }
    }

    // -- Queries --

    pub fn status(&self) -> TweenStatus {
        self.core().status
    }

    pub fn is_playing(&self) -> bool {
        self.status() == TweenStatus::Playing
    }

    pub fn is_paused(&self) -> bool {
        self.status() == TweenStatus::Paused
    }

    /// Playing or paused.
    pub fn is_active(&self) -> bool {
        self.status().is_active()
    }

    pub fn is_completed(&self) -> bool {
        self.status() == TweenStatus::Completed
    }

    pub fn is_killed(&self) -> bool {
        self.status() == TweenStatus::Killed
    }

    pub fn is_nested(&self) -> bool {
        self.core().nested
    }

    pub fn is_group(&self) -> bool {
        matches!(self.0.node, TweenNode::Group(_))
    }

    /// Duration of one iteration in seconds. Groups report the sum of their
    /// children.
    pub fn duration(&self) -> f32 {
        match &self.0.node {
            TweenNode::Interpolation(track) => track.duration(),
            TweenNode::Callback(_) => 0.0,
            TweenNode::Group(group) => group.duration(),
        }
    }

    /// Elapsed time of the current iteration: 0 when idle, the duration once
    /// completed.
    pub fn elapsed(&self) -> f32 {
        let (status, elapsed) = {
            let core = self.core();
            (core.status, core.elapsed)
        };
        match status {
            TweenStatus::Idle => 0.0,
            TweenStatus::Completed => self.duration(),
            _ => elapsed.min(self.duration()),
        }
    }

    /// Elapsed time over duration, in [0, 1].
    pub fn normalized_progress(&self) -> f32 {
        let duration = self.duration();
        if duration > 0.0 {
            (self.elapsed() / duration).clamp(0.0, 1.0)
        } else if self.is_completed() {
            1.0
        } else {
            0.0
        }
    }

    pub fn delay(&self) -> f32 {
        self.core().delay
    }

    pub fn loops(&self) -> i32 {
        self.core().loops
    }

    pub fn loop_reset_mode(&self) -> ResetMode {
        self.core().loop_reset_mode
    }

    pub fn time_scale(&self) -> f32 {
        self.core().time_scale
    }

    pub fn time_mode(&self) -> TimeMode {
        self.core().time_mode
    }

    pub fn update_mode(&self) -> UpdateMode {
        self.core().update_mode
    }

    /// Leaf tweens count as one; groups count their descendants.
    pub fn tweens_count(&self) -> usize {
        match &self.0.node {
            TweenNode::Group(group) => group.children().iter().map(Tween::tweens_count).sum(),
            _ => 1,
        }
    }

    pub fn playing_tweens_count(&self) -> usize {
        match &self.0.node {
            TweenNode::Group(group) => group.children().iter().map(Tween::playing_tweens_count).sum(),
            _ => usize::from(self.is_playing()),
        }
    }

    fn is_valid(&self) -> bool {
        match &self.0.node {
            TweenNode::Interpolation(track) => track.is_valid(),
            _ => true,
        }
    }

    // -- Configuration --

    fn ensure_idle(&self) -> Result<()> {
        if self.is_active() {
            Err(TweenError::AlreadyPlaying)
        } else {
            Ok(())
        }
    }

    /// Total iterations (`-1` loops forever, `0` and `1` play once) and how
    /// values reset between them.
    pub fn set_loops(&self, loops: i32, mode: ResetMode) -> Result<&Self> {
        self.ensure_idle()?;
        let mut core = self.core_mut();
        core.loops = loops.max(-1);
        core.loop_reset_mode = mode;
        drop(core);
        Ok(self)
    }

    /// Set the ease. Groups pass it on to every child.
    pub fn set_ease(&self, ease: impl Into<EaseFunction>) -> Result<&Self> {
        self.ensure_idle()?;
        self.store_ease(ease.into());
        Ok(self)
    }

    fn store_ease(&self, ease: EaseFunction) {
        if let TweenNode::Group(group) = &self.0.node {
            for child in group.children() {
                child.store_ease(ease.clone());
            }
        }
        self.core_mut().ease = ease;
    }

    /// Seconds to wait before the first iteration.
    pub fn set_delay(&self, delay: f32) -> Result<&Self> {
        if matches!(self.0.node, TweenNode::Callback(_)) {
            return Err(TweenError::DelayOnCallback);
        }
        self.ensure_idle()?;
        let delay = check_non_negative(delay, TweenError::InvalidDelay)?;
        self.core_mut().delay = delay;
        Ok(self)
    }

    /// Allowed at any time; takes effect on the next update. Groups pass it
    /// on to every child. Fires `on_time_scale_changed` when the scale changes.
    pub fn set_time_scale(&self, time_scale: f32, time_mode: TimeMode) -> Result<&Self> {
        let time_scale = check_non_negative(time_scale, TweenError::InvalidTimeScale)?;
        if let TweenNode::Group(group) = &self.0.node {
            for child in group.children() {
                child.set_time_scale(time_scale, time_mode)?;
            }
        }
        let changed = {
            let mut core = self.core_mut();
            let changed = (core.time_scale - time_scale).abs() > 1e-6;
            core.time_scale = time_scale;
            core.time_mode = time_mode;
            changed
        };
        if changed {
            let callback = self.0.callbacks.borrow().on_time_scale_changed.clone();
            if let Some(callback) = callback {
                callback(time_scale);
            }
        }
        Ok(self)
    }

    /// Which manager update phase drives this tween.
    pub fn set_update_mode(&self, update_mode: UpdateMode) -> Result<&Self> {
        self.ensure_idle()?;
        self.core_mut().update_mode = update_mode;
        Ok(self)
    }

    /// Apply a settings preset. Callback tweens skip a zero delay.
    pub fn apply_settings(&self, settings: &TweenSettings) -> Result<&Self> {
        self.ensure_idle()?;
        if settings.delay != 0.0 || !matches!(self.0.node, TweenNode::Callback(_)) {
            self.set_delay(settings.delay)?;
        }
        self.set_ease(settings.ease.clone())?
            .set_loops(settings.loops, settings.loop_reset_mode)?
            .set_time_scale(settings.time_scale, settings.time_mode)?
            .set_update_mode(settings.update_mode)
    }

    // -- Callbacks --

    fn register(&self, event: Event, callback: impl Fn() + 'static) -> &Self {
        self.0.callbacks.borrow_mut().set(event, Rc::new(callback));
        self
    }

    pub fn on_start(&self, callback: impl Fn() + 'static) -> &Self {
        self.register(Event::Start, callback)
    }

    /// Fires after each completed iteration that is followed by another.
    pub fn on_loop(&self, callback: impl Fn() + 'static) -> &Self {
        self.register(Event::Loop, callback)
    }

    pub fn on_reset(&self, callback: impl Fn() + 'static) -> &Self {
        self.register(Event::Reset, callback)
    }

    pub fn on_complete(&self, callback: impl Fn() + 'static) -> &Self {
        self.register(Event::Complete, callback)
    }

    pub fn on_kill(&self, callback: impl Fn() + 'static) -> &Self {
        self.register(Event::Kill, callback)
    }

    pub fn on_complete_or_kill(&self, callback: impl Fn() + 'static) -> &Self {
        self.register(Event::CompleteOrKill, callback)
    }

    /// Receives the new scale.
    pub fn on_time_scale_changed(&self, callback: impl Fn(f32) + 'static) -> &Self {
        self.0.callbacks.borrow_mut().on_time_scale_changed = Some(Rc::new(callback));
        self
    }

    // -- Groups --

    /// Add a child to this group. Rejected without changing anything when
    /// this is not a group, the group is playing, the child is playing or
    /// nested elsewhere, or the child is (or contains) this group.
    /// The child inherits the group's time scale and time mode.
    pub fn add(&self, child: &Tween) -> Result<&Self> {
        let TweenNode::Group(group) = &self.0.node else {
            return Err(TweenError::NotAGroup);
        };
        let rejected = if self.is_active() {
            Some(TweenError::AlreadyPlaying)
        } else if child.is_active() {
            Some(TweenError::ChildPlaying)
        } else if child.is_nested() {
            Some(TweenError::AlreadyNested)
        } else if child == self || child.contains(self) {
            Some(TweenError::CyclicGroup)
        } else {
            None
        };
        if let Some(err) = rejected {
            log::warn!("rejected {} tween added to group: {}", child.0.node.kind(), err);
            return Err(err);
        }

        let (time_scale, time_mode) = {
            let core = self.core();
            (core.time_scale, core.time_mode)
        };
        child.set_time_scale(time_scale, time_mode)?;
        {
            let mut core = child.core_mut();
            core.nested = true;
            core.parent = Rc::downgrade(&self.0);
        }
        group.push(child.clone());
        self.invalidate_ancestors();
        Ok(self)
    }

    /// Whether `tween` is a descendant of this group.
    pub fn contains(&self, tween: &Tween) -> bool {
        match &self.0.node {
            TweenNode::Group(group) => group.contains(tween),
            _ => false,
        }
    }

    /// Children of a group, in insertion order. Empty for other tweens.
    pub fn children(&self) -> Vec<Tween> {
        match &self.0.node {
            TweenNode::Group(group) => group.children(),
            _ => Vec::new(),
        }
    }

    fn invalidate_ancestors(&self) {
        let mut parent = self.core().parent.upgrade();
        while let Some(inner) = parent {
            if let TweenNode::Group(group) = &inner.node {
                group.invalidate_duration();
            }
            parent = inner.core.borrow().parent.upgrade();
        }
    }

    // -- Crate internals for sync and manager --

    pub(crate) fn sync_link(&self) -> RefMut<'_, Option<SyncLink>> {
        self.0.sync.borrow_mut()
    }

    pub(crate) fn manager_id(&self) -> Option<u64> {
        self.core().manager
    }

    pub(crate) fn set_manager(&self, manager: Option<u64>) {
        self.core_mut().manager = manager;
    }

    pub(crate) fn add_waiter(&self, waiter: oneshot::Sender<TweenStatus>) {
        self.0.waiters.borrow_mut().push(waiter);
    }
}

impl PartialEq for Tween {
    fn eq(&self, other: &Self) -> bool {
        self.ptr_eq(other)
    }
}

impl Eq for Tween {}

impl Hash for Tween {
    fn hash<H: Hasher>(&self, state: &mut H) {
        std::ptr::hash(Rc::as_ptr(&self.0), state);
    }
}

impl fmt::Debug for Tween {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let core = self.core();
        f.debug_struct("Tween")
            .field("kind", &self.0.node.kind())
            .field("status", &core.status)
            .field("elapsed", &core.elapsed)
            .field("loops", &core.loops)
            .field("nested", &core.nested)
            .finish()
    }
}
