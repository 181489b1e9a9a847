// tween/callbacks.rs
//
// Per-tween callback slots, one per lifecycle event. Setting a slot replaces
// the previous callback for that event.

use std::rc::Rc;

pub(crate) type Callback = Rc<dyn Fn()>;
pub(crate) type ScaleCallback = Rc<dyn Fn(f32)>;

/// Lifecycle events a tween reports through its callbacks.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Event {
    Start,
    Loop,
    Reset,
    Complete,
    Kill,
    CompleteOrKill,
}

/// One slot per event. Slots are cloned out before invocation so a callback
/// may freely touch the tween that fired it.
#[derive(Default)]
pub(crate) struct Callbacks {
    on_start: Option<Callback>,
    on_loop: Option<Callback>,
    on_reset: Option<Callback>,
    on_complete: Option<Callback>,
    on_kill: Option<Callback>,
    on_complete_or_kill: Option<Callback>,
    pub(crate) on_time_scale_changed: Option<ScaleCallback>,
}

impl Callbacks {
    pub(crate) fn get(&self, event: Event) -> Option<Callback> {
        let slot = match event {
            Event::Start => &self.on_start,
            Event::Loop => &self.on_loop,
            Event::Reset => &self.on_reset,
            Event::Complete => &self.on_complete,
            Event::Kill => &self.on_kill,
            Event::CompleteOrKill => &self.on_complete_or_kill,
        };
        slot.clone()
    }

    pub(crate) fn set(&mut self, event: Event, callback: Callback) {
        let slot = match event {
            Event::Start => &mut self.on_start,
            Event::Loop => &mut self.on_loop,
            Event::Reset => &mut self.on_reset,
            Event::Complete => &mut self.on_complete,
            Event::Kill => &mut self.on_kill,
            Event::CompleteOrKill => &mut self.on_complete_or_kill,
        };
        *slot = Some(callback);
    }
}
