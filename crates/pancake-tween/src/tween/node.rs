// tween/node.rs
//
// What a tween animates. One state machine (`Tween`) drives three kinds of
// node: an interpolation track, a zero-duration callback, or a group of
// child tweens.

use std::cell::{Cell, RefCell};

use super::callbacks::Callback;
use super::track::Track;
use super::Tween;

pub(crate) enum TweenNode {
    Interpolation(Box<dyn Track>),
    Callback(Callback),
    Group(Group),
}

impl TweenNode {
    pub(crate) fn kind(&self) -> &'static str {
        match self {
            TweenNode::Interpolation(_) => "interpolation",
            TweenNode::Callback(_) => "callback",
            TweenNode::Group(_) => "group",
        }
    }
}

/// Children of a group tween.
///
/// `duration` reports the sum of every child (sequential bookkeeping) while
/// `live` holds every child still playing, all of which are advanced each
/// frame (parallel execution).
#[derive(Default)]
pub(crate) struct Group {
    children: RefCell<Vec<Tween>>,
    live: RefCell<Vec<Tween>>,
    duration: Cell<Option<f32>>,
}

impl Group {
    pub(crate) fn children(&self) -> Vec<Tween> {
        self.children.borrow().clone()
    }

    pub(crate) fn live(&self) -> Vec<Tween> {
        self.live.borrow().clone()
    }

    pub(crate) fn push(&self, child: Tween) {
        self.children.borrow_mut().push(child);
        self.invalidate_duration();
    }

    pub(crate) fn set_live(&self, live: Vec<Tween>) {
        *self.live.borrow_mut() = live;
    }

    pub(crate) fn take_live(&self) -> Vec<Tween> {
        std::mem::take(&mut *self.live.borrow_mut())
    }

    /// Drop children that stopped playing. Returns true when none are left.
    pub(crate) fn prune_live(&self) -> bool {
        let mut live = self.live.borrow_mut();
        live.retain(Tween::is_active);
        live.is_empty()
    }

    pub(crate) fn is_live_empty(&self) -> bool {
        self.live.borrow().is_empty()
    }

    pub(crate) fn invalidate_duration(&self) {
        self.duration.set(None);
    }

    pub(crate) fn duration(&self) -> f32 {
        if let Some(duration) = self.duration.get() {
            return duration;
        }
        let duration = self.children().iter().map(Tween::duration).sum();
        self.duration.set(Some(duration));
        duration
    }

    pub(crate) fn contains(&self, tween: &Tween) -> bool {
        self.children().iter().any(|child| child == tween || child.contains(tween))
    }
}
