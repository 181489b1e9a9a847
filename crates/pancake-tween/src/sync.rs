// sync.rs
//
// Playback alignment between independently started tweens.
//
// Usage:
//   let sync = SyncContext::new();           // one per scene/session
//   sync.sync_with_primary(&pulse_a, None);  // keyed by duration
//   sync.sync_with_primary(&pulse_b, None);
//   pulse_a.start(false)?;
//   ...
//   pulse_b.start(false)?;                   // jumps to pulse_a's elapsed time
//
// Tweens leave their set when they complete or are killed and rejoin it when
// they start again. Tweens with equal durations share the default key; pass an
// explicit key to keep unrelated tweens apart.

use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::{Rc, Weak};

use crate::tween::Tween;

#[derive(Default)]
struct SyncRegistry {
    sets: HashMap<String, Vec<Tween>>,
}

impl SyncRegistry {
    fn insert(&mut self, key: &str, tween: &Tween) {
        let set = self.sets.entry(key.to_owned()).or_default();
        if !set.contains(tween) {
            set.push(tween.clone());
        }
    }

    fn remove(&mut self, key: &str, tween: &Tween) -> bool {
        let Some(set) = self.sets.get_mut(key) else {
            return false;
        };
        let before = set.len();
        set.retain(|member| member != tween);
        let removed = set.len() != before;
        if set.is_empty() {
            self.sets.remove(key);
        }
        removed
    }

    fn remove_everywhere(&mut self, tween: &Tween) -> bool {
        let mut removed = false;
        self.sets.retain(|_, set| {
            let before = set.len();
            set.retain(|member| member != tween);
            removed |= set.len() != before;
            !set.is_empty()
        });
        removed
    }

    /// First other member of `key` that is currently playing.
    fn primary(&self, key: &str, tween: &Tween) -> Option<Tween> {
        self.sets
            .get(key)?
            .iter()
            .find(|member| *member != tween && member.is_playing())
            .cloned()
    }
}

/// Back-reference from a tween to the set it was synced into.
#[derive(Clone)]
pub(crate) struct SyncLink {
    registry: Weak<RefCell<SyncRegistry>>,
    key: String,
}

impl SyncLink {
    fn is_in(&self, registry: &Rc<RefCell<SyncRegistry>>) -> bool {
        Weak::ptr_eq(&self.registry, &Rc::downgrade(registry))
    }
}

/// Registry of sync sets: key -> tweens aligned with each other on start.
/// Cloning shares the same registry.
#[derive(Clone, Default)]
pub struct SyncContext {
    registry: Rc<RefCell<SyncRegistry>>,
}

impl SyncContext {
    pub fn new() -> Self {
        Self::default()
    }

    /// Key derived from the tween's duration. `None` for killed tweens.
    pub fn default_key(tween: &Tween) -> Option<String> {
        if tween.is_killed() {
            return None;
        }
        Some(format!("duration:{:.4}", tween.duration()))
    }

    /// Register `tween` under `key` (or its default key). From now on, when
    /// it starts it jumps to the elapsed time of the first other playing
    /// member; if it is already playing it aligns immediately.
    /// Returns the key used, or `None` when no key could be derived.
    pub fn sync_with_primary(&self, tween: &Tween, key: Option<&str>) -> Option<String> {
        let key = key.map(str::to_owned).or_else(|| Self::default_key(tween))?;

        let previous = tween.sync_link().take();
        if let Some(previous) = previous {
            if let Some(registry) = previous.registry.upgrade() {
                registry.borrow_mut().remove(&previous.key, tween);
            }
        }

        self.registry.borrow_mut().insert(&key, tween);
        *tween.sync_link() = Some(SyncLink {
            registry: Rc::downgrade(&self.registry),
            key: key.clone(),
        });
        log::debug!("tween registered for sync under {:?}", key);

        if tween.is_active() {
            self.align(tween, &key);
        }
        Some(key)
    }

    /// Align `tween` to its primary right now. Returns whether a primary was
    /// found.
    pub fn sync_again(&self, tween: &Tween, key: Option<&str>) -> bool {
        match self.resolve_key(tween, key) {
            Some(key) => self.align(tween, &key),
            None => false,
        }
    }

    /// Remove `tween` from the set under `key`, else the key it was
    /// registered under, else its default key. With no key at all every set
    /// is scanned. Returns whether it was a member.
    pub fn unregister(&self, tween: &Tween, key: Option<&str>) -> bool {
        let key = self.resolve_key(tween, key);
        self.forget_link(tween);
        let mut registry = self.registry.borrow_mut();
        match key {
            Some(key) => registry.remove(&key, tween),
            None => registry.remove_everywhere(tween),
        }
    }

    /// Remove `tween` from every set.
    pub fn unregister_all(&self, tween: &Tween) -> bool {
        self.forget_link(tween);
        self.registry.borrow_mut().remove_everywhere(tween)
    }

    pub fn clear(&self) {
        self.registry.borrow_mut().sets.clear();
    }

    /// Number of non-empty sync sets.
    pub fn len(&self) -> usize {
        self.registry.borrow().sets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.registry.borrow().sets.is_empty()
    }

    pub fn members(&self, key: &str) -> Vec<Tween> {
        self.registry.borrow().sets.get(key).cloned().unwrap_or_default()
    }

    pub fn contains(&self, tween: &Tween) -> bool {
        self.registry.borrow().sets.values().any(|set| set.contains(tween))
    }

    fn resolve_key(&self, tween: &Tween, key: Option<&str>) -> Option<String> {
        key.map(str::to_owned)
            .or_else(|| self.linked_key(tween))
            .or_else(|| Self::default_key(tween))
    }

    fn linked_key(&self, tween: &Tween) -> Option<String> {
        let link = tween.sync_link().clone()?;
        link.is_in(&self.registry).then_some(link.key)
    }

    fn forget_link(&self, tween: &Tween) {
        let mut link = tween.sync_link();
        if link.as_ref().is_some_and(|link| link.is_in(&self.registry)) {
            *link = None;
        }
    }

    fn align(&self, tween: &Tween, key: &str) -> bool {
        let primary = self.registry.borrow().primary(key, tween);
        let Some(primary) = primary else {
            return false;
        };
        let elapsed = primary.elapsed();
        match tween.goto(elapsed) {
            Ok(()) => {
                log::debug!("tween synced to primary under {:?} at {:.3}s", key, elapsed);
                true
            }
            Err(_) => false,
        }
    }
}

/// Rejoin the linked set and jump to the primary. Called when a tween starts.
pub(crate) fn align_on_start(tween: &Tween) {
    let link = tween.sync_link().clone();
    let Some(link) = link else {
        return;
    };
    let Some(registry) = link.registry.upgrade() else {
        return;
    };
    registry.borrow_mut().insert(&link.key, tween);
    SyncContext { registry }.align(tween, &link.key);
}

/// Leave the linked set. Called when a tween completes or is killed; the
/// link is kept so a replay rejoins.
pub(crate) fn leave(tween: &Tween) {
    let Some(link) = tween.sync_link().clone() else {
        return;
    };
    if let Some(registry) = link.registry.upgrade() {
        registry.borrow_mut().remove(&link.key, tween);
    }
}
