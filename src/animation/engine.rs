use smallvec::SmallVec;

use crate::{
    animation::anim::{Animation, FillMode, Property},
    foundation::error::CountdownResult,
    layers::LayerId,
};

/// Opaque reference to one animation instance attached to the engine.
///
/// Ids are never reused, so a handle of a replaced animation can never alias the new one.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize)]
pub struct AnimationHandle(u64);

impl AnimationHandle {
    /// Raw id, for logging.
    pub fn id(self) -> u64 {
        self.0
    }
}

/// Notification produced while advancing the engine.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AnimationEvent {
    /// The animation ran its full active time. Never emitted for cancelled or infinite animations.
    Finished(AnimationHandle),
}

#[derive(Debug)]
struct Slot {
    handle: AnimationHandle,
    layer: LayerId,
    key: &'static str,
    anim: Animation,
    // Bound on the first `advance` after attaching, like a render-server commit.
    begin: Option<f64>,
    notify: bool,
    finished: bool,
}

impl Slot {
    fn elapsed(&self, now: f64) -> f64 {
        self.begin.map_or(0.0, |b| (now - b).max(0.0))
    }
}

/// Declarative animation engine sampled by a render loop.
///
/// Animations are attached to a `(layer, key)` slot; attaching to an occupied slot cancels the
/// previous occupant without a completion event.
#[derive(Debug, Default)]
pub struct AnimationEngine {
    next_id: u64,
    slots: Vec<Slot>,
    now: Option<f64>,
}

impl AnimationEngine {
    /// Empty engine.
    pub fn new() -> Self {
        Self::default()
    }

    /// Attach `anim` to `layer` under `key`, replacing whatever ran there.
    ///
    /// When `notify_completion` is set, [`AnimationEngine::advance`] reports
    /// [`AnimationEvent::Finished`] exactly once after the animation's full active time.
    pub fn add(
        &mut self,
        layer: LayerId,
        key: &'static str,
        anim: Animation,
        notify_completion: bool,
    ) -> CountdownResult<AnimationHandle> {
        anim.validate()?;
        if let Some(old) = self.remove(layer, key) {
            tracing::trace!(?layer, key, old = old.id(), "replacing running animation");
        }

        self.next_id += 1;
        let handle = AnimationHandle(self.next_id);
        self.slots.push(Slot {
            handle,
            layer,
            key,
            anim,
            begin: None,
            notify: notify_completion,
            finished: false,
        });
        Ok(handle)
    }

    /// Detach the animation in `(layer, key)`. Safe on an empty slot.
    pub fn remove(&mut self, layer: LayerId, key: &'static str) -> Option<AnimationHandle> {
        let idx = self
            .slots
            .iter()
            .position(|s| s.layer == layer && s.key == key)?;
        Some(self.slots.remove(idx).handle)
    }

    /// Detach every animation on `layer`, returning how many were removed.
    pub fn remove_all(&mut self, layer: LayerId) -> usize {
        let before = self.slots.len();
        self.slots.retain(|s| s.layer != layer);
        before - self.slots.len()
    }

    /// Move the engine clock to `now` and collect completions.
    pub fn advance(&mut self, now: f64) -> SmallVec<[AnimationEvent; 2]> {
        let now = match self.now {
            Some(prev) if now < prev => prev,
            _ => now,
        };
        self.now = Some(now);

        let mut events = SmallVec::new();
        for slot in &mut self.slots {
            slot.begin.get_or_insert(now);
            if slot.finished || !slot.anim.is_complete(slot.elapsed(now)) {
                continue;
            }
            slot.finished = true;
            if slot.notify {
                events.push(AnimationEvent::Finished(slot.handle));
            }
        }
        self.slots
            .retain(|s| !(s.finished && s.anim.timing.fill == FillMode::Removed));
        events
    }

    /// Presentation value for `property` on `layer`, `None` when no animation drives it.
    ///
    /// The most recently attached animation wins.
    pub fn value(&self, layer: LayerId, property: Property) -> Option<f64> {
        let now = self.now.unwrap_or(0.0);
        self.slots
            .iter()
            .rev()
            .filter(|s| s.layer == layer && s.anim.drives(property))
            .find_map(|s| s.anim.sample(property, s.elapsed(now)))
    }

    /// Return `true` while `handle` is attached and has not finished.
    pub fn is_running(&self, handle: AnimationHandle) -> bool {
        self.slots
            .iter()
            .any(|s| s.handle == handle && !s.finished)
    }

    /// Return `true` while `handle` is attached (running or holding its end value).
    pub fn contains(&self, handle: AnimationHandle) -> bool {
        self.slots.iter().any(|s| s.handle == handle)
    }

    /// Number of attached animations.
    pub fn len(&self) -> usize {
        self.slots.len()
    }

    /// Return `true` when nothing is attached.
    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    /// Last time passed to [`AnimationEngine::advance`].
    pub fn now(&self) -> Option<f64> {
        self.now
    }
}

#[cfg(test)]
#[path = "../../tests/unit/animation/engine.rs"]
mod tests;
