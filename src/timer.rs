//! Timer Driver: one repeating tick source per widget, stoppable at any time.

use crate::{
    foundation::core::Generation,
    ui::{UiEvent, UiSender},
};

/// Identifies one scheduled repeating timer. Never reused by a clock.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TimerId(pub u64);

/// Where a clock delivers ticks and which cycle they belong to.
#[derive(Clone, Debug)]
pub struct TickTarget {
    /// UI queue the tick is posted to.
    pub sender: UiSender,
    /// Cycle stamped on every tick.
    pub generation: Generation,
}

impl TickTarget {
    /// Post one tick for `timer`. Returns `false` when the receiver is gone.
    pub fn fire(&self, timer: TimerId) -> bool {
        self.sender.post(UiEvent::Tick {
            timer,
            generation: self.generation,
        })
    }
}

/// A source of repeating ticks.
pub trait TickClock {
    /// Start posting a tick to `target` every `interval_secs`.
    fn schedule_repeating(&mut self, interval_secs: f64, target: TickTarget) -> TimerId;

    /// Stop a timer. Unknown or already-cancelled ids are ignored.
    fn cancel(&mut self, id: TimerId);

    /// Number of repeating timers still scheduled.
    fn scheduled_count(&self) -> usize;
}

/// Owns at most one live timer on a [`TickClock`].
#[derive(Debug)]
pub struct TimerDriver<C: TickClock> {
    clock: C,
    active: Option<(TimerId, Generation)>,
}

impl<C: TickClock> TimerDriver<C> {
    /// Idle driver on `clock`.
    pub fn new(clock: C) -> Self {
        Self {
            clock,
            active: None,
        }
    }

    /// Schedule a repeating tick, invalidating any timer started earlier.
    pub fn start(&mut self, interval_secs: f64, target: TickTarget) -> TimerId {
        self.stop();
        let generation = target.generation;
        let id = self.clock.schedule_repeating(interval_secs, target);
        tracing::trace!(timer = id.0, generation = generation.0, interval_secs, "timer started");
        self.active = Some((id, generation));
        id
    }

    /// Cancel the live timer. Returns `true` if one was running; idempotent.
    pub fn stop(&mut self) -> bool {
        let Some((id, generation)) = self.active.take() else {
            return false;
        };
        self.clock.cancel(id);
        tracing::trace!(timer = id.0, generation = generation.0, "timer stopped");
        true
    }

    /// Return `true` while a timer is live.
    pub fn is_running(&self) -> bool {
        self.active.is_some()
    }

    /// Return `true` when a tick stamped `(timer, generation)` belongs to the live timer.
    ///
    /// Ticks already queued when their timer was stopped or replaced fail this check.
    pub fn accepts(&self, timer: TimerId, generation: Generation) -> bool {
        self.active == Some((timer, generation))
    }

    /// Underlying clock.
    pub fn clock(&self) -> &C {
        &self.clock
    }
}

#[cfg(test)]
#[path = "../tests/unit/timer.rs"]
mod tests;
