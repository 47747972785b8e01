//! [`TickClock`] implementations: a deterministic simulated clock and a real-time thread clock.

use std::{
    cell::RefCell,
    collections::HashMap,
    rc::Rc,
    sync::{
        Arc,
        atomic::{AtomicBool, AtomicUsize, Ordering},
    },
    thread,
    time::{Duration, Instant},
};

use crate::timer::{TickClock, TickTarget, TimerId};

/// Float slack so a tick scheduled at exactly `t` fires when the clock reaches `t`.
const FIRE_EPSILON: f64 = 1e-9;

#[derive(Debug)]
struct ManualTimer {
    id: TimerId,
    origin: f64,
    interval: f64,
    fired: u64,
    target: TickTarget,
}

impl ManualTimer {
    fn next_fire(&self) -> f64 {
        self.origin + ((self.fired + 1) as f64) * self.interval
    }
}

#[derive(Debug, Default)]
struct ManualState {
    now: f64,
    next_id: u64,
    timers: Vec<ManualTimer>,
}

/// Simulated clock advanced explicitly by the caller.
///
/// Clones share one schedule: hand one clone to the widget and keep another to drive time.
#[derive(Clone, Debug, Default)]
pub struct ManualClock {
    inner: Rc<RefCell<ManualState>>,
}

impl ManualClock {
    /// Clock at `t = 0` with nothing scheduled.
    pub fn new() -> Self {
        Self::default()
    }

    /// Current simulated time in seconds.
    pub fn now(&self) -> f64 {
        self.inner.borrow().now
    }

    /// Advance by `dt` seconds. See [`ManualClock::advance_to`].
    pub fn advance_by(&self, dt: f64) -> usize {
        let t = self.now() + dt.max(0.0);
        self.advance_to(t)
    }

    /// Move time forward to `t`, posting every tick that falls due, in time order.
    ///
    /// Returns the number of ticks posted. Moving backwards is ignored.
    pub fn advance_to(&self, t: f64) -> usize {
        let mut state = self.inner.borrow_mut();
        if t < state.now {
            return 0;
        }

        let mut posted = 0;
        loop {
            let due = state
                .timers
                .iter()
                .enumerate()
                .map(|(i, timer)| (i, timer.next_fire()))
                .filter(|(_, at)| *at <= t + FIRE_EPSILON)
                .min_by(|a, b| a.1.total_cmp(&b.1));
            let Some((idx, at)) = due else {
                break;
            };

            state.now = state.now.max(at);
            let timer = &mut state.timers[idx];
            timer.fired += 1;
            if timer.target.fire(timer.id) {
                posted += 1;
            } else {
                // Receiver dropped without cancelling; nobody can observe this timer anymore.
                tracing::trace!(timer = timer.id.0, "tick receiver gone, dropping timer");
                state.timers.remove(idx);
            }
        }
        state.now = t;
        posted
    }
}

impl TickClock for ManualClock {
    fn schedule_repeating(&mut self, interval_secs: f64, target: TickTarget) -> TimerId {
        let mut state = self.inner.borrow_mut();
        state.next_id += 1;
        let id = TimerId(state.next_id);
        let origin = state.now;
        state.timers.push(ManualTimer {
            id,
            origin,
            interval: interval_secs,
            fired: 0,
            target,
        });
        id
    }

    fn cancel(&mut self, id: TimerId) {
        self.inner.borrow_mut().timers.retain(|t| t.id != id);
    }

    fn scheduled_count(&self) -> usize {
        self.inner.borrow().timers.len()
    }
}

/// Observes how many [`ThreadClock`] timer threads are still alive, even after the clock is gone.
#[derive(Clone, Debug)]
pub struct TimerProbe(Arc<AtomicUsize>);

impl TimerProbe {
    /// Timer threads that have not exited yet.
    pub fn live(&self) -> usize {
        self.0.load(Ordering::SeqCst)
    }
}

struct LiveGuard(Arc<AtomicUsize>);

impl Drop for LiveGuard {
    fn drop(&mut self) {
        self.0.fetch_sub(1, Ordering::SeqCst);
    }
}

/// Real-time clock: every scheduled timer runs on its own background thread.
///
/// Ticks cross into the UI queue; cancellation flips a flag the thread checks after each sleep, so
/// a thread exits at most one interval after [`TickClock::cancel`].
#[derive(Debug, Default)]
pub struct ThreadClock {
    next_id: u64,
    cancels: HashMap<TimerId, Arc<AtomicBool>>,
    live: Arc<AtomicUsize>,
}

impl ThreadClock {
    /// Clock with no timers.
    pub fn new() -> Self {
        Self::default()
    }

    /// Handle for observing live timer threads.
    pub fn probe(&self) -> TimerProbe {
        TimerProbe(Arc::clone(&self.live))
    }
}

impl TickClock for ThreadClock {
    fn schedule_repeating(&mut self, interval_secs: f64, target: TickTarget) -> TimerId {
        self.next_id += 1;
        let id = TimerId(self.next_id);
        let cancelled = Arc::new(AtomicBool::new(false));
        self.cancels.insert(id, Arc::clone(&cancelled));

        self.live.fetch_add(1, Ordering::SeqCst);
        let guard = LiveGuard(Arc::clone(&self.live));
        let interval = Duration::from_secs_f64(interval_secs);

        let spawned = thread::Builder::new()
            .name(format!("countdown-timer-{}", id.0))
            .spawn(move || {
                let _guard = guard;
                let origin = Instant::now();
                let mut fired: u32 = 0;
                loop {
                    // Deadlines are anchored at the origin so sleep overshoot does not accumulate.
                    let deadline = origin + interval * (fired + 1);
                    thread::sleep(deadline.saturating_duration_since(Instant::now()));
                    if cancelled.load(Ordering::SeqCst) {
                        break;
                    }
                    fired += 1;
                    if !target.fire(id) {
                        break;
                    }
                }
            });
        if let Err(e) = spawned {
            tracing::warn!(timer = id.0, "failed to spawn timer thread: {e}");
        }
        id
    }

    fn cancel(&mut self, id: TimerId) {
        if let Some(flag) = self.cancels.remove(&id) {
            flag.store(true, Ordering::SeqCst);
        }
    }

    fn scheduled_count(&self) -> usize {
        self.cancels.len()
    }
}

impl Drop for ThreadClock {
    fn drop(&mut self) {
        for flag in self.cancels.values() {
            flag.store(true, Ordering::SeqCst);
        }
    }
}

#[cfg(test)]
#[path = "../tests/unit/clock.rs"]
mod tests;
