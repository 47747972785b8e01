/// Remaining time at or below this counts as zero.
const ZERO_EPSILON: f64 = 1e-9;

/// Result of applying one tick.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum TickOutcome {
    /// Time is left; carries the new remaining seconds.
    Remaining(f64),
    /// The countdown reached zero on this tick.
    Finished,
}

/// Per-cycle countdown bookkeeping. Replaced wholesale on every `start`.
#[derive(Clone, Debug, PartialEq, serde::Serialize)]
pub struct CountdownState {
    /// Requested duration.
    pub duration_secs: f64,
    /// Time left, never negative and never increasing within a cycle.
    pub remaining_secs: f64,
    /// Whether this cycle shows the pulse.
    pub pulse_enabled: bool,
    /// Fixed tick cadence.
    pub tick_interval_secs: f64,
    ticks: u64,
}

impl CountdownState {
    /// Fresh state with the full duration remaining.
    pub fn new(duration_secs: f64, pulse_enabled: bool, tick_interval_secs: f64) -> Self {
        Self {
            duration_secs,
            remaining_secs: duration_secs,
            pulse_enabled,
            tick_interval_secs,
            ticks: 0,
        }
    }

    /// Count one tick and recompute the remaining time.
    ///
    /// Remaining time is derived from the tick count rather than accumulated, so float error does
    /// not add an extra tick at the end of the countdown.
    pub fn apply_tick(&mut self) -> TickOutcome {
        if self.is_finished() {
            return TickOutcome::Finished;
        }
        self.ticks += 1;
        let left = self.duration_secs - (self.ticks as f64) * self.tick_interval_secs;
        if left <= ZERO_EPSILON {
            self.remaining_secs = 0.0;
            return TickOutcome::Finished;
        }
        self.remaining_secs = left.min(self.remaining_secs);
        TickOutcome::Remaining(self.remaining_secs)
    }

    /// Return `true` once the countdown hit zero.
    pub fn is_finished(&self) -> bool {
        self.remaining_secs <= 0.0
    }

    /// Ticks applied this cycle.
    pub fn ticks(&self) -> u64 {
        self.ticks
    }
}

/// Label shown right after `start`: the duration as given (`5.0`, `2.5`, `0.25`).
pub fn initial_label(duration_secs: f64) -> String {
    format!("{duration_secs:?}")
}

/// Label shown after a tick: one decimal place.
pub fn remaining_label(remaining_secs: f64) -> String {
    if remaining_secs <= 0.0 {
        // Also folds -0.0, which would otherwise print as "-0.0".
        return "0.0".to_owned();
    }
    format!("{remaining_secs:.1}")
}

#[cfg(test)]
#[path = "../tests/unit/state.rs"]
mod tests;
