//! Deterministic harness: a widget on a [`ManualClock`] plus a fixed-rate render loop.

use crate::{
    clock::ManualClock,
    config::ProgressBarConfig,
    foundation::{core::Fps, error::CountdownResult},
    widget::{CountdownProgressBar, FrameSnapshot, Phase},
};

/// Runs a widget against simulated time.
///
/// Each frame advances the tick clock to the frame time, drains the UI queue, then renders. Ticks
/// and frames therefore interleave the way a host toolkit's timer and display link would.
#[derive(Debug)]
pub struct Simulation {
    widget: CountdownProgressBar<ManualClock>,
    clock: ManualClock,
    fps: Fps,
    next_frame: u64,
}

impl Simulation {
    /// Fresh simulation at `t = 0`.
    pub fn new(config: ProgressBarConfig, fps: Fps) -> CountdownResult<Self> {
        let clock = ManualClock::new();
        let widget = CountdownProgressBar::new(config, clock.clone())?;
        Ok(Self {
            widget,
            clock,
            fps,
            next_frame: 0,
        })
    }

    /// Simulated time in seconds.
    pub fn now(&self) -> f64 {
        self.clock.now()
    }

    /// The simulated widget.
    pub fn widget(&self) -> &CountdownProgressBar<ManualClock> {
        &self.widget
    }

    /// Mutable access, e.g. to call `start` directly.
    pub fn widget_mut(&mut self) -> &mut CountdownProgressBar<ManualClock> {
        &mut self.widget
    }

    /// Shared handle to the tick clock.
    pub fn clock(&self) -> &ManualClock {
        &self.clock
    }

    /// Start a countdown now. Animations are committed on the current frame.
    pub fn start(&mut self, duration_secs: f64, show_pulse: bool) -> CountdownResult<FrameSnapshot> {
        self.widget.start(duration_secs, show_pulse)?;
        Ok(self.widget.render_frame(self.now()))
    }

    /// Render the next frame.
    pub fn step(&mut self) -> FrameSnapshot {
        let t = self.fps.frames_to_secs(self.next_frame).max(self.now());
        self.next_frame += 1;
        self.clock.advance_to(t);
        self.widget.pump();
        self.widget.render_frame(t)
    }

    /// Render every frame up to and including `t`, then deliver ticks due by `t`.
    pub fn advance_to(&mut self, t: f64) -> Vec<FrameSnapshot> {
        let mut frames = Vec::new();
        while self.fps.frames_to_secs(self.next_frame) <= t + 1e-9 {
            frames.push(self.step());
        }
        self.clock.advance_to(t);
        self.widget.pump();
        frames
    }

    /// Render frames through the first one at or after `t`, keeping only the last snapshot.
    ///
    /// Returns `None` when that frame was already rendered.
    pub fn seek_to(&mut self, t: f64) -> Option<FrameSnapshot> {
        let target = self.fps.secs_to_frames_ceil(t);
        let mut last = None;
        while self.next_frame <= target {
            last = Some(self.step());
        }
        last
    }

    /// Render frames until the cycle is over and the timer has stopped, or `limit_secs` passes.
    pub fn run_to_completion(&mut self, limit_secs: f64) -> Vec<FrameSnapshot> {
        let mut frames = Vec::new();
        loop {
            let snap = self.step();
            let done = snap.phase == Phase::Idle && !self.widget.is_timer_running();
            frames.push(snap);
            if done || self.now() >= limit_secs {
                break;
            }
        }
        frames
    }
}

#[cfg(test)]
#[path = "../tests/unit/sim.rs"]
mod tests;
