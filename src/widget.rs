//! Countdown controller: ties the timer, the stroke animation and the pulse animation together.

use crate::{
    animation::{
        anim::{Animation, Channel, FillMode, Property, Repeat, Timing},
        engine::{AnimationEngine, AnimationEvent, AnimationHandle},
    },
    config::ProgressBarConfig,
    foundation::{
        core::Generation,
        error::{CountdownError, CountdownResult},
    },
    layers::{LayerId, ProgressLayers},
    state::{CountdownState, TickOutcome, initial_label, remaining_label},
    timer::{TickClock, TickTarget, TimerDriver, TimerId},
    ui::{UiEvent, UiQueue, UiSender},
};

const STROKE_KEY: &str = "foregroundAnimation";
const PULSE_KEY: &str = "pulseAnimation";

/// Controller phase.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Phase {
    /// No countdown, or the last one completed.
    #[default]
    Idle,
    /// A countdown cycle is in flight.
    Running,
}

/// Sampled pulse values for one frame.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize)]
pub struct PulseSample {
    /// Uniform scale about the view center.
    pub scale: f64,
    /// Layer opacity.
    pub opacity: f64,
}

/// Everything a renderer needs for one frame, beyond the static layer tree.
#[derive(Clone, Debug, PartialEq, serde::Serialize)]
pub struct FrameSnapshot {
    /// Render-loop time of this frame.
    pub time_secs: f64,
    /// Label text.
    pub label: String,
    /// Drawn fraction of the progress ring.
    pub stroke_fraction: f64,
    /// Pulse values, `None` while no pulse animation runs.
    pub pulse: Option<PulseSample>,
    /// Controller phase after this frame.
    pub phase: Phase,
    /// Countdown cycle shown.
    pub generation: Generation,
}

/// Circular countdown progress indicator.
///
/// Owns one timer on clock `C`, one animation engine and its layer tree. All mutation happens on
/// the owning thread: ticks are queued by the clock and applied in [`CountdownProgressBar::pump`],
/// animation completions are delivered by [`CountdownProgressBar::render_frame`].
#[derive(Debug)]
pub struct CountdownProgressBar<C: TickClock> {
    config: ProgressBarConfig,
    layers: ProgressLayers,
    engine: AnimationEngine,
    timer: TimerDriver<C>,
    queue: UiQueue,
    state: Option<CountdownState>,
    phase: Phase,
    generation: Generation,
    stroke: Option<AnimationHandle>,
    pulse: Option<AnimationHandle>,
}

impl<C: TickClock> CountdownProgressBar<C> {
    /// Build the widget and its layers. Nothing runs until [`CountdownProgressBar::start`].
    pub fn new(config: ProgressBarConfig, clock: C) -> CountdownResult<Self> {
        let layers = ProgressLayers::build(&config)?;
        Ok(Self {
            config,
            layers,
            engine: AnimationEngine::new(),
            timer: TimerDriver::new(clock),
            queue: UiQueue::new(),
            state: None,
            phase: Phase::Idle,
            generation: Generation::default(),
            stroke: None,
            pulse: None,
        })
    }

    /// Start a countdown of `duration_secs`, cancelling any countdown in flight.
    ///
    /// The label shows the duration immediately; the stroke fills over `duration_secs`; the pulse
    /// runs until the stroke completes when `show_pulse` is set.
    ///
    /// Non-finite or non-positive durations are rejected and leave the current cycle untouched.
    #[tracing::instrument(skip(self), fields(generation))]
    pub fn start(&mut self, duration_secs: f64, show_pulse: bool) -> CountdownResult<()> {
        if !duration_secs.is_finite() || duration_secs <= 0.0 {
            return Err(CountdownError::validation(format!(
                "countdown duration must be finite and > 0 (got {duration_secs})"
            )));
        }

        // Invalidate everything from the previous cycle before building the new one.
        self.timer.stop();
        self.stop_pulse();
        self.generation = self.generation.next();
        tracing::Span::current().record("generation", self.generation.0);

        let state = CountdownState::new(
            duration_secs,
            show_pulse,
            self.config.tick_interval_secs,
        );
        self.layers.label.text = initial_label(duration_secs);

        self.animate_stroke(duration_secs)?;
        if state.pulse_enabled {
            self.start_pulse()?;
        }

        let target = TickTarget {
            sender: self.queue.sender(),
            generation: self.generation,
        };
        self.timer.start(state.tick_interval_secs, target);

        self.state = Some(state);
        self.phase = Phase::Running;
        tracing::debug!(duration_secs, show_pulse, "countdown started");
        Ok(())
    }

    /// Start with the configured default duration.
    pub fn start_default(&mut self, show_pulse: bool) -> CountdownResult<()> {
        self.start(self.config.default_duration_secs, show_pulse)
    }

    /// Apply every queued tick. Returns how many ticks were accepted.
    pub fn pump(&mut self) -> usize {
        let events: Vec<UiEvent> = self.queue.drain().collect();
        let mut applied = 0;
        for event in events {
            match event {
                UiEvent::Tick { timer, generation } => {
                    if self.on_tick(timer, generation) {
                        applied += 1;
                    }
                }
            }
        }
        applied
    }

    /// Advance the animation engine to `now_secs`, deliver completions, and sample the frame.
    pub fn render_frame(&mut self, now_secs: f64) -> FrameSnapshot {
        for event in self.engine.advance(now_secs) {
            match event {
                AnimationEvent::Finished(handle) => self.on_animation_finished(handle),
            }
        }
        self.snapshot()
    }

    /// Current frame without advancing the engine.
    pub fn snapshot(&self) -> FrameSnapshot {
        FrameSnapshot {
            time_secs: self.engine.now().unwrap_or(0.0),
            label: self.layers.label.text.clone(),
            stroke_fraction: self.stroke_fraction(),
            pulse: self.pulse_sample(),
            phase: self.phase,
            generation: self.generation,
        }
    }

    /// Label text.
    pub fn label(&self) -> &str {
        &self.layers.label.text
    }

    /// Controller phase.
    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// Current countdown cycle.
    pub fn generation(&self) -> Generation {
        self.generation
    }

    /// Remaining seconds of the current cycle, `None` before the first start.
    pub fn remaining_secs(&self) -> Option<f64> {
        self.state.as_ref().map(|s| s.remaining_secs)
    }

    /// Countdown bookkeeping of the current cycle.
    pub fn state(&self) -> Option<&CountdownState> {
        self.state.as_ref()
    }

    /// Return `true` while the tick timer is live.
    pub fn is_timer_running(&self) -> bool {
        self.timer.is_running()
    }

    /// Return `true` while a pulse animation is attached.
    pub fn is_pulse_running(&self) -> bool {
        self.pulse.is_some_and(|h| self.engine.is_running(h))
    }

    /// Return `true` while the stroke animation has not completed.
    pub fn is_stroke_running(&self) -> bool {
        self.stroke.is_some_and(|h| self.engine.is_running(h))
    }

    /// Presentation stroke fraction.
    pub fn stroke_fraction(&self) -> f64 {
        self.presentation(LayerId::Foreground, Property::StrokeEnd)
    }

    /// Presentation pulse values, `None` when no pulse runs.
    pub fn pulse_sample(&self) -> Option<PulseSample> {
        if !self.is_pulse_running() {
            return None;
        }
        Some(PulseSample {
            scale: self.presentation(LayerId::Pulse, Property::Scale),
            opacity: self.presentation(LayerId::Pulse, Property::Opacity),
        })
    }

    /// Static layer tree.
    pub fn layers(&self) -> &ProgressLayers {
        &self.layers
    }

    /// Configuration the widget was built with.
    pub fn config(&self) -> &ProgressBarConfig {
        &self.config
    }

    /// Sender for posting UI events from other threads.
    pub fn ui_sender(&self) -> UiSender {
        self.queue.sender()
    }

    /// Tick clock the timer runs on.
    pub fn clock(&self) -> &C {
        self.timer.clock()
    }

    fn presentation(&self, layer: LayerId, property: Property) -> f64 {
        self.engine
            .value(layer, property)
            .unwrap_or_else(|| self.layers.shape(layer).model_value(property))
    }

    fn on_tick(&mut self, timer: TimerId, generation: Generation) -> bool {
        if !self.timer.accepts(timer, generation) {
            tracing::trace!(timer = timer.0, generation = generation.0, "dropping stale tick");
            return false;
        }
        let Some(state) = self.state.as_mut() else {
            return false;
        };

        match state.apply_tick() {
            TickOutcome::Remaining(left) => {
                self.layers.label.text = remaining_label(left);
            }
            TickOutcome::Finished => {
                self.layers.label.text = remaining_label(0.0);
                self.timer.stop();
                tracing::debug!(generation = generation.0, "countdown reached zero");
            }
        }
        true
    }

    fn on_animation_finished(&mut self, handle: AnimationHandle) {
        if self.stroke != Some(handle) {
            tracing::trace!(handle = handle.id(), "ignoring completion of superseded animation");
            return;
        }
        // The timer may still be live: label and stroke run on separate clocks.
        self.stop_pulse();
        self.timer.stop();
        self.phase = Phase::Idle;
        tracing::debug!(generation = self.generation.0, "countdown cycle complete");
    }

    fn animate_stroke(&mut self, duration_secs: f64) -> CountdownResult<()> {
        let anim = Animation::basic(
            Property::StrokeEnd,
            0.0,
            1.0,
            Timing {
                duration_secs,
                ease: self.config.stroke_ease,
                repeat: Repeat::Once,
                fill: FillMode::Forwards,
            },
        );
        let handle = self.engine.add(LayerId::Foreground, STROKE_KEY, anim, true)?;
        self.stroke = Some(handle);
        Ok(())
    }

    fn start_pulse(&mut self) -> CountdownResult<()> {
        let pulse = self.config.pulse;
        let anim = Animation::group(
            Timing {
                duration_secs: pulse.period_secs,
                ease: pulse.ease,
                repeat: Repeat::Forever,
                fill: FillMode::Removed,
            },
            [
                Channel {
                    property: Property::Scale,
                    from: pulse.scale[0],
                    to: pulse.scale[1],
                },
                Channel {
                    property: Property::Opacity,
                    from: pulse.opacity[0],
                    to: pulse.opacity[1],
                },
            ],
        );
        let handle = self.engine.add(LayerId::Pulse, PULSE_KEY, anim, false)?;
        self.pulse = Some(handle);
        Ok(())
    }

    fn stop_pulse(&mut self) {
        self.engine.remove_all(LayerId::Pulse);
        self.pulse = None;
    }
}

impl<C: TickClock> Drop for CountdownProgressBar<C> {
    fn drop(&mut self) {
        if self.timer.stop() {
            tracing::trace!(generation = self.generation.0, "timer stopped on teardown");
        }
    }
}

#[cfg(test)]
#[path = "../tests/unit/widget.rs"]
mod tests;
