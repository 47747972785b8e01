use smallvec::SmallVec;

use crate::{
    animation::ease::Ease,
    foundation::error::{CountdownError, CountdownResult},
};

/// Linear interpolation between two values of the same type.
pub trait Lerp: Sized {
    /// Interpolate from `a` to `b` at eased progress `t`.
    fn lerp(a: &Self, b: &Self, t: f64) -> Self;
}

impl Lerp for f64 {
    fn lerp(a: &Self, b: &Self, t: f64) -> Self {
        a + (b - a) * t
    }
}

/// Layer property an animation channel writes to.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Property {
    /// Drawn fraction of the shape's path, `0..=1`.
    StrokeEnd,
    /// Uniform scale about the layer center.
    Scale,
    /// Layer opacity, `0..=1`.
    Opacity,
}

/// How many times the timing curve plays.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Repeat {
    /// Play exactly once.
    Once,
    /// Play `n` full cycles (`n > 0`).
    Count(u32),
    /// Repeat until removed. Never completes.
    Forever,
}

/// What a finished animation contributes to its layer.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FillMode {
    /// The animation is dropped on completion; the layer shows its model value again.
    Removed,
    /// The end value stays applied after completion.
    Forwards,
}

/// Shared timing for every channel of an animation.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Timing {
    /// Length of one cycle in seconds.
    pub duration_secs: f64,
    /// Easing applied to each cycle.
    pub ease: Ease,
    /// Cycle count.
    pub repeat: Repeat,
    /// Behavior after completion.
    pub fill: FillMode,
}

/// One property interpolated from `from` to `to`.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Channel {
    /// Target property.
    pub property: Property,
    /// Value at progress 0.
    pub from: f64,
    /// Value at progress 1.
    pub to: f64,
}

/// Declarative animation description: a single channel is a basic animation, several channels
/// sharing one [`Timing`] form a group.
#[derive(Clone, Debug, PartialEq)]
pub struct Animation {
    /// Timing shared by all channels.
    pub timing: Timing,
    /// Animated properties.
    pub channels: SmallVec<[Channel; 2]>,
}

impl Animation {
    /// Single-property animation.
    pub fn basic(property: Property, from: f64, to: f64, timing: Timing) -> Self {
        let mut channels = SmallVec::new();
        channels.push(Channel { property, from, to });
        Self { timing, channels }
    }

    /// Grouped animation: every channel follows the same timing.
    pub fn group(timing: Timing, channels: impl IntoIterator<Item = Channel>) -> Self {
        Self {
            timing,
            channels: channels.into_iter().collect(),
        }
    }

    /// Reject descriptions the engine cannot sample.
    pub fn validate(&self) -> CountdownResult<()> {
        let d = self.timing.duration_secs;
        if !d.is_finite() || d <= 0.0 {
            return Err(CountdownError::animation(format!(
                "animation duration must be finite and > 0 (got {d})"
            )));
        }
        if self.timing.repeat == Repeat::Count(0) {
            return Err(CountdownError::animation("repeat count must be > 0"));
        }
        if self.channels.is_empty() {
            return Err(CountdownError::animation(
                "animation must animate at least one property",
            ));
        }
        if self
            .channels
            .iter()
            .any(|c| !c.from.is_finite() || !c.to.is_finite())
        {
            return Err(CountdownError::animation("channel values must be finite"));
        }
        Ok(())
    }

    /// Total active time, `None` for [`Repeat::Forever`].
    pub fn total_secs(&self) -> Option<f64> {
        match self.timing.repeat {
            Repeat::Once => Some(self.timing.duration_secs),
            Repeat::Count(n) => Some(self.timing.duration_secs * f64::from(n)),
            Repeat::Forever => None,
        }
    }

    /// Return `true` once `elapsed` covers the full active time.
    pub fn is_complete(&self, elapsed: f64) -> bool {
        match self.total_secs() {
            Some(total) => elapsed >= total - COMPLETION_EPSILON,
            None => false,
        }
    }

    /// Eased progress of the current cycle.
    ///
    /// Returns `None` when the animation no longer contributes (completed with
    /// [`FillMode::Removed`]).
    pub fn progress(&self, elapsed: f64) -> Option<f64> {
        let elapsed = elapsed.max(0.0);
        if self.is_complete(elapsed) {
            return match self.timing.fill {
                FillMode::Forwards => Some(self.timing.ease.apply(1.0)),
                FillMode::Removed => None,
            };
        }
        let d = self.timing.duration_secs;
        let local = match self.timing.repeat {
            Repeat::Once => elapsed,
            Repeat::Count(_) | Repeat::Forever => elapsed % d,
        };
        Some(self.timing.ease.apply(local / d))
    }

    /// Sample one property, `None` if this animation does not drive it at `elapsed`.
    pub fn sample(&self, property: Property, elapsed: f64) -> Option<f64> {
        let channel = self.channels.iter().find(|c| c.property == property)?;
        let t = self.progress(elapsed)?;
        Some(f64::lerp(&channel.from, &channel.to, t))
    }

    /// Return `true` when this animation has a channel for `property`.
    pub fn drives(&self, property: Property) -> bool {
        self.channels.iter().any(|c| c.property == property)
    }
}

/// Float slack when comparing elapsed time against a duration, so that a frame sampled at exactly
/// `duration` counts as complete.
pub(crate) const COMPLETION_EPSILON: f64 = 1e-9;

#[cfg(test)]
#[path = "../../tests/unit/animation/anim.rs"]
mod tests;
