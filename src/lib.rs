//! Circular countdown progress indicator.
//!
//! A [`CountdownProgressBar`] keeps a tick-driven remaining-time label in sync with a declarative
//! stroke animation that fills a ring over the countdown duration, optionally with a repeating
//! pulse behind it:
//!
//! - ticks come from a [`TickClock`] ([`ManualClock`] for simulation, [`ThreadClock`] for real
//!   time) and are applied on the owning thread by [`CountdownProgressBar::pump`]
//! - animations are sampled by [`CountdownProgressBar::render_frame`], which also delivers the
//!   stroke completion that ends a cycle
//! - frames can be serialized to SVG or rasterized to PNG through [`render`]
#![forbid(unsafe_code)]
#![deny(missing_docs)]

/// Declarative animations and the engine that samples them.
pub mod animation;
pub mod clock;
/// Widget configuration.
pub mod config;
mod foundation;
pub mod layers;
pub mod render;
pub mod sim;
/// Per-cycle countdown bookkeeping.
pub mod state;
pub mod timer;
pub mod ui;
pub mod widget;

pub use crate::animation::{
    anim::{Animation, Channel, FillMode, Property, Repeat, Timing},
    ease::Ease,
    engine::{AnimationEngine, AnimationEvent, AnimationHandle},
};
pub use crate::clock::{ManualClock, ThreadClock, TimerProbe};
pub use crate::config::{GradientConfig, LabelConfig, ProgressBarConfig, PulseConfig};
pub use crate::foundation::core::{
    Affine, BezPath, Canvas, Fps, Generation, Point, Rect, Rgba8, Vec2,
};
pub use crate::foundation::error::{CountdownError, CountdownResult};
pub use crate::layers::{LayerId, ProgressLayers, Ring};
pub use crate::render::{FrameRGBA, Rasterizer, frame_svg, save_png};
pub use crate::sim::Simulation;
pub use crate::timer::{TickClock, TickTarget, TimerDriver, TimerId};
pub use crate::ui::{UiEvent, UiQueue, UiSender};
pub use crate::widget::{CountdownProgressBar, FrameSnapshot, Phase, PulseSample};
