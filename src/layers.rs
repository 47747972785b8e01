//! Layer tree handed to the rendering collaborator.
//!
//! Built once per widget, back to front: pulse gradient (masked by the pulse ring), background
//! track, foreground gradient (masked by the progress ring), label. Masks are owned by the gradient
//! they reveal.

use std::f64::consts::{FRAC_PI_2, TAU};

use kurbo::Shape as _;

use crate::{
    animation::anim::Property,
    config::{GradientConfig, ProgressBarConfig},
    foundation::{
        core::{BezPath, Point, Rect, Rgba8, Vec2},
        error::CountdownResult,
    },
};

/// Tolerance used when flattening arcs into Béziers.
const ARC_TOLERANCE: f64 = 0.1;

/// Animatable layers.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize)]
pub enum LayerId {
    /// Pulse ring behind the track.
    Pulse,
    /// Static gray track.
    Background,
    /// Progress ring.
    Foreground,
}

/// Circle the three rings follow, starting at 12 o'clock and running clockwise.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize)]
pub struct Ring {
    /// Circle center.
    pub center: Point,
    /// Centerline radius.
    pub radius: f64,
}

impl Ring {
    /// Path covering `fraction` of the full circle. Empty for `fraction <= 0`.
    pub fn path(&self, fraction: f64) -> BezPath {
        let fraction = fraction.clamp(0.0, 1.0);
        if fraction <= 0.0 {
            return BezPath::new();
        }
        kurbo::Arc::new(
            self.center,
            Vec2::new(self.radius, self.radius),
            -FRAC_PI_2,
            TAU * fraction,
            0.0,
        )
        .to_path(ARC_TOLERANCE)
    }

    /// Point at `fraction` along the ring.
    pub fn point_at(&self, fraction: f64) -> Point {
        let angle = -FRAC_PI_2 + TAU * fraction;
        self.center + Vec2::new(angle.cos(), angle.sin()) * self.radius
    }
}

/// Stroke end style.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize)]
pub enum LineCap {
    /// Square end flush with the path end.
    Butt,
    /// Half-disc past the path end.
    Round,
}

impl LineCap {
    /// SVG `stroke-linecap` keyword.
    pub fn as_svg(self) -> &'static str {
        match self {
            Self::Butt => "butt",
            Self::Round => "round",
        }
    }
}

/// Unfilled stroked ring. Its model values are what shows when no animation drives it.
#[derive(Clone, Debug, PartialEq, serde::Serialize)]
pub struct ShapeLayer {
    /// Stroke width.
    pub line_width: f64,
    /// Stroke color; masks only use its alpha.
    pub stroke: Rgba8,
    /// End style.
    pub line_cap: LineCap,
    /// Model stroke fraction.
    pub stroke_end: f64,
    /// Model scale about the view center.
    pub scale: f64,
    /// Model opacity.
    pub opacity: f64,
}

impl ShapeLayer {
    fn ring(line_width: f64, stroke: Rgba8) -> Self {
        Self {
            line_width,
            stroke,
            line_cap: LineCap::Round,
            stroke_end: 1.0,
            scale: 1.0,
            opacity: 1.0,
        }
    }

    /// Model value of an animatable property.
    pub fn model_value(&self, property: Property) -> f64 {
        match property {
            Property::StrokeEnd => self.stroke_end,
            Property::Scale => self.scale,
            Property::Opacity => self.opacity,
        }
    }
}

/// Gradient filling the view, revealed only where its mask draws.
#[derive(Clone, Debug, PartialEq, serde::Serialize)]
pub struct GradientLayer {
    /// Stops and direction.
    pub gradient: GradientConfig,
    /// Mask owned by this gradient.
    pub mask: ShapeLayer,
}

/// Centered remaining-time label.
#[derive(Clone, Debug, PartialEq, serde::Serialize)]
pub struct LabelLayer {
    /// Current text.
    pub text: String,
    /// Frame the text is centered in.
    pub frame: Rect,
    /// Font size in pixels.
    pub font_size: f64,
    /// CSS font weight.
    pub font_weight: u16,
    /// Text color.
    pub color: Rgba8,
}

/// The widget's complete visual state, minus running animations.
#[derive(Clone, Debug, PartialEq, serde::Serialize)]
pub struct ProgressLayers {
    /// View bounds.
    pub bounds: Rect,
    /// Geometry shared by every ring.
    pub ring: Ring,
    /// Backdrop fill.
    pub background_fill: Option<Rgba8>,
    /// Pulse gradient and its ring mask.
    pub pulse: GradientLayer,
    /// Gray track.
    pub track: ShapeLayer,
    /// Progress gradient and its ring mask.
    pub foreground: GradientLayer,
    /// Label.
    pub label: LabelLayer,
}

impl ProgressLayers {
    /// Build the layer tree for `config`.
    pub fn build(config: &ProgressBarConfig) -> CountdownResult<Self> {
        config.validate()?;
        let bounds = config.canvas.bounds();
        let ring = Ring {
            center: bounds.center(),
            radius: config.ring_radius(),
        };

        // Invisible until a pulse animation drives it.
        let mut pulse_mask = ShapeLayer::ring(config.line_width, config.track_color);
        pulse_mask.opacity = 0.0;

        // Empty until the stroke animation drives it.
        let mut progress_mask = ShapeLayer::ring(config.line_width, Rgba8::rgb(0, 0, 0));
        progress_mask.stroke_end = 0.0;

        Ok(Self {
            bounds,
            ring,
            background_fill: config.background,
            pulse: GradientLayer {
                gradient: config.pulse_gradient,
                mask: pulse_mask,
            },
            track: ShapeLayer::ring(config.line_width, config.track_color),
            foreground: GradientLayer {
                gradient: config.foreground,
                mask: progress_mask,
            },
            label: LabelLayer {
                text: String::new(),
                frame: bounds,
                font_size: config.label.font_size,
                font_weight: config.label.font_weight,
                color: config.label.color,
            },
        })
    }

    /// Shape layer behind `id`.
    pub fn shape(&self, id: LayerId) -> &ShapeLayer {
        match id {
            LayerId::Pulse => &self.pulse.mask,
            LayerId::Background => &self.track,
            LayerId::Foreground => &self.foreground.mask,
        }
    }
}

#[cfg(test)]
#[path = "../tests/unit/layers.rs"]
mod tests;
