use std::{fs::File, io::BufReader, path::Path};

use crate::{
    animation::ease::Ease,
    foundation::{
        core::{Canvas, Point, Rgba8},
        error::{CountdownError, CountdownResult},
    },
};

/// Two-stop linear gradient in unit coordinates of the canvas.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct GradientConfig {
    /// First and second stop colors.
    pub colors: [Rgba8; 2],
    /// Gradient start, `(0, 0)` is the top-left corner.
    pub start: Point,
    /// Gradient end, `(1, 1)` is the bottom-right corner.
    pub end: Point,
}

/// Pulse animation parameters.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct PulseConfig {
    /// Length of one pulse cycle in seconds.
    pub period_secs: f64,
    /// Scale at the start and end of a cycle.
    pub scale: [f64; 2],
    /// Opacity at the start and end of a cycle.
    pub opacity: [f64; 2],
    /// Timing curve for each cycle.
    pub ease: Ease,
}

impl Default for PulseConfig {
    fn default() -> Self {
        Self {
            period_secs: 1.0,
            scale: [1.0, 1.2],
            opacity: [0.7, 0.0],
            ease: Ease::EaseInEaseOut,
        }
    }
}

/// Label styling.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct LabelConfig {
    /// Font size in pixels.
    pub font_size: f64,
    /// CSS font weight (800 = heavy).
    pub font_weight: u16,
    /// Text color.
    pub color: Rgba8,
}

impl Default for LabelConfig {
    fn default() -> Self {
        Self {
            font_size: 32.0,
            font_weight: 800,
            color: Rgba8::rgb(0, 0, 0),
        }
    }
}

/// Everything that shapes a progress bar instance. Loaded from JSON; every field is optional.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct ProgressBarConfig {
    /// View size in pixels.
    pub canvas: Canvas,
    /// Distance between the view edge and the ring centerline.
    pub ring_inset: f64,
    /// Stroke width shared by all three rings.
    pub line_width: f64,
    /// Background track color.
    pub track_color: Rgba8,
    /// Gradient revealed by the progress stroke.
    pub foreground: GradientConfig,
    /// Gradient revealed by the pulse ring.
    pub pulse_gradient: GradientConfig,
    /// Label styling.
    pub label: LabelConfig,
    /// Timer cadence in seconds.
    pub tick_interval_secs: f64,
    /// Duration used when the caller does not pick one.
    pub default_duration_secs: f64,
    /// Timing curve of the progress stroke.
    pub stroke_ease: Ease,
    /// Pulse animation.
    pub pulse: PulseConfig,
    /// Opaque fill behind the widget; `None` renders on transparency.
    pub background: Option<Rgba8>,
}

impl Default for ProgressBarConfig {
    fn default() -> Self {
        Self {
            canvas: Canvas {
                width: 200,
                height: 200,
            },
            ring_inset: 20.0,
            line_width: 10.0,
            track_color: Rgba8::rgb(170, 170, 170),
            foreground: GradientConfig {
                colors: [
                    Rgba8::from_unit(0.807_843_148_7, 0.027_450_980_62, 0.333_333_343_3, 1.0),
                    Rgba8::from_unit(0.960_784_316_1, 0.705_882_370_5, 0.200_000_003, 1.0),
                ],
                start: Point::new(0.0, 0.0),
                end: Point::new(1.0, 1.0),
            },
            pulse_gradient: GradientConfig {
                colors: [
                    Rgba8::from_unit(0.509_003_698_8, 0.041_353_382_17, 0.211_322_575_8, 1.0),
                    Rgba8::from_unit(0.499_030_828_5, 0.367_935_359_5, 0.113_748_408_9, 1.0),
                ],
                start: Point::new(0.0, 0.0),
                end: Point::new(1.0, 1.0),
            },
            label: LabelConfig::default(),
            tick_interval_secs: 0.1,
            default_duration_secs: 5.0,
            stroke_ease: Ease::Linear,
            pulse: PulseConfig::default(),
            background: Some(Rgba8::rgb(255, 255, 255)),
        }
    }
}

impl ProgressBarConfig {
    /// Read and validate a JSON configuration file.
    pub fn from_path(path: impl AsRef<Path>) -> CountdownResult<Self> {
        let path = path.as_ref();
        let f = File::open(path).map_err(|e| {
            CountdownError::Other(anyhow::Error::new(e).context(format!(
                "open config '{}'",
                path.display()
            )))
        })?;
        let cfg: Self = serde_json::from_reader(BufReader::new(f))
            .map_err(|e| CountdownError::serde(format!("{}: {e}", path.display())))?;
        cfg.validate()?;
        Ok(cfg)
    }

    /// Parse and validate a JSON configuration string.
    pub fn from_json_str(s: &str) -> CountdownResult<Self> {
        let cfg: Self = serde_json::from_str(s).map_err(|e| CountdownError::serde(e.to_string()))?;
        cfg.validate()?;
        Ok(cfg)
    }

    /// Ring radius derived from the canvas width.
    pub fn ring_radius(&self) -> f64 {
        f64::from(self.canvas.width) / 2.0 - self.ring_inset
    }

    /// Reject configurations that cannot produce a visible, well-timed widget.
    pub fn validate(&self) -> CountdownResult<()> {
        fn positive(name: &str, v: f64) -> CountdownResult<()> {
            if !v.is_finite() || v <= 0.0 {
                return Err(CountdownError::validation(format!(
                    "{name} must be finite and > 0 (got {v})"
                )));
            }
            Ok(())
        }

        if self.canvas.width == 0 || self.canvas.height == 0 {
            return Err(CountdownError::validation("canvas must be non-empty"));
        }
        positive("line_width", self.line_width)?;
        positive("tick_interval_secs", self.tick_interval_secs)?;
        positive("default_duration_secs", self.default_duration_secs)?;
        positive("pulse.period_secs", self.pulse.period_secs)?;
        positive("label.font_size", self.label.font_size)?;
        positive("ring radius", self.ring_radius())?;
        if self
            .pulse
            .opacity
            .iter()
            .any(|o| !(0.0..=1.0).contains(o))
        {
            return Err(CountdownError::validation(
                "pulse.opacity values must be within [0, 1]",
            ));
        }
        if self.pulse.scale.iter().any(|s| !s.is_finite() || *s <= 0.0) {
            return Err(CountdownError::validation("pulse.scale values must be > 0"));
        }
        Ok(())
    }
}

#[cfg(test)]
#[path = "../tests/unit/config.rs"]
mod tests;
