use std::fmt::Write as _;

use crate::{
    config::GradientConfig,
    foundation::core::{Affine, BezPath, Rect, Rgba8},
    layers::{ProgressLayers, ShapeLayer},
    widget::FrameSnapshot,
};

const PULSE_GRADIENT_ID: &str = "pulse-gradient";
const FOREGROUND_GRADIENT_ID: &str = "foreground-gradient";

/// Serialize one frame of the widget as a standalone SVG document.
///
/// Gradients live in view space; masks are emitted as the gradient-painted strokes they reveal.
/// Pulse scaling is applied to the ring geometry (and its stroke width) so the gradient does not
/// scale with it.
pub fn frame_svg(layers: &ProgressLayers, frame: &FrameSnapshot) -> String {
    let b = layers.bounds;
    let mut out = String::with_capacity(2048);

    let _ = writeln!(
        out,
        r#"<svg xmlns="http://www.w3.org/2000/svg" width="{w}" height="{h}" viewBox="{x} {y} {w} {h}">"#,
        x = num(b.x0),
        y = num(b.y0),
        w = num(b.width()),
        h = num(b.height()),
    );

    out.push_str("<defs>\n");
    write_gradient(&mut out, PULSE_GRADIENT_ID, &layers.pulse.gradient, b);
    write_gradient(&mut out, FOREGROUND_GRADIENT_ID, &layers.foreground.gradient, b);
    out.push_str("</defs>\n");

    if let Some(fill) = layers.background_fill {
        let _ = writeln!(
            out,
            r#"<rect x="{}" y="{}" width="{}" height="{}" fill="{}" fill-opacity="{}"/>"#,
            num(b.x0),
            num(b.y0),
            num(b.width()),
            num(b.height()),
            fill.to_svg_rgb(),
            num(fill.opacity()),
        );
    }

    let full = layers.ring.path(1.0);

    if let Some(pulse) = frame.pulse {
        let c = layers.ring.center;
        let scale = Affine::translate(c.to_vec2())
            * Affine::scale(pulse.scale)
            * Affine::translate(-c.to_vec2());
        let mask = &layers.pulse.mask;
        write_stroke(
            &mut out,
            &(scale * full.clone()),
            &format!("url(#{PULSE_GRADIENT_ID})"),
            mask.line_width * pulse.scale,
            mask,
            pulse.opacity * mask.stroke.opacity(),
        );
    }

    let track = &layers.track;
    write_stroke(
        &mut out,
        &full,
        &track.stroke.to_svg_rgb(),
        track.line_width,
        track,
        track.opacity * track.stroke.opacity(),
    );

    if frame.stroke_fraction > 0.0 {
        let mask = &layers.foreground.mask;
        write_stroke(
            &mut out,
            &layers.ring.path(frame.stroke_fraction),
            &format!("url(#{FOREGROUND_GRADIENT_ID})"),
            mask.line_width,
            mask,
            mask.opacity * mask.stroke.opacity(),
        );
    }

    let label = &layers.label;
    if !frame.label.is_empty() {
        let c = label.frame.center();
        let _ = writeln!(
            out,
            r#"<text x="{}" y="{}" text-anchor="middle" dominant-baseline="central" font-family="sans-serif" font-size="{}" font-weight="{}" fill="{}" fill-opacity="{}">{}</text>"#,
            num(c.x),
            num(c.y),
            num(label.font_size),
            label.font_weight,
            label.color.to_svg_rgb(),
            num(label.color.opacity()),
            escape_text(&frame.label),
        );
    }

    out.push_str("</svg>\n");
    out
}

fn write_gradient(out: &mut String, id: &str, g: &GradientConfig, bounds: Rect) {
    let x1 = bounds.x0 + g.start.x * bounds.width();
    let y1 = bounds.y0 + g.start.y * bounds.height();
    let x2 = bounds.x0 + g.end.x * bounds.width();
    let y2 = bounds.y0 + g.end.y * bounds.height();
    let _ = writeln!(
        out,
        r#"<linearGradient id="{id}" gradientUnits="userSpaceOnUse" x1="{}" y1="{}" x2="{}" y2="{}">"#,
        num(x1),
        num(y1),
        num(x2),
        num(y2),
    );
    write_stop(out, 0.0, g.colors[0]);
    write_stop(out, 1.0, g.colors[1]);
    out.push_str("</linearGradient>\n");
}

fn write_stop(out: &mut String, offset: f64, c: Rgba8) {
    let _ = writeln!(
        out,
        r#"<stop offset="{}" stop-color="{}" stop-opacity="{}"/>"#,
        num(offset),
        c.to_svg_rgb(),
        num(c.opacity()),
    );
}

fn write_stroke(
    out: &mut String,
    path: &BezPath,
    paint: &str,
    width: f64,
    shape: &ShapeLayer,
    opacity: f64,
) {
    if opacity <= 0.0 || path.elements().is_empty() {
        return;
    }
    let _ = writeln!(
        out,
        r#"<path d="{}" fill="none" stroke="{paint}" stroke-width="{}" stroke-linecap="{}" opacity="{}"/>"#,
        path.to_svg(),
        num(width),
        shape.line_cap.as_svg(),
        num(opacity.min(1.0)),
    );
}

/// Compact decimal formatting for attributes.
fn num(v: f64) -> String {
    let s = format!("{v:.4}");
    let s = s.trim_end_matches('0').trim_end_matches('.');
    if s == "-0" { "0".to_owned() } else { s.to_owned() }
}

fn escape_text(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for ch in s.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            _ => out.push(ch),
        }
    }
    out
}

#[cfg(test)]
#[path = "../../tests/unit/render/svg.rs"]
mod tests;
