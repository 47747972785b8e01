use super::*;
use crate::{
    config::ProgressBarConfig,
    foundation::core::Generation,
    widget::{Phase, PulseSample},
};

fn layers() -> ProgressLayers {
    ProgressLayers::build(&ProgressBarConfig::default()).unwrap()
}

fn snapshot(stroke_fraction: f64, pulse: Option<PulseSample>) -> FrameSnapshot {
    FrameSnapshot {
        time_secs: 0.0,
        label: "2.5".to_owned(),
        stroke_fraction,
        pulse,
        phase: Phase::Running,
        generation: Generation(1),
    }
}

#[test]
fn idle_frame_has_track_and_label_only() {
    let svg = frame_svg(&layers(), &snapshot(0.0, None));
    assert!(svg.starts_with("<svg"));
    assert!(svg.contains(r#"viewBox="0 0 200 200""#));
    assert!(svg.contains(r##"stroke="#aaaaaa""##));
    assert!(!svg.contains("url(#foreground-gradient)\""));
    assert!(!svg.contains("url(#pulse-gradient)\""));
    assert!(svg.contains(">2.5</text>"));
}

#[test]
fn running_frame_paints_gradients() {
    let pulse = PulseSample {
        scale: 1.2,
        opacity: 0.5,
    };
    let svg = frame_svg(&layers(), &snapshot(0.5, Some(pulse)));
    assert!(svg.contains(r#"stroke="url(#foreground-gradient)""#));
    assert!(svg.contains(r#"stroke="url(#pulse-gradient)""#));
    // Scaled pulse stroke.
    assert!(svg.contains(r#"stroke-width="12""#));
    assert!(svg.contains(r#"opacity="0.5""#));
    assert!(svg.contains(r##"stop-color="#ce0755""##));
}

#[test]
fn fully_faded_pulse_is_omitted() {
    let pulse = PulseSample {
        scale: 1.2,
        opacity: 0.0,
    };
    let svg = frame_svg(&layers(), &snapshot(0.5, Some(pulse)));
    assert!(!svg.contains(r#"stroke="url(#pulse-gradient)""#));
}

#[test]
fn output_parses_as_svg() {
    let pulse = PulseSample {
        scale: 1.1,
        opacity: 0.35,
    };
    let svg = frame_svg(&layers(), &snapshot(0.75, Some(pulse)));
    let tree = usvg::Tree::from_str(&svg, &usvg::Options::default()).unwrap();
    assert_eq!(tree.size().width(), 200.0);
}

#[test]
fn label_text_is_escaped() {
    assert_eq!(escape_text("a<b&c>"), "a&lt;b&amp;c&gt;");
}

#[test]
fn numbers_are_compact() {
    assert_eq!(num(200.0), "200");
    assert_eq!(num(0.5), "0.5");
    assert_eq!(num(-0.0), "0");
    assert_eq!(num(1.23456), "1.2346");
}
