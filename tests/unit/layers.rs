use super::*;
use kurbo::Shape as _;

fn ring() -> Ring {
    Ring {
        center: Point::new(100.0, 100.0),
        radius: 80.0,
    }
}

#[test]
fn ring_starts_at_twelve_o_clock_and_runs_clockwise() {
    let r = ring();
    let top = r.point_at(0.0);
    assert!((top.x - 100.0).abs() < 1e-9);
    assert!((top.y - 20.0).abs() < 1e-9);

    // A quarter turn clockwise in y-down space is 3 o'clock.
    let right = r.point_at(0.25);
    assert!((right.x - 180.0).abs() < 1e-9);
    assert!((right.y - 100.0).abs() < 1e-9);
}

#[test]
fn partial_path_covers_only_the_requested_arc() {
    let r = ring();
    assert!(r.path(0.0).elements().is_empty());

    let half = r.path(0.5).bounding_box();
    // Right half of the circle.
    assert!(half.x0 > 95.0);
    assert!((half.x1 - 180.0).abs() < 0.5);
    assert!((half.y0 - 20.0).abs() < 0.5);
    assert!((half.y1 - 180.0).abs() < 0.5);

    let full = r.path(1.0).bounding_box();
    assert!((full.x0 - 20.0).abs() < 0.5);
    assert!((full.x1 - 180.0).abs() < 0.5);
}

#[test]
fn build_starts_with_empty_stroke_and_hidden_pulse() {
    let layers = ProgressLayers::build(&ProgressBarConfig::default()).unwrap();
    assert_eq!(layers.ring.radius, 80.0);
    assert_eq!(layers.ring.center, Point::new(100.0, 100.0));
    assert_eq!(layers.shape(LayerId::Foreground).stroke_end, 0.0);
    assert_eq!(layers.shape(LayerId::Pulse).opacity, 0.0);
    assert_eq!(layers.shape(LayerId::Background).stroke_end, 1.0);
    assert_eq!(
        layers.shape(LayerId::Pulse).model_value(Property::Scale),
        1.0
    );
    assert!(layers.label.text.is_empty());
}

#[test]
fn build_rejects_invalid_config() {
    let cfg = ProgressBarConfig {
        line_width: 0.0,
        ..ProgressBarConfig::default()
    };
    assert!(ProgressLayers::build(&cfg).is_err());
}
