use super::*;

fn once(duration_secs: f64, fill: FillMode) -> Timing {
    Timing {
        duration_secs,
        ease: Ease::Linear,
        repeat: Repeat::Once,
        fill,
    }
}

#[test]
fn basic_interpolates_linearly() {
    let a = Animation::basic(Property::StrokeEnd, 0.0, 1.0, once(4.0, FillMode::Forwards));
    assert_eq!(a.sample(Property::StrokeEnd, 0.0), Some(0.0));
    assert_eq!(a.sample(Property::StrokeEnd, 1.0), Some(0.25));
    assert_eq!(a.sample(Property::StrokeEnd, 2.0), Some(0.5));
    assert_eq!(a.sample(Property::Opacity, 2.0), None);
}

#[test]
fn fill_forwards_retains_end_value() {
    let a = Animation::basic(Property::StrokeEnd, 0.0, 1.0, once(1.0, FillMode::Forwards));
    assert!(a.is_complete(1.0));
    assert_eq!(a.sample(Property::StrokeEnd, 1.0), Some(1.0));
    assert_eq!(a.sample(Property::StrokeEnd, 50.0), Some(1.0));
}

#[test]
fn fill_removed_stops_contributing() {
    let a = Animation::basic(Property::Opacity, 1.0, 0.0, once(1.0, FillMode::Removed));
    assert_eq!(a.sample(Property::Opacity, 0.5), Some(0.5));
    assert_eq!(a.sample(Property::Opacity, 1.5), None);
}

#[test]
fn forever_wraps_each_cycle_and_never_completes() {
    let a = Animation::group(
        Timing {
            duration_secs: 1.0,
            ease: Ease::Linear,
            repeat: Repeat::Forever,
            fill: FillMode::Removed,
        },
        [
            Channel {
                property: Property::Scale,
                from: 1.0,
                to: 1.2,
            },
            Channel {
                property: Property::Opacity,
                from: 0.7,
                to: 0.0,
            },
        ],
    );
    assert!(!a.is_complete(1_000.0));
    let s = a.sample(Property::Scale, 3.5).unwrap();
    assert!((s - 1.1).abs() < 1e-9);
    let o = a.sample(Property::Opacity, 3.5).unwrap();
    assert!((o - 0.35).abs() < 1e-9);
    assert!(a.total_secs().is_none());
}

#[test]
fn counted_repeat_completes_after_all_cycles() {
    let mut t = once(0.5, FillMode::Forwards);
    t.repeat = Repeat::Count(3);
    let a = Animation::basic(Property::Scale, 0.0, 1.0, t);
    assert_eq!(a.total_secs(), Some(1.5));
    assert!(!a.is_complete(1.4));
    assert!(a.is_complete(1.5));
}

#[test]
fn validate_rejects_bad_descriptions() {
    let bad_duration = Animation::basic(Property::Scale, 0.0, 1.0, once(0.0, FillMode::Removed));
    assert!(bad_duration.validate().is_err());

    let nan = Animation::basic(Property::Scale, f64::NAN, 1.0, once(1.0, FillMode::Removed));
    assert!(nan.validate().is_err());

    let empty = Animation::group(once(1.0, FillMode::Removed), []);
    assert!(empty.validate().is_err());

    let mut t = once(1.0, FillMode::Removed);
    t.repeat = Repeat::Count(0);
    assert!(Animation::basic(Property::Scale, 0.0, 1.0, t).validate().is_err());

    let ok = Animation::basic(Property::Scale, 0.0, 1.0, once(1.0, FillMode::Removed));
    assert!(ok.validate().is_ok());
    assert!(ok.drives(Property::Scale));
    assert!(!ok.drives(Property::StrokeEnd));
}
