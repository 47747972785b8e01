use super::*;
use crate::animation::{
    anim::{Channel, Repeat, Timing},
    ease::Ease,
};

fn stroke(duration_secs: f64) -> Animation {
    Animation::basic(
        Property::StrokeEnd,
        0.0,
        1.0,
        Timing {
            duration_secs,
            ease: Ease::Linear,
            repeat: Repeat::Once,
            fill: FillMode::Forwards,
        },
    )
}

fn pulse() -> Animation {
    Animation::group(
        Timing {
            duration_secs: 1.0,
            ease: Ease::EaseInEaseOut,
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
    )
}

#[test]
fn begin_time_binds_on_first_advance() {
    let mut engine = AnimationEngine::new();
    engine.advance(10.0);
    engine
        .add(LayerId::Foreground, "stroke", stroke(2.0), true)
        .unwrap();
    assert!(engine.advance(11.0).is_empty());
    assert_eq!(engine.value(LayerId::Foreground, Property::StrokeEnd), Some(0.0));
    engine.advance(12.0);
    assert_eq!(engine.value(LayerId::Foreground, Property::StrokeEnd), Some(0.5));
}

#[test]
fn completion_is_reported_exactly_once_and_end_value_is_held() {
    let mut engine = AnimationEngine::new();
    let h = engine
        .add(LayerId::Foreground, "stroke", stroke(1.0), true)
        .unwrap();
    engine.advance(0.0);
    assert!(engine.is_running(h));

    let events = engine.advance(1.0);
    assert_eq!(events.as_slice(), &[AnimationEvent::Finished(h)]);
    assert!(!engine.is_running(h));
    assert!(engine.contains(h));

    assert!(engine.advance(2.0).is_empty());
    assert_eq!(engine.value(LayerId::Foreground, Property::StrokeEnd), Some(1.0));
}

#[test]
fn silent_animations_do_not_report() {
    let mut engine = AnimationEngine::new();
    engine
        .add(LayerId::Foreground, "stroke", stroke(1.0), false)
        .unwrap();
    engine.advance(0.0);
    assert!(engine.advance(5.0).is_empty());
}

#[test]
fn replacing_a_slot_cancels_pending_completion() {
    let mut engine = AnimationEngine::new();
    let first = engine
        .add(LayerId::Foreground, "stroke", stroke(1.0), true)
        .unwrap();
    engine.advance(0.0);
    engine.advance(0.5);

    let second = engine
        .add(LayerId::Foreground, "stroke", stroke(1.0), true)
        .unwrap();
    assert_ne!(first, second);
    assert!(!engine.contains(first));
    assert_eq!(engine.len(), 1);

    // First would have finished at 1.0; second started at 1.0 and runs until 2.0.
    assert!(engine.advance(1.0).is_empty());
    assert_eq!(engine.value(LayerId::Foreground, Property::StrokeEnd), Some(0.0));
    assert_eq!(
        engine.advance(2.0).as_slice(),
        &[AnimationEvent::Finished(second)]
    );
}

#[test]
fn infinite_group_runs_until_removed() {
    let mut engine = AnimationEngine::new();
    let h = engine.add(LayerId::Pulse, "pulse", pulse(), false).unwrap();
    engine.advance(0.0);
    assert!(engine.advance(100.0).is_empty());
    assert!(engine.is_running(h));
    assert!(engine.value(LayerId::Pulse, Property::Scale).is_some());
    assert!(engine.value(LayerId::Pulse, Property::Opacity).is_some());

    assert_eq!(engine.remove(LayerId::Pulse, "pulse"), Some(h));
    assert_eq!(engine.value(LayerId::Pulse, Property::Scale), None);
    assert!(engine.is_empty());
}

#[test]
fn remove_on_empty_slot_is_a_no_op() {
    let mut engine = AnimationEngine::new();
    assert_eq!(engine.remove(LayerId::Pulse, "pulse"), None);
    assert_eq!(engine.remove_all(LayerId::Pulse), 0);
}

#[test]
fn removed_fill_animations_are_dropped_on_completion() {
    let mut engine = AnimationEngine::new();
    let mut a = stroke(1.0);
    a.timing.fill = FillMode::Removed;
    let h = engine.add(LayerId::Foreground, "stroke", a, true).unwrap();
    engine.advance(0.0);
    assert_eq!(
        engine.advance(1.0).as_slice(),
        &[AnimationEvent::Finished(h)]
    );
    assert!(!engine.contains(h));
    assert_eq!(engine.value(LayerId::Foreground, Property::StrokeEnd), None);
}

#[test]
fn clock_never_runs_backwards() {
    let mut engine = AnimationEngine::new();
    engine
        .add(LayerId::Foreground, "stroke", stroke(2.0), true)
        .unwrap();
    engine.advance(1.0);
    engine.advance(2.0);
    engine.advance(1.5);
    assert_eq!(engine.now(), Some(2.0));
    assert_eq!(engine.value(LayerId::Foreground, Property::StrokeEnd), Some(0.5));
}

#[test]
fn invalid_animation_is_rejected() {
    let mut engine = AnimationEngine::new();
    assert!(
        engine
            .add(LayerId::Foreground, "stroke", stroke(-1.0), true)
            .is_err()
    );
    assert!(engine.is_empty());
}
