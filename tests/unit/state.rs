use super::*;

#[test]
fn counts_down_to_exact_zero() {
    let mut s = CountdownState::new(5.0, false, 0.1);
    let mut finished_at = None;
    for i in 1..=60 {
        if s.apply_tick() == TickOutcome::Finished {
            finished_at = Some(i);
            break;
        }
    }
    assert_eq!(finished_at, Some(50));
    assert_eq!(s.remaining_secs, 0.0);
    assert_eq!(s.ticks(), 50);
}

#[test]
fn remaining_is_monotonic_and_clamped() {
    let mut s = CountdownState::new(0.25, true, 0.1);
    let mut last = s.remaining_secs;
    loop {
        let out = s.apply_tick();
        assert!(s.remaining_secs <= last);
        assert!(s.remaining_secs >= 0.0);
        last = s.remaining_secs;
        if out == TickOutcome::Finished {
            break;
        }
    }
    // 0.25 needs three ticks of 0.1; the last one clamps.
    assert_eq!(s.ticks(), 3);
    assert_eq!(s.remaining_secs, 0.0);
}

#[test]
fn ticks_after_finish_change_nothing() {
    let mut s = CountdownState::new(0.1, false, 0.1);
    assert_eq!(s.apply_tick(), TickOutcome::Finished);
    assert_eq!(s.apply_tick(), TickOutcome::Finished);
    assert_eq!(s.ticks(), 1);
}

#[test]
fn labels_match_the_widget_format() {
    assert_eq!(initial_label(5.0), "5.0");
    assert_eq!(initial_label(2.5), "2.5");
    assert_eq!(initial_label(0.25), "0.25");
    assert_eq!(remaining_label(4.9), "4.9");
    assert_eq!(remaining_label(2.5000000001), "2.5");
    assert_eq!(remaining_label(0.0), "0.0");
    assert_eq!(remaining_label(-0.0), "0.0");
}
