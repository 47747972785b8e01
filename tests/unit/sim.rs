use super::*;
use crate::timer::TickClock;

fn sim() -> Simulation {
    Simulation::new(ProgressBarConfig::default(), Fps::new(60, 1).unwrap()).unwrap()
}

#[test]
fn advance_renders_every_frame_boundary() {
    let mut s = sim();
    let frames = s.advance_to(0.5);
    // Frames 0..=30 at 60fps.
    assert_eq!(frames.len(), 31);
    assert_eq!(frames[0].time_secs, 0.0);
    assert_eq!(frames[30].time_secs, 0.5);
    assert!(s.advance_to(0.5).is_empty());
}

#[test]
fn start_commits_animations_on_the_current_frame() {
    let mut s = sim();
    s.advance_to(1.0);
    let snap = s.start(2.0, false).unwrap();
    assert_eq!(snap.label, "2.0");
    assert_eq!(snap.stroke_fraction, 0.0);

    s.advance_to(2.0);
    assert!((s.widget().stroke_fraction() - 0.5).abs() < 1e-9);
}

#[test]
fn run_to_completion_stops_once_idle() {
    let mut s = sim();
    s.start(1.0, true).unwrap();
    let frames = s.run_to_completion(10.0);
    let last = frames.last().unwrap();
    assert_eq!(last.phase, Phase::Idle);
    assert_eq!(last.label, "0.0");
    assert!(last.pulse.is_none());
    assert!((last.time_secs - 1.0).abs() < 1e-9);
}

#[test]
fn run_to_completion_respects_the_limit() {
    let mut s = sim();
    s.start(100.0, false).unwrap();
    let frames = s.run_to_completion(0.5);
    assert!(frames.last().unwrap().phase == Phase::Running);
    assert!(s.now() >= 0.5 && s.now() < 0.52);
}

#[test]
fn seek_lands_on_the_first_frame_at_or_after_the_target() {
    let mut s = sim();
    s.start(2.0, false).unwrap();
    let snap = s.seek_to(0.5).unwrap();
    assert_eq!(snap.time_secs, 0.5);
    assert_eq!(snap.label, "1.5");

    // 0.505s falls between frames 30 and 31.
    let snap = s.seek_to(0.505).unwrap();
    assert!((snap.time_secs - 31.0 / 60.0).abs() < 1e-12);
    assert!(s.seek_to(0.51).is_none());
}

#[test]
fn long_seek_keeps_only_the_final_frame() {
    let mut s = Simulation::new(ProgressBarConfig::default(), Fps::new(120, 1).unwrap()).unwrap();
    s.start(5.0, true).unwrap();
    let snap = s.seek_to(600.0).unwrap();
    assert_eq!(snap.time_secs, 600.0);
    assert_eq!(snap.label, "0.0");
    assert_eq!(snap.phase, Phase::Idle);
    assert!(snap.pulse.is_none());
    assert_eq!(s.clock().scheduled_count(), 0);
}
