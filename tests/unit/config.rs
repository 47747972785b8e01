use super::*;

#[test]
fn defaults_reproduce_the_stock_widget() {
    let cfg = ProgressBarConfig::default();
    cfg.validate().unwrap();
    assert_eq!(cfg.ring_radius(), 80.0);
    assert_eq!(cfg.tick_interval_secs, 0.1);
    assert_eq!(cfg.foreground.colors[0], Rgba8::rgb(206, 7, 85));
    assert_eq!(cfg.foreground.colors[1], Rgba8::rgb(245, 180, 51));
    assert_eq!(cfg.pulse.scale, [1.0, 1.2]);
    assert_eq!(cfg.pulse.opacity, [0.7, 0.0]);
    assert_eq!(cfg.pulse.ease, Ease::EaseInEaseOut);
    assert_eq!(cfg.stroke_ease, Ease::Linear);
}

#[test]
fn partial_json_falls_back_to_defaults() {
    let cfg = ProgressBarConfig::from_json_str(
        r##"{ "line_width": 6, "pulse": { "period_secs": 0.5 }, "track_color": "#101010" }"##,
    )
    .unwrap();
    assert_eq!(cfg.line_width, 6.0);
    assert_eq!(cfg.pulse.period_secs, 0.5);
    assert_eq!(cfg.pulse.scale, [1.0, 1.2]);
    assert_eq!(cfg.track_color, Rgba8::rgb(16, 16, 16));
    assert_eq!(cfg.canvas.width, 200);
}

#[test]
fn invalid_values_are_rejected() {
    assert!(ProgressBarConfig::from_json_str(r#"{ "tick_interval_secs": 0 }"#).is_err());
    assert!(ProgressBarConfig::from_json_str(r#"{ "ring_inset": 500 }"#).is_err());
    assert!(ProgressBarConfig::from_json_str(r#"{ "pulse": { "opacity": [1.5, 0] } }"#).is_err());
    assert!(ProgressBarConfig::from_json_str(r#"{ "track_color": "gray" }"#).is_err());
}

#[test]
fn parse_errors_map_to_serde_variant() {
    let err = ProgressBarConfig::from_json_str("{ not json").unwrap_err();
    assert!(matches!(err, CountdownError::Serde(_)));
}

#[test]
fn missing_file_reports_path() {
    let err = ProgressBarConfig::from_path("does/not/exist.json").unwrap_err();
    assert!(format!("{err:#}").contains("does/not/exist.json") || err.to_string().contains("open config"));
}

#[test]
fn bundled_demo_config_loads() {
    let cfg = ProgressBarConfig::from_path("demos/dark.json").unwrap();
    assert_eq!(cfg.canvas.width, 240);
    assert_eq!(cfg.ring_radius(), 96.0);
    assert_eq!(cfg.background, Some(Rgba8::rgb(0x10, 0x10, 0x14)));
    // Unlisted fields keep their defaults.
    assert_eq!(cfg.tick_interval_secs, 0.1);
}
