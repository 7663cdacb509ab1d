use super::*;

#[test]
fn empty_object_is_default() {
    let cfg = MockupConfig::from_json_str("{}").unwrap();
    assert_eq!(cfg, MockupConfig::default());
    assert_eq!(cfg.icon_timeout(), Duration::from_secs(5));
    assert_eq!(cfg.clock.size_px, 24.0);
    assert_eq!(cfg.clock.baseline_y, 40.0);
    assert_eq!(cfg.background_rgba, [0, 0, 0, 0]);
}

#[test]
fn partial_override_keeps_other_defaults() {
    let cfg = MockupConfig::from_json_str(
        r#"{ "icon_timeout_ms": 250, "clock": { "size_px": 30 }, "assets_root": "art" }"#,
    )
    .unwrap();
    assert_eq!(cfg.icon_timeout_ms, 250);
    assert_eq!(cfg.clock.size_px, 30.0);
    assert_eq!(cfg.clock.shadow_blur_px, 4.0);
    assert_eq!(cfg.assets_root.as_deref(), Some(Path::new("art")));
}

#[test]
fn unknown_fields_and_bad_values_are_rejected() {
    let err = MockupConfig::from_json_str(r#"{ "icon_timeout": 5 }"#).unwrap_err();
    assert!(matches!(err, MockupError::Serde(_)));

    let err = MockupConfig::from_json_str(r#"{ "icon_timeout_ms": 0 }"#).unwrap_err();
    assert!(matches!(err, MockupError::Validation(_)));

    let err = MockupConfig::from_json_str(r#"{ "clock": { "size_px": -1 } }"#).unwrap_err();
    assert!(matches!(err, MockupError::Validation(_)));
}

#[test]
fn missing_file_reports_path() {
    let err = MockupConfig::from_path("definitely/not/here.json").unwrap_err();
    assert!(err.to_string().contains("definitely/not/here.json"));
}
