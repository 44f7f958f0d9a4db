use ranktrace::{InputConfig, InputMode, RankTraceError};

#[test]
fn default_config_is_ranktrace_at_100ms() {
    let cfg = InputConfig::default();
    assert_eq!(cfg.mode, InputMode::Ranktrace);
    assert!(cfg.bounds.is_none());
    assert!(cfg.controls.is_empty());
    assert_eq!(cfg.graph_update_period_ms, 100);
}

#[test]
fn mode_identifiers_are_kebab_case() {
    let json = serde_json::to_string(&InputMode::RanktraceNew).unwrap();
    assert_eq!(json, "\"ranktrace-new\"");
    let json = serde_json::to_string(&InputMode::ContinuousKeyboard).unwrap();
    assert_eq!(json, "\"continuous-keyboard\"");
}

#[test]
fn json_config_round_trips() {
    let cfg = InputConfig {
        mode: InputMode::RanktraceNew,
        bounds: Some([-1.0, 1.0]),
        graph_update_period_ms: 50,
        ..Default::default()
    };
    let json = serde_json::to_string(&cfg).unwrap();
    let back = InputConfig::from_json_str(&json).unwrap();
    assert_eq!(back.mode, InputMode::RanktraceNew);
    assert_eq!(back.bounds, Some([-1.0, 1.0]));
    assert_eq!(back.graph_update_period_ms, 50);
}

#[test]
fn missing_fields_fall_back_to_defaults() {
    let cfg = InputConfig::from_json_str(r#"{"mode": "continuous-mousemove"}"#).unwrap();
    assert_eq!(cfg.mode, InputMode::ContinuousMousemove);
    assert_eq!(cfg.graph_update_period_ms, 100);
}

#[test]
fn unknown_mode_identifier_parses_without_failing() {
    let cfg = InputConfig::from_json_str(r#"{"mode": "unknown-mode"}"#).unwrap();
    assert_eq!(cfg.mode, InputMode::Unknown);
}

#[test]
fn yaml_config_parses() {
    let cfg = InputConfig::from_yaml_str(
        "mode: ranktrace\ncontrols:\n  up: ArrowUp\n  down: ArrowDown\n",
    )
    .unwrap();
    assert_eq!(cfg.mode, InputMode::Ranktrace);
    assert_eq!(cfg.controls.get("up").map(String::as_str), Some("ArrowUp"));
}

#[test]
fn mode_from_str_rejects_unknown_names() {
    let err = "wiggle".parse::<InputMode>().unwrap_err();
    assert!(matches!(err, RankTraceError::UnrecognizedMode(_)));
    assert_eq!("ranktrace-new".parse::<InputMode>().unwrap(), InputMode::RanktraceNew);
}

#[test]
fn load_rejects_unknown_extensions() {
    let path = std::env::temp_dir().join("ranktrace_cfg_test.toml");
    std::fs::write(&path, "mode = \"ranktrace\"").unwrap();
    let err = InputConfig::load(&path).unwrap_err();
    assert!(matches!(err, RankTraceError::UnsupportedExtension(_)));
    let _ = std::fs::remove_file(&path);
}

#[test]
fn load_reads_json_files() {
    let path = std::env::temp_dir().join("ranktrace_cfg_test.json");
    std::fs::write(&path, r#"{"mode": "ranktrace-new"}"#).unwrap();
    let cfg = InputConfig::load(&path).unwrap();
    assert_eq!(cfg.mode, InputMode::RanktraceNew);
    let _ = std::fs::remove_file(&path);
}
