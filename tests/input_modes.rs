use std::collections::BTreeMap;

use ranktrace::input::{self, parse_key, Action};
use ranktrace::{InputConfig, InputMode, RankTraceError};

fn config(mode: InputMode) -> InputConfig {
    InputConfig {
        mode,
        ..Default::default()
    }
}

fn binding(cfg: &ranktrace::ModeConfig, action: Action) -> Option<egui::Key> {
    cfg.bindings
        .iter()
        .find(|(a, _)| *a == action)
        .map(|(_, k)| *k)
}

#[test]
fn ranktrace_is_unbounded_with_unit_step() {
    let resolved = input::resolve(&config(InputMode::Ranktrace)).unwrap();
    assert_eq!(resolved.bounds, (f64::NEG_INFINITY, f64::INFINITY));
    assert_eq!(resolved.step, 1.0);
}

#[test]
fn other_modes_default_to_the_unit_interval() {
    for mode in [
        InputMode::ContinuousKeyboard,
        InputMode::ContinuousMousemove,
        InputMode::RanktraceNew,
    ] {
        let resolved = input::resolve(&config(mode)).unwrap();
        assert_eq!(resolved.bounds, (0.0, 1.0));
        assert_eq!(resolved.step, 0.05);
    }
}

#[test]
fn explicit_bounds_always_override() {
    let mut cfg = config(InputMode::Ranktrace);
    cfg.bounds = Some([-2.0, 2.0]);
    let resolved = input::resolve(&cfg).unwrap();
    assert_eq!(resolved.bounds, (-2.0, 2.0));
}

#[test]
fn default_controls_bind_s_and_a() {
    let resolved = input::resolve(&config(InputMode::ContinuousKeyboard)).unwrap();
    assert_eq!(binding(&resolved, Action::Up), Some(egui::Key::S));
    assert_eq!(binding(&resolved, Action::Down), Some(egui::Key::A));
}

#[test]
fn control_overrides_win_on_collision() {
    let mut cfg = config(InputMode::Ranktrace);
    cfg.controls = BTreeMap::from([("up".to_string(), "ArrowUp".to_string())]);
    let resolved = input::resolve(&cfg).unwrap();
    assert_eq!(binding(&resolved, Action::Up), Some(egui::Key::ArrowUp));
    // untouched action keeps its default
    assert_eq!(binding(&resolved, Action::Down), Some(egui::Key::A));
}

#[test]
fn mousemove_mode_binds_no_keys() {
    let resolved = input::resolve(&config(InputMode::ContinuousMousemove)).unwrap();
    assert!(resolved.bindings.is_empty());
}

#[test]
fn unknown_action_in_controls_is_an_error() {
    let mut cfg = config(InputMode::Ranktrace);
    cfg.controls = BTreeMap::from([("sideways".to_string(), "q".to_string())]);
    assert!(matches!(
        input::resolve(&cfg),
        Err(RankTraceError::UnknownAction(_))
    ));
}

#[test]
fn unknown_key_name_is_an_error() {
    let mut cfg = config(InputMode::Ranktrace);
    cfg.controls = BTreeMap::from([("up".to_string(), "NoSuchKey".to_string())]);
    assert!(matches!(
        input::resolve(&cfg),
        Err(RankTraceError::UnknownKey { .. })
    ));
}

#[test]
fn deprecated_modes_resolve_to_an_error() {
    for mode in [InputMode::Binary, InputMode::GravityKeyboard] {
        assert!(matches!(
            input::resolve(&config(mode)),
            Err(RankTraceError::DeprecatedMode(_))
        ));
    }
}

#[test]
fn unknown_mode_resolves_to_an_error() {
    assert!(matches!(
        input::resolve(&config(InputMode::Unknown)),
        Err(RankTraceError::UnrecognizedMode(_))
    ));
}

#[test]
fn key_names_accept_letters_in_either_case() {
    assert_eq!(parse_key("s"), Some(egui::Key::S));
    assert_eq!(parse_key("S"), Some(egui::Key::S));
    assert_eq!(parse_key("7"), Some(egui::Key::Num7));
}

#[test]
fn key_names_accept_named_keys() {
    assert_eq!(parse_key("ArrowUp"), Some(egui::Key::ArrowUp));
    assert_eq!(parse_key("space"), Some(egui::Key::Space));
    assert_eq!(parse_key(" down "), Some(egui::Key::ArrowDown));
}

#[test]
fn garbage_key_names_do_not_parse() {
    assert_eq!(parse_key("ctrl+s"), None);
    assert_eq!(parse_key(""), None);
}

#[test]
fn binding_hints_name_key_and_action() {
    let resolved = input::resolve(&config(InputMode::ContinuousKeyboard)).unwrap();
    let hints = input::binding_hints(&resolved.bindings);
    assert!(hints.contains("S Increase"), "got: {hints}");
    assert!(hints.contains("A Decrease"), "got: {hints}");
}

#[test]
fn binding_hints_are_empty_without_bindings() {
    assert_eq!(input::binding_hints(&[]), "");
}

#[test]
fn unbound_fallback_has_no_bindings() {
    let fallback = ranktrace::ModeConfig::unbound(InputMode::Unknown);
    assert!(fallback.bindings.is_empty());
    assert_eq!(fallback.bounds, (0.0, 1.0));
}
