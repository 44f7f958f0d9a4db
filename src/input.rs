//! Input mode resolution: maps the declarative mode to value bounds, a
//! step size and key bindings.
//!
//! The resolved [`ModeConfig`] is immutable for the lifetime of one
//! animation loop; a configuration change means a fresh loop.

use std::collections::BTreeMap;
use std::fmt;

use eframe::egui;
use once_cell::sync::Lazy;

use crate::config::{InputConfig, InputMode};
use crate::error::RankTraceError;

/// The two widget actions a key can be bound to.
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord)]
pub enum Action {
    Up,
    Down,
}

impl Action {
    pub fn name(self) -> &'static str {
        match self {
            Action::Up => "up",
            Action::Down => "down",
        }
    }

    /// Human-readable label for help overlays.
    pub fn label(self) -> &'static str {
        match self {
            Action::Up => "Increase",
            Action::Down => "Decrease",
        }
    }

    fn from_name(s: &str) -> Option<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "up" => Some(Action::Up),
            "down" => Some(Action::Down),
            _ => None,
        }
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// Named keys accepted in control maps, beyond single characters.
static NAMED_KEYS: Lazy<BTreeMap<&'static str, egui::Key>> = Lazy::new(|| {
    let mut m = BTreeMap::new();
    m.insert("space", egui::Key::Space);
    m.insert("arrowup", egui::Key::ArrowUp);
    m.insert("arrowdown", egui::Key::ArrowDown);
    m.insert("arrowleft", egui::Key::ArrowLeft);
    m.insert("arrowright", egui::Key::ArrowRight);
    m.insert("up", egui::Key::ArrowUp);
    m.insert("down", egui::Key::ArrowDown);
    m
});

fn key_from_char(c: char) -> Option<egui::Key> {
    match c.to_ascii_uppercase() {
        'A' => Some(egui::Key::A),
        'B' => Some(egui::Key::B),
        'C' => Some(egui::Key::C),
        'D' => Some(egui::Key::D),
        'E' => Some(egui::Key::E),
        'F' => Some(egui::Key::F),
        'G' => Some(egui::Key::G),
        'H' => Some(egui::Key::H),
        'I' => Some(egui::Key::I),
        'J' => Some(egui::Key::J),
        'K' => Some(egui::Key::K),
        'L' => Some(egui::Key::L),
        'M' => Some(egui::Key::M),
        'N' => Some(egui::Key::N),
        'O' => Some(egui::Key::O),
        'P' => Some(egui::Key::P),
        'Q' => Some(egui::Key::Q),
        'R' => Some(egui::Key::R),
        'S' => Some(egui::Key::S),
        'T' => Some(egui::Key::T),
        'U' => Some(egui::Key::U),
        'V' => Some(egui::Key::V),
        'W' => Some(egui::Key::W),
        'X' => Some(egui::Key::X),
        'Y' => Some(egui::Key::Y),
        'Z' => Some(egui::Key::Z),
        '0' => Some(egui::Key::Num0),
        '1' => Some(egui::Key::Num1),
        '2' => Some(egui::Key::Num2),
        '3' => Some(egui::Key::Num3),
        '4' => Some(egui::Key::Num4),
        '5' => Some(egui::Key::Num5),
        '6' => Some(egui::Key::Num6),
        '7' => Some(egui::Key::Num7),
        '8' => Some(egui::Key::Num8),
        '9' => Some(egui::Key::Num9),
        ' ' => Some(egui::Key::Space),
        _ => None,
    }
}

/// Resolve a key name from a control map ("s", "ArrowUp", "space", ...).
pub fn parse_key(name: &str) -> Option<egui::Key> {
    let trimmed = name.trim();
    if let Some(key) = NAMED_KEYS.get(trimmed.to_ascii_lowercase().as_str()) {
        return Some(*key);
    }
    let mut chars = trimmed.chars();
    match (chars.next(), chars.next()) {
        (Some(c), None) => key_from_char(c),
        _ => None,
    }
}

/// One-line key hint for a binding set, e.g. `"S Increase   A Decrease"`.
/// Empty when nothing is bound.
pub fn binding_hints(bindings: &[(Action, egui::Key)]) -> String {
    bindings
        .iter()
        .map(|(action, key)| format!("{} {}", key.name(), action.label()))
        .collect::<Vec<_>>()
        .join("   ")
}

// ─────────────────────────────────────────────────────────────────────────────
// ModeConfig
// ─────────────────────────────────────────────────────────────────────────────

/// The resolved parameters of an input mode.
#[derive(Clone, Debug)]
pub struct ModeConfig {
    pub mode: InputMode,
    /// Inclusive value bounds of the reading.
    pub bounds: (f64, f64),
    /// Reading delta per keydown.
    pub step: f64,
    /// Resolved key bindings; empty when the mode takes no keyboard input.
    pub bindings: Vec<(Action, egui::Key)>,
}

impl ModeConfig {
    /// A config with no input bindings, used as the degraded fallback
    /// when resolution fails. Rendering still works with it.
    pub fn unbound(mode: InputMode) -> Self {
        Self {
            mode,
            bounds: (0.0, 1.0),
            step: 0.05,
            bindings: Vec::new(),
        }
    }
}

/// Merge the default controls with caller overrides, caller winning.
fn resolve_controls(
    overrides: &BTreeMap<String, String>,
) -> Result<Vec<(Action, egui::Key)>, RankTraceError> {
    let mut map: BTreeMap<Action, egui::Key> = BTreeMap::new();
    map.insert(Action::Up, egui::Key::S);
    map.insert(Action::Down, egui::Key::A);
    for (action_name, key_name) in overrides {
        let action = Action::from_name(action_name)
            .ok_or_else(|| RankTraceError::UnknownAction(action_name.clone()))?;
        let key = parse_key(key_name).ok_or_else(|| RankTraceError::UnknownKey {
            key: key_name.clone(),
            action: action_name.clone(),
        })?;
        map.insert(action, key);
    }
    Ok(map.into_iter().collect())
}

/// Resolve the declarative config into bounds, step and bindings.
///
/// Errors are recoverable: the caller logs them and falls back to
/// [`ModeConfig::unbound`], so a bad mode never takes the widget down.
pub fn resolve(cfg: &InputConfig) -> Result<ModeConfig, RankTraceError> {
    let bounds = match cfg.bounds {
        Some([lo, hi]) => (lo, hi),
        None if cfg.mode == InputMode::Ranktrace => (f64::NEG_INFINITY, f64::INFINITY),
        None => (0.0, 1.0),
    };
    let step = if cfg.mode == InputMode::Ranktrace {
        1.0
    } else {
        0.05
    };

    let bindings = match cfg.mode {
        InputMode::ContinuousKeyboard | InputMode::Ranktrace | InputMode::RanktraceNew => {
            resolve_controls(&cfg.controls)?
        }
        InputMode::ContinuousMousemove => Vec::new(),
        InputMode::Binary | InputMode::GravityKeyboard => {
            return Err(RankTraceError::DeprecatedMode(cfg.mode.to_string()))
        }
        InputMode::Unknown => {
            return Err(RankTraceError::UnrecognizedMode(cfg.mode.to_string()))
        }
    };

    Ok(ModeConfig {
        mode: cfg.mode,
        bounds,
        step,
        bindings,
    })
}
