//! Declarative input configuration and visual style.
//!
//! `InputConfig` is what the embedding task hands the widget: the input mode,
//! optional explicit value bounds, control overrides and the redraw
//! period of the gated variant. Configs load from JSON or YAML files.

use std::collections::BTreeMap;
use std::fmt;
use std::path::Path;
use std::str::FromStr;

use eframe::egui::Color32;
use serde::{Deserialize, Serialize};

use crate::error::RankTraceError;

/// How the intensity reading is driven.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum InputMode {
    /// Bound keys nudge the reading up/down inside the unit interval.
    ContinuousKeyboard,
    /// The pointer's vertical position inside the canvas is the reading.
    ContinuousMousemove,
    /// Unbounded rank trace with unit steps and a quadratic-smoothed curve.
    Ranktrace,
    /// Rank trace with a re-centering vertical band and gated redraws.
    RanktraceNew,
    /// Deprecated; parsed for config compatibility, binds no controls.
    Binary,
    /// Deprecated; parsed for config compatibility, binds no controls.
    GravityKeyboard,
    /// Any mode identifier the parser does not know.
    Unknown,
}

impl Serialize for InputMode {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

// Unknown identifiers must not fail deserialization: they degrade to
// `Unknown`, which the resolver turns into a logged configuration error.
impl<'de> Deserialize<'de> for InputMode {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        Ok(s.parse().unwrap_or(InputMode::Unknown))
    }
}

impl InputMode {
    pub fn as_str(self) -> &'static str {
        match self {
            InputMode::ContinuousKeyboard => "continuous-keyboard",
            InputMode::ContinuousMousemove => "continuous-mousemove",
            InputMode::Ranktrace => "ranktrace",
            InputMode::RanktraceNew => "ranktrace-new",
            InputMode::Binary => "binary",
            InputMode::GravityKeyboard => "gravity-keyboard",
            InputMode::Unknown => "unknown",
        }
    }
}

impl fmt::Display for InputMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for InputMode {
    type Err = RankTraceError;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "continuous-keyboard" => Ok(InputMode::ContinuousKeyboard),
            "continuous-mousemove" => Ok(InputMode::ContinuousMousemove),
            "ranktrace" => Ok(InputMode::Ranktrace),
            "ranktrace-new" => Ok(InputMode::RanktraceNew),
            "binary" => Ok(InputMode::Binary),
            "gravity-keyboard" => Ok(InputMode::GravityKeyboard),
            other => Err(RankTraceError::UnrecognizedMode(other.to_string())),
        }
    }
}

/// Declarative widget configuration.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct InputConfig {
    pub mode: InputMode,
    /// Explicit value bounds; overrides the per-mode default when set.
    pub bounds: Option<[f64; 2]>,
    /// Control overrides, action name ("up"/"down") to key name.
    pub controls: BTreeMap<String, String>,
    /// Minimum interval between curve rebuilds for `ranktrace-new`, ms.
    pub graph_update_period_ms: u64,
}

impl Default for InputConfig {
    fn default() -> Self {
        Self {
            mode: InputMode::Ranktrace,
            bounds: None,
            controls: BTreeMap::new(),
            graph_update_period_ms: 100,
        }
    }
}

impl InputConfig {
    pub fn from_json_str(s: &str) -> Result<Self, RankTraceError> {
        Ok(serde_json::from_str(s)?)
    }

    pub fn from_yaml_str(s: &str) -> Result<Self, RankTraceError> {
        Ok(serde_yaml::from_str(s)?)
    }

    /// Load a config file, dispatching on the file extension.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, RankTraceError> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path)?;
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .unwrap_or("")
            .to_ascii_lowercase();
        match ext.as_str() {
            "json" => Self::from_json_str(&text),
            "yaml" | "yml" => Self::from_yaml_str(&text),
            other => Err(RankTraceError::UnsupportedExtension(other.to_string())),
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Visual style
// ─────────────────────────────────────────────────────────────────────────────

/// Colors and stroke geometry of the rendered trace.
#[derive(Clone, Debug, PartialEq)]
pub struct TraceLook {
    pub background: Color32,
    pub stroke: Color32,
    pub line_width: f32,
    pub cursor_radius: f32,
    /// Bezier smoothing factors (tangent length, vertical damping) used
    /// by the spline variant.
    pub smoothing: (f32, f32),
}

impl TraceLook {
    /// Look of the classic quadratic-smoothed variant.
    pub fn ranktrace() -> Self {
        Self {
            background: Color32::from_rgb(0x2d, 0x2d, 0x2d),
            stroke: Color32::from_rgb(0x86, 0xa3, 0xc6),
            line_width: 4.0,
            cursor_radius: 10.0,
            smoothing: (0.3, 0.6),
        }
    }

    /// Look of the band-re-centering variant (lighter background, tight
    /// spline following the raw samples).
    pub fn ranktrace_new() -> Self {
        Self {
            background: Color32::from_rgb(0x4d, 0x4d, 0x4d),
            smoothing: (1.0, 0.0),
            ..Self::ranktrace()
        }
    }

    /// The natural look for a given mode.
    pub fn for_mode(mode: InputMode) -> Self {
        match mode {
            InputMode::RanktraceNew => Self::ranktrace_new(),
            _ => Self::ranktrace(),
        }
    }
}

impl Default for TraceLook {
    fn default() -> Self {
        Self::ranktrace()
    }
}
