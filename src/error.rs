//! Crate error type.
//!
//! Nothing here is fatal to a running widget: configuration errors are
//! logged by the caller and degrade to a widget without input bindings.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum RankTraceError {
    /// The configured input mode is not one the resolver knows.
    #[error("unrecognized input mode '{0}'")]
    UnrecognizedMode(String),
    /// The mode is still parsed for config compatibility but no longer
    /// gets input bindings.
    #[error("input mode '{0}' is deprecated and binds no controls")]
    DeprecatedMode(String),
    /// A control override names a key that cannot be resolved.
    #[error("unknown key name '{key}' for action '{action}'")]
    UnknownKey { key: String, action: String },
    /// A control override names an action the widget does not handle.
    #[error("unknown action '{0}' in controls map")]
    UnknownAction(String),
    #[error("failed to read config file: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to parse JSON config: {0}")]
    Json(#[from] serde_json::Error),
    #[error("failed to parse YAML config: {0}")]
    Yaml(#[from] serde_yaml::Error),
    #[error("unsupported config file extension '{0}' (expected json, yaml or yml)")]
    UnsupportedExtension(String),
}
