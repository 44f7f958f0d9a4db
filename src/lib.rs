//! RankTrace crate root: re-exports and module wiring.
//!
//! This crate provides a frame-driven continuous-intensity annotation
//! widget built on egui/eframe. Live keyboard or mouse input moves a
//! scalar intensity reading; a ring buffer of recorded samples is drawn
//! every display refresh as a smoothed curve with a cursor marker; each
//! tick publishes the current reading over a channel. A replay mode
//! drives the reading from previously recorded samples instead.
//!
//! Modules:
//! - `buffer`: ring buffer of recorded samples and a writer handle
//! - `tracker`: the intensity reading and its min/max envelope
//! - `trace`: curve normalization and smoothed drawing
//! - `animation`: the per-frame loop state machine
//! - `widget`: egui widget glue and a standalone native runner
//! - `sink`: channel publishing the reading once per tick
//! - `controllers`: external pause/resume control
//! - `events`: filtered event subscription

pub mod animation;
pub mod buffer;
pub mod config;
pub mod controllers;
mod error;
pub mod events;
pub mod input;
pub mod sink;
pub mod trace;
pub mod tracker;
pub mod widget;

// Public re-exports for a compact external API
pub use animation::{AnimationLoop, LoopState, TickInput};
pub use buffer::{BufferWriter, Sample, SampleBuffer, SampleMeta, SharedSampleBuffer};
pub use config::{InputConfig, InputMode, TraceLook};
pub use controllers::PlaybackController;
pub use error::RankTraceError;
pub use events::{EventController, EventKind, TraceEvent};
pub use input::{Action, ModeConfig};
pub use sink::{channel_intensity, IntensityReading, IntensitySink};
pub use tracker::{IntensityState, IntensityTracker, SignalSource};
pub use widget::{run_ranktrace, RankTraceWidget};
