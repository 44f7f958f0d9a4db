//! The intensity reading and its running envelope.

use crate::buffer::SampleBuffer;
use crate::input::{Action, ModeConfig};

/// Where the reading comes from. Chosen once when the loop is built,
/// never branched on mid-flight: replay attaches no input handlers and
/// pulls recorded samples instead.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum SignalSource {
    Live,
    Replay,
}

/// Current reading plus its high/low watermark since mount.
///
/// The envelope only ever expands; `min <= max` holds after the first
/// accepted update. It is a session-wide watermark, not a window.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct IntensityState {
    pub current: f64,
    pub min: f64,
    pub max: f64,
}

impl Default for IntensityState {
    fn default() -> Self {
        Self {
            current: 0.0,
            min: 0.0,
            max: 0.0,
        }
    }
}

pub struct IntensityTracker {
    state: IntensityState,
    bounds: (f64, f64),
    step: f64,
    source: SignalSource,
}

impl IntensityTracker {
    pub fn new(cfg: &ModeConfig, source: SignalSource) -> Self {
        Self {
            state: IntensityState::default(),
            bounds: cfg.bounds,
            step: cfg.step,
            source,
        }
    }

    pub fn source(&self) -> SignalSource {
        self.source
    }

    pub fn state(&self) -> IntensityState {
        self.state
    }

    pub fn bounds(&self) -> (f64, f64) {
        self.bounds
    }

    /// Returns the current reading without side effects.
    pub fn read(&self) -> f64 {
        self.state.current
    }

    /// Accept a candidate reading: NaN is discarded, everything else is
    /// clamped into the bounds and expands the envelope.
    pub fn request_update(&mut self, candidate: f64) {
        if candidate.is_nan() {
            return;
        }
        self.state.current = self.bounds.0.max(self.bounds.1.min(candidate));
        self.state.max = self.state.max.max(self.state.current);
        self.state.min = self.state.min.min(self.state.current);
    }

    /// Keydown handler: move the reading by one step.
    pub fn nudge(&mut self, action: Action) {
        let delta = match action {
            Action::Up => self.step,
            Action::Down => -self.step,
        };
        let current = self.state.current;
        self.request_update(current + delta);
    }

    /// Mousemove path: the pointer's bottom-relative fraction of the
    /// container becomes the reading, clamped into the unit interval
    /// regardless of the mode bounds. Does not touch the envelope.
    pub fn set_pointer_fraction(&mut self, fraction: f64) {
        if fraction.is_nan() {
            return;
        }
        self.state.current = fraction.clamp(0.0, 1.0);
    }

    /// Per-tick refresh. Replay pulls the newest recorded sample through
    /// [`Self::request_update`] and publishes nothing; live returns the
    /// value to publish.
    pub fn refresh(&mut self, buffer: &SampleBuffer) -> Option<f64> {
        match self.source {
            SignalSource::Replay => {
                if let Some((sample, _meta)) = buffer.read_head() {
                    self.request_update(sample.value);
                }
                None
            }
            SignalSource::Live => Some(self.state.current),
        }
    }
}
