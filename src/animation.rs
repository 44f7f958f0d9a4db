//! The per-frame animation loop.
//!
//! One [`AnimationLoop`] instance owns the tracker, the renderer and the
//! loop state for one mounted widget; nothing lives in globals. Each tick
//! runs strictly in order: apply input, refresh the reading (or replay
//! it), publish, redraw. The cancellation state is checked at the top of
//! every tick, so a tick arriving after [`AnimationLoop::stop`] has no
//! side effects.

use eframe::egui::{self, Rect};

use crate::buffer::SampleBuffer;
use crate::config::{InputConfig, InputMode, TraceLook};
use crate::events::{EventController, EventKind, TraceEvent};
use crate::input::{self, Action, ModeConfig};
use crate::sink::IntensitySink;
use crate::trace::TraceRenderer;
use crate::tracker::{IntensityTracker, SignalSource};

/// Lifecycle states of the loop. `Stopped` is terminal.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum LoopState {
    Running,
    Paused,
    Stopped,
}

/// Everything the loop samples from the outside world on one tick.
#[derive(Clone, Debug, Default)]
pub struct TickInput {
    /// Monotonic time in milliseconds.
    pub now_ms: f64,
    /// Actions whose bound key saw a keydown this frame.
    pub pressed: Vec<Action>,
    /// Pointer vertical position as a bottom-relative fraction of the
    /// canvas, when the mode reads the pointer.
    pub pointer_fraction: Option<f64>,
}

pub struct AnimationLoop {
    cfg: ModeConfig,
    tracker: IntensityTracker,
    renderer: TraceRenderer,
    sink: Option<IntensitySink>,
    events: EventController,
    state: LoopState,
}

impl AnimationLoop {
    /// Build a loop from an already-resolved mode. Live mode keeps the
    /// mode's key bindings; replay detaches them.
    pub fn new(
        mut cfg: ModeConfig,
        source: SignalSource,
        look: TraceLook,
        graph_update_period_ms: u64,
        sink: Option<IntensitySink>,
    ) -> Self {
        if source == SignalSource::Replay {
            cfg.bindings.clear();
        }
        let tracker = IntensityTracker::new(&cfg, source);
        Self {
            cfg,
            tracker,
            renderer: TraceRenderer::new(look, graph_update_period_ms),
            sink,
            events: EventController::new(),
            state: LoopState::Running,
        }
    }

    /// Build a loop straight from the declarative config. Resolution
    /// errors are logged and degrade to a loop without input bindings;
    /// they never fail construction.
    pub fn from_config(
        cfg: &InputConfig,
        source: SignalSource,
        sink: Option<IntensitySink>,
    ) -> Self {
        let mode_cfg = match input::resolve(cfg) {
            Ok(resolved) => resolved,
            Err(err) => {
                log::error!("input configuration error: {err}; continuing without bindings");
                ModeConfig::unbound(cfg.mode)
            }
        };
        Self::new(
            mode_cfg,
            source,
            TraceLook::for_mode(cfg.mode),
            cfg.graph_update_period_ms,
            sink,
        )
    }

    pub fn state(&self) -> LoopState {
        self.state
    }

    pub fn mode(&self) -> InputMode {
        self.cfg.mode
    }

    pub fn tracker(&self) -> &IntensityTracker {
        &self.tracker
    }

    /// Resolved key bindings; empty in replay mode or after teardown.
    pub fn bindings(&self) -> &[(Action, egui::Key)] {
        &self.cfg.bindings
    }

    /// Handle for subscribing to loop events.
    pub fn events(&self) -> EventController {
        self.events.clone()
    }

    /// One frame. Returns whether the loop wants another frame
    /// scheduled. `painter` is absent in headless contexts; drawing is
    /// then skipped while sampling and publishing still run.
    pub fn tick(
        &mut self,
        input: &TickInput,
        buffer: &SampleBuffer,
        painter: Option<&egui::Painter>,
        rect: Rect,
    ) -> bool {
        if self.state != LoopState::Running {
            return false;
        }

        // Input application happens-before the intensity snapshot.
        if self.tracker.source() == SignalSource::Live {
            if self.cfg.mode == InputMode::ContinuousMousemove {
                if let Some(fraction) = input.pointer_fraction {
                    self.tracker.set_pointer_fraction(fraction);
                }
            } else {
                for action in &input.pressed {
                    self.tracker.nudge(*action);
                }
            }
        }

        // Refresh the reading; publish only in live mode.
        match self.tracker.refresh(buffer) {
            Some(value) => {
                if let Some(sink) = &self.sink {
                    sink.set_intensity(value);
                }
                self.events.emit(TraceEvent::reading(value));
            }
            None => {
                self.events.emit(TraceEvent::replayed(self.tracker.read()));
            }
        }

        // Redraw last; a skipped frame retries naturally next tick.
        if let Some(painter) = painter {
            let state = self.tracker.state();
            match self.cfg.mode {
                InputMode::RanktraceNew => {
                    self.renderer.draw_ranktrace_new(
                        painter,
                        rect,
                        buffer,
                        state.current,
                        input.now_ms,
                    );
                }
                _ => {
                    self.renderer
                        .draw_ranktrace(painter, rect, buffer, state.min, state.max);
                }
            }
        }

        true
    }

    /// Honor the external pause signal. The tracker state is frozen, not
    /// reset; resuming picks up exactly where pausing left off.
    pub fn pause(&mut self) {
        if self.state == LoopState::Running {
            self.state = LoopState::Paused;
            self.events.emit(TraceEvent::kind(EventKind::PAUSE));
        }
    }

    /// Clear the pause signal. Resuming from `Stopped` is refused.
    pub fn resume(&mut self) {
        if self.state == LoopState::Paused {
            self.state = LoopState::Running;
            self.events.emit(TraceEvent::kind(EventKind::RESUME));
        }
    }

    pub fn set_paused(&mut self, paused: bool) {
        if paused {
            self.pause();
        } else {
            self.resume();
        }
    }

    /// Terminal teardown: detaches bindings and refuses further ticks.
    /// Safe to call more than once; only the first call emits STOP.
    pub fn stop(&mut self) {
        if self.state == LoopState::Stopped {
            return;
        }
        self.state = LoopState::Stopped;
        self.cfg.bindings.clear();
        self.events.emit(TraceEvent::kind(EventKind::STOP));
    }
}

impl Drop for AnimationLoop {
    fn drop(&mut self) {
        self.stop();
    }
}
