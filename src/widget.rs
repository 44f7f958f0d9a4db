//! egui widget glue and the standalone native runner.
//!
//! [`RankTraceWidget`] ties one [`AnimationLoop`] to an egui `Ui`: it
//! gathers the frame's input into a [`TickInput`], allocates the canvas,
//! runs the tick and keeps the repaint chain going while the loop runs.

use eframe::egui;

use crate::animation::{AnimationLoop, TickInput};
use crate::buffer::SharedSampleBuffer;
use crate::config::{InputConfig, InputMode};
use crate::controllers::PlaybackController;
use crate::events::EventController;
use crate::sink::IntensitySink;
use crate::tracker::SignalSource;

pub struct RankTraceWidget {
    animation: AnimationLoop,
    buffer: SharedSampleBuffer,
    playback: Option<PlaybackController>,
}

impl RankTraceWidget {
    pub fn new(
        cfg: &InputConfig,
        source: SignalSource,
        buffer: SharedSampleBuffer,
        sink: Option<IntensitySink>,
    ) -> Self {
        Self {
            animation: AnimationLoop::from_config(cfg, source, sink),
            buffer,
            playback: None,
        }
    }

    /// Attach an external pause/resume signal, polled once per frame.
    pub fn with_playback(mut self, controller: PlaybackController) -> Self {
        self.playback = Some(controller);
        self
    }

    pub fn animation(&self) -> &AnimationLoop {
        &self.animation
    }

    pub fn animation_mut(&mut self) -> &mut AnimationLoop {
        &mut self.animation
    }

    pub fn events(&self) -> EventController {
        self.animation.events()
    }

    pub fn set_paused(&mut self, paused: bool) {
        self.animation.set_paused(paused);
    }

    /// Tear the loop down. Subsequent `show` calls draw nothing and
    /// schedule nothing.
    pub fn stop(&mut self) {
        self.animation.stop();
    }

    /// Render one frame into `ui`, filling the available space. Requests
    /// a repaint while the loop wants frames.
    pub fn show(&mut self, ui: &mut egui::Ui) -> egui::Response {
        if let Some(playback) = &self.playback {
            let paused = playback.is_paused();
            self.animation.set_paused(paused);
        }

        let (response, painter) =
            ui.allocate_painter(ui.available_size(), egui::Sense::hover());
        let rect = response.rect;

        let mut input = TickInput {
            now_ms: ui.input(|i| i.time) * 1000.0,
            pressed: Vec::new(),
            pointer_fraction: None,
        };
        for (action, key) in self.animation.bindings() {
            if ui.input(|i| i.key_pressed(*key)) {
                input.pressed.push(*action);
            }
        }
        if self.animation.mode() == InputMode::ContinuousMousemove && rect.height() > 0.0 {
            if let Some(pos) = ui.input(|i| i.pointer.hover_pos()) {
                input.pointer_fraction = Some(((rect.bottom() - pos.y) / rect.height()) as f64);
            }
        }

        let animation = &mut self.animation;
        let wants_frame = self
            .buffer
            .with(|buffer| animation.tick(&input, buffer, Some(&painter), rect));

        // key-hint overlay in the canvas corner
        let hints = crate::input::binding_hints(self.animation.bindings());
        if !hints.is_empty() {
            painter.text(
                rect.left_bottom() + egui::vec2(6.0, -6.0),
                egui::Align2::LEFT_BOTTOM,
                hints,
                egui::FontId::proportional(12.0),
                egui::Color32::from_gray(160),
            );
        }

        if wants_frame {
            ui.ctx().request_repaint();
        }
        response
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Standalone runner
// ─────────────────────────────────────────────────────────────────────────────

struct RankTraceApp {
    widget: RankTraceWidget,
}

impl eframe::App for RankTraceApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        egui::CentralPanel::default().show(ctx, |ui| {
            self.widget.show(ui);
        });
    }
}

/// Launch the widget in a native window. Blocks until the window closes.
pub fn run_ranktrace(
    cfg: InputConfig,
    source: SignalSource,
    buffer: SharedSampleBuffer,
    sink: Option<IntensitySink>,
) -> eframe::Result<()> {
    run_ranktrace_with(cfg, source, buffer, sink, None)
}

/// Like [`run_ranktrace`], with an external pause/resume controller.
pub fn run_ranktrace_with(
    cfg: InputConfig,
    source: SignalSource,
    buffer: SharedSampleBuffer,
    sink: Option<IntensitySink>,
    playback: Option<PlaybackController>,
) -> eframe::Result<()> {
    let mut widget = RankTraceWidget::new(&cfg, source, buffer, sink);
    if let Some(playback) = playback {
        widget = widget.with_playback(playback);
    }

    let opts = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default().with_inner_size(egui::vec2(900.0, 220.0)),
        ..Default::default()
    };
    eframe::run_native(
        "ranktrace",
        opts,
        Box::new(|_cc| Ok(Box::new(RankTraceApp { widget }))),
    )
}
