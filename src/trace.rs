//! Trace rendering: converts a window of buffer samples into screen-space
//! points and draws a smoothed curve with a cursor marker.
//!
//! Geometry helpers are pure functions; the stateful parts (redraw gate,
//! re-centering band) live on [`TraceRenderer`]. A frame with malformed
//! geometry (empty buffer, empty trace) is skipped, never an error — the
//! next frame retries.

use eframe::egui::epaint::{CubicBezierShape, QuadraticBezierShape};
use eframe::egui::{self, Color32, CornerRadius, Pos2, Rect, Stroke};

use crate::buffer::SampleBuffer;
use crate::config::TraceLook;

/// Horizontal inset of the first drawn point.
const LEFT_PAD: f32 = 20.0;
/// Horizontal space not used by the curve (left pad + cursor margin).
const X_RESERVE: f32 = 50.0;
/// Vertical inset of the extremes.
const Y_PAD: f32 = 20.0;
/// Vertical space not used by the curve.
const Y_RESERVE: f32 = 40.0;
/// Height in value units of the re-centering band.
const BAND_SPAN: f64 = 10.0;

/// Position of `value` inside the `[min, max]` envelope, in `[0, 1]`.
/// NaN when the envelope is degenerate (`max == min`).
pub fn norm(value: f64, max: f64, min: f64) -> f64 {
    (value - min) / (max - min)
}

/// Vertical canvas position for a value under the envelope, inverted so
/// larger values sit higher. A degenerate envelope maps everything to
/// the vertical midline.
pub fn norm_pos_y(value: f64, max: f64, min: f64, canvas_h: f32) -> f32 {
    let span = (canvas_h - Y_RESERVE) as f64;
    let pos = (norm(value, max, min) * span - span).abs() + Y_PAD as f64;
    if pos.is_nan() {
        canvas_h / 2.0
    } else {
        pos as f32
    }
}

/// Horizontal canvas position for a sample index, spreading `length`
/// samples over the drawable width.
pub fn norm_pos_x(index: usize, length: usize, canvas_w: f32) -> f32 {
    index as f32 * ((canvas_w - X_RESERVE) / length as f32) + LEFT_PAD
}

/// Build the screen-space polyline for the envelope-normalized variant.
///
/// Snapshots `head` once; index 0 is a sentinel slot and never drawn.
/// Returns an empty vec when the buffer is empty.
pub fn build_norm_trace(buffer: &SampleBuffer, min: f64, max: f64, rect: Rect) -> Vec<Pos2> {
    let length = buffer.head();
    if length == 0 {
        return Vec::new();
    }
    buffer
        .iter_range(0, 0, length)
        .filter(|(index, _)| *index != 0)
        .map(|(index, value)| {
            Pos2::new(
                rect.left() + norm_pos_x(index, length, rect.width()),
                rect.top() + norm_pos_y(value, max, min, rect.height()),
            )
        })
        .collect()
}

/// Stroke a polyline smoothed with quadratic segments: each point is the
/// control point of a curve ending at the midpoint to its successor, and
/// the final two points are drawn as one explicit curve.
fn stroke_smoothed(painter: &egui::Painter, points: &[Pos2], stroke: Stroke) {
    if points.len() < 3 {
        if let [a, b] = points {
            painter.line_segment([*a, *b], stroke);
        }
        return;
    }
    let mut from = points[0];
    for i in 1..points.len() - 2 {
        let mid = points[i].lerp(points[i + 1], 0.5);
        painter.add(QuadraticBezierShape::from_points_stroke(
            [from, points[i], mid],
            false,
            Color32::TRANSPARENT,
            stroke,
        ));
        from = mid;
    }
    let n = points.len();
    painter.add(QuadraticBezierShape::from_points_stroke(
        [from, points[n - 2], points[n - 1]],
        false,
        Color32::TRANSPARENT,
        stroke,
    ));
}

/// Stroke a bezier spline through `points`. `f` scales the tangent
/// length (0 yields straight segments), `t` damps its vertical
/// component. Non-finite tangents (vertical neighbor gradients) fall
/// back to straight joins.
pub fn bz_curve(painter: &egui::Painter, points: &[Pos2], f: f32, t: f32, stroke: Stroke) {
    if points.len() < 2 {
        return;
    }
    let mut dx1 = 0.0_f32;
    let mut dy1 = 0.0_f32;
    let mut prev = points[0];
    for i in 1..points.len() {
        let cur = points[i];
        let (dx2, dy2) = match points.get(i + 1) {
            Some(next) => {
                let gradient = (next.y - prev.y) / (next.x - prev.x);
                let dx2 = (next.x - cur.x) * -f;
                let mut dy2 = dx2 * gradient * t;
                if !dy2.is_finite() {
                    dy2 = 0.0;
                }
                (dx2, dy2)
            }
            None => (0.0, 0.0),
        };
        painter.add(CubicBezierShape::from_points_stroke(
            [
                prev,
                Pos2::new(prev.x - dx1, prev.y - dy1),
                Pos2::new(cur.x + dx2, cur.y + dy2),
                cur,
            ],
            false,
            Color32::TRANSPARENT,
            stroke,
        ));
        dx1 = dx2;
        dy1 = dy2;
        prev = cur;
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// TraceRenderer
// ─────────────────────────────────────────────────────────────────────────────

/// Per-widget drawing state.
pub struct TraceRenderer {
    look: TraceLook,
    graph_update_period_ms: f64,
    /// Deadline (ms) of the next gated curve rebuild.
    next_graph_node_ms: f64,
    /// Vertical offset applied the last time the band shifted, kept so
    /// the curve stays continuous across shifts.
    last_modifier: f64,
    band_max: f64,
    band_min: f64,
    /// Curve of the gated variant, kept between rebuilds so frames
    /// inside the update period still paint it.
    band_points: Vec<Pos2>,
}

impl TraceRenderer {
    pub fn new(look: TraceLook, graph_update_period_ms: u64) -> Self {
        Self {
            look,
            graph_update_period_ms: graph_update_period_ms as f64,
            next_graph_node_ms: 0.0,
            last_modifier: 0.0,
            band_max: BAND_SPAN / 2.0,
            band_min: -BAND_SPAN / 2.0,
            band_points: Vec::new(),
        }
    }

    pub fn look(&self) -> &TraceLook {
        &self.look
    }

    /// Trailing re-centering band: when `current` leaves the 10-unit
    /// band, shift the band so `current` sits half a span from its new
    /// edge, and remember the offset for subsequent frames. Returns the
    /// vertical offset to subtract from sample values.
    pub fn band_modifier(&mut self, current: f64) -> f64 {
        if current > self.band_max {
            self.last_modifier = current - BAND_SPAN / 2.0;
            self.band_max = current;
            self.band_min = current - BAND_SPAN;
        } else if current < self.band_min {
            self.last_modifier = current + BAND_SPAN / 2.0;
            self.band_min = current;
            self.band_max = current + BAND_SPAN;
        }
        self.last_modifier
    }

    fn stroke(&self) -> Stroke {
        Stroke::new(self.look.line_width, self.look.stroke)
    }

    /// Classic variant: envelope-normalized curve, redrawn every frame.
    pub fn draw_ranktrace(
        &self,
        painter: &egui::Painter,
        rect: Rect,
        buffer: &SampleBuffer,
        min: f64,
        max: f64,
    ) {
        painter.rect_filled(rect, CornerRadius::ZERO, self.look.background);
        let points = build_norm_trace(buffer, min, max, rect);
        if points.is_empty() {
            return;
        }
        let stroke = self.stroke();
        stroke_smoothed(painter, &points, stroke);
        if let Some(last) = points.last() {
            painter.circle_stroke(*last, self.look.cursor_radius, stroke);
        }
    }

    /// Rebuild the band-normalized curve when the update period has
    /// elapsed; inside the period the cached curve is left untouched.
    /// Returns whether this call rebuilt it.
    pub fn rebuild_band_trace(
        &mut self,
        buffer: &SampleBuffer,
        rect: Rect,
        current: f64,
        now_ms: f64,
    ) -> bool {
        if now_ms < self.next_graph_node_ms {
            return false;
        }
        self.next_graph_node_ms = now_ms + self.graph_update_period_ms;

        let length = buffer.head();
        if length == 0 {
            self.band_points.clear();
            return true;
        }

        let mid_y = rect.top() + rect.height() / 2.0;
        // pixels per value unit of the band
        let unit = ((rect.height() - Y_RESERVE) / BAND_SPAN as f32) as f64;
        let modifier = self.band_modifier(current);

        self.band_points = buffer
            .iter_range(0, 0, length)
            .filter(|(index, _)| *index != 0)
            .map(|(index, value)| {
                Pos2::new(
                    rect.left() + norm_pos_x(index, length, rect.width()),
                    mid_y - ((value - modifier) * unit) as f32,
                )
            })
            .collect();
        true
    }

    /// The cached curve of the gated variant.
    pub fn band_points(&self) -> &[Pos2] {
        &self.band_points
    }

    /// Band variant: the curve is rebuilt at most every
    /// `graph_update_period_ms` and normalized against the trailing band
    /// instead of the envelope; the background, the cached curve and the
    /// cursor repaint every frame regardless (an immediate-mode canvas
    /// retains nothing between frames). Returns whether this tick
    /// rebuilt the curve.
    pub fn draw_ranktrace_new(
        &mut self,
        painter: &egui::Painter,
        rect: Rect,
        buffer: &SampleBuffer,
        current: f64,
        now_ms: f64,
    ) -> bool {
        let rebuilt = self.rebuild_band_trace(buffer, rect, current, now_ms);

        painter.rect_filled(rect, CornerRadius::ZERO, self.look.background);
        if self.band_points.is_empty() {
            return rebuilt;
        }
        let stroke = self.stroke();
        let (f, t) = self.look.smoothing;
        bz_curve(painter, &self.band_points, f, t, stroke);
        if let Some(last) = self.band_points.last() {
            painter.circle_stroke(*last, self.look.cursor_radius, stroke);
        }
        rebuilt
    }
}
