use crate::context::TimelineCtx;
use egui::{Color32, Pos2, Rect, Stroke};

/// Width of the trail behind a playing playhead, in points.
pub const TRAIL_WIDTH: f32 = 15.0;
const TRAIL_STOPS: usize = 32;
const TRAIL_FADE_SECONDS: f32 = 0.3;
const TRAIL_MAX_ALPHA: f32 = 0.7;

/// Appearance of the time indicator.
#[derive(Clone, Copy, Debug)]
pub struct Playhead {
    width: f32,
    color: Option<Color32>,
}

impl Playhead {
    pub fn new() -> Self {
        Self {
            width: 1.0,
            color: None,
        }
    }

    pub fn width(mut self, width: f32) -> Self {
        self.width = width;
        self
    }

    /// Defaults to the selection stroke colour of the current visuals.
    pub fn color(mut self, color: Color32) -> Self {
        self.color = Some(color);
        self
    }
}

impl Default for Playhead {
    fn default() -> Self {
        Self::new()
    }
}

/// Alpha of the trail at `t`, running from `0` at the playhead to `1` at the far
/// end of the trail.
pub fn trail_alpha(t: f32, trail_opacity: f32) -> f32 {
    let t = t.clamp(0.0, 1.0);
    (1.0 - t).powi(2) * trail_opacity * TRAIL_MAX_ALPHA
}

fn ease_out_cubic(t: f32) -> f32 {
    1.0 - (1.0 - t).powi(3)
}

/// Paint the playhead at the grid tick `tick`, with a trail that fades in while
/// `playing`.
pub fn paint(
    ui: &egui::Ui,
    timeline: &TimelineCtx,
    tick: f64,
    playing: bool,
    playhead: Playhead,
) {
    let rect = timeline.full_rect;
    let x = timeline.tick_to_x(tick);
    let id = ui.id().with("playhead_trail");
    let trail_opacity =
        ease_out_cubic(ui.ctx().animate_bool_with_time(id, playing, TRAIL_FADE_SECONDS));
    if x < rect.left() || x > rect.right() + TRAIL_WIDTH {
        return;
    }

    let color = playhead
        .color
        .unwrap_or(ui.style().visuals.selection.stroke.color);
    let painter = ui.painter_at(rect);

    if trail_opacity > 0.0 {
        let stop_width = TRAIL_WIDTH / TRAIL_STOPS as f32;
        for i in 0..TRAIL_STOPS {
            let t = (i as f32 + 0.5) / TRAIL_STOPS as f32;
            let right = x - i as f32 * stop_width;
            let stop = Rect::from_min_max(
                Pos2::new(right - stop_width, rect.top()),
                Pos2::new(right, rect.bottom()),
            );
            painter.rect_filled(stop, 0.0, color.gamma_multiply(trail_alpha(t, trail_opacity)));
        }
    }

    let a = Pos2::new(x, rect.top());
    let b = Pos2::new(x, rect.bottom());
    painter.line_segment([a, b], Stroke::new(playhead.width, color));
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn trail_fades_towards_its_end() {
        assert!((trail_alpha(0.0, 1.0) - TRAIL_MAX_ALPHA).abs() < 1e-6);
        assert_eq!(trail_alpha(1.0, 1.0), 0.0);
        assert!(trail_alpha(0.25, 1.0) > trail_alpha(0.5, 1.0));
        assert_eq!(trail_alpha(0.3, 0.0), 0.0);
    }
}
