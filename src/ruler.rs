use crate::{
    context::TimelineCtx,
    engine::{GridEngine, GridRenderTarget, GridStats},
    time,
};
use egui::{Align2, Color32, FontId, Pos2, Stroke};

/// Beats are only labelled once they are at least this far apart, in points.
const MIN_BEAT_LABEL_SPACING: f32 = 48.0;

/// Appearance of the musical ruler.
#[derive(Clone, Debug)]
pub struct RulerStyle {
    pub mark: Color32,
    pub text: Color32,
    pub font: FontId,
}

impl RulerStyle {
    /// Derive the ruler style from the ui's non-interactive visuals.
    pub fn from_visuals(ui: &egui::Ui) -> Self {
        let vis = ui.style().noninteractive();
        let size = ui
            .style()
            .text_styles
            .get(&egui::TextStyle::Body)
            .map(|f| f.size)
            .unwrap_or(14.0);
        Self {
            mark: vis.fg_stroke.color.linear_multiply(0.5),
            text: vis.fg_stroke.color,
            font: FontId::proportional(size * 0.75),
        }
    }
}

struct RulerPainter<'a> {
    painter: &'a egui::Painter,
    timeline: &'a TimelineCtx,
    style: &'a RulerStyle,
    beat_spacing: f32,
    opacity: f64,
}

impl RulerPainter<'_> {
    fn alpha(&self, color: Color32) -> Color32 {
        color.gamma_multiply(self.opacity as f32)
    }

    /// A mark hanging from the top of the ruler, `fraction` of its height long.
    fn mark(&self, x: f32, fraction: f32) {
        let rect = self.timeline.full_rect;
        let a = Pos2::new(x, rect.top());
        let b = Pos2::new(x, rect.top() + rect.height() * fraction);
        self.painter
            .line_segment([a, b], Stroke::new(1.0, self.alpha(self.style.mark)));
    }

    fn label(&self, x: f32, text: String) {
        let pos = Pos2::new(x + 2.0, self.timeline.full_rect.center().y);
        self.painter.text(
            pos,
            Align2::LEFT_CENTER,
            text,
            self.style.font.clone(),
            self.alpha(self.style.text),
        );
    }
}

impl GridRenderTarget for RulerPainter<'_> {
    fn opacity(&self) -> f64 {
        self.opacity
    }

    fn set_opacity(&mut self, opacity: f64) {
        self.opacity = opacity;
    }

    fn draw_bar(&mut self, tick: i64, bar: i64) {
        let x = self.timeline.tick_to_x(tick as f64);
        self.mark(x, 1.0);
        self.label(x, bar.to_string());
    }

    fn draw_beat(&mut self, tick: i64, bar: i64, beat: i64) {
        let x = self.timeline.tick_to_x(tick as f64);
        self.mark(x, 0.25);
        if self.beat_spacing >= MIN_BEAT_LABEL_SPACING {
            self.label(x, format!("{bar}.{beat}"));
        }
    }

    fn draw_subdivision(&mut self, tick: i64, level: usize, level_count: usize) {
        let x = self.timeline.tick_to_x(tick as f64);
        // Finer levels get shorter marks.
        let depth = (level + 1) as f32 / level_count.max(1) as f32;
        self.mark(x, 0.2 - 0.1 * depth);
    }
}

/// Paints bar numbers, beat labels and subdivision marks within the timeline
/// `Rect`, following the same levels as the grid.
pub fn paint_ruler(
    painter: &egui::Painter,
    timeline: &TimelineCtx,
    engine: &GridEngine,
    style: &RulerStyle,
) -> GridStats {
    let beat_ticks = engine.time_sig().ticks_per_beat() as f64;
    let beat_spacing = time::ticks_to_points(beat_ticks, timeline.pixels_per_quarter_note) as f32;
    let mut ruler = RulerPainter {
        painter,
        timeline,
        style,
        beat_spacing,
        opacity: 1.0,
    };
    engine.render_grid(
        &mut ruler,
        timeline.start_tick(),
        timeline.end_tick(),
        f64::from(timeline.full_rect.width()),
    )
}
