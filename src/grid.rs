use crate::{
    config::GridColors,
    context::TimelineCtx,
    engine::{GridEngine, GridRenderTarget, GridStats},
};
use egui::{Color32, Pos2, Stroke};

/// Colours used for the grid lines.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GridStyle {
    pub bar: Color32,
    pub beat: Color32,
    /// The colour of the finest subdivisions. Coarser subdivisions blend
    /// towards `beat`.
    pub common: Color32,
    pub stroke_width: f32,
}

impl Default for GridStyle {
    fn default() -> Self {
        GridColors::default().into()
    }
}

impl From<GridColors> for GridStyle {
    fn from(colors: GridColors) -> Self {
        let rgb = |[r, g, b]: [u8; 3]| Color32::from_rgb(r, g, b);
        Self {
            bar: rgb(colors.bar),
            beat: rgb(colors.beat),
            common: rgb(colors.common),
            stroke_width: 1.0,
        }
    }
}

impl GridStyle {
    /// The colour of a subdivision line at `level` out of `level_count`.
    pub fn subdivision_color(&self, level: usize, level_count: usize) -> Color32 {
        let ratio = if level_count > 1 {
            level as f32 / (level_count - 1) as f32
        } else {
            0.0
        };
        blend_color(self.beat, self.common, ratio)
    }
}

/// Linear blend between two opaque colours. `ratio` is clamped to `[0, 1]`.
pub fn blend_color(from: Color32, to: Color32, ratio: f32) -> Color32 {
    let ratio = ratio.clamp(0.0, 1.0);
    let mix = |a: u8, b: u8| (f32::from(a) + (f32::from(b) - f32::from(a)) * ratio) as u8;
    Color32::from_rgb(
        mix(from.r(), to.r()),
        mix(from.g(), to.g()),
        mix(from.b(), to.b()),
    )
}

/// Draws full-height grid lines onto an egui painter.
struct LinePainter<'a> {
    painter: &'a egui::Painter,
    timeline: &'a TimelineCtx,
    style: &'a GridStyle,
    opacity: f64,
}

impl LinePainter<'_> {
    fn line(&self, tick: i64, color: Color32) {
        let rect = self.timeline.full_rect;
        let x = self.timeline.tick_to_x(tick as f64);
        let stroke = Stroke::new(
            self.style.stroke_width,
            color.gamma_multiply(self.opacity as f32),
        );
        let a = Pos2::new(x, rect.top());
        let b = Pos2::new(x, rect.bottom());
        self.painter.line_segment([a, b], stroke);
    }
}

impl GridRenderTarget for LinePainter<'_> {
    fn opacity(&self) -> f64 {
        self.opacity
    }

    fn set_opacity(&mut self, opacity: f64) {
        self.opacity = opacity;
    }

    fn draw_bar(&mut self, tick: i64, _bar: i64) {
        self.line(tick, self.style.bar);
    }

    fn draw_beat(&mut self, tick: i64, _bar: i64, _beat: i64) {
        self.line(tick, self.style.beat);
    }

    fn draw_subdivision(&mut self, tick: i64, level: usize, level_count: usize) {
        self.line(tick, self.style.subdivision_color(level, level_count));
    }
}

/// Paints the grid over the timeline `Rect`.
///
/// If using a custom background, you may wish to call this after.
pub fn paint_grid(
    painter: &egui::Painter,
    timeline: &TimelineCtx,
    engine: &GridEngine,
    style: &GridStyle,
) -> GridStats {
    let mut lines = LinePainter {
        painter,
        timeline,
        style,
        opacity: 1.0,
    };
    engine.render_grid(
        &mut lines,
        timeline.start_tick(),
        timeline.end_tick(),
        f64::from(timeline.full_rect.width()),
    )
}
