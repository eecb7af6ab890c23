use crate::time;
use egui::Rect;

/// Some context for the timeline, mapping between ticks and screen positions.
#[derive(Clone, Copy, Debug)]
pub struct TimelineCtx {
    /// The total visible rect of the timeline area.
    pub full_rect: Rect,
    /// The scene tick shown at the left edge of `full_rect`.
    pub scroll_tick: f64,
    /// Shift between scene ticks and the ticks the grid is laid out in.
    pub offset: i64,
    /// Horizontal zoom.
    pub pixels_per_quarter_note: f64,
}

impl TimelineCtx {
    pub fn new(full_rect: Rect, scroll_tick: f64, pixels_per_quarter_note: f64) -> Self {
        Self {
            full_rect,
            scroll_tick,
            offset: 0,
            pixels_per_quarter_note,
        }
    }

    pub fn with_offset(mut self, offset: i64) -> Self {
        self.offset = offset;
        self
    }

    /// The number of ticks visible across the width of the timeline.
    pub fn visible_ticks(&self) -> f64 {
        time::points_to_ticks(f64::from(self.full_rect.width()), self.pixels_per_quarter_note)
    }

    /// The grid tick at the left edge.
    pub fn start_tick(&self) -> f64 {
        self.scroll_tick + self.offset as f64
    }

    /// The grid tick at the right edge.
    pub fn end_tick(&self) -> f64 {
        self.start_tick() + self.visible_ticks()
    }

    /// The x position of a grid tick.
    pub fn tick_to_x(&self, tick: f64) -> f32 {
        let ticks = tick - self.offset as f64 - self.scroll_tick;
        self.full_rect.left() + time::ticks_to_points(ticks, self.pixels_per_quarter_note) as f32
    }

    /// The grid tick under an x position.
    pub fn x_to_tick(&self, x: f32) -> f64 {
        let points = f64::from(x - self.full_rect.left());
        self.start_tick() + time::points_to_ticks(points, self.pixels_per_quarter_note)
    }
}
