use crate::{
    context::TimelineCtx,
    grid::{self, GridStyle},
    interaction,
    playhead::{self, Playhead},
    ruler::{self, RulerStyle},
};

/// The top-level timeline widget: a musical ruler above an adaptive grid, with
/// a playhead drawn across both.
pub struct Timeline {
    ruler_height: f32,
    offset: i64,
    style: GridStyle,
    playhead: Playhead,
}

impl Timeline {
    /// Begin building the timeline widget.
    pub fn new() -> Self {
        Self {
            ruler_height: 20.0,
            offset: 0,
            style: GridStyle::default(),
            playhead: Playhead::new(),
        }
    }

    pub fn ruler_height(mut self, height: f32) -> Self {
        self.ruler_height = height;
        self
    }

    /// Shift the grid by `offset` ticks relative to the scroll position.
    pub fn offset(mut self, offset: i64) -> Self {
        self.offset = offset;
        self
    }

    pub fn style(mut self, style: GridStyle) -> Self {
        self.style = style;
        self
    }

    pub fn playhead(mut self, playhead: Playhead) -> Self {
        self.playhead = playhead;
        self
    }

    /// Show the timeline within the currently available rect.
    pub fn show(self, ui: &mut egui::Ui, timeline: &mut dyn crate::TimelineApi) -> egui::Response {
        let full_rect = ui.available_rect_before_wrap();
        let mut ruler_rect = full_rect;
        ruler_rect.set_height(self.ruler_height.min(full_rect.height()));
        let mut grid_rect = full_rect;
        grid_rect.min.y = ruler_rect.max.y;

        let ruler_id = ui.id().with("timegrid_ruler");
        let ruler_response = ui.interact(ruler_rect, ruler_id, egui::Sense::click_and_drag());
        let response = ui.allocate_rect(full_rect, egui::Sense::hover());

        interaction::handle_scroll_and_zoom(ui, full_rect, timeline);

        let ppq = timeline.grid_engine().pixels_per_quarter_note();
        let scroll_tick = timeline.scroll_tick();
        let ruler_ctx = TimelineCtx::new(ruler_rect, scroll_tick, ppq).with_offset(self.offset);
        let grid_ctx = TimelineCtx::new(grid_rect, scroll_tick, ppq).with_offset(self.offset);

        if interaction::handle_ruler_click(&ruler_response, &ruler_ctx, timeline) {
            ui.ctx().request_repaint();
        }

        let vis = ui.style().noninteractive();
        let bg_stroke = egui::Stroke {
            width: 0.0,
            ..vis.bg_stroke
        };
        let separator = vis.bg_stroke;
        ui.painter().rect(full_rect, 0.0, vis.bg_fill, bg_stroke);

        let engine = timeline.grid_engine();
        grid::paint_grid(&ui.painter_at(grid_rect), &grid_ctx, engine, &self.style);
        let ruler_style = RulerStyle::from_visuals(ui);
        ruler::paint_ruler(&ui.painter_at(ruler_rect), &ruler_ctx, engine, &ruler_style);

        // Line marking the end of the ruler.
        let a = ruler_rect.left_bottom();
        let b = ruler_rect.right_bottom();
        ui.painter().line_segment([a, b], separator);

        let full_ctx = TimelineCtx::new(full_rect, scroll_tick, ppq).with_offset(self.offset);
        playhead::paint(
            ui,
            &full_ctx,
            timeline.playhead_tick(),
            timeline.is_playing(),
            self.playhead,
        );

        response
    }
}

impl Default for Timeline {
    fn default() -> Self {
        Self::new()
    }
}
