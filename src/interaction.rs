use crate::{context::TimelineCtx, time};

/// Handle scroll and zoom interactions for the timeline.
///
/// Horizontal scrolling moves the view, scrolling with `Ctrl` held zooms.
pub fn handle_scroll_and_zoom(
    ui: &mut egui::Ui,
    timeline_rect: egui::Rect,
    timeline_api: &mut dyn crate::TimelineApi,
) {
    if !ui.rect_contains_pointer(timeline_rect) {
        return;
    }
    let ctrl_pressed = ui.input(|i| i.modifiers.ctrl);
    let smooth_delta = ui.input(|i| i.smooth_scroll_delta);
    let raw_delta = ui.input(|i| i.raw_scroll_delta);
    // Zooming reacts to the raw delta, scrolling prefers the smoothed one.
    let delta = match (ctrl_pressed, raw_delta != egui::Vec2::ZERO) {
        (true, true) => raw_delta,
        (true, false) => smooth_delta,
        (false, _) if smooth_delta != egui::Vec2::ZERO => smooth_delta,
        (false, _) => raw_delta,
    };
    if ctrl_pressed {
        if delta.x != 0.0 || delta.y != 0.0 {
            timeline_api.zoom(delta.y - delta.x);
        }
    } else if delta.x != 0.0 {
        let ppq = timeline_api.grid_engine().pixels_per_quarter_note();
        let shift = -time::points_to_ticks(f64::from(delta.x), ppq);
        let current = timeline_api.scroll_tick();
        let actual_shift = (current + shift).max(0.0) - current;
        if actual_shift != 0.0 {
            timeline_api.shift_scroll_tick(actual_shift);
        }
    }
}

/// Move the playhead to the snapped tick under the pointer while the ruler is
/// clicked or dragged.
pub fn handle_ruler_click(
    response: &egui::Response,
    ruler: &TimelineCtx,
    timeline_api: &mut dyn crate::TimelineApi,
) -> bool {
    if !(response.clicked() || response.dragged()) {
        return false;
    }
    let Some(pos) = response.interact_pointer_pos() else {
        return false;
    };
    let tick = ruler.x_to_tick(pos.x).max(0.0).round() as i64;
    let snapped = timeline_api.grid_engine().snap_tick(tick).max(0);
    timeline_api.set_playhead_tick(snapped as f64);
    true
}
