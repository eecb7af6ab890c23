//! egui_timegrid - An adaptive musical time grid for egui timelines.
//!
//! The [`GridEngine`] decides which bar, beat and subdivision lines are worth
//! drawing at the current zoom and fades levels in and out smoothly as lines
//! get closer together. It draws through the [`GridRenderTarget`] trait, so it
//! can be used with any canvas; the [`grid`], [`ruler`] and [`timeline`]
//! modules implement it for egui.

pub mod config;
pub mod context;
pub mod engine;
pub mod grid;
pub mod interaction;
pub mod level;
pub mod playhead;
pub mod ruler;
pub mod time;
pub mod timeline;
pub mod types;
pub mod visibility;

// Re-export public API
pub use config::{ConfigError, GridColors, GridConfig};
pub use context::TimelineCtx;
pub use engine::{GridEngine, GridRenderTarget, GridStats, OpacityScope};
pub use grid::GridStyle;
pub use level::GridLevel;
pub use playhead::Playhead;
pub use timeline::Timeline;
pub use types::TimeSig;

pub use timeline_api::TimelineApi;

/// The implementation required to instantiate a timeline widget.
mod timeline_api {
    use crate::engine::GridEngine;

    /// The implementation required to instantiate a timeline widget.
    pub trait TimelineApi {
        /// The grid configuration of this timeline.
        fn grid_engine(&self) -> &GridEngine;
        /// The scene tick at the left edge of the timeline. Never negative.
        fn scroll_tick(&self) -> f64;
        /// Shift the scroll position by the given number of ticks due to a scroll event.
        fn shift_scroll_tick(&mut self, ticks: f64);
        /// The timeline was scrolled with `Ctrl` held down to zoom in/out.
        fn zoom(&mut self, y_delta: f32);
        /// The playhead position in grid ticks.
        fn playhead_tick(&self) -> f64;
        /// The ruler was clicked or dragged at the given, already snapped, tick.
        fn set_playhead_tick(&mut self, tick: f64);
        /// Whether playback is running, which shows the playhead trail.
        fn is_playing(&self) -> bool {
            false
        }
    }
}
