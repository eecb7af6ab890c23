//! The grid traversal: decides which ticks get a line and dispatches them to a
//! [`GridRenderTarget`].

use crate::{
    level::{self, GridLevel},
    time,
    types::{DEFAULT_PIXELS_PER_QUARTER_NOTE, MIN_LINE_SPACING, TimeSig},
    visibility::clamp01,
};
use std::ops::{Deref, DerefMut};

/// The drawing surface the engine renders into.
///
/// Ticks are passed as-is; mapping them onto the screen is up to the
/// implementation.
pub trait GridRenderTarget {
    /// The current opacity multiplier applied to everything drawn.
    fn opacity(&self) -> f64;
    fn set_opacity(&mut self, opacity: f64);
    /// Draw the line at the start of the 1-based `bar`.
    fn draw_bar(&mut self, tick: i64, bar: i64);
    /// Draw the line for the 1-based `beat` within the 1-based `bar`.
    fn draw_beat(&mut self, tick: i64, bar: i64, beat: i64);
    /// Draw a subdivision line. `level` runs from `0` (closest to a beat) to
    /// `level_count - 1` (the quantize resolution).
    fn draw_subdivision(&mut self, tick: i64, level: usize, level_count: usize);
}

/// Multiplies the target's opacity for as long as the scope is alive.
///
/// The previous opacity is restored when the scope is dropped.
pub struct OpacityScope<'a, T: GridRenderTarget + ?Sized> {
    target: &'a mut T,
    previous: f64,
}

impl<'a, T: GridRenderTarget + ?Sized> OpacityScope<'a, T> {
    pub fn new(target: &'a mut T, opacity: f64) -> Self {
        let previous = target.opacity();
        target.set_opacity(previous * clamp01(opacity));
        Self { target, previous }
    }
}

impl<T: GridRenderTarget + ?Sized> Deref for OpacityScope<'_, T> {
    type Target = T;

    fn deref(&self) -> &T {
        self.target
    }
}

impl<T: GridRenderTarget + ?Sized> DerefMut for OpacityScope<'_, T> {
    fn deref_mut(&mut self) -> &mut T {
        self.target
    }
}

impl<T: GridRenderTarget + ?Sized> Drop for OpacityScope<'_, T> {
    fn drop(&mut self) {
        self.target.set_opacity(self.previous);
    }
}

/// Run `draw` with the target's opacity scaled by `opacity`. Fully
/// transparent lines are skipped.
fn draw_with_opacity<T: GridRenderTarget + ?Sized>(
    target: &mut T,
    opacity: f64,
    draw: impl FnOnce(&mut T),
) -> bool {
    if clamp01(opacity) <= 0.0 {
        return false;
    }
    let mut scope = OpacityScope::new(target, opacity);
    draw(&mut *scope);
    true
}

/// Number of draw calls issued by one [`GridEngine::render_grid`].
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct GridStats {
    pub bars: usize,
    pub beats: usize,
    pub subdivisions: usize,
}

impl GridStats {
    pub fn total(&self) -> usize {
        self.bars + self.beats + self.subdivisions
    }
}

/// Decides which grid lines are visible for the current view.
///
/// Holds the configuration of one timeline view. Rendering never mutates the
/// engine.
#[derive(Clone, Debug, PartialEq)]
pub struct GridEngine {
    time_sig: TimeSig,
    quantize: i32,
    minimum_spacing: f64,
    pixels_per_quarter_note: f64,
    no_snap: bool,
}

impl Default for GridEngine {
    fn default() -> Self {
        Self {
            time_sig: TimeSig::default(),
            quantize: time::DEFAULT_QUANTIZE,
            minimum_spacing: MIN_LINE_SPACING,
            pixels_per_quarter_note: DEFAULT_PIXELS_PER_QUARTER_NOTE,
            no_snap: false,
        }
    }
}

impl GridEngine {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn time_sig(&self) -> TimeSig {
        self.time_sig
    }

    pub fn set_time_signature(&mut self, numerator: i32, denominator: i32) {
        if numerator < 1 || denominator < 1 {
            log::debug!("clamping time signature {numerator}/{denominator}");
        }
        self.time_sig = TimeSig::new(numerator, denominator);
    }

    pub fn denominator(&self) -> i32 {
        self.time_sig.denominator()
    }

    pub fn quantize(&self) -> i32 {
        self.quantize
    }

    pub fn set_quantize(&mut self, quantize: i32) {
        if quantize < 1 {
            log::debug!("clamping quantize {quantize}");
        }
        self.quantize = quantize.max(1);
    }

    pub fn minimum_spacing(&self) -> f64 {
        self.minimum_spacing
    }

    /// Minimum gap in points between lines of one level before it fades out.
    /// Zero disables fading.
    pub fn set_minimum_spacing(&mut self, spacing: f64) {
        self.minimum_spacing = if spacing.is_finite() { spacing.max(0.0) } else { 0.0 };
    }

    pub fn pixels_per_quarter_note(&self) -> f64 {
        self.pixels_per_quarter_note
    }

    pub fn set_pixels_per_quarter_note(&mut self, px: f64) {
        if px.is_finite() && px > 0.0 {
            self.pixels_per_quarter_note = px;
        } else {
            log::debug!("ignoring invalid zoom of {px} points per quarter note");
        }
    }

    pub fn is_no_snap_mode(&self) -> bool {
        self.no_snap
    }

    pub fn set_no_snap_mode(&mut self, enabled: bool) {
        self.no_snap = enabled;
    }

    /// The step positions snap to under the current settings.
    pub fn snap_step(&self) -> i64 {
        time::quantize_step(self.quantize, self.no_snap)
    }

    /// Snap `tick` to the nearest quantize position.
    pub fn snap_tick(&self, tick: i64) -> i64 {
        time::snap_nearest(tick, self.snap_step())
    }

    /// Draw the grid for the ticks `start_tick..=end_tick` spread over
    /// `rect_width` points.
    ///
    /// Bars are drawn first, then beats that are not bars, then subdivisions
    /// that are neither. Degenerate views draw nothing.
    pub fn render_grid<T: GridRenderTarget + ?Sized>(
        &self,
        target: &mut T,
        start_tick: f64,
        end_tick: f64,
        rect_width: f64,
    ) -> GridStats {
        let mut stats = GridStats::default();
        if !start_tick.is_finite() || !end_tick.is_finite() || !rect_width.is_finite() {
            return stats;
        }
        if rect_width <= 0.0 || end_tick <= start_tick {
            return stats;
        }
        let ticks_per_pixel = (end_tick - start_tick) / rect_width;
        if ticks_per_pixel <= 0.0 {
            return stats;
        }

        let beat_ticks = self.time_sig.ticks_per_beat();
        let bar_ticks = self.time_sig.ticks_per_bar();
        let first_tick = start_tick.floor() as i64;

        let bar_levels = level::build_bar_levels(
            bar_ticks as f64 / ticks_per_pixel,
            bar_ticks,
            self.minimum_spacing,
        );
        if let Some(draw_step) = finest_step(&bar_levels) {
            for tick in grid_ticks(first_tick, end_tick, draw_step) {
                let Some(index) = level::level_index_for_tick(tick, &bar_levels) else {
                    continue;
                };
                let bar = tick.div_euclid(bar_ticks) + 1;
                if draw_with_opacity(&mut *target, bar_levels[index].opacity, |t| {
                    t.draw_bar(tick, bar)
                }) {
                    stats.bars += 1;
                }
            }
        }

        if let Some(beat_level) =
            level::build_beat_level(beat_ticks, ticks_per_pixel, self.minimum_spacing)
        {
            for tick in grid_ticks(first_tick, end_tick, beat_level.step) {
                if tick % bar_ticks == 0 {
                    continue;
                }
                let bar = tick.div_euclid(bar_ticks) + 1;
                let beat = tick.rem_euclid(bar_ticks) / beat_ticks + 1;
                if draw_with_opacity(&mut *target, beat_level.opacity, |t| {
                    t.draw_beat(tick, bar, beat)
                }) {
                    stats.beats += 1;
                }
            }
        }

        let candidates = level::subdivision_candidates(
            beat_ticks,
            time::quantize_to_ticks(self.quantize),
        );
        let level_count = candidates.len();
        let subdivision_levels =
            level::build_subdivision_levels(&candidates, ticks_per_pixel, self.minimum_spacing);
        if let Some(draw_step) = finest_step(&subdivision_levels) {
            for tick in grid_ticks(first_tick, end_tick, draw_step) {
                if tick % bar_ticks == 0 || tick % beat_ticks == 0 {
                    continue;
                }
                let Some(index) = level::level_index_for_tick(tick, &subdivision_levels) else {
                    continue;
                };
                let line = subdivision_levels[index];
                if draw_with_opacity(&mut *target, line.opacity, |t| {
                    t.draw_subdivision(tick, line.level, level_count)
                }) {
                    stats.subdivisions += 1;
                }
            }
        }

        log::trace!(
            "grid {start_tick:.1}..{end_tick:.1} at {ticks_per_pixel:.3} ticks/pt: {stats:?}"
        );
        stats
    }
}

fn finest_step(levels: &[GridLevel]) -> Option<i64> {
    levels.last().map(|level| level.step).filter(|&step| step > 0)
}

/// Multiples of `step` from the last one at or before `start` up to `end`.
fn grid_ticks(start: i64, end: f64, step: i64) -> impl Iterator<Item = i64> {
    let first = time::snap_down(start, step);
    std::iter::successors(Some(first), move |&tick| tick.checked_add(step))
        .take_while(move |&tick| (tick as f64) <= end)
}
