//! Musical time arithmetic shared by the grid engine and its hosts.
//!
//! All positions are expressed in ticks, with a fixed resolution of
//! [`TICKS_PER_WHOLE_NOTE`] ticks per whole note.

/// The canonical tick resolution.
pub const TICKS_PER_WHOLE_NOTE: i64 = 1920;
/// Ticks in a quarter note, the unit the host's pixel scale is expressed in.
pub const TICKS_PER_QUARTER_NOTE: i64 = TICKS_PER_WHOLE_NOTE / 4;
/// Used in place of a non-positive time signature denominator.
pub const DEFAULT_DENOMINATOR: i32 = 4;
/// Used in place of a non-positive quantize setting.
pub const DEFAULT_QUANTIZE: i32 = 16;

/// The number of ticks in one beat for the given time signature denominator.
///
/// Never returns less than one tick.
pub fn ticks_per_beat(denominator: i32) -> i64 {
    let denominator = if denominator <= 0 {
        DEFAULT_DENOMINATOR
    } else {
        denominator
    };
    (TICKS_PER_WHOLE_NOTE / i64::from(denominator)).max(1)
}

/// The tick length of the finest subdivision described by `quantize`, e.g. `16`
/// for sixteenth notes.
pub fn quantize_to_ticks(quantize: i32) -> i64 {
    let quantize = if quantize <= 0 {
        DEFAULT_QUANTIZE
    } else {
        quantize
    };
    (TICKS_PER_WHOLE_NOTE / i64::from(quantize)).max(1)
}

/// The step positions snap to. With snapping turned off every tick is a valid
/// position.
pub fn quantize_step(quantize: i32, snap_off: bool) -> i64 {
    if snap_off {
        1
    } else {
        quantize_to_ticks(quantize)
    }
}

/// The largest multiple of `step` that is not greater than `tick`.
///
/// Rounds toward negative infinity, so `snap_down(-1, 480) == -480`.
pub fn snap_down(tick: i64, step: i64) -> i64 {
    if step <= 1 {
        return tick;
    }
    tick.div_euclid(step) * step
}

/// The multiple of `step` closest to `tick`. Ties resolve to the later tick.
pub fn snap_nearest(tick: i64, step: i64) -> i64 {
    if step <= 1 {
        return tick;
    }
    let lower = snap_down(tick, step);
    let upper = lower + step;
    if tick - lower < upper - tick {
        lower
    } else {
        upper
    }
}

/// Convert a tick distance into points for the given horizontal zoom.
pub fn ticks_to_points(ticks: f64, pixels_per_quarter_note: f64) -> f64 {
    if pixels_per_quarter_note <= 0.0 {
        return 0.0;
    }
    ticks * pixels_per_quarter_note / TICKS_PER_QUARTER_NOTE as f64
}

/// Convert a distance in points into ticks for the given horizontal zoom.
pub fn points_to_ticks(points: f64, pixels_per_quarter_note: f64) -> f64 {
    if pixels_per_quarter_note <= 0.0 {
        return 0.0;
    }
    points * TICKS_PER_QUARTER_NOTE as f64 / pixels_per_quarter_note
}
