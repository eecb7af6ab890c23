/// Fraction of the minimum spacing at which a level starts fading in.
pub const FADE_IN_START_RATIO: f64 = 0.6;
/// Fraction of the minimum spacing at which a level becomes fully opaque.
pub const FADE_IN_END_RATIO: f64 = 1.0;
/// Levels at or below this opacity are not drawn at all.
pub const VISIBILITY_EPSILON: f64 = 0.001;

pub(crate) fn clamp01(value: f64) -> f64 {
    if value.is_nan() {
        return 0.0;
    }
    value.clamp(0.0, 1.0)
}

/// Cubic smoothstep, `t² (3 − 2t)` over `t` clamped to `[0, 1]`.
pub fn smooth_step(t: f64) -> f64 {
    let t = clamp01(t);
    t * t * (3.0 - 2.0 * t)
}

/// The opacity of grid lines drawn `spacing` points apart.
///
/// Lines closer than 60% of `minimum_spacing` are hidden, lines at least
/// `minimum_spacing` apart are fully opaque, and the range in between fades
/// with [`smooth_step`]. A non-positive `minimum_spacing` disables the fade.
pub fn visibility(spacing: f64, minimum_spacing: f64) -> f64 {
    if minimum_spacing <= 0.0 {
        return 1.0;
    }
    let start = minimum_spacing * FADE_IN_START_RATIO;
    let end = minimum_spacing * FADE_IN_END_RATIO;
    if spacing <= start {
        return 0.0;
    }
    if spacing >= end {
        return 1.0;
    }
    smooth_step((spacing - start) / (end - start))
}
