//! Level-of-detail selection for the grid.
//!
//! A [`GridLevel`] is one rhythmic resolution that is currently worth drawing,
//! such as "every other bar" or "every sixteenth note". Levels are rebuilt on
//! every paint and always listed coarsest first.

use crate::visibility::{VISIBILITY_EPSILON, visibility};

/// Upper bound for the bar hop multiplier.
pub const MAX_BAR_HOP: i64 = 1024;

/// One rhythmic resolution of the grid.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GridLevel {
    /// Distance between two lines of this level, in ticks.
    pub step: i64,
    /// Position of this level among all candidate levels of its group, coarsest
    /// first. Pruned candidates still occupy an index.
    pub level: usize,
    /// Fade opacity in `[0, 1]`.
    pub opacity: f64,
}

/// Build the bar levels for the given spacing between consecutive bars.
///
/// When single bars are closer than `minimum_spacing`, bars are only drawn every
/// `hop` bars, `hop` being the smallest power of two that spaces them out
/// enough (capped at [`MAX_BAR_HOP`]). That level is always opaque, the finer
/// hops below it fade in as they approach `minimum_spacing`.
pub fn build_bar_levels(bar_spacing: f64, bar_ticks: i64, minimum_spacing: f64) -> Vec<GridLevel> {
    let mut base_hop = 1;
    while bar_spacing * (base_hop as f64) < minimum_spacing && base_hop < MAX_BAR_HOP {
        base_hop *= 2;
    }

    let mut levels = Vec::new();
    let mut hop = base_hop;
    let mut level = 0;
    while hop >= 1 {
        let opacity = if hop == base_hop {
            1.0
        } else {
            visibility(bar_spacing * hop as f64, minimum_spacing)
        };
        if opacity > VISIBILITY_EPSILON {
            levels.push(GridLevel {
                step: bar_ticks * hop,
                level,
                opacity,
            });
        }
        level += 1;
        hop /= 2;
    }
    levels
}

/// The beat level, or `None` when beats are too close together to be seen.
pub fn build_beat_level(
    beat_ticks: i64,
    ticks_per_pixel: f64,
    minimum_spacing: f64,
) -> Option<GridLevel> {
    let opacity = visibility(beat_ticks as f64 / ticks_per_pixel, minimum_spacing);
    (opacity > VISIBILITY_EPSILON).then_some(GridLevel {
        step: beat_ticks,
        level: 0,
        opacity,
    })
}

/// Candidate subdivision steps between one beat and the quantize resolution,
/// coarsest first.
///
/// Candidates halve the beat until they would drop below
/// `min_subdivision_ticks`. The quantize step itself is added when it evenly
/// divides the beat, so triplet-style settings still get their own level.
pub fn subdivision_candidates(beat_ticks: i64, min_subdivision_ticks: i64) -> Vec<i64> {
    let mut candidates = Vec::new();
    if beat_ticks <= 1 || min_subdivision_ticks >= beat_ticks {
        return candidates;
    }

    let mut step = beat_ticks / 2;
    while step >= min_subdivision_ticks && step >= 1 {
        candidates.push(step);
        if step == 1 {
            break;
        }
        step /= 2;
    }

    if min_subdivision_ticks > 0
        && beat_ticks % min_subdivision_ticks == 0
        && !candidates.contains(&min_subdivision_ticks)
    {
        candidates.push(min_subdivision_ticks);
    }

    candidates.sort_unstable_by(|a, b| b.cmp(a));
    candidates
}

/// Keep the subdivision candidates that are visible at the current zoom.
pub fn build_subdivision_levels(
    candidates: &[i64],
    ticks_per_pixel: f64,
    minimum_spacing: f64,
) -> Vec<GridLevel> {
    candidates
        .iter()
        .enumerate()
        .filter_map(|(level, &step)| {
            let opacity = visibility(step as f64 / ticks_per_pixel, minimum_spacing);
            (opacity > VISIBILITY_EPSILON).then_some(GridLevel {
                step,
                level,
                opacity,
            })
        })
        .collect()
}

/// Index of the coarsest level whose step divides `tick`.
pub fn level_index_for_tick(tick: i64, levels: &[GridLevel]) -> Option<usize> {
    levels
        .iter()
        .position(|level| level.step > 0 && tick % level.step == 0)
}
