use crate::time;

/// Default minimum gap between two grid lines of the same level, in points.
pub const MIN_LINE_SPACING: f64 = 24.0;

/// Default horizontal zoom, in points per quarter note.
pub const DEFAULT_PIXELS_PER_QUARTER_NOTE: f64 = 64.0;

/// Represents a musical time signature.
///
/// Both fields are at least one; [`TimeSig::new`] clamps anything smaller.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub struct TimeSig {
    numerator: i32,
    denominator: i32,
}

impl TimeSig {
    pub fn new(numerator: i32, denominator: i32) -> Self {
        Self {
            numerator: numerator.max(1),
            denominator: denominator.max(1),
        }
    }

    pub fn numerator(&self) -> i32 {
        self.numerator
    }

    pub fn denominator(&self) -> i32 {
        self.denominator
    }

    /// The number of ticks in one beat of this time signature.
    pub fn ticks_per_beat(&self) -> i64 {
        time::ticks_per_beat(self.denominator)
    }

    /// The number of ticks in one bar. Always a whole number of beats.
    pub fn ticks_per_bar(&self) -> i64 {
        i64::from(self.numerator) * self.ticks_per_beat()
    }
}

impl Default for TimeSig {
    fn default() -> Self {
        Self::new(4, 4)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clamps_fields() {
        let sig = TimeSig::new(0, -8);
        assert_eq!((sig.numerator(), sig.denominator()), (1, 1));
        assert_eq!(sig.ticks_per_beat(), 1920);
    }

    #[test]
    fn bar_lengths() {
        assert_eq!(TimeSig::default().ticks_per_bar(), 1920);
        assert_eq!(TimeSig::new(3, 4).ticks_per_bar(), 1440);
        assert_eq!(TimeSig::new(6, 8).ticks_per_bar(), 1440);
        assert_eq!(TimeSig::new(7, 8).ticks_per_beat(), 240);
    }
}
