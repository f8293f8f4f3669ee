//! Min/max date bounds and candidate-date clamping
//!
//! Out-of-bounds navigation is never rejected: a candidate beyond the bounds
//! resolves to the nearest bound instead, so rapid key-repeat at the edge of
//! the window settles on the boundary date rather than silently dying.

use crate::date_math::CalendarDate;

/// Optional lower and upper bounds on selectable/displayable dates.
///
/// If both are set the caller must keep `min <= max`; a violated contract is
/// not validated here beyond the deterministic min-first clamp order.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DateBounds {
    pub min: Option<CalendarDate>,
    pub max: Option<CalendarDate>,
}

impl DateBounds {
    pub fn new(min: Option<CalendarDate>, max: Option<CalendarDate>) -> Self {
        DateBounds { min, max }
    }

    /// Clamp `date` into the bounds. Min is checked first so degenerate
    /// configurations still clamp deterministically.
    pub fn clamp(&self, date: CalendarDate) -> CalendarDate {
        if let Some(min) = self.min {
            if date < min {
                return min;
            }
        }
        if let Some(max) = self.max {
            if date > max {
                return max;
            }
        }
        date
    }

    /// Whether `date` lies within the bounds without clamping.
    pub fn contains(&self, date: CalendarDate) -> bool {
        self.clamp(date) == date
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn d(y: i32, m: u32, day: u32) -> CalendarDate {
        CalendarDate::from_ymd(y, m, day).unwrap()
    }

    #[test]
    fn test_clamp_unbounded_returns_date_unchanged() {
        let bounds = DateBounds::default();
        assert_eq!(bounds.clamp(d(2024, 6, 15)), d(2024, 6, 15));
    }

    #[test]
    fn test_clamp_below_min() {
        let bounds = DateBounds::new(Some(d(2024, 3, 1)), Some(d(2024, 5, 31)));
        assert_eq!(bounds.clamp(d(2024, 2, 29)), d(2024, 3, 1));
    }

    #[test]
    fn test_clamp_above_max() {
        let bounds = DateBounds::new(Some(d(2024, 3, 1)), Some(d(2024, 5, 31)));
        assert_eq!(bounds.clamp(d(2024, 6, 1)), d(2024, 5, 31));
    }

    #[test]
    fn test_clamp_inside_bounds() {
        let bounds = DateBounds::new(Some(d(2024, 3, 1)), Some(d(2024, 5, 31)));
        assert_eq!(bounds.clamp(d(2024, 4, 10)), d(2024, 4, 10));
        assert_eq!(bounds.clamp(d(2024, 3, 1)), d(2024, 3, 1));
        assert_eq!(bounds.clamp(d(2024, 5, 31)), d(2024, 5, 31));
    }

    #[test]
    fn test_clamp_is_idempotent() {
        let bounds = DateBounds::new(Some(d(2024, 3, 1)), Some(d(2024, 5, 31)));
        for date in [d(2020, 1, 1), d(2024, 4, 10), d(2030, 12, 31)] {
            let once = bounds.clamp(date);
            assert_eq!(bounds.clamp(once), once);
        }
    }

    #[test]
    fn test_clamp_degenerate_bounds_prefers_min() {
        // Caller contract violation (min > max): min wins.
        let bounds = DateBounds::new(Some(d(2024, 6, 1)), Some(d(2024, 3, 1)));
        assert_eq!(bounds.clamp(d(2024, 1, 1)), d(2024, 6, 1));
    }

    #[test]
    fn test_contains() {
        let bounds = DateBounds::new(Some(d(2024, 3, 1)), None);
        assert!(bounds.contains(d(2024, 3, 1)));
        assert!(bounds.contains(d(2030, 1, 1)));
        assert!(!bounds.contains(d(2024, 2, 29)));
    }
}
