//! Virtual month window: date ↔ list index ↔ pixel scroll offset
//!
//! The calendar scrolls through a logical list of months rendered by an
//! external virtualized list container. This module owns the mapping between
//! calendar dates and positions in that list. The window length is advisory
//! (it sizes the container); the index arithmetic itself accepts any date.

use crate::calendar::bounds::DateBounds;
use crate::date_math::{month_distance, CalendarDate};

/// Month count of the virtual window when no bounds are configured. Today
/// sits near the middle so the user can scroll far in either direction.
pub const DEFAULT_TOTAL_MONTHS: i32 = 2000;

/// Rendered height of one full month block, in pixels.
pub const MONTH_ROW_HEIGHT_PX: i32 = 265;

/// Rendered height of a month block containing a single calendar row. Only
/// the trailing sentinel month renders this short; the offset correction
/// below depends on it.
pub const SINGLE_ROW_OFFSET_PX: i32 = 45;

/// Pixel geometry of the month list, overridable by host configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WindowGeometry {
    pub month_row_height_px: i32,
    pub single_row_offset_px: i32,
}

impl Default for WindowGeometry {
    fn default() -> Self {
        WindowGeometry {
            month_row_height_px: MONTH_ROW_HEIGHT_PX,
            single_row_offset_px: SINGLE_ROW_OFFSET_PX,
        }
    }
}

/// Maps dates to indices in the (possibly bounded) virtual month list and
/// indices to pixel scroll offsets.
#[derive(Debug, Clone, Copy)]
pub struct VirtualWindow {
    first_renderable_date: CalendarDate,
    total_months: i32,
    geometry: WindowGeometry,
}

impl VirtualWindow {
    /// Build the window for `today` under the given bounds.
    ///
    /// Unbounded, the window spans [`DEFAULT_TOTAL_MONTHS`] months centered
    /// on today. With both bounds set it spans the inclusive min..=max month
    /// range plus one trailing sentinel month reserved for virtualization.
    /// A `min` later than the computed start always wins: months before
    /// `min` are never rendered.
    pub fn new(today: CalendarDate, bounds: DateBounds, geometry: WindowGeometry) -> Self {
        let total_months = match (bounds.min, bounds.max) {
            (Some(min), Some(max)) => {
                // Inclusive month span, then one sentinel month for the
                // virtual list's trailing edge.
                let span = (month_distance(min, max) + 1).max(1);
                span + 1
            }
            _ => DEFAULT_TOTAL_MONTHS,
        };

        let mut first_renderable_date = today.increment_months(-(total_months / 2));
        if let Some(min) = bounds.min.filter(|m| *m > first_renderable_date) {
            first_renderable_date = min;
        } else if let Some(max) = bounds.max {
            // Align the last real month with max; the sentinel month follows.
            first_renderable_date = max.increment_months(-(total_months - 2));
        }

        VirtualWindow {
            first_renderable_date,
            total_months,
            geometry,
        }
    }

    /// The month mapped to index 0.
    pub fn first_renderable_date(&self) -> CalendarDate {
        self.first_renderable_date
    }

    /// Length of the virtual list handed to the container.
    pub fn total_months(&self) -> i32 {
        self.total_months
    }

    pub fn geometry(&self) -> WindowGeometry {
        self.geometry
    }

    /// Index of `date`'s month in the virtual list. Zero at the window
    /// start; negative or past-the-end indices are legal (the window length
    /// only sizes the container).
    pub fn index_of(&self, date: CalendarDate) -> i32 {
        month_distance(self.first_renderable_date, date)
    }

    /// Pixel scroll offset that brings `date`'s month to the top.
    pub fn scroll_offset_of(&self, date: CalendarDate) -> i32 {
        self.index_of(date) * self.geometry.month_row_height_px
    }

    /// Index of the month the list should start focused on. An explicit
    /// pending focus target outranks the committed selection, which outranks
    /// today.
    pub fn focused_index(
        &self,
        focus: Option<CalendarDate>,
        selected: Option<CalendarDate>,
        today: CalendarDate,
    ) -> i32 {
        self.index_of(focus.or(selected).unwrap_or(today))
    }

    /// Offset correction handed to the virtual list container for the
    /// trailing sentinel month, which renders a single calendar row instead
    /// of a full month block.
    pub fn render_offset_px(&self) -> i32 {
        self.geometry.single_row_offset_px - self.geometry.month_row_height_px
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn d(y: i32, m: u32, day: u32) -> CalendarDate {
        CalendarDate::from_ymd(y, m, day).unwrap()
    }

    fn unbounded(today: CalendarDate) -> VirtualWindow {
        VirtualWindow::new(today, DateBounds::default(), WindowGeometry::default())
    }

    #[test]
    fn test_unbounded_window_centers_today() {
        let today = d(2024, 6, 15);
        let window = unbounded(today);
        assert_eq!(window.total_months(), DEFAULT_TOTAL_MONTHS);
        assert_eq!(window.index_of(today), DEFAULT_TOTAL_MONTHS / 2);
    }

    #[test]
    fn test_index_of_window_start_is_zero() {
        let window = unbounded(d(2024, 6, 15));
        assert_eq!(window.index_of(window.first_renderable_date()), 0);
    }

    #[test]
    fn test_index_is_monotonic_over_months() {
        let window = unbounded(d(2024, 6, 15));
        let mut date = d(2020, 1, 1);
        let mut prev = window.index_of(date);
        for _ in 0..120 {
            date = date.increment_months(1);
            let next = window.index_of(date);
            assert_eq!(next, prev + 1);
            prev = next;
        }
    }

    #[test]
    fn test_index_ignores_day_of_month() {
        let window = unbounded(d(2024, 6, 15));
        assert_eq!(window.index_of(d(2024, 6, 1)), window.index_of(d(2024, 6, 30)));
    }

    #[test]
    fn test_bounded_window_spans_min_to_max_plus_sentinel() {
        // Mar..=May 2024 is 3 months inclusive, plus one sentinel month.
        let bounds = DateBounds::new(Some(d(2024, 3, 1)), Some(d(2024, 5, 31)));
        let window = VirtualWindow::new(d(2024, 6, 15), bounds, WindowGeometry::default());
        assert_eq!(window.total_months(), 4);
        assert_eq!(window.first_renderable_date(), d(2024, 3, 31));
        assert_eq!(window.index_of(d(2024, 3, 1)), 0);
        assert_eq!(window.index_of(d(2024, 5, 31)), 2);
    }

    #[test]
    fn test_min_date_clamps_window_forward() {
        // The unbounded window would start ~1000 months before today;
        // a later min date always wins.
        let bounds = DateBounds::new(Some(d(2024, 3, 1)), None);
        let window = VirtualWindow::new(d(2024, 6, 15), bounds, WindowGeometry::default());
        assert_eq!(window.first_renderable_date(), d(2024, 3, 1));
        assert_eq!(window.index_of(d(2024, 3, 10)), 0);
    }

    #[test]
    fn test_min_wins_over_max_alignment() {
        // Both bounds set but today far in the past: min still clamps.
        let bounds = DateBounds::new(Some(d(2024, 7, 1)), Some(d(2024, 8, 31)));
        let window = VirtualWindow::new(d(2020, 1, 1), bounds, WindowGeometry::default());
        assert_eq!(window.first_renderable_date(), d(2024, 7, 1));
    }

    #[test]
    fn test_max_only_aligns_last_real_month() {
        let bounds = DateBounds::new(None, Some(d(2024, 8, 31)));
        let window = VirtualWindow::new(d(2024, 6, 15), bounds, WindowGeometry::default());
        assert_eq!(window.total_months(), DEFAULT_TOTAL_MONTHS);
        // Last real month aligns with max, one sentinel month after it.
        let last_real = window
            .first_renderable_date()
            .increment_months(window.total_months() - 2);
        assert_eq!(last_real.year(), 2024);
        assert_eq!(last_real.month(), 8);
    }

    #[test]
    fn test_scroll_offset_scales_by_row_height() {
        let window = unbounded(d(2024, 6, 15));
        let date = d(2024, 9, 1);
        assert_eq!(
            window.scroll_offset_of(date),
            window.index_of(date) * MONTH_ROW_HEIGHT_PX
        );
        assert_eq!(window.scroll_offset_of(window.first_renderable_date()), 0);
    }

    #[test]
    fn test_out_of_window_indices_are_accepted() {
        let bounds = DateBounds::new(Some(d(2024, 3, 1)), Some(d(2024, 5, 31)));
        let window = VirtualWindow::new(d(2024, 6, 15), bounds, WindowGeometry::default());
        assert_eq!(window.index_of(d(2024, 1, 15)), -2);
        assert_eq!(window.index_of(d(2024, 9, 15)), 6);
    }

    #[test]
    fn test_focused_index_priority_order() {
        let window = unbounded(d(2024, 6, 15));
        let today = d(2024, 6, 15);
        let focus = Some(d(2024, 9, 1));
        let selected = Some(d(2024, 7, 1));

        assert_eq!(
            window.focused_index(focus, selected, today),
            window.index_of(d(2024, 9, 1))
        );
        assert_eq!(
            window.focused_index(None, selected, today),
            window.index_of(d(2024, 7, 1))
        );
        assert_eq!(window.focused_index(None, None, today), window.index_of(today));
    }

    #[test]
    fn test_render_offset_corrects_sentinel_height() {
        let window = unbounded(d(2024, 6, 15));
        assert_eq!(
            window.render_offset_px(),
            SINGLE_ROW_OFFSET_PX - MONTH_ROW_HEIGHT_PX
        );
    }
}
