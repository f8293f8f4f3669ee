//! Pure calendar arithmetic over day-granularity dates
//!
//! Everything in this module is deterministic and side-effect free except
//! [`CalendarDate::today`], which reads the local clock once. All navigation
//! and virtual-window math is built on these functions.

use chrono::{Datelike, Days, Local, NaiveDate};

/// A date normalized to day granularity (no time-of-day component).
///
/// Equality and ordering are by calendar day. Values are valid by
/// construction: `from_ymd` rejects days that do not exist (e.g. Feb 30).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct CalendarDate(NaiveDate);

impl CalendarDate {
    /// Today according to the local clock, normalized to day granularity.
    pub fn today() -> Self {
        CalendarDate(Local::now().date_naive())
    }

    /// Construct from year / month (1-12) / day, rejecting nonexistent days.
    pub fn from_ymd(year: i32, month: u32, day: u32) -> Option<Self> {
        NaiveDate::from_ymd_opt(year, month, day).map(CalendarDate)
    }

    pub fn year(&self) -> i32 {
        self.0.year()
    }

    /// Month in 1-12.
    pub fn month(&self) -> u32 {
        self.0.month()
    }

    /// Month in 0-11, the form used by index math and cell identity keys.
    pub fn month0(&self) -> u32 {
        self.0.month0()
    }

    pub fn day(&self) -> u32 {
        self.0.day()
    }

    /// Day of week as 0-6 with 0 = Sunday, matching locale rotation.
    pub fn weekday0(&self) -> u32 {
        self.0.weekday().num_days_from_sunday()
    }

    /// This date shifted by `n` whole days.
    pub fn increment_days(&self, n: i64) -> Self {
        let shifted = if n >= 0 {
            self.0.checked_add_days(Days::new(n as u64))
        } else {
            self.0.checked_sub_days(Days::new((-n) as u64))
        };
        // Only reachable at the extremes of the representable range.
        CalendarDate(shifted.unwrap_or(self.0))
    }

    /// This date shifted by `n` whole months.
    ///
    /// The day-of-month is clamped to the last valid day of the destination
    /// month (Jan 31 + 1 month is Feb 28/29), never rolling over into the
    /// following month.
    pub fn increment_months(&self, n: i32) -> Self {
        let total = self.year() * 12 + self.month0() as i32 + n;
        let year = total.div_euclid(12);
        let month = total.rem_euclid(12) as u32 + 1;
        let day = self.day().min(days_in_month(year, month));
        // The clamp above guarantees a real calendar day.
        NaiveDate::from_ymd_opt(year, month, day)
            .map(CalendarDate)
            .unwrap_or(*self)
    }

    /// First day of this date's month.
    pub fn first_date_of_month(&self) -> Self {
        NaiveDate::from_ymd_opt(self.year(), self.month(), 1)
            .map(CalendarDate)
            .unwrap_or(*self)
    }

    /// Last day of this date's month.
    pub fn last_date_of_month(&self) -> Self {
        let day = days_in_month(self.year(), self.month());
        NaiveDate::from_ymd_opt(self.year(), self.month(), day)
            .map(CalendarDate)
            .unwrap_or(*self)
    }
}

/// Number of days in the given month (1-12).
pub fn days_in_month(year: i32, month: u32) -> u32 {
    match month {
        1 | 3 | 5 | 7 | 8 | 10 | 12 => 31,
        4 | 6 | 9 | 11 => 30,
        2 => {
            if is_leap_year(year) {
                29
            } else {
                28
            }
        }
        _ => 30,
    }
}

pub fn is_leap_year(year: i32) -> bool {
    (year % 4 == 0 && year % 100 != 0) || (year % 400 == 0)
}

/// Whether the given year / month (1-12) / day names a real calendar day.
pub fn is_valid_ymd(year: i32, month: u32, day: u32) -> bool {
    NaiveDate::from_ymd_opt(year, month, day).is_some()
}

/// Signed count of calendar months from `a`'s month to `b`'s month.
///
/// Day-of-month is ignored: the distance from Jan 31 to Feb 1 is 1.
pub fn month_distance(a: CalendarDate, b: CalendarDate) -> i32 {
    (b.year() - a.year()) * 12 + (b.month0() as i32 - a.month0() as i32)
}

/// One calendar row: seven slots, `None` where the month has no day.
pub type WeekRow = [Option<CalendarDate>; 7];

/// Build the week grid for `date`'s month.
///
/// `first_day_of_week` is 0-6 with 0 = Sunday; out-of-range values wrap
/// (host configuration is not validated upstream). Edge weeks are padded
/// with `None` so every row has exactly seven slots.
pub fn month_weeks(date: CalendarDate, first_day_of_week: u32) -> Vec<WeekRow> {
    let first = date.first_date_of_month();
    let days = days_in_month(date.year(), date.month());
    let first_day_of_week = first_day_of_week % 7;

    // Column of the month's first day once the header is rotated.
    let mut col = ((first.weekday0() + 7 - first_day_of_week) % 7) as usize;
    let mut weeks = Vec::with_capacity(6);
    let mut row: WeekRow = [None; 7];

    for day in 1..=days {
        row[col] = CalendarDate::from_ymd(date.year(), date.month(), day);
        col += 1;
        if col == 7 {
            weeks.push(row);
            row = [None; 7];
            col = 0;
        }
    }
    if col > 0 {
        weeks.push(row);
    }
    weeks
}

/// Number of calendar rows the month occupies (4-6 depending on length and
/// where the first day falls).
pub fn week_rows_in_month(date: CalendarDate, first_day_of_week: u32) -> usize {
    month_weeks(date, first_day_of_week).len()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn d(y: i32, m: u32, day: u32) -> CalendarDate {
        CalendarDate::from_ymd(y, m, day).unwrap()
    }

    #[test]
    fn test_from_ymd_rejects_nonexistent_days() {
        assert!(CalendarDate::from_ymd(2024, 2, 30).is_none());
        assert!(CalendarDate::from_ymd(2023, 2, 29).is_none());
        assert!(CalendarDate::from_ymd(2024, 13, 1).is_none());
        assert!(CalendarDate::from_ymd(2024, 2, 29).is_some());
    }

    #[test]
    fn test_ordering_is_by_calendar_day() {
        assert!(d(2024, 1, 31) < d(2024, 2, 1));
        assert!(d(2023, 12, 31) < d(2024, 1, 1));
        assert_eq!(d(2024, 6, 15), d(2024, 6, 15));
    }

    #[test]
    fn test_increment_days_crosses_month_and_year() {
        assert_eq!(d(2024, 1, 31).increment_days(1), d(2024, 2, 1));
        assert_eq!(d(2024, 1, 1).increment_days(-1), d(2023, 12, 31));
        assert_eq!(d(2024, 6, 15).increment_days(7), d(2024, 6, 22));
        assert_eq!(d(2024, 6, 3).increment_days(-7), d(2024, 5, 27));
    }

    #[test]
    fn test_increment_months_clamps_to_last_valid_day() {
        // Leap year: Jan 31 + 1 month is Feb 29, not an invalid Feb 31.
        assert_eq!(d(2024, 1, 31).increment_months(1), d(2024, 2, 29));
        assert_eq!(d(2023, 1, 31).increment_months(1), d(2023, 2, 28));
        assert_eq!(d(2024, 3, 31).increment_months(1), d(2024, 4, 30));
    }

    #[test]
    fn test_increment_months_crosses_year_boundaries() {
        assert_eq!(d(2024, 11, 15).increment_months(3), d(2025, 2, 15));
        assert_eq!(d(2024, 1, 15).increment_months(-2), d(2023, 11, 15));
        assert_eq!(d(2024, 6, 15).increment_months(-18), d(2022, 12, 15));
    }

    #[test]
    fn test_increment_months_round_trip_stays_in_month() {
        // Day may differ after clamping, but the month must round-trip.
        for n in [-25, -12, -1, 1, 7, 13, 48] {
            let start = d(2024, 1, 31);
            let back = start.increment_months(n).increment_months(-n);
            assert_eq!(back.year(), start.year(), "n={}", n);
            assert_eq!(back.month(), start.month(), "n={}", n);
        }
    }

    #[test]
    fn test_first_and_last_date_of_month() {
        assert_eq!(d(2024, 6, 15).first_date_of_month(), d(2024, 6, 1));
        assert_eq!(d(2024, 6, 15).last_date_of_month(), d(2024, 6, 30));
        assert_eq!(d(2024, 2, 10).last_date_of_month(), d(2024, 2, 29));
        assert_eq!(d(2023, 2, 10).last_date_of_month(), d(2023, 2, 28));
    }

    #[test]
    fn test_month_distance_ignores_day_of_month() {
        assert_eq!(month_distance(d(2024, 1, 31), d(2024, 2, 1)), 1);
        assert_eq!(month_distance(d(2024, 3, 1), d(2024, 5, 31)), 2);
        assert_eq!(month_distance(d(2023, 11, 15), d(2024, 2, 15)), 3);
    }

    #[test]
    fn test_month_distance_is_antisymmetric() {
        let cases = [
            (d(2024, 1, 31), d(2024, 2, 1)),
            (d(2020, 6, 1), d(2024, 6, 1)),
            (d(2024, 6, 15), d(2024, 6, 1)),
        ];
        for (a, b) in cases {
            assert_eq!(month_distance(a, b), -month_distance(b, a));
        }
        assert_eq!(month_distance(d(2024, 6, 1), d(2024, 6, 30)), 0);
    }

    #[test]
    fn test_days_in_month_february() {
        assert_eq!(days_in_month(2024, 2), 29);
        assert_eq!(days_in_month(2023, 2), 28);
        assert_eq!(days_in_month(2000, 2), 29);
        assert_eq!(days_in_month(1900, 2), 28);
    }

    #[test]
    fn test_month_weeks_pads_edge_rows() {
        // June 2024 starts on a Saturday; Sunday-first grid.
        let weeks = month_weeks(d(2024, 6, 15), 0);
        assert_eq!(weeks.len(), 6);
        assert_eq!(weeks[0][6], Some(d(2024, 6, 1)));
        assert!(weeks[0][..6].iter().all(|c| c.is_none()));
        assert_eq!(weeks[5][0], Some(d(2024, 6, 30)));
        assert!(weeks[5][1..].iter().all(|c| c.is_none()));
    }

    #[test]
    fn test_month_weeks_respects_first_day_of_week() {
        // Monday-first: June 1 2024 (Saturday) lands in column 5.
        let weeks = month_weeks(d(2024, 6, 15), 1);
        assert_eq!(weeks[0][5], Some(d(2024, 6, 1)));
    }

    #[test]
    fn test_month_weeks_wraps_out_of_range_first_day() {
        // An unvalidated host config can hand in values past Saturday;
        // 8 must behave exactly like Monday, not underflow.
        assert_eq!(month_weeks(d(2024, 9, 1), 8), month_weeks(d(2024, 9, 1), 1));
        assert_eq!(month_weeks(d(2024, 6, 15), 7), month_weeks(d(2024, 6, 15), 0));
    }

    #[test]
    fn test_week_rows_in_month() {
        // Feb 2015 starts on a Sunday and has 28 days: exactly 4 rows.
        assert_eq!(week_rows_in_month(d(2015, 2, 1), 0), 4);
        assert_eq!(week_rows_in_month(d(2024, 6, 1), 0), 6);
        assert_eq!(week_rows_in_month(d(2024, 5, 1), 0), 5);
    }

    #[test]
    fn test_every_month_day_appears_exactly_once_in_grid() {
        let weeks = month_weeks(d(2024, 2, 1), 0);
        let days: Vec<u32> = weeks
            .iter()
            .flatten()
            .filter_map(|c| c.map(|date| date.day()))
            .collect();
        assert_eq!(days, (1..=29).collect::<Vec<_>>());
    }
}
