//! Locale-supplied day-of-week data
//!
//! The calendar consumes locale data, it never computes it: the host supplies
//! the first day of the week and seven abbreviated day names in calendar
//! order (Sunday first), and the core rotates them once to build the header
//! row.

/// Day-name and week-start data supplied by the host environment.
#[derive(Debug, Clone)]
pub struct DateLocale {
    /// 0-6 with 0 = Sunday.
    pub first_day_of_week: u32,
    /// Abbreviated day names, Sunday first.
    pub short_days: [String; 7],
}

impl Default for DateLocale {
    fn default() -> Self {
        DateLocale {
            first_day_of_week: 0,
            short_days: [
                "Sun".to_string(),
                "Mon".to_string(),
                "Tue".to_string(),
                "Wed".to_string(),
                "Thu".to_string(),
                "Fri".to_string(),
                "Sat".to_string(),
            ],
        }
    }
}

impl DateLocale {
    /// The seven header labels, rotated so the configured first day of the
    /// week comes first. Out-of-range `first_day_of_week` wraps.
    pub fn week_header(&self) -> Vec<String> {
        let first = self.first_day_of_week % 7;
        (0..7)
            .map(|i| self.short_days[((i + first) % 7) as usize].clone())
            .collect()
    }
}
