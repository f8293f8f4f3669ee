//! Per-instance navigation state and date cell identity keys

use std::fmt;
use std::str::FromStr;

use crate::calendar::error::CalendarError;
use crate::date_math::CalendarDate;

/// Navigation state for one calendar instance.
///
/// There is exactly one owner of this state (the [`MonthView`] controller);
/// collaborating views receive a borrowed reference plus bounds by value.
/// All mutation flows through the resolve → clamp → transition pipeline.
///
/// [`MonthView`]: crate::calendar::view::MonthView
#[derive(Debug, Clone)]
pub struct NavigationState {
    /// The month currently shown / scrolled to.
    pub display_date: CalendarDate,
    /// The committed selection, bound to the host's model. `None` until the
    /// user (or the host) picks a date.
    pub selected_date: Option<CalendarDate>,
    /// A date pending keyboard focus once its cell is realized by the
    /// virtual list.
    pub focus_date: Option<CalendarDate>,
    /// Becomes true after the one-time initialization pass.
    pub is_initialized: bool,
    /// Re-entrancy flag for the month transition; at most one in flight.
    pub transition_in_progress: bool,
}

impl NavigationState {
    /// Seed state from the initial bound model value, falling back to today.
    pub fn seeded(initial_value: Option<CalendarDate>, today: CalendarDate) -> Self {
        NavigationState {
            display_date: initial_value.unwrap_or(today),
            selected_date: initial_value,
            focus_date: None,
            is_initialized: false,
            transition_in_progress: false,
        }
    }
}

/// Deterministic identifier for one rendered date cell.
///
/// The painter uses these keys to locate cells; the core only ever hands the
/// key back and never depends on a cell actually existing. Instance identity
/// is injected at construction so two calendars on screen cannot collide.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct DateCellId {
    pub instance_id: u32,
    pub date: CalendarDate,
}

impl DateCellId {
    pub fn new(instance_id: u32, date: CalendarDate) -> Self {
        DateCellId { instance_id, date }
    }
}

impl fmt::Display for DateCellId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "mdcal-{}-{}-{}-{}",
            self.instance_id,
            self.date.year(),
            self.date.month0(),
            self.date.day()
        )
    }
}

impl FromStr for DateCellId {
    type Err = CalendarError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let malformed = || CalendarError::MalformedCellId(s.to_string());

        let rest = s.strip_prefix("mdcal-").ok_or_else(malformed)?;
        let mut parts = rest.splitn(4, '-');
        let instance_id: u32 = parts
            .next()
            .and_then(|p| p.parse().ok())
            .ok_or_else(malformed)?;
        let year: i32 = parts
            .next()
            .and_then(|p| p.parse().ok())
            .ok_or_else(malformed)?;
        let month0: u32 = parts
            .next()
            .and_then(|p| p.parse().ok())
            .ok_or_else(malformed)?;
        let day: u32 = parts
            .next()
            .and_then(|p| p.parse().ok())
            .ok_or_else(malformed)?;

        let date = CalendarDate::from_ymd(year, month0 + 1, day).ok_or(
            CalendarError::InvalidDate {
                year,
                month: month0 + 1,
                day,
            },
        )?;
        Ok(DateCellId { instance_id, date })
    }
}
