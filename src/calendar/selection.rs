//! Selection state changes and the diffs handed to the external painter
//!
//! When the selection moves, exactly two cells change appearance: the
//! previously selected one (cleared) and the newly selected one (marked).
//! The painter receives that pair as a diff keyed by cell identity and never
//! repaints unrelated cells.

use tracing::debug;

use crate::calendar::state::{DateCellId, NavigationState};
use crate::date_math::CalendarDate;

/// The pair of dates whose "selected" visual state changed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SelectionDiff {
    pub previous: Option<CalendarDate>,
    pub current: Option<CalendarDate>,
}

impl SelectionDiff {
    /// The painter-facing cell keys for this diff: clear the first, mark the
    /// second.
    pub fn cell_ids(&self, instance_id: u32) -> (Option<DateCellId>, Option<DateCellId>) {
        (
            self.previous.map(|date| DateCellId::new(instance_id, date)),
            self.current.map(|date| DateCellId::new(instance_id, date)),
        )
    }

    /// True when nothing actually changed (re-selecting the same date).
    pub fn is_noop(&self) -> bool {
        self.previous == self.current
    }
}

/// Host-model binding collaborator.
///
/// Receives the committed value and must synchronously re-render its
/// displayed value when told to, so the bound value and the calendar's
/// internal selection stay observably consistent within the same turn.
pub trait ModelBinding {
    fn set_value(&mut self, date: CalendarDate);
    fn render(&mut self);
}

/// Record a new selection on the navigation state, returning the diff for
/// the painter. The caller is responsible for the accompanying display
/// change and model notification (see `MonthView::commit_selection`).
pub fn record_selection(
    state: &mut NavigationState,
    date: Option<CalendarDate>,
) -> SelectionDiff {
    let previous = state.selected_date;
    state.selected_date = date;
    debug!("selection changed: {:?} -> {:?}", previous, date);
    SelectionDiff {
        previous,
        current: date,
    }
}
