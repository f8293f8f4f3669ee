//! Terminal-side implementations of the calendar's external collaborators
//!
//! The engine talks to three seams: a scroll surface (the virtual list's
//! mutable scroll position), a cell host (which cells are realized and can
//! take focus), and a model binding (the value shown to the host). These are
//! the terminal renditions used by the demo and by integration tests.

use std::collections::HashSet;

use async_trait::async_trait;

use crate::calendar::selection::{ModelBinding, SelectionDiff};
use crate::calendar::state::DateCellId;
use crate::calendar::transition::ScrollSurface;
use crate::calendar::view::CellHost;
use crate::date_math::CalendarDate;

/// Scroll position of the month list. The terminal has no animation, so a
/// written offset settles immediately, which is exactly the behavior that
/// makes the guard's drop-latest policy safe.
#[derive(Debug, Default)]
pub struct TermScrollSurface {
    offset_px: i32,
}

impl TermScrollSurface {
    pub fn offset_px(&self) -> i32 {
        self.offset_px
    }
}

#[async_trait]
impl ScrollSurface for TermScrollSurface {
    async fn scroll_to_offset(&mut self, offset_px: i32) {
        self.offset_px = offset_px;
    }
}

/// Registry of realized cells plus the diff-driven paint state.
///
/// Only cells of months the terminal actually renders are realized; focus
/// requests for anything else are deferred by the controller. Selection
/// paint state is mutated exclusively through [`SelectionDiff`]s, touching
/// the two affected cells and nothing else.
#[derive(Debug, Default)]
pub struct CellRegistry {
    realized: HashSet<DateCellId>,
    selected: HashSet<DateCellId>,
    focused: Option<DateCellId>,
}

impl CellRegistry {
    /// Replace the realized set for a new frame.
    pub fn set_realized<I: IntoIterator<Item = DateCellId>>(&mut self, cells: I) {
        self.realized = cells.into_iter().collect();
    }

    /// Apply a selection diff: clear the previous cell, mark the current.
    pub fn apply_selection_diff(&mut self, diff: &SelectionDiff, instance_id: u32) {
        let (previous, current) = diff.cell_ids(instance_id);
        if let Some(prev) = previous {
            self.selected.remove(&prev);
        }
        if let Some(cur) = current {
            self.selected.insert(cur);
        }
    }

    pub fn is_selected(&self, id: &DateCellId) -> bool {
        self.selected.contains(id)
    }

    pub fn is_focused(&self, id: &DateCellId) -> bool {
        self.focused.as_ref() == Some(id)
    }

    pub fn focused(&self) -> Option<DateCellId> {
        self.focused
    }
}

impl CellHost for CellRegistry {
    fn focus_cell(&mut self, id: DateCellId) -> bool {
        if self.realized.contains(&id) {
            self.focused = Some(id);
            true
        } else {
            false
        }
    }
}

/// Model binding showing the committed value in the demo's status line.
#[derive(Debug, Default)]
pub struct ValueBinding {
    value: Option<CalendarDate>,
    rendered: String,
}

impl ValueBinding {
    pub fn with_value(value: Option<CalendarDate>) -> Self {
        let mut binding = ValueBinding {
            value,
            rendered: String::new(),
        };
        binding.render();
        binding
    }

    pub fn value(&self) -> Option<CalendarDate> {
        self.value
    }

    pub fn rendered(&self) -> &str {
        &self.rendered
    }
}

impl ModelBinding for ValueBinding {
    fn set_value(&mut self, date: CalendarDate) {
        self.value = Some(date);
    }

    fn render(&mut self) {
        self.rendered = match self.value {
            Some(date) => format!("{:04}-{:02}-{:02}", date.year(), date.month(), date.day()),
            None => "(no date selected)".to_string(),
        };
    }
}
