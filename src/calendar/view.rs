//! The owning month-view controller
//!
//! One `MonthView` owns the navigation state for a calendar instance and
//! wires the full input pipeline: key resolution → bounds clamp → month
//! transition → focus resolution, plus the click-activation and model
//! binding paths. Collaborators (scroll surface, cell host, model binding)
//! stay external and are handed in per call.

use crossterm::event::KeyEvent;
use tracing::{debug, trace};

use crate::calendar::bounds::DateBounds;
use crate::calendar::keys::{resolve_key, KeyResolution};
use crate::calendar::selection::{record_selection, ModelBinding, SelectionDiff};
use crate::calendar::state::{DateCellId, NavigationState};
use crate::calendar::transition::{self, ChangeResult, ScrollSurface};
use crate::calendar::window::{VirtualWindow, WindowGeometry};
use crate::date_math::CalendarDate;
use crate::locale::DateLocale;

/// Signals emitted to the enclosing component and the visual painter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CalendarEvent {
    /// Ask the wrapping component (e.g. a date-picker popup) to close. When
    /// `suppress_focus_advance` is set the host must also swallow the
    /// default focus transfer.
    CloseRequested { suppress_focus_advance: bool },
    /// The selection moved; repaint exactly the two affected cells.
    SelectionChanged(SelectionDiff),
    /// The bound model value changed to this date.
    ModelChanged(CalendarDate),
    /// Keyboard focus should land on this realized cell.
    FocusCell(DateCellId),
}

/// Painter-side registry of realized cells.
///
/// The virtual list only materializes visible months, so a freshly navigated
/// date may have no cell yet. `focus_cell` returns false in that case and
/// the controller records the date as pending focus instead.
pub trait CellHost {
    fn focus_cell(&mut self, id: DateCellId) -> bool;
}

/// Optional host-supplied predicate restricting which dates are selectable.
pub type DateFilter = Box<dyn Fn(CalendarDate) -> bool + Send>;

/// Controller owning the navigation state of one calendar instance.
pub struct MonthView {
    instance_id: u32,
    today: CalendarDate,
    state: NavigationState,
    bounds: DateBounds,
    window: VirtualWindow,
    locale: DateLocale,
    week_header: Vec<String>,
    date_filter: Option<DateFilter>,
}

impl MonthView {
    /// Build a controller for one calendar instance.
    ///
    /// `instance_id` is injected by the host (it namespaces cell identity
    /// keys); `initial_value` is the bound model value, seeding both the
    /// selection and the displayed month.
    pub fn new(
        instance_id: u32,
        initial_value: Option<CalendarDate>,
        bounds: DateBounds,
        geometry: WindowGeometry,
        locale: DateLocale,
    ) -> Self {
        let today = CalendarDate::today();
        Self::with_today(instance_id, initial_value, bounds, geometry, locale, today)
    }

    /// Same as [`MonthView::new`] with an explicit "today", for deterministic
    /// construction.
    pub fn with_today(
        instance_id: u32,
        initial_value: Option<CalendarDate>,
        bounds: DateBounds,
        geometry: WindowGeometry,
        locale: DateLocale,
        today: CalendarDate,
    ) -> Self {
        let window = VirtualWindow::new(today, bounds, geometry);
        MonthView {
            instance_id,
            today,
            state: NavigationState::seeded(initial_value, today),
            bounds,
            window,
            locale,
            week_header: Vec::new(),
            date_filter: None,
        }
    }

    /// Install the host-supplied selectability predicate.
    pub fn set_date_filter(&mut self, filter: DateFilter) {
        self.date_filter = Some(filter);
    }

    /// One-time setup at mount: builds the static week header and flips the
    /// transition guard to Idle. Safe to call more than once; only the first
    /// call does work.
    pub fn initialize(&mut self) {
        if transition::initialize(&mut self.state) {
            self.week_header = self.locale.week_header();
        }
    }

    pub fn display_date(&self) -> CalendarDate {
        self.state.display_date
    }

    pub fn selected_date(&self) -> Option<CalendarDate> {
        self.state.selected_date
    }

    pub fn focus_date(&self) -> Option<CalendarDate> {
        self.state.focus_date
    }

    pub fn today(&self) -> CalendarDate {
        self.today
    }

    pub fn bounds(&self) -> DateBounds {
        self.bounds
    }

    pub fn window(&self) -> &VirtualWindow {
        &self.window
    }

    pub fn locale(&self) -> &DateLocale {
        &self.locale
    }

    /// The rotated day-name header row, empty until initialized.
    pub fn week_header(&self) -> &[String] {
        &self.week_header
    }

    pub fn instance_id(&self) -> u32 {
        self.instance_id
    }

    /// Identity key for the given date's cell in this instance.
    pub fn cell_id(&self, date: CalendarDate) -> DateCellId {
        DateCellId::new(self.instance_id, date)
    }

    /// Index the virtual list should start focused on.
    pub fn focused_index(&self) -> i32 {
        self.window
            .focused_index(self.state.focus_date, self.state.selected_date, self.today)
    }

    /// Handle one key event through the full navigation pipeline.
    pub async fn handle_key(
        &mut self,
        key: KeyEvent,
        surface: &mut dyn ScrollSurface,
        host: &mut dyn CellHost,
        binding: &mut dyn ModelBinding,
    ) -> Vec<CalendarEvent> {
        let Some(resolution) = resolve_key(key, self.state.display_date) else {
            return Vec::new();
        };

        match resolution {
            KeyResolution::Close {
                suppress_focus_advance,
            } => vec![CalendarEvent::CloseRequested {
                suppress_focus_advance,
            }],
            KeyResolution::Select => {
                let date = self.state.display_date;
                self.commit_selection(date, surface, host, binding).await
            }
            KeyResolution::Navigate(candidate) => {
                let date = self.bounds.clamp(candidate);
                if date != candidate {
                    trace!("candidate {:?} clamped to {:?}", candidate, date);
                }
                let mut events = Vec::new();
                match transition::request_display_change(
                    &mut self.state,
                    &self.window,
                    date,
                    surface,
                )
                .await
                {
                    ChangeResult::Applied | ChangeResult::InitializedOnly => {
                        if let Some(event) = self.resolve_focus(date, host) {
                            events.push(event);
                        }
                    }
                    ChangeResult::Dropped => {}
                }
                events
            }
        }
    }

    /// Direct activation path: a pointer click on a day cell supplies an
    /// explicit target decoded from the cell's identity key.
    pub async fn activate_cell(
        &mut self,
        id: DateCellId,
        surface: &mut dyn ScrollSurface,
        host: &mut dyn CellHost,
        binding: &mut dyn ModelBinding,
    ) -> Vec<CalendarEvent> {
        debug!("cell {} activated", id);
        self.commit_selection(id.date, surface, host, binding).await
    }

    /// External model change (the host wrote a new bound value). Updates the
    /// selection and brings the new value's month into view, but does not
    /// echo a model-change notification back.
    pub async fn model_value_changed(
        &mut self,
        date: Option<CalendarDate>,
        surface: &mut dyn ScrollSurface,
        host: &mut dyn CellHost,
    ) -> Vec<CalendarEvent> {
        let diff = record_selection(&mut self.state, date);
        let mut events = Vec::new();
        if !diff.is_noop() {
            events.push(CalendarEvent::SelectionChanged(diff));
        }
        if let Some(date) = date {
            let result =
                transition::request_display_change(&mut self.state, &self.window, date, surface)
                    .await;
            if result != ChangeResult::Dropped {
                if let Some(event) = self.resolve_focus(date, host) {
                    events.push(event);
                }
            }
        }
        events
    }

    /// Commit `date` as the selected value.
    ///
    /// Notifies the model binding and synchronously triggers its re-render
    /// hook, then updates internal selection state and the displayed month,
    /// so the bound value and the visible selection agree within this turn.
    /// A date rejected by the host's selectability predicate is refused
    /// (navigation may still have scrolled there).
    pub async fn commit_selection(
        &mut self,
        date: CalendarDate,
        surface: &mut dyn ScrollSurface,
        host: &mut dyn CellHost,
        binding: &mut dyn ModelBinding,
    ) -> Vec<CalendarEvent> {
        if let Some(filter) = &self.date_filter {
            if !filter(date) {
                trace!("selection of {:?} refused by date filter", date);
                return Vec::new();
            }
        }

        let mut events = vec![CalendarEvent::ModelChanged(date)];
        binding.set_value(date);
        binding.render();

        let diff = record_selection(&mut self.state, Some(date));
        if !diff.is_noop() {
            events.push(CalendarEvent::SelectionChanged(diff));
        }

        let result =
            transition::request_display_change(&mut self.state, &self.window, date, surface).await;
        if result != ChangeResult::Dropped {
            if let Some(event) = self.resolve_focus(date, host) {
                events.push(event);
            }
        }
        events
    }

    /// Retry a deferred focus once the painter has realized more cells.
    /// Clears the pending focus date and reports the focused cell on
    /// success; leaves it pending otherwise.
    pub fn apply_deferred_focus(&mut self, host: &mut dyn CellHost) -> Option<CalendarEvent> {
        let date = self.state.focus_date?;
        let id = self.cell_id(date);
        if host.focus_cell(id) {
            self.state.focus_date = None;
            Some(CalendarEvent::FocusCell(id))
        } else {
            None
        }
    }

    /// Post-transition focus resolution: focus the cell if the virtual list
    /// has realized it, otherwise record the date as pending focus for the
    /// painter to apply once the cell exists.
    fn resolve_focus(&mut self, date: CalendarDate, host: &mut dyn CellHost) -> Option<CalendarEvent> {
        let id = self.cell_id(date);
        if host.focus_cell(id) {
            self.state.focus_date = None;
            Some(CalendarEvent::FocusCell(id))
        } else {
            trace!("cell {} not realized; deferring focus", id);
            self.state.focus_date = Some(date);
            None
        }
    }
}
