//! Single-flight month transition state machine
//!
//! Changing the displayed month drives an asynchronous scroll on the virtual
//! list container. At most one transition is ever in flight: requests that
//! arrive while one is pending are dropped, never queued, so rapid repeated
//! input cannot corrupt the visible state. The scroll collaborator must
//! always settle; a transition that never completes leaves the instance
//! unable to navigate (a collaborator contract violation, logged loudly).

use async_trait::async_trait;
use tracing::{debug, error, trace};

use crate::calendar::state::NavigationState;
use crate::calendar::window::VirtualWindow;
use crate::date_math::CalendarDate;

/// The external scroll position of the virtual list container.
///
/// The core writes offsets to this surface and awaits settlement; it never
/// reads layout internals back.
#[async_trait]
pub trait ScrollSurface: Send {
    /// Apply the given pixel offset, resolving once the scroll has settled.
    async fn scroll_to_offset(&mut self, offset_px: i32);
}

/// Why a display-change request was dropped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DropReason {
    /// Another transition is in flight; drop-latest-while-busy.
    TransitionInProgress,
}

/// Outcome of asking the guard to change the displayed month.
#[derive(Debug)]
pub enum TransitionOutcome {
    /// The state machine was still uninitialized: the one-time setup pass
    /// ran and the request completed without moving the display, so the
    /// seeded initial value is what gets shown.
    Initialized,
    /// The request was silently discarded.
    Dropped(DropReason),
    /// The display date was committed; the caller must drive the scroll and
    /// then finish the returned transition.
    Started(PendingTransition),
}

/// Token for an in-flight transition. The display date has already been
/// committed; the holder drives the scroll side effect and must call
/// [`PendingTransition::finish`] once it settles.
#[must_use = "an unfinished transition leaves the guard stuck in Transitioning"]
#[derive(Debug)]
pub struct PendingTransition {
    target: CalendarDate,
    scroll_offset_px: i32,
    finished: bool,
}

impl PendingTransition {
    /// The date the display was committed to.
    pub fn target(&self) -> CalendarDate {
        self.target
    }

    /// The pixel offset to write to the scroll surface.
    pub fn scroll_offset_px(&self) -> i32 {
        self.scroll_offset_px
    }

    /// Mark the transition complete, returning the guard to Idle.
    pub fn finish(mut self, state: &mut NavigationState) {
        state.transition_in_progress = false;
        self.finished = true;
        trace!("transition to {:?} finished", self.target);
    }
}

impl Drop for PendingTransition {
    fn drop(&mut self) {
        if !self.finished {
            // The scroll surface never settled (or the token was leaked):
            // the instance is stuck in Transitioning and navigation is dead.
            error!(
                "month transition to {:?} dropped without completing; \
                 scroll surface violated its contract",
                self.target
            );
        }
    }
}

/// Run the one-time initialization pass, transitioning Uninitialized → Idle.
///
/// Invoked exactly once at mount (the caller builds its week header and
/// scrollbar-compensation geometry around this). Returns false if the state
/// was already initialized.
pub fn initialize(state: &mut NavigationState) -> bool {
    if state.is_initialized {
        return false;
    }
    state.is_initialized = true;
    debug!("calendar initialized at display date {:?}", state.display_date);
    true
}

/// Request a change of the displayed month.
///
/// Uninitialized state initializes and completes trivially; a busy guard
/// drops the request. Otherwise the display date is committed, and the
/// returned [`PendingTransition`] carries the scroll offset to apply.
pub fn begin_display_change(
    state: &mut NavigationState,
    window: &VirtualWindow,
    date: CalendarDate,
) -> TransitionOutcome {
    if !state.is_initialized {
        initialize(state);
        return TransitionOutcome::Initialized;
    }
    if state.transition_in_progress {
        trace!("display change to {:?} dropped: transition in progress", date);
        return TransitionOutcome::Dropped(DropReason::TransitionInProgress);
    }

    state.transition_in_progress = true;
    state.display_date = date;
    TransitionOutcome::Started(PendingTransition {
        target: date,
        scroll_offset_px: window.scroll_offset_of(date),
        finished: false,
    })
}

/// Result of a fully driven display change.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChangeResult {
    /// One-time setup ran; the display was not moved.
    InitializedOnly,
    /// The request was dropped (another transition in flight).
    Dropped,
    /// The display moved and the scroll settled.
    Applied,
}

/// Drive a display change end to end: commit, scroll, return to Idle.
pub async fn request_display_change(
    state: &mut NavigationState,
    window: &VirtualWindow,
    date: CalendarDate,
    surface: &mut dyn ScrollSurface,
) -> ChangeResult {
    match begin_display_change(state, window, date) {
        TransitionOutcome::Initialized => ChangeResult::InitializedOnly,
        TransitionOutcome::Dropped(_) => ChangeResult::Dropped,
        TransitionOutcome::Started(pending) => {
            surface.scroll_to_offset(pending.scroll_offset_px()).await;
            pending.finish(state);
            ChangeResult::Applied
        }
    }
}
