//! Keyboard event to calendar action mapping
//!
//! Converts crossterm KeyEvents into calendar navigation decisions. This is
//! the only place key identities are interpreted; everything downstream
//! works in terms of candidate dates.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use tracing::debug;

use crate::date_math::CalendarDate;

/// Outcome of resolving one key event against the current display date.
///
/// "No navigation" is expressed as `None` from [`resolve_key`]; a resolution
/// never targets the current display date itself.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyResolution {
    /// Navigate the display/focus to a candidate date (bounds not yet
    /// applied).
    Navigate(CalendarDate),
    /// Commit the current display date as the selected value.
    Select,
    /// Ask the enclosing component to close the calendar. When
    /// `suppress_focus_advance` is set (Tab) the host must also swallow the
    /// default focus transfer so it stays in control of where focus lands.
    Close { suppress_focus_advance: bool },
}

/// Resolve a key event to a calendar action, or `None` when the key is not a
/// calendar shortcut.
///
/// Down/Up with the platform meta (Super) modifier step by month instead of
/// by week, mirroring PageDown/PageUp.
pub fn resolve_key(key: KeyEvent, display_date: CalendarDate) -> Option<KeyResolution> {
    let meta = key.modifiers.contains(KeyModifiers::SUPER);

    let resolution = match key.code {
        KeyCode::Esc => KeyResolution::Close {
            suppress_focus_advance: false,
        },
        KeyCode::Tab | KeyCode::BackTab => KeyResolution::Close {
            suppress_focus_advance: true,
        },
        KeyCode::Enter => KeyResolution::Select,
        KeyCode::Right => KeyResolution::Navigate(display_date.increment_days(1)),
        KeyCode::Left => KeyResolution::Navigate(display_date.increment_days(-1)),
        KeyCode::Down if meta => KeyResolution::Navigate(display_date.increment_months(1)),
        KeyCode::Down => KeyResolution::Navigate(display_date.increment_days(7)),
        KeyCode::Up if meta => KeyResolution::Navigate(display_date.increment_months(-1)),
        KeyCode::Up => KeyResolution::Navigate(display_date.increment_days(-7)),
        KeyCode::PageDown => KeyResolution::Navigate(display_date.increment_months(1)),
        KeyCode::PageUp => KeyResolution::Navigate(display_date.increment_months(-1)),
        KeyCode::Home => KeyResolution::Navigate(display_date.first_date_of_month()),
        KeyCode::End => KeyResolution::Navigate(display_date.last_date_of_month()),
        _ => return None,
    };

    debug!("KEY: {:?} resolved to {:?}", key.code, resolution);
    Some(resolution)
}
