//! Scrollable month-calendar navigation engine
//!
//! Input flows through one pipeline: a key or click resolves to a candidate
//! date ([`keys`]), the candidate is clamped into the configured bounds
//! ([`bounds`]), the single-flight transition guard commits the new display
//! month and drives the scroll ([`transition`]), and the virtual window maps
//! the date to a list index and pixel offset ([`window`]). Selection changes
//! surface as two-cell diffs for the external painter ([`selection`]). The
//! [`view::MonthView`] controller is the single owner tying it together.

pub mod bounds;
pub mod error;
pub mod keys;
pub mod selection;
pub mod state;
pub mod transition;
pub mod view;
pub mod window;

pub use bounds::DateBounds;
pub use error::CalendarError;
pub use keys::{resolve_key, KeyResolution};
pub use selection::{ModelBinding, SelectionDiff};
pub use state::{DateCellId, NavigationState};
pub use transition::{ChangeResult, ScrollSurface, TransitionOutcome};
pub use view::{CalendarEvent, CellHost, MonthView};
pub use window::{VirtualWindow, WindowGeometry};
