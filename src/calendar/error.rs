use thiserror::Error;

/// Calendar-specific errors
///
/// Invalid dates are unrepresentable in the core value types, so errors only
/// arise at the parse boundaries (cell identity keys, host-supplied input).
#[derive(Error, Debug, PartialEq, Eq)]
pub enum CalendarError {
    #[error("Not a valid calendar day: {year}-{month}-{day}")]
    InvalidDate { year: i32, month: u32, day: u32 },

    #[error("Malformed date cell identifier: {0}")]
    MalformedCellId(String),
}
