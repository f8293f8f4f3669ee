pub mod calendar;
pub mod config;
pub mod date_math;
pub mod locale;
pub mod tui;
