pub mod calendar;
pub mod format;
