//! Public types for the calendar list API
pub use crate::calendar::CalendarSummary;
