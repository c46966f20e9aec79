//! Calendar events, per-day expansion and notes stored in event
//! descriptions.

mod error;
mod event;
pub mod expand;
pub mod note;
mod provider;
pub mod range;
pub mod service;

pub use error::ExpandError;
pub use event::{CalendarSummary, DayIndex, EventTime, ExpandedOccurrence, RawEvent};
pub use expand::{DaySpan, expand, expand_within};
pub use provider::CalendarApi;
pub use range::{year_bounds, year_days};
