//! Public types for the events API
use serde::{Deserialize, Serialize};

pub use crate::calendar::{DayIndex, ExpandedOccurrence};

#[derive(Deserialize)]
pub struct EventsQuery {
    // Kept as a string so a bad value gets our own error message
    pub year: Option<String>,
    #[serde(default)]
    pub calendar_id: Vec<String>,
}

#[derive(Deserialize)]
pub struct NoteQuery {
    pub calendar_id: Option<String>,
}

#[derive(Serialize, Deserialize)]
pub struct NoteUpdate {
    pub note: String,
}

#[derive(Serialize, Deserialize)]
pub struct NoteUpdated {
    pub success: bool,
}
