//! Event shapes exchanged with the calendar provider and the per-day
//! index built from them.
use std::collections::BTreeMap;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Start or end of an event as the provider sends it. All-day events
/// carry `date`, timed events carry `dateTime`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EventTime {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date_time: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub time_zone: Option<String>,
}

impl EventTime {
    pub fn all_day(date: &str) -> Self {
        Self {
            date: Some(date.to_string()),
            ..Default::default()
        }
    }

    pub fn timed(date_time: &str) -> Self {
        Self {
            date_time: Some(date_time.to_string()),
            ..Default::default()
        }
    }
}

/// An event as returned by the provider. Fields we don't model are kept
/// in `extra` so that an update sends the event back unchanged.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawEvent {
    pub id: String,
    // Not part of the provider payload, attached after fetching
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub calendar_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start: Option<EventTime>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end: Option<EventTime>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// One day's copy of an event.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExpandedOccurrence {
    #[serde(flatten)]
    pub event: RawEvent,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
    pub is_first_day: bool,
    pub is_multi_day: bool,
}

/// Occurrences grouped by calendar day. Serializes as an object keyed by
/// `YYYY-MM-DD` in ascending order.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DayIndex(BTreeMap<NaiveDate, Vec<ExpandedOccurrence>>);

impl DayIndex {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, day: NaiveDate, occurrence: ExpandedOccurrence) {
        self.0.entry(day).or_default().push(occurrence);
    }

    pub fn get(&self, day: NaiveDate) -> Option<&[ExpandedOccurrence]> {
        self.0.get(&day).map(Vec::as_slice)
    }

    pub fn days(&self) -> impl Iterator<Item = &NaiveDate> {
        self.0.keys()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&NaiveDate, &Vec<ExpandedOccurrence>)> {
        self.0.iter()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// Entry in the user's calendar list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CalendarSummary {
    pub id: String,
    #[serde(default)]
    pub summary: String,
    #[serde(default = "default_background_color")]
    pub background_color: String,
    #[serde(default = "default_foreground_color")]
    pub foreground_color: String,
    #[serde(default = "default_selected")]
    pub selected: bool,
}

fn default_background_color() -> String {
    "#4285F4".to_string()
}

fn default_foreground_color() -> String {
    "#FFFFFF".to_string()
}

fn default_selected() -> bool {
    true
}
