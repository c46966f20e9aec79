//! Expands provider events into one occurrence per calendar day they
//! touch.

use chrono::{DateTime, NaiveDate};

use super::error::ExpandError;
use super::event::{DayIndex, EventTime, ExpandedOccurrence, RawEvent};
use super::note;

/// Inclusive day span of a single event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DaySpan {
    pub first: NaiveDate,
    pub last: NaiveDate,
}

impl DaySpan {
    pub fn is_multi_day(&self) -> bool {
        self.first != self.last
    }

    pub fn days(&self) -> impl Iterator<Item = NaiveDate> {
        let last = self.last;
        self.first.iter_days().take_while(move |day| *day <= last)
    }

    /// The part of this span inside `window`, if they overlap.
    pub fn clip(&self, window: &DaySpan) -> Option<DaySpan> {
        let first = self.first.max(window.first);
        let last = self.last.min(window.last);
        (first <= last).then_some(DaySpan { first, last })
    }
}

fn parse_date(event_id: &str, value: &str) -> Result<NaiveDate, ExpandError> {
    NaiveDate::parse_from_str(value, "%Y-%m-%d").map_err(|source| ExpandError::InvalidDate {
        event_id: event_id.to_string(),
        value: value.to_string(),
        source,
    })
}

/// Date of a timestamp in its own offset.
fn parse_date_time(event_id: &str, value: &str) -> Result<NaiveDate, ExpandError> {
    let normalized = match value.strip_suffix('Z') {
        Some(stripped) => format!("{stripped}+00:00"),
        None => value.to_string(),
    };
    DateTime::parse_from_rfc3339(&normalized)
        .map(|dt| dt.date_naive())
        .map_err(|source| ExpandError::InvalidDateTime {
            event_id: event_id.to_string(),
            value: value.to_string(),
            source,
        })
}

/// Works out which days an event covers. Returns `None` for events with
/// no usable start, which are left out of the index.
pub fn day_span(event: &RawEvent) -> Result<Option<DaySpan>, ExpandError> {
    let Some(start) = event.start.as_ref() else {
        return Ok(None);
    };
    let end = event.end.as_ref();

    let (first, last) = match start {
        EventTime {
            date: Some(date), ..
        } => {
            let first = parse_date(&event.id, date)?;
            // All-day ends are exclusive
            let last = match end.and_then(|end| end.date.as_deref()) {
                Some(end_date) => parse_date(&event.id, end_date)?
                    .pred_opt()
                    .unwrap_or(first),
                None => first,
            };
            (first, last)
        }
        EventTime {
            date_time: Some(date_time),
            ..
        } => {
            let first = parse_date_time(&event.id, date_time)?;
            let last = match end.and_then(|end| end.date_time.as_deref()) {
                Some(end_date_time) => parse_date_time(&event.id, end_date_time)?,
                None => first,
            };
            (first, last)
        }
        _ => return Ok(None),
    };

    if last < first {
        tracing::debug!(
            "Event {} ends ({}) before it starts ({}), treating as a single day",
            event.id,
            last,
            first
        );
        return Ok(Some(DaySpan { first, last: first }));
    }

    Ok(Some(DaySpan { first, last }))
}

/// Builds the per-day index for a batch of events. Order within a day
/// follows the order of `events`.
pub fn expand(events: &[RawEvent]) -> Result<DayIndex, ExpandError> {
    expand_within(events, None)
}

/// Like [`expand`], but only days inside `window` are indexed. First-day
/// and multi-day flags still describe the whole event, so an event that
/// started before the window has no first-day occurrence.
pub fn expand_within(
    events: &[RawEvent],
    window: Option<DaySpan>,
) -> Result<DayIndex, ExpandError> {
    let mut index = DayIndex::new();

    for event in events {
        let Some(span) = day_span(event)? else {
            tracing::debug!("Skipping event {} with no start", event.id);
            continue;
        };
        let visible = match window {
            Some(window) => match span.clip(&window) {
                Some(visible) => visible,
                None => continue,
            },
            None => span,
        };

        let note = event
            .description
            .as_deref()
            .and_then(note::extract)
            .filter(|note| !note.is_empty())
            .map(str::to_string);
        let is_multi_day = span.is_multi_day();

        for day in visible.days() {
            index.push(
                day,
                ExpandedOccurrence {
                    event: event.clone(),
                    note: note.clone(),
                    is_first_day: day == span.first,
                    is_multi_day,
                },
            );
        }
    }

    Ok(index)
}
