use anyhow::Result;

use super::event::{DayIndex, RawEvent};
use super::{CalendarApi, expand_within, note, year_bounds, year_days};

/// Fetches every event in `year` from each calendar and groups them by
/// day. Calendars are queried in the order given. Events that run past
/// the year only contribute their days inside it.
pub async fn events_for_year(
    api: &dyn CalendarApi,
    access_token: &str,
    year: i32,
    calendar_ids: &[String],
) -> Result<DayIndex> {
    let (time_min, time_max) = year_bounds(year)?;

    let mut all_events: Vec<RawEvent> = Vec::new();
    for calendar_id in calendar_ids {
        let events = api
            .list_events(access_token, calendar_id, time_min, time_max)
            .await?;
        all_events.extend(events.into_iter().map(|mut event| {
            event.calendar_id = Some(calendar_id.clone());
            event
        }));
    }

    let index = expand_within(&all_events, Some(year_days(year)?))?;
    tracing::debug!(
        "Expanded {} events for {} into {} days",
        all_events.len(),
        year,
        index.len()
    );
    Ok(index)
}

/// Rewrites the note region of an event's description and saves the
/// event. Returns the updated description.
pub async fn update_event_note(
    api: &dyn CalendarApi,
    access_token: &str,
    calendar_id: &str,
    event_id: &str,
    note_text: &str,
) -> Result<String> {
    let mut event = api.get_event(access_token, calendar_id, event_id).await?;

    let description = note::embed(event.description.as_deref().unwrap_or_default(), note_text);
    event.description = Some(description.clone());

    api.update_event(access_token, calendar_id, event_id, &event)
        .await?;
    tracing::info!("Updated note on event {} in {}", event_id, calendar_id);

    Ok(description)
}
