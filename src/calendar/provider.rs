use anyhow::Result;
use async_trait::async_trait;
use chrono::{DateTime, Utc};

use super::event::{CalendarSummary, RawEvent};

/// Calendar provider operations used by the service. Every call takes
/// the caller's access token, the provider keeps no credentials.
#[async_trait]
pub trait CalendarApi: Send + Sync {
    async fn list_calendars(&self, access_token: &str) -> Result<Vec<CalendarSummary>>;

    /// Expanded (single) events for a calendar between two instants.
    async fn list_events(
        &self,
        access_token: &str,
        calendar_id: &str,
        time_min: DateTime<Utc>,
        time_max: DateTime<Utc>,
    ) -> Result<Vec<RawEvent>>;

    async fn get_event(
        &self,
        access_token: &str,
        calendar_id: &str,
        event_id: &str,
    ) -> Result<RawEvent>;

    /// Replaces the event with `event`.
    async fn update_event(
        &self,
        access_token: &str,
        calendar_id: &str,
        event_id: &str,
        event: &RawEvent,
    ) -> Result<()>;
}
