//! Google Calendar v3 REST client

use anyhow::{Result, anyhow};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use reqwest::{Client, Response};
use serde::Deserialize;
use serde::de::DeserializeOwned;

use crate::calendar::range::to_query_param;
use crate::calendar::{CalendarApi, CalendarSummary, RawEvent};

pub const CALENDAR_API_BASE: &str = "https://www.googleapis.com/calendar/v3";

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ListEventsResponse {
    #[serde(default)]
    items: Vec<RawEvent>,
    next_page_token: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct CalendarListResponse {
    #[serde(default)]
    items: Vec<CalendarSummary>,
    next_page_token: Option<String>,
}

#[derive(Clone)]
pub struct GoogleCalendar {
    client: Client,
    base_url: String,
}

impl Default for GoogleCalendar {
    fn default() -> Self {
        Self::new(CALENDAR_API_BASE)
    }
}

impl GoogleCalendar {
    pub fn new(base_url: &str) -> Self {
        Self {
            client: Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    fn events_url(&self, calendar_id: &str) -> String {
        format!(
            "{}/calendars/{}/events",
            self.base_url,
            urlencoding::encode(calendar_id)
        )
    }

    fn event_url(&self, calendar_id: &str, event_id: &str) -> String {
        format!(
            "{}/{}",
            self.events_url(calendar_id),
            urlencoding::encode(event_id)
        )
    }
}

async fn parse_response<T: DeserializeOwned>(res: Response) -> Result<T> {
    let status = res.status();
    if !status.is_success() {
        let body = res.text().await.unwrap_or_default();
        return Err(anyhow!("Google Calendar API error {}: {}", status, body));
    }
    Ok(res.json::<T>().await?)
}

#[async_trait]
impl CalendarApi for GoogleCalendar {
    async fn list_calendars(&self, access_token: &str) -> Result<Vec<CalendarSummary>> {
        let url = format!("{}/users/me/calendarList", self.base_url);
        let mut calendars = Vec::new();
        let mut page_token: Option<String> = None;

        loop {
            let mut req = self.client.get(&url).bearer_auth(access_token);
            if let Some(token) = &page_token {
                req = req.query(&[("pageToken", token)]);
            }
            let page: CalendarListResponse = parse_response(req.send().await?).await?;
            calendars.extend(page.items);

            match page.next_page_token {
                Some(token) => page_token = Some(token),
                None => break,
            }
        }

        Ok(calendars)
    }

    async fn list_events(
        &self,
        access_token: &str,
        calendar_id: &str,
        time_min: DateTime<Utc>,
        time_max: DateTime<Utc>,
    ) -> Result<Vec<RawEvent>> {
        let url = self.events_url(calendar_id);
        let time_min = to_query_param(&time_min);
        let time_max = to_query_param(&time_max);
        let mut events = Vec::new();
        let mut page_token: Option<String> = None;

        loop {
            let mut req = self.client.get(&url).bearer_auth(access_token).query(&[
                ("timeMin", time_min.as_str()),
                ("timeMax", time_max.as_str()),
                ("singleEvents", "true"),
                ("orderBy", "startTime"),
            ]);
            if let Some(token) = &page_token {
                req = req.query(&[("pageToken", token)]);
            }
            let page: ListEventsResponse = parse_response(req.send().await?).await?;
            events.extend(page.items);

            match page.next_page_token {
                Some(token) => page_token = Some(token),
                None => break,
            }
        }

        tracing::debug!("Fetched {} events from calendar {}", events.len(), calendar_id);
        Ok(events)
    }

    async fn get_event(
        &self,
        access_token: &str,
        calendar_id: &str,
        event_id: &str,
    ) -> Result<RawEvent> {
        let res = self
            .client
            .get(self.event_url(calendar_id, event_id))
            .bearer_auth(access_token)
            .send()
            .await?;
        parse_response(res).await
    }

    async fn update_event(
        &self,
        access_token: &str,
        calendar_id: &str,
        event_id: &str,
        event: &RawEvent,
    ) -> Result<()> {
        let res = self
            .client
            .put(self.event_url(calendar_id, event_id))
            .bearer_auth(access_token)
            .json(event)
            .send()
            .await?;
        let _: serde_json::Value = parse_response(res).await?;
        Ok(())
    }
}
