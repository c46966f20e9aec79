//! Test utilities for integration tests
#![allow(dead_code)]

use std::sync::{Arc, Mutex, RwLock};

use anyhow::{Result, anyhow};
use async_trait::async_trait;
use axum::{Router, body::Body};
use chrono::{DateTime, Duration, Utc};

use bigcal::api::AppState;
use bigcal::api::app;
use bigcal::api::session::SESSION_COOKIE;
use bigcal::calendar::{CalendarApi, CalendarSummary, RawEvent};
use bigcal::core::AppConfig;
use bigcal::google::{Credentials, OAuthProvider};

pub type SharedState = Arc<RwLock<AppState>>;

/// Calendar provider backed by canned events. Updates are recorded and
/// applied so a later `get_event` sees them.
#[derive(Default)]
pub struct MockCalendar {
    // (calendar id, event)
    pub events: Mutex<Vec<(String, RawEvent)>>,
    pub updates: Mutex<Vec<(String, String, RawEvent)>>,
    pub tokens_seen: Mutex<Vec<String>>,
    pub fail_updates: bool,
}

impl MockCalendar {
    pub fn with_events(events: Vec<(&str, serde_json::Value)>) -> Self {
        let events = events
            .into_iter()
            .map(|(calendar_id, v)| (calendar_id.to_string(), serde_json::from_value(v).unwrap()))
            .collect();
        Self {
            events: Mutex::new(events),
            ..Default::default()
        }
    }

    pub fn failing_updates(mut self) -> Self {
        self.fail_updates = true;
        self
    }
}

#[async_trait]
impl CalendarApi for MockCalendar {
    async fn list_calendars(&self, access_token: &str) -> Result<Vec<CalendarSummary>> {
        self.tokens_seen.lock().unwrap().push(access_token.to_string());
        Ok(vec![CalendarSummary {
            id: "primary".to_string(),
            summary: "Me".to_string(),
            background_color: "#4285F4".to_string(),
            foreground_color: "#FFFFFF".to_string(),
            selected: true,
        }])
    }

    async fn list_events(
        &self,
        access_token: &str,
        calendar_id: &str,
        _time_min: DateTime<Utc>,
        _time_max: DateTime<Utc>,
    ) -> Result<Vec<RawEvent>> {
        self.tokens_seen.lock().unwrap().push(access_token.to_string());
        Ok(self
            .events
            .lock()
            .unwrap()
            .iter()
            .filter(|(cal, _)| cal == calendar_id)
            .map(|(_, e)| e.clone())
            .collect())
    }

    async fn get_event(
        &self,
        _access_token: &str,
        calendar_id: &str,
        event_id: &str,
    ) -> Result<RawEvent> {
        self.events
            .lock()
            .unwrap()
            .iter()
            .find(|(cal, e)| cal == calendar_id && e.id == event_id)
            .map(|(_, e)| e.clone())
            .ok_or(anyhow!("Event {} not found", event_id))
    }

    async fn update_event(
        &self,
        _access_token: &str,
        calendar_id: &str,
        event_id: &str,
        event: &RawEvent,
    ) -> Result<()> {
        if self.fail_updates {
            return Err(anyhow!("Google Calendar API error 403 Forbidden"));
        }
        self.updates.lock().unwrap().push((
            calendar_id.to_string(),
            event_id.to_string(),
            event.clone(),
        ));
        let mut events = self.events.lock().unwrap();
        if let Some((_, existing)) = events
            .iter_mut()
            .find(|(cal, e)| cal == calendar_id && e.id == event_id)
        {
            *existing = event.clone();
        }
        Ok(())
    }
}

/// OAuth provider that hands out fixed tokens.
pub struct MockOAuth;

#[async_trait]
impl OAuthProvider for MockOAuth {
    fn authorization_url(&self, state: &str) -> String {
        format!("https://accounts.example.test/auth?state={}", state)
    }

    async fn exchange_code(&self, code: &str) -> Result<Credentials> {
        if code != "good_code" {
            return Err(anyhow!("invalid_grant"));
        }
        Ok(Credentials {
            access_token: "exchanged_token".to_string(),
            refresh_token: Some("refresh".to_string()),
            expires_at: Some(Utc::now() + Duration::hours(1)),
            scopes: vec![],
        })
    }

    async fn refresh(&self, credentials: &Credentials) -> Result<Credentials> {
        Ok(Credentials {
            access_token: "refreshed_token".to_string(),
            expires_at: Some(Utc::now() + Duration::hours(1)),
            ..credentials.clone()
        })
    }
}

pub fn test_config() -> AppConfig {
    AppConfig {
        google_client_id: String::from("test-client-id"),
        google_client_secret: String::from("test-client-secret"),
        redirect_uri: String::from("http://localhost:5000/oauth2callback"),
        app_title: String::from("Test Calendar"),
        default_year: 2025,
        static_path: std::env::temp_dir().display().to_string(),
        debug: false,
    }
}

/// Creates a test application router and its shared state.
pub fn test_app_with(calendar: Arc<MockCalendar>) -> (Router, SharedState) {
    let app_state = AppState::new(test_config(), calendar, Arc::new(MockOAuth));
    let state = Arc::new(RwLock::new(app_state));
    (app(Arc::clone(&state)), state)
}

pub fn test_app() -> Router {
    test_app_with(Arc::new(MockCalendar::default())).0
}

/// Seeds a signed-in session and returns the cookie header value.
pub fn sign_in(state: &SharedState, credentials: Credentials) -> String {
    let mut shared_state = state.write().unwrap();
    let id = shared_state.sessions.create();
    shared_state.sessions.set_credentials(&id, credentials);
    format!("{}={}", SESSION_COOKIE, id)
}

pub fn valid_credentials() -> Credentials {
    Credentials {
        access_token: "valid_token".to_string(),
        refresh_token: Some("refresh".to_string()),
        expires_at: Some(Utc::now() + Duration::hours(1)),
        scopes: vec![],
    }
}

pub async fn body_to_string(body: Body) -> String {
    let bytes = axum::body::to_bytes(body, usize::MAX).await.unwrap();
    String::from_utf8(bytes.to_vec()).unwrap()
}

pub async fn body_to_json(body: Body) -> serde_json::Value {
    serde_json::from_str(&body_to_string(body).await).unwrap()
}
