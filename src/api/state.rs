use std::sync::Arc;

use super::session::SessionStore;
use crate::calendar::CalendarApi;
use crate::core::AppConfig;
use crate::google::{GoogleCalendar, GoogleOAuth, OAuthProvider};

pub struct AppState {
    pub sessions: SessionStore,
    pub calendar: Arc<dyn CalendarApi>,
    pub oauth: Arc<dyn OAuthProvider>,
    pub config: AppConfig,
}

impl AppState {
    pub fn new(
        config: AppConfig,
        calendar: Arc<dyn CalendarApi>,
        oauth: Arc<dyn OAuthProvider>,
    ) -> Self {
        Self {
            sessions: SessionStore::new(),
            calendar,
            oauth,
            config,
        }
    }

    /// State wired to the real Google endpoints.
    pub fn google(config: AppConfig) -> Self {
        let oauth = GoogleOAuth::new(
            &config.google_client_id,
            &config.google_client_secret,
            &config.redirect_uri,
        );
        Self::new(config, Arc::new(GoogleCalendar::default()), Arc::new(oauth))
    }
}
