//! In-memory sessions keyed by a cookie

use std::collections::HashMap;

use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};
use chrono::{DateTime, Duration, Utc};

use crate::google::Credentials;

pub const SESSION_COOKIE: &str = "bigcal_session";

/// Minutes a session may wait for the OAuth callback before it is dropped
pub const PENDING_SESSION_TTL_MINUTES: i64 = 15;

/// Most sessions that may be waiting for the OAuth callback at once
pub const MAX_PENDING_SESSIONS: usize = 1000;

#[derive(Debug, Clone)]
pub struct Session {
    // CSRF state sent with the last authorization request
    pub oauth_state: Option<String>,
    pub credentials: Option<Credentials>,
    pub created_at: DateTime<Utc>,
}

impl Session {
    fn new(created_at: DateTime<Utc>) -> Self {
        Self {
            oauth_state: None,
            credentials: None,
            created_at,
        }
    }

    /// Not signed in yet.
    pub fn is_pending(&self) -> bool {
        self.credentials.is_none()
    }
}

#[derive(Debug, Default)]
pub struct SessionStore {
    sessions: HashMap<String, Session>,
}

impl SessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an empty session and returns its id. Stale pending
    /// sessions are dropped first.
    pub fn create(&mut self) -> String {
        self.create_at(Utc::now())
    }

    fn create_at(&mut self, now: DateTime<Utc>) -> String {
        self.prune(now);
        let id = uuid::Uuid::new_v4().simple().to_string();
        self.sessions.insert(id.clone(), Session::new(now));
        id
    }

    /// Drops pending sessions older than the TTL, then the oldest pending
    /// ones until there is room for one more. Signed-in sessions are kept
    /// until logout.
    fn prune(&mut self, now: DateTime<Utc>) {
        let cutoff = now - Duration::minutes(PENDING_SESSION_TTL_MINUTES);
        self.sessions
            .retain(|_, session| !session.is_pending() || session.created_at > cutoff);

        let mut pending: Vec<(DateTime<Utc>, String)> = self
            .sessions
            .iter()
            .filter(|(_, session)| session.is_pending())
            .map(|(id, session)| (session.created_at, id.clone()))
            .collect();
        if pending.len() < MAX_PENDING_SESSIONS {
            return;
        }

        pending.sort();
        let excess = pending.len() + 1 - MAX_PENDING_SESSIONS;
        tracing::debug!("Evicting {} pending sessions", excess);
        for (_, id) in pending.into_iter().take(excess) {
            self.sessions.remove(&id);
        }
    }

    pub fn get(&self, id: &str) -> Option<&Session> {
        self.sessions.get(id)
    }

    pub fn get_mut(&mut self, id: &str) -> Option<&mut Session> {
        self.sessions.get_mut(id)
    }

    pub fn credentials(&self, id: &str) -> Option<Credentials> {
        self.get(id).and_then(|s| s.credentials.clone())
    }

    pub fn set_credentials(&mut self, id: &str, credentials: Credentials) {
        self.sessions
            .entry(id.to_string())
            .or_insert_with(|| Session::new(Utc::now()))
            .credentials = Some(credentials);
    }

    pub fn remove(&mut self, id: &str) -> Option<Session> {
        self.sessions.remove(id)
    }

    pub fn len(&self) -> usize {
        self.sessions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sessions.is_empty()
    }
}

/// Session id from the request cookie, if any.
pub fn session_id(jar: &CookieJar) -> Option<String> {
    jar.get(SESSION_COOKIE).map(|c| c.value().to_string())
}

pub fn session_cookie(id: String) -> Cookie<'static> {
    Cookie::build((SESSION_COOKIE, id))
        .path("/")
        .http_only(true)
        .same_site(SameSite::Lax)
        .build()
}

/// Cookie that tells the browser to forget the session id.
pub fn expired_session_cookie() -> Cookie<'static> {
    Cookie::build((SESSION_COOKIE, "")).path("/").build()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn creds() -> Credentials {
        Credentials {
            access_token: "a".to_string(),
            refresh_token: None,
            expires_at: None,
            scopes: vec![],
        }
    }

    #[test]
    fn it_creates_unique_sessions() {
        let mut store = SessionStore::new();
        let a = store.create();
        let b = store.create();
        assert_ne!(a, b);
        assert_eq!(store.len(), 2);
        assert!(store.credentials(&a).is_none());
    }

    #[test]
    fn it_sets_and_removes_sessions() {
        let mut store = SessionStore::new();
        let id = store.create();
        store.set_credentials(&id, creds());
        assert_eq!(store.credentials(&id), Some(creds()));
        assert!(!store.get(&id).unwrap().is_pending());
        assert!(store.remove(&id).is_some());
        assert!(store.get(&id).is_none());
        assert!(store.is_empty());
    }

    #[test]
    fn it_expires_sessions_that_never_sign_in() {
        let mut store = SessionStore::new();
        let now = Utc::now();
        let stale = store.create_at(now - Duration::minutes(PENDING_SESSION_TTL_MINUTES + 5));
        let signed_in = store.create_at(now - Duration::minutes(PENDING_SESSION_TTL_MINUTES + 5));
        store.set_credentials(&signed_in, creds());
        let recent = store.create_at(now - Duration::minutes(1));

        let fresh = store.create_at(now);

        assert!(store.get(&stale).is_none());
        assert!(store.get(&signed_in).is_some());
        assert!(store.get(&recent).is_some());
        assert!(store.get(&fresh).is_some());
        assert_eq!(store.len(), 3);
    }

    #[test]
    fn it_caps_pending_sessions() {
        let mut store = SessionStore::new();
        let signed_in = store.create();
        store.set_credentials(&signed_in, creds());

        let mut last = String::new();
        for _ in 0..10_000 {
            last = store.create();
        }

        assert_eq!(store.len(), MAX_PENDING_SESSIONS + 1);
        assert!(store.get(&last).is_some());
        assert!(store.get(&signed_in).is_some());
    }

    #[test]
    fn it_evicts_the_oldest_pending_session_first() {
        let mut store = SessionStore::new();
        let now = Utc::now();
        let oldest = store.create_at(now - Duration::minutes(10));
        for i in 1..MAX_PENDING_SESSIONS {
            store.create_at(now - Duration::seconds(i as i64));
        }
        assert_eq!(store.len(), MAX_PENDING_SESSIONS);

        store.create_at(now);
        assert_eq!(store.len(), MAX_PENDING_SESSIONS);
        assert!(store.get(&oldest).is_none());
    }
}
