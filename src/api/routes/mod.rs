//! API routes module

pub mod auth;
pub mod calendars;
pub mod events;
pub mod settings;

use std::sync::{Arc, RwLock};

use crate::api::state::AppState;
use axum::Router;

type SharedState = Arc<RwLock<AppState>>;

/// Create the combined API router
pub fn router() -> Router<SharedState> {
    Router::new()
        // Client config for the frontend
        .nest("/config", settings::router())
        // Calendar list routes
        .nest("/calendars", calendars::router())
        // Event and note routes
        .nest("/events", events::router())
}
