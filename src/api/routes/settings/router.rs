//! Router for the client config API

use std::sync::{Arc, RwLock};

use axum::{Json, Router, extract::State};

use super::public;
use crate::api::state::AppState;

type SharedState = Arc<RwLock<AppState>>;

async fn client_config(State(state): State<SharedState>) -> Json<public::ClientConfig> {
    let shared_state = state.read().expect("Unable to read shared state");
    Json(public::ClientConfig {
        title: shared_state.config.app_title.clone(),
        default_year: shared_state.config.default_year,
    })
}

/// Create the client config router
pub fn router() -> Router<SharedState> {
    Router::new().route("/", axum::routing::get(client_config))
}
