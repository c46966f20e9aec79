//! Router for the calendar list API

use std::sync::{Arc, RwLock};

use axum::{Json, Router, extract::State};
use axum_extra::extract::CookieJar;

use super::public;
use crate::api::public::ApiError;
use crate::api::state::AppState;
use crate::api::utils::authorize;

type SharedState = Arc<RwLock<AppState>>;

async fn list_calendars(
    State(state): State<SharedState>,
    jar: CookieJar,
) -> Result<Json<Vec<public::CalendarSummary>>, ApiError> {
    let (calendar, access_token) = authorize(&state, &jar).await?;
    let calendars = calendar.list_calendars(&access_token).await?;
    Ok(Json(calendars))
}

/// Create the calendar list router
pub fn router() -> Router<SharedState> {
    Router::new().route("/", axum::routing::get(list_calendars))
}
