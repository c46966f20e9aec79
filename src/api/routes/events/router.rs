//! Router for the events API

use std::sync::{Arc, RwLock};

use axum::{
    Json, Router,
    extract::{Path, State, rejection::JsonRejection},
    routing::{get, put},
};
use axum_extra::extract::{CookieJar, Query};

use super::public;
use crate::api::public::ApiError;
use crate::api::state::AppState;
use crate::api::utils::authorize;
use crate::calendar::service::{events_for_year, update_event_note};

type SharedState = Arc<RwLock<AppState>>;

/// Events for a year across the requested calendars, grouped by day.
async fn list_events(
    State(state): State<SharedState>,
    jar: CookieJar,
    Query(params): Query<public::EventsQuery>,
) -> Result<Json<public::DayIndex>, ApiError> {
    let (calendar, access_token) = authorize(&state, &jar).await?;

    let year = match params.year {
        Some(year) => year
            .trim()
            .parse::<i32>()
            .map_err(|_| ApiError::bad_request("Invalid year parameter"))?,
        None => state
            .read()
            .expect("Unable to read shared state")
            .config
            .default_year,
    };

    if params.calendar_id.is_empty() {
        return Err(ApiError::bad_request("No calendar IDs provided"));
    }

    let index = events_for_year(calendar.as_ref(), &access_token, year, &params.calendar_id).await?;
    Ok(Json(index))
}

async fn update_note(
    State(state): State<SharedState>,
    jar: CookieJar,
    Path(event_id): Path<String>,
    Query(params): Query<public::NoteQuery>,
    body: Result<Json<public::NoteUpdate>, JsonRejection>,
) -> Result<Json<public::NoteUpdated>, ApiError> {
    let (calendar, access_token) = authorize(&state, &jar).await?;

    let Json(payload) = body.map_err(|_| ApiError::bad_request("Note data is required"))?;
    let calendar_id = params
        .calendar_id
        .filter(|id| !id.is_empty())
        .ok_or(ApiError::bad_request("Calendar ID is required"))?;

    if let Err(err) = update_event_note(
        calendar.as_ref(),
        &access_token,
        &calendar_id,
        &event_id,
        &payload.note,
    )
    .await
    {
        tracing::error!("Error updating event note: {:#}", err);
        return Err(ApiError::Failed("Failed to update event note".to_string()));
    }

    Ok(Json(public::NoteUpdated { success: true }))
}

/// Create the events router
pub fn router() -> Router<SharedState> {
    Router::new()
        .route("/", get(list_events))
        .route("/{event_id}/note", put(update_note))
}
