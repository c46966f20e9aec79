use std::sync::{Arc, RwLock};

use axum_extra::extract::CookieJar;

use super::public::ApiError;
use super::session::session_id;
use crate::api::state::AppState;
use crate::calendar::CalendarApi;
use crate::google::oauth::access_token;

type SharedState = Arc<RwLock<AppState>>;

/// Resolves a usable access token for the request's session. Refreshed
/// credentials are written back to the session.
pub async fn authorize(
    state: &SharedState,
    jar: &CookieJar,
) -> Result<(Arc<dyn CalendarApi>, String), ApiError> {
    let id = session_id(jar).ok_or(ApiError::Unauthorized)?;

    let (calendar, oauth, credentials) = {
        let shared_state = state.read().expect("Unable to read shared state");
        (
            Arc::clone(&shared_state.calendar),
            Arc::clone(&shared_state.oauth),
            shared_state.sessions.credentials(&id),
        )
    };
    let credentials = credentials.ok_or(ApiError::Unauthorized)?;

    let token = access_token(oauth.as_ref(), &credentials, |fresh| {
        state
            .write()
            .expect("Unable to write shared state")
            .sessions
            .set_credentials(&id, fresh.clone());
    })
    .await?;

    Ok((calendar, token))
}
