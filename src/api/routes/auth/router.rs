//! Router for the OAuth login flow

use std::sync::{Arc, RwLock};

use axum::{
    Json, Router,
    extract::State,
    response::{IntoResponse, Redirect},
    routing::get,
};
use axum_extra::extract::{CookieJar, Query};

use super::public;
use crate::api::public::ApiError;
use crate::api::session::{expired_session_cookie, session_cookie, session_id};
use crate::api::state::AppState;

type SharedState = Arc<RwLock<AppState>>;

/// Start the authorization code flow by sending the user to Google.
async fn login(State(state): State<SharedState>, jar: CookieJar) -> impl IntoResponse {
    let oauth_state = uuid::Uuid::new_v4().simple().to_string();

    let mut shared_state = state.write().expect("Unable to write shared state");
    let id = match session_id(&jar) {
        Some(id) if shared_state.sessions.get(&id).is_some() => id,
        _ => shared_state.sessions.create(),
    };
    if let Some(session) = shared_state.sessions.get_mut(&id) {
        session.oauth_state = Some(oauth_state.clone());
    }
    let authorization_url = shared_state.oauth.authorization_url(&oauth_state);

    (jar.add(session_cookie(id)), Redirect::to(&authorization_url))
}

async fn oauth2callback(
    State(state): State<SharedState>,
    jar: CookieJar,
    Query(params): Query<public::CallbackQuery>,
) -> Result<Redirect, ApiError> {
    let id = session_id(&jar).ok_or(ApiError::bad_request("State mismatch"))?;

    let (expected_state, oauth) = {
        let mut shared_state = state.write().expect("Unable to write shared state");
        let expected_state = shared_state
            .sessions
            .get_mut(&id)
            .and_then(|session| session.oauth_state.take());
        (expected_state, Arc::clone(&shared_state.oauth))
    };

    match (expected_state, params.state.as_deref()) {
        (Some(expected), Some(received)) if expected == received => {}
        _ => return Err(ApiError::bad_request("State mismatch")),
    }

    if let Some(error) = params.error {
        tracing::warn!("Authorization was denied: {}", error);
        return Err(ApiError::BadRequest(format!("Authorization failed: {}", error)));
    }
    let code = params
        .code
        .ok_or(ApiError::bad_request("Missing authorization code"))?;

    let credentials = oauth.exchange_code(&code).await?;
    state
        .write()
        .expect("Unable to write shared state")
        .sessions
        .set_credentials(&id, credentials);
    tracing::info!("Session {} signed in", id);

    Ok(Redirect::to("/"))
}

async fn logout(State(state): State<SharedState>, jar: CookieJar) -> (CookieJar, Redirect) {
    if let Some(id) = session_id(&jar) {
        state
            .write()
            .expect("Unable to write shared state")
            .sessions
            .remove(&id);
        tracing::info!("Session {} signed out", id);
    }
    (jar.remove(expired_session_cookie()), Redirect::to("/"))
}

async fn check_auth(State(state): State<SharedState>, jar: CookieJar) -> Json<public::AuthStatus> {
    let authenticated = session_id(&jar)
        .map(|id| {
            state
                .read()
                .expect("Unable to read shared state")
                .sessions
                .credentials(&id)
                .is_some()
        })
        .unwrap_or(false);
    Json(public::AuthStatus { authenticated })
}

/// Create the auth router, mounted at the root
pub fn router() -> Router<SharedState> {
    Router::new()
        .route("/login", get(login))
        .route("/oauth2callback", get(oauth2callback))
        .route("/logout", get(logout))
        .route("/check-auth", get(check_auth))
}
