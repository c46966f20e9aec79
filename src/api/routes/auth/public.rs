//! Public types for the auth routes
use serde::{Deserialize, Serialize};

/// Query string Google appends when redirecting back to us.
#[derive(Deserialize)]
pub struct CallbackQuery {
    pub state: Option<String>,
    pub code: Option<String>,
    pub error: Option<String>,
}

#[derive(Serialize, Deserialize)]
pub struct AuthStatus {
    pub authenticated: bool,
}
