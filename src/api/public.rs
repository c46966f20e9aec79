//! Public API types

use axum::Json;
use axum::response::{IntoResponse, Response};
use http::StatusCode;

// Errors

pub enum ApiError {
    Unauthorized,
    BadRequest(String),
    /// Server-side failure reported with a fixed message
    Failed(String),
    Internal(anyhow::Error),
}

impl ApiError {
    pub fn bad_request(message: &str) -> Self {
        Self::BadRequest(message.to_string())
    }
}

/// Convert `ApiError` into an Axum compatible response.
impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            ApiError::Unauthorized => (StatusCode::UNAUTHORIZED, "Not authenticated".to_string()),
            ApiError::BadRequest(message) => (StatusCode::BAD_REQUEST, message),
            ApiError::Failed(message) => (StatusCode::INTERNAL_SERVER_ERROR, message),
            ApiError::Internal(err) => {
                // Always log the error
                tracing::error!("{:#}", err);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    format!("Something went wrong: {}", err),
                )
            }
        };

        (status, Json(serde_json::json!({ "error": message }))).into_response()
    }
}

/// Enables using `?` on functions that return `Result<_,
/// anyhow::Error>` to turn them into `Result<_, ApiError>`
impl<E> From<E> for ApiError
where
    E: Into<anyhow::Error>,
{
    fn from(err: E) -> Self {
        Self::Internal(err.into())
    }
}

// Re-export public types from each route

pub mod auth {
    pub use crate::api::routes::auth::public::*;
}

pub mod calendars {
    pub use crate::api::routes::calendars::public::*;
}

pub mod events {
    pub use crate::api::routes::events::public::*;
}

pub mod settings {
    pub use crate::api::routes::settings::public::*;
}
