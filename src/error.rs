use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::json;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, AssistantError>;

/// All errors that can occur in the assistant core.
#[derive(Debug, Error)]
pub enum AssistantError {
    /// The chat request was missing `userInput` or `city`.
    #[error("missing required parameters")]
    MissingParameters,

    /// The weather provider could not return conditions for the city.
    #[error("weather lookup failed: {0}")]
    UpstreamUnavailable(String),

    /// Transport-level failure talking to an upstream service.
    #[error("http error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("internal error: {0}")]
    Internal(String),
}

/// HTTP mapping for the chat endpoint.
///
/// Only `MissingParameters` is a caller error; every other failure is
/// collapsed into a generic 500 so upstream details never leak to clients.
/// Full detail is logged server-side before the response is built.
impl IntoResponse for AssistantError {
    fn into_response(self) -> Response {
        let (status, message) = match &self {
            AssistantError::MissingParameters => {
                (StatusCode::BAD_REQUEST, "Missing required parameters")
            }
            other => {
                tracing::error!(error = %other, "chat endpoint failure");
                (StatusCode::INTERNAL_SERVER_ERROR, "Internal Server Error")
            }
        };
        (status, Json(json!({ "error": message }))).into_response()
    }
}
