//! HTTP error responses.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use supervisor::{LlmError, RoutingError};
use thiserror::Error;
use tracing::warn;

/// Errors returned by gateway handlers.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("unauthorized")]
    Unauthorized,

    #[error("{0}")]
    BadRequest(String),

    #[error("routing failed: {0}")]
    Routing(RoutingError),

    #[error("agent unavailable: {0}")]
    Agent(#[from] LlmError),
}

impl From<RoutingError> for ApiError {
    fn from(err: RoutingError) -> Self {
        match err {
            RoutingError::InvalidInput(message) => ApiError::BadRequest(message),
            other => ApiError::Routing(other),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message, error_type) = match &self {
            ApiError::Unauthorized => {
                warn!("Unauthorized request");
                (StatusCode::UNAUTHORIZED, "Unauthorized".to_string(), "auth_error")
            }
            ApiError::BadRequest(message) => {
                (StatusCode::BAD_REQUEST, message.clone(), "invalid_request_error")
            }
            ApiError::Routing(err) => {
                warn!(error = %err, "Routing failed");
                (
                    StatusCode::BAD_GATEWAY,
                    "We couldn't work out who should answer that right now. Please try again."
                        .to_string(),
                    "routing_error",
                )
            }
            ApiError::Agent(err) => {
                warn!(error = %err, "Agent call failed");
                (
                    StatusCode::BAD_GATEWAY,
                    "The agent is unavailable right now. Please try again.".to_string(),
                    "agent_error",
                )
            }
        };

        let body = serde_json::json!({
            "error": {
                "message": message,
                "type": error_type
            }
        });
        (status, Json(body)).into_response()
    }
}
