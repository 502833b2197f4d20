//! Error types for routing and summarization.

use std::time::Duration;

use llm_core::LlmError;
use thiserror::Error;

/// Errors surfaced by [`Supervisor::route`](crate::Supervisor::route).
///
/// This is the ceiling for routing failures: nothing below it escapes in
/// another shape.
#[derive(Debug, Error)]
pub enum RoutingError {
    /// Empty message or missing user id. Rejected before any network call.
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// The classification call itself failed.
    #[error("classification failed: {0}")]
    Classification(#[from] ClassificationError),

    /// Domain registry and router terminals disagree.
    #[error("registry mismatch: {0}")]
    Registry(String),
}

/// The classifier could not obtain a label from the provider.
///
/// A label that *was* returned but is not a known domain is not an error;
/// it falls back to the default domain.
#[derive(Debug, Error)]
pub enum ClassificationError {
    #[error("provider error: {0}")]
    Provider(#[from] LlmError),

    #[error("timed out after {0:?}")]
    Timeout(Duration),

    #[error("provider returned an empty response")]
    EmptyResponse,
}

/// Summarization failed. Never escapes [`ResponseComposer::compose`](crate::ResponseComposer::compose).
#[derive(Debug, Error)]
pub enum SummarizationError {
    #[error("nothing to summarize")]
    EmptyInput,

    #[error("provider error: {0}")]
    Provider(#[from] LlmError),

    #[error("timed out after {0:?}")]
    Timeout(Duration),

    #[error("provider returned an empty summary")]
    EmptyResponse,
}
