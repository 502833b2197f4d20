//! Error types for completion providers.

use thiserror::Error;

/// Errors that can occur while talking to a completion provider.
#[derive(Debug, Error)]
pub enum LlmError {
    /// The provider is temporarily unavailable.
    #[error("provider unavailable: {0}")]
    Unavailable(String),

    /// The request could not be delivered (DNS, TLS, connection reset).
    #[error("network error: {0}")]
    Network(String),

    /// The provider answered, but the answer could not be used.
    #[error("processing failed: {0}")]
    ProcessingFailed(String),

    /// The provider did not answer in time.
    #[error("request timed out")]
    Timeout,

    /// The provider is misconfigured (missing key, bad URL).
    #[error("configuration error: {0}")]
    Configuration(String),
}
