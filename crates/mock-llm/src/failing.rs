//! Failing provider - every call errors.

use llm_core::{async_trait, CompletionRequest, LlmError, LlmProvider};

/// Which error a [`FailingLlm`] produces.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureKind {
    Network,
    Unavailable,
    Timeout,
}

/// A provider whose calls always fail.
///
/// Useful for checking that availability failures propagate instead of
/// being silently defaulted.
#[derive(Debug, Clone, Copy)]
pub struct FailingLlm {
    kind: FailureKind,
}

impl FailingLlm {
    /// Create a provider failing with the given kind of error.
    pub fn new(kind: FailureKind) -> Self {
        Self { kind }
    }

    /// Fail with a network error.
    pub fn network() -> Self {
        Self::new(FailureKind::Network)
    }

    /// Fail as if the provider were down.
    pub fn unavailable() -> Self {
        Self::new(FailureKind::Unavailable)
    }

    /// Fail with a provider-side timeout.
    pub fn timeout() -> Self {
        Self::new(FailureKind::Timeout)
    }

    fn error(&self) -> LlmError {
        match self.kind {
            FailureKind::Network => LlmError::Network("connection reset by peer".to_string()),
            FailureKind::Unavailable => LlmError::Unavailable("503 service unavailable".to_string()),
            FailureKind::Timeout => LlmError::Timeout,
        }
    }
}

#[async_trait]
impl LlmProvider for FailingLlm {
    async fn complete(&self, _request: CompletionRequest) -> Result<String, LlmError> {
        Err(self.error())
    }

    fn name(&self) -> &str {
        "FailingLlm"
    }

    async fn is_ready(&self) -> bool {
        false
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_failure_kinds() {
        let request = CompletionRequest::prompt("x");

        let err = FailingLlm::network().complete(request.clone()).await.unwrap_err();
        assert!(matches!(err, LlmError::Network(_)));

        let err = FailingLlm::unavailable().complete(request.clone()).await.unwrap_err();
        assert!(matches!(err, LlmError::Unavailable(_)));

        let err = FailingLlm::timeout().complete(request.clone()).await.unwrap_err();
        assert!(matches!(err, LlmError::Timeout));

        // Streaming goes through complete() by default and fails the same way
        assert!(FailingLlm::network().complete_streaming(request).await.is_err());
        assert!(!FailingLlm::network().is_ready().await);
    }
}
