//! Delayed provider - wraps another provider with artificial latency.

use std::time::Duration;

use llm_core::{async_trait, CompletionRequest, FragmentStream, LlmError, LlmProvider};
use tokio::time::sleep;

/// A provider that waits before delegating to an inner provider.
///
/// Useful for exercising caller-side timeouts and concurrent routing.
pub struct DelayedLlm<L: LlmProvider> {
    inner: L,
    delay: Duration,
}

impl<L: LlmProvider> DelayedLlm<L> {
    /// Wrap `inner` with the given delay.
    pub fn new(inner: L, delay: Duration) -> Self {
        Self { inner, delay }
    }

    /// Wrap `inner` with a delay in milliseconds.
    pub fn with_millis(inner: L, millis: u64) -> Self {
        Self::new(inner, Duration::from_millis(millis))
    }

    /// The wrapped provider.
    pub fn inner(&self) -> &L {
        &self.inner
    }
}

#[async_trait]
impl<L: LlmProvider> LlmProvider for DelayedLlm<L> {
    async fn complete(&self, request: CompletionRequest) -> Result<String, LlmError> {
        sleep(self.delay).await;
        self.inner.complete(request).await
    }

    async fn complete_streaming(
        &self,
        request: CompletionRequest,
    ) -> Result<FragmentStream, LlmError> {
        sleep(self.delay).await;
        self.inner.complete_streaming(request).await
    }

    fn name(&self) -> &str {
        "DelayedLlm"
    }

    async fn is_ready(&self) -> bool {
        self.inner.is_ready().await
    }
}
