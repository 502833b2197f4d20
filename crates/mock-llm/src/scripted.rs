//! Scripted provider - replies from a queue and records requests.

use std::collections::VecDeque;

use futures::stream;
use llm_core::{async_trait, CompletionRequest, FragmentStream, LlmError, LlmProvider};
use tokio::sync::Mutex;

/// A provider that answers from a script.
///
/// Queued replies are consumed in order; once the queue is empty every call
/// returns the default reply. Streaming splits the reply into words so
/// consumers see more than one fragment.
#[derive(Debug, Default)]
pub struct ScriptedLlm {
    queue: Mutex<VecDeque<String>>,
    default_reply: String,
    requests: Mutex<Vec<CompletionRequest>>,
}

impl ScriptedLlm {
    /// Always reply with the same text.
    pub fn always(reply: impl Into<String>) -> Self {
        Self {
            default_reply: reply.into(),
            ..Default::default()
        }
    }

    /// Reply with each entry in turn, then with `then` forever.
    pub fn sequence<I, S>(replies: I, then: impl Into<String>) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            queue: Mutex::new(replies.into_iter().map(Into::into).collect()),
            default_reply: then.into(),
            requests: Mutex::new(Vec::new()),
        }
    }

    /// Every request received so far, oldest first.
    pub async fn requests(&self) -> Vec<CompletionRequest> {
        self.requests.lock().await.clone()
    }

    /// Number of calls received so far.
    pub async fn call_count(&self) -> usize {
        self.requests.lock().await.len()
    }

    async fn next_reply(&self, request: CompletionRequest) -> String {
        self.requests.lock().await.push(request);
        self.queue
            .lock()
            .await
            .pop_front()
            .unwrap_or_else(|| self.default_reply.clone())
    }
}

#[async_trait]
impl LlmProvider for ScriptedLlm {
    async fn complete(&self, request: CompletionRequest) -> Result<String, LlmError> {
        Ok(self.next_reply(request).await)
    }

    async fn complete_streaming(
        &self,
        request: CompletionRequest,
    ) -> Result<FragmentStream, LlmError> {
        let reply = self.next_reply(request).await;
        let fragments: Vec<Result<String, LlmError>> = reply
            .split_inclusive(' ')
            .map(|word| Ok(word.to_string()))
            .collect();
        Ok(Box::pin(stream::iter(fragments)))
    }

    fn name(&self) -> &str {
        "ScriptedLlm"
    }
}
