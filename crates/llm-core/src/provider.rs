//! Completion provider trait.

use async_trait::async_trait;
use futures::stream::{self, BoxStream};

use crate::error::LlmError;
use crate::message::{ConversationTurn, Role};

/// A stream of text fragments produced by a streaming completion.
pub type FragmentStream = BoxStream<'static, Result<String, LlmError>>;

/// A single completion request.
///
/// The routing core only ever sends one user prompt; agent execution adds a
/// system prompt and the prior conversation.
#[derive(Debug, Clone, PartialEq)]
pub struct CompletionRequest {
    /// Optional system prompt sent ahead of the messages.
    pub system_prompt: Option<String>,
    /// Chronological messages; the last one is the prompt being answered.
    pub messages: Vec<ConversationTurn>,
    /// Sampling temperature.
    pub temperature: Option<f32>,
    /// Maximum tokens to generate.
    pub max_tokens: Option<u32>,
}

impl CompletionRequest {
    /// Create a request consisting of a single user prompt.
    pub fn prompt(text: impl Into<String>) -> Self {
        Self {
            system_prompt: None,
            messages: vec![ConversationTurn::user(text)],
            temperature: None,
            max_tokens: None,
        }
    }

    /// Create a request from a system prompt and a conversation.
    pub fn chat(system_prompt: impl Into<String>, messages: Vec<ConversationTurn>) -> Self {
        Self {
            system_prompt: Some(system_prompt.into()),
            messages,
            temperature: None,
            max_tokens: None,
        }
    }

    /// Set the sampling temperature.
    pub fn with_temperature(mut self, temperature: f32) -> Self {
        self.temperature = Some(temperature);
        self
    }

    /// Set the maximum number of tokens to generate.
    pub fn with_max_tokens(mut self, max_tokens: u32) -> Self {
        self.max_tokens = Some(max_tokens);
        self
    }

    /// Text of the most recent user message, if any.
    pub fn last_user_text(&self) -> Option<&str> {
        self.messages
            .iter()
            .rev()
            .find(|turn| turn.role == Role::User)
            .map(|turn| turn.content.as_str())
    }
}

/// A language-model completion capability.
///
/// Implementations must be safe for concurrent use: one instance is shared by
/// every in-flight routing call.
#[async_trait]
pub trait LlmProvider: Send + Sync {
    /// Run a single completion and return the generated text.
    async fn complete(&self, request: CompletionRequest) -> Result<String, LlmError>;

    /// Run a completion and yield the generated text as it arrives.
    ///
    /// Providers without native streaming yield the full completion as one
    /// fragment.
    async fn complete_streaming(
        &self,
        request: CompletionRequest,
    ) -> Result<FragmentStream, LlmError> {
        let text = self.complete(request).await?;
        Ok(Box::pin(stream::once(async move { Ok(text) })))
    }

    /// Provider name for logging.
    fn name(&self) -> &str;

    /// Whether the provider is ready to accept requests.
    async fn is_ready(&self) -> bool {
        true
    }
}
