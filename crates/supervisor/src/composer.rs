//! Response summarization with a deterministic truncation fallback.

use std::sync::Arc;
use std::time::Duration;

use llm_core::{CompletionRequest, ConversationTurn, LlmProvider};
use serde::{Deserialize, Serialize};
use tokio::time::timeout;
use tracing::{debug, warn};

use crate::config::SupervisorConfig;
use crate::error::SummarizationError;

const SUMMARY_SYSTEM_PROMPT: &str = "You condense assistant answers for text-to-speech. \
Restate the answer in two or three short, plain sentences. Keep names, numbers and \
recommendations. No markdown, lists or emojis.";

/// How a [`Summary`] was produced.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SummarySource {
    Summarized,
    Truncated,
}

/// Text handed to downstream speech/avatar rendering.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Summary {
    pub text: String,
    pub source: SummarySource,
}

/// Shortens agent output via a second completion call.
pub struct ResponseComposer {
    llm: Arc<dyn LlmProvider>,
    temperature: f32,
    max_tokens: u32,
    timeout: Duration,
    fallback_chars: usize,
}

impl ResponseComposer {
    pub fn new(llm: Arc<dyn LlmProvider>, config: &SupervisorConfig) -> Self {
        Self {
            llm,
            temperature: config.summary_temperature,
            max_tokens: config.summary_max_tokens,
            timeout: config.summary_timeout,
            fallback_chars: config.summary_fallback_chars,
        }
    }

    /// Ask the provider for a concise restatement of `text`.
    pub async fn summarize(&self, text: &str) -> Result<String, SummarizationError> {
        let text = text.trim();
        if text.is_empty() {
            return Err(SummarizationError::EmptyInput);
        }

        let request = CompletionRequest::chat(
            SUMMARY_SYSTEM_PROMPT,
            vec![ConversationTurn::user(text)],
        )
        .with_temperature(self.temperature)
        .with_max_tokens(self.max_tokens);

        let summary = timeout(self.timeout, self.llm.complete(request))
            .await
            .map_err(|_| SummarizationError::Timeout(self.timeout))??;

        let summary = summary.trim();
        if summary.is_empty() {
            return Err(SummarizationError::EmptyResponse);
        }

        Ok(summary.to_string())
    }

    /// Summarize, or fall back to the first characters of `text`.
    ///
    /// Never fails.
    pub async fn compose(&self, text: &str) -> Summary {
        match self.summarize(text).await {
            Ok(summary) => {
                debug!(chars = summary.chars().count(), "Summarized response");
                Summary {
                    text: summary,
                    source: SummarySource::Summarized,
                }
            }
            Err(e) => {
                warn!(error = %e, "SUMMARY_FALLBACK");
                Summary {
                    text: truncate(text, self.fallback_chars),
                    source: SummarySource::Truncated,
                }
            }
        }
    }
}

/// First `max_chars` characters of `text`, never splitting a character.
pub fn truncate(text: &str, max_chars: usize) -> String {
    match text.char_indices().nth(max_chars) {
        Some((end, _)) => text[..end].to_string(),
        None => text.to_string(),
    }
}
