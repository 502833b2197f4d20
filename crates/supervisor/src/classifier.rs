//! Domain classification via a single LLM completion.

use std::sync::Arc;
use std::time::Duration;

use llm_core::{hash_prompt, CompletionRequest, ConversationTurn, LlmProvider};
use tokio::time::timeout;
use tracing::{debug, info, trace, warn};

use crate::config::SupervisorConfig;
use crate::domain::Domain;
use crate::error::ClassificationError;

/// Disambiguation rules appended after the domain definitions.
///
/// This is the only place tie-breaks between domains are defined.
const GUIDELINES: &str = r#"GUIDELINES:
- "Top stocks" or "stock price" -> finance
- Ticker symbols, market cap, portfolio or currency questions -> finance
- "Top tech companies" (general) -> research
- "History of Apple" -> research
- "Apple stock analysis" -> finance
- News summaries, "who is" / "what is" and technology explanations -> research
- If the query is ambiguous or falls between categories, prioritize 'research'."#;

const ANSWER_INSTRUCTION: &str =
    "Respond with ONLY the domain name (one word, lowercase). Do not add punctuation or explanation.";

/// Outcome of one classification.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Classification {
    /// Domain the turn is routed to.
    pub domain: Domain,
    /// Raw model output, before normalisation.
    pub raw: String,
    /// True when `raw` was not a registered domain and the default was used.
    pub fallback_applied: bool,
}

/// Maps free text to exactly one [`Domain`].
///
/// Stateless apart from the shared provider; safe to call concurrently.
pub struct Classifier {
    llm: Arc<dyn LlmProvider>,
    temperature: f32,
    max_tokens: u32,
    timeout: Duration,
    history_turns: usize,
    prompt_hash: String,
}

impl Classifier {
    /// Create a classifier over the given provider.
    pub fn new(llm: Arc<dyn LlmProvider>, config: &SupervisorConfig) -> Self {
        let prompt_hash = hash_prompt(&Self::instructions());
        info!(
            provider = llm.name(),
            prompt_hash = %prompt_hash,
            "Classifier prompt fingerprint"
        );

        Self {
            llm,
            temperature: config.classifier_temperature,
            max_tokens: config.classifier_max_tokens,
            timeout: config.classify_timeout,
            history_turns: config.history_turns,
            prompt_hash,
        }
    }

    /// Fingerprint of the fixed part of the prompt.
    pub fn prompt_hash(&self) -> &str {
        &self.prompt_hash
    }

    /// Classify `message`, using the tail of `history` as context.
    ///
    /// `history` holds the turns *before* `message`, oldest first.
    pub async fn classify(
        &self,
        message: &str,
        history: &[ConversationTurn],
    ) -> Result<Classification, ClassificationError> {
        let prompt = Self::build_prompt(message, history, self.history_turns);
        trace!(prompt = %prompt, "CLASSIFIER_PROMPT");

        let request = CompletionRequest::prompt(prompt)
            .with_temperature(self.temperature)
            .with_max_tokens(self.max_tokens);

        let raw = match timeout(self.timeout, self.llm.complete(request)).await {
            Ok(Ok(raw)) => raw,
            Ok(Err(e)) => {
                warn!(error = %e, "CLASSIFIER_PROVIDER_ERROR");
                return Err(ClassificationError::Provider(e));
            }
            Err(_) => {
                warn!(timeout = ?self.timeout, "CLASSIFIER_TIMEOUT");
                return Err(ClassificationError::Timeout(self.timeout));
            }
        };

        trace!(raw_response = %raw, "CLASSIFIER_RAW_RESPONSE");

        if raw.trim().is_empty() {
            warn!("CLASSIFIER_EMPTY_RESPONSE");
            return Err(ClassificationError::EmptyResponse);
        }

        let (domain, fallback_applied) = parse_label(&raw);
        if fallback_applied {
            warn!(raw_label = %raw.trim(), fallback = %domain, "CLASSIFIER_LABEL_FALLBACK");
        } else {
            debug!(domain = %domain, "Classified message");
        }

        Ok(Classification {
            domain,
            raw,
            fallback_applied,
        })
    }

    /// The prompt preamble: role, domain list, definitions and guidelines.
    pub fn instructions() -> String {
        let definitions = Domain::ALL
            .iter()
            .map(|domain| format!("- {}: {}", domain.as_str(), domain.description()))
            .collect::<Vec<_>>()
            .join("\n");

        format!(
            "You are the Supervisor Agent responsible for routing user queries to the most \
             appropriate specialized agent.\n\n\
             Analyze the user query and classify it into PRECISELY one of these domains:\n\
             {}\n\n\
             DOMAIN DEFINITIONS:\n{}\n\n{}",
            Domain::list(),
            definitions,
            GUIDELINES
        )
    }

    /// Build the full classification prompt.
    ///
    /// The query always comes last, after at most `history_turns` prior turns.
    pub fn build_prompt(message: &str, history: &[ConversationTurn], history_turns: usize) -> String {
        let mut parts = vec![Self::instructions()];

        let recent = &history[history.len().saturating_sub(history_turns)..];
        if !recent.is_empty() {
            let lines = recent
                .iter()
                .map(|turn| {
                    format!("{}: {}", turn.role.as_str(), strip_blank_lines(&turn.content))
                })
                .collect::<Vec<_>>()
                .join("\n");
            parts.push(format!("RECENT CONVERSATION (context only):\n{}", lines));
        }

        parts.push(format!("User Query: {}", strip_blank_lines(message)));
        parts.push(ANSWER_INSTRUCTION.to_string());

        parts.join("\n\n")
    }
}

/// Normalise a model answer into a domain.
///
/// Lower-cases and trims, then requires an exact match; anything else maps
/// to [`Domain::DEFAULT`] with the fallback flag set.
pub fn parse_label(raw: &str) -> (Domain, bool) {
    match raw.trim().to_lowercase().parse::<Domain>() {
        Ok(domain) => (domain, false),
        Err(_) => (Domain::DEFAULT, true),
    }
}

// Blank lines delimit prompt sections; everything else is kept verbatim.
fn strip_blank_lines(text: &str) -> String {
    text.lines()
        .filter(|line| !line.trim().is_empty())
        .collect::<Vec<_>>()
        .join("\n")
}
