//! CerebrasLlm implementation of [`LlmProvider`].

use futures::stream::{self, StreamExt};
use llm_core::{async_trait, CompletionRequest, FragmentStream, LlmError, LlmProvider};
use reqwest::{Client, StatusCode};
use reqwest_eventsource::{Event, EventSource, RequestBuilderExt};
use tracing::{debug, error, info, warn};

use crate::api_types::{
    ApiError, ChatCompletionChunk, ChatCompletionRequest, ChatCompletionResponse, ChatMessage,
};
use crate::config::CerebrasConfig;

/// Marker the provider sends as the final SSE payload.
const DONE_MARKER: &str = "[DONE]";

/// A completion provider backed by the Cerebras chat-completions API.
pub struct CerebrasLlm {
    client: Client,
    stream_client: Client,
    config: CerebrasConfig,
}

impl CerebrasLlm {
    /// Create a new CerebrasLlm with the given configuration.
    pub fn new(config: CerebrasConfig) -> Result<Self, LlmError> {
        if config.api_key.trim().is_empty() {
            return Err(LlmError::Configuration("Cerebras API key is empty".to_string()));
        }

        let client = Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| LlmError::Configuration(format!("Failed to create HTTP client: {}", e)))?;

        // Streams are long-lived; only the per-call timeout set by the caller applies.
        let stream_client = Client::builder()
            .build()
            .map_err(|e| LlmError::Configuration(format!("Failed to create SSE client: {}", e)))?;

        info!(
            "CerebrasLlm initialized with model: {}, url: {}",
            config.model, config.api_url
        );

        Ok(Self {
            client,
            stream_client,
            config,
        })
    }

    /// Create a CerebrasLlm from environment variables.
    ///
    /// See [`CerebrasConfig::from_env`] for the variables read.
    pub fn from_env() -> Result<Self, LlmError> {
        Self::new(CerebrasConfig::from_env()?)
    }

    /// Get the configuration.
    pub fn config(&self) -> &CerebrasConfig {
        &self.config
    }

    /// Build the wire request. Request-level sampling settings win over config defaults.
    fn build_request(&self, request: &CompletionRequest, stream: bool) -> ChatCompletionRequest {
        let mut messages = Vec::with_capacity(request.messages.len() + 1);

        if let Some(ref system_prompt) = request.system_prompt {
            messages.push(ChatMessage::system(system_prompt.clone()));
        }

        for turn in &request.messages {
            messages.push(ChatMessage {
                role: turn.role.as_str().to_string(),
                content: turn.content.clone(),
            });
        }

        ChatCompletionRequest {
            model: self.config.model.clone(),
            messages,
            max_tokens: request.max_tokens.or(self.config.max_tokens),
            temperature: request.temperature.or(self.config.temperature),
            stream: stream.then_some(true),
        }
    }
}

#[async_trait]
impl LlmProvider for CerebrasLlm {
    async fn complete(&self, request: CompletionRequest) -> Result<String, LlmError> {
        let body = self.build_request(&request, false);
        debug!(
            model = %body.model,
            messages = body.messages.len(),
            "Sending completion request to Cerebras"
        );

        let response = self
            .client
            .post(self.config.completions_url())
            .bearer_auth(&self.config.api_key)
            .json(&body)
            .send()
            .await
            .map_err(map_transport_error)?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response.text().await.unwrap_or_default();
            warn!("Cerebras API returned {}", status.as_u16());
            return Err(map_status_error(status, &error_text));
        }

        let completion: ChatCompletionResponse = response
            .json()
            .await
            .map_err(|e| LlmError::ProcessingFailed(format!("Failed to parse response: {}", e)))?;

        debug!(id = %completion.id, usage = ?completion.usage, "Received Cerebras completion");

        completion
            .first_content()
            .map(str::to_string)
            .ok_or_else(|| LlmError::ProcessingFailed("No content in response".to_string()))
    }

    async fn complete_streaming(
        &self,
        request: CompletionRequest,
    ) -> Result<FragmentStream, LlmError> {
        let body = self.build_request(&request, true);
        debug!(model = %body.model, "Opening Cerebras completion stream");

        let source = self
            .stream_client
            .post(self.config.completions_url())
            .bearer_auth(&self.config.api_key)
            .json(&body)
            .eventsource()
            .map_err(|e| LlmError::ProcessingFailed(format!("Failed to open stream: {}", e)))?;

        Ok(fragments(source))
    }

    fn name(&self) -> &str {
        "cerebras"
    }

    async fn is_ready(&self) -> bool {
        !self.config.api_key.is_empty()
    }
}

/// Turn an event source into a stream of content fragments.
///
/// The source is closed on `[DONE]` or on the first error so it never reconnects.
fn fragments(source: EventSource) -> FragmentStream {
    stream::unfold(Some(source), |state| async move {
        let Some(mut source) = state else {
            return None;
        };
        loop {
            match source.next().await {
                None => return None,
                Some(Ok(Event::Open)) => {
                    debug!("Cerebras stream opened");
                }
                Some(Ok(Event::Message(msg))) => {
                    if msg.data.trim() == DONE_MARKER {
                        source.close();
                        return None;
                    }
                    match parse_stream_chunk(&msg.data) {
                        Ok(Some(text)) => return Some((Ok(text), Some(source))),
                        Ok(None) => {}
                        Err(e) => {
                            source.close();
                            return Some((Err(e), None));
                        }
                    }
                }
                Some(Err(reqwest_eventsource::Error::StreamEnded)) => {
                    source.close();
                    return None;
                }
                Some(Err(e)) => {
                    error!("Cerebras stream error: {}", e);
                    source.close();
                    return Some((Err(map_stream_error(e)), None));
                }
            }
        }
    })
    .boxed()
}

/// Extract the content fragment from one SSE `data:` payload.
///
/// Returns `Ok(None)` for chunks that carry no text (role headers, finish markers).
fn parse_stream_chunk(data: &str) -> Result<Option<String>, LlmError> {
    let chunk: ChatCompletionChunk = serde_json::from_str(data)
        .map_err(|e| LlmError::ProcessingFailed(format!("Malformed stream chunk: {}", e)))?;

    Ok(chunk
        .choices
        .into_iter()
        .next()
        .and_then(|choice| choice.delta.content)
        .filter(|content| !content.is_empty()))
}

fn map_transport_error(e: reqwest::Error) -> LlmError {
    if e.is_timeout() {
        LlmError::Timeout
    } else {
        LlmError::Network(format!("Failed to send request: {}", e))
    }
}

fn map_status_error(status: StatusCode, body: &str) -> LlmError {
    let message = serde_json::from_str::<ApiError>(body)
        .map(|api_error| api_error.error.message)
        .unwrap_or_else(|_| body.to_string());
    let detail = format!("API error ({}): {}", status.as_u16(), message);

    match status {
        StatusCode::TOO_MANY_REQUESTS | StatusCode::SERVICE_UNAVAILABLE => {
            LlmError::Unavailable(detail)
        }
        _ => LlmError::ProcessingFailed(detail),
    }
}

fn map_stream_error(e: reqwest_eventsource::Error) -> LlmError {
    match e {
        reqwest_eventsource::Error::Transport(inner) => map_transport_error(inner),
        reqwest_eventsource::Error::InvalidStatusCode(status, _) => {
            map_status_error(status, "stream rejected")
        }
        other => LlmError::ProcessingFailed(format!("Stream failed: {}", other)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use llm_core::ConversationTurn;

    fn test_llm() -> CerebrasLlm {
        let config = CerebrasConfig::builder()
            .api_key("test-key")
            .api_url("http://127.0.0.1:9/v1")
            .temperature(0.8)
            .max_tokens(2048)
            .build();
        CerebrasLlm::new(config).unwrap()
    }

    #[test]
    fn test_new_rejects_empty_key() {
        let config = CerebrasConfig::default();
        assert!(matches!(
            CerebrasLlm::new(config),
            Err(LlmError::Configuration(_))
        ));
    }

    #[test]
    fn test_build_request_orders_system_then_turns() {
        let llm = test_llm();
        let request = CompletionRequest::chat(
            "be brief",
            vec![
                ConversationTurn::user("hi"),
                ConversationTurn::assistant("hello"),
                ConversationTurn::user("weather?"),
            ],
        );

        let body = llm.build_request(&request, false);
        let roles: Vec<&str> = body.messages.iter().map(|m| m.role.as_str()).collect();
        assert_eq!(roles, vec!["system", "user", "assistant", "user"]);
        assert_eq!(body.messages[3].content, "weather?");
        assert_eq!(body.stream, None);
    }

    #[test]
    fn test_build_request_overrides_defaults() {
        let llm = test_llm();
        let request = CompletionRequest::prompt("classify")
            .with_temperature(0.3)
            .with_max_tokens(16);

        let body = llm.build_request(&request, true);
        assert_eq!(body.temperature, Some(0.3));
        assert_eq!(body.max_tokens, Some(16));
        assert_eq!(body.stream, Some(true));

        let body = llm.build_request(&CompletionRequest::prompt("chat"), false);
        assert_eq!(body.temperature, Some(0.8));
        assert_eq!(body.max_tokens, Some(2048));
    }

    #[test]
    fn test_build_request_serialization_skips_none() {
        let llm = CerebrasLlm::new(
            CerebrasConfig {
                api_key: "k".to_string(),
                temperature: None,
                max_tokens: None,
                ..CerebrasConfig::default()
            },
        )
        .unwrap();
        let body = llm.build_request(&CompletionRequest::prompt("x"), false);
        let json = serde_json::to_value(&body).unwrap();

        assert!(json.get("temperature").is_none());
        assert!(json.get("max_tokens").is_none());
        assert!(json.get("stream").is_none());
        assert_eq!(json["model"], "gpt-oss-120b");
    }

    #[test]
    fn test_parse_stream_chunk() {
        let data = r#"{"choices":[{"delta":{"content":"Hel"},"finish_reason":null}]}"#;
        assert_eq!(parse_stream_chunk(data).unwrap(), Some("Hel".to_string()));

        let role_only = r#"{"choices":[{"delta":{"role":"assistant"}}]}"#;
        assert_eq!(parse_stream_chunk(role_only).unwrap(), None);

        let finished = r#"{"choices":[{"delta":{},"finish_reason":"stop"}]}"#;
        assert_eq!(parse_stream_chunk(finished).unwrap(), None);

        let empty = r#"{"choices":[]}"#;
        assert_eq!(parse_stream_chunk(empty).unwrap(), None);

        assert!(matches!(
            parse_stream_chunk("not json"),
            Err(LlmError::ProcessingFailed(_))
        ));
    }

    #[test]
    fn test_map_status_error() {
        let body = r#"{"error":{"message":"slow down","type":"rate_limit"}}"#;
        match map_status_error(StatusCode::TOO_MANY_REQUESTS, body) {
            LlmError::Unavailable(msg) => assert!(msg.contains("slow down")),
            other => panic!("unexpected {:?}", other),
        }

        assert!(matches!(
            map_status_error(StatusCode::SERVICE_UNAVAILABLE, ""),
            LlmError::Unavailable(_)
        ));

        match map_status_error(StatusCode::BAD_REQUEST, "plain text") {
            LlmError::ProcessingFailed(msg) => {
                assert!(msg.contains("400"));
                assert!(msg.contains("plain text"));
            }
            other => panic!("unexpected {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_is_ready_and_name() {
        let llm = test_llm();
        assert!(llm.is_ready().await);
        assert_eq!(llm.name(), "cerebras");
    }
}
