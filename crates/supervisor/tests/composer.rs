//! Summarization and its truncation fallback.

use std::sync::Arc;
use std::time::Duration;

use futures::StreamExt;
use mock_llm::{CompletionRequest, DelayedLlm, FailingLlm, ScriptedLlm};
use supervisor::{
    AgentFragment, Domain, LlmProvider, ResponseComposer, SummarizationError, SummarySource,
    Supervisor, SupervisorConfig,
};

const LONG_ANSWER: &str = "Lima has three great day hikes: Lomas de Lachay, Marcahuasi and \
the Antankallo waterfall. Lachay is greenest from June to October.";

fn composer_with(llm: Arc<dyn LlmProvider>, fallback_chars: usize) -> ResponseComposer {
    let config = SupervisorConfig::builder()
        .summary_fallback_chars(fallback_chars)
        .summary_timeout(Duration::from_millis(50))
        .build();
    ResponseComposer::new(llm, &config)
}

#[tokio::test]
async fn test_summarize_sends_text_and_trims_reply() {
    let llm = Arc::new(ScriptedLlm::always("  Try Lomas de Lachay.\n"));
    let composer = composer_with(llm.clone(), 20);

    let summary = composer.summarize(LONG_ANSWER).await.unwrap();
    assert_eq!(summary, "Try Lomas de Lachay.");

    let requests = llm.requests().await;
    assert_eq!(requests.len(), 1);
    assert!(requests[0].system_prompt.is_some());
    assert_eq!(requests[0].last_user_text(), Some(LONG_ANSWER));
    assert_eq!(requests[0].temperature, Some(0.3));
}

#[tokio::test]
async fn test_compose_uses_summary() {
    let composer = composer_with(Arc::new(ScriptedLlm::always("Short version.")), 20);
    let summary = composer.compose(LONG_ANSWER).await;

    assert_eq!(summary.text, "Short version.");
    assert_eq!(summary.source, SummarySource::Summarized);
}

#[tokio::test]
async fn test_compose_truncates_on_provider_failure() {
    let composer = composer_with(Arc::new(FailingLlm::unavailable()), 20);
    let summary = composer.compose(LONG_ANSWER).await;

    assert_eq!(summary.text, "Lima has three great");
    assert_eq!(summary.source, SummarySource::Truncated);
}

#[tokio::test]
async fn test_compose_truncates_on_timeout() {
    let slow = DelayedLlm::with_millis(ScriptedLlm::always("too late"), 500);
    let composer = composer_with(Arc::new(slow), 4);

    assert!(matches!(
        composer.summarize(LONG_ANSWER).await,
        Err(SummarizationError::Timeout(_))
    ));

    let summary = composer.compose(LONG_ANSWER).await;
    assert_eq!(summary.text, "Lima");
    assert_eq!(summary.source, SummarySource::Truncated);
}

#[tokio::test]
async fn test_compose_truncates_on_empty_summary() {
    let composer = composer_with(Arc::new(ScriptedLlm::always("")), 1000);

    let summary = composer.compose(LONG_ANSWER).await;
    assert_eq!(summary.text, LONG_ANSWER);
    assert_eq!(summary.source, SummarySource::Truncated);
}

#[tokio::test]
async fn test_empty_input_never_calls_provider() {
    let llm = Arc::new(ScriptedLlm::always("unused"));
    let composer = composer_with(llm.clone(), 10);

    assert!(matches!(
        composer.summarize("  ").await,
        Err(SummarizationError::EmptyInput)
    ));
    let summary = composer.compose("").await;
    assert_eq!(summary.text, "");
    assert_eq!(summary.source, SummarySource::Truncated);
    assert_eq!(llm.call_count().await, 0);
}

#[tokio::test]
async fn test_routed_stream_is_tagged_then_summarized() {
    let llm = Arc::new(ScriptedLlm::sequence(["travel"], "Lachay is lovely in July."));
    let supervisor = Supervisor::new(llm.clone(), SupervisorConfig::default()).unwrap();

    let decision = supervisor
        .route("best hiking trails near Lima", "user-1", &[], None)
        .await
        .unwrap();
    assert_eq!(decision.recommended_agent, Domain::Travel);

    let fragments = llm
        .complete_streaming(CompletionRequest::prompt("best hiking trails near Lima"))
        .await
        .unwrap();
    let tagged: Vec<AgentFragment> = decision
        .tag_stream(fragments)
        .map(|fragment| fragment.unwrap())
        .collect()
        .await;

    assert!(tagged.len() > 1);
    assert!(tagged.iter().all(|f| f.agent == Domain::Travel));
    let full: String = tagged.iter().map(|f| f.content.as_str()).collect();
    assert_eq!(full, "Lachay is lovely in July.");

    let summary = supervisor.composer().compose(&full).await;
    assert_eq!(summary.source, SummarySource::Summarized);
    assert_eq!(summary.text, "Lachay is lovely in July.");
}
