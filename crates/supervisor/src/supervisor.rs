//! Turn orchestration: the public routing entry point.

use std::sync::Arc;

use llm_core::{ConversationTurn, LlmProvider};
use serde_json::{Map, Value};
use tracing::{info, trace, warn};

use crate::classifier::Classifier;
use crate::composer::ResponseComposer;
use crate::config::SupervisorConfig;
use crate::decision::RoutingDecision;
use crate::error::RoutingError;
use crate::router::Router;
use crate::state::RoutingState;

/// Decides which domain agent should handle each turn.
///
/// One instance is shared across concurrent calls; every call builds its
/// own [`RoutingState`], so nothing leaks between invocations.
pub struct Supervisor {
    router: Router,
    composer: ResponseComposer,
    config: SupervisorConfig,
}

impl Supervisor {
    /// Create a supervisor over `llm`, used for both classification and summaries.
    ///
    /// Fails if the domain registry and router terminals disagree.
    pub fn new(llm: Arc<dyn LlmProvider>, config: SupervisorConfig) -> Result<Self, RoutingError> {
        let classifier = Classifier::new(Arc::clone(&llm), &config);
        let router = Router::new(classifier)?;
        let composer = ResponseComposer::new(llm, &config);

        info!(
            classifier_temperature = config.classifier_temperature,
            history_turns = config.history_turns,
            classify_timeout = ?config.classify_timeout,
            "Supervisor initialized"
        );

        Ok(Self {
            router,
            composer,
            config,
        })
    }

    pub fn config(&self) -> &SupervisorConfig {
        &self.config
    }

    /// The summarizer sharing this supervisor's provider.
    pub fn composer(&self) -> &ResponseComposer {
        &self.composer
    }

    /// Fingerprint of the classifier prompt.
    pub fn prompt_hash(&self) -> &str {
        self.router.classifier().prompt_hash()
    }

    /// Reject a turn that cannot be routed.
    ///
    /// [`route`](Self::route) runs this first; callers that touch other
    /// services before routing should run it themselves.
    pub fn validate(message: &str, user_id: &str) -> Result<(), RoutingError> {
        if message.trim().is_empty() {
            return Err(RoutingError::InvalidInput("message is empty".to_string()));
        }
        if user_id.trim().is_empty() {
            return Err(RoutingError::InvalidInput("user_id is empty".to_string()));
        }
        Ok(())
    }

    /// Route one user turn.
    ///
    /// `history` is the conversation before `message`, oldest first.
    /// `user_memories` is carried through read-only.
    ///
    /// Makes exactly one network call. A provider failure surfaces as
    /// [`RoutingError::Classification`]; it is never defaulted.
    pub async fn route(
        &self,
        message: &str,
        user_id: &str,
        history: &[ConversationTurn],
        user_memories: Option<Map<String, Value>>,
    ) -> Result<RoutingDecision, RoutingError> {
        Self::validate(message, user_id)?;

        trace!(
            user_id = user_id,
            history_len = history.len(),
            has_memories = user_memories.is_some(),
            "ROUTE_INPUT"
        );

        let mut state = RoutingState::new(message, user_id, history, user_memories);

        if let Err(e) = self.router.run(&mut state).await {
            warn!(user_id = user_id, error = %e, "ROUTE_FAILED");
            return Err(e.into());
        }

        let node = state.agent_node().unwrap_or_default();
        let (context, user_id) = state.into_parts();
        let decision = RoutingDecision::from_context(context, user_id);

        info!(
            user_id = %decision.user_id,
            agent = %decision.recommended_agent,
            node = node,
            fallback = decision.context.fallback_applied,
            "ROUTE_DECISION"
        );

        Ok(decision)
    }
}
