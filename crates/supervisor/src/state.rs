//! Per-invocation routing state.

use llm_core::ConversationTurn;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use tracing::warn;

use crate::domain::Domain;

/// Context accumulated while routing one turn.
///
/// Each field is written at most once per invocation.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoutingContext {
    /// Domain chosen by the classifier.
    pub classified_domain: Option<Domain>,
    /// Domain of the terminal that handled the turn.
    pub agent: Option<Domain>,
    /// Set when the label or the dispatch edge fell back to the default domain.
    #[serde(default)]
    pub fallback_applied: bool,
}

/// Working record threaded through the router for a single `route()` call.
///
/// Created fresh per call and dropped once the decision is extracted.
#[derive(Debug, Clone)]
pub struct RoutingState {
    messages: Vec<ConversationTurn>,
    next_agent: Option<Domain>,
    agent_node: Option<&'static str>,
    last_message: String,
    context: RoutingContext,
    user_id: String,
    user_memories: Option<Map<String, Value>>,
}

impl RoutingState {
    /// Seed state from prior history followed by the new user message.
    pub fn new(
        message: impl Into<String>,
        user_id: impl Into<String>,
        history: &[ConversationTurn],
        user_memories: Option<Map<String, Value>>,
    ) -> Self {
        let message = message.into();
        let mut messages = Vec::with_capacity(history.len() + 1);
        messages.extend_from_slice(history);
        messages.push(ConversationTurn::user(message.clone()));

        Self {
            messages,
            next_agent: None,
            agent_node: None,
            last_message: message,
            context: RoutingContext::default(),
            user_id: user_id.into(),
            user_memories,
        }
    }

    /// All turns, oldest first; the last one is the triggering message.
    pub fn messages(&self) -> &[ConversationTurn] {
        &self.messages
    }

    /// Turns preceding the triggering message.
    pub fn prior_turns(&self) -> &[ConversationTurn] {
        &self.messages[..self.messages.len().saturating_sub(1)]
    }

    pub fn last_message(&self) -> &str {
        &self.last_message
    }

    pub fn user_id(&self) -> &str {
        &self.user_id
    }

    pub fn user_memories(&self) -> Option<&Map<String, Value>> {
        self.user_memories.as_ref()
    }

    /// Domain picked by the classifier, if it has run.
    pub fn next_agent(&self) -> Option<Domain> {
        self.next_agent
    }

    /// Display label of the terminal reached, e.g. `finance_agent`.
    pub fn agent_node(&self) -> Option<&'static str> {
        self.agent_node
    }

    pub fn context(&self) -> &RoutingContext {
        &self.context
    }

    /// Record the classifier's verdict. Later calls are ignored.
    pub fn record_classification(&mut self, domain: Domain, fallback_applied: bool) {
        if let Some(existing) = self.next_agent {
            if existing != domain {
                warn!(existing = %existing, attempted = %domain, "next_agent already set");
            }
            return;
        }

        self.next_agent = Some(domain);
        self.context.classified_domain = Some(domain);
        self.context.fallback_applied |= fallback_applied;
    }

    /// Flag that dispatch had to substitute the default domain.
    pub fn record_dispatch_fallback(&mut self) {
        self.context.fallback_applied = true;
    }

    /// Record the terminal that handled the turn. Later calls are ignored.
    pub fn record_terminal(&mut self, domain: Domain, node: &'static str) {
        if self.context.agent.is_some() {
            warn!(node = node, "terminal already recorded");
            return;
        }

        self.context.agent = Some(domain);
        self.agent_node = Some(node);
    }

    /// Consume the state, keeping what the decision needs.
    pub(crate) fn into_parts(self) -> (RoutingContext, String) {
        (self.context, self.user_id)
    }
}
