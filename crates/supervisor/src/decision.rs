//! The routing decision returned to callers.

use futures::stream::{BoxStream, StreamExt};
use llm_core::{FragmentStream, LlmError};
use serde::{Deserialize, Serialize};

use crate::domain::Domain;
use crate::state::RoutingContext;

/// Structured output of one routing invocation.
///
/// Its shape does not depend on which domain was chosen.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoutingDecision {
    /// Agent that should handle the turn.
    pub recommended_agent: Domain,
    /// Domain the classifier settled on.
    pub classified_domain: Domain,
    /// Everything routing recorded along the way.
    pub context: RoutingContext,
    /// Echo of the caller's user id.
    pub user_id: String,
}

/// A streamed fragment of agent output, tagged with the agent that produced it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AgentFragment {
    pub content: String,
    pub agent: Domain,
}

impl RoutingDecision {
    /// Build a decision from the final routing context.
    pub fn from_context(context: RoutingContext, user_id: String) -> Self {
        let recommended_agent = context.agent.unwrap_or(Domain::DEFAULT);
        let classified_domain = context.classified_domain.unwrap_or(recommended_agent);

        Self {
            recommended_agent,
            classified_domain,
            context,
            user_id,
        }
    }

    /// Attach the recommended agent to every fragment of a completion stream.
    pub fn tag_stream(
        &self,
        fragments: FragmentStream,
    ) -> BoxStream<'static, Result<AgentFragment, LlmError>> {
        let agent = self.recommended_agent;
        fragments
            .map(move |fragment| fragment.map(|content| AgentFragment { content, agent }))
            .boxed()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use futures::stream;

    fn decision(domain: Domain) -> RoutingDecision {
        RoutingDecision::from_context(
            RoutingContext {
                classified_domain: Some(domain),
                agent: Some(domain),
                fallback_applied: false,
            },
            "user-1".to_string(),
        )
    }

    #[test]
    fn test_from_empty_context_defaults() {
        let decision = RoutingDecision::from_context(RoutingContext::default(), "u".to_string());
        assert_eq!(decision.recommended_agent, Domain::Research);
        assert_eq!(decision.classified_domain, Domain::Research);
    }

    #[test]
    fn test_serialized_shape() {
        let json = serde_json::to_value(decision(Domain::Travel)).unwrap();
        assert_eq!(json["recommended_agent"], "travel");
        assert_eq!(json["classified_domain"], "travel");
        assert_eq!(json["context"]["agent"], "travel");
        assert_eq!(json["user_id"], "user-1");
    }

    #[tokio::test]
    async fn test_tag_stream() {
        let fragments: FragmentStream = stream::iter(vec![
            Ok("Buy ".to_string()),
            Err(LlmError::Timeout),
            Ok("low".to_string()),
        ])
        .boxed();

        let tagged: Vec<_> = decision(Domain::Finance).tag_stream(fragments).collect().await;

        assert_eq!(tagged.len(), 3);
        assert_eq!(
            tagged[0].as_ref().unwrap(),
            &AgentFragment {
                content: "Buy ".to_string(),
                agent: Domain::Finance
            }
        );
        assert!(matches!(tagged[1], Err(LlmError::Timeout)));
        assert_eq!(tagged[2].as_ref().unwrap().agent, Domain::Finance);
    }

    #[test]
    fn test_fragment_wire_shape() {
        let fragment = AgentFragment {
            content: "Hi".to_string(),
            agent: Domain::Recipes,
        };
        assert_eq!(
            serde_json::to_string(&fragment).unwrap(),
            r#"{"content":"Hi","agent":"recipes"}"#
        );
    }
}
