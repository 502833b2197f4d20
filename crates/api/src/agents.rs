//! Domain agents: one system prompt per domain.
//!
//! Agents here are plain completion calls; they do not call search vendors.

use serde_json::{Map, Value};
use supervisor::{ConversationTurn, Domain};

const SHARED_RULES: &str = "Answer in plain prose suitable for chat. Be concrete and concise. \
If you are unsure or the answer depends on live data you do not have, say so.";

/// System prompt for the agent serving `domain`.
pub fn system_prompt(domain: Domain) -> &'static str {
    match domain {
        Domain::Research => {
            "You are the Research agent. You explain concepts, people, companies, history \
             and technology clearly, citing well-known sources by name when helpful."
        }
        Domain::Finance => {
            "You are the Finance agent. You discuss stocks, tickers, market cap, portfolios \
             and currencies. Give balanced analysis, never personalised investment advice."
        }
        Domain::Travel => {
            "You are the Travel agent. You plan trips, suggest flights, hotels, routes and \
             attractions, and note seasons, budgets and logistics."
        }
        Domain::Shopping => {
            "You are the Shopping agent. You recommend products, compare options and \
             prices, and summarise what reviewers value."
        }
        Domain::Jobs => {
            "You are the Jobs agent. You help with job search, resumes, interviews and \
             career decisions with practical, actionable steps."
        }
        Domain::Recipes => {
            "You are the Recipes agent. You suggest recipes with ingredients and clear \
             steps, and adapt them to dietary needs."
        }
    }
}

/// Full system prompt, including any recalled memories.
pub fn build_system_prompt(domain: Domain, user_memories: Option<&Map<String, Value>>) -> String {
    let mut prompt = format!("{}\n\n{}", system_prompt(domain), SHARED_RULES);

    let facts = user_memories
        .and_then(|memories| memories.get("memories"))
        .and_then(Value::as_array)
        .map(|entries| {
            entries
                .iter()
                .filter_map(|entry| entry.get("message").and_then(Value::as_str))
                .map(|message| format!("- {}", message))
                .collect::<Vec<_>>()
        })
        .unwrap_or_default();

    if !facts.is_empty() {
        prompt.push_str("\n\nWhat you know about this user:\n");
        prompt.push_str(&facts.join("\n"));
    }

    prompt
}

/// Conversation sent to the agent: prior turns then the new message.
pub fn build_messages(history: &[ConversationTurn], message: &str) -> Vec<ConversationTurn> {
    let mut messages = history.to_vec();
    messages.push(ConversationTurn::user(message));
    messages
}
