//! Keyword provider - a deterministic stand-in for a classification model.

use llm_core::{async_trait, CompletionRequest, LlmError, LlmProvider};

/// Marker preceding the user's text in a classification prompt.
pub const DEFAULT_QUERY_MARKER: &str = "User Query:";

/// Keyword lists checked in order; the first hit wins.
///
/// Finance is checked first so stock language beats company names.
const RULES: &[(&str, &[&str])] = &[
    (
        "finance",
        &[
            "stock", "ticker", "market cap", "portfolio", "currency", "exchange rate",
            "dividend", "invest", "nasdaq", "etf",
        ],
    ),
    (
        "recipes",
        &["recipe", "cook", "bake", "ingredient", "meal", "dinner", "vegan"],
    ),
    (
        "travel",
        &["flight", "hotel", "trip", "travel", "hiking", "vacation", "itinerary", "tourist"],
    ),
    (
        "jobs",
        &["job", "resume", "interview", "career", "hiring", "salary"],
    ),
    (
        "shopping",
        &["buy", "product", "gift", "headphones", "deal", "shopping", "cheapest"],
    ),
];

/// A provider that classifies the query embedded in a prompt by keywords.
///
/// It looks for the last [`DEFAULT_QUERY_MARKER`] in the prompt, reads the
/// query up to the next blank line, and answers with the first matching
/// domain label or `research` when nothing matches.
#[derive(Debug, Clone)]
pub struct KeywordLlm {
    marker: String,
    shouting: bool,
}

impl Default for KeywordLlm {
    fn default() -> Self {
        Self::new()
    }
}

impl KeywordLlm {
    /// Create a keyword classifier using the default query marker.
    pub fn new() -> Self {
        Self {
            marker: DEFAULT_QUERY_MARKER.to_string(),
            shouting: false,
        }
    }

    /// Answer in upper case with surrounding whitespace, like a sloppy model.
    pub fn shouting() -> Self {
        Self {
            shouting: true,
            ..Self::new()
        }
    }

    /// Use a different query marker.
    pub fn with_marker(mut self, marker: impl Into<String>) -> Self {
        self.marker = marker.into();
        self
    }

    /// Classify a raw query string.
    pub fn classify(query: &str) -> &'static str {
        let lowered = query.to_lowercase();
        RULES
            .iter()
            .find(|(_, keywords)| keywords.iter().any(|k| lowered.contains(k)))
            .map(|(label, _)| *label)
            .unwrap_or("research")
    }

    fn extract_query<'a>(&self, prompt: &'a str) -> &'a str {
        let Some(start) = prompt.rfind(&self.marker) else {
            return prompt;
        };
        let rest = &prompt[start + self.marker.len()..];
        let end = rest.find("\n\n").unwrap_or(rest.len());
        rest[..end].trim()
    }
}

#[async_trait]
impl LlmProvider for KeywordLlm {
    async fn complete(&self, request: CompletionRequest) -> Result<String, LlmError> {
        let prompt = request.last_user_text().unwrap_or_default();
        let label = Self::classify(self.extract_query(prompt));

        if self.shouting {
            Ok(format!("  {}\n", label.to_uppercase()))
        } else {
            Ok(label.to_string())
        }
    }

    fn name(&self) -> &str {
        "KeywordLlm"
    }
}
