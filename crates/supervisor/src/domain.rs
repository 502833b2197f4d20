//! Domain registry.
//!
//! The fixed, ordered set of domains a request can be routed to, plus the
//! metadata the classifier prompt and the presentation layer read.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// A routing domain.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Domain {
    Research,
    Finance,
    Travel,
    Shopping,
    Jobs,
    Recipes,
}

impl Domain {
    /// Every registered domain, in prompt order.
    pub const ALL: [Domain; 6] = [
        Domain::Research,
        Domain::Finance,
        Domain::Travel,
        Domain::Shopping,
        Domain::Jobs,
        Domain::Recipes,
    ];

    /// Domain used when the model answers with something unrecognised.
    pub const DEFAULT: Domain = Domain::Research;

    /// Identifier as it appears in prompts and on the wire.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Research => "research",
            Self::Finance => "finance",
            Self::Travel => "travel",
            Self::Shopping => "shopping",
            Self::Jobs => "jobs",
            Self::Recipes => "recipes",
        }
    }

    /// Definition used verbatim in the classification prompt.
    pub fn description(&self) -> &'static str {
        match self {
            Self::Research => {
                "General knowledge, company history, \"who is\", \"what is\", news summaries, \
                 academic topics, technology explanations. Use this for questions about \
                 companies that are NOT specifically about stock metrics."
            }
            Self::Finance => {
                "Stock prices, ticker symbols, market cap, investment advice, portfolio \
                 management, currency exchange, financial reports."
            }
            Self::Travel => "Trip planning, flights, hotels, tourist attractions, destination guides.",
            Self::Shopping => {
                "Product recommendations, reviews, buying advice, e-commerce, gifts."
            }
            Self::Jobs => "Career advice, resume writing, job search, interview prep.",
            Self::Recipes => {
                "Cooking instructions, food ingredients, meal planning, dietary advice."
            }
        }
    }

    /// Short human-readable summary for agent listings.
    pub fn title(&self) -> &'static str {
        match self {
            Self::Research => "Web research, articles, and information gathering",
            Self::Finance => "Financial information, stocks, and investment advice",
            Self::Travel => "Flights, hotels, and trip planning",
            Self::Shopping => "Product recommendations and shopping assistance",
            Self::Jobs => "Job search and career advice",
            Self::Recipes => "Recipe discovery with ratings and ingredients",
        }
    }

    /// Tools the domain agent advertises.
    pub fn capabilities(&self) -> &'static [&'static str] {
        match self {
            Self::Research => &["News search", "Document retrieval", "Knowledge lookup"],
            Self::Finance => &["Financial news", "Market data", "Investment guidance"],
            Self::Travel => &["Flight search", "Hotel booking", "Travel guides"],
            Self::Shopping => &["Product search", "Price comparison", "Recommendations"],
            Self::Jobs => &["Job search", "Resume tips", "Career guidance"],
            Self::Recipes => &["Recipe search", "Ingredient lookup", "Cooking tips"],
        }
    }

    /// Label of the router terminal that handles this domain.
    pub fn agent_node(&self) -> &'static str {
        match self {
            Self::Research => "research_agent",
            Self::Finance => "finance_agent",
            Self::Travel => "travel_agent",
            Self::Shopping => "shopping_agent",
            Self::Jobs => "jobs_agent",
            Self::Recipes => "recipes_agent",
        }
    }

    /// Comma-separated list of identifiers, in registry order.
    pub fn list() -> String {
        Self::ALL
            .iter()
            .map(Domain::as_str)
            .collect::<Vec<_>>()
            .join(", ")
    }
}

impl fmt::Display for Domain {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when a string is not a registered domain.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownDomain(pub String);

impl fmt::Display for UnknownDomain {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown domain: {}", self.0)
    }
}

impl std::error::Error for UnknownDomain {}

impl FromStr for Domain {
    type Err = UnknownDomain;

    /// Exact match on the identifier. Callers normalise case first.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|domain| domain.as_str() == s)
            .ok_or_else(|| UnknownDomain(s.to_string()))
    }
}
