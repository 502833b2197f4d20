//! Routes user requests to specialised domain agents.
//!
//! The [`Supervisor`] classifies each turn into one of six domains with a
//! single LLM call, walks a small state machine to the matching terminal,
//! and returns a [`RoutingDecision`]. It never runs the agents itself.
//!
//! # Architecture
//!
//! ```text
//! route(message, user_id, history, memories)
//!          ↓
//! ┌──────────────────────────────────────────────────────────┐
//! │                       SUPERVISOR                         │
//! │                                                          │
//! │  1. Validate input (InvalidInput on empty fields)        │
//! │         ↓                                                │
//! │  2. Build RoutingState (history + new message last)      │
//! │         ↓                                                │
//! │  3. Router: Classifying                                  │
//! │     • one completion call, bounded by a timeout          │
//! │     • unknown label → research, fallback flagged         │
//! │     • call failure → ClassificationError                 │
//! │         ↓                                                │
//! │  4. Router: Dispatching(domain) → terminal "<d>_agent"   │
//! │         ↓                                                │
//! │  5. Done → RoutingDecision                               │
//! └──────────────────────────────────────────────────────────┘
//!          ↓
//! caller runs the agent, tags its stream, summarizes the reply
//! ```
//!
//! # Example
//!
//! ```rust
//! use std::sync::Arc;
//! use mock_llm::KeywordLlm;
//! use supervisor::{Domain, Supervisor, SupervisorConfig};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), supervisor::RoutingError> {
//!     let supervisor = Supervisor::new(Arc::new(KeywordLlm::new()), SupervisorConfig::default())?;
//!
//!     let decision = supervisor
//!         .route("current stock price of AAPL", "user-1", &[], None)
//!         .await?;
//!
//!     assert_eq!(decision.recommended_agent, Domain::Finance);
//!     Ok(())
//! }
//! ```

mod classifier;
mod composer;
mod config;
mod decision;
mod domain;
mod error;
mod memory;
mod router;
mod state;
mod supervisor;

pub use classifier::{parse_label, Classification, Classifier};
pub use composer::{truncate, ResponseComposer, Summary, SummarySource};
pub use config::{SupervisorConfig, SupervisorConfigBuilder};
pub use decision::{AgentFragment, RoutingDecision};
pub use domain::{Domain, UnknownDomain};
pub use error::{ClassificationError, RoutingError, SummarizationError};
pub use memory::recall_memories;
pub use router::{terminal, verify_terminals, Router, RoutingPhase, Terminal};
pub use state::{RoutingContext, RoutingState};
pub use supervisor::Supervisor;

// Re-export commonly used types from llm-core
pub use llm_core::{
    async_trait, CompletionRequest, ConversationTurn, FragmentStream, InMemoryStore, LlmError,
    LlmProvider, MemoryAck, MemoryError, MemoryRecord, MemoryStore, Role,
};
