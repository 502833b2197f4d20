//! Core traits and types shared by completion providers and the supervisor.
//!
//! This crate defines the narrow collaborator interfaces the routing core
//! depends on:
//!
//! - [`LlmProvider`] - single-shot and streaming text completion
//! - [`ConversationTurn`] / [`Role`] - chronological conversation history
//! - [`MemoryStore`] - long-term per-user memory (add / retrieve)
//! - [`LlmError`] / [`MemoryError`] - collaborator failures
//!
//! # Example
//!
//! ```rust
//! use llm_core::{async_trait, CompletionRequest, LlmError, LlmProvider};
//!
//! struct Constant;
//!
//! #[async_trait]
//! impl LlmProvider for Constant {
//!     async fn complete(&self, _request: CompletionRequest) -> Result<String, LlmError> {
//!         Ok("research".to_string())
//!     }
//!
//!     fn name(&self) -> &str {
//!         "Constant"
//!     }
//! }
//! ```

mod error;
mod memory;
mod message;
mod prompt;
mod provider;

pub use error::LlmError;
pub use memory::{InMemoryStore, MemoryAck, MemoryError, MemoryRecord, MemoryStore};
pub use message::{ConversationTurn, Role};
pub use prompt::hash_prompt;
pub use provider::{CompletionRequest, FragmentStream, LlmProvider};

// Re-export async_trait for convenience
pub use async_trait::async_trait;
