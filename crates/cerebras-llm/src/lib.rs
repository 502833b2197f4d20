//! Cerebras completion provider.
//!
//! Speaks the OpenAI-compatible chat-completions protocol exposed at
//! `https://api.cerebras.ai/v1`, and implements [`LlmProvider`] for both
//! single-shot and streaming completions.
//!
//! # Usage
//!
//! ```rust,no_run
//! use cerebras_llm::{CerebrasLlm, CompletionRequest, LlmProvider};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let llm = CerebrasLlm::from_env()?;
//!     let text = llm
//!         .complete(CompletionRequest::prompt("Say hi").with_temperature(0.3))
//!         .await?;
//!     println!("{}", text);
//!     Ok(())
//! }
//! ```

mod api_types;
mod client;
mod config;

pub use client::CerebrasLlm;
pub use config::{CerebrasConfig, CerebrasConfigBuilder};

// Re-export llm-core types for convenience
pub use llm_core::{
    async_trait, CompletionRequest, ConversationTurn, FragmentStream, LlmError, LlmProvider,
};
