//! Mock completion providers for deterministic tests.
//!
//! - `ScriptedLlm` - replies from a script and records every request
//! - `KeywordLlm` - answers classification prompts with a keyword policy
//! - `FailingLlm` - every call fails with a chosen error
//! - `DelayedLlm` - wraps another provider with artificial latency
//!
//! For production completions, use the `cerebras-llm` crate instead.
//!
//! # Example
//!
//! ```rust
//! use mock_llm::{CompletionRequest, LlmProvider, ScriptedLlm};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), mock_llm::LlmError> {
//!     let llm = ScriptedLlm::always("finance");
//!     let text = llm.complete(CompletionRequest::prompt("AAPL price?")).await?;
//!     assert_eq!(text, "finance");
//!     Ok(())
//! }
//! ```

mod delayed;
mod failing;
mod keyword;
mod scripted;

// Re-export llm-core types for convenience
pub use llm_core::{async_trait, CompletionRequest, FragmentStream, LlmError, LlmProvider};

pub use delayed::DelayedLlm;
pub use failing::{FailingLlm, FailureKind};
pub use keyword::{KeywordLlm, DEFAULT_QUERY_MARKER};
pub use scripted::ScriptedLlm;
