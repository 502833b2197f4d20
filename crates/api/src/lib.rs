//! HTTP gateway for the supervisor.
//!
//! Endpoints:
//! - `GET /health`
//! - `GET /v1/domains` - registry listing
//! - `POST /v1/route` - routing decision for one turn
//! - `POST /v1/summarize` - summary with truncation fallback
//! - `POST /multi-agent/stream` - route, then stream the agent reply as SSE

use std::sync::Arc;

use axum::routing::{get, post};
use axum::Router;
use supervisor::{LlmProvider, MemoryStore, Supervisor};

pub mod agents;
pub mod config;
mod error;
mod routes;

pub use config::{ApiConfig, ConfigError};
pub use error::ApiError;
pub use routes::{DomainInfo, DomainList, SummarizeResponse};

/// Shared handler state.
#[derive(Clone)]
pub struct AppState {
    pub supervisor: Arc<Supervisor>,
    /// Provider used for agent replies.
    pub llm: Arc<dyn LlmProvider>,
    pub memory: Arc<dyn MemoryStore>,
    pub api_token: Option<String>,
}

/// Build the router.
pub fn app(state: AppState) -> Router {
    Router::new()
        .route("/health", get(routes::health))
        .route("/v1/domains", get(routes::list_domains))
        .route("/v1/route", post(routes::route))
        .route("/v1/summarize", post(routes::summarize))
        .route("/multi-agent/stream", post(routes::multi_agent_stream))
        .with_state(state)
}
