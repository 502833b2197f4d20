//! Request handlers.

use axum::extract::{Json, State};
use axum::http::HeaderMap;
use axum::response::sse::{Event, Sse};
use axum::response::{IntoResponse, Response};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use supervisor::{
    recall_memories, AgentFragment, CompletionRequest, ConversationTurn, Domain, LlmError,
    RoutingDecision, SummarySource, Supervisor,
};
use tokio_stream::StreamExt;
use tracing::{debug, info, warn};

use crate::agents;
use crate::error::ApiError;
use crate::AppState;

#[derive(Debug, Serialize)]
pub struct Health {
    pub status: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct DomainInfo {
    pub id: Domain,
    pub title: String,
    pub description: String,
    pub capabilities: Vec<String>,
    pub agent_node: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct DomainList {
    pub object: String,
    pub data: Vec<DomainInfo>,
}

#[derive(Debug, Deserialize)]
pub struct RouteRequest {
    #[serde(default)]
    pub user_id: String,
    #[serde(default)]
    pub message: String,
    #[serde(default)]
    pub session_id: Option<String>,
    #[serde(default)]
    pub conversation_history: Vec<ConversationTurn>,
}

#[derive(Debug, Deserialize)]
pub struct SummarizeRequest {
    #[serde(default)]
    pub text: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct SummarizeResponse {
    pub summary: String,
    pub source: SummarySource,
}

#[derive(Debug, Serialize)]
struct StreamError<'a> {
    error: String,
    agent: &'a str,
}

pub async fn health() -> Json<Health> {
    Json(Health {
        status: "ok".to_string(),
    })
}

pub async fn list_domains() -> Json<DomainList> {
    Json(DomainList {
        object: "list".to_string(),
        data: Domain::ALL
            .iter()
            .map(|domain| DomainInfo {
                id: *domain,
                title: domain.title().to_string(),
                description: domain.description().to_string(),
                capabilities: domain.capabilities().iter().map(|c| c.to_string()).collect(),
                agent_node: domain.agent_node().to_string(),
            })
            .collect(),
    })
}

pub async fn route(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(payload): Json<RouteRequest>,
) -> Result<Json<RoutingDecision>, ApiError> {
    authorize(&state, &headers)?;

    let (decision, _) = route_turn(&state, &payload).await?;
    Ok(Json(decision))
}

pub async fn summarize(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(payload): Json<SummarizeRequest>,
) -> Result<Json<SummarizeResponse>, ApiError> {
    authorize(&state, &headers)?;

    if payload.text.trim().is_empty() {
        return Err(ApiError::BadRequest("text is empty".to_string()));
    }

    let summary = state.supervisor.composer().compose(&payload.text).await;
    Ok(Json(SummarizeResponse {
        summary: summary.text,
        source: summary.source,
    }))
}

/// Route the turn, remember it, and stream the chosen agent's reply.
pub async fn multi_agent_stream(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(payload): Json<RouteRequest>,
) -> Result<Response, ApiError> {
    authorize(&state, &headers)?;

    let (decision, memories) = route_turn(&state, &payload).await?;
    let agent = decision.recommended_agent;

    remember(&state, &payload, agent).await;

    let request = agent_request(agent, memories.as_ref(), &payload);
    let fragments = state.llm.complete_streaming(request).await?;

    info!(user_id = %decision.user_id, agent = %agent, "Streaming agent reply");

    let events = decision
        .tag_stream(fragments)
        .map(move |item| fragment_event(item, agent))
        .chain(tokio_stream::once(Ok(Event::default().data("[DONE]"))));

    Ok(Sse::new(events).into_response())
}

async fn route_turn(
    state: &AppState,
    payload: &RouteRequest,
) -> Result<(RoutingDecision, Option<Map<String, Value>>), ApiError> {
    Supervisor::validate(&payload.message, &payload.user_id)?;

    let memories = recall_memories(
        state.memory.as_ref(),
        &payload.user_id,
        state.supervisor.config().memory_limit,
    )
    .await;

    let decision = state
        .supervisor
        .route(
            &payload.message,
            &payload.user_id,
            &payload.conversation_history,
            memories.clone(),
        )
        .await?;

    Ok((decision, memories))
}

// Memory writes are best effort.
async fn remember(state: &AppState, payload: &RouteRequest, agent: Domain) {
    let mut metadata = Map::new();
    metadata.insert("agent".to_string(), Value::String(agent.as_str().to_string()));
    if let Some(ref session_id) = payload.session_id {
        metadata.insert("session_id".to_string(), Value::String(session_id.clone()));
    }

    match state
        .memory
        .add(&payload.user_id, &payload.message, metadata)
        .await
    {
        Ok(ack) => debug!(memory_id = %ack.id, "Stored user message"),
        Err(e) => warn!(user_id = %payload.user_id, error = %e, "MEMORY_ADD_FAILED"),
    }
}

fn agent_request(
    agent: Domain,
    memories: Option<&Map<String, Value>>,
    payload: &RouteRequest,
) -> CompletionRequest {
    CompletionRequest::chat(
        agents::build_system_prompt(agent, memories),
        agents::build_messages(&payload.conversation_history, &payload.message),
    )
}

fn fragment_event(
    item: Result<AgentFragment, LlmError>,
    agent: Domain,
) -> Result<Event, axum::Error> {
    match item {
        Ok(fragment) => Event::default().json_data(&fragment),
        Err(e) => {
            warn!(agent = %agent, error = %e, "Agent stream failed");
            Event::default().json_data(&StreamError {
                error: "The agent stopped responding. Please try again.".to_string(),
                agent: agent.as_str(),
            })
        }
    }
}

fn authorize(state: &AppState, headers: &HeaderMap) -> Result<(), ApiError> {
    let Some(expected) = state.api_token.as_deref() else {
        return Ok(());
    };

    let Some(value) = headers.get(axum::http::header::AUTHORIZATION) else {
        return Err(ApiError::Unauthorized);
    };

    let Ok(value) = value.to_str() else {
        return Err(ApiError::Unauthorized);
    };

    let token = value.strip_prefix("Bearer ").unwrap_or(value);
    if token != expected {
        return Err(ApiError::Unauthorized);
    }

    Ok(())
}
