use std::sync::Arc;

use api::{app, ApiConfig, AppState};
use cerebras_llm::CerebrasLlm;
use supervisor::{InMemoryStore, LlmProvider, Supervisor, SupervisorConfig};
use tracing::info;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let _ = dotenvy::dotenv();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let config = ApiConfig::from_env()?;
    let llm: Arc<dyn LlmProvider> = Arc::new(CerebrasLlm::from_env()?);
    let supervisor = Supervisor::new(Arc::clone(&llm), SupervisorConfig::from_env())?;

    let state = AppState {
        supervisor: Arc::new(supervisor),
        llm,
        memory: Arc::new(InMemoryStore::new()),
        api_token: config.api_token.clone(),
    };

    info!(
        addr = %config.addr,
        auth = config.api_token.is_some(),
        "Supervisor API listening"
    );

    let listener = tokio::net::TcpListener::bind(config.addr).await?;
    axum::serve(listener, app(state)).await?;

    Ok(())
}
