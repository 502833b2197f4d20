//! Route a message through the supervisor using the Cerebras provider.
//!
//! Run with: cargo run -p supervisor --example route_message -- "best hiking trails in Peru"
//!
//! Make sure to set environment variables in .env:
//!   CEREBRAS_API_KEY - Cerebras API key for authentication

use std::env;
use std::sync::Arc;

use cerebras_llm::CerebrasLlm;
use supervisor::{Supervisor, SupervisorConfig};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let _ = dotenvy::dotenv();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let args: Vec<String> = env::args().skip(1).collect();
    let message = if args.is_empty() {
        "What is the current stock price of NVIDIA?".to_string()
    } else {
        args.join(" ")
    };

    let llm = Arc::new(CerebrasLlm::from_env()?);
    let supervisor = Supervisor::new(llm, SupervisorConfig::from_env())?;
    println!("Classifier prompt fingerprint: {}", supervisor.prompt_hash());

    println!("Routing: \"{}\"", message);
    let decision = supervisor.route(&message, "example-user", &[], None).await?;

    println!("=== Decision ===");
    println!("{}", serde_json::to_string_pretty(&decision)?);
    println!("================");

    Ok(())
}
