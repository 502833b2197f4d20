//! Simple test for CerebrasLlm completions.
//!
//! Run with: cargo run -p cerebras-llm --example test_completion
//! Or with a custom prompt: cargo run -p cerebras-llm --example test_completion -- "Your prompt"
//! Add `--stream` as the first argument to print fragments as they arrive.
//!
//! Make sure to set environment variables in .env:
//!   CEREBRAS_API_KEY - Cerebras API key for authentication

use std::env;
use std::io::Write;

use cerebras_llm::{CerebrasLlm, CompletionRequest, LlmProvider};
use futures::StreamExt;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let _ = dotenvy::dotenv();

    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let mut args: Vec<String> = env::args().skip(1).collect();
    let stream = args.first().map(|a| a == "--stream").unwrap_or(false);
    if stream {
        args.remove(0);
    }
    let prompt = if args.is_empty() {
        "Hello! Please respond with a short greeting.".to_string()
    } else {
        args.join(" ")
    };

    println!("Initializing CerebrasLlm...");
    let llm = CerebrasLlm::from_env()?;
    println!("Provider: {}", llm.name());
    println!("API URL: {}", llm.config().api_url);
    println!("Model: {}", llm.config().model);
    println!();

    println!("Sending: \"{}\"", prompt);
    println!("Waiting for response...\n");

    let request = CompletionRequest::prompt(prompt);

    println!("=== Response ===");
    if stream {
        let mut fragments = llm.complete_streaming(request).await?;
        while let Some(fragment) = fragments.next().await {
            print!("{}", fragment?);
            std::io::stdout().flush()?;
        }
        println!();
    } else {
        println!("{}", llm.complete(request).await?);
    }
    println!("================");

    Ok(())
}
