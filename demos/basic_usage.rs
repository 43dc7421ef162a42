//! Basic usage example
//!
//! Runs one chat completion through the node the way a workflow host would:
//! build credentials, wrap them in an execution context, and hand the node a
//! batch of items.
//!
//! API keys are configured via environment variables:
//! - AKASHML_API_KEY (required)
//! - AKASHML_BASE_URL (optional, defaults to https://api.akashml.com/v1)
//!
//! Usage:
//!   AKASHML_API_KEY="your_key" cargo run --example basic_usage

use akashml_node::{
    AkashMlCredentials, AkashMlNode, ExecutionContext, InputItem, WorkflowNode, DEFAULT_BASE_URL,
};
use serde_json::json;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize tracing
    tracing_subscriber::fmt::init();

    let api_key = std::env::var("AKASHML_API_KEY").unwrap_or_default();
    if api_key.is_empty() {
        eprintln!("Warning: AKASHML_API_KEY not set. The request will be rejected.");
    }
    let base_url =
        std::env::var("AKASHML_BASE_URL").unwrap_or_else(|_| DEFAULT_BASE_URL.to_string());

    let credentials = AkashMlCredentials::new(api_key, base_url);
    let context = ExecutionContext::new(credentials);

    let parameters = json!({
        "operation": "chatCompletions",
        "model": "Meta-Llama-3-1-8B-Instruct-FP8",
        "messages": {
            "values": [
                { "role": "system", "content": "You are a helpful assistant." },
                { "role": "user", "content": "Hello! Explain decentralized compute briefly." },
            ]
        },
        "temperature": 0.7,
        "maxTokens": 500,
    });

    let output = AkashMlNode
        .execute(vec![InputItem::from_parameters(parameters)], &context)
        .await?;

    for item in &output {
        let text = item.json["text"].as_str().unwrap_or_default();
        println!("Response:\n{text}");
        if let Some(usage) = item.json.get("usage") {
            println!("\nUsage: {usage}");
        }
    }

    Ok(())
}
