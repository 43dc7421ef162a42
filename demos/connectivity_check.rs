//! AkashML connectivity check
//!
//! Verifies the configured credentials the way a host's "test credentials"
//! button does (GET /models with the bearer key), then prints the models the
//! dropdown would offer.
//!
//! Usage:
//!   AKASHML_API_KEY="your_key" cargo run --example connectivity_check

use akashml_node::credentials::{CREDENTIAL_DISPLAY_NAME, CREDENTIAL_DOCUMENTATION_URL};
use akashml_node::{
    credential_properties, AkashMlCredentials, AkashMlNode, ExecutionContext, WorkflowNode,
    DEFAULT_BASE_URL,
};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env().add_directive("info".parse()?),
        )
        .init();

    println!("{CREDENTIAL_DISPLAY_NAME} credential form (docs: {CREDENTIAL_DOCUMENTATION_URL}):");
    for property in credential_properties() {
        let secret = if property.password { " (secret)" } else { "" };
        println!("  {} [{}]{}: {}", property.name, property.kind, secret, property.description);
    }
    println!();

    let api_key = std::env::var("AKASHML_API_KEY").unwrap_or_default();
    if api_key.is_empty() {
        eprintln!("Warning: AKASHML_API_KEY not set. Verification will fail.");
    }
    let base_url =
        std::env::var("AKASHML_BASE_URL").unwrap_or_else(|_| DEFAULT_BASE_URL.to_string());
    let credentials = AkashMlCredentials::new(api_key, base_url);

    print!("Verifying credentials against {} ... ", credentials.normalized_base_url());
    let client = reqwest::Client::new();
    match credentials.verify(&client).await {
        Ok(()) => println!("ok"),
        Err(err) => {
            println!("failed");
            eprintln!("  {err}");
            return Err(err.into());
        }
    }

    let context = ExecutionContext::new(credentials);
    let models = AkashMlNode.list_models(&context).await?;
    println!("\n{} models available:", models.len());
    for model in models.iter().take(20) {
        println!("  {}", model.value);
    }
    if models.len() > 20 {
        println!("  ... and {} more", models.len() - 20);
    }

    Ok(())
}
