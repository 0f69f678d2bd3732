//! Groq Web Chat - server entry point
//!
//! Loads configuration, wires the provider client and session store into the
//! router, and serves the single-page chat.

use std::sync::Arc;

use anyhow::Context;
use clap::Parser;
use tower_http::trace::TraceLayer;

use groq_web_chat::config::{AppConfig, Args};
use groq_web_chat::handlers::{AppState, build_router};
use groq_web_chat::infrastructure::{GroqClient, InMemorySessionStore};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .init();

    // Fail fast on missing API key, before binding the socket
    let config = AppConfig::from_args(Args::parse()).context("Invalid configuration")?;

    tracing::info!(
        base_url = %config.base_url,
        vision_model = %config.vision_model,
        "Starting Groq Web Chat..."
    );

    let provider = GroqClient::from_config(&config).context("Failed to build provider client")?;
    let state = AppState::new(Arc::new(provider), Arc::new(InMemorySessionStore::new()));

    let app = build_router(state).layer(TraceLayer::new_for_http());

    let listener = tokio::net::TcpListener::bind(config.bind_addr)
        .await
        .with_context(|| format!("Failed to bind {}", config.bind_addr))?;
    tracing::info!("Server running on http://{}", config.bind_addr);

    axum::serve(listener, app).await.context("Server error")?;
    Ok(())
}
