// Main entry point for API server

use std::sync::Arc;

use anyhow::{Context, Result};
use gemini_client::GeminiClient;
use listing_core::domains::listings::ContentGenerator;
use listing_core::kernel::GeminiGenerator;
use listing_core::server::{build_app, AppState};
use listing_core::Config;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,listing_core=debug,gemini_client=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("Starting listing content API");

    // Load configuration (fails fast without GEMINI_API_KEY)
    let config = Config::from_env().context("Failed to load configuration")?;
    tracing::info!(model = %config.gemini_model, "Configuration loaded");

    let mut client = GeminiClient::new(config.gemini_api_key.clone());
    if let Some(base_url) = &config.gemini_base_url {
        client = client.with_base_url(base_url.clone());
    }

    let generator = ContentGenerator::new(
        Arc::new(GeminiGenerator::new(client)),
        config.generator_config(),
    );

    // Build application
    let app = build_app(AppState::new(generator));

    // Start server
    let addr = format!("0.0.0.0:{}", config.port);
    tracing::info!("Starting server on {}", addr);
    tracing::info!("Health check: http://localhost:{}/health", config.port);

    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .context("Failed to bind to address")?;

    axum::serve(listener, app).await.context("Server error")?;

    Ok(())
}
