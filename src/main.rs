// Main entry point - Dependency injection and server setup
mod application;
mod domain;
mod infrastructure;
mod presentation;

use anyhow::Context;
use std::{net::SocketAddr, sync::Arc};
use tracing_subscriber::EnvFilter;

use crate::application::analytics_service::AnalyticsService;
use crate::application::profile_service::ProfileAdviceService;
use crate::infrastructure::config::load_app_config;
use crate::infrastructure::csv_usage_source::CsvUsageSource;
use crate::infrastructure::openai_client::OpenAiAdviceClient;
use crate::presentation::app_state::AppState;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("aquasense=info,tower_http=info"));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    // Load configuration
    let config = load_app_config()?;

    // Create adapters (infrastructure layer)
    let api_key = config.advice.api_key_from_env();
    if api_key.is_none() {
        tracing::warn!(
            env = %config.advice.api_key_env,
            "API key not set; advice requests will fail until it is provided"
        );
    }
    let generator = Arc::new(
        OpenAiAdviceClient::new(&config.advice, api_key).context("building advice client")?,
    );
    let source = Arc::new(CsvUsageSource::new(&config.data.usage_csv));

    // Create services (application layer)
    let analytics_service = AnalyticsService::new(source, generator.clone());
    let profile_service = ProfileAdviceService::new(generator);

    let state = Arc::new(AppState {
        analytics_service,
        profile_service,
    });

    // Build router (presentation layer)
    let router = presentation::router(state);

    let addr: SocketAddr = config
        .server
        .bind_addr
        .parse()
        .with_context(|| format!("invalid bind address '{}'", config.server.bind_addr))?;
    tracing::info!(%addr, model = %config.advice.model, "Starting aquasense advice service");

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("binding {}", addr))?;
    axum::serve(listener, router).await?;

    Ok(())
}
