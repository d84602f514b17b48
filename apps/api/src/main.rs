mod config;
mod demo;
mod errors;
mod intake;
mod llm_client;
mod models;
mod places;
mod recommendations;
mod render;
mod routes;
mod session;
mod state;

use std::net::SocketAddr;
use std::time::Duration;

use anyhow::{Context, Result};
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::{Config, LlmProviderKind};
use crate::llm_client::build_advisor;
use crate::places::build_place_search;
use crate::routes::build_router;
use crate::session::store::SWEEP_INTERVAL;
use crate::state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!(
                "{}={}",
                env!("CARGO_PKG_NAME").replace('-', "_"),
                &config.rust_log
            ))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting Resource Assistant API v{}", env!("CARGO_PKG_VERSION"));

    let http = reqwest::Client::builder()
        .timeout(Duration::from_secs(config.http_timeout_secs))
        .build()
        .context("Failed to build HTTP client")?;

    let advisor = build_advisor(&config, http.clone());
    info!(
        "LLM client initialized (provider: {})",
        config.llm_provider.as_str()
    );

    let places = build_place_search(&config, http);
    info!("Places lookup {}", if places.is_some() { "enabled" } else { "disabled" });

    if config.demo_mode {
        info!("Sessions default to demo mode");
    } else if advisor_key_missing(&config) {
        warn!("Live mode is the default but no API key is configured for the selected provider");
    }

    let state = AppState::new(config.clone(), advisor, places);
    state.sessions.spawn_sweeper(SWEEP_INTERVAL);
    info!("Idle sessions expire after {}s", config.session_ttl_secs);

    let app = build_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive());

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

fn advisor_key_missing(config: &Config) -> bool {
    match config.llm_provider {
        LlmProviderKind::Anthropic => config.anthropic_api_key.is_none(),
        LlmProviderKind::OpenAi => config.openai_api_key.is_none(),
    }
}
