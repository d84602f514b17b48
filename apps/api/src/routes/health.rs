use axum::{extract::State, Json};
use serde_json::{json, Value};

use crate::state::AppState;

/// GET /health
/// Returns service version and the active provider wiring.
pub async fn health_handler(State(state): State<AppState>) -> Json<Value> {
    Json(json!({
        "status": "ok",
        "version": env!("CARGO_PKG_VERSION"),
        "service": "resource-assistant",
        "demo_mode": state.config.demo_mode,
        "llm_provider": state.config.llm_provider.as_str(),
        "places_enabled": state.places.is_some(),
        "active_sessions": state.sessions.count().await,
    }))
}
