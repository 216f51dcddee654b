use axum::{extract::State, Json};
use serde_json::{json, Value};

use crate::state::AppState;

/// GET /health
///
/// Liveness plus which platform and matcher backends this process was started with.
pub async fn health_handler(State(state): State<AppState>) -> Json<Value> {
    let config = &state.config;
    let platform = if config.platform_base_url.is_some() {
        "live"
    } else {
        "simulated"
    };
    let matcher = if config.enable_llm_matching && config.anthropic_api_key.is_some() {
        "llm"
    } else {
        "keyword"
    };

    Json(json!({
        "status": "ok",
        "service": env!("CARGO_PKG_NAME"),
        "version": env!("CARGO_PKG_VERSION"),
        "platform": platform,
        "matcher": matcher
    }))
}
