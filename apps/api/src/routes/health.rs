use axum::{extract::State, Json};
use serde_json::{json, Value};

use crate::state::AppState;

/// GET /health
/// Returns a simple status object with service version and gateway backend.
pub async fn health_handler(State(state): State<AppState>) -> Json<Value> {
    let revision = state.session.read().await.revision();
    Json(json!({
        "status": "ok",
        "version": env!("CARGO_PKG_VERSION"),
        "service": "resume-api",
        "enhancer": state.enhancer.backend(),
        "revision": revision
    }))
}
