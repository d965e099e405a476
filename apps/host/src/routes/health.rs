use axum::{extract::State, Json};
use serde_json::{json, Value};

use crate::state::AppState;

/// GET /ping
/// Returns a simple status object with the deployment environment.
pub async fn ping_handler(State(state): State<AppState>) -> Json<Value> {
    Json(json!({
        "status": "pong",
        "env": state.config.env,
        "version": env!("CARGO_PKG_VERSION"),
        "service": "intake-host"
    }))
}
