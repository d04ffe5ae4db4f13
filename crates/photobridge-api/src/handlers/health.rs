//! Liveness probe.

use axum::{extract::State, Json};
use serde_json::{json, Value};

use crate::AppState;

/// Report liveness and whether the photo integration is enabled.
pub async fn healthz(State(state): State<AppState>) -> Json<Value> {
    Json(json!({
        "status": "ok",
        "immich": state.client.is_some(),
    }))
}
