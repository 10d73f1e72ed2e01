//! Health handlers

use super::{failure, ApiError};
use crate::AppState;
use axum::{extract::State, http::StatusCode, Json};
use memoir_core::config::{KV_TOKEN_VAR, KV_URL_VAR};
use memoir_core::kv::round_trip_probe;
use memoir_types::AckResponse;
use serde_json::{json, Map, Value};
use tracing::error;

/// Process liveness
pub async fn health() -> Json<Value> {
    Json(json!({ "status": "ok" }))
}

/// Round-trip a sentinel key through the key-value store
pub async fn storage_health(
    State(state): State<AppState>,
) -> Result<Json<AckResponse>, ApiError> {
    let Some(kv) = state.kv.client() else {
        return Err(failure(
            StatusCode::INTERNAL_SERVER_ERROR,
            "Redis not configured",
            env_presence(),
        ));
    };

    match round_trip_probe(kv.as_ref()).await {
        Ok(()) => Ok(Json(AckResponse::new("Redis connection healthy"))),
        Err(e) => {
            error!("Storage health check failed: {}", e);
            Err(failure(
                StatusCode::INTERNAL_SERVER_ERROR,
                "Redis health check failed",
                e.to_string(),
            ))
        }
    }
}

pub(crate) fn env_presence() -> Value {
    let mut details = Map::new();
    for var in [KV_URL_VAR, KV_TOKEN_VAR] {
        let state = if std::env::var(var).is_ok() {
            "present"
        } else {
            "missing"
        };
        details.insert(var.to_string(), Value::String(state.to_string()));
    }
    Value::Object(details)
}
