//! Storage handlers: `/api/storage/:key`

use super::{failure, ApiError};
use crate::AppState;
use axum::{
    extract::{rejection::JsonRejection, Path, State},
    http::StatusCode,
    Json,
};
use memoir_core::config::{KV_TOKEN_VAR, KV_URL_VAR};
use memoir_core::{KvStore, SetOptions};
use memoir_types::{is_valid_key, AckResponse, ReadResponse, WriteRequest};
use std::sync::Arc;
use tracing::{debug, error};

fn store(state: &AppState) -> Result<Arc<dyn KvStore>, ApiError> {
    state.kv.require().map_err(|_| {
        failure(
            StatusCode::INTERNAL_SERVER_ERROR,
            "Redis not available",
            format!(
                "Missing {} or {} environment variables",
                KV_URL_VAR, KV_TOKEN_VAR
            ),
        )
    })
}

fn check_key(key: &str) -> Result<(), ApiError> {
    if is_valid_key(key) {
        Ok(())
    } else {
        Err(failure(
            StatusCode::BAD_REQUEST,
            "Invalid key",
            "Key must not be empty",
        ))
    }
}

pub async fn get(
    State(state): State<AppState>,
    Path(key): Path<String>,
) -> Result<Json<ReadResponse>, ApiError> {
    check_key(&key)?;
    let kv = store(&state)?;

    match kv.get(&key).await {
        Ok(data) => {
            debug!("GET {} -> {}", key, if data.is_some() { "hit" } else { "miss" });
            Ok(Json(ReadResponse::new(data)))
        }
        Err(e) => {
            error!("Failed to fetch {}: {}", key, e);
            Err(failure(
                StatusCode::INTERNAL_SERVER_ERROR,
                "Failed to fetch data",
                e.to_string(),
            ))
        }
    }
}

pub async fn save(
    State(state): State<AppState>,
    Path(key): Path<String>,
    body: Result<Json<WriteRequest>, JsonRejection>,
) -> Result<Json<AckResponse>, ApiError> {
    check_key(&key)?;
    let Json(req) = body.map_err(|rejection| {
        failure(
            StatusCode::BAD_REQUEST,
            "Invalid request body",
            rejection.body_text(),
        )
    })?;
    let kv = store(&state)?;

    // A null payload is an absent value
    let result = if req.data.is_null() {
        kv.del(&key).await
    } else {
        kv.set(&key, &req.data, SetOptions::default()).await
    };

    match result {
        Ok(()) => Ok(Json(AckResponse::new("Data saved successfully"))),
        Err(e) => {
            error!("Failed to save {}: {}", key, e);
            Err(failure(
                StatusCode::INTERNAL_SERVER_ERROR,
                "Failed to save data",
                e.to_string(),
            ))
        }
    }
}

pub async fn delete(
    State(state): State<AppState>,
    Path(key): Path<String>,
) -> Result<Json<AckResponse>, ApiError> {
    check_key(&key)?;
    let kv = store(&state)?;

    match kv.del(&key).await {
        Ok(()) => Ok(Json(AckResponse::new("Data deleted successfully"))),
        Err(e) => {
            error!("Failed to delete {}: {}", key, e);
            Err(failure(
                StatusCode::INTERNAL_SERVER_ERROR,
                "Failed to delete data",
                e.to_string(),
            ))
        }
    }
}
