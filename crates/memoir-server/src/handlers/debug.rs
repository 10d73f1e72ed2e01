//! Configuration diagnostics
//!
//! Reports whether the remote store variables are set without ever echoing
//! them: the URL is reduced to its scheme, the token to a short prefix and
//! its length.

use super::health::env_presence;
use super::{failure, ApiError};
use crate::AppState;
use axum::{extract::State, http::StatusCode, Json};
use chrono::Utc;
use memoir_core::config::{KV_TOKEN_VAR, KV_URL_VAR};
use memoir_core::{KvStore, SetOptions};
use memoir_types::health_check_key;
use serde::Serialize;
use serde_json::Value;
use tracing::{error, info};

const TOKEN_PREFIX_CHARS: usize = 4;

/// Value and expiry of the key written by [`kv_test`]
const TEST_VALUE: &str = "connection_test";
const TEST_TTL_SECS: u64 = 60;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct KvDebugResponse {
    pub env: Value,
    pub url_format: Option<&'static str>,
    pub token_preview: Option<String>,
    pub token_length: Option<usize>,
    pub client_ready: bool,
    pub mock_storage: bool,
    pub timestamp: chrono::DateTime<Utc>,
}

pub async fn kv_debug(State(state): State<AppState>) -> Json<KvDebugResponse> {
    let url = std::env::var(KV_URL_VAR).ok();
    let token = std::env::var(KV_TOKEN_VAR).ok();

    Json(KvDebugResponse {
        env: env_presence(),
        url_format: url.as_deref().map(url_format),
        token_preview: token.as_deref().map(token_preview),
        token_length: token.as_ref().map(|t| t.chars().count()),
        client_ready: state.kv.is_available(),
        mock_storage: state.settings.mock_storage,
        timestamp: Utc::now(),
    })
}

/// Outcome of each step of [`kv_test`]
#[derive(Debug, Serialize)]
pub struct KvTestOperations {
    pub set: bool,
    pub get: bool,
    pub delete: bool,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct KvTestReport {
    pub success: bool,
    pub message: String,
    pub test_key: String,
    pub retrieved_value: Option<Value>,
    pub operations: KvTestOperations,
    pub timestamp: chrono::DateTime<Utc>,
}

/// Step-by-step connection test: set, get and delete a sentinel key,
/// reporting each step instead of a single verdict
pub async fn kv_test(State(state): State<AppState>) -> Result<Json<KvTestReport>, ApiError> {
    let Some(kv) = state.kv.client() else {
        return Err(failure(
            StatusCode::INTERNAL_SERVER_ERROR,
            "Missing KV environment variables",
            env_presence(),
        ));
    };

    if let Some(config) = state.kv.config() {
        if !config.is_https() {
            return Err(failure(
                StatusCode::INTERNAL_SERVER_ERROR,
                "Invalid KV_REST_API_URL format",
                "Should start with https://",
            ));
        }
    }

    let test_key = health_check_key(Utc::now().timestamp_millis());
    let expected = Value::String(TEST_VALUE.to_string());
    let operation_failed = |step: &str, e: memoir_core::MemoirError| {
        error!("KV test {} failed: {}", step, e);
        failure(
            StatusCode::INTERNAL_SERVER_ERROR,
            "KV operation failed",
            format!("{}: {}", step, e),
        )
    };

    kv.set(&test_key, &expected, SetOptions::expire_in(TEST_TTL_SECS))
        .await
        .map_err(|e| operation_failed("set", e))?;
    let retrieved_value = kv
        .get(&test_key)
        .await
        .map_err(|e| operation_failed("get", e))?;
    kv.del(&test_key)
        .await
        .map_err(|e| operation_failed("delete", e))?;

    let consistent = retrieved_value.as_ref() == Some(&expected);
    info!("KV test on {}: consistent={}", test_key, consistent);

    Ok(Json(KvTestReport {
        success: consistent,
        message: if consistent {
            "KV connection test successful".to_string()
        } else {
            format!("Data mismatch: expected {:?}", TEST_VALUE)
        },
        test_key,
        retrieved_value,
        operations: KvTestOperations {
            set: true,
            get: consistent,
            delete: true,
        },
        timestamp: Utc::now(),
    }))
}

fn url_format(url: &str) -> &'static str {
    if url.starts_with("https://") {
        "https"
    } else if url.starts_with("http://") {
        "http"
    } else {
        "invalid"
    }
}

fn token_preview(token: &str) -> String {
    let prefix: String = token.chars().take(TOKEN_PREFIX_CHARS).collect();
    format!("{}...", prefix)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_token_preview_never_leaks_more_than_prefix() {
        assert_eq!(token_preview("AXyz0123456789"), "AXyz...");
        assert_eq!(token_preview("ab"), "ab...");
    }

    #[test]
    fn test_url_format() {
        assert_eq!(url_format("https://kv.example"), "https");
        assert_eq!(url_format("http://localhost:8079"), "http");
        assert_eq!(url_format("kv.example"), "invalid");
    }
}
