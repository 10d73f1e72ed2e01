//! HTTP client for the storage boundary (`/storage/{key}`)

use crate::error::{MemoirError, Result};
use crate::ports::RemoteTier;
use async_trait::async_trait;
use memoir_types::{is_valid_key, StorageEnvelope, WriteRequest, HEALTH_CHECK_ROUTE};
use reqwest::{header, Client as ReqwestClient, Response};
use serde_json::Value;

pub struct StorageApiClient {
    http: ReqwestClient,
    base_url: String,
}

impl StorageApiClient {
    /// `base_url` is the prefix the `/storage` routes hang off, e.g. `http://host/api`
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            http: ReqwestClient::new(),
            base_url: base_url.into().trim_end_matches('/').to_string(),
        }
    }

    pub fn with_http(mut self, http: ReqwestClient) -> Self {
        self.http = http;
        self
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn key_url(&self, key: &str) -> Result<String> {
        if !is_valid_key(key) {
            return Err(MemoirError::InvalidKey(key.to_string()));
        }
        Ok(format!("{}/storage/{}", self.base_url, urlencoding::encode(key)))
    }

    /// Parse the envelope, turning a non-2xx status or `success: false` into an error
    async fn envelope(response: Response) -> Result<StorageEnvelope> {
        let status = response.status();
        let body = response.text().await?;
        let envelope: StorageEnvelope = serde_json::from_str(&body).unwrap_or_default();

        if !status.is_success() || !envelope.success {
            let message = envelope
                .error
                .clone()
                .unwrap_or_else(|| status.canonical_reason().unwrap_or("Unknown error").to_string());
            return Err(MemoirError::Remote {
                status: status.as_u16(),
                message,
            });
        }

        Ok(envelope)
    }
}

#[async_trait]
impl RemoteTier for StorageApiClient {
    async fn fetch(&self, key: &str) -> Result<Option<Value>> {
        let response = self
            .http
            .get(self.key_url(key)?)
            .header(header::CACHE_CONTROL, "no-store")
            .send()
            .await?;

        Ok(Self::envelope(response).await?.into_data())
    }

    async fn store(&self, key: &str, value: &Value) -> Result<()> {
        let response = self
            .http
            .post(self.key_url(key)?)
            .json(&WriteRequest {
                data: value.clone(),
            })
            .send()
            .await?;

        Self::envelope(response).await?;
        Ok(())
    }

    async fn remove(&self, key: &str) -> Result<()> {
        let response = self.http.delete(self.key_url(key)?).send().await?;

        Self::envelope(response).await?;
        Ok(())
    }

    async fn health(&self) -> Result<()> {
        let response = self
            .http
            .get(format!("{}/storage/{}", self.base_url, HEALTH_CHECK_ROUTE))
            .header(header::CACHE_CONTROL, "no-store")
            .send()
            .await?;

        if response.status().is_success() {
            Ok(())
        } else {
            Err(MemoirError::HealthCheck(format!(
                "storage health check returned {}",
                response.status()
            )))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cache::LocalCache;
    use crate::gateway::SyncGateway;
    use crate::platform::MemoryStorage;
    use crate::test_http::serve;
    use axum::http::StatusCode;
    use axum::routing::get;
    use axum::{Json, Router};
    use serde_json::json;
    use std::sync::Arc;

    /// Boundary answering like a server without a configured store
    async fn not_configured() -> (StatusCode, Json<Value>) {
        (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(json!({
                "error": "Redis not available",
                "details": "Missing KV_REST_API_URL or KV_REST_API_TOKEN environment variables"
            })),
        )
    }

    async fn stored_list() -> Json<Value> {
        Json(json!({ "success": true, "data": [1, 2], "timestamp": "2024-02-14T00:00:00Z" }))
    }

    async fn refused_write() -> Json<Value> {
        Json(json!({ "success": false, "error": "write refused" }))
    }

    async fn boundary() -> String {
        let app = Router::new()
            .route(
                "/down/storage/:key",
                get(not_configured).post(not_configured).delete(not_configured),
            )
            .route("/up/storage/:key", get(stored_list).post(refused_write));
        serve(app).await
    }

    #[tokio::test]
    async fn test_error_envelope_becomes_remote_error() {
        let base = boundary().await;
        let client = StorageApiClient::new(format!("{}/down", base));

        match client.fetch("memoir_todos").await {
            Err(MemoirError::Remote { status, message }) => {
                assert_eq!(status, 500);
                assert_eq!(message, "Redis not available");
            }
            other => panic!("expected remote error, got {:?}", other),
        }
        assert!(client.store("memoir_todos", &json!([])).await.is_err());
        assert!(client.remove("memoir_todos").await.is_err());
        assert!(client.health().await.is_err());
    }

    #[tokio::test]
    async fn test_success_flag_is_checked() {
        let base = boundary().await;
        let client = StorageApiClient::new(format!("{}/up", base));

        assert_eq!(client.fetch("memoir_todos").await.unwrap(), Some(json!([1, 2])));
        match client.store("memoir_todos", &json!([3])).await {
            Err(MemoirError::Remote { status, message }) => {
                assert_eq!(status, 200);
                assert_eq!(message, "write refused");
            }
            other => panic!("expected remote error, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_gateway_serves_local_when_server_errors() {
        let base = boundary().await;
        let storage = Arc::new(MemoryStorage::new());
        let local = LocalCache::new(storage.clone());
        local.save("memoir_todos", &json!(["water the plants"]));

        let gateway = SyncGateway::new(
            local,
            Arc::new(StorageApiClient::new(format!("{}/down", base))),
        );
        assert_eq!(
            gateway.load("memoir_todos", json!([])).await,
            json!(["water the plants"])
        );
        assert!(!gateway.is_available().await);

        // The failed remote write leaves the local write in place
        gateway.save("memoir_todos", &json!(["call mom"])).await;
        assert_eq!(gateway.load_local("memoir_todos", json!([])), json!(["call mom"]));
    }

    #[test]
    fn test_key_urls_are_encoded() {
        let client = StorageApiClient::new("http://localhost:3000/api/");
        assert_eq!(client.base_url(), "http://localhost:3000/api");
        assert_eq!(
            client.key_url("memoir_todos").unwrap(),
            "http://localhost:3000/api/storage/memoir_todos"
        );
        assert_eq!(
            client.key_url("a b/c").unwrap(),
            "http://localhost:3000/api/storage/a%20b%2Fc"
        );
        assert!(matches!(
            client.key_url("  "),
            Err(MemoirError::InvalidKey(_))
        ));
    }

    #[tokio::test]
    async fn test_unreachable_server_is_an_error() {
        // Port 9 (discard) on localhost is expected to refuse connections
        let client = StorageApiClient::new("http://127.0.0.1:9/api");
        assert!(client.fetch("memoir_todos").await.is_err());
        assert!(client.health().await.is_err());
    }
}
