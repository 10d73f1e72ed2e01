//! REST client for a hosted Redis (Upstash-compatible) store

use crate::config::RemoteConfig;
use crate::error::{MemoirError, Result};
use crate::ports::{KvStore, SetOptions};
use async_trait::async_trait;
use reqwest::Client as ReqwestClient;
use serde::Deserialize;
use serde_json::Value;
use tracing::{debug, error};

/// Sends Redis commands as JSON arrays to the REST endpoint.
///
/// Values are stored JSON-encoded (plain strings are stored as-is) and decoded
/// on read; a stored string that is not valid JSON comes back as a JSON string.
pub struct UpstashClient {
    http: ReqwestClient,
    config: RemoteConfig,
}

#[derive(Debug, Default, Deserialize)]
struct CommandResponse {
    #[serde(default)]
    result: Option<Value>,
    #[serde(default)]
    error: Option<String>,
}

impl UpstashClient {
    pub fn new(config: RemoteConfig) -> Self {
        Self {
            http: ReqwestClient::new(),
            config,
        }
    }

    pub fn with_http(mut self, http: ReqwestClient) -> Self {
        self.http = http;
        self
    }

    async fn command(&self, args: Vec<String>) -> Result<Option<Value>> {
        let verb = args.first().cloned().unwrap_or_default();
        debug!("KV {} {}", verb, args.get(1).map(String::as_str).unwrap_or(""));

        let response = self
            .http
            .post(&self.config.url)
            .bearer_auth(&self.config.token)
            .json(&args)
            .send()
            .await
            .map_err(|e| {
                error!("KV {} error: {}", verb, e);
                MemoirError::from(e)
            })?;

        let status = response.status();
        let body = response.text().await?;
        let parsed: CommandResponse = serde_json::from_str(&body).unwrap_or_default();

        if !status.is_success() || parsed.error.is_some() {
            let message = parsed
                .error
                .unwrap_or_else(|| status.canonical_reason().unwrap_or("Unknown error").to_string());
            error!("KV {} error: {}", verb, message);
            return Err(MemoirError::Remote {
                status: status.as_u16(),
                message,
            });
        }

        Ok(parsed.result)
    }
}

#[async_trait]
impl KvStore for UpstashClient {
    async fn get(&self, key: &str) -> Result<Option<Value>> {
        let result = self.command(vec!["GET".into(), key.into()]).await?;
        Ok(decode_value(result))
    }

    async fn set(&self, key: &str, value: &Value, options: SetOptions) -> Result<()> {
        self.command(set_command(key, value, options)).await?;
        Ok(())
    }

    async fn del(&self, key: &str) -> Result<()> {
        self.command(vec!["DEL".into(), key.into()]).await?;
        Ok(())
    }
}

/// Strings are stored verbatim, everything else as its JSON text
pub(crate) fn encode_value(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

pub(crate) fn decode_value(result: Option<Value>) -> Option<Value> {
    match result? {
        Value::Null => None,
        Value::String(raw) => {
            Some(serde_json::from_str(&raw).unwrap_or(Value::String(raw)))
        }
        other => Some(other),
    }
}

pub(crate) fn set_command(key: &str, value: &Value, options: SetOptions) -> Vec<String> {
    let mut args = vec!["SET".to_string(), key.to_string(), encode_value(value)];
    if let Some(secs) = options.expiry_secs {
        args.push("EX".to_string());
        args.push(secs.to_string());
    }
    args
}
