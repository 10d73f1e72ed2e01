//! Envelopes exchanged with the storage HTTP boundary

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Successful read: `data` is `null` when the key is absent
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReadResponse {
    pub success: bool,
    pub data: Value,
    pub timestamp: DateTime<Utc>,
}

impl ReadResponse {
    pub fn new(data: Option<Value>) -> Self {
        Self {
            success: true,
            data: data.unwrap_or(Value::Null),
            timestamp: Utc::now(),
        }
    }
}

/// Successful write, delete or health check
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AckResponse {
    pub success: bool,
    pub message: String,
    pub timestamp: DateTime<Utc>,
}

impl AckResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            success: true,
            message: message.into(),
            timestamp: Utc::now(),
        }
    }
}

/// Failure body returned with a non-2xx status
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
    #[serde(default)]
    pub details: Value,
}

impl ErrorResponse {
    pub fn new(error: impl Into<String>, details: impl Into<Value>) -> Self {
        Self {
            error: error.into(),
            details: details.into(),
        }
    }
}

/// Write request body
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WriteRequest {
    #[serde(default)]
    pub data: Value,
}

/// Lenient view over any envelope the boundary may return
#[derive(Debug, Clone, Default, Deserialize)]
pub struct StorageEnvelope {
    #[serde(default)]
    pub success: bool,
    #[serde(default)]
    pub data: Option<Value>,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub error: Option<String>,
}

impl StorageEnvelope {
    /// The payload, if the envelope reports success and carries non-null data
    pub fn into_data(self) -> Option<Value> {
        if !self.success {
            return None;
        }
        self.data.filter(|v| !v.is_null())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_read_response_keeps_null_data() {
        let json = serde_json::to_value(ReadResponse::new(None)).unwrap();
        assert!(json.get("data").unwrap().is_null());
        assert_eq!(json["success"], true);
    }

    #[test]
    fn test_envelope_into_data() {
        let ok: StorageEnvelope =
            serde_json::from_str(r#"{"success":true,"data":[1,2],"timestamp":"x"}"#).unwrap();
        assert_eq!(ok.into_data(), Some(serde_json::json!([1, 2])));

        let empty: StorageEnvelope = serde_json::from_str(r#"{"success":true,"data":null}"#).unwrap();
        assert_eq!(empty.into_data(), None);

        let failed: StorageEnvelope =
            serde_json::from_str(r#"{"error":"boom","details":"x"}"#).unwrap();
        assert_eq!(failed.error.as_deref(), Some("boom"));
        assert_eq!(failed.into_data(), None);
    }
}
