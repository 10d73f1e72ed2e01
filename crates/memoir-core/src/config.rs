//! Remote store configuration

use tracing::warn;

/// Environment variable holding the REST endpoint of the key-value store
pub const KV_URL_VAR: &str = "KV_REST_API_URL";
/// Environment variable holding the bearer token of the key-value store
pub const KV_TOKEN_VAR: &str = "KV_REST_API_TOKEN";

/// URL + token pair of the hosted key-value store. Both are required.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RemoteConfig {
    pub url: String,
    pub token: String,
}

impl RemoteConfig {
    /// Build from optional parts; `None` unless both are present and non-empty
    pub fn from_parts(url: Option<String>, token: Option<String>) -> Option<Self> {
        let url = url.filter(|u| !u.trim().is_empty())?;
        let token = token.filter(|t| !t.trim().is_empty())?;
        Some(Self {
            url: url.trim_end_matches('/').to_string(),
            token,
        })
    }

    /// Read `KV_REST_API_URL` and `KV_REST_API_TOKEN`; a missing half disables the remote tier
    pub fn from_env() -> Option<Self> {
        let url = std::env::var(KV_URL_VAR).ok();
        let token = std::env::var(KV_TOKEN_VAR).ok();

        if url.is_some() != token.is_some() {
            warn!(
                "Incomplete remote store configuration: {}={}, {}={}",
                KV_URL_VAR,
                presence(url.is_some()),
                KV_TOKEN_VAR,
                presence(token.is_some())
            );
        }

        Self::from_parts(url, token)
    }

    pub fn is_https(&self) -> bool {
        self.url.starts_with("https://")
    }
}

fn presence(present: bool) -> &'static str {
    if present {
        "present"
    } else {
        "missing"
    }
}
