//! Server settings from `MEMOIR_*` environment variables

use serde::Deserialize;
use std::path::PathBuf;

#[derive(Debug, Clone, Deserialize)]
pub struct ServerSettings {
    /// `MEMOIR_BIND_ADDRESS`
    #[serde(default = "default_bind_address")]
    pub bind_address: String,
    /// `MEMOIR_MOCK_STORAGE`: serve from an in-process store instead of the remote one
    #[serde(default)]
    pub mock_storage: bool,
    /// `MEMOIR_STATIC_DIR`
    #[serde(default)]
    pub static_dir: Option<PathBuf>,
}

fn default_bind_address() -> String {
    "0.0.0.0:3000".to_string()
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            bind_address: default_bind_address(),
            mock_storage: false,
            static_dir: None,
        }
    }
}

impl ServerSettings {
    pub fn load() -> Result<Self, config::ConfigError> {
        config::Config::builder()
            .add_source(config::Environment::with_prefix("MEMOIR").try_parsing(true))
            .build()?
            .try_deserialize()
    }
}
