//! Configuration management

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

const DEFAULT_PROBE_INTERVAL_SECS: u64 = 30;

/// Persisted CLI settings (`settings.json`)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Settings {
    /// Base URL of a memoir server, e.g. `http://localhost:3000`
    #[serde(default)]
    pub server_url: Option<String>,
    #[serde(default = "default_probe_interval")]
    pub probe_interval_secs: u64,
}

fn default_probe_interval() -> u64 {
    DEFAULT_PROBE_INTERVAL_SECS
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            server_url: None,
            probe_interval_secs: DEFAULT_PROBE_INTERVAL_SECS,
        }
    }
}

impl Settings {
    pub fn probe_interval(&self) -> Duration {
        Duration::from_secs(self.probe_interval_secs.max(1))
    }
}

pub struct SettingsManager {
    home: PathBuf,
}

impl SettingsManager {
    pub fn new(home: impl Into<PathBuf>) -> Self {
        Self { home: home.into() }
    }

    /// `$MEMOIR_HOME`, or `~/.memoir`
    pub fn from_env() -> Result<Self> {
        if let Ok(path) = std::env::var("MEMOIR_HOME") {
            return Ok(Self::new(path));
        }
        let home = dirs::home_dir().context("Could not find home directory")?;
        Ok(Self::new(home.join(".memoir")))
    }

    pub fn home(&self) -> &Path {
        &self.home
    }

    pub fn settings_path(&self) -> PathBuf {
        self.home.join("settings.json")
    }

    /// One file per key lives here
    pub fn cache_dir(&self) -> PathBuf {
        self.home.join("cache")
    }

    /// Load settings from disk, writing the defaults on first run
    pub fn load(&self) -> Result<Settings> {
        let path = self.settings_path();

        if !path.exists() {
            let settings = Settings::default();
            self.save(&settings)?;
            return Ok(settings);
        }

        let content = std::fs::read_to_string(&path)
            .with_context(|| format!("Failed to read settings from {:?}", path))?;
        serde_json::from_str(&content)
            .with_context(|| format!("Failed to parse settings from {:?}", path))
    }

    pub fn save(&self, settings: &Settings) -> Result<()> {
        let path = self.settings_path();

        // Ensure directory exists
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create directory {:?}", parent))?;
        }

        let content =
            serde_json::to_string_pretty(settings).context("Failed to serialize settings")?;

        std::fs::write(&path, content)
            .with_context(|| format!("Failed to write settings to {:?}", path))?;

        // Set permissions on Unix (restrict to owner only)
        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            let mut perms = std::fs::metadata(&path)?.permissions();
            perms.set_mode(0o600);
            std::fs::set_permissions(&path, perms)?;
        }

        Ok(())
    }
}
