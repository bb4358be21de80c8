use std::path::Path;
use std::time::Duration;

use anyhow::{Context, Result};
use serde::Deserialize;

use mapcompose::ComposeSettings;

#[derive(Debug, Deserialize)]
pub struct Config {
    pub base_url: String,
    #[serde(default)]
    pub username: Option<String>,
    #[serde(default)]
    pub password: Option<String>,
    #[serde(default = "default_history_clear_secs")]
    pub history_clear_secs: u64,
    #[serde(default = "default_alert_fade_ms")]
    pub alert_fade_ms: u64,
}

fn default_history_clear_secs() -> u64 {
    5
}

fn default_alert_fade_ms() -> u64 {
    3000
}

impl Config {
    pub fn load(path: &Path) -> Result<Self> {
        let raw = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {:?}", path))?;
        Self::parse(&raw).with_context(|| format!("Failed to parse config file: {:?}", path))
    }

    pub fn parse(raw: &str) -> Result<Self> {
        let config: Config = serde_yaml::from_str(raw)?;
        anyhow::ensure!(!config.base_url.trim().is_empty(), "base_url must not be empty");
        Ok(config)
    }

    pub fn settings(&self) -> ComposeSettings {
        ComposeSettings {
            history_clear_delay: Duration::from_secs(self.history_clear_secs),
            alert_fade: Duration::from_millis(self.alert_fade_ms),
        }
    }
}
