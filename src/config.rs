use anyhow::{anyhow, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;

pub const DEFAULT_TRANSLATE_URL: &str = "http://localhost:5000";

#[derive(Serialize, Deserialize, Debug, Clone, Default)]
pub struct Config {
    /// Base URL of the LibreTranslate-compatible service.
    pub translate_url: Option<String>,
    pub api_key: Option<String>,
    /// Speech engine program; platform default when unset.
    pub speech_engine: Option<String>,
    /// Pre-fills the language-code field at startup.
    pub default_language: Option<String>,
}

impl Config {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn load() -> Result<Self> {
        let config_path = Self::config_path()?;

        if !config_path.exists() {
            return Ok(Self::new());
        }

        let config_content = fs::read_to_string(&config_path)?;
        let config: Config = serde_json::from_str(&config_content)?;
        Ok(config)
    }

    pub fn translate_url(&self) -> &str {
        self.translate_url.as_deref().unwrap_or(DEFAULT_TRANSLATE_URL)
    }

    fn config_path() -> Result<PathBuf> {
        let config_dir =
            dirs::config_dir().ok_or_else(|| anyhow!("Could not determine config directory"))?;

        Ok(config_dir.join("transpeak").join("config.json"))
    }

    /// Directory for the session log file, next to the config file.
    pub fn log_path() -> Result<PathBuf> {
        let config_dir =
            dirs::config_dir().ok_or_else(|| anyhow!("Could not determine config directory"))?;

        Ok(config_dir.join("transpeak").join("transpeak.log"))
    }
}
