//! Configuration file (chatdock.toml) loading.

use std::fs;
use std::path::Path;
use std::time::Duration;

use anyhow::Result;
use serde::Deserialize;

use chatdock_llm::{
    ChatSettings, DEFAULT_ENDPOINT, DEFAULT_MAX_TOKENS, DEFAULT_MODEL, DEFAULT_TEMPERATURE,
    DEFAULT_TIMEOUT_SECS,
};

/// Configuration file structure (chatdock.toml).
#[derive(Debug, Deserialize, Default)]
pub struct ConfigFile {
    #[serde(default)]
    pub site: SiteConfig,
    #[serde(default)]
    pub chat: ChatConfig,
    #[serde(default)]
    pub server: ServerConfig,
}

#[derive(Debug, Deserialize)]
pub struct SiteConfig {
    #[serde(default = "default_site_dir")]
    pub dir: String,
}

#[derive(Debug, Deserialize)]
pub struct ChatConfig {
    /// Required; validated when the file is loaded
    pub api_key: Option<String>,
    #[serde(default = "default_model")]
    pub model: String,
    #[serde(default = "default_temperature")]
    pub temperature: f64,
    #[serde(default = "default_max_tokens")]
    pub max_tokens: u32,
    #[serde(default = "default_endpoint")]
    pub endpoint: String,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

#[derive(Debug, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            dir: default_site_dir(),
        }
    }
}

impl Default for ChatConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            model: default_model(),
            temperature: default_temperature(),
            max_tokens: default_max_tokens(),
            endpoint: default_endpoint(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

fn default_site_dir() -> String {
    "dist".to_string()
}
fn default_model() -> String {
    DEFAULT_MODEL.to_string()
}
fn default_temperature() -> f64 {
    DEFAULT_TEMPERATURE
}
fn default_max_tokens() -> u32 {
    DEFAULT_MAX_TOKENS
}
fn default_endpoint() -> String {
    DEFAULT_ENDPOINT.to_string()
}
fn default_timeout_secs() -> u64 {
    DEFAULT_TIMEOUT_SECS
}
fn default_host() -> String {
    "127.0.0.1".to_string()
}
fn default_port() -> u16 {
    4000
}

impl ConfigFile {
    /// Load configuration from the given path if it exists.
    /// Returns an error if the config file exists but is malformed, or if
    /// the required API key is absent: no command proceeds without it.
    pub fn load(path: &Path) -> Result<ConfigFile> {
        let config = if path.exists() {
            let content = fs::read_to_string(path)
                .map_err(|e| anyhow::anyhow!("Failed to read {}: {}", path.display(), e))?;
            let config: ConfigFile = toml::from_str(&content)
                .map_err(|e| anyhow::anyhow!("Failed to parse {}: {}", path.display(), e))?;
            tracing::info!("Loaded config from {}", path.display());
            config
        } else {
            ConfigFile::default()
        };

        if config.chat.api_key.as_deref().map_or(true, str::is_empty) {
            anyhow::bail!(
                "Missing required chat.api_key in {}",
                path.display()
            );
        }

        Ok(config)
    }

    /// Resolve completion API settings from an already-validated config.
    pub fn chat_settings(&self) -> Result<ChatSettings> {
        let api_key = self
            .chat
            .api_key
            .clone()
            .ok_or_else(|| anyhow::anyhow!("Missing required chat.api_key in configuration"))?;

        Ok(ChatSettings {
            api_key,
            model: self.chat.model.clone(),
            temperature: self.chat.temperature,
            max_tokens: self.chat.max_tokens,
            endpoint: self.chat.endpoint.clone(),
            timeout: Duration::from_secs(self.chat.timeout_secs),
        })
    }
}
