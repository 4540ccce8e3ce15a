//! # Configuration Management Module
//!
//! Typed TOML configuration with defaults for every section, so a partial file (or
//! none at all, via `riddlebox init`) is enough to run.
//!
//! ## Configuration Structure
//!
//! - [`ServerConfig`] - listener address, request limits, debug routes
//! - [`GeneratorConfig`] - text generation endpoint, model and sampling settings
//! - [`GameConfig`] - random seed and optional catalog override
//! - [`LoggingConfig`] - log level and optional log file
//!
//! ## Usage
//!
//! ```rust,no_run
//! use riddlebox::config::Config;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let config = Config::load("config.toml").await?;
//!     println!("Listening on {}", config.server.bind);
//!     Config::create_default("config.example.toml").await?;
//!     Ok(())
//! }
//! ```
//!
//! ## Configuration File Format
//!
//! ```toml
//! [server]
//! bind = "127.0.0.1:8000"
//! debug_routes = false
//!
//! [generator]
//! api_key_env = "GROQ_API_KEY"
//! model = "llama-3.3-70b-versatile"
//!
//! [game]
//! seed = 42
//! catalog_file = "words.json"
//! ```
//!
//! ## API Keys
//!
//! Keep `generator.api_key` empty and export the variable named by
//! `generator.api_key_env` (a `.env` file in the working directory is read at startup).

use anyhow::{anyhow, Result};
use serde::{Deserialize, Serialize};
use tokio::fs;

use crate::game::Catalog;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub generator: GeneratorConfig,
    #[serde(default)]
    pub game: GameConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Address for the request listener, e.g. "127.0.0.1:8000".
    pub bind: String,
    /// Expose `GET /debug/word`, which reveals the secret word. Never enable in production.
    #[serde(default)]
    pub debug_routes: bool,
    /// Largest accepted request body in bytes.
    #[serde(default = "default_max_request_bytes")]
    pub max_request_bytes: usize,
}

fn default_max_request_bytes() -> usize {
    8192
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind: "127.0.0.1:8000".to_string(),
            debug_routes: false,
            max_request_bytes: default_max_request_bytes(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeneratorConfig {
    /// Inline API key. Leave empty to read `api_key_env` instead.
    #[serde(default)]
    pub api_key: String,
    #[serde(default = "default_api_key_env")]
    pub api_key_env: String,
    pub base_url: String,
    pub model: String,
    pub temperature: f64,
    pub top_p: f64,
    pub max_tokens: u32,
    /// Request timeout in seconds
    #[serde(default = "default_timeout_seconds")]
    pub timeout_seconds: u64,
}

fn default_api_key_env() -> String {
    "GROQ_API_KEY".to_string()
}

fn default_timeout_seconds() -> u64 {
    20
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            api_key: String::new(),
            api_key_env: default_api_key_env(),
            base_url: "https://api.groq.com/openai/v1".to_string(),
            model: "llama-3.3-70b-versatile".to_string(),
            temperature: 0.9,
            top_p: 0.95,
            max_tokens: 200,
            timeout_seconds: default_timeout_seconds(),
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GameConfig {
    /// Fixed RNG seed for reproducible word and hint selection.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub seed: Option<u64>,
    /// JSON word catalog replacing the built-in table.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub catalog_file: Option<String>,
}

impl GameConfig {
    /// The catalog named by `catalog_file`, or the built-in one.
    pub fn load_catalog(&self) -> Result<Catalog> {
        match &self.catalog_file {
            Some(path) => Catalog::load(path)
                .map_err(|e| anyhow!("Failed to load word catalog {}: {}", path, e)),
            None => Ok(Catalog::builtin()),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    pub level: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub file: Option<String>,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            file: None,
        }
    }
}

impl LoggingConfig {
    /// Parsed `level`; unknown names fall back to info.
    pub fn level_filter(&self) -> log::LevelFilter {
        self.level.parse().unwrap_or(log::LevelFilter::Info)
    }
}

impl Config {
    /// Load configuration from a file
    pub async fn load(path: &str) -> Result<Self> {
        let content = fs::read_to_string(path)
            .await
            .map_err(|e| anyhow!("Failed to read config file {}: {}", path, e))?;

        let config: Config = toml::from_str(&content)
            .map_err(|e| anyhow!("Failed to parse config file {}: {}", path, e))?;

        Ok(config)
    }

    /// Create a default configuration file
    pub async fn create_default(path: &str) -> Result<()> {
        let config = Config::default();
        let content = toml::to_string_pretty(&config)
            .map_err(|e| anyhow!("Failed to serialize default config: {}", e))?;

        fs::write(path, content)
            .await
            .map_err(|e| anyhow!("Failed to write config file {}: {}", path, e))?;

        Ok(())
    }
}
