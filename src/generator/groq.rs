//! Groq chat-completions client.
//!
//! Posts an OpenAI-compatible request to `<base_url>/chat/completions` with a bearer key.
//! Key resolution: `generator.api_key` when set, otherwise the environment variable named
//! by `generator.api_key_env`. Placeholder keys (containing `YOUR`) count as missing.

use anyhow::{anyhow, Result};
use log::{debug, warn};
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tokio::time::timeout;

use super::{ChatMessage, TextGenerator, GENERATION_FAILED, KEY_MISSING};
use crate::config::GeneratorConfig;
use crate::logutil::escape_log;
use crate::metrics;

#[derive(Debug, Serialize)]
struct CompletionRequest<'a> {
    model: &'a str,
    messages: &'a [ChatMessage],
    temperature: f64,
    top_p: f64,
    max_tokens: u32,
}

#[derive(Debug, Deserialize)]
struct CompletionResponse {
    choices: Vec<CompletionChoice>,
}

#[derive(Debug, Deserialize)]
struct CompletionChoice {
    message: CompletionMessage,
}

#[derive(Debug, Deserialize)]
struct CompletionMessage {
    #[serde(default)]
    content: Option<String>,
}

pub struct GroqClient {
    config: GeneratorConfig,
    api_key: Option<String>,
    client: reqwest::Client,
}

impl GroqClient {
    pub fn new(config: GeneratorConfig) -> Self {
        let env_key = std::env::var(&config.api_key_env).ok();
        let api_key = resolve_api_key(&config.api_key, env_key.as_deref());
        if api_key.is_none() {
            warn!(
                "{} is not set; clues will read \"{}\"",
                config.api_key_env, KEY_MISSING
            );
        }
        Self {
            config,
            api_key,
            client: reqwest::Client::new(),
        }
    }

    /// Check if a usable key was found
    pub fn is_configured(&self) -> bool {
        self.api_key.is_some()
    }

    async fn request_completion(&self, api_key: &str, conversation: &[ChatMessage]) -> Result<String> {
        let url = format!("{}/chat/completions", self.config.base_url.trim_end_matches('/'));
        let body = CompletionRequest {
            model: &self.config.model,
            messages: conversation,
            temperature: self.config.temperature,
            top_p: self.config.top_p,
            max_tokens: self.config.max_tokens,
        };
        debug!(
            "Requesting completion from {} ({} messages)",
            url,
            conversation.len()
        );

        let request = self.client.post(&url).bearer_auth(api_key).json(&body);
        let timeout_duration = Duration::from_secs(self.config.timeout_seconds);

        let response = timeout(timeout_duration, request.send())
            .await
            .map_err(|_| anyhow!("Request timeout after {}s", self.config.timeout_seconds))?
            .map_err(|e| anyhow!("HTTP request failed: {}", e))?;

        if !response.status().is_success() {
            return Err(anyhow!("API returned status: {}", response.status()));
        }

        let parsed: CompletionResponse = response
            .json()
            .await
            .map_err(|e| anyhow!("Failed to parse JSON response: {}", e))?;

        parsed
            .choices
            .into_iter()
            .next()
            .and_then(|c| c.message.content)
            .map(|c| c.trim().to_string())
            .filter(|c| !c.is_empty())
            .ok_or_else(|| anyhow!("Response contained no message content"))
    }
}

impl TextGenerator for GroqClient {
    async fn generate(&self, conversation: &[ChatMessage]) -> String {
        let Some(api_key) = self.api_key.as_deref() else {
            metrics::inc_generator_failures();
            return KEY_MISSING.to_string();
        };
        match self.request_completion(api_key, conversation).await {
            Ok(text) => {
                debug!("Generated clue: {}", escape_log(&text));
                text
            }
            Err(e) => {
                warn!("Clue generation failed: {}", e);
                metrics::inc_generator_failures();
                GENERATION_FAILED.to_string()
            }
        }
    }
}

/// Pick the configured key, falling back to the environment value.
pub fn resolve_api_key(configured: &str, from_env: Option<&str>) -> Option<String> {
    let candidate = if configured.trim().is_empty() {
        from_env.unwrap_or_default()
    } else {
        configured
    };
    let candidate = candidate.trim();
    if candidate.is_empty() || candidate.contains("YOUR") {
        None
    } else {
        Some(candidate.to_string())
    }
}
