//! # Text Generation
//!
//! Clue text comes from an external chat model. The game only needs "conversation in,
//! string out", expressed by [`TextGenerator`]. Implementations never fail towards
//! the caller: a missing key or a broken upstream turns into a sentinel string that is
//! shown to the player as the clue.
//!
//! - [`groq`] - Groq chat-completions client used in production
//! - [`ScriptedGenerator`] - deterministic stand-in for tests and `--offline` runs

pub mod groq;

use serde::{Deserialize, Serialize};
use std::future::Future;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

pub use groq::GroqClient;

/// Returned verbatim when no usable API key is configured.
pub const KEY_MISSING: &str = "ERROR: Groq API Key not configured.";
/// Returned when the upstream request fails or yields no content.
pub const GENERATION_FAILED: &str = "ERROR: Clue generation failed.";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    System,
    User,
    Assistant,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: Role,
    pub content: String,
}

impl ChatMessage {
    pub fn system(content: impl Into<String>) -> Self {
        Self {
            role: Role::System,
            content: content.into(),
        }
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: Role::User,
            content: content.into(),
        }
    }

    pub fn assistant(content: impl Into<String>) -> Self {
        Self {
            role: Role::Assistant,
            content: content.into(),
        }
    }
}

/// Produces the next clue for a conversation.
pub trait TextGenerator {
    fn generate(&self, conversation: &[ChatMessage]) -> impl Future<Output = String> + Send;
}

/// Replies `"<prefix> #<n>"` where n counts calls from 1.
///
/// Clones share the call counter, so a test can keep a handle after moving the
/// generator into an engine.
#[derive(Debug, Clone)]
pub struct ScriptedGenerator {
    prefix: String,
    calls: Arc<AtomicUsize>,
}

impl ScriptedGenerator {
    pub fn new(prefix: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
            calls: Arc::new(AtomicUsize::new(0)),
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

impl Default for ScriptedGenerator {
    fn default() -> Self {
        ScriptedGenerator::new("Clue")
    }
}

impl TextGenerator for ScriptedGenerator {
    async fn generate(&self, _conversation: &[ChatMessage]) -> String {
        let n = self.calls.fetch_add(1, Ordering::SeqCst) + 1;
        format!("{} #{}", self.prefix, n)
    }
}
