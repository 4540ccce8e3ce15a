//! # Riddlebox - Word-Guessing Game Server
//!
//! Riddlebox picks a secret word, asks a chat model for indirect riddle-style clues, and
//! scores guesses across a three-round session that climbs from easy to hard.
//!
//! ## Features
//!
//! - **Escalating clues**: up to ten clues per round, labelled easy (1-4), medium (5-8) and hard (9-10).
//! - **Hint pools**: each round samples two or three hint prompts from the word catalog and feeds them to the model in order.
//! - **Sessions**: winning a round raises the level (max 3) and awards 50 / 75 / 100 points; winning level 3 completes the session.
//! - **Pluggable generation**: any [`generator::TextGenerator`]; Groq in production, a scripted stand-in for tests.
//! - **Async Design**: built with Tokio; one engine guarded by a mutex so each request applies atomically.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use riddlebox::api::GameServer;
//! use riddlebox::config::Config;
//! use riddlebox::game::GameEngine;
//! use riddlebox::generator::GroqClient;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let config = Config::load("config.toml").await?;
//!     let catalog = config.game.load_catalog()?;
//!     let generator = GroqClient::new(config.generator.clone());
//!     let engine = GameEngine::new(catalog, generator, config.game.seed);
//!     GameServer::new(config.server, engine).run().await
//! }
//! ```
//!
//! ## Module Organization
//!
//! - [`game`] - catalog, difficulty tiers, round and session state machines, engine
//! - [`generator`] - text generation trait and clients
//! - [`api`] - route dispatch and the HTTP listener
//! - [`config`] - configuration loading and defaults
//! - [`metrics`] - process-wide counters
//! - [`logutil`] - log sanitizing helpers
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────┐
//! │   Listener      │ ← HTTP + JSON (axum)
//! └─────────────────┘
//!          │
//! ┌─────────────────┐
//! │   GameEngine    │ ← round + session state machines
//! └─────────────────┘
//!          │
//! ┌─────────────────┐
//! │ TextGenerator   │ ← chat model (Groq) or scripted stand-in
//! └─────────────────┘
//! ```

pub mod api;
pub mod config;
pub mod game;
pub mod generator;
pub mod logutil;
pub mod metrics;
