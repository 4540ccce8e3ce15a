//! # Request Layer
//!
//! Maps the game's route surface onto [`GameEngine`](crate::game::GameEngine) calls.
//!
//! - [`routes`] - route resolution, request/response bodies, dispatch
//! - [`listener`] - axum HTTP server with CORS and a request body limit
//!
//! ## Example
//!
//! ```text
//! POST /guess  {"guess": "moth"}
//! 200          {"correct": true, "message": "Correct! The word was Moth!", ...}
//! ```
//!
//! [`routes::dispatch`] is transport independent; tests drive it directly.

pub mod listener;
pub mod routes;

pub use listener::GameServer;
pub use routes::{dispatch, ApiError, ApiRequest, ApiResponse, Route};
