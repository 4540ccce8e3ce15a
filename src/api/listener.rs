//! HTTP listener.
//!
//! Every request is funnelled into [`dispatch`]: the method, path and JSON body become an
//! [`ApiRequest`] and the returned [`ApiResponse`] status becomes the HTTP status. An empty
//! body counts as no body. Bodies that are not JSON get a 400, and bodies larger than
//! `server.max_request_bytes` get a 413. CORS is open so a browser page can call the game.

use anyhow::{anyhow, Result};
use axum::body::Bytes;
use axum::extract::rejection::BytesRejection;
use axum::extract::{DefaultBodyLimit, State};
use axum::http::{Method, StatusCode, Uri};
use axum::response::{IntoResponse, Response};
use axum::{Json, Router};
use log::{debug, info, warn};
use serde_json::Value;
use std::future::Future;
use std::sync::Arc;
use tokio::net::TcpListener;
use tokio::sync::Mutex;
use tower_http::cors::CorsLayer;

use super::routes::{dispatch, ApiError, ApiRequest, ApiResponse};
use crate::config::ServerConfig;
use crate::game::GameEngine;
use crate::generator::TextGenerator;
use crate::logutil::escape_log;

pub struct GameServer<G> {
    config: ServerConfig,
    engine: Arc<Mutex<GameEngine<G>>>,
}

struct AppState<G> {
    engine: Arc<Mutex<GameEngine<G>>>,
    debug_routes: bool,
    max_request_bytes: usize,
}

impl<G> Clone for AppState<G> {
    fn clone(&self) -> Self {
        Self {
            engine: self.engine.clone(),
            debug_routes: self.debug_routes,
            max_request_bytes: self.max_request_bytes,
        }
    }
}

impl<G> GameServer<G>
where
    G: TextGenerator + Send + Sync + 'static,
{
    pub fn new(config: ServerConfig, engine: GameEngine<G>) -> Self {
        Self {
            config,
            engine: Arc::new(Mutex::new(engine)),
        }
    }

    pub fn engine(&self) -> Arc<Mutex<GameEngine<G>>> {
        self.engine.clone()
    }

    /// The full route surface as an axum router, with body limit and CORS applied.
    pub fn router(&self) -> Router {
        let state = AppState {
            engine: self.engine.clone(),
            debug_routes: self.config.debug_routes,
            max_request_bytes: self.config.max_request_bytes,
        };
        Router::new()
            .fallback(handle_request::<G>)
            .with_state(state)
            .layer(DefaultBodyLimit::max(self.config.max_request_bytes))
            .layer(CorsLayer::permissive())
    }

    /// Bind the configured address and serve until Ctrl-C.
    pub async fn run(&self) -> Result<()> {
        let listener = TcpListener::bind(&self.config.bind)
            .await
            .map_err(|e| anyhow!("Failed to bind {}: {}", self.config.bind, e))?;
        self.serve(listener, async {
            let _ = tokio::signal::ctrl_c().await;
            info!("Shutdown requested; no longer accepting connections");
        })
        .await
    }

    /// Serve on `listener` until `shutdown` resolves, then let in-flight requests finish.
    pub async fn serve<F>(&self, listener: TcpListener, shutdown: F) -> Result<()>
    where
        F: Future<Output = ()> + Send + 'static,
    {
        let local = listener.local_addr()?;
        info!("Listening on http://{}", local);
        if self.config.debug_routes {
            warn!("Debug routes are enabled: GET /debug/word reveals the secret word. Do not run this in production.");
        }
        axum::serve(listener, self.router())
            .with_graceful_shutdown(shutdown)
            .await
            .map_err(|e| anyhow!("HTTP server error: {}", e))
    }
}

async fn handle_request<G>(
    State(state): State<AppState<G>>,
    method: Method,
    uri: Uri,
    body: Result<Bytes, BytesRejection>,
) -> Response
where
    G: TextGenerator + Send + Sync + 'static,
{
    let path = uri.path().to_string();
    let response = match parse_body(body, state.max_request_bytes) {
        Ok(body) => {
            debug!("{} {}", method, path);
            let request = ApiRequest::new(method.as_str(), &path, body);
            dispatch(&state.engine, request, state.debug_routes).await
        }
        Err(e) => {
            debug!("Rejected {} {}: {}", method, path, e);
            e.into_response()
        }
    };
    to_http(response)
}

fn parse_body(body: Result<Bytes, BytesRejection>, limit: usize) -> Result<Value, ApiError> {
    let bytes = body.map_err(|rejection| {
        if rejection.status() == StatusCode::PAYLOAD_TOO_LARGE {
            warn!("Request body exceeded {} bytes", limit);
            ApiError::TooLarge { limit }
        } else {
            ApiError::Malformed(rejection.body_text())
        }
    })?;
    if bytes.iter().all(u8::is_ascii_whitespace) {
        return Ok(Value::Null);
    }
    serde_json::from_slice(&bytes).map_err(|e| {
        debug!("Unparseable body: {}", escape_log(&String::from_utf8_lossy(&bytes)));
        ApiError::Malformed(e.to_string())
    })
}

fn to_http(response: ApiResponse) -> Response {
    let status = StatusCode::from_u16(response.status).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
    (status, Json(response.body)).into_response()
}
