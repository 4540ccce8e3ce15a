//! Route table and JSON bodies.
//!
//! | Method | Path          | Body              | Response body                                        |
//! |--------|---------------|-------------------|------------------------------------------------------|
//! | POST   | `/start`      | `{reset?: bool}`  | `{question, difficulty, level, text, refilled}`      |
//! | POST   | `/next`       | -                 | `{question, difficulty, text}` or `{message, finished}` |
//! | POST   | `/guess`      | `{guess: string}` | `{correct, message}` (+ `stats`, `session_complete`, `session_history`) |
//! | GET    | `/state`      | -                 | `{question, finished}`                               |
//! | GET    | `/stats`      | -                 | process counters and session summary                 |
//! | GET    | `/debug/word` | -                 | `{word}`; only when `server.debug_routes` is on      |
//!
//! Game-rule refusals (no round yet, round already over) are ordinary 200 responses
//! carrying an `error` field; non-200 statuses are reserved for malformed requests.

use log::warn;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use thiserror::Error;
use tokio::sync::Mutex;

use crate::game::{ClueOutcome, GameEngine, GuessOutcome};
use crate::generator::TextGenerator;
use crate::metrics;

#[derive(Debug, Clone, Deserialize)]
pub struct ApiRequest {
    pub method: String,
    pub path: String,
    #[serde(default)]
    pub body: Value,
}

impl ApiRequest {
    pub fn new(method: &str, path: &str, body: Value) -> Self {
        Self {
            method: method.to_string(),
            path: path.to_string(),
            body,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ApiResponse {
    pub status: u16,
    pub body: Value,
}

impl ApiResponse {
    pub fn ok(body: Value) -> Self {
        Self { status: 200, body }
    }
}

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("malformed request: {0}")]
    Malformed(String),

    #[error("request body exceeds {limit} bytes")]
    TooLarge { limit: usize },

    #[error("no route for {0}")]
    NotFound(String),

    #[error("method {method} not allowed for {path}")]
    MethodNotAllowed { method: String, path: String },

    #[error("invalid body: {0}")]
    InvalidBody(String),
}

impl ApiError {
    pub fn status(&self) -> u16 {
        match self {
            ApiError::Malformed(_) => 400,
            ApiError::NotFound(_) => 404,
            ApiError::MethodNotAllowed { .. } => 405,
            ApiError::TooLarge { .. } => 413,
            ApiError::InvalidBody(_) => 422,
        }
    }

    pub fn into_response(self) -> ApiResponse {
        ApiResponse {
            status: self.status(),
            body: json!({ "detail": self.to_string() }),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Route {
    Start,
    Next,
    Guess,
    State,
    Stats,
    DebugWord,
}

impl Route {
    pub fn resolve(method: &str, path: &str) -> Result<Route, ApiError> {
        let path = path.trim_end_matches('/');
        let (route, expected) = match path {
            "/start" => (Route::Start, "POST"),
            "/next" => (Route::Next, "POST"),
            "/guess" => (Route::Guess, "POST"),
            "/state" => (Route::State, "GET"),
            "/stats" => (Route::Stats, "GET"),
            "/debug/word" => (Route::DebugWord, "GET"),
            _ => return Err(ApiError::NotFound(path.to_string())),
        };
        if !method.eq_ignore_ascii_case(expected) {
            return Err(ApiError::MethodNotAllowed {
                method: method.to_string(),
                path: path.to_string(),
            });
        }
        Ok(route)
    }
}

#[derive(Debug, Default, Deserialize)]
struct StartBody {
    #[serde(default)]
    reset: bool,
}

#[derive(Debug, Deserialize)]
struct GuessBody {
    guess: String,
}

/// Resolve and run one request against the shared engine.
///
/// The engine lock is held for the whole operation, generator call included.
pub async fn dispatch<G: TextGenerator>(
    engine: &Mutex<GameEngine<G>>,
    request: ApiRequest,
    debug_routes: bool,
) -> ApiResponse {
    match handle(engine, request, debug_routes).await {
        Ok(body) => ApiResponse::ok(body),
        Err(e) => e.into_response(),
    }
}

async fn handle<G: TextGenerator>(
    engine: &Mutex<GameEngine<G>>,
    request: ApiRequest,
    debug_routes: bool,
) -> Result<Value, ApiError> {
    let route = Route::resolve(&request.method, &request.path)?;
    match route {
        Route::Start => {
            let body: StartBody = if request.body.is_null() {
                StartBody::default()
            } else {
                serde_json::from_value(request.body)
                    .map_err(|e| ApiError::InvalidBody(e.to_string()))?
            };
            let start = engine.lock().await.start_round(body.reset).await;
            Ok(json!({
                "question": start.question,
                "difficulty": start.difficulty,
                "level": start.level,
                "text": start.text,
                "refilled": start.refilled,
            }))
        }
        Route::Next => {
            let outcome = engine.lock().await.next_clue().await;
            Ok(match outcome {
                ClueOutcome::Clue {
                    question,
                    difficulty,
                    text,
                } => json!({ "question": question, "difficulty": difficulty, "text": text }),
                ClueOutcome::Exhausted => json!({ "message": "No more hints", "finished": true }),
                ClueOutcome::AlreadyFinished => json!({ "error": "Game over", "status_code": 400 }),
                ClueOutcome::NotStarted => {
                    json!({ "error": "Game not started yet.", "status_code": 400 })
                }
            })
        }
        Route::Guess => {
            let body: GuessBody = serde_json::from_value(request.body)
                .map_err(|e| ApiError::InvalidBody(e.to_string()))?;
            let outcome = engine.lock().await.guess(&body.guess);
            Ok(match outcome {
                GuessOutcome::NotStarted => {
                    json!({ "correct": false, "message": "Game not started yet." })
                }
                GuessOutcome::AlreadyFinished => json!({
                    "correct": false,
                    "message": "This round is over. Start a new round!",
                }),
                GuessOutcome::Incorrect => json!({
                    "correct": false,
                    "message": "Wrong guess. Try again or ask for another hint!",
                }),
                GuessOutcome::Correct {
                    word,
                    stats,
                    session_complete,
                    history,
                } => json!({
                    "correct": true,
                    "message": format!("Correct! The word was {}!", word),
                    "stats": stats,
                    "session_complete": session_complete,
                    "session_history": history,
                }),
            })
        }
        Route::State => {
            let snapshot = engine.lock().await.snapshot();
            Ok(json!({ "question": snapshot.question, "finished": snapshot.finished }))
        }
        Route::Stats => {
            let guard = engine.lock().await;
            let session = guard.session();
            Ok(json!({
                "counters": metrics::snapshot(),
                "session": {
                    "level": session.level(),
                    "complete": session.is_complete(),
                    "rounds_won": session.history().len(),
                    "total_score": session.total_score(),
                },
            }))
        }
        Route::DebugWord => {
            if !debug_routes {
                return Err(ApiError::NotFound(request.path));
            }
            warn!("Secret word revealed through /debug/word");
            let guard = engine.lock().await;
            Ok(json!({ "word": guard.secret_word(), "debug": true }))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn resolves_known_routes() {
        assert_eq!(Route::resolve("POST", "/start").unwrap(), Route::Start);
        assert_eq!(Route::resolve("post", "/guess/").unwrap(), Route::Guess);
        assert_eq!(Route::resolve("GET", "/state").unwrap(), Route::State);
        assert_eq!(Route::resolve("GET", "/debug/word").unwrap(), Route::DebugWord);
    }

    #[test]
    fn unknown_path_and_wrong_method() {
        let err = Route::resolve("GET", "/nope").unwrap_err();
        assert_eq!(err.status(), 404);
        let err = Route::resolve("GET", "/start").unwrap_err();
        assert_eq!(err.status(), 405);
        assert!(err.to_string().contains("/start"));
    }

    #[test]
    fn error_response_carries_detail() {
        let resp = ApiError::InvalidBody("missing field `guess`".into()).into_response();
        assert_eq!(resp.status, 422);
        assert!(resp.body["detail"]
            .as_str()
            .unwrap()
            .contains("missing field"));
    }
}
