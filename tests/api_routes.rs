//! Route dispatch against a shared engine.
mod common;

use riddlebox::api::{dispatch, ApiRequest};
use serde_json::{json, Value};
use tokio::sync::Mutex;

async fn call(
    engine: &Mutex<riddlebox::game::GameEngine<riddlebox::generator::ScriptedGenerator>>,
    method: &str,
    path: &str,
    body: Value,
) -> (u16, Value) {
    let resp = dispatch(engine, ApiRequest::new(method, path, body), false).await;
    (resp.status, resp.body)
}

#[tokio::test]
async fn full_round_over_routes() {
    let (engine, _gen) = common::engine_with(common::tiny_catalog(&["Otter"]));
    let engine = Mutex::new(engine);

    let (status, body) = call(&engine, "GET", "/state", Value::Null).await;
    assert_eq!(status, 200);
    assert_eq!(body, json!({ "question": 0, "finished": false }));

    let (status, body) = call(&engine, "POST", "/start", Value::Null).await;
    assert_eq!(status, 200);
    assert_eq!(body["question"], 1);
    assert_eq!(body["difficulty"], "easy");
    assert_eq!(body["level"], 1);
    assert_eq!(body["text"], "Clue #1");

    let (_, body) = call(&engine, "POST", "/next", Value::Null).await;
    assert_eq!(body, json!({ "question": 2, "difficulty": "easy", "text": "Clue #2" }));

    let (_, body) = call(&engine, "POST", "/guess", json!({ "guess": "heron" })).await;
    assert_eq!(body["correct"], false);
    assert_eq!(body["message"], "Wrong guess. Try again or ask for another hint!");

    let (_, body) = call(&engine, "POST", "/guess", json!({ "guess": " OTTER " })).await;
    assert_eq!(body["correct"], true);
    assert_eq!(body["message"], "Correct! The word was Otter!");
    assert_eq!(body["stats"]["guesses"], 2);
    assert_eq!(body["stats"]["hints"], 2);
    assert_eq!(body["stats"]["score"], 50);
    assert_eq!(body["session_complete"], false);
    assert_eq!(body["session_history"].as_array().map(Vec::len), Some(1));

    let (_, body) = call(&engine, "GET", "/state", Value::Null).await;
    assert_eq!(body, json!({ "question": 2, "finished": true }));

    let (_, body) = call(&engine, "POST", "/guess", json!({ "guess": "otter" })).await;
    assert_eq!(body["correct"], false);
    assert_eq!(body["message"], "This round is over. Start a new round!");

    let (status, body) = call(&engine, "POST", "/next", Value::Null).await;
    assert_eq!(status, 200);
    assert_eq!(body, json!({ "error": "Game over", "status_code": 400 }));
}

#[tokio::test]
async fn refusals_before_start() {
    let (engine, _gen) = common::scripted_engine();
    let engine = Mutex::new(engine);

    let (status, body) = call(&engine, "POST", "/next", Value::Null).await;
    assert_eq!(status, 200);
    assert_eq!(body["error"], "Game not started yet.");

    let (_, body) = call(&engine, "POST", "/guess", json!({ "guess": "moth" })).await;
    assert_eq!(body, json!({ "correct": false, "message": "Game not started yet." }));
}

#[tokio::test]
async fn exhaustion_reports_no_more_hints() {
    let (engine, gen) = common::scripted_engine();
    let engine = Mutex::new(engine);
    call(&engine, "POST", "/start", Value::Null).await;
    for _ in 0..9 {
        call(&engine, "POST", "/next", Value::Null).await;
    }
    let (_, body) = call(&engine, "POST", "/next", Value::Null).await;
    assert_eq!(body, json!({ "message": "No more hints", "finished": true }));
    assert_eq!(gen.calls(), 10);
}

#[tokio::test]
async fn start_with_reset_returns_to_level_one() {
    let (engine, _gen) = common::scripted_engine();
    let engine = Mutex::new(engine);
    call(&engine, "POST", "/start", Value::Null).await;
    {
        let mut guard = engine.lock().await;
        common::win_round(&mut guard);
    }
    let (_, body) = call(&engine, "POST", "/start", json!({})).await;
    assert_eq!(body["level"], 2);
    assert_eq!(body["difficulty"], "medium");

    let (_, body) = call(&engine, "POST", "/start", json!({ "reset": true })).await;
    assert_eq!(body["level"], 1);

    let (_, body) = call(&engine, "GET", "/stats", Value::Null).await;
    assert_eq!(body["session"]["rounds_won"], 0);
    assert_eq!(body["session"]["total_score"], 0);
    assert!(body["counters"]["rounds_started"].as_u64().unwrap_or(0) >= 3);
}

#[tokio::test]
async fn bad_requests_get_error_statuses() {
    let (engine, _gen) = common::scripted_engine();
    let engine = Mutex::new(engine);

    let (status, body) = call(&engine, "POST", "/guess", json!({})).await;
    assert_eq!(status, 422);
    assert!(body["detail"].as_str().unwrap_or("").contains("guess"));

    let (status, _) = call(&engine, "POST", "/start", json!({ "reset": "yes" })).await;
    assert_eq!(status, 422);

    let (status, _) = call(&engine, "GET", "/guess", Value::Null).await;
    assert_eq!(status, 405);

    let (status, _) = call(&engine, "GET", "/missing", Value::Null).await;
    assert_eq!(status, 404);
}

#[tokio::test]
async fn debug_word_needs_opt_in() {
    let (engine, _gen) = common::engine_with(common::tiny_catalog(&["Otter"]));
    let engine = Mutex::new(engine);
    call(&engine, "POST", "/start", Value::Null).await;

    let hidden = dispatch(&engine, ApiRequest::new("GET", "/debug/word", Value::Null), false).await;
    assert_eq!(hidden.status, 404);

    let shown = dispatch(&engine, ApiRequest::new("GET", "/debug/word", Value::Null), true).await;
    assert_eq!(shown.status, 200);
    assert_eq!(shown.body, json!({ "word": "Otter", "debug": true }));
}
