//! HTTP listener over a real socket.
mod common;

use riddlebox::api::GameServer;
use riddlebox::config::ServerConfig;
use serde_json::{json, Value};
use std::net::SocketAddr;
use tokio::net::TcpListener;
use tokio::sync::oneshot;
use tokio::task::JoinHandle;

async fn spawn_server(
    max_request_bytes: usize,
) -> (SocketAddr, oneshot::Sender<()>, JoinHandle<anyhow::Result<()>>) {
    let (engine, _gen) = common::engine_with(common::tiny_catalog(&["Otter"]));
    let config = ServerConfig {
        bind: "127.0.0.1:0".to_string(),
        debug_routes: false,
        max_request_bytes,
    };
    let server = GameServer::new(config, engine);
    let listener = TcpListener::bind("127.0.0.1:0").await.expect("bind");
    let addr = listener.local_addr().expect("addr");
    let (tx, rx) = oneshot::channel::<()>();
    let handle = tokio::spawn(async move {
        server
            .serve(listener, async move {
                let _ = rx.await;
            })
            .await
    });
    (addr, tx, handle)
}

async fn read(resp: reqwest::Response) -> (u16, Value) {
    let status = resp.status().as_u16();
    let body = resp.json::<Value>().await.expect("json body");
    (status, body)
}

#[tokio::test]
async fn plays_a_round_over_http() {
    let (addr, shutdown, handle) = spawn_server(8192).await;
    let client = reqwest::Client::new();
    let base = format!("http://{}", addr);

    let (status, body) = read(client.post(format!("{}/start", base)).send().await.expect("start")).await;
    assert_eq!(status, 200);
    assert_eq!(body["question"], 1);
    assert_eq!(body["difficulty"], "easy");

    let (status, body) = read(client.post(format!("{}/next", base)).send().await.expect("next")).await;
    assert_eq!(status, 200);
    assert_eq!(body["question"], 2);

    let (status, body) = read(
        client
            .post(format!("{}/guess", base))
            .json(&json!({ "guess": "otter" }))
            .send()
            .await
            .expect("guess"),
    )
    .await;
    assert_eq!(status, 200);
    assert_eq!(body["correct"], true);

    let (status, body) = read(client.get(format!("{}/state", base)).send().await.expect("state")).await;
    assert_eq!(status, 200);
    assert_eq!(body, json!({ "question": 2, "finished": true }));

    drop(client);
    let _ = shutdown.send(());
    handle.await.expect("join").expect("serve");
}

#[tokio::test]
async fn invalid_utf8_body_gets_400_and_server_keeps_serving() {
    let (addr, shutdown, handle) = spawn_server(8192).await;
    let client = reqwest::Client::new();
    let base = format!("http://{}", addr);

    let (status, body) = read(
        client
            .post(format!("{}/guess", base))
            .header("content-type", "application/json")
            .body(b"\xff\xfe garbage".to_vec())
            .send()
            .await
            .expect("garbage"),
    )
    .await;
    assert_eq!(status, 400);
    assert!(body["detail"].as_str().unwrap_or("").contains("malformed"));

    let (status, body) = read(client.get(format!("{}/state", base)).send().await.expect("state")).await;
    assert_eq!(status, 200);
    assert_eq!(body, json!({ "question": 0, "finished": false }));

    drop(client);
    let _ = shutdown.send(());
    handle.await.expect("join").expect("serve");
}

#[tokio::test]
async fn route_errors_map_to_http_statuses() {
    let (addr, shutdown, handle) = spawn_server(64).await;
    let client = reqwest::Client::new();
    let base = format!("http://{}", addr);

    let resp = client.get(format!("{}/nope", base)).send().await.expect("nope");
    assert_eq!(resp.status().as_u16(), 404);

    let resp = client.get(format!("{}/guess", base)).send().await.expect("wrong method");
    assert_eq!(resp.status().as_u16(), 405);

    let resp = client
        .post(format!("{}/guess", base))
        .json(&json!({}))
        .send()
        .await
        .expect("missing guess");
    assert_eq!(resp.status().as_u16(), 422);

    let resp = client.get(format!("{}/debug/word", base)).send().await.expect("debug");
    assert_eq!(resp.status().as_u16(), 404);

    let padding = "x".repeat(200);
    let (status, body) = read(
        client
            .post(format!("{}/guess", base))
            .json(&json!({ "guess": padding }))
            .send()
            .await
            .expect("oversized"),
    )
    .await;
    assert_eq!(status, 413);
    assert!(body["detail"].as_str().unwrap_or("").contains("64"));

    drop(client);
    let _ = shutdown.send(());
    handle.await.expect("join").expect("serve");
}

#[tokio::test]
async fn cors_preflight_is_answered() {
    let (addr, shutdown, handle) = spawn_server(8192).await;
    let client = reqwest::Client::new();

    let resp = client
        .request(reqwest::Method::OPTIONS, format!("http://{}/guess", addr))
        .header("origin", "http://localhost:3000")
        .header("access-control-request-method", "POST")
        .send()
        .await
        .expect("preflight");
    assert!(resp.status().is_success());
    assert!(resp.headers().contains_key("access-control-allow-origin"));

    drop(client);
    let _ = shutdown.send(());
    handle.await.expect("join").expect("serve");
}
