//! Shared fixtures for the HTTP client integration tests
//!
//! Each test binds an axum router to an ephemeral local port and points the
//! client under test at it.

#![allow(dead_code)]

use axum::Router;
use serde_json::{json, Value};

/// Serve `app` on 127.0.0.1 and return its base URL (no trailing slash)
pub async fn spawn(app: Router) -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("bind test listener");
    let addr = listener.local_addr().expect("local addr");
    tokio::spawn(async move {
        axum::serve(listener, app).await.expect("test server");
    });
    format!("http://{}", addr)
}

/// Minimal PokéAPI `/pokemon/{key}` payload
pub fn pokemon_json(id: u32, name: &str, types: &[&str]) -> Value {
    let types: Vec<Value> = types
        .iter()
        .enumerate()
        .map(|(i, t)| json!({"slot": i + 1, "type": {"name": t, "url": ""}}))
        .collect();
    json!({
        "id": id,
        "name": name,
        "height": 4,
        "weight": 60,
        "types": types,
        "abilities": [
            {"ability": {"name": "static", "url": ""}, "is_hidden": false, "slot": 1}
        ],
        "sprites": {"front_default": format!("https://sprites.invalid/{}.png", id)}
    })
}

/// Notes API `NoteOut` payload with the server's naive timestamps
pub fn note_json(id: &str, title: &str, content: &str, tags: &[&str]) -> Value {
    json!({
        "id": id,
        "title": title,
        "content": content,
        "tags": tags,
        "archived": false,
        "created_at": "2024-05-01T10:00:00.000001",
        "updated_at": "2024-05-01T10:00:00.000001"
    })
}
