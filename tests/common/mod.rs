#![allow(dead_code)]

use std::sync::{Arc, Mutex};
use std::time::Duration;

use axum::body::Body;
use axum::http::{HeaderMap, Method, Request, StatusCode};
use axum::routing::post;
use axum::{Json, Router};
use http_body_util::BodyExt;
use serde_json::Value;
use sqlx::sqlite::{SqlitePool, SqlitePoolOptions};
use tower::ServiceExt;

use flashcards_backend::config::ProviderConfig;
use flashcards_backend::services::fallback::{CannedFallback, FallbackStrategy};
use flashcards_backend::services::generation_client::GenerationClient;
use flashcards_backend::{build_router, db, AppState};

/// An address nothing listens on, so connections are refused immediately.
pub const UNREACHABLE_URL: &str = "http://127.0.0.1:9/chat/completions";

/// In-memory SQLite pool with the schema applied.
///
/// Limited to a single connection: every `:memory:` connection gets its own
/// private database.
pub async fn memory_pool() -> SqlitePool {
    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .connect("sqlite::memory:")
        .await
        .unwrap();
    db::init_schema(&pool).await.unwrap();
    pool
}

pub fn offline_provider() -> ProviderConfig {
    ProviderConfig::default()
}

pub fn provider_at(url: &str) -> ProviderConfig {
    ProviderConfig {
        api_key: Some("test-key".to_string()),
        api_url: url.to_string(),
        timeout: Duration::from_secs(5),
        ..ProviderConfig::default()
    }
}

pub fn client(provider: ProviderConfig, fallback: Arc<dyn FallbackStrategy>) -> GenerationClient {
    GenerationClient::new(provider, fallback).unwrap()
}

/// Router backed by a fresh in-memory database and the given generator.
pub async fn build_test_app_with(generator: GenerationClient) -> Router {
    let state = Arc::new(AppState {
        db: memory_pool().await,
        generator,
    });
    build_router(state)
}

/// Router with no provider credential and the canned fallback.
pub async fn build_test_app() -> Router {
    build_test_app_with(client(offline_provider(), Arc::new(CannedFallback))).await
}

/// Send one request through the router and decode the JSON response body.
pub async fn send(app: &Router, method: Method, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let builder = Request::builder().method(method).uri(uri);
    let request = match body {
        Some(json) => builder
            .header("content-type", "application/json")
            .body(Body::from(json.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };

    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let json = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap_or(Value::Null)
    };
    (status, json)
}

/// What the mock provider saw on its last request.
#[derive(Clone, Default)]
pub struct Captured {
    pub authorization: Option<String>,
    pub body: Option<Value>,
}

/// Local chat-completions endpoint answering every request with `status` and
/// `body`. Returns the endpoint URL and the captured request.
pub async fn spawn_mock_provider(status: StatusCode, body: Value) -> (String, Arc<Mutex<Captured>>) {
    let captured = Arc::new(Mutex::new(Captured::default()));
    let seen = Arc::clone(&captured);

    let app = Router::new().route(
        "/chat/completions",
        post(move |headers: HeaderMap, Json(request): Json<Value>| {
            let seen = Arc::clone(&seen);
            let body = body.clone();
            async move {
                {
                    let mut guard = seen.lock().unwrap();
                    guard.authorization = headers
                        .get("authorization")
                        .and_then(|v| v.to_str().ok())
                        .map(str::to_owned);
                    guard.body = Some(request);
                }
                (status, Json(body))
            }
        }),
    );

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    (format!("http://{addr}/chat/completions"), captured)
}

/// Chat-completions response body carrying `content` as the model message.
pub fn completion_body(content: &str) -> Value {
    serde_json::json!({
        "choices": [{ "message": { "role": "assistant", "content": content } }]
    })
}
