use axum::Json;
use serde_json::{json, Value};

pub async fn welcome() -> Json<Value> {
    Json(json!({ "message": "Welcome to AI Micro-Flashcards API" }))
}
