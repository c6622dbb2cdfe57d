use axum::{extract::{rejection::JsonRejection, Path, State}, Json};
use serde_json::{json, Value};
use std::sync::Arc;

use crate::error::{AppError, AppResult};
use crate::models::flashcard::{Flashcard, FlashcardPayload};
use crate::services::flashcard_service;
use crate::AppState;

/// question / answer 缺失或为空时返回 400
fn required_fields(payload: &FlashcardPayload) -> AppResult<(&str, &str)> {
    match (payload.question.as_deref(), payload.answer.as_deref()) {
        (Some(q), Some(a)) if !q.trim().is_empty() && !a.trim().is_empty() => Ok((q, a)),
        _ => Err(AppError::BadRequest(
            "Both 'question' and 'answer' are required.".to_string(),
        )),
    }
}

/// 请求体不是合法 JSON 或字段类型不对，同样按 400 处理
fn parse_body(body: Result<Json<FlashcardPayload>, JsonRejection>) -> AppResult<FlashcardPayload> {
    body.map(|Json(payload)| payload)
        .map_err(|rejection| AppError::BadRequest(rejection.body_text()))
}

/// 1. 获取全部卡片 (按 id 倒序)
pub async fn list_flashcards(State(state): State<Arc<AppState>>) -> AppResult<Json<Vec<Flashcard>>> {
    let cards = flashcard_service::list(&state.db).await?;
    Ok(Json(cards))
}

/// 2. 新建卡片，topic 缺省为 "General"
pub async fn create_flashcard(
    State(state): State<Arc<AppState>>,
    body: Result<Json<FlashcardPayload>, JsonRejection>,
) -> AppResult<Json<Flashcard>> {
    let payload = parse_body(body)?;
    let (question, answer) = required_fields(&payload)?;
    let card =
        flashcard_service::create(&state.db, question, answer, payload.topic.as_deref()).await?;
    Ok(Json(card))
}

/// 3. 更新卡片
pub async fn update_flashcard(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i64>,
    body: Result<Json<FlashcardPayload>, JsonRejection>,
) -> AppResult<Json<Flashcard>> {
    let payload = parse_body(body)?;
    let (question, answer) = required_fields(&payload)?;
    let card =
        flashcard_service::update(&state.db, id, question, answer, payload.topic.as_deref()).await?;
    Ok(Json(card))
}

/// 4. 删除卡片
pub async fn delete_flashcard(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i64>,
) -> AppResult<Json<Value>> {
    flashcard_service::delete(&state.db, id).await?;
    Ok(Json(json!({ "result": "success", "message": "Flashcard deleted" })))
}
