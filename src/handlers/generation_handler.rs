use axum::{extract::{rejection::JsonRejection, State}, Json};
use std::sync::Arc;

use crate::error::{AppError, AppResult};
use crate::models::flashcard::{GenerateRequest, QaPair};
use crate::services::{prompt, response_parser};
use crate::AppState;

pub const MIN_COUNT: i64 = 1;
pub const MAX_COUNT: i64 = 20;

const RAW_LOG_CHARS: usize = 500;

/// AI 生成卡片：提示词 -> 模型 (或兜底) -> 解析 -> 逐条校验 -> 截断到 n 条
///
/// 生成结果不会自动入库。
pub async fn generate_flashcards(
    State(state): State<Arc<AppState>>,
    body: Result<Json<GenerateRequest>, JsonRejection>,
) -> AppResult<Json<Vec<QaPair>>> {
    let Json(req) = body.map_err(|rejection| AppError::Validation(rejection.body_text()))?;
    if req.topic.trim().is_empty() {
        return Err(AppError::Validation("'topic' must not be empty.".to_string()));
    }
    if !(MIN_COUNT..=MAX_COUNT).contains(&req.n) {
        return Err(AppError::Validation(format!(
            "'n' must be between {MIN_COUNT} and {MAX_COUNT}."
        )));
    }
    let count = req.n as usize;

    tracing::info!(">>> 生成卡片: topic={}, n={}", req.topic, count);

    let prompt = prompt::build_prompt(&req.topic, count);
    let raw = state.generator.complete(&prompt).await?;

    let preview: String = raw.chars().take(RAW_LOG_CHARS).collect();
    tracing::info!(raw = %preview, "Raw LLM response (truncated)");

    let candidates = response_parser::parse_candidates(&raw).inspect_err(|_| {
        tracing::error!(raw = %raw, "LLM response not valid JSON");
    })?;

    // 单条校验失败只丢弃，不影响其他条目
    let items: Vec<QaPair> = candidates
        .iter()
        .filter_map(|candidate| match response_parser::validate_candidate(candidate) {
            Ok(pair) => Some(pair),
            Err(reason) => {
                tracing::error!(%reason, item = %candidate, "Schema validation error");
                None
            }
        })
        .take(count)
        .collect();

    if items.is_empty() {
        return Err(AppError::EmptyResult);
    }

    tracing::info!("<<< 生成完成: {} 条", items.len());
    Ok(Json(items))
}
