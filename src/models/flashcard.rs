use serde::{Deserialize, Serialize};
use sqlx::FromRow;

pub const DEFAULT_TOPIC: &str = "General";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct Flashcard {
    pub id: i64,
    pub question: String,
    pub answer: String,
    pub topic: String,
}

/// 新建/更新卡片的请求体，字段缺失时由 handler 返回 400
#[derive(Debug, Default, Deserialize)]
pub struct FlashcardPayload {
    pub question: Option<String>,
    pub answer: Option<String>,
    pub topic: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct GenerateRequest {
    pub topic: String,
    #[serde(default = "default_count")]
    pub n: i64,
}

fn default_count() -> i64 {
    3
}

/// 通过校验的一组问答
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QaPair {
    pub question: String,
    pub answer: String,
}
