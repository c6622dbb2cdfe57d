//! 从模型返回的原始文本中提取候选问答。
//!
//! 优先截取第一个 `[` 到最后一个 `]` 之间的内容按 JSON 数组解析；
//! 找不到括号时再按 `Q:` / `A:` 行格式解析。字段校验不在这里做，
//! 由调用方对每个候选调用 [`validate_candidate`]。

use serde_json::{json, Value};

use crate::models::flashcard::QaPair;

#[derive(Debug, thiserror::Error)]
pub enum ParseError {
    #[error("invalid JSON array in model response: {0}")]
    InvalidJson(#[from] serde_json::Error),

    #[error("No JSON array or Q/A pairs found in model response")]
    NoStructure,
}

pub fn parse_candidates(raw: &str) -> Result<Vec<Value>, ParseError> {
    if let Some(slice) = bracket_slice(raw) {
        // 解码失败直接返回错误，不再尝试行解析
        return Ok(serde_json::from_str::<Vec<Value>>(slice)?);
    }

    let pairs = parse_qa_lines(raw);
    if pairs.is_empty() {
        return Err(ParseError::NoStructure);
    }

    Ok(pairs
        .into_iter()
        .map(|p| json!({"question": p.question, "answer": p.answer}))
        .collect())
}

fn bracket_slice(raw: &str) -> Option<&str> {
    let start = raw.find('[')?;
    let end = raw.rfind(']')?;
    (end > start).then(|| &raw[start..=end])
}

fn parse_qa_lines(raw: &str) -> Vec<QaPair> {
    let mut pairs = Vec::new();
    let mut question: Option<String> = None;
    let mut answer: Option<String> = None;

    for line in raw.lines() {
        let line = line.trim();
        if let Some(rest) = line.strip_prefix("Q:") {
            // 只有凑齐一对才清空缓冲，单独的答案保留给下一个问题
            if question.is_some() && answer.is_some() {
                if let (Some(q), Some(a)) = (question.take(), answer.take()) {
                    pairs.push(QaPair { question: q, answer: a });
                }
            }
            question = non_empty(rest);
        } else if let Some(rest) = line.strip_prefix("A:") {
            answer = non_empty(rest);
        }
    }

    if let (Some(q), Some(a)) = (question, answer) {
        pairs.push(QaPair { question: q, answer: a });
    }
    pairs
}

fn non_empty(text: &str) -> Option<String> {
    let text = text.trim();
    (!text.is_empty()).then(|| text.to_string())
}

/// 候选必须是对象，且 `question` / `answer` 都是非空字符串
pub fn validate_candidate(candidate: &Value) -> Result<QaPair, String> {
    let field = |name: &str| -> Result<String, String> {
        match candidate.get(name) {
            Some(Value::String(s)) if !s.trim().is_empty() => Ok(s.clone()),
            Some(Value::String(_)) => Err(format!("field '{name}' is empty")),
            Some(other) => Err(format!("field '{name}' must be a string, got {other}")),
            None => Err(format!("field '{name}' is missing")),
        }
    };

    if !candidate.is_object() {
        return Err(format!("expected an object, got {candidate}"));
    }

    Ok(QaPair {
        question: field("question")?,
        answer: field("answer")?,
    })
}
