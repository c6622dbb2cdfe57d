use once_cell::sync::Lazy;
use serde_json::json;

use crate::services::prompt::Prompt;

/// 走兜底的原因
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FallbackReason {
    /// 未配置 API key
    MissingCredential,
    /// 网络错误、超时、非 2xx 或响应格式不对
    Upstream,
}

/// 生成失败时的兜底策略，返回 `None` 表示不兜底，把错误交给调用方
pub trait FallbackStrategy: Send + Sync {
    fn fallback(&self, prompt: &Prompt, reason: FallbackReason) -> Option<String>;
}

static DEV_CARDS: Lazy<String> = Lazy::new(|| {
    json!([
        {"question": "What is Python?", "answer": "A high-level, interpreted language."},
        {"question": "Print Hello World?", "answer": "print('Hello, World!')"},
        {"question": "Why indentation?", "answer": "It defines blocks like loops and functions."},
    ])
    .to_string()
});

static PYTHON_CARDS: Lazy<String> = Lazy::new(|| {
    json!([
        {"question": "What is Python?", "answer": "A high-level programming language."},
        {"question": "How to print in Python?", "answer": "Use print('text')"},
        {"question": "Python file extension?", "answer": ".py"},
    ])
    .to_string()
});

static JAVASCRIPT_CARDS: Lazy<String> = Lazy::new(|| {
    json!([
        {"question": "What is JavaScript?", "answer": "A programming language for web development."},
        {"question": "How to print in JavaScript?", "answer": "console.log('text')"},
        {"question": "JavaScript file extension?", "answer": ".js"},
    ])
    .to_string()
});

static GENERIC_CARDS: Lazy<String> = Lazy::new(|| {
    json!([
        {"question": "What is this topic?", "answer": "A fundamental concept to learn."},
        {"question": "Why learn about this topic?", "answer": "It's important for understanding the subject."},
        {"question": "Basic example?", "answer": "Start with simple concepts and practice."},
    ])
    .to_string()
});

/// 默认策略：固定的三条卡片，按主题关键字挑选
#[derive(Debug, Clone, Copy, Default)]
pub struct CannedFallback;

impl FallbackStrategy for CannedFallback {
    fn fallback(&self, prompt: &Prompt, reason: FallbackReason) -> Option<String> {
        if reason == FallbackReason::MissingCredential {
            return Some(DEV_CARDS.as_str().to_owned());
        }

        // 只匹配主题：提示词正文里的 "JSON" 本身就含 "js"
        let topic = prompt.topic.to_lowercase();
        let cards = if topic.contains("python") {
            &PYTHON_CARDS
        } else if topic.contains("javascript") || topic.contains("js") {
            &JAVASCRIPT_CARDS
        } else {
            &GENERIC_CARDS
        };
        Some(cards.as_str().to_owned())
    }
}

/// 从不兜底
#[derive(Debug, Clone, Copy, Default)]
pub struct NoFallback;

impl FallbackStrategy for NoFallback {
    fn fallback(&self, _prompt: &Prompt, _reason: FallbackReason) -> Option<String> {
        None
    }
}
