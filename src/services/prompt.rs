/// 作为 system 消息发送给模型
pub const SYSTEM_INSTRUCTION: &str = concat!(
    "You are a flashcard generator. ",
    "Return ONLY valid JSON: a list of objects with keys 'question' and 'answer'. ",
    "No markdown, no commentary, no extra keys. Example: ",
    r#"[{"question":"Q1","answer":"A1"},{"question":"Q2","answer":"A2"}]"#,
);

const SCHEMA_EXAMPLE: &str = r#"[{"question": "What is ...", "answer": "..."}]"#;

/// 渲染后的提示词，保留主题和数量供兜底策略使用
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Prompt {
    pub topic: String,
    pub count: usize,
    pub text: String,
}

pub fn build_prompt(topic: &str, count: usize) -> Prompt {
    let text = format!(
        "You are a flashcard generator. Return ONLY valid JSON: a list of objects with keys 'question' and 'answer'. \
         No markdown, no commentary, no extra keys. Example: {SCHEMA_EXAMPLE}\n\
         Topic: \"{topic}\"\n\
         Count: {count}\n\
         Constraints:\n\
         - Each question must be short and beginner-friendly.\n\
         - Each answer must be concise (<= 120 chars).\n\
         - DO NOT include anything except the JSON array."
    );

    Prompt {
        topic: topic.to_string(),
        count,
        text,
    }
}
