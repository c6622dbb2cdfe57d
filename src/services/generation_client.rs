use std::sync::Arc;
use std::time::Duration;

use serde_json::{json, Value};

use crate::config::ProviderConfig;
use crate::services::fallback::{FallbackReason, FallbackStrategy};
use crate::services::prompt::{Prompt, SYSTEM_INSTRUCTION};

#[derive(Debug, thiserror::Error)]
pub enum GenerationError {
    #[error("no provider credential configured")]
    NotConfigured,

    /// 网络层失败 (连接、DNS、超时等)
    #[error("provider request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("provider returned HTTP {0}")]
    HttpStatus(u16),

    #[error("provider response has no message content")]
    MissingContent,
}

/// 大模型生成客户端：单次请求，不重试，失败时交给兜底策略
#[derive(Clone)]
pub struct GenerationClient {
    http: reqwest::Client,
    config: ProviderConfig,
    fallback: Arc<dyn FallbackStrategy>,
}

impl GenerationClient {
    pub fn new(
        config: ProviderConfig,
        fallback: Arc<dyn FallbackStrategy>,
    ) -> Result<Self, GenerationError> {
        let http = reqwest::Client::builder().build()?;
        Ok(Self { http, config, fallback })
    }

    pub fn has_credential(&self) -> bool {
        self.config.api_key.is_some()
    }

    /// 使用配置中的超时时间
    pub async fn complete(&self, prompt: &Prompt) -> Result<String, GenerationError> {
        self.complete_with_timeout(prompt, self.config.timeout).await
    }

    /// 返回模型的原始文本 (可能夹带 `<think>` 之类的包裹内容)
    pub async fn complete_with_timeout(
        &self,
        prompt: &Prompt,
        timeout: Duration,
    ) -> Result<String, GenerationError> {
        let Some(api_key) = self.config.api_key.as_deref() else {
            tracing::info!("GROQ_API_KEY not set, using offline flashcards");
            return self
                .fallback
                .fallback(prompt, FallbackReason::MissingCredential)
                .ok_or(GenerationError::NotConfigured);
        };

        match self.request(api_key, prompt, timeout).await {
            Ok(content) => Ok(content),
            Err(e) => {
                tracing::warn!(error = %e, topic = %prompt.topic, "provider unavailable, using fallback");
                self.fallback
                    .fallback(prompt, FallbackReason::Upstream)
                    .ok_or(e)
            }
        }
    }

    async fn request(
        &self,
        api_key: &str,
        prompt: &Prompt,
        timeout: Duration,
    ) -> Result<String, GenerationError> {
        let body = json!({
            "model": self.config.model,
            "temperature": self.config.temperature,
            "max_tokens": self.config.max_tokens,
            "messages": [
                {"role": "system", "content": SYSTEM_INSTRUCTION},
                {"role": "user", "content": prompt.text},
            ],
        });

        let response = self
            .http
            .post(&self.config.api_url)
            .bearer_auth(api_key)
            .timeout(timeout)
            .json(&body)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(GenerationError::HttpStatus(status.as_u16()));
        }

        let data: Value = response.json().await?;
        data["choices"][0]["message"]["content"]
            .as_str()
            .map(str::to_owned)
            .ok_or(GenerationError::MissingContent)
    }
}
