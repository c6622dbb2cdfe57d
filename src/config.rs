use std::time::Duration;

/// 默认的大模型接口地址 (Groq 的 OpenAI 兼容接口)
pub const DEFAULT_API_URL: &str = "https://api.groq.com/openai/v1/chat/completions";
pub const DEFAULT_MODEL: &str = "deepseek-r1-distill-llama-70b";

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("{name} must be a valid number, got {value:?}")]
    InvalidNumber { name: &'static str, value: String },
}

/// 大模型调用相关配置，在启动时构造一次并注入生成客户端
#[derive(Debug, Clone)]
pub struct ProviderConfig {
    /// 为空时走离线兜底数据
    pub api_key: Option<String>,
    pub api_url: String,
    pub model: String,
    pub temperature: f32,
    pub max_tokens: u32,
    pub timeout: Duration,
}

impl Default for ProviderConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            api_url: DEFAULT_API_URL.to_string(),
            model: DEFAULT_MODEL.to_string(),
            temperature: 0.1,
            max_tokens: 800,
            timeout: Duration::from_secs(30),
        }
    }
}

/// 服务配置
///
/// | 环境变量                  | 默认值                                             |
/// |---------------------------|----------------------------------------------------|
/// | `HOST`                    | `127.0.0.1`                                        |
/// | `PORT`                    | `8000`                                             |
/// | `DB_PATH`                 | `flashcards.db`                                    |
/// | `GROQ_API_KEY`            | 未设置                                             |
/// | `GROQ_API_URL`            | `https://api.groq.com/openai/v1/chat/completions`  |
/// | `GROQ_MODEL`              | `deepseek-r1-distill-llama-70b`                    |
/// | `GENERATION_TIMEOUT_SECS` | `30`                                               |
#[derive(Debug, Clone)]
pub struct Config {
    pub host: String,
    pub port: u16,
    pub db_path: String,
    pub provider: ProviderConfig,
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        let host = env_or("HOST", "127.0.0.1");
        let port = parse_env("PORT", 8000u16)?;
        let db_path = env_or("DB_PATH", "flashcards.db");

        // 空字符串等同于未配置
        let api_key = std::env::var("GROQ_API_KEY")
            .ok()
            .map(|k| k.trim().to_string())
            .filter(|k| !k.is_empty());

        let provider = ProviderConfig {
            api_key,
            api_url: env_or("GROQ_API_URL", DEFAULT_API_URL),
            model: env_or("GROQ_MODEL", DEFAULT_MODEL),
            timeout: Duration::from_secs(parse_env("GENERATION_TIMEOUT_SECS", 30u64)?),
            ..ProviderConfig::default()
        };

        Ok(Self { host, port, db_path, provider })
    }
}

fn env_or(name: &str, default: &str) -> String {
    std::env::var(name).unwrap_or_else(|_| default.to_string())
}

fn parse_env<T: std::str::FromStr>(name: &'static str, default: T) -> Result<T, ConfigError> {
    match std::env::var(name) {
        Ok(value) => value
            .trim()
            .parse()
            .map_err(|_| ConfigError::InvalidNumber { name, value }),
        Err(_) => Ok(default),
    }
}
