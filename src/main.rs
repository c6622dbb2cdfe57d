use std::net::SocketAddr;
use std::sync::Arc;

use dotenvy::dotenv;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use flashcards_backend::config::Config;
use flashcards_backend::services::fallback::CannedFallback;
use flashcards_backend::services::generation_client::GenerationClient;
use flashcards_backend::{build_router, db, AppState};

#[tokio::main]
async fn main() {
    // 1. 加载 .env 环境变量
    dotenv().ok();

    // 2. 初始化日志系统
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "info".into()),
        ))
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = Config::from_env().expect("Invalid configuration");

    // 3. 打开数据库并建表
    let pool = db::connect(&config.db_path)
        .await
        .expect("Failed to open SQLite database");
    db::init_schema(&pool)
        .await
        .expect("Failed to create flashcards table");
    tracing::info!(db_path = %config.db_path, "Database ready");

    // 4. 生成客户端，网络失败时使用内置卡片兜底
    let generator = GenerationClient::new(config.provider.clone(), Arc::new(CannedFallback))
        .expect("Failed to build HTTP client");
    if !generator.has_credential() {
        tracing::warn!("GROQ_API_KEY is not set, /generate_flashcards will serve offline flashcards");
    }

    let shared_state = Arc::new(AppState { db: pool, generator });
    let app = build_router(shared_state);

    // 5. 启动服务
    let addr: SocketAddr = format!("{}:{}", config.host, config.port)
        .parse()
        .expect("HOST/PORT must form a valid socket address");
    tracing::info!("🚀 Server started at http://{}", addr);

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .expect("Failed to bind address");
    axum::serve(listener, app).await.expect("Server error");
}
