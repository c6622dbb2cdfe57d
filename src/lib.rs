use axum::{
    routing::{get, post, put},
    Router,
};
use sqlx::SqlitePool;
use std::sync::Arc;
use tower_http::catch_panic::CatchPanicLayer;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

// 声明子模块
pub mod config;
pub mod db;
pub mod error;
pub mod handlers;
pub mod models;
pub mod services;

use services::generation_client::GenerationClient;

// 全局状态，Handler 中获取数据库连接池和生成客户端
pub struct AppState {
    pub db: SqlitePool,
    pub generator: GenerationClient,
}

/// 构建路由，main 和集成测试共用
pub fn build_router(state: Arc<AppState>) -> Router {
    // 前端从其他端口访问，允许所有来源
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/", get(handlers::root_handler::welcome))
        // 卡片增删改查
        .route("/flashcards", get(handlers::flashcard_handler::list_flashcards)
            .post(handlers::flashcard_handler::create_flashcard))
        .route("/flashcards/:id", put(handlers::flashcard_handler::update_flashcard)
            .delete(handlers::flashcard_handler::delete_flashcard))

        // AI 生成接口
        .route("/generate_flashcards", post(handlers::generation_handler::generate_flashcards))

        // 中间件：panic 兜底、日志记录和跨域
        .layer(CatchPanicLayer::custom(error::panic_response))
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}
