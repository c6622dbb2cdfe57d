use sqlx::sqlite::{SqliteConnectOptions, SqlitePool, SqlitePoolOptions};

const CREATE_FLASHCARDS_TABLE: &str = r#"
CREATE TABLE IF NOT EXISTS flashcards (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    question TEXT NOT NULL,
    answer TEXT NOT NULL,
    topic TEXT DEFAULT 'General'
)
"#;

/// 打开 SQLite 连接池，文件不存在时自动创建
pub async fn connect(db_path: &str) -> Result<SqlitePool, sqlx::Error> {
    let options = SqliteConnectOptions::new()
        .filename(db_path)
        .create_if_missing(true);

    SqlitePoolOptions::new()
        .max_connections(5)
        .connect_with(options)
        .await
}

/// 建表 (幂等)，必须在其他操作之前执行
pub async fn init_schema(pool: &SqlitePool) -> Result<(), sqlx::Error> {
    sqlx::query(CREATE_FLASHCARDS_TABLE).execute(pool).await?;
    Ok(())
}
