use sqlx::SqlitePool;

use crate::models::flashcard::{Flashcard, DEFAULT_TOPIC};

#[derive(Debug, thiserror::Error)]
pub enum DbError {
    #[error("Database error: {0}")]
    Sqlx(#[from] sqlx::Error),

    #[error("Flashcard with id {0} not found.")]
    NotFound(i64),

    #[error("{0}")]
    InvalidInput(String),
}

pub type DbResult<T> = Result<T, DbError>;

const REQUIRED_FIELDS: &str = "Both 'question' and 'answer' are required.";

fn validate(question: &str, answer: &str) -> DbResult<()> {
    if question.trim().is_empty() || answer.trim().is_empty() {
        return Err(DbError::InvalidInput(REQUIRED_FIELDS.to_string()));
    }
    Ok(())
}

fn topic_or_default(topic: Option<&str>) -> &str {
    match topic {
        Some(t) if !t.is_empty() => t,
        _ => DEFAULT_TOPIC,
    }
}

/// 按 id 倒序返回全部卡片 (最新的在前)
pub async fn list(pool: &SqlitePool) -> DbResult<Vec<Flashcard>> {
    let cards = sqlx::query_as::<_, Flashcard>(
        r#"
        SELECT id, question, answer, COALESCE(topic, 'General') AS topic
        FROM flashcards
        ORDER BY id DESC
        "#,
    )
    .fetch_all(pool)
    .await?;

    Ok(cards)
}

pub async fn create(
    pool: &SqlitePool,
    question: &str,
    answer: &str,
    topic: Option<&str>,
) -> DbResult<Flashcard> {
    validate(question, answer)?;

    let card = sqlx::query_as::<_, Flashcard>(
        r#"
        INSERT INTO flashcards (question, answer, topic)
        VALUES (?, ?, ?)
        RETURNING id, question, answer, topic
        "#,
    )
    .bind(question)
    .bind(answer)
    .bind(topic_or_default(topic))
    .fetch_one(pool)
    .await?;

    tracing::info!(id = card.id, topic = %card.topic, "flashcard created");
    Ok(card)
}

/// 整体替换问题、答案和主题
pub async fn update(
    pool: &SqlitePool,
    id: i64,
    question: &str,
    answer: &str,
    topic: Option<&str>,
) -> DbResult<Flashcard> {
    validate(question, answer)?;

    sqlx::query_as::<_, Flashcard>(
        r#"
        UPDATE flashcards
        SET question = ?, answer = ?, topic = ?
        WHERE id = ?
        RETURNING id, question, answer, topic
        "#,
    )
    .bind(question)
    .bind(answer)
    .bind(topic_or_default(topic))
    .bind(id)
    .fetch_optional(pool)
    .await?
    .ok_or(DbError::NotFound(id))
}

pub async fn delete(pool: &SqlitePool, id: i64) -> DbResult<()> {
    let result = sqlx::query("DELETE FROM flashcards WHERE id = ?")
        .bind(id)
        .execute(pool)
        .await?;

    if result.rows_affected() == 0 {
        return Err(DbError::NotFound(id));
    }

    tracing::info!(id, "flashcard deleted");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use sqlx::sqlite::SqlitePoolOptions;

    async fn memory_pool() -> SqlitePool {
        // 内存库每个连接各自独立，只能开一个连接
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .connect("sqlite::memory:")
            .await
            .unwrap();
        crate::db::init_schema(&pool).await.unwrap();
        pool
    }

    #[tokio::test]
    async fn create_then_list_newest_first() {
        let pool = memory_pool().await;
        let first = create(&pool, "Q1", "A1", Some("Tech")).await.unwrap();
        let second = create(&pool, "Q2", "A2", None).await.unwrap();

        assert!(second.id > first.id);
        assert_eq!(second.topic, "General");

        let cards = list(&pool).await.unwrap();
        assert_eq!(cards, vec![second, first]);
    }

    #[tokio::test]
    async fn empty_topic_falls_back_to_general() {
        let pool = memory_pool().await;
        let card = create(&pool, "Q", "A", Some("")).await.unwrap();
        assert_eq!(card.topic, "General");
    }

    #[tokio::test]
    async fn create_rejects_blank_fields() {
        let pool = memory_pool().await;
        let err = create(&pool, "  ", "A", None).await.unwrap_err();
        assert!(matches!(err, DbError::InvalidInput(_)));
        assert!(list(&pool).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn update_replaces_all_fields() {
        let pool = memory_pool().await;
        let card = create(&pool, "Q", "A", Some("Old")).await.unwrap();

        let updated = update(&pool, card.id, "Q2", "A2", Some("New")).await.unwrap();
        assert_eq!(updated.id, card.id);
        assert_eq!(list(&pool).await.unwrap(), vec![updated]);
    }

    #[tokio::test]
    async fn update_missing_row_is_not_found_and_changes_nothing() {
        let pool = memory_pool().await;
        let card = create(&pool, "Q", "A", None).await.unwrap();

        let err = update(&pool, card.id + 100, "X", "Y", None).await.unwrap_err();
        assert!(matches!(err, DbError::NotFound(id) if id == card.id + 100));
        assert_eq!(list(&pool).await.unwrap(), vec![card]);
    }

    #[tokio::test]
    async fn delete_missing_row_is_not_found() {
        let pool = memory_pool().await;
        let card = create(&pool, "Q", "A", None).await.unwrap();

        assert!(matches!(delete(&pool, 999).await, Err(DbError::NotFound(999))));
        delete(&pool, card.id).await.unwrap();
        assert!(list(&pool).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn null_topic_is_read_back_as_general() {
        let pool = memory_pool().await;
        sqlx::query("INSERT INTO flashcards (question, answer, topic) VALUES ('Q', 'A', NULL)")
            .execute(&pool)
            .await
            .unwrap();

        let cards = list(&pool).await.unwrap();
        assert_eq!(cards[0].topic, "General");
    }
}
