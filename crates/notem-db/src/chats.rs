//! Chat history repository implementation.
//!
//! Chat records are append-only: one row per answered question, never
//! updated or deleted by the core.

use async_trait::async_trait;
use sqlx::{postgres::PgRow, Pool, Postgres, Row};
use uuid::Uuid;

use notem_core::{ChatRecord, ChatRepository, Error, Result};

/// PostgreSQL implementation of ChatRepository.
pub struct PgChatRepository {
    pool: Pool<Postgres>,
}

impl PgChatRepository {
    /// Create a new PgChatRepository with the given connection pool.
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }
}

fn map_row_to_chat(row: PgRow) -> ChatRecord {
    ChatRecord {
        id: row.get("id"),
        user_id: row.get("user_id"),
        question: row.get("question"),
        answer: row.get("answer"),
        sources: row.get("sources"),
        created_at: row.get("created_at"),
    }
}

#[async_trait]
impl ChatRepository for PgChatRepository {
    async fn append(
        &self,
        user_id: Uuid,
        question: &str,
        answer: &str,
        sources: &[Uuid],
    ) -> Result<Uuid> {
        let id = Uuid::new_v4();
        sqlx::query(
            r#"
            INSERT INTO chats (id, user_id, question, answer, sources)
            VALUES ($1, $2, $3, $4, $5)
            "#,
        )
        .bind(id)
        .bind(user_id)
        .bind(question)
        .bind(answer)
        .bind(sources)
        .execute(&self.pool)
        .await
        .map_err(Error::Database)?;

        Ok(id)
    }

    async fn list_recent(&self, user_id: Uuid, limit: i64) -> Result<Vec<ChatRecord>> {
        let rows = sqlx::query(
            r#"
            SELECT id, user_id, question, answer, sources, created_at
            FROM chats
            WHERE user_id = $1
            ORDER BY created_at DESC
            LIMIT $2
            "#,
        )
        .bind(user_id)
        .bind(limit)
        .fetch_all(&self.pool)
        .await
        .map_err(Error::Database)?;

        Ok(rows.into_iter().map(map_row_to_chat).collect())
    }
}
