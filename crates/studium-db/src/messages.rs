//! Chat message repository implementation.
//!
//! Messages are append-only. Read-back order is ascending by timestamp with
//! insertion order (rowid) as the tiebreak, so concurrent appends within the
//! same clock tick stay stable.

use async_trait::async_trait;
use chrono::Utc;
use sqlx::{Row, SqlitePool};
use tracing::debug;
use uuid::Uuid;

use studium_core::{
    new_v7, ChatMessage, Error, MessageRepository, MessageRole, Result,
};

/// SQLite implementation of MessageRepository.
pub struct SqliteMessageRepository {
    pool: SqlitePool,
}

impl SqliteMessageRepository {
    /// Create a new SqliteMessageRepository with the given connection pool.
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl MessageRepository for SqliteMessageRepository {
    async fn append(
        &self,
        space_id: Uuid,
        role: MessageRole,
        content: &str,
    ) -> Result<ChatMessage> {
        let space_exists: bool =
            sqlx::query_scalar("SELECT EXISTS(SELECT 1 FROM space WHERE id = ?)")
                .bind(space_id)
                .fetch_one(&self.pool)
                .await
                .map_err(Error::Database)?;
        if !space_exists {
            return Err(Error::NotFound(format!("space {space_id}")));
        }

        let message = ChatMessage {
            id: new_v7(),
            space_id,
            role,
            content: content.to_string(),
            timestamp: Utc::now(),
        };

        sqlx::query(
            r#"
            INSERT INTO chat_message (id, space_id, role, content, timestamp)
            VALUES (?, ?, ?, ?, ?)
            "#,
        )
        .bind(message.id)
        .bind(message.space_id)
        .bind(message.role.as_str())
        .bind(&message.content)
        .bind(message.timestamp)
        .execute(&self.pool)
        .await
        .map_err(Error::Database)?;

        Ok(message)
    }

    async fn list(&self, space_id: Uuid) -> Result<Vec<ChatMessage>> {
        let rows = sqlx::query(
            r#"
            SELECT id, space_id, role, content, timestamp
            FROM chat_message
            WHERE space_id = ?
            ORDER BY timestamp ASC, rowid ASC
            "#,
        )
        .bind(space_id)
        .fetch_all(&self.pool)
        .await
        .map_err(Error::Database)?;

        rows.into_iter()
            .map(|r| {
                let role: String = r.get("role");
                Ok(ChatMessage {
                    id: r.get("id"),
                    space_id: r.get("space_id"),
                    role: role
                        .parse()
                        .map_err(|_| Error::Internal(format!("invalid role in row: {role}")))?,
                    content: r.get("content"),
                    timestamp: r.get("timestamp"),
                })
            })
            .collect()
    }

    async fn clear(&self, space_id: Uuid) -> Result<u64> {
        let result = sqlx::query("DELETE FROM chat_message WHERE space_id = ?")
            .bind(space_id)
            .execute(&self.pool)
            .await
            .map_err(Error::Database)?;

        debug!(
            subsystem = "db",
            component = "messages",
            op = "clear",
            space_id = %space_id,
            result_count = result.rows_affected(),
            "Cleared messages"
        );
        Ok(result.rows_affected())
    }
}
