//! Space repository implementation.

use async_trait::async_trait;
use chrono::Utc;
use sqlx::sqlite::SqliteRow;
use sqlx::{Row, SqlitePool};
use tracing::debug;
use uuid::Uuid;

use studium_core::{
    new_v7, CreateSpaceRequest, Error, Result, Space, SpaceRepository, UpdateSpaceRequest,
};

/// Map a space row to the domain type.
pub(crate) fn row_to_space(row: &SqliteRow) -> Result<Space> {
    let kind: String = row.get("kind");
    Ok(Space {
        id: row.get("id"),
        kind: kind
            .parse()
            .map_err(|_| Error::Internal(format!("invalid space kind in row: {kind}")))?,
        name: row.get("name"),
        folder_id: row.get("folder_id"),
        notes: row.get("notes"),
        created_at_utc: row.get("created_at_utc"),
    })
}

/// SQLite implementation of SpaceRepository.
pub struct SqliteSpaceRepository {
    pool: SqlitePool,
}

impl SqliteSpaceRepository {
    /// Create a new SqliteSpaceRepository with the given connection pool.
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    async fn fetch(&self, id: Uuid) -> Result<Option<Space>> {
        let row = sqlx::query(
            "SELECT id, kind, name, folder_id, notes, created_at_utc FROM space WHERE id = ?",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(Error::Database)?;

        row.as_ref().map(row_to_space).transpose()
    }
}

#[async_trait]
impl SpaceRepository for SqliteSpaceRepository {
    async fn create(&self, req: CreateSpaceRequest) -> Result<Space> {
        let folder_exists: bool =
            sqlx::query_scalar("SELECT EXISTS(SELECT 1 FROM folder WHERE id = ?)")
                .bind(req.folder_id)
                .fetch_one(&self.pool)
                .await
                .map_err(Error::Database)?;
        if !folder_exists {
            return Err(Error::NotFound(format!("folder {}", req.folder_id)));
        }

        let space = Space {
            id: new_v7(),
            kind: req.kind,
            name: req.name,
            folder_id: req.folder_id,
            notes: req.notes,
            created_at_utc: Utc::now(),
        };

        sqlx::query(
            r#"
            INSERT INTO space (id, kind, name, folder_id, notes, created_at_utc)
            VALUES (?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(space.id)
        .bind(space.kind.as_str())
        .bind(&space.name)
        .bind(space.folder_id)
        .bind(&space.notes)
        .bind(space.created_at_utc)
        .execute(&self.pool)
        .await
        .map_err(Error::Database)?;

        debug!(
            subsystem = "db",
            component = "spaces",
            op = "create",
            space_id = %space.id,
            folder_id = %space.folder_id,
            kind = %space.kind,
            "Created space"
        );
        Ok(space)
    }

    async fn get(&self, id: Uuid) -> Result<Space> {
        self.fetch(id)
            .await?
            .ok_or_else(|| Error::NotFound(format!("space {id}")))
    }

    async fn update(&self, id: Uuid, req: UpdateSpaceRequest) -> Result<Space> {
        // Whitelist update: only name and notes are mutable. An update that
        // carries neither is a plain fetch (still NotFound on unknown id).
        if !req.is_empty() {
            let result = sqlx::query(
                "UPDATE space SET name = COALESCE(?, name), notes = COALESCE(?, notes) WHERE id = ?",
            )
            .bind(&req.name)
            .bind(&req.notes)
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(Error::Database)?;

            if result.rows_affected() == 0 {
                return Err(Error::NotFound(format!("space {id}")));
            }
        }

        self.get(id).await
    }

    async fn delete(&self, id: Uuid) -> Result<()> {
        let mut tx = self.pool.begin().await.map_err(Error::Database)?;

        // Messages cascade with their space. No-op success when absent.
        sqlx::query("DELETE FROM chat_message WHERE space_id = ?")
            .bind(id)
            .execute(&mut *tx)
            .await
            .map_err(Error::Database)?;

        sqlx::query("DELETE FROM space WHERE id = ?")
            .bind(id)
            .execute(&mut *tx)
            .await
            .map_err(Error::Database)?;

        tx.commit().await.map_err(Error::Database)?;
        Ok(())
    }
}
