//! Folder repository implementation.

use std::collections::HashMap;

use async_trait::async_trait;
use chrono::Utc;
use sqlx::{Row, SqlitePool};
use tracing::{debug, info};
use uuid::Uuid;

use studium_core::{
    new_v7, Error, Folder, FolderRepository, FolderWithSpaces, Result, Space,
};

use crate::spaces::row_to_space;

/// SQLite implementation of FolderRepository.
pub struct SqliteFolderRepository {
    pool: SqlitePool,
}

impl SqliteFolderRepository {
    /// Create a new SqliteFolderRepository with the given connection pool.
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl FolderRepository for SqliteFolderRepository {
    async fn create(&self, name: &str, owner: &str) -> Result<Folder> {
        if name.trim().is_empty() {
            return Err(Error::Validation("folder name must not be empty".into()));
        }

        let folder = Folder {
            id: new_v7(),
            name: name.to_string(),
            owner: owner.to_string(),
            created_at_utc: Utc::now(),
        };

        sqlx::query("INSERT INTO folder (id, name, owner, created_at_utc) VALUES (?, ?, ?, ?)")
            .bind(folder.id)
            .bind(&folder.name)
            .bind(&folder.owner)
            .bind(folder.created_at_utc)
            .execute(&self.pool)
            .await
            .map_err(Error::Database)?;

        debug!(
            subsystem = "db",
            component = "folders",
            op = "create",
            folder_id = %folder.id,
            owner = %folder.owner,
            "Created folder"
        );
        Ok(folder)
    }

    async fn list(&self, owner: &str) -> Result<Vec<FolderWithSpaces>> {
        let folder_rows = sqlx::query(
            "SELECT id, name, owner, created_at_utc FROM folder WHERE owner = ? ORDER BY id",
        )
        .bind(owner)
        .fetch_all(&self.pool)
        .await
        .map_err(Error::Database)?;

        // One query for all spaces of this owner's folders, grouped in memory.
        let space_rows = sqlx::query(
            r#"
            SELECT s.id, s.kind, s.name, s.folder_id, s.notes, s.created_at_utc
            FROM space s
            JOIN folder f ON f.id = s.folder_id
            WHERE f.owner = ?
            ORDER BY s.id
            "#,
        )
        .bind(owner)
        .fetch_all(&self.pool)
        .await
        .map_err(Error::Database)?;

        let mut spaces_by_folder: HashMap<Uuid, Vec<Space>> = HashMap::new();
        for row in &space_rows {
            let space = row_to_space(row)?;
            spaces_by_folder.entry(space.folder_id).or_default().push(space);
        }

        Ok(folder_rows
            .into_iter()
            .map(|r| {
                let id: Uuid = r.get("id");
                FolderWithSpaces {
                    id,
                    name: r.get("name"),
                    owner: r.get("owner"),
                    created_at_utc: r.get("created_at_utc"),
                    spaces: spaces_by_folder.remove(&id).unwrap_or_default(),
                }
            })
            .collect())
    }

    async fn delete(&self, id: Uuid) -> Result<()> {
        let mut tx = self.pool.begin().await.map_err(Error::Database)?;

        // Full cascade, innermost first: messages of the folder's spaces,
        // then spaces, then resources, then the folder row itself.
        // Deleting an unknown id is a no-op success.
        sqlx::query(
            "DELETE FROM chat_message WHERE space_id IN (SELECT id FROM space WHERE folder_id = ?)",
        )
        .bind(id)
        .execute(&mut *tx)
        .await
        .map_err(Error::Database)?;

        sqlx::query("DELETE FROM space WHERE folder_id = ?")
            .bind(id)
            .execute(&mut *tx)
            .await
            .map_err(Error::Database)?;

        sqlx::query("DELETE FROM resource WHERE folder_id = ?")
            .bind(id)
            .execute(&mut *tx)
            .await
            .map_err(Error::Database)?;

        let result = sqlx::query("DELETE FROM folder WHERE id = ?")
            .bind(id)
            .execute(&mut *tx)
            .await
            .map_err(Error::Database)?;

        tx.commit().await.map_err(Error::Database)?;

        info!(
            subsystem = "db",
            component = "folders",
            op = "delete_cascade",
            folder_id = %id,
            result_count = result.rows_affected(),
            "Deleted folder with cascade"
        );
        Ok(())
    }

    async fn exists(&self, id: Uuid) -> Result<bool> {
        let exists: bool = sqlx::query_scalar("SELECT EXISTS(SELECT 1 FROM folder WHERE id = ?)")
            .bind(id)
            .fetch_one(&self.pool)
            .await
            .map_err(Error::Database)?;
        Ok(exists)
    }

    async fn clear_all(&self, owner: &str) -> Result<u64> {
        let mut tx = self.pool.begin().await.map_err(Error::Database)?;

        sqlx::query(
            r#"
            DELETE FROM chat_message WHERE space_id IN (
                SELECT s.id FROM space s
                JOIN folder f ON f.id = s.folder_id
                WHERE f.owner = ?
            )
            "#,
        )
        .bind(owner)
        .execute(&mut *tx)
        .await
        .map_err(Error::Database)?;

        sqlx::query(
            "DELETE FROM space WHERE folder_id IN (SELECT id FROM folder WHERE owner = ?)",
        )
        .bind(owner)
        .execute(&mut *tx)
        .await
        .map_err(Error::Database)?;

        sqlx::query(
            "DELETE FROM resource WHERE folder_id IN (SELECT id FROM folder WHERE owner = ?)",
        )
        .bind(owner)
        .execute(&mut *tx)
        .await
        .map_err(Error::Database)?;

        let result = sqlx::query("DELETE FROM folder WHERE owner = ?")
            .bind(owner)
            .execute(&mut *tx)
            .await
            .map_err(Error::Database)?;

        tx.commit().await.map_err(Error::Database)?;

        info!(
            subsystem = "db",
            component = "folders",
            op = "clear_all",
            owner = %owner,
            result_count = result.rows_affected(),
            "Cleared all folders for owner"
        );
        Ok(result.rows_affected())
    }
}
