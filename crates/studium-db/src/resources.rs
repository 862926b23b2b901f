//! Resource repository implementation.

use async_trait::async_trait;
use chrono::Utc;
use sha2::{Digest, Sha256};
use sqlx::{Row, SqlitePool};
use tracing::debug;
use uuid::Uuid;

use studium_core::{
    new_v7, Error, Resource, ResourceRepository, ResourceSummary, Result,
};

/// SQLite implementation of ResourceRepository.
pub struct SqliteResourceRepository {
    pool: SqlitePool,
}

impl SqliteResourceRepository {
    /// Create a new SqliteResourceRepository with the given connection pool.
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Compute SHA256 hash of content.
    fn hash_content(content: &str) -> String {
        let mut hasher = Sha256::new();
        hasher.update(content.as_bytes());
        format!("sha256:{}", hex::encode(hasher.finalize()))
    }

    async fn folder_exists(&self, folder_id: Uuid) -> Result<bool> {
        let exists: bool = sqlx::query_scalar("SELECT EXISTS(SELECT 1 FROM folder WHERE id = ?)")
            .bind(folder_id)
            .fetch_one(&self.pool)
            .await
            .map_err(Error::Database)?;
        Ok(exists)
    }
}

#[async_trait]
impl ResourceRepository for SqliteResourceRepository {
    async fn create(&self, name: &str, folder_id: Uuid, content: &str) -> Result<Resource> {
        // Empty content is unrepresentable here: extraction failures surface
        // as Error::Extraction upstream and nothing reaches the store.
        if content.is_empty() {
            return Err(Error::Validation(
                "resource content must not be empty".into(),
            ));
        }
        if !self.folder_exists(folder_id).await? {
            return Err(Error::NotFound(format!("folder {folder_id}")));
        }

        let resource = Resource {
            id: new_v7(),
            name: name.to_string(),
            folder_id,
            content: content.to_string(),
            content_hash: Self::hash_content(content),
            created_at_utc: Utc::now(),
        };

        sqlx::query(
            r#"
            INSERT INTO resource (id, name, folder_id, content, content_hash, created_at_utc)
            VALUES (?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(resource.id)
        .bind(&resource.name)
        .bind(resource.folder_id)
        .bind(&resource.content)
        .bind(&resource.content_hash)
        .bind(resource.created_at_utc)
        .execute(&self.pool)
        .await
        .map_err(Error::Database)?;

        debug!(
            subsystem = "db",
            component = "resources",
            op = "create",
            resource_id = %resource.id,
            folder_id = %folder_id,
            "Stored resource"
        );
        Ok(resource)
    }

    async fn get(&self, id: Uuid) -> Result<Resource> {
        let row = sqlx::query(
            r#"
            SELECT id, name, folder_id, content, content_hash, created_at_utc
            FROM resource
            WHERE id = ?
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(Error::Database)?;

        let row = row.ok_or_else(|| Error::NotFound(format!("resource {id}")))?;
        Ok(Resource {
            id: row.get("id"),
            name: row.get("name"),
            folder_id: row.get("folder_id"),
            content: row.get("content"),
            content_hash: row.get("content_hash"),
            created_at_utc: row.get("created_at_utc"),
        })
    }

    async fn list_for_folder(&self, folder_id: Uuid) -> Result<Vec<ResourceSummary>> {
        if !self.folder_exists(folder_id).await? {
            return Err(Error::NotFound(format!("folder {folder_id}")));
        }

        let rows = sqlx::query(
            "SELECT id, name, LENGTH(content) AS content_len FROM resource WHERE folder_id = ? ORDER BY id",
        )
        .bind(folder_id)
        .fetch_all(&self.pool)
        .await
        .map_err(Error::Database)?;

        Ok(rows
            .into_iter()
            .map(|r| ResourceSummary {
                id: r.get("id"),
                name: r.get("name"),
                content_len: r.get("content_len"),
            })
            .collect())
    }

    async fn delete(&self, id: Uuid) -> Result<()> {
        // No-op success when absent.
        sqlx::query("DELETE FROM resource WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(Error::Database)?;
        Ok(())
    }
}
