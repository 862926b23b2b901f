//! Schema initialization.
//!
//! The schema is small enough to manage in place: `init_schema` is
//! idempotent and runs at startup (and in every test fixture). Consumers who
//! manage schema externally can skip it.

use sqlx::SqlitePool;
use tracing::info;

use studium_core::{Error, Result};

const CREATE_TABLES: &[&str] = &[
    r#"
    CREATE TABLE IF NOT EXISTS folder (
        id BLOB PRIMARY KEY,
        name TEXT NOT NULL,
        owner TEXT NOT NULL,
        created_at_utc TEXT NOT NULL
    )
    "#,
    r#"
    CREATE TABLE IF NOT EXISTS resource (
        id BLOB PRIMARY KEY,
        name TEXT NOT NULL,
        folder_id BLOB NOT NULL REFERENCES folder(id),
        content TEXT NOT NULL,
        content_hash TEXT NOT NULL,
        created_at_utc TEXT NOT NULL
    )
    "#,
    r#"
    CREATE TABLE IF NOT EXISTS space (
        id BLOB PRIMARY KEY,
        kind TEXT NOT NULL,
        name TEXT NOT NULL,
        folder_id BLOB NOT NULL REFERENCES folder(id),
        notes TEXT,
        created_at_utc TEXT NOT NULL
    )
    "#,
    r#"
    CREATE TABLE IF NOT EXISTS chat_message (
        id BLOB PRIMARY KEY,
        space_id BLOB NOT NULL REFERENCES space(id),
        role TEXT NOT NULL,
        content TEXT NOT NULL,
        timestamp TEXT NOT NULL
    )
    "#,
    "CREATE INDEX IF NOT EXISTS idx_resource_folder ON resource(folder_id)",
    "CREATE INDEX IF NOT EXISTS idx_space_folder ON space(folder_id)",
    "CREATE INDEX IF NOT EXISTS idx_chat_message_space ON chat_message(space_id)",
];

/// Create all tables and indexes if they don't exist.
pub async fn init_schema(pool: &SqlitePool) -> Result<()> {
    for statement in CREATE_TABLES {
        sqlx::query(statement)
            .execute(pool)
            .await
            .map_err(Error::Database)?;
    }

    info!(
        subsystem = "db",
        component = "schema",
        op = "init",
        "Schema initialized"
    );
    Ok(())
}
