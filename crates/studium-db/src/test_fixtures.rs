//! Test fixtures for integration tests.
//!
//! Always compiled so integration tests (in tests/) can share the in-memory
//! database helper.

use crate::{schema::init_schema, Database};
use sqlx::sqlite::SqlitePoolOptions;

/// Create a fully-initialized Database over a private in-memory SQLite
/// instance.
///
/// The pool is capped at one connection: each SQLite `:memory:` connection
/// gets its own database, so a larger pool would scatter tables across
/// disconnected instances.
pub async fn test_database() -> Database {
    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .connect("sqlite::memory:")
        .await
        .expect("in-memory SQLite pool");

    init_schema(&pool).await.expect("schema init");
    Database::new(pool)
}
