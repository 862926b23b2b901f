//! # studium-db
//!
//! SQLite database layer for the studium backend.
//!
//! This crate provides:
//! - Connection pool management
//! - Repository implementations for folders, resources, spaces, and chat
//!   messages
//! - Transactional cascade deletes (folder → resources + spaces + messages)
//! - Idempotent schema initialization
//!
//! ## Example
//!
//! ```rust,ignore
//! use studium_db::Database;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let db = Database::connect("sqlite://studium.db").await?;
//!     studium_db::init_schema(&db.pool).await?;
//!
//!     let folder = db.folders.create("Biology 101", "user-1").await?;
//!     println!("Created folder: {}", folder.id);
//!     Ok(())
//! }
//! ```

pub mod folders;
pub mod messages;
pub mod pool;
pub mod resources;
pub mod schema;
pub mod spaces;

// Test fixtures: always compiled so integration tests (in tests/) can use
// the in-memory database helper.
pub mod test_fixtures;

// Re-export core types
pub use studium_core::*;

// Re-export repository implementations
pub use folders::SqliteFolderRepository;
pub use messages::SqliteMessageRepository;
pub use pool::{create_pool, create_pool_with_config, PoolConfig};
pub use resources::SqliteResourceRepository;
pub use schema::init_schema;
pub use spaces::SqliteSpaceRepository;

/// Combined database context with all repositories.
pub struct Database {
    /// The underlying connection pool.
    pub pool: sqlx::SqlitePool,
    /// Folder repository (hierarchy root, cascade deletes).
    pub folders: SqliteFolderRepository,
    /// Resource repository (extracted document content).
    pub resources: SqliteResourceRepository,
    /// Space repository (typed workspaces).
    pub spaces: SqliteSpaceRepository,
    /// Chat message repository (append-only transcripts).
    pub messages: SqliteMessageRepository,
}

impl Database {
    /// Create a new Database instance from a connection pool.
    pub fn new(pool: sqlx::SqlitePool) -> Self {
        Self {
            folders: SqliteFolderRepository::new(pool.clone()),
            resources: SqliteResourceRepository::new(pool.clone()),
            spaces: SqliteSpaceRepository::new(pool.clone()),
            messages: SqliteMessageRepository::new(pool.clone()),
            pool,
        }
    }

    /// Create a new Database instance by connecting to the given URL.
    pub async fn connect(url: &str) -> Result<Self> {
        let pool = create_pool(url).await?;
        Ok(Self::new(pool))
    }
}

impl Clone for Database {
    fn clone(&self) -> Self {
        Self::new(self.pool.clone())
    }
}
