//! Folder delete must cascade to resources, spaces, and those spaces'
//! messages in one transaction, leaving no orphans behind.

use studium_db::test_fixtures::test_database;
use studium_db::{
    CreateSpaceRequest, FolderRepository, MessageRepository, MessageRole, ResourceRepository,
    SpaceKind, SpaceRepository,
};
use uuid::Uuid;

async fn count(pool: &sqlx::SqlitePool, table: &str) -> i64 {
    sqlx::query_scalar(&format!("SELECT COUNT(*) FROM {table}"))
        .fetch_one(pool)
        .await
        .unwrap()
}

#[tokio::test]
async fn test_delete_folder_leaves_no_orphans() {
    let db = test_database().await;

    let folder = db.folders.create("Physics", "alice").await.unwrap();
    db.resources
        .create("mechanics.txt", folder.id, "Newtonian mechanics")
        .await
        .unwrap();
    db.resources
        .create("waves.txt", folder.id, "Standing waves")
        .await
        .unwrap();

    let space = db
        .spaces
        .create(CreateSpaceRequest {
            kind: SpaceKind::Chat,
            name: "Mechanics chat".into(),
            folder_id: folder.id,
            notes: None,
        })
        .await
        .unwrap();
    db.messages
        .append(space.id, MessageRole::User, "What is inertia?")
        .await
        .unwrap();
    db.messages
        .append(space.id, MessageRole::Ai, "Resistance to acceleration.")
        .await
        .unwrap();

    db.folders.delete(folder.id).await.unwrap();

    assert_eq!(count(&db.pool, "folder").await, 0);
    assert_eq!(count(&db.pool, "resource").await, 0);
    assert_eq!(count(&db.pool, "space").await, 0);
    assert_eq!(count(&db.pool, "chat_message").await, 0);
}

#[tokio::test]
async fn test_delete_folder_is_scoped() {
    let db = test_database().await;

    let doomed = db.folders.create("Doomed", "alice").await.unwrap();
    let kept = db.folders.create("Kept", "alice").await.unwrap();
    db.resources
        .create("kept.txt", kept.id, "still here")
        .await
        .unwrap();
    let kept_space = db
        .spaces
        .create(CreateSpaceRequest {
            kind: SpaceKind::Notes,
            name: "Kept notes".into(),
            folder_id: kept.id,
            notes: None,
        })
        .await
        .unwrap();
    db.messages
        .append(kept_space.id, MessageRole::System, "hello")
        .await
        .unwrap();

    db.folders.delete(doomed.id).await.unwrap();

    assert_eq!(count(&db.pool, "folder").await, 1);
    assert_eq!(count(&db.pool, "resource").await, 1);
    assert_eq!(count(&db.pool, "space").await, 1);
    assert_eq!(count(&db.pool, "chat_message").await, 1);
}

#[tokio::test]
async fn test_delete_nonexistent_folder_is_noop_success() {
    let db = test_database().await;
    db.folders.delete(Uuid::new_v4()).await.unwrap();
}

#[tokio::test]
async fn test_clear_all_removes_only_that_owner() {
    let db = test_database().await;

    let mine = db.folders.create("Mine", "alice").await.unwrap();
    db.folders.create("Mine too", "alice").await.unwrap();
    let theirs = db.folders.create("Theirs", "bob").await.unwrap();

    let space = db
        .spaces
        .create(CreateSpaceRequest {
            kind: SpaceKind::Quiz,
            name: "Quiz space".into(),
            folder_id: mine.id,
            notes: None,
        })
        .await
        .unwrap();
    db.messages
        .append(space.id, MessageRole::User, "q")
        .await
        .unwrap();
    db.resources
        .create("theirs.txt", theirs.id, "bob content")
        .await
        .unwrap();

    let removed = db.folders.clear_all("alice").await.unwrap();
    assert_eq!(removed, 2);

    assert_eq!(count(&db.pool, "folder").await, 1);
    assert_eq!(count(&db.pool, "space").await, 0);
    assert_eq!(count(&db.pool, "chat_message").await, 0);
    assert_eq!(count(&db.pool, "resource").await, 1);

    // Idempotent: nothing left for alice.
    assert_eq!(db.folders.clear_all("alice").await.unwrap(), 0);
}
