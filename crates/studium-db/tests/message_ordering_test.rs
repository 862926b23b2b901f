//! Message append/list ordering contract: ascending by timestamp, ties
//! broken by insertion order.

use studium_db::test_fixtures::test_database;
use studium_db::{
    CreateSpaceRequest, Error, FolderRepository, MessageRepository, MessageRole, SpaceKind,
    SpaceRepository,
};
use uuid::Uuid;

async fn chat_space(db: &studium_db::Database) -> studium_db::Space {
    let folder = db.folders.create("Talk", "alice").await.unwrap();
    db.spaces
        .create(CreateSpaceRequest {
            kind: SpaceKind::Chat,
            name: "General".into(),
            folder_id: folder.id,
            notes: None,
        })
        .await
        .unwrap()
}

#[tokio::test]
async fn test_append_then_list_preserves_order() {
    let db = test_database().await;
    let space = chat_space(&db).await;

    let n = 20;
    for i in 0..n {
        let role = if i % 2 == 0 {
            MessageRole::User
        } else {
            MessageRole::Ai
        };
        db.messages
            .append(space.id, role, &format!("message {i}"))
            .await
            .unwrap();
    }

    let listed = db.messages.list(space.id).await.unwrap();
    assert_eq!(listed.len(), n);
    for (i, message) in listed.iter().enumerate() {
        assert_eq!(message.content, format!("message {i}"));
        assert_eq!(message.space_id, space.id);
    }
    for pair in listed.windows(2) {
        assert!(pair[0].timestamp <= pair[1].timestamp);
    }
}

#[tokio::test]
async fn test_append_to_unknown_space_fails_not_found() {
    let db = test_database().await;

    let err = db
        .messages
        .append(Uuid::new_v4(), MessageRole::User, "lost")
        .await
        .unwrap_err();
    assert!(matches!(err, Error::NotFound(_)));
}

#[tokio::test]
async fn test_clear_is_idempotent_and_scoped() {
    let db = test_database().await;
    let space = chat_space(&db).await;
    let other = chat_space(&db).await;

    db.messages
        .append(space.id, MessageRole::User, "one")
        .await
        .unwrap();
    db.messages
        .append(space.id, MessageRole::Ai, "two")
        .await
        .unwrap();
    db.messages
        .append(other.id, MessageRole::User, "elsewhere")
        .await
        .unwrap();

    assert_eq!(db.messages.clear(space.id).await.unwrap(), 2);
    assert!(db.messages.list(space.id).await.unwrap().is_empty());

    // The other space is untouched; clearing again removes nothing.
    assert_eq!(db.messages.list(other.id).await.unwrap().len(), 1);
    assert_eq!(db.messages.clear(space.id).await.unwrap(), 0);
}

#[tokio::test]
async fn test_clear_does_not_touch_the_space_row() {
    let db = test_database().await;
    let space = chat_space(&db).await;

    db.messages
        .append(space.id, MessageRole::User, "ephemeral")
        .await
        .unwrap();
    db.messages.clear(space.id).await.unwrap();

    let still_there = db.spaces.get(space.id).await.unwrap();
    assert_eq!(still_there.id, space.id);
}
