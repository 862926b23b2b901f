//! Core traits for studium abstractions.
//!
//! These traits define the interfaces that concrete implementations must
//! satisfy, enabling pluggable backends and testability. The repository
//! traits own all persisted state; no other component retains copies across
//! calls.

use async_trait::async_trait;
use uuid::Uuid;

use crate::error::Result;
use crate::models::*;

// =============================================================================
// CONTENT STORE TRAITS
// =============================================================================

/// Repository for folder operations.
#[async_trait]
pub trait FolderRepository: Send + Sync {
    /// Create a folder. Fails `Validation` when the name is empty or blank.
    async fn create(&self, name: &str, owner: &str) -> Result<Folder>;

    /// List an owner's folders with their direct spaces attached.
    async fn list(&self, owner: &str) -> Result<Vec<FolderWithSpaces>>;

    /// Delete a folder, cascading to its resources, spaces, and those
    /// spaces' messages in a single transaction. No-op when absent.
    async fn delete(&self, id: Uuid) -> Result<()>;

    /// Check whether a folder exists.
    async fn exists(&self, id: Uuid) -> Result<bool>;

    /// Delete every folder of an owner with the full cascade, in one
    /// transaction. Returns the number of folders removed.
    async fn clear_all(&self, owner: &str) -> Result<u64>;
}

/// Repository for resource (extracted document content) operations.
#[async_trait]
pub trait ResourceRepository: Send + Sync {
    /// Store extracted content. Fails `NotFound` on an unknown folder and
    /// `Validation` on empty content.
    async fn create(&self, name: &str, folder_id: Uuid, content: &str) -> Result<Resource>;

    /// Fetch a resource by id. Fails `NotFound` when absent.
    async fn get(&self, id: Uuid) -> Result<Resource>;

    /// List a folder's resources without content bodies.
    async fn list_for_folder(&self, folder_id: Uuid) -> Result<Vec<ResourceSummary>>;

    /// Delete a resource. No-op when absent.
    async fn delete(&self, id: Uuid) -> Result<()>;
}

/// Repository for space operations.
#[async_trait]
pub trait SpaceRepository: Send + Sync {
    /// Create a space with a fixed kind. Fails `NotFound` on an unknown folder.
    async fn create(&self, req: CreateSpaceRequest) -> Result<Space>;

    /// Fetch a space by id. Fails `NotFound` when absent.
    async fn get(&self, id: Uuid) -> Result<Space>;

    /// Apply a whitelisted partial update (name, notes) and return the
    /// updated space. Fails `NotFound` when absent.
    async fn update(&self, id: Uuid, req: UpdateSpaceRequest) -> Result<Space>;

    /// Delete a space and its messages. No-op when absent.
    async fn delete(&self, id: Uuid) -> Result<()>;
}

/// Repository for chat message operations.
#[async_trait]
pub trait MessageRepository: Send + Sync {
    /// Append a message, assigning its timestamp at insertion. Fails
    /// `NotFound` on an unknown space.
    async fn append(&self, space_id: Uuid, role: MessageRole, content: &str)
        -> Result<ChatMessage>;

    /// List a space's messages ascending by timestamp, ties broken by
    /// insertion order.
    async fn list(&self, space_id: Uuid) -> Result<Vec<ChatMessage>>;

    /// Delete all messages of a space. Returns the number removed.
    async fn clear(&self, space_id: Uuid) -> Result<u64>;
}

// =============================================================================
// EXTERNAL CAPABILITY TRAITS
// =============================================================================

/// External language-model text-completion capability.
///
/// Injected into the orchestrator at construction; lifecycle is owned by the
/// process entry point. Implementations must not retry internally — an empty
/// candidate list or a transport failure surfaces to the caller as-is.
#[async_trait]
pub trait CompletionProvider: Send + Sync {
    /// Run a completion over a role-tagged message sequence, returning all
    /// candidate completions.
    async fn complete(
        &self,
        messages: &[PromptMessage],
        params: &ModelParams,
    ) -> Result<Vec<String>>;

    /// The default model this provider targets.
    fn model_name(&self) -> &str;
}

/// External text-extraction capability: document bytes to plain text.
///
/// Failure is `Error::Extraction` — a distinguishable sentinel, never an
/// empty success.
pub trait TextExtractor: Send + Sync {
    fn extract(&self, bytes: &[u8]) -> Result<String>;
}

/// External identity verification: bearer token to opaque user id.
///
/// Rejection is `Error::Unauthorized`.
#[async_trait]
pub trait IdentityVerifier: Send + Sync {
    async fn verify(&self, token: &str) -> Result<String>;
}
