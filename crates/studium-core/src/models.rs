//! Core data models for studium.
//!
//! These types are shared across all studium crates and represent the
//! content hierarchy (folders, resources, spaces, chat messages) plus the
//! request/option types that cross the API boundary.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

use crate::error::Error;

// =============================================================================
// FOLDER TYPES
// =============================================================================

/// Top-level container owned by a user, holding spaces and resources.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Folder {
    pub id: Uuid,
    pub name: String,
    /// Owner is immutable after creation.
    pub owner: String,
    pub created_at_utc: DateTime<Utc>,
}

/// Folder with its direct spaces attached, as returned by folder listing.
///
/// Resources are never eagerly loaded here; fetch them per folder.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FolderWithSpaces {
    pub id: Uuid,
    pub name: String,
    pub owner: String,
    pub created_at_utc: DateTime<Utc>,
    pub spaces: Vec<Space>,
}

// =============================================================================
// RESOURCE TYPES
// =============================================================================

/// Extracted textual content of an uploaded document, scoped to a folder.
///
/// Content is always non-empty: a failed extraction surfaces as
/// [`Error::Extraction`](crate::Error::Extraction) before anything is stored.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Resource {
    pub id: Uuid,
    pub name: String,
    pub folder_id: Uuid,
    pub content: String,
    /// `sha256:<hex>` of the stored content.
    pub content_hash: String,
    pub created_at_utc: DateTime<Utc>,
}

/// Listing view of a resource without its content body.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResourceSummary {
    pub id: Uuid,
    pub name: String,
    pub content_len: i64,
}

// =============================================================================
// SPACE TYPES
// =============================================================================

/// The fixed set of workspace kinds. Kind is set at creation and never
/// mutated afterwards.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SpaceKind {
    Chat,
    Notes,
    Quiz,
    Flashcards,
    Solve,
}

impl SpaceKind {
    /// Returns the canonical string representation.
    pub fn as_str(&self) -> &'static str {
        match self {
            SpaceKind::Chat => "chat",
            SpaceKind::Notes => "notes",
            SpaceKind::Quiz => "quiz",
            SpaceKind::Flashcards => "flashcards",
            SpaceKind::Solve => "solve",
        }
    }
}

impl fmt::Display for SpaceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for SpaceKind {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "chat" => Ok(SpaceKind::Chat),
            "notes" => Ok(SpaceKind::Notes),
            "quiz" => Ok(SpaceKind::Quiz),
            "flashcards" => Ok(SpaceKind::Flashcards),
            "solve" => Ok(SpaceKind::Solve),
            other => Err(Error::Validation(format!("unknown space kind: {other}"))),
        }
    }
}

/// A typed workspace within a folder. `notes` is the only mutable field.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Space {
    pub id: Uuid,
    pub kind: SpaceKind,
    pub name: String,
    pub folder_id: Uuid,
    pub notes: Option<String>,
    pub created_at_utc: DateTime<Utc>,
}

/// Request for creating a new space.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateSpaceRequest {
    pub kind: SpaceKind,
    pub name: String,
    pub folder_id: Uuid,
    #[serde(default)]
    pub notes: Option<String>,
}

/// Partial update for a space.
///
/// Only `name` and `notes` are mutable; unknown keys in an incoming payload
/// are dropped at the serde boundary (whitelist, not reject).
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateSpaceRequest {
    pub name: Option<String>,
    pub notes: Option<String>,
}

impl UpdateSpaceRequest {
    /// True when the update carries no recognized field.
    pub fn is_empty(&self) -> bool {
        self.name.is_none() && self.notes.is_none()
    }
}

// =============================================================================
// CHAT MESSAGE TYPES
// =============================================================================

/// Author role of a chat message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MessageRole {
    User,
    Ai,
    System,
}

impl MessageRole {
    /// Returns the canonical string representation.
    pub fn as_str(&self) -> &'static str {
        match self {
            MessageRole::User => "user",
            MessageRole::Ai => "ai",
            MessageRole::System => "system",
        }
    }
}

impl fmt::Display for MessageRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for MessageRole {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "user" => Ok(MessageRole::User),
            "ai" => Ok(MessageRole::Ai),
            "system" => Ok(MessageRole::System),
            other => Err(Error::Validation(format!("unknown message role: {other}"))),
        }
    }
}

/// One turn of a conversation within a space. Append-only.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatMessage {
    pub id: Uuid,
    pub space_id: Uuid,
    pub role: MessageRole,
    pub content: String,
    pub timestamp: DateTime<Utc>,
}

// =============================================================================
// GENERATION OPTION TYPES
// =============================================================================

/// Question kinds a quiz may draw from. Field aliases accept the camelCase
/// keys the web client sends.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuestionTypes {
    #[serde(default, alias = "trueFalse")]
    pub true_false: bool,
    #[serde(default, alias = "multipleChoice")]
    pub multiple_choice: bool,
    #[serde(default, alias = "fillInBlank")]
    pub fill_in_blank: bool,
    #[serde(default, alias = "shortAnswer")]
    pub short_answer: bool,
}

impl QuestionTypes {
    /// True when at least one kind is selected.
    pub fn any(&self) -> bool {
        self.true_false || self.multiple_choice || self.fill_in_blank || self.short_answer
    }

    /// Prompt labels for the selected kinds, in grammar order.
    pub fn enabled_labels(&self) -> Vec<&'static str> {
        let mut labels = Vec::new();
        if self.true_false {
            labels.push("True or False");
        }
        if self.multiple_choice {
            labels.push("Multiple Choice");
        }
        if self.fill_in_blank {
            labels.push("Fill in the Blank");
        }
        if self.short_answer {
            labels.push("Short Answer");
        }
        labels
    }

    /// All four kinds enabled.
    pub fn all() -> Self {
        Self {
            true_false: true,
            multiple_choice: true,
            fill_in_blank: true,
            short_answer: true,
        }
    }
}

/// Options for quiz generation.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct QuizOptions {
    #[serde(default)]
    pub question_types: QuestionTypes,
    #[serde(default)]
    pub num_questions: Option<i64>,
}

impl QuizOptions {
    /// Effective question count: default when unset or non-positive.
    pub fn count(&self) -> u32 {
        match self.num_questions {
            Some(n) if n > 0 => n as u32,
            _ => crate::defaults::DEFAULT_NUM_QUESTIONS,
        }
    }
}

/// Options for flashcard generation.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct FlashcardOptions {
    #[serde(default)]
    pub num_flashcards: Option<i64>,
}

impl FlashcardOptions {
    /// Effective card count: default when unset or non-positive.
    pub fn count(&self) -> u32 {
        match self.num_flashcards {
            Some(n) if n > 0 => n as u32,
            _ => crate::defaults::DEFAULT_NUM_FLASHCARDS,
        }
    }
}

// =============================================================================
// PROMPT TYPES
// =============================================================================

/// Role tag of a prompt message sent to a completion provider.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PromptRole {
    System,
    User,
    Assistant,
}

impl PromptRole {
    pub fn as_str(&self) -> &'static str {
        match self {
            PromptRole::System => "system",
            PromptRole::User => "user",
            PromptRole::Assistant => "assistant",
        }
    }
}

/// One role-tagged message in a prompt sequence.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PromptMessage {
    pub role: PromptRole,
    pub content: String,
}

impl PromptMessage {
    pub fn system(content: impl Into<String>) -> Self {
        Self {
            role: PromptRole::System,
            content: content.into(),
        }
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: PromptRole::User,
            content: content.into(),
        }
    }
}

/// Generation parameters forwarded to the completion provider.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ModelParams {
    /// Model override; the backend default applies when unset.
    pub model: Option<String>,
    pub max_tokens: Option<u32>,
    pub temperature: Option<f32>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_space_kind_roundtrip() {
        for kind in [
            SpaceKind::Chat,
            SpaceKind::Notes,
            SpaceKind::Quiz,
            SpaceKind::Flashcards,
            SpaceKind::Solve,
        ] {
            assert_eq!(kind.as_str().parse::<SpaceKind>().unwrap(), kind);
        }
    }

    #[test]
    fn test_space_kind_rejects_unknown() {
        let err = "invalid-kind".parse::<SpaceKind>().unwrap_err();
        assert!(matches!(err, Error::Validation(_)));
    }

    #[test]
    fn test_message_role_rejects_unknown() {
        assert!("assistant".parse::<MessageRole>().is_err());
        assert!("ai".parse::<MessageRole>().is_ok());
    }

    #[test]
    fn test_question_types_camel_case_aliases() {
        let types: QuestionTypes =
            serde_json::from_str(r#"{"trueFalse": true, "shortAnswer": true}"#).unwrap();
        assert!(types.true_false);
        assert!(types.short_answer);
        assert!(!types.multiple_choice);
        assert_eq!(types.enabled_labels(), vec!["True or False", "Short Answer"]);
    }

    #[test]
    fn test_question_types_none_selected() {
        let types = QuestionTypes::default();
        assert!(!types.any());
        assert!(types.enabled_labels().is_empty());
    }

    #[test]
    fn test_quiz_options_count_defaults() {
        assert_eq!(QuizOptions::default().count(), 5);
        let opts = QuizOptions {
            num_questions: Some(0),
            ..Default::default()
        };
        assert_eq!(opts.count(), 5);
        let opts = QuizOptions {
            num_questions: Some(12),
            ..Default::default()
        };
        assert_eq!(opts.count(), 12);
    }

    #[test]
    fn test_flashcard_options_count_defaults() {
        assert_eq!(FlashcardOptions::default().count(), 5);
        assert_eq!(
            FlashcardOptions {
                num_flashcards: Some(-3)
            }
            .count(),
            5
        );
        assert_eq!(
            FlashcardOptions {
                num_flashcards: Some(8)
            }
            .count(),
            8
        );
    }

    #[test]
    fn test_update_space_request_ignores_unknown_keys() {
        let req: UpdateSpaceRequest =
            serde_json::from_str(r#"{"foo": "x", "kind": "quiz"}"#).unwrap();
        assert!(req.is_empty());
    }
}
