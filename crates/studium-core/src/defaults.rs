//! Default values shared across studium crates.

/// Default number of quiz questions when the caller leaves the count unset
/// or non-positive.
pub const DEFAULT_NUM_QUESTIONS: u32 = 5;

/// Default number of flashcards when the caller leaves the count unset or
/// non-positive.
pub const DEFAULT_NUM_FLASHCARDS: u32 = 5;

/// Exact fallback phrase the chat assistant uses when the answer is absent
/// from the supplied context. Downstream UI code matches on this string.
pub const NOT_IN_DOCUMENT: &str = "Not in the document.";

/// Separator inserted between resource contents when concatenating quiz or
/// flashcard context.
pub const RESOURCE_SEPARATOR: &str = "\n\n";
