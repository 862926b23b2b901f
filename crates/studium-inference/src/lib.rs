//! # studium-inference
//!
//! Completion provider abstraction for the studium backend.
//!
//! This crate provides:
//! - An OpenAI-compatible [`CompletionProvider`] backend (works with OpenAI,
//!   OpenRouter, Groq, Ollama in compatibility mode, vLLM, ...)
//! - Deterministic prompt builders for the four generation tasks
//!   (chat/ask, notes, quiz, flashcards)
//! - The output-grammar parser/validator and whitespace normalizer
//! - A mock provider for tests
//!
//! # Example
//!
//! ```rust,no_run
//! use studium_core::{CompletionProvider, ModelParams};
//! use studium_inference::{prompts, OpenAiBackend};
//!
//! #[tokio::main]
//! async fn main() {
//!     let backend = OpenAiBackend::from_env().unwrap();
//!     let messages = prompts::ask_prompt("What is osmosis?", None);
//!     let candidates = backend
//!         .complete(&messages, &ModelParams::default())
//!         .await
//!         .unwrap();
//!     println!("{}", candidates[0]);
//! }
//! ```

pub mod mock;
pub mod parser;
pub mod prompts;
pub mod provider;

// Re-export core types
pub use studium_core::*;

pub use mock::MockProvider;
pub use parser::{
    normalize_whitespace, parse_flashcards, parse_quiz, render_flashcards, render_quiz,
    Flashcard, QuestionKind, QuizQuestion,
};
pub use prompts::{ask_prompt, flashcard_prompt, notes_prompt, quiz_prompt};
pub use provider::{OpenAiBackend, OpenAiConfig};
