//! Generation request orchestration.
//!
//! Composes Content Store reads, the prompt builders, the injected
//! completion provider, and the output parser into the four generation
//! operations. Each request moves through the stages
//! `context_resolved → prompt_built → awaiting_completion → parsed`,
//! surfaced as structured log fields.
//!
//! The store is only touched before the provider call, never during or
//! after it: these operations persist nothing, so an abandoned request
//! leaves no partial state. Provider failures and empty candidate lists
//! surface to the caller as-is — any retry policy belongs above this layer.

use std::sync::Arc;

use tracing::debug;
use uuid::Uuid;

use studium_core::defaults::RESOURCE_SEPARATOR;
use studium_core::{
    CompletionProvider, Error, FlashcardOptions, ModelParams, PromptMessage, QuizOptions,
    ResourceRepository, Result,
};
use studium_db::Database;
use studium_inference::parser::{
    normalize_whitespace, parse_flashcards, parse_quiz, render_flashcards, render_quiz,
};
use studium_inference::prompts;

/// Orchestrator for the four generation operations.
///
/// The completion provider is injected at construction; its lifecycle is
/// owned by the process entry point, which is what lets tests substitute
/// a double.
#[derive(Clone)]
pub struct GenerationService {
    db: Database,
    provider: Arc<dyn CompletionProvider>,
    params: ModelParams,
}

impl GenerationService {
    /// Create a new GenerationService over the given store and provider.
    pub fn new(db: Database, provider: Arc<dyn CompletionProvider>) -> Self {
        Self {
            db,
            provider,
            params: ModelParams::default(),
        }
    }

    /// Override the model parameters sent with every completion.
    pub fn with_params(mut self, params: ModelParams) -> Self {
        self.params = params;
        self
    }

    /// Run the provider and take the first candidate. Zero candidates is
    /// `EmptyCompletion`, reported to the caller and never retried here.
    async fn complete_one(&self, messages: &[PromptMessage]) -> Result<String> {
        let prompt_len: usize = messages.iter().map(|m| m.content.len()).sum();
        debug!(
            subsystem = "api",
            component = "generation",
            stage = "awaiting_completion",
            prompt_len,
            "Invoking completion provider"
        );

        let candidates = self.provider.complete(messages, &self.params).await?;
        debug!(
            subsystem = "api",
            component = "generation",
            stage = "parsed",
            candidate_count = candidates.len(),
            "Provider returned"
        );
        candidates.into_iter().next().ok_or(Error::EmptyCompletion)
    }

    /// Resolve resource ids to their concatenated contents, in the order
    /// given. Fails `NotFound` naming the first missing id.
    async fn resolve_context(&self, resource_ids: &[Uuid]) -> Result<String> {
        if resource_ids.is_empty() {
            return Err(Error::Validation("no resource ids provided".into()));
        }

        let mut contents = Vec::with_capacity(resource_ids.len());
        for id in resource_ids {
            let resource = self.db.resources.get(*id).await?;
            contents.push(resource.content);
        }

        debug!(
            subsystem = "api",
            component = "generation",
            stage = "context_resolved",
            result_count = contents.len(),
            "Resolved resource context"
        );
        Ok(contents.join(RESOURCE_SEPARATOR))
    }

    /// Answer a question, constrained to the optional context. Persists
    /// nothing — transcript writes are a separate store call by the caller.
    pub async fn ask(&self, question: &str, context: Option<&str>) -> Result<String> {
        let messages = prompts::ask_prompt(question, context);
        let answer = self.complete_one(&messages).await?;
        Ok(normalize_whitespace(&answer))
    }

    /// Generate study notes from free-text context.
    pub async fn generate_notes(&self, context: &str) -> Result<String> {
        if context.trim().is_empty() {
            return Err(Error::Validation(
                "no content provided for generating notes".into(),
            ));
        }

        let messages = prompts::notes_prompt(context);
        let notes = self.complete_one(&messages).await?;
        Ok(normalize_whitespace(&notes))
    }

    /// Generate a quiz from the given resources. Returns the validated
    /// output re-rendered in the canonical quiz grammar.
    pub async fn generate_quiz(
        &self,
        resource_ids: &[Uuid],
        options: &QuizOptions,
    ) -> Result<String> {
        // Reject an empty kind selection before touching the store or the
        // provider.
        if !options.question_types.any() {
            return Err(Error::Validation(
                "at least one question type must be selected".into(),
            ));
        }

        let context = self.resolve_context(resource_ids).await?;
        let messages = prompts::quiz_prompt(&context, options)?;
        debug!(
            subsystem = "api",
            component = "generation",
            stage = "prompt_built",
            op = "generate_quiz",
            "Built quiz prompt"
        );

        let raw = self.complete_one(&messages).await?;
        let questions = parse_quiz(&raw)?;
        debug!(
            subsystem = "api",
            component = "generation",
            op = "generate_quiz",
            unit_count = questions.len(),
            "Quiz validated"
        );
        Ok(render_quiz(&questions))
    }

    /// Generate flashcards from the given resources. Returns the validated
    /// output re-rendered in the canonical flashcard grammar.
    pub async fn generate_flashcards(
        &self,
        resource_ids: &[Uuid],
        options: &FlashcardOptions,
    ) -> Result<String> {
        let context = self.resolve_context(resource_ids).await?;
        let messages = prompts::flashcard_prompt(&context, options.count());
        debug!(
            subsystem = "api",
            component = "generation",
            stage = "prompt_built",
            op = "generate_flashcards",
            "Built flashcard prompt"
        );

        let raw = self.complete_one(&messages).await?;
        let cards = parse_flashcards(&raw)?;
        debug!(
            subsystem = "api",
            component = "generation",
            op = "generate_flashcards",
            unit_count = cards.len(),
            "Flashcards validated"
        );
        Ok(render_flashcards(&cards))
    }
}
