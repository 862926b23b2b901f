//! Prompt construction for the four generation tasks.
//!
//! Pure function family: `(task inputs) -> ordered role-tagged messages`.
//! Every builder is deterministic given identical inputs — no randomness, no
//! hidden state — so prompt content is pinned by tests and downstream
//! parsers can rely on the instructed output grammar.

use studium_core::defaults::NOT_IN_DOCUMENT;
use studium_core::{Error, PromptMessage, QuizOptions, Result};

/// Build the message sequence for a chat/ask request.
///
/// The system instruction constrains answers to the supplied context, with a
/// carve-out for conversational small talk and the exact fallback phrase
/// downstream UI code matches on. Context, when present, is injected
/// verbatim as a second system message.
pub fn ask_prompt(question: &str, context: Option<&str>) -> Vec<PromptMessage> {
    let mut messages = vec![PromptMessage::system(format!(
        "You are Studium, a study assistant. Answer ONLY using the provided context. \
         If the user asks a basic conversational question (e.g., hello, good morning, \
         who are you?, what do you do?, how are you?, thank you, bye), respond politely \
         and naturally like a human assistant would. \
         If the answer isn't in the context, say '{NOT_IN_DOCUMENT}'"
    ))];

    if let Some(context) = context {
        messages.push(PromptMessage::system(format!(
            "Relevant context from the user's documents:\n{context}"
        )));
    }

    messages.push(PromptMessage::user(question));
    messages
}

/// Build the message sequence for notes generation: a single user message
/// embedding the fixed formatting template.
pub fn notes_prompt(context: &str) -> Vec<PromptMessage> {
    vec![PromptMessage::user(format!(
        r#"You are a professional note-generator assistant. Based on the input provided, generate clean, well-structured, and easy-to-understand notes. Include key ideas, examples (if any), and simplify complex terms. Ignore filler words or off-topic information.

Your goal is to produce structured, complete, and readable notes that capture all key content, regardless of file type, subject, or format. Prefer completeness over brevity.

Format guidelines:
1. Use clean and understandable headings for each topic.
2. Use clean bullet points under each heading.
3. Use bold for important terms.
4. Use code blocks if there is code in the content.
5. Make sure to cover all the important content.

Content to generate notes from:
{context}"#
    ))]
}

/// The exact quiz output grammar embedded in the quiz prompt. One question
/// block per unit, blank line between blocks.
const QUIZ_GRAMMAR: &str = r#"Question Type: [True/False | Multiple Choice | Fill in the Blank | Short Answer]
Question: [The actual question]
Options (if Multiple Choice):
A. [Option A]
B. [Option B]
C. [Option C]
D. [Option D]
Answer: [Correct answer or sample answer]"#;

/// Build the message sequence for quiz generation.
///
/// Fails `Validation` when no question kind is selected — before any
/// provider call can happen.
pub fn quiz_prompt(context: &str, options: &QuizOptions) -> Result<Vec<PromptMessage>> {
    let labels = options.question_types.enabled_labels();
    if labels.is_empty() {
        return Err(Error::Validation(
            "at least one question type must be selected".into(),
        ));
    }

    let prompt = format!(
        r#"You are a quiz generator. Create a quiz based on the following content:

{context}

The quiz should include a mix of the following question types:
{kinds}

Format each question EXACTLY like this:

{grammar}

Important formatting rules:
1. Each question MUST start with "Question Type:" on its own line
2. The question MUST start with "Question:" on its own line
3. For multiple choice questions, list options with "A.", "B.", "C.", "D." on separate lines
4. Only multiple choice questions may have an options list
5. Each answer MUST start with "Answer:" on its own line
6. Leave a blank line between questions
7. Do not include any other text or formatting

Generate a total of {count} questions, mixing all the types equally."#,
        kinds = labels.join(", "),
        grammar = QUIZ_GRAMMAR,
        count = options.count(),
    );

    Ok(vec![
        PromptMessage::system(
            "You are an expert at creating educational quizzes that test understanding and knowledge.",
        ),
        PromptMessage::user(prompt),
    ])
}

/// The exact flashcard output grammar embedded in the flashcard prompt. One
/// card per unit, blank line between cards.
const FLASHCARD_GRAMMAR: &str = r#"Front: [Question or term]
Back: [Answer or definition]"#;

/// Build the message sequence for flashcard generation.
pub fn flashcard_prompt(context: &str, count: u32) -> Vec<PromptMessage> {
    let prompt = format!(
        r#"You are a flashcard generator. Create flashcards based on the following content:

{context}

Format each flashcard EXACTLY like this:

{grammar}

Important formatting rules:
1. Each flashcard MUST start with "Front:" on its own line
2. The back of the card MUST start with "Back:" on its own line
3. Leave a blank line between flashcards
4. Do not include any other text or formatting
5. Generate exactly {count} flashcards covering the most important concepts

Make sure the flashcards are clear, concise, focused on key concepts and definitions, and suitable for memorization."#,
        grammar = FLASHCARD_GRAMMAR,
    );

    vec![
        PromptMessage::system(
            "You are an expert at creating educational flashcards that help with memorization and understanding.",
        ),
        PromptMessage::user(prompt),
    ]
}
