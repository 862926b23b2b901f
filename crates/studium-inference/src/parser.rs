//! Generation response parsing and validation.
//!
//! Model output for quiz and flashcard tasks must satisfy the line-oriented
//! grammars embedded in the prompts. Parsing is **lenient**: a malformed
//! block (missing a required marker, an options list on a non-multiple-choice
//! question, ...) is dropped with a warning, and only a response with zero
//! valid blocks fails `GenerationFormat`. The policy is uniform across both
//! grammars and pinned by tests.
//!
//! All free-text generation output (notes included) additionally passes
//! through [`normalize_whitespace`].

use once_cell::sync::Lazy;
use regex::Regex;
use tracing::warn;

use studium_core::{Error, Result};

// =============================================================================
// WHITESPACE NORMALIZATION
// =============================================================================

// A newline followed by two or more (possibly whitespace-padded) blank
// lines. The trailing newline stays outside the match so indentation of the
// following line survives.
static BLANK_RUNS: Lazy<Regex> = Lazy::new(|| Regex::new(r"\n(?:[ \t]*\n){2,}").unwrap());

/// Collapse runs of blank lines to exactly one blank line and trim leading
/// and trailing whitespace. Idempotent: normalizing already-normalized text
/// is a no-op.
pub fn normalize_whitespace(text: &str) -> String {
    let unix = text.replace("\r\n", "\n");
    BLANK_RUNS.replace_all(&unix, "\n\n").trim().to_string()
}

// =============================================================================
// QUIZ GRAMMAR
// =============================================================================

/// The four quiz question kinds, named as the output grammar names them.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QuestionKind {
    TrueFalse,
    MultipleChoice,
    FillInBlank,
    ShortAnswer,
}

impl QuestionKind {
    /// Grammar spelling of the kind.
    pub fn as_str(&self) -> &'static str {
        match self {
            QuestionKind::TrueFalse => "True/False",
            QuestionKind::MultipleChoice => "Multiple Choice",
            QuestionKind::FillInBlank => "Fill in the Blank",
            QuestionKind::ShortAnswer => "Short Answer",
        }
    }

    /// Parse the text following a `Question Type:` marker.
    fn parse(label: &str) -> Option<Self> {
        let lower = label.to_lowercase();
        if lower.contains("true") {
            Some(QuestionKind::TrueFalse)
        } else if lower.contains("multiple") {
            Some(QuestionKind::MultipleChoice)
        } else if lower.contains("fill") {
            Some(QuestionKind::FillInBlank)
        } else if lower.contains("short") {
            Some(QuestionKind::ShortAnswer)
        } else {
            None
        }
    }
}

/// One validated quiz question.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuizQuestion {
    pub kind: QuestionKind,
    pub question: String,
    /// Non-empty only for multiple choice.
    pub options: Vec<String>,
    pub answer: String,
}

/// One validated flashcard.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Flashcard {
    pub front: String,
    pub back: String,
}

const QUESTION_TYPE_MARKER: &str = "question type:";
const QUESTION_MARKER: &str = "question:";
const ANSWER_MARKER: &str = "answer:";
const FRONT_MARKER: &str = "front:";
const BACK_MARKER: &str = "back:";

/// Split model output into units, each starting at a line that begins with
/// `marker` (case-insensitive). Content before the first marker is dropped.
fn split_units<'a>(text: &'a str, marker: &str) -> Vec<Vec<&'a str>> {
    let mut units: Vec<Vec<&'a str>> = Vec::new();
    for line in text.lines() {
        if line.trim().to_lowercase().starts_with(marker) {
            units.push(vec![line]);
        } else if let Some(current) = units.last_mut() {
            current.push(line);
        } else if !line.trim().is_empty() {
            warn!(
                subsystem = "inference",
                component = "parser",
                "Dropping preamble line before first '{marker}' marker"
            );
        }
    }
    units
}

/// Text after a case-insensitive marker prefix. The caller has already
/// checked the prefix matches; markers are ASCII so byte slicing is safe.
fn after_marker<'a>(line: &'a str, marker: &str) -> &'a str {
    line[marker.len()..].trim()
}

#[derive(PartialEq)]
enum Continuation {
    None,
    Question,
    Answer,
    Front,
    Back,
}

/// Append a wrapped continuation line to a field, space-joined.
fn push_continuation(field: &mut String, line: &str) {
    if !field.is_empty() {
        field.push(' ');
    }
    field.push_str(line);
}

fn is_option_line(line: &str) -> bool {
    let mut chars = line.chars();
    matches!(
        (chars.next(), chars.next()),
        (Some('A'..='D'), Some('.' | ')'))
    )
}

fn parse_quiz_unit(lines: &[&str]) -> Option<QuizQuestion> {
    let mut kind = None;
    let mut question = String::new();
    let mut options = Vec::new();
    let mut answer: Option<String> = None;
    let mut current = Continuation::None;

    for line in lines {
        let trimmed = line.trim();
        let lower = trimmed.to_lowercase();

        if lower.starts_with(QUESTION_TYPE_MARKER) {
            kind = QuestionKind::parse(after_marker(trimmed, QUESTION_TYPE_MARKER));
            kind?;
            current = Continuation::None;
        } else if lower.starts_with(QUESTION_MARKER) {
            question = after_marker(trimmed, QUESTION_MARKER).to_string();
            current = Continuation::Question;
        } else if lower.starts_with("options") && lower.ends_with(':') {
            // Grammar header line, carries no content.
            current = Continuation::None;
        } else if is_option_line(trimmed) {
            options.push(trimmed[2..].trim().to_string());
            current = Continuation::None;
        } else if lower.starts_with(ANSWER_MARKER) {
            answer = Some(after_marker(trimmed, ANSWER_MARKER).to_string());
            current = Continuation::Answer;
        } else if trimmed.is_empty() {
            current = Continuation::None;
        } else {
            // Wrapped continuation of the previous field; anything else
            // makes the block malformed.
            match current {
                Continuation::Question => push_continuation(&mut question, trimmed),
                Continuation::Answer => push_continuation(answer.as_mut()?, trimmed),
                _ => return None,
            }
        }
    }

    let kind = kind?;
    let answer = answer?;
    if question.is_empty() || answer.is_empty() {
        return None;
    }
    match kind {
        QuestionKind::MultipleChoice if options.len() < 2 => return None,
        QuestionKind::MultipleChoice => {}
        // An options list on a non-multiple-choice question violates the
        // grammar.
        _ if !options.is_empty() => return None,
        _ => {}
    }

    Some(QuizQuestion {
        kind,
        question,
        options,
        answer,
    })
}

/// Parse quiz output, dropping malformed blocks. Fails `GenerationFormat`
/// when no valid question block remains.
pub fn parse_quiz(text: &str) -> Result<Vec<QuizQuestion>> {
    let normalized = normalize_whitespace(text);
    let units = split_units(&normalized, QUESTION_TYPE_MARKER);
    let total = units.len();

    let questions: Vec<QuizQuestion> = units
        .iter()
        .filter_map(|unit| {
            let parsed = parse_quiz_unit(unit);
            if parsed.is_none() {
                warn!(
                    subsystem = "inference",
                    component = "parser",
                    op = "parse_quiz",
                    "Dropping malformed question block"
                );
            }
            parsed
        })
        .collect();

    if questions.is_empty() {
        return Err(Error::GenerationFormat(format!(
            "no valid question blocks in model output ({total} candidate blocks)"
        )));
    }
    Ok(questions)
}

fn parse_flashcard_unit(lines: &[&str]) -> Option<Flashcard> {
    let mut front = String::new();
    let mut back: Option<String> = None;
    let mut current = Continuation::None;

    for line in lines {
        let trimmed = line.trim();
        let lower = trimmed.to_lowercase();

        if lower.starts_with(FRONT_MARKER) {
            front = after_marker(trimmed, FRONT_MARKER).to_string();
            current = Continuation::Front;
        } else if lower.starts_with(BACK_MARKER) {
            back = Some(after_marker(trimmed, BACK_MARKER).to_string());
            current = Continuation::Back;
        } else if trimmed.is_empty() {
            current = Continuation::None;
        } else {
            match current {
                Continuation::Front => push_continuation(&mut front, trimmed),
                Continuation::Back => push_continuation(back.as_mut()?, trimmed),
                _ => return None,
            }
        }
    }

    let back = back?;
    if front.is_empty() || back.is_empty() {
        return None;
    }
    Some(Flashcard { front, back })
}

/// Parse flashcard output, dropping malformed blocks. Fails
/// `GenerationFormat` when no valid card remains.
pub fn parse_flashcards(text: &str) -> Result<Vec<Flashcard>> {
    let normalized = normalize_whitespace(text);
    let units = split_units(&normalized, FRONT_MARKER);
    let total = units.len();

    let cards: Vec<Flashcard> = units
        .iter()
        .filter_map(|unit| {
            let parsed = parse_flashcard_unit(unit);
            if parsed.is_none() {
                warn!(
                    subsystem = "inference",
                    component = "parser",
                    op = "parse_flashcards",
                    "Dropping malformed flashcard block"
                );
            }
            parsed
        })
        .collect();

    if cards.is_empty() {
        return Err(Error::GenerationFormat(format!(
            "no valid flashcard blocks in model output ({total} candidate blocks)"
        )));
    }
    Ok(cards)
}

// =============================================================================
// CANONICAL RENDERING
// =============================================================================

/// Re-emit validated questions in the exact output grammar.
pub fn render_quiz(questions: &[QuizQuestion]) -> String {
    questions
        .iter()
        .map(|q| {
            let mut block = format!("Question Type: {}\nQuestion: {}", q.kind.as_str(), q.question);
            if q.kind == QuestionKind::MultipleChoice {
                block.push_str("\nOptions (if Multiple Choice):");
                for (i, option) in q.options.iter().enumerate() {
                    block.push_str(&format!("\n{}. {}", (b'A' + i as u8) as char, option));
                }
            }
            block.push_str(&format!("\nAnswer: {}", q.answer));
            block
        })
        .collect::<Vec<_>>()
        .join("\n\n")
}

/// Re-emit validated flashcards in the exact output grammar.
pub fn render_flashcards(cards: &[Flashcard]) -> String {
    cards
        .iter()
        .map(|c| format!("Front: {}\nBack: {}", c.front, c.back))
        .collect::<Vec<_>>()
        .join("\n\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    // ─── Normalization ─────────────────────────────────────────────────────

    #[test]
    fn test_normalize_collapses_blank_runs_to_one_blank_line() {
        let text = "First paragraph.\n\n\n\n\nSecond paragraph.";
        assert_eq!(
            normalize_whitespace(text),
            "First paragraph.\n\nSecond paragraph."
        );
    }

    #[test]
    fn test_normalize_is_idempotent() {
        let text = "  a\n\n\n\nb\n\n\nc   ";
        let once = normalize_whitespace(text);
        assert_eq!(normalize_whitespace(&once), once);
        assert_eq!(once, "a\n\nb\n\nc");
    }

    #[test]
    fn test_normalize_keeps_single_blank_lines() {
        let text = "a\n\nb";
        assert_eq!(normalize_whitespace(text), "a\n\nb");
    }

    #[test]
    fn test_normalize_collapses_whitespace_padded_blank_lines() {
        let text = "a\n  \n\t\n   \nb";
        assert_eq!(normalize_whitespace(text), "a\n\nb");
    }

    #[test]
    fn test_normalize_preserves_indentation_after_collapse() {
        let text = "code:\n\n\n\n    indented line";
        assert_eq!(normalize_whitespace(text), "code:\n\n    indented line");
    }

    #[test]
    fn test_normalize_handles_crlf() {
        let text = "a\r\n\r\n\r\n\r\nb";
        assert_eq!(normalize_whitespace(text), "a\n\nb");
    }

    // ─── Flashcards ────────────────────────────────────────────────────────

    #[test]
    fn test_parse_two_flashcards() {
        let cards = parse_flashcards("Front: A\nBack: B\n\nFront: C\nBack: D").unwrap();
        assert_eq!(
            cards,
            vec![
                Flashcard {
                    front: "A".into(),
                    back: "B".into()
                },
                Flashcard {
                    front: "C".into(),
                    back: "D".into()
                },
            ]
        );
    }

    #[test]
    fn test_parse_flashcards_drops_malformed_block() {
        let text = "Front: A\nBack: B\n\nFront: missing back\n\nFront: C\nBack: D";
        let cards = parse_flashcards(text).unwrap();
        assert_eq!(cards.len(), 2);
        assert_eq!(cards[0].front, "A");
        assert_eq!(cards[1].front, "C");
    }

    #[test]
    fn test_parse_flashcards_all_malformed_fails() {
        let err = parse_flashcards("Here are your flashcards!\n\nEnjoy!").unwrap_err();
        assert!(matches!(err, Error::GenerationFormat(_)));
    }

    #[test]
    fn test_parse_flashcards_joins_wrapped_back_text() {
        let cards = parse_flashcards("Front: Term\nBack: a definition\nthat wraps").unwrap();
        assert_eq!(cards[0].back, "a definition that wraps");
    }

    #[test]
    fn test_parse_flashcards_ignores_preamble() {
        let cards =
            parse_flashcards("Sure! Here are the cards:\n\nFront: A\nBack: B").unwrap();
        assert_eq!(cards.len(), 1);
    }

    // ─── Quiz ──────────────────────────────────────────────────────────────

    const WELL_FORMED_QUIZ: &str = "\
Question Type: True/False
Question: The mitochondria is the powerhouse of the cell.
Answer: True

Question Type: Multiple Choice
Question: Which organelle synthesizes proteins?
Options (if Multiple Choice):
A. Ribosome
B. Golgi apparatus
C. Lysosome
D. Vacuole
Answer: A. Ribosome

Question Type: Fill in the Blank
Question: Water moves across a membrane by _____.
Answer: osmosis

Question Type: Short Answer
Question: Why do cells divide?
Answer: To grow and repair tissue.";

    #[test]
    fn test_parse_quiz_all_four_kinds() {
        let questions = parse_quiz(WELL_FORMED_QUIZ).unwrap();
        assert_eq!(questions.len(), 4);
        assert_eq!(questions[0].kind, QuestionKind::TrueFalse);
        assert_eq!(questions[1].kind, QuestionKind::MultipleChoice);
        assert_eq!(questions[1].options.len(), 4);
        assert_eq!(questions[1].options[0], "Ribosome");
        assert_eq!(questions[2].kind, QuestionKind::FillInBlank);
        assert_eq!(questions[3].kind, QuestionKind::ShortAnswer);
        assert_eq!(questions[3].answer, "To grow and repair tissue.");
    }

    #[test]
    fn test_parse_quiz_drops_options_on_non_multiple_choice() {
        let text = "\
Question Type: True/False
Question: Valid question?
Answer: True

Question Type: Short Answer
Question: Invalid block
A. stray option
B. another
Answer: nope";
        let questions = parse_quiz(text).unwrap();
        assert_eq!(questions.len(), 1);
        assert_eq!(questions[0].kind, QuestionKind::TrueFalse);
    }

    #[test]
    fn test_parse_quiz_drops_multiple_choice_with_one_option() {
        let text = "\
Question Type: Multiple Choice
Question: Under-optioned?
A. only one
Answer: A

Question Type: True/False
Question: Kept?
Answer: True";
        let questions = parse_quiz(text).unwrap();
        assert_eq!(questions.len(), 1);
        assert_eq!(questions[0].question, "Kept?");
    }

    #[test]
    fn test_parse_quiz_drops_block_missing_answer() {
        let text = "\
Question Type: Short Answer
Question: No answer here

Question Type: Short Answer
Question: Complete
Answer: yes";
        let questions = parse_quiz(text).unwrap();
        assert_eq!(questions.len(), 1);
    }

    #[test]
    fn test_parse_quiz_all_malformed_fails() {
        let err = parse_quiz("I could not generate a quiz, sorry.").unwrap_err();
        assert!(matches!(err, Error::GenerationFormat(_)));
    }

    #[test]
    fn test_parse_quiz_handles_missing_blank_lines_between_blocks() {
        let text = "\
Question Type: True/False
Question: First?
Answer: True
Question Type: True/False
Question: Second?
Answer: False";
        let questions = parse_quiz(text).unwrap();
        assert_eq!(questions.len(), 2);
    }

    // ─── Rendering ─────────────────────────────────────────────────────────

    #[test]
    fn test_render_flashcards_canonical() {
        let cards = vec![
            Flashcard {
                front: "A".into(),
                back: "B".into(),
            },
            Flashcard {
                front: "C".into(),
                back: "D".into(),
            },
        ];
        assert_eq!(
            render_flashcards(&cards),
            "Front: A\nBack: B\n\nFront: C\nBack: D"
        );
    }

    #[test]
    fn test_render_parse_roundtrip() {
        let questions = parse_quiz(WELL_FORMED_QUIZ).unwrap();
        let rendered = render_quiz(&questions);
        assert_eq!(parse_quiz(&rendered).unwrap(), questions);

        let cards = parse_flashcards("Front: A\nBack: B\n\nFront: C\nBack: D").unwrap();
        let rendered = render_flashcards(&cards);
        assert_eq!(parse_flashcards(&rendered).unwrap(), cards);
    }
}
