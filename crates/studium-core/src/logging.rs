//! Structured logging field name constants for studium.
//!
//! All crates use these constants for consistent structured logging fields,
//! so log aggregation tools can query by standardized field names across
//! every subsystem.
//!
//! ## Log Level Contract
//!
//! | Level | Usage |
//! |-------|-------|
//! | ERROR | Degraded service, requires operator attention |
//! | WARN  | Recoverable issue (dropped malformed block, rejected token) |
//! | INFO  | Lifecycle events (startup, shutdown), operation completions |
//! | DEBUG | Decision points, intermediate values, pipeline stages |
//! | TRACE | Per-item iteration, high-volume data |

// ─── Identity fields ───────────────────────────────────────────────────────

/// Correlation ID propagated across a request. Format: UUIDv7 (time-ordered).
pub const REQUEST_ID: &str = "request_id";

/// Subsystem originating the log event.
/// Values: "api", "db", "inference"
pub const SUBSYSTEM: &str = "subsystem";

/// Component within a subsystem.
/// Examples: "folders", "generation", "openai", "pool"
pub const COMPONENT: &str = "component";

/// Logical operation name.
/// Examples: "create", "delete_cascade", "generate_quiz", "complete"
pub const OPERATION: &str = "op";

// ─── Entity fields ─────────────────────────────────────────────────────────

/// Folder UUID being operated on.
pub const FOLDER_ID: &str = "folder_id";

/// Resource UUID being operated on.
pub const RESOURCE_ID: &str = "resource_id";

/// Space UUID being operated on.
pub const SPACE_ID: &str = "space_id";

/// Opaque owner/user identifier.
pub const OWNER: &str = "owner";

// ─── Generation pipeline fields ────────────────────────────────────────────

/// Orchestrator pipeline stage.
/// Values: "context_resolved", "prompt_built", "awaiting_completion", "parsed"
pub const STAGE: &str = "stage";

/// Byte length of the rendered prompt.
pub const PROMPT_LEN: &str = "prompt_len";

/// Byte length of a model response.
pub const RESPONSE_LEN: &str = "response_len";

/// Number of candidate completions returned by the provider.
pub const CANDIDATE_COUNT: &str = "candidate_count";

/// Number of parsed units (questions, cards) surviving validation.
pub const UNIT_COUNT: &str = "unit_count";

// ─── Measurement fields ────────────────────────────────────────────────────

/// Wall-clock duration in milliseconds.
pub const DURATION_MS: &str = "duration_ms";

/// Number of rows affected or results returned.
pub const RESULT_COUNT: &str = "result_count";
