//! Service layer: orchestration and capabilities behind the handlers.

pub mod extraction;
pub mod generation;

pub use extraction::PlainTextExtractor;
pub use generation::GenerationService;
