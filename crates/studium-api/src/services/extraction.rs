//! Text extraction service.
//!
//! Binary-format extraction (PDF, DOCX, ...) is an external capability; the
//! built-in extractor handles plain-text uploads only. Failure is always a
//! distinguishable `Extraction` error — an unreadable document never turns
//! into an empty stored resource.

use studium_core::{Error, Result, TextExtractor};

/// Extractor for plain-text (UTF-8) documents.
pub struct PlainTextExtractor;

impl TextExtractor for PlainTextExtractor {
    fn extract(&self, bytes: &[u8]) -> Result<String> {
        let text = std::str::from_utf8(bytes)
            .map_err(|_| Error::Extraction("document is not valid UTF-8 text".into()))?;

        if text.trim().is_empty() {
            return Err(Error::Extraction("no readable content".into()));
        }
        Ok(text.to_string())
    }
}
