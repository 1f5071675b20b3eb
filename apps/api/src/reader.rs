//! Résumé text extraction from uploaded PDF bytes.

use std::panic::{catch_unwind, AssertUnwindSafe};

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ReadError {
    #[error("Failed to extract text from PDF: {0}")]
    Unreadable(String),

    #[error("Could not extract text from PDF file")]
    Empty,
}

/// Converts a résumé document into plain text. Synchronous and CPU-bound;
/// callers run it on the blocking pool.
pub trait ResumeReader: Send + Sync {
    fn read_text(&self, bytes: &[u8]) -> Result<String, ReadError>;
}

/// `pdf-extract` backed reader.
pub struct PdfTextReader;

impl ResumeReader for PdfTextReader {
    fn read_text(&self, bytes: &[u8]) -> Result<String, ReadError> {
        // The font parsers inside pdf-extract can panic on malformed input.
        let extracted = catch_unwind(AssertUnwindSafe(|| pdf_extract::extract_text_from_mem(bytes)))
            .map_err(|_| ReadError::Unreadable("PDF parser panicked".to_string()))?
            .map_err(|e| ReadError::Unreadable(e.to_string()))?;

        non_empty(extracted)
    }
}

fn non_empty(text: String) -> Result<String, ReadError> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return Err(ReadError::Empty);
    }
    Ok(trimmed.to_string())
}
