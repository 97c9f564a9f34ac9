//! Document text extraction

use esgscope_core::{Error, Result};
use std::path::Path;
use tracing::debug;

/// Turns uploaded document bytes into plain text
pub trait TextSource: Send + Sync {
    /// Extract trimmed text; an empty string means the document had none
    fn extract_text(&self, bytes: &[u8]) -> Result<String>;

    fn name(&self) -> &str;
}

/// Text extraction from PDF documents
#[derive(Debug, Clone, Copy, Default)]
pub struct PdfTextSource;

impl TextSource for PdfTextSource {
    fn extract_text(&self, bytes: &[u8]) -> Result<String> {
        let text = pdf_extract::extract_text_from_mem(bytes)
            .map_err(|e| Error::extraction(format!("Failed to extract PDF text: {}", e)))?;
        debug!(bytes = bytes.len(), chars = text.len(), "Extracted PDF text");
        Ok(text.trim().to_string())
    }

    fn name(&self) -> &str {
        "pdf"
    }
}

/// UTF-8 text documents, passed through as-is
#[derive(Debug, Clone, Copy, Default)]
pub struct PlainTextSource;

impl TextSource for PlainTextSource {
    fn extract_text(&self, bytes: &[u8]) -> Result<String> {
        let text = std::str::from_utf8(bytes)
            .map_err(|e| Error::extraction(format!("Document is not valid UTF-8: {}", e)))?;
        Ok(text.trim().to_string())
    }

    fn name(&self) -> &str {
        "text"
    }
}

/// Pick a source by file extension; anything that is not `.txt` is read as PDF
pub fn source_for_path(path: &Path) -> Box<dyn TextSource> {
    let is_text = path
        .extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case("txt"));

    if is_text {
        Box::new(PlainTextSource)
    } else {
        Box::new(PdfTextSource)
    }
}
