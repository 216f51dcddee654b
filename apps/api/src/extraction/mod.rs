//! Résumé text extraction: the boundary to PDF / DOCX parsing.
//!
//! Handlers never parse documents themselves; they hand a `ResumeDocument`
//! to the `TextExtractor` carried in `AppState`.

use std::path::Path;

use bytes::Bytes;
use docx_rs::{DocumentChild, ParagraphChild, RunChild};
use thiserror::Error;
use tracing::debug;

#[derive(Debug, Error)]
pub enum ExtractionError {
    #[error("unsupported document format: {0}")]
    UnsupportedFormat(String),

    #[error("text extraction failed: {0}")]
    ExtractionFailed(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocumentFormat {
    Pdf,
    Docx,
}

impl DocumentFormat {
    /// Derives the format from an upload's file name (extension, case-insensitive).
    pub fn from_filename(filename: &str) -> Result<Self, ExtractionError> {
        let ext = Path::new(filename)
            .extension()
            .and_then(|e| e.to_str())
            .map(str::to_ascii_lowercase);

        match ext.as_deref() {
            Some("pdf") => Ok(Self::Pdf),
            Some("docx") => Ok(Self::Docx),
            _ => Err(ExtractionError::UnsupportedFormat(filename.to_string())),
        }
    }
}

/// An uploaded résumé. Lives only for the duration of one analyze request.
#[derive(Debug, Clone)]
pub struct ResumeDocument {
    pub bytes: Bytes,
    pub format: DocumentFormat,
}

/// Converts a document into plain text. Implementations are synchronous and
/// may be CPU-heavy; callers run them on the blocking pool.
pub trait TextExtractor: Send + Sync {
    fn extract_text(&self, document: &ResumeDocument) -> Result<String, ExtractionError>;
}

/// Default extractor: `pdf-extract` for PDF, `docx-rs` for DOCX.
pub struct DocumentTextExtractor;

impl TextExtractor for DocumentTextExtractor {
    fn extract_text(&self, document: &ResumeDocument) -> Result<String, ExtractionError> {
        let text = match document.format {
            DocumentFormat::Pdf => extract_pdf(&document.bytes)?,
            DocumentFormat::Docx => extract_docx(&document.bytes)?,
        };
        debug!(
            "Extracted {} chars from {:?} document",
            text.len(),
            document.format
        );
        Ok(text)
    }
}

fn extract_pdf(data: &[u8]) -> Result<String, ExtractionError> {
    pdf_extract::extract_text_from_mem(data)
        .map_err(|e| ExtractionError::ExtractionFailed(format!("PDF: {e}")))
}

fn extract_docx(data: &[u8]) -> Result<String, ExtractionError> {
    let docx = docx_rs::read_docx(data)
        .map_err(|e| ExtractionError::ExtractionFailed(format!("DOCX: {e}")))?;

    let mut text = String::new();
    for child in &docx.document.children {
        if let DocumentChild::Paragraph(paragraph) = child {
            for p_child in &paragraph.children {
                if let ParagraphChild::Run(run) = p_child {
                    for r_child in &run.children {
                        if let RunChild::Text(t) = r_child {
                            text.push_str(&t.text);
                        }
                    }
                }
            }
            text.push('\n');
        }
    }
    Ok(text)
}
