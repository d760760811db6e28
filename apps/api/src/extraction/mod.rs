//! Text extraction for uploaded proposals and reference documents.
//!
//! Supported uploads:
//! - `.pdf`: text via `pdf-extract` (CPU-bound, callers run it in `spawn_blocking`)
//! - `.txt` / `.md`: UTF-8 text
//! - `.json`: a serialized [`Document`] from an external document model provider
//!
//! Word-processor formats are parsed upstream and arrive as `.json`.

use thiserror::Error;
use tracing::{debug, warn};

use crate::evaluation::Proposal;
use crate::models::Document;

#[derive(Debug, Error)]
pub enum ExtractionError {
    #[error("Unsupported file type for '{0}' (expected .pdf, .txt, .md or .json)")]
    UnsupportedFormat(String),

    #[error("Failed to extract text from PDF '{file_name}': {reason}")]
    Pdf { file_name: String, reason: String },

    #[error("File '{0}' is not valid UTF-8 text")]
    Encoding(String),

    #[error("Malformed document model: {0}")]
    DocumentModel(#[from] serde_json::Error),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileKind {
    Pdf,
    PlainText,
    DocumentModel,
}

impl FileKind {
    pub fn from_file_name(file_name: &str) -> Option<Self> {
        let extension = file_name.rsplit_once('.')?.1.to_ascii_lowercase();
        match extension.as_str() {
            "pdf" => Some(FileKind::Pdf),
            "txt" | "md" => Some(FileKind::PlainText),
            "json" => Some(FileKind::DocumentModel),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct TextExtractor {
    /// Unsupported uploads yield empty text instead of an error.
    pub lenient: bool,
}

impl TextExtractor {
    pub fn new(lenient: bool) -> Self {
        Self { lenient }
    }

    /// Extracts plain text from an upload.
    pub fn extract_text(&self, file_name: &str, bytes: &[u8]) -> Result<String, ExtractionError> {
        let Some(kind) = FileKind::from_file_name(file_name) else {
            return self.unsupported(file_name);
        };
        debug!("Extracting text from '{file_name}' as {kind:?}");

        match kind {
            FileKind::Pdf => {
                pdf_extract::extract_text_from_mem(bytes).map_err(|e| ExtractionError::Pdf {
                    file_name: file_name.to_string(),
                    reason: e.to_string(),
                })
            }
            FileKind::PlainText => String::from_utf8(bytes.to_vec())
                .map_err(|_| ExtractionError::Encoding(file_name.to_string())),
            FileKind::DocumentModel => Ok(parse_document(bytes)?.flatten()),
        }
    }

    /// Builds a proposal, keeping paragraph structure when the upload has it.
    pub fn extract_proposal(
        &self,
        file_name: &str,
        bytes: &[u8],
    ) -> Result<Proposal, ExtractionError> {
        match FileKind::from_file_name(file_name) {
            Some(FileKind::DocumentModel) => Ok(Proposal::from_document(parse_document(bytes)?)),
            _ => Ok(Proposal::from_text(self.extract_text(file_name, bytes)?)),
        }
    }

    fn unsupported(&self, file_name: &str) -> Result<String, ExtractionError> {
        if self.lenient {
            warn!("Unsupported upload '{file_name}' treated as empty text");
            Ok(String::new())
        } else {
            Err(ExtractionError::UnsupportedFormat(file_name.to_string()))
        }
    }
}

pub fn parse_document(bytes: &[u8]) -> Result<Document, ExtractionError> {
    Ok(serde_json::from_slice(bytes)?)
}
