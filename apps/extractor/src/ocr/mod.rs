//! OCR collaborator: turns a document locator into markdown/plain text.
//!
//! `OcrService` is the seam; the workflow holds an `Arc<dyn OcrService>` built once at
//! startup. Backends:
//! - `MistralOcr`: upload, signed URL, OCR. PDF and DOCX.
//! - `LocalPdfOcr`: PDF text layer via `pdf-extract`. No network.

use std::path::Path;

use anyhow::{bail, Result};
use async_trait::async_trait;

pub mod local;
pub mod mistral;

pub use local::LocalPdfOcr;
pub use mistral::MistralOcr;

/// Extensions accepted for any document, lower-case.
pub const SUPPORTED_EXTENSIONS: &[&str] = &["pdf", "docx"];

#[async_trait]
pub trait OcrService: Send + Sync {
    /// Reads the document at `locator` and returns its text content.
    async fn extract_text(&self, locator: &Path) -> Result<String>;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocumentFormat {
    Pdf,
    Docx,
}

impl DocumentFormat {
    pub fn mime_type(self) -> &'static str {
        match self {
            DocumentFormat::Pdf => "application/pdf",
            DocumentFormat::Docx => {
                "application/vnd.openxmlformats-officedocument.wordprocessingml.document"
            }
        }
    }
}

fn lowercase_extension(locator: &Path) -> String {
    locator
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_ascii_lowercase())
        .unwrap_or_default()
}

/// Format of a document judged by its extension (case-insensitive).
pub fn detect_format(locator: &Path) -> Result<DocumentFormat> {
    let extension = lowercase_extension(locator);
    if !SUPPORTED_EXTENSIONS.contains(&extension.as_str()) {
        bail!(
            "unsupported file type '{extension}' for '{}' (expected one of: {})",
            locator.display(),
            SUPPORTED_EXTENSIONS.join(", ")
        );
    }
    Ok(match extension.as_str() {
        "docx" => DocumentFormat::Docx,
        _ => DocumentFormat::Pdf,
    })
}

pub fn is_supported(locator: &Path) -> bool {
    SUPPORTED_EXTENSIONS.contains(&lowercase_extension(locator).as_str())
}

/// Rejects OCR output that carries no text at all.
fn non_empty(text: String, locator: &Path) -> Result<String> {
    if text.trim().is_empty() {
        bail!("no text could be extracted from '{}'", locator.display());
    }
    Ok(text)
}
