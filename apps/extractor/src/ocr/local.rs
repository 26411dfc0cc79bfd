//! Local OCR backend: reads the text layer of a PDF with `pdf-extract`.
//!
//! Parsing is CPU-bound, so it runs inside `tokio::task::spawn_blocking`. Scanned PDFs
//! without a text layer and DOCX files are rejected.

use std::path::Path;

use anyhow::{anyhow, bail, Context, Result};
use async_trait::async_trait;
use tracing::debug;

use super::{detect_format, non_empty, DocumentFormat, OcrService};

#[derive(Debug, Clone, Default)]
pub struct LocalPdfOcr;

#[async_trait]
impl OcrService for LocalPdfOcr {
    async fn extract_text(&self, locator: &Path) -> Result<String> {
        match detect_format(locator)? {
            DocumentFormat::Pdf => {}
            DocumentFormat::Docx => bail!(
                "the local OCR backend only reads PDF files; '{}' needs OCR_BACKEND=mistral",
                locator.display()
            ),
        }

        let bytes = tokio::fs::read(locator)
            .await
            .with_context(|| format!("Failed to read '{}'", locator.display()))?;

        let text = tokio::task::spawn_blocking(move || pdf_extract::extract_text_from_mem(&bytes))
            .await
            .context("PDF text extraction task panicked")?
            .map_err(|e| anyhow!("Failed to parse PDF '{}': {e:?}", locator.display()))?;

        debug!("Extracted {} chars from {}", text.len(), locator.display());
        non_empty(text, locator)
    }
}
