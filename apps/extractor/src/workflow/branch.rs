//! Branch executor: OCR then structured extraction for one document.
//!
//! Stateless per invocation. Nothing is retried here: a failure at either step is fatal to
//! the run, and reflection retries re-enter from the top (OCR included).

use std::path::Path;

use tracing::{error, info};

use crate::errors::AppError;
use crate::workflow::collaborators::Collaborators;
use crate::workflow::state::{BranchOutput, DocumentKind};

pub async fn run_branch(
    collaborators: &Collaborators,
    kind: DocumentKind,
    locator: &Path,
) -> Result<BranchOutput, AppError> {
    info!("[{kind}] OCR {}", locator.display());
    let text = collaborators
        .bounded(collaborators.ocr.extract_text(locator))
        .await
        .map_err(|e| {
            error!("[{kind}] OCR failed for {}: {e:#}", locator.display());
            AppError::ExtractionIo {
                kind,
                message: format!("{e:#}"),
            }
        })?;

    info!("[{kind}] extracting {} record ({} chars)", kind.schema_name(), text.len());
    let record = collaborators
        .bounded(collaborators.extractor.extract(kind, &text))
        .await
        .map_err(|e| {
            error!("[{kind}] schema extraction failed: {e:#}");
            AppError::SchemaExtraction {
                kind,
                message: format!("{e:#}"),
            }
        })?;

    if record.kind() != kind {
        return Err(AppError::SchemaExtraction {
            kind,
            message: format!(
                "extractor returned a {} record for a {} document",
                record.kind().schema_name(),
                kind.schema_name()
            ),
        });
    }

    Ok(BranchOutput { kind, text, record })
}
