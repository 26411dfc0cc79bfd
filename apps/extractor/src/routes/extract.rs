//! Axum route handler for the upload-and-extract API.

use std::collections::BTreeMap;
use std::io::Write;

use axum::{
    extract::{Multipart, State},
    Json,
};
use serde::Serialize;
use tempfile::NamedTempFile;
use tracing::{debug, info};

use crate::errors::AppError;
use crate::state::AppState;
use crate::workflow::{DocumentKind, Mode, RunOutcome, RunRequest, Verdict};

// ────────────────────────────────────────────────────────────────────────────
// Response type
// ────────────────────────────────────────────────────────────────────────────

/// The run outcome plus the per-source display view.
#[derive(Debug, Serialize)]
pub struct ExtractResponse {
    #[serde(flatten)]
    pub outcome: RunOutcome,
    /// Most recent verdict per source.
    pub final_verdicts: BTreeMap<DocumentKind, Verdict>,
    /// True when the first judge pass found issues and the pipeline re-ran.
    pub retried: bool,
}

impl From<RunOutcome> for ExtractResponse {
    fn from(outcome: RunOutcome) -> Self {
        Self {
            final_verdicts: outcome.judge_history.final_verdicts(),
            retried: outcome.retried(),
            outcome,
        }
    }
}

/// Uploaded documents, held as temp files for the lifetime of the request.
#[derive(Default)]
struct Uploads {
    resume: Option<NamedTempFile>,
    jd: Option<NamedTempFile>,
}

// ────────────────────────────────────────────────────────────────────────────
// Handler
// ────────────────────────────────────────────────────────────────────────────

/// POST /api/v1/extract
///
/// Multipart form: `mode` (resume_only | jd_only | both) plus file parts `resume` and/or `jd`.
/// Runs the extraction workflow and returns structured results with the judge history.
pub async fn handle_extract(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<Json<ExtractResponse>, AppError> {
    let mut mode: Option<Mode> = None;
    let mut uploads = Uploads::default();

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::Validation(format!("Malformed multipart body: {e}")))?
    {
        let name = field.name().unwrap_or_default().to_string();
        match name.as_str() {
            "mode" => {
                let value = field
                    .text()
                    .await
                    .map_err(|e| AppError::Validation(format!("Unreadable mode field: {e}")))?;
                mode = Some(value.parse()?);
            }
            "resume" | "jd" => {
                let kind: DocumentKind = name.parse()?;
                let file_name = field.file_name().map(str::to_string);
                let data = field.bytes().await.map_err(|e| {
                    AppError::Validation(format!("Unreadable {kind} upload: {e}"))
                })?;
                if data.is_empty() {
                    continue;
                }
                let temp = persist_upload(file_name.as_deref(), &data)?;
                match kind {
                    DocumentKind::Resume => uploads.resume = Some(temp),
                    DocumentKind::Jd => uploads.jd = Some(temp),
                }
            }
            other => debug!("Ignoring unknown multipart field '{other}'"),
        }
    }

    let mode = mode.ok_or_else(|| AppError::Validation("mode is required".to_string()))?;
    let request = RunRequest {
        mode,
        resume_source_ref: uploads.resume.as_ref().map(|f| f.path().to_path_buf()),
        jd_source_ref: uploads.jd.as_ref().map(|f| f.path().to_path_buf()),
    };

    info!("Extract request: mode={mode}");
    let outcome = state.workflow.run(request).await?;

    // Temp files are removed when `uploads` drops at the end of the request.
    Ok(Json(ExtractResponse::from(outcome)))
}

/// Writes an upload to a temp file that keeps the original extension, so OCR can tell
/// PDF from DOCX.
fn persist_upload(file_name: Option<&str>, data: &[u8]) -> Result<NamedTempFile, AppError> {
    let suffix = file_name
        .and_then(|n| std::path::Path::new(n).extension())
        .and_then(|e| e.to_str())
        .map(|e| format!(".{e}"))
        .unwrap_or_default();

    let mut file = tempfile::Builder::new()
        .prefix("upload-")
        .suffix(&suffix)
        .tempfile()
        .map_err(|e| AppError::Internal(anyhow::anyhow!("Failed to create temp file: {e}")))?;
    file.write_all(data)
        .map_err(|e| AppError::Internal(anyhow::anyhow!("Failed to write upload: {e}")))?;
    Ok(file)
}
