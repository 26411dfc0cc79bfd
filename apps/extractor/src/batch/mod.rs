//! Batch extraction over a folder of documents.
//!
//! Each document runs through the workflow on its own, one after another. Results land in
//! `<file name>.json`. A fatal error on one document, or a failed write of its result, is
//! counted as errored and the batch moves on.

use std::collections::HashSet;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use chrono::Utc;
use serde::Serialize;
use serde_json::{json, Value};
use tracing::{error, info, warn};

use crate::errors::AppError;
use crate::ocr::is_supported;
use crate::workflow::{DocumentKind, RunOutcome, RunRequest, Workflow};

/// Counts for one batch. `failed` = finished runs whose final verdicts were not all PASS.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct BatchSummary {
    pub total: usize,
    pub passed: usize,
    pub failed: usize,
    pub errored: usize,
}

/// Supported documents directly inside `input`, sorted by file name.
pub fn list_documents(input: &Path) -> Result<Vec<PathBuf>> {
    let mut files = std::fs::read_dir(input)
        .with_context(|| format!("Failed to read input folder '{}'", input.display()))?
        .filter_map(|entry| entry.ok().map(|e| e.path()))
        .filter(|path| path.is_file() && is_supported(path))
        .collect::<Vec<_>>();
    files.sort();
    Ok(files)
}

pub async fn run_batch(
    workflow: &Workflow,
    kind: DocumentKind,
    input: &Path,
    output: &Path,
) -> Result<BatchSummary> {
    let files = list_documents(input)?;
    let mut summary = BatchSummary {
        total: files.len(),
        ..Default::default()
    };

    if files.is_empty() {
        warn!("No PDF/DOCX files found in {}", input.display());
        return Ok(summary);
    }

    tokio::fs::create_dir_all(output)
        .await
        .with_context(|| format!("Failed to create output folder '{}'", output.display()))?;

    info!(
        "Batch: {} {} document(s) from {} → {}",
        files.len(),
        kind,
        input.display(),
        output.display()
    );

    let mut used_names = HashSet::new();
    for (index, file) in files.iter().enumerate() {
        let name = output_name(file, &mut used_names);
        info!("[{:>3}/{}] {}", index + 1, files.len(), file.display());

        match process_document(workflow, kind, file, output, &name).await {
            Ok(DocumentStatus::Passed) => summary.passed += 1,
            Ok(DocumentStatus::Failed) => summary.failed += 1,
            Ok(DocumentStatus::Errored) => summary.errored += 1,
            Err(e) => {
                error!("{} result could not be written: {e:#}", file.display());
                summary.errored += 1;
            }
        }
    }

    Ok(summary)
}

enum DocumentStatus {
    Passed,
    Failed,
    Errored,
}

/// Runs one document and writes `<name>.json` or `<name>.error.json`.
/// Only a failed write is returned as `Err`.
async fn process_document(
    workflow: &Workflow,
    kind: DocumentKind,
    file: &Path,
    output: &Path,
    name: &str,
) -> Result<DocumentStatus> {
    match workflow.run(RunRequest::single(kind, file)).await {
        Ok(outcome) => {
            let passed = outcome.all_passed();
            info!(
                "{} {}{}",
                file.display(),
                if passed { "PASS" } else { "FAIL" },
                if outcome.retried() { " (retried)" } else { "" }
            );
            write_json(
                &output.join(format!("{name}.json")),
                &success_record(kind, &outcome),
            )
            .await?;
            Ok(if passed {
                DocumentStatus::Passed
            } else {
                DocumentStatus::Failed
            })
        }
        Err(e) => {
            error!("{} ERROR: {e}", file.display());
            write_json(&output.join(format!("{name}.error.json")), &error_record(file, &e)).await?;
            Ok(DocumentStatus::Errored)
        }
    }
}

/// Output base name for a document: its full file name, so `cv.pdf` and `cv.docx` stay
/// apart. Names already taken in this batch (possible after lossy UTF-8 conversion) get a
/// numeric suffix.
fn output_name(file: &Path, used: &mut HashSet<String>) -> String {
    let base = file
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| "document".to_string());
    let mut name = base.clone();
    let mut n = 1;
    while !used.insert(name.clone()) {
        n += 1;
        name = format!("{base}-{n}");
    }
    name
}

/// Per-document output record for a finished run.
pub fn success_record(kind: DocumentKind, outcome: &RunOutcome) -> Value {
    let mut record = json!({
        "judge_results": outcome.judge_history,
        "final_verdicts": outcome.judge_history.final_verdicts(),
        "reflection_loop": outcome.reflection_loop,
        "completed_at": Utc::now(),
    });
    record[format!("{kind}_data").as_str()] = outcome.result_json(kind).unwrap_or(Value::Null);
    record
}

/// Per-document output record for a run that aborted.
pub fn error_record(file: &Path, error: &AppError) -> Value {
    json!({
        "file": file.display().to_string(),
        "source": error.kind(),
        "error": error.to_string(),
    })
}

async fn write_json(path: &Path, value: &Value) -> Result<()> {
    let body = serde_json::to_vec_pretty(value).context("Failed to serialize output record")?;
    tokio::fs::write(path, body)
        .await
        .with_context(|| format!("Failed to write '{}'", path.display()))
}
