//! Workflow state: the single record threaded through one run, plus its vocabulary types.

use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::errors::AppError;
use crate::extraction::schema::{JobDescription, ResumeData};
use crate::extraction::ExtractedRecord;
use crate::workflow::history::JudgeHistory;
use crate::workflow::router::fan_out;

// ────────────────────────────────────────────────────────────────────────────
// Vocabulary
// ────────────────────────────────────────────────────────────────────────────

/// Which kind of document a branch, result or verdict pertains to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DocumentKind {
    Resume,
    Jd,
}

impl DocumentKind {
    pub fn as_str(self) -> &'static str {
        match self {
            DocumentKind::Resume => "resume",
            DocumentKind::Jd => "jd",
        }
    }

    /// Identifier of the extraction schema for this kind.
    pub fn schema_name(self) -> &'static str {
        match self {
            DocumentKind::Resume => "resume",
            DocumentKind::Jd => "job_description",
        }
    }
}

impl fmt::Display for DocumentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for DocumentKind {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "resume" => Ok(DocumentKind::Resume),
            "jd" | "job_description" => Ok(DocumentKind::Jd),
            other => Err(AppError::Validation(format!(
                "unknown document kind '{other}' (expected 'resume' or 'jd')"
            ))),
        }
    }
}

/// Which branches a run covers. Fixed for the lifetime of the run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Mode {
    ResumeOnly,
    JdOnly,
    Both,
}

impl Mode {
    /// The single-source mode for one document kind.
    pub fn single(kind: DocumentKind) -> Self {
        match kind {
            DocumentKind::Resume => Mode::ResumeOnly,
            DocumentKind::Jd => Mode::JdOnly,
        }
    }

    pub fn includes(self, kind: DocumentKind) -> bool {
        fan_out(self).contains(&kind)
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Mode::ResumeOnly => "resume_only",
            Mode::JdOnly => "jd_only",
            Mode::Both => "both",
        })
    }
}

impl FromStr for Mode {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "resume_only" => Ok(Mode::ResumeOnly),
            "jd_only" => Ok(Mode::JdOnly),
            "both" => Ok(Mode::Both),
            other => Err(AppError::Validation(format!(
                "unknown mode '{other}' (expected 'resume_only', 'jd_only' or 'both')"
            ))),
        }
    }
}

/// Judge grade. Serialized upper-case, parsed case-insensitively.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Grade {
    Pass,
    Fail,
}

impl FromStr for Grade {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "PASS" => Ok(Grade::Pass),
            "FAIL" => Ok(Grade::Fail),
            _ => Err(format!("grade must be PASS or FAIL, got '{}'", s.trim())),
        }
    }
}

/// One judge verdict for one source in one pass.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Verdict {
    pub source: DocumentKind,
    pub grade: Grade,
    pub summary: String,
}

impl Verdict {
    pub fn passed(&self) -> bool {
        self.grade == Grade::Pass
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Run request / outcome
// ────────────────────────────────────────────────────────────────────────────

/// Entry point contract of a run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunRequest {
    pub mode: Mode,
    #[serde(default)]
    pub resume_source_ref: Option<PathBuf>,
    #[serde(default)]
    pub jd_source_ref: Option<PathBuf>,
}

impl RunRequest {
    /// A single-source request for one document.
    pub fn single(kind: DocumentKind, locator: impl Into<PathBuf>) -> Self {
        let locator = Some(locator.into());
        match kind {
            DocumentKind::Resume => RunRequest {
                mode: Mode::ResumeOnly,
                resume_source_ref: locator,
                jd_source_ref: None,
            },
            DocumentKind::Jd => RunRequest {
                mode: Mode::JdOnly,
                resume_source_ref: None,
                jd_source_ref: locator,
            },
        }
    }

    pub fn source_ref(&self, kind: DocumentKind) -> Option<&Path> {
        match kind {
            DocumentKind::Resume => self.resume_source_ref.as_deref(),
            DocumentKind::Jd => self.jd_source_ref.as_deref(),
        }
    }

    /// Every source the mode needs must have a reference.
    pub fn validate(&self) -> Result<(), AppError> {
        for kind in fan_out(self.mode) {
            if self.source_ref(kind).is_none() {
                return Err(AppError::Validation(format!(
                    "mode '{}' requires a {} document",
                    self.mode, kind
                )));
            }
        }
        Ok(())
    }
}

/// What a finished run reports back to its caller.
#[derive(Debug, Clone, Serialize)]
pub struct RunOutcome {
    pub run_id: Uuid,
    pub mode: Mode,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub resume_result: Option<ResumeData>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub jd_result: Option<JobDescription>,
    pub judge_history: JudgeHistory,
    pub reflection_loop: u32,
}

impl RunOutcome {
    /// True when the judge triggered a second pass.
    pub fn retried(&self) -> bool {
        self.reflection_loop > 1
    }

    /// True when the most recent verdict for every active source is PASS.
    pub fn all_passed(&self) -> bool {
        let finals = self.judge_history.final_verdicts();
        !finals.is_empty() && finals.values().all(Verdict::passed)
    }

    /// The extracted record for one source as JSON, if present.
    pub fn result_json(&self, kind: DocumentKind) -> Option<serde_json::Value> {
        match kind {
            DocumentKind::Resume => self
                .resume_result
                .as_ref()
                .and_then(|r| serde_json::to_value(r).ok()),
            DocumentKind::Jd => self
                .jd_result
                .as_ref()
                .and_then(|r| serde_json::to_value(r).ok()),
        }
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Workflow state
// ────────────────────────────────────────────────────────────────────────────

/// Output of one branch execution: OCR text plus the structured record.
#[derive(Debug, Clone)]
pub struct BranchOutput {
    pub kind: DocumentKind,
    pub text: String,
    pub record: ExtractedRecord,
}

/// Mutable state of a single run. Created per request, dropped once reported.
///
/// Resume fields and JD fields are disjoint namespaces: a branch only ever writes its own.
#[derive(Debug)]
pub struct WorkflowState {
    pub run_id: Uuid,
    pub mode: Mode,
    pub reflection_loop: u32,
    pub resume_source_ref: Option<PathBuf>,
    pub jd_source_ref: Option<PathBuf>,
    pub resume_text: Option<String>,
    pub jd_text: Option<String>,
    pub resume_result: Option<ResumeData>,
    pub jd_result: Option<JobDescription>,
    pub judge_history: JudgeHistory,
}

impl WorkflowState {
    /// Fresh state for a validated request. Source refs the mode does not use are dropped.
    pub fn new(request: RunRequest) -> Self {
        let mode = request.mode;
        Self {
            run_id: Uuid::new_v4(),
            mode,
            reflection_loop: 0,
            resume_source_ref: request
                .resume_source_ref
                .filter(|_| mode.includes(DocumentKind::Resume)),
            jd_source_ref: request
                .jd_source_ref
                .filter(|_| mode.includes(DocumentKind::Jd)),
            resume_text: None,
            jd_text: None,
            resume_result: None,
            jd_result: None,
            judge_history: JudgeHistory::default(),
        }
    }

    pub fn source_ref(&self, kind: DocumentKind) -> Option<&Path> {
        match kind {
            DocumentKind::Resume => self.resume_source_ref.as_deref(),
            DocumentKind::Jd => self.jd_source_ref.as_deref(),
        }
    }

    pub fn text(&self, kind: DocumentKind) -> Option<&str> {
        match kind {
            DocumentKind::Resume => self.resume_text.as_deref(),
            DocumentKind::Jd => self.jd_text.as_deref(),
        }
    }

    /// Writes a branch's text and record into that branch's namespace, replacing any
    /// earlier pass's values. Records of the wrong kind are rejected.
    pub fn apply_branch(&mut self, output: BranchOutput) -> Result<(), AppError> {
        match (output.kind, output.record) {
            (DocumentKind::Resume, ExtractedRecord::Resume(data)) => {
                self.resume_text = Some(output.text);
                self.resume_result = Some(data);
            }
            (DocumentKind::Jd, ExtractedRecord::JobDescription(data)) => {
                self.jd_text = Some(output.text);
                self.jd_result = Some(data);
            }
            (kind, record) => {
                return Err(AppError::SchemaExtraction {
                    kind,
                    message: format!(
                        "expected a {} record, got a {} record",
                        kind.schema_name(),
                        record.kind().schema_name()
                    ),
                });
            }
        }
        Ok(())
    }

    /// The structured result for one source, pretty-printed for the judge.
    pub fn result_json(&self, kind: DocumentKind) -> Result<Option<String>, AppError> {
        let json = match kind {
            DocumentKind::Resume => self
                .resume_result
                .as_ref()
                .map(serde_json::to_string_pretty)
                .transpose(),
            DocumentKind::Jd => self
                .jd_result
                .as_ref()
                .map(serde_json::to_string_pretty)
                .transpose(),
        };
        json.map_err(|e| AppError::Internal(anyhow::anyhow!("Failed to serialize {kind} result: {e}")))
    }

    pub fn into_outcome(self) -> RunOutcome {
        RunOutcome {
            run_id: self.run_id,
            mode: self.mode,
            resume_result: self.resume_result,
            jd_result: self.jd_result,
            judge_history: self.judge_history,
            reflection_loop: self.reflection_loop,
        }
    }
}
