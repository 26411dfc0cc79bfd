//! In-memory collaborator doubles for unit tests. No network, deterministic.

use std::collections::{HashMap, VecDeque};
use std::path::Path;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use anyhow::{anyhow, Result};
use async_trait::async_trait;

use crate::extraction::schema::{JobDescription, PersonalInfo, ResumeData};
use crate::extraction::{ExtractedRecord, StructuredExtractor};
use crate::judge::{Judge, Judgement};
use crate::ocr::OcrService;
use crate::workflow::collaborators::Collaborators;
use crate::workflow::state::{DocumentKind, Grade};

/// Collaborators wired to the given doubles, with a generous timeout.
pub(crate) fn collaborators(
    ocr: &StubOcr,
    extractor: &StubExtractor,
    judge: &ScriptedJudge,
) -> Collaborators {
    Collaborators {
        ocr: Arc::new(ocr.clone()),
        extractor: Arc::new(extractor.clone()),
        judge: Arc::new(judge.clone()),
        call_timeout: Duration::from_secs(30),
    }
}

#[derive(Clone)]
enum OcrBehavior {
    Succeed,
    Fail(String),
    Hang,
}

/// OCR double. Returns "<file stem> markdown".
#[derive(Clone)]
pub(crate) struct StubOcr {
    behavior: OcrBehavior,
    calls: Arc<AtomicUsize>,
}

impl Default for StubOcr {
    fn default() -> Self {
        Self {
            behavior: OcrBehavior::Succeed,
            calls: Arc::default(),
        }
    }
}

impl StubOcr {
    pub(crate) fn failing(message: &str) -> Self {
        Self {
            behavior: OcrBehavior::Fail(message.to_string()),
            ..Self::default()
        }
    }

    pub(crate) fn hanging() -> Self {
        Self {
            behavior: OcrBehavior::Hang,
            ..Self::default()
        }
    }

    pub(crate) fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl OcrService for StubOcr {
    async fn extract_text(&self, locator: &Path) -> Result<String> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        match &self.behavior {
            OcrBehavior::Succeed => {
                let stem = locator
                    .file_stem()
                    .and_then(|s| s.to_str())
                    .unwrap_or("document");
                Ok(format!("{stem} markdown"))
            }
            OcrBehavior::Fail(message) => Err(anyhow!("{message}")),
            OcrBehavior::Hang => std::future::pending().await,
        }
    }
}

#[derive(Clone)]
enum ExtractorBehavior {
    Succeed,
    Fail(String),
    /// Returns the record of the other kind.
    Swapped,
}

/// Extraction double with per-kind call counters.
#[derive(Clone)]
pub(crate) struct StubExtractor {
    behavior: ExtractorBehavior,
    resume_calls: Arc<AtomicUsize>,
    jd_calls: Arc<AtomicUsize>,
}

impl Default for StubExtractor {
    fn default() -> Self {
        Self {
            behavior: ExtractorBehavior::Succeed,
            resume_calls: Arc::default(),
            jd_calls: Arc::default(),
        }
    }
}

impl StubExtractor {
    pub(crate) fn failing(message: &str) -> Self {
        Self {
            behavior: ExtractorBehavior::Fail(message.to_string()),
            ..Self::default()
        }
    }

    pub(crate) fn swapped() -> Self {
        Self {
            behavior: ExtractorBehavior::Swapped,
            ..Self::default()
        }
    }

    pub(crate) fn calls(&self, kind: DocumentKind) -> usize {
        match kind {
            DocumentKind::Resume => self.resume_calls.load(Ordering::SeqCst),
            DocumentKind::Jd => self.jd_calls.load(Ordering::SeqCst),
        }
    }
}

pub(crate) fn sample_record(kind: DocumentKind) -> ExtractedRecord {
    match kind {
        DocumentKind::Resume => ExtractedRecord::Resume(ResumeData {
            personal_info: PersonalInfo {
                full_name: "Jane Doe".to_string(),
                first_name: "Jane".to_string(),
                last_name: Some("Doe".to_string()),
                ..Default::default()
            },
            ..Default::default()
        }),
        DocumentKind::Jd => ExtractedRecord::JobDescription(JobDescription {
            role_title: "Backend Engineer".to_string(),
            ..Default::default()
        }),
    }
}

#[async_trait]
impl StructuredExtractor for StubExtractor {
    async fn extract(&self, kind: DocumentKind, _text: &str) -> Result<ExtractedRecord> {
        match kind {
            DocumentKind::Resume => self.resume_calls.fetch_add(1, Ordering::SeqCst),
            DocumentKind::Jd => self.jd_calls.fetch_add(1, Ordering::SeqCst),
        };
        match &self.behavior {
            ExtractorBehavior::Succeed => Ok(sample_record(kind)),
            ExtractorBehavior::Fail(message) => Err(anyhow!("{message}")),
            ExtractorBehavior::Swapped => Ok(sample_record(match kind {
                DocumentKind::Resume => DocumentKind::Jd,
                DocumentKind::Jd => DocumentKind::Resume,
            })),
        }
    }
}

/// Judge double replaying a grade script per source. Once a script runs out the fallback
/// grade is used. Sources are told apart by the record JSON.
#[derive(Clone)]
pub(crate) struct ScriptedJudge {
    scripts: Arc<Mutex<HashMap<DocumentKind, VecDeque<Grade>>>>,
    fallback: Option<Grade>,
    hang: bool,
    calls: Arc<Mutex<HashMap<DocumentKind, usize>>>,
}

impl ScriptedJudge {
    fn with(fallback: Option<Grade>, resume: &[Grade], jd: &[Grade]) -> Self {
        let scripts = HashMap::from([
            (DocumentKind::Resume, resume.iter().copied().collect()),
            (DocumentKind::Jd, jd.iter().copied().collect()),
        ]);
        Self {
            scripts: Arc::new(Mutex::new(scripts)),
            fallback,
            hang: false,
            calls: Arc::default(),
        }
    }

    pub(crate) fn always_pass() -> Self {
        Self::with(Some(Grade::Pass), &[], &[])
    }

    pub(crate) fn always_fail() -> Self {
        Self::with(Some(Grade::Fail), &[], &[])
    }

    /// Replays `resume` and `jd` in order, then passes.
    pub(crate) fn scripted(resume: &[Grade], jd: &[Grade]) -> Self {
        Self::with(Some(Grade::Pass), resume, jd)
    }

    /// Every call fails as if the judge service were unreachable.
    pub(crate) fn unavailable() -> Self {
        Self::with(None, &[], &[])
    }

    /// Every call never returns.
    pub(crate) fn hanging() -> Self {
        Self {
            hang: true,
            ..Self::always_pass()
        }
    }

    pub(crate) fn calls(&self, kind: DocumentKind) -> usize {
        let calls = self.calls.lock().expect("judge call counter poisoned");
        calls.get(&kind).copied().unwrap_or(0)
    }
}

#[async_trait]
impl Judge for ScriptedJudge {
    async fn judge(&self, _text: &str, record_json: &str) -> Result<Judgement> {
        let kind = if record_json.contains("personal_info") {
            DocumentKind::Resume
        } else {
            DocumentKind::Jd
        };
        *self
            .calls
            .lock()
            .expect("judge call counter poisoned")
            .entry(kind)
            .or_default() += 1;
        if self.hang {
            return std::future::pending().await;
        }

        let scripted = self
            .scripts
            .lock()
            .expect("judge script poisoned")
            .get_mut(&kind)
            .and_then(VecDeque::pop_front);
        let grade = scripted
            .or(self.fallback)
            .ok_or_else(|| anyhow!("judge service unreachable"))?;

        Ok(Judgement {
            grade,
            summary: match grade {
                Grade::Pass => "looks good".to_string(),
                Grade::Fail => format!("{kind} extraction has invented dates"),
            },
        })
    }
}
