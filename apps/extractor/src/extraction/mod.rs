//! Structured extraction: turns OCR text into a schema-conformant record.
//!
//! `StructuredExtractor` is the seam. `LlmExtractor` is the production backend: one chat
//! call per document, reply parsed straight into the target schema.

use anyhow::Result;
use async_trait::async_trait;
use serde::Serialize;
use tracing::debug;

use crate::llm_client::prompts::with_json_only;
use crate::llm_client::LlmClient;
use crate::workflow::state::DocumentKind;

pub mod prompts;
pub mod schema;

use prompts::{JD_PROMPT_TEMPLATE, JD_SYSTEM, RESUME_PROMPT_TEMPLATE, RESUME_SYSTEM};
use schema::{JobDescription, ResumeData};

/// A record produced by the extractor. Serialized without a tag: the JSON is the record.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum ExtractedRecord {
    Resume(ResumeData),
    JobDescription(JobDescription),
}

impl ExtractedRecord {
    pub fn kind(&self) -> DocumentKind {
        match self {
            ExtractedRecord::Resume(_) => DocumentKind::Resume,
            ExtractedRecord::JobDescription(_) => DocumentKind::Jd,
        }
    }
}

#[async_trait]
pub trait StructuredExtractor: Send + Sync {
    /// Extracts a record of the schema for `kind` from `text`.
    async fn extract(&self, kind: DocumentKind, text: &str) -> Result<ExtractedRecord>;
}

/// Extraction via the extraction-model `LlmClient`.
#[derive(Clone)]
pub struct LlmExtractor {
    llm: LlmClient,
}

impl LlmExtractor {
    pub fn new(llm: LlmClient) -> Self {
        Self { llm }
    }
}

#[async_trait]
impl StructuredExtractor for LlmExtractor {
    async fn extract(&self, kind: DocumentKind, text: &str) -> Result<ExtractedRecord> {
        debug!(
            "Extracting {} record with model {}",
            kind.schema_name(),
            self.llm.model()
        );
        let record = match kind {
            DocumentKind::Resume => {
                let prompt = RESUME_PROMPT_TEMPLATE.replace("{resume_markdown}", text);
                let data: ResumeData = self
                    .llm
                    .call_json(&prompt, &with_json_only(RESUME_SYSTEM))
                    .await?;
                ExtractedRecord::Resume(data)
            }
            DocumentKind::Jd => {
                let prompt = JD_PROMPT_TEMPLATE.replace("{job_description_markdown}", text);
                let data: JobDescription =
                    self.llm.call_json(&prompt, &with_json_only(JD_SYSTEM)).await?;
                ExtractedRecord::JobDescription(data)
            }
        };
        Ok(record)
    }
}
