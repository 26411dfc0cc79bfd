//! Judgment collaborator: audits an extraction against its source text.
//!
//! A reply that cannot be read as PASS/FAIL plus a summary is an error, never a default PASS.

use anyhow::{anyhow, Result};
use async_trait::async_trait;
use serde::Deserialize;

use crate::llm_client::prompts::with_json_only;
use crate::llm_client::LlmClient;
use crate::workflow::state::Grade;

pub mod prompts;

use prompts::{JUDGE_PROMPT_TEMPLATE, JUDGE_SYSTEM};

/// Grade and explanation returned by the judge for one document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Judgement {
    pub grade: Grade,
    pub summary: String,
}

#[async_trait]
pub trait Judge: Send + Sync {
    /// Judges `record_json` (the serialized record) against the `text` it was extracted from.
    async fn judge(&self, text: &str, record_json: &str) -> Result<Judgement>;
}

/// Wire shape of the judge reply. Older prompts used `verdict`/`reason`.
#[derive(Debug, Deserialize)]
struct JudgeReply {
    #[serde(alias = "verdict")]
    grade: String,
    #[serde(alias = "reason", alias = "summary")]
    grade_summary: String,
}

impl TryFrom<JudgeReply> for Judgement {
    type Error = anyhow::Error;

    fn try_from(reply: JudgeReply) -> Result<Self> {
        let grade = reply
            .grade
            .parse::<Grade>()
            .map_err(|e| anyhow!("malformed verdict: {e}"))?;
        Ok(Judgement {
            grade,
            summary: reply.grade_summary.trim().to_string(),
        })
    }
}

/// Judge backed by the judge-model `LlmClient`.
#[derive(Clone)]
pub struct LlmJudge {
    llm: LlmClient,
}

impl LlmJudge {
    pub fn new(llm: LlmClient) -> Self {
        Self { llm }
    }
}

#[async_trait]
impl Judge for LlmJudge {
    async fn judge(&self, text: &str, record_json: &str) -> Result<Judgement> {
        let prompt = JUDGE_PROMPT_TEMPLATE
            .replace("{jsondata}", record_json)
            .replace("{markdown}", text);
        let reply: JudgeReply = self
            .llm
            .call_json(&prompt, &with_json_only(JUDGE_SYSTEM))
            .await?;
        Judgement::try_from(reply)
    }
}
