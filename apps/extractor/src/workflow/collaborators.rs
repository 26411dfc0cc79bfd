//! Process-wide collaborator handles, built once and injected into every run.

use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use anyhow::{anyhow, Context, Result};
use tracing::info;

use crate::config::{Config, OcrBackend};
use crate::extraction::{LlmExtractor, StructuredExtractor};
use crate::judge::{Judge, LlmJudge};
use crate::llm_client::LlmClient;
use crate::ocr::{LocalPdfOcr, MistralOcr, OcrService};

#[derive(Clone)]
pub struct Collaborators {
    pub ocr: Arc<dyn OcrService>,
    pub extractor: Arc<dyn StructuredExtractor>,
    pub judge: Arc<dyn Judge>,
    /// Upper bound on each individual collaborator call.
    pub call_timeout: Duration,
}

impl Collaborators {
    pub fn from_config(config: &Config) -> Result<Self> {
        let ocr: Arc<dyn OcrService> = match config.ocr_backend {
            OcrBackend::Mistral => {
                let api_key = config
                    .mistral_api_key
                    .clone()
                    .context("MISTRAL_API_KEY is required for the mistral OCR backend")?;
                Arc::new(MistralOcr::new(
                    &config.mistral_base_url,
                    api_key,
                    &config.ocr_model,
                    config.collaborator_timeout,
                )?)
            }
            OcrBackend::Local => Arc::new(LocalPdfOcr),
        };

        let extraction_llm = LlmClient::new(
            &config.openrouter_base_url,
            &config.openrouter_api_key,
            &config.extraction_model,
            config.collaborator_timeout,
        )
        .context("Failed to build extraction LLM client")?;
        let judge_llm = LlmClient::new(
            &config.openrouter_base_url,
            &config.openrouter_api_key,
            &config.judge_model,
            config.collaborator_timeout,
        )
        .context("Failed to build judge LLM client")?;

        info!(
            "Collaborators initialized (ocr: {:?}, extraction: {}, judge: {})",
            config.ocr_backend,
            extraction_llm.model(),
            judge_llm.model()
        );

        Ok(Self {
            ocr,
            extractor: Arc::new(LlmExtractor::new(extraction_llm)),
            judge: Arc::new(LlmJudge::new(judge_llm)),
            call_timeout: config.collaborator_timeout,
        })
    }

    /// Awaits a collaborator call, failing it once `call_timeout` elapses.
    pub async fn bounded<T, F>(&self, call: F) -> Result<T>
    where
        F: Future<Output = Result<T>>,
    {
        tokio::time::timeout(self.call_timeout, call)
            .await
            .map_err(|_| anyhow!("timed out after {}s", self.call_timeout.as_secs_f32()))?
    }
}
