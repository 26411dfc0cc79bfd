use std::time::Duration;

use anyhow::{bail, Context, Result};

const DEFAULT_OPENROUTER_BASE_URL: &str = "https://openrouter.ai/api/v1";
const DEFAULT_MISTRAL_BASE_URL: &str = "https://api.mistral.ai/v1";
const DEFAULT_EXTRACTION_MODEL: &str = "mistralai/ministral-14b-2512";
const DEFAULT_JUDGE_MODEL: &str = "microsoft/phi-4";
const DEFAULT_OCR_MODEL: &str = "mistral-ocr-latest";

/// Which OCR collaborator turns documents into text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OcrBackend {
    /// Mistral OCR service (upload + signed URL + OCR). Handles PDF and DOCX.
    Mistral,
    /// Local PDF text layer via `pdf-extract`. No network, PDF only.
    Local,
}

impl std::str::FromStr for OcrBackend {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "mistral" => Ok(OcrBackend::Mistral),
            "local" => Ok(OcrBackend::Local),
            other => bail!("OCR_BACKEND must be 'mistral' or 'local', got '{other}'"),
        }
    }
}

/// Application configuration loaded from environment variables.
/// Startup fails if required variables are missing.
#[derive(Debug, Clone)]
pub struct Config {
    pub openrouter_api_key: String,
    pub openrouter_base_url: String,
    /// Only required when `ocr_backend` is `Mistral`.
    pub mistral_api_key: Option<String>,
    pub mistral_base_url: String,
    pub extraction_model: String,
    pub judge_model: String,
    pub ocr_model: String,
    pub ocr_backend: OcrBackend,
    /// Upper bound on every OCR, extraction and judgment call.
    pub collaborator_timeout: Duration,
    pub port: u16,
    pub rust_log: String,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        let ocr_backend: OcrBackend = env_or("OCR_BACKEND", "mistral").parse()?;

        let mistral_api_key = match ocr_backend {
            OcrBackend::Mistral => Some(require_env("MISTRAL_API_KEY")?),
            OcrBackend::Local => std::env::var("MISTRAL_API_KEY").ok(),
        };

        let timeout_secs = env_or("COLLABORATOR_TIMEOUT_SECS", "180")
            .parse::<u64>()
            .context("COLLABORATOR_TIMEOUT_SECS must be a whole number of seconds")?;

        Ok(Config {
            openrouter_api_key: require_env("OPENROUTER_API_KEY")?,
            openrouter_base_url: env_or("OPENROUTER_BASE_URL", DEFAULT_OPENROUTER_BASE_URL),
            mistral_api_key,
            mistral_base_url: env_or("MISTRAL_BASE_URL", DEFAULT_MISTRAL_BASE_URL),
            extraction_model: env_or("EXTRACTION_MODEL", DEFAULT_EXTRACTION_MODEL),
            judge_model: env_or("JUDGE_MODEL", DEFAULT_JUDGE_MODEL),
            ocr_model: env_or("OCR_MODEL", DEFAULT_OCR_MODEL),
            ocr_backend,
            collaborator_timeout: Duration::from_secs(timeout_secs),
            port: env_or("PORT", "8080")
                .parse::<u16>()
                .context("PORT must be a valid port number")?,
            rust_log: env_or("RUST_LOG", "info"),
        })
    }
}

fn require_env(key: &str) -> Result<String> {
    std::env::var(key).with_context(|| format!("Required environment variable '{key}' is not set"))
}

fn env_or(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_string())
}
