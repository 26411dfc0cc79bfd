//! Mistral OCR backend.
//!
//! Flow per document: upload the file (`purpose=ocr`) → fetch a signed URL for the upload →
//! run OCR on that URL → join every page's markdown with a single space.

use std::path::Path;
use std::time::Duration;

use anyhow::{bail, Context, Result};
use async_trait::async_trait;
use reqwest::multipart::{Form, Part};
use reqwest::{Client, Response};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use super::{detect_format, non_empty, OcrService};

/// Lifetime of the signed URL, in hours.
const SIGNED_URL_EXPIRY_HOURS: u32 = 24;

#[derive(Debug, Deserialize)]
struct UploadedFile {
    id: String,
}

#[derive(Debug, Deserialize)]
struct SignedUrl {
    url: String,
}

#[derive(Debug, Serialize)]
struct OcrRequest<'a> {
    model: &'a str,
    document: OcrDocument<'a>,
    include_image_base64: bool,
}

#[derive(Debug, Serialize)]
struct OcrDocument<'a> {
    #[serde(rename = "type")]
    document_type: &'static str,
    document_url: &'a str,
}

#[derive(Debug, Deserialize)]
pub struct OcrResponse {
    pub pages: Vec<OcrPage>,
}

#[derive(Debug, Deserialize)]
pub struct OcrPage {
    #[serde(default)]
    pub markdown: String,
}

impl OcrResponse {
    /// All pages' markdown joined with a single space.
    pub fn markdown(&self) -> String {
        self.pages
            .iter()
            .map(|p| p.markdown.as_str())
            .collect::<Vec<_>>()
            .join(" ")
    }
}

#[derive(Clone)]
pub struct MistralOcr {
    client: Client,
    base_url: String,
    api_key: String,
    model: String,
}

impl MistralOcr {
    pub fn new(
        base_url: impl Into<String>,
        api_key: impl Into<String>,
        model: impl Into<String>,
        timeout: Duration,
    ) -> Result<Self> {
        Ok(Self {
            client: Client::builder()
                .timeout(timeout)
                .build()
                .context("Failed to build OCR HTTP client")?,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            api_key: api_key.into(),
            model: model.into(),
        })
    }

    async fn upload(&self, locator: &Path) -> Result<String> {
        let format = detect_format(locator)?;
        let bytes = tokio::fs::read(locator)
            .await
            .with_context(|| format!("Failed to read '{}'", locator.display()))?;
        let file_name = locator
            .file_name()
            .and_then(|n| n.to_str())
            .unwrap_or("document")
            .to_string();

        let part = Part::bytes(bytes)
            .file_name(file_name)
            .mime_str(format.mime_type())
            .context("Invalid MIME type for upload")?;
        let form = Form::new().text("purpose", "ocr").part("file", part);

        let response = self
            .client
            .post(format!("{}/files", self.base_url))
            .bearer_auth(&self.api_key)
            .multipart(form)
            .send()
            .await
            .context("File upload request failed")?;
        let uploaded: UploadedFile = parse_response(response, "file upload").await?;
        debug!("Uploaded {} as file {}", locator.display(), uploaded.id);
        Ok(uploaded.id)
    }

    async fn signed_url(&self, file_id: &str) -> Result<String> {
        let response = self
            .client
            .get(format!("{}/files/{file_id}/url", self.base_url))
            .query(&[("expiry", SIGNED_URL_EXPIRY_HOURS)])
            .bearer_auth(&self.api_key)
            .send()
            .await
            .context("Signed URL request failed")?;
        let signed: SignedUrl = parse_response(response, "signed URL").await?;
        Ok(signed.url)
    }

    async fn ocr(&self, document_url: &str) -> Result<OcrResponse> {
        let body = OcrRequest {
            model: &self.model,
            document: OcrDocument {
                document_type: "document_url",
                document_url,
            },
            include_image_base64: false,
        };
        let response = self
            .client
            .post(format!("{}/ocr", self.base_url))
            .bearer_auth(&self.api_key)
            .json(&body)
            .send()
            .await
            .context("OCR request failed")?;
        parse_response(response, "OCR").await
    }
}

#[async_trait]
impl OcrService for MistralOcr {
    async fn extract_text(&self, locator: &Path) -> Result<String> {
        let file_id = self.upload(locator).await?;
        let url = self.signed_url(&file_id).await?;
        let ocr = self.ocr(&url).await?;
        info!("OCR finished for {} ({} pages)", locator.display(), ocr.pages.len());
        non_empty(ocr.markdown(), locator)
    }
}

async fn parse_response<T: serde::de::DeserializeOwned>(response: Response, step: &str) -> Result<T> {
    let status = response.status();
    if !status.is_success() {
        let body = response.text().await.unwrap_or_default();
        bail!("{step} failed with status {status}: {body}");
    }
    response
        .json::<T>()
        .await
        .with_context(|| format!("{step} returned an unexpected body"))
}
