// OCR.space fallback - uploads the whole PDF and joins the recognised text
use crate::config::Config;
use crate::types::{AttendanceError, Result};
use log::{info, warn};
use reqwest::multipart::{Form, Part};
use reqwest::Client;
use serde::Deserialize;
use std::path::Path;
use std::time::Duration;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "PascalCase")]
struct OcrSpaceResponse {
    parsed_results: Option<Vec<ParsedResult>>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "PascalCase")]
struct ParsedResult {
    parsed_text: Option<String>,
}

/// Client for the OCR.space `parse/image` endpoint.
pub struct OcrSpaceClient {
    client: Client,
    endpoint: String,
    api_key: String,
    language: String,
}

impl OcrSpaceClient {
    pub fn new(config: &Config) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.request_timeout_secs))
            .build()?;

        Ok(Self {
            client,
            endpoint: config.ocr_endpoint.clone(),
            api_key: config.ocr_api_key.clone(),
            language: config.ocr_language.clone(),
        })
    }

    /// Upload `pdf_path` and return the text of every result entry joined by
    /// single spaces.
    ///
    /// Fails with `ExternalService` when the service flags
    /// `IsErroredOnProcessing`, and with `Transport` on network errors,
    /// timeouts or a non-success HTTP status.
    pub async fn extract_via_ocr(&self, pdf_path: &Path) -> Result<String> {
        let bytes = std::fs::read(pdf_path)?;
        let file_name = pdf_path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| "document.pdf".to_string());

        info!("Sending {} to OCR.space ({} bytes)", file_name, bytes.len());

        let form = Form::new()
            .part(
                "file",
                Part::bytes(bytes)
                    .file_name(file_name)
                    .mime_str("application/pdf")?,
            )
            .text("apikey", self.api_key.clone())
            .text("language", self.language.clone())
            .text("isOverlayRequired", "false");

        let response = self
            .client
            .post(&self.endpoint)
            .multipart(form)
            .send()
            .await?
            .error_for_status()?;

        let body: serde_json::Value = response.json().await?;
        collect_parsed_text(body)
    }
}

/// Turn an OCR.space response body into text, or the service's own error.
pub fn collect_parsed_text(body: serde_json::Value) -> Result<String> {
    let errored = body
        .get("IsErroredOnProcessing")
        .and_then(|v| v.as_bool())
        .unwrap_or(false);

    if errored {
        let payload = serde_json::to_string_pretty(&body)?;
        warn!("OCR.space reported a processing error");
        return Err(AttendanceError::ExternalService(payload));
    }

    let response: OcrSpaceResponse = serde_json::from_value(body)?;
    let text = response
        .parsed_results
        .unwrap_or_default()
        .into_iter()
        .map(|r| r.parsed_text.unwrap_or_default())
        .collect::<Vec<_>>()
        .join(" ");

    Ok(text)
}
