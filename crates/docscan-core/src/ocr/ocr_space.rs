//! OCR.space HTTP client.

use std::io::Cursor;
use std::time::Duration;

use async_trait::async_trait;
use base64::Engine;
use image::ImageFormat;
use serde_json::Value;
use tracing::{debug, warn};

use super::{OcrService, Orientation, RecognizedText};
use crate::error::OcrError;
use crate::models::OcrConfig;

/// Client for the OCR.space parse endpoint.
///
/// Upright images are passed by URL. Rotated attempts download the image,
/// rotate it locally and upload it as base64.
#[derive(Debug, Clone)]
pub struct OcrSpaceClient {
    client: reqwest::Client,
    config: OcrConfig,
    api_key: String,
}

impl OcrSpaceClient {
    /// Build a client, failing when no API key can be found.
    pub fn new(config: OcrConfig) -> Result<Self, OcrError> {
        let api_key = config.resolve_api_key()?;
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self {
            client,
            config,
            api_key,
        })
    }

    fn base_form(&self) -> Vec<(&'static str, String)> {
        vec![
            ("language", self.config.language.clone()),
            ("OCREngine", self.config.engine.to_string()),
            ("detectOrientation", self.config.detect_orientation.to_string()),
            ("scale", self.config.scale.to_string()),
            ("isOverlayRequired", "false".to_string()),
        ]
    }

    async fn rotated_image(&self, file_url: &str, orientation: Orientation) -> Result<String, OcrError> {
        let response = self.client.get(file_url).send().await?.error_for_status()?;
        let bytes = response.bytes().await?;

        let image = image::load_from_memory(&bytes).map_err(|e| OcrError::Image(e.to_string()))?;
        let rotated = match orientation {
            Orientation::Upright => image,
            Orientation::Right => image.rotate90(),
            Orientation::Flipped => image.rotate180(),
            Orientation::Left => image.rotate270(),
        };

        let mut encoded = Cursor::new(Vec::new());
        rotated
            .write_to(&mut encoded, ImageFormat::Png)
            .map_err(|e| OcrError::Image(e.to_string()))?;

        let payload = base64::engine::general_purpose::STANDARD.encode(encoded.into_inner());
        Ok(format!("data:image/png;base64,{payload}"))
    }
}

#[async_trait]
impl OcrService for OcrSpaceClient {
    fn name(&self) -> &str {
        "ocr.space"
    }

    async fn recognize(&self, file_url: &str, orientation: Orientation) -> Result<RecognizedText, OcrError> {
        let mut form = self.base_form();
        match orientation {
            Orientation::Upright => form.push(("url", file_url.to_string())),
            _ => form.push(("base64Image", self.rotated_image(file_url, orientation).await?)),
        }

        debug!(orientation = orientation.degrees(), "calling OCR service");

        let response = self
            .client
            .post(&self.config.endpoint)
            .header("apikey", &self.api_key)
            .form(&form)
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(OcrError::Service(format!("HTTP {status}: {body}")));
        }

        let payload: Value = response.json().await?;
        parse_response(&payload)
    }
}

/// Turn an OCR.space JSON payload into text.
fn parse_response(payload: &Value) -> Result<RecognizedText, OcrError> {
    if payload["IsErroredOnProcessing"].as_bool().unwrap_or(false) {
        let message = match &payload["ErrorMessage"] {
            Value::Array(items) => items
                .iter()
                .filter_map(Value::as_str)
                .collect::<Vec<_>>()
                .join("; "),
            Value::String(s) => s.clone(),
            _ => "unknown error".to_string(),
        };
        warn!(error = %message, "OCR service reported an error");
        return Err(OcrError::Service(message));
    }

    let text = payload["ParsedResults"]
        .as_array()
        .map(|results| {
            results
                .iter()
                .filter_map(|r| r["ParsedText"].as_str())
                .collect::<Vec<_>>()
                .join("\n")
        })
        .unwrap_or_default();

    if text.trim().is_empty() {
        return Err(OcrError::NoText);
    }

    Ok(RecognizedText::new(text))
}
