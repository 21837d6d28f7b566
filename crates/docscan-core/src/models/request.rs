//! Inbound extraction requests and outbound responses.

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

use crate::document::OcrExtractionResult;

/// A request to recognize and extract one document image.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExtractionRequest {
    /// Publicly reachable URL of the document image.
    pub file_url: String,

    /// Document type tag, e.g. `rg`.
    pub document_type: String,

    /// Fields to extract; empty means all. Anything other than an array of
    /// strings is read as empty.
    #[serde(default, deserialize_with = "lenient_string_list")]
    pub expected_fields: Vec<String>,
}

impl ExtractionRequest {
    /// Create a request that extracts every field.
    pub fn new(file_url: impl Into<String>, document_type: impl Into<String>) -> Self {
        Self {
            file_url: file_url.into(),
            document_type: document_type.into(),
            expected_fields: Vec::new(),
        }
    }

    /// Restrict extraction to `fields`.
    pub fn with_expected_fields<I, S>(mut self, fields: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.expected_fields = fields.into_iter().map(Into::into).collect();
        self
    }
}

fn lenient_string_list<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(match value {
        Value::Array(items) => items
            .into_iter()
            .filter_map(|item| match item {
                Value::String(s) => Some(s),
                _ => None,
            })
            .collect(),
        _ => Vec::new(),
    })
}

/// Outcome of one extraction request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExtractionResponse {
    /// Whether the best attempt reached the success threshold.
    pub success: bool,

    /// Extracted fields of the best attempt.
    pub data: OcrExtractionResult,

    /// Confidence of the best attempt, 0 to 100.
    pub confidence: u8,

    /// Human-readable summary.
    pub message: String,

    /// Orientations tried, in degrees and in trial order.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tested_orientations: Option<Vec<u16>>,
}

impl ExtractionResponse {
    /// Unsuccessful response with no fields.
    pub fn failure(message: impl Into<String>) -> Self {
        Self {
            success: false,
            data: OcrExtractionResult::new(),
            confidence: 0,
            message: message.into(),
            tested_orientations: None,
        }
    }
}
